//! Review repository contract and record-store-backed implementation.
//!
//! # Responsibility
//! - Provide CRUD over the review collection blob.
//! - Keep blob (de)serialization inside the repository boundary.
//!
//! # Invariants
//! - The collection persists newest-first; insertion order is display order.
//! - Every mutation writes the whole collection back immediately
//!   (write-through, no batching).
//! - A malformed stored blob is recovered as an empty collection and
//!   logged, never surfaced as an error.
//!
//! # See also
//! - docs/architecture/storage.md

use crate::model::review::{Review, ReviewValidationError};
use crate::repo::record_store::{RecordStore, StoreError, REVIEWS_KEY};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::Duration;

/// Delay the original web client injected to emulate a remote backend.
///
/// Off by default; opt in with
/// [`JsonReviewRepository::with_simulated_latency`].
pub const SIMULATED_REMOTE_LATENCY: Duration = Duration::from_millis(800);

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from review persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize review collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Repository interface for review CRUD operations.
///
/// `create` performs no duplicate-id check; callers guarantee uniqueness by
/// construction (`Review::from_draft` derives ids from fresh UUIDs).
pub trait ReviewRepository {
    /// Returns the stored collection, newest first; empty when never written.
    fn list(&self) -> RepoResult<Vec<Review>>;
    /// Prepends one review and persists the whole collection.
    fn create(&self, review: &Review) -> RepoResult<()>;
    /// Removes the review with the matching id; silent no-op when unknown.
    fn delete(&self, id: &str) -> RepoResult<()>;
    /// Overwrites the entire collection (bulk clear path).
    fn replace_all(&self, reviews: &[Review]) -> RepoResult<()>;
}

/// Review repository storing the collection as one JSON array blob.
pub struct JsonReviewRepository<S: RecordStore> {
    store: S,
    simulated_latency: Option<Duration>,
}

impl<S: RecordStore> JsonReviewRepository<S> {
    /// Creates a repository over the given record store, without latency.
    pub fn new(store: S) -> Self {
        Self {
            store,
            simulated_latency: None,
        }
    }

    /// Enables the cooperative remote-call emulation delay on `list`.
    ///
    /// Mutations stay undelayed; the sleep never overlaps another operation
    /// because the caller drives exactly one operation at a time.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = Some(latency);
        self
    }

    fn load_collection(&self) -> RepoResult<Vec<Review>> {
        let Some(blob) = self.store.read(REVIEWS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&blob) {
            Ok(reviews) => Ok(reviews),
            Err(err) => {
                warn!(
                    "event=review_blob_invalid module=repo status=recovered key={REVIEWS_KEY} error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn persist_collection(&self, reviews: &[Review]) -> RepoResult<()> {
        let blob = serde_json::to_string(reviews)?;
        self.store.write(REVIEWS_KEY, &blob)?;
        Ok(())
    }
}

impl<S: RecordStore> ReviewRepository for JsonReviewRepository<S> {
    fn list(&self) -> RepoResult<Vec<Review>> {
        if let Some(latency) = self.simulated_latency {
            thread::sleep(latency);
        }
        self.load_collection()
    }

    fn create(&self, review: &Review) -> RepoResult<()> {
        review.validate()?;

        let existing = self.load_collection()?;
        let mut updated = Vec::with_capacity(existing.len() + 1);
        updated.push(review.clone());
        updated.extend(existing);
        self.persist_collection(&updated)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let mut reviews = self.load_collection()?;
        reviews.retain(|review| review.id != id);
        self.persist_collection(&reviews)
    }

    fn replace_all(&self, reviews: &[Review]) -> RepoResult<()> {
        for review in reviews {
            review.validate()?;
        }
        self.persist_collection(reviews)
    }
}
