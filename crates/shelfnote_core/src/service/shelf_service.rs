//! Shelf use-case service.
//!
//! # Responsibility
//! - Provide stable add/list/remove/clear entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service layer remains storage-agnostic.

use crate::model::review::{Review, ReviewDraft};
use crate::repo::review_repo::{RepoResult, ReviewRepository};

/// Use-case facade over the review repository.
pub struct ShelfService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ShelfService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Assembles a review from the add-form draft and persists it.
    ///
    /// # Contract
    /// - Id, creation instant, defaults and cover placeholder are assigned
    ///   here via `Review::from_draft`; the draft never carries them.
    /// - Returns the assembled review for immediate display.
    pub fn add_review(&self, draft: ReviewDraft) -> RepoResult<Review> {
        let review = Review::from_draft(draft);
        self.repo.create(&review)?;
        Ok(review)
    }

    /// Returns the personal shelf, newest first.
    pub fn shelf(&self) -> RepoResult<Vec<Review>> {
        self.repo.list()
    }

    /// Removes one review; unknown ids are a silent no-op.
    pub fn remove_review(&self, id: &str) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Empties the shelf. The destructive confirm dialog lives in the UI;
    /// this call is unconditional.
    pub fn clear_shelf(&self) -> RepoResult<()> {
        self.repo.replace_all(&[])
    }

    /// Returns up to `limit` most recent titles, newest first.
    ///
    /// Input for the recommendation enrichment call.
    pub fn recent_titles(&self, limit: usize) -> RepoResult<Vec<String>> {
        let reviews = self.repo.list()?;
        Ok(reviews
            .into_iter()
            .take(limit)
            .map(|review| review.title)
            .collect())
    }
}
