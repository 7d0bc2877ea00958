//! Review domain model.
//!
//! # Responsibility
//! - Define the canonical review record persisted to the shelf collection.
//! - Assemble full records from add-form drafts (id, defaults, dates).
//!
//! # Invariants
//! - `id` is stable, unique within the collection and never reused.
//! - `created_at_ms` is the authoritative sort key; `date` is a derived
//!   display string and is only parsed as a fallback for records written
//!   before the canonical timestamp existed.
//! - `rating` stays within 0..=5 (0 meaning "unset").
//!
//! # See also
//! - docs/architecture/data-model.md

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a review.
///
/// Kept as an opaque string rather than a `Uuid`: locally created reviews
/// use freshly generated UUIDs, but community sample records carry short
/// ids such as `"c1"` and both live in the same feed.
pub type ReviewId = String;

/// Title fallback applied when the draft leaves the field blank.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Author fallback applied when the draft leaves the field blank.
pub const DEFAULT_AUTHOR: &str = "Unknown Author";
/// Upper bound of the star scale.
pub const MAX_RATING: u8 = 5;

/// Rendering of the display date, day first as the original client wrote it.
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Validation errors raised before a review reaches persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// The id slot is empty or whitespace.
    EmptyId,
    /// Rating exceeds the 5-star scale.
    RatingOutOfRange(u8),
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "review id must not be empty"),
            Self::RatingOutOfRange(value) => {
                write!(f, "rating {value} is outside the supported 0..={MAX_RATING} range")
            }
        }
    }
}

impl Error for ReviewValidationError {}

/// One book review on the shelf.
///
/// Serialized field names stay camelCase so blobs written by the original
/// web client keep deserializing unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Opaque unique id, assigned at creation, immutable.
    pub id: ReviewId,
    /// Book title; `DEFAULT_TITLE` when the draft left it blank.
    pub title: String,
    /// Book author; `DEFAULT_AUTHOR` when the draft left it blank.
    pub author: String,
    /// Free-text ISBN, unvalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Star rating, 0..=5; 0 means unset.
    pub rating: u8,
    /// Review body.
    pub content: String,
    /// Data-URI of an uploaded cover or generated placeholder URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Display date (`DD/MM/YYYY`), derived from `created_at_ms`.
    pub date: String,
    /// Canonical creation instant in epoch milliseconds.
    ///
    /// Older blobs lack the field; it deserializes to 0 and readers fall
    /// back to parsing `date`.
    #[serde(default)]
    pub created_at_ms: i64,
    /// Optional shelf genre label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Community like counter; local reviews start at 0.
    #[serde(default)]
    pub likes: u32,
    /// Carried for feed rendering, not always populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    /// Carried for the polish flow, not always populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_caption: Option<String>,
}

/// Add-form fields as the user submitted them, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub rating: u8,
    pub content: String,
    pub cover_url: Option<String>,
}

impl Review {
    /// Assembles a full review from a draft using the current wall clock.
    ///
    /// # Invariants
    /// - A fresh UUID-derived `id` is assigned; the caller never supplies one.
    /// - Blank title/author fall back to the placeholder values.
    /// - A missing cover gets a placeholder URL seeded by the new id.
    pub fn from_draft(draft: ReviewDraft) -> Self {
        Self::from_draft_at(draft, Utc::now().timestamp_millis())
    }

    /// Assembles a full review from a draft at a caller-provided instant.
    ///
    /// Used by tests and import paths that need deterministic timestamps.
    pub fn from_draft_at(draft: ReviewDraft, created_at_ms: i64) -> Self {
        let id = Uuid::new_v4().to_string();
        let cover_url = draft
            .cover_url
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| placeholder_cover_url(&id));

        Self {
            title: non_blank_or(draft.title, DEFAULT_TITLE),
            author: non_blank_or(draft.author, DEFAULT_AUTHOR),
            isbn: draft.isbn.filter(|value| !value.trim().is_empty()),
            rating: draft.rating,
            content: draft.content,
            cover_url: Some(cover_url),
            date: display_date(created_at_ms).unwrap_or_default(),
            created_at_ms,
            genre: None,
            likes: 0,
            is_liked: None,
            instagram_caption: None,
            id,
        }
    }

    /// Checks the model invariants enforced before persistence.
    ///
    /// Everything else passes through unvalidated; the repository contract
    /// is deliberately permissive beyond these two checks.
    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        if self.id.trim().is_empty() {
            return Err(ReviewValidationError::EmptyId);
        }
        if self.rating > MAX_RATING {
            return Err(ReviewValidationError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }

    /// Returns the instant this review sorts by in date-ordered views.
    ///
    /// Prefers the canonical timestamp; records written before it existed
    /// fall back to their parsed display date. `None` means the record
    /// carries no usable date at all and sorts last.
    pub fn sort_timestamp(&self) -> Option<i64> {
        if self.created_at_ms > 0 {
            Some(self.created_at_ms)
        } else {
            parse_display_date(&self.date)
        }
    }
}

/// Renders an epoch-milliseconds instant as the `DD/MM/YYYY` display date.
///
/// Returns `None` only for instants outside chrono's representable range.
pub fn display_date(epoch_ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|instant| instant.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Parses a `DD/MM/YYYY` display date back to epoch milliseconds (midnight
/// UTC). Returns `None` for anything that is not a calendar date in that
/// shape; callers treat such records as undated.
pub fn parse_display_date(value: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(value.trim(), DISPLAY_DATE_FORMAT).ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().timestamp_millis())
}

/// Builds the deterministic placeholder cover URL for a review id.
pub fn placeholder_cover_url(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/300/450")
}

fn non_blank_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
