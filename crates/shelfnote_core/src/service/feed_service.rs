//! Global feed aggregation.
//!
//! # Responsibility
//! - Merge the local shelf with the built-in community sample set into one
//!   date-ordered stream.
//!
//! # Invariants
//! - Ordering is deterministic: canonical timestamp descending, review id
//!   ascending as tie-break; undated records sort last.
//! - The sample set is fixed (two records) and stands in for a real
//!   multi-user backend.

use crate::model::review::{display_date, placeholder_cover_url, Review};
use crate::repo::review_repo::{RepoResult, ReviewRepository};
use once_cell::sync::Lazy;
use std::cmp::Ordering;

static COMMUNITY_SAMPLES: Lazy<Vec<Review>> = Lazy::new(build_community_samples);

/// Returns the fixed community sample reviews mixed into the global feed.
pub fn community_samples() -> Vec<Review> {
    COMMUNITY_SAMPLES.clone()
}

/// Feed aggregation service over the review repository.
pub struct FeedService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> FeedService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns local reviews and community samples as one stream, newest
    /// first.
    ///
    /// The feed length is always the local count plus the sample count;
    /// no deduplication or pagination happens here.
    pub fn global_feed(&self) -> RepoResult<Vec<Review>> {
        let mut feed = self.repo.list()?;
        feed.extend(community_samples());
        feed.sort_by(compare_newest_first);
        Ok(feed)
    }
}

/// Deterministic feed ordering: newest first, id as tie-break, undated last.
fn compare_newest_first(a: &Review, b: &Review) -> Ordering {
    match (a.sort_timestamp(), b.sort_timestamp()) {
        (Some(left), Some(right)) => right.cmp(&left).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}

fn build_community_samples() -> Vec<Review> {
    vec![
        sample_review(
            "c1",
            "The Picture of Dorian Gray",
            "Oscar Wilde",
            "A portrait ages so its owner does not; vanity examined without mercy.",
            "Classic",
            112,
            1_715_299_200_000,
        ),
        sample_review(
            "c2",
            "Wuthering Heights",
            "Emily Brontë",
            "Two houses on the moor, and a grudge that outlives everyone in them.",
            "Gothic",
            76,
            1_715_472_000_000,
        ),
    ]
}

fn sample_review(
    id: &str,
    title: &str,
    author: &str,
    content: &str,
    genre: &str,
    likes: u32,
    created_at_ms: i64,
) -> Review {
    Review {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        isbn: None,
        rating: 5,
        content: content.to_string(),
        cover_url: Some(placeholder_cover_url(id)),
        date: display_date(created_at_ms).unwrap_or_default(),
        created_at_ms,
        genre: Some(genre.to_string()),
        likes,
        is_liked: None,
        instagram_caption: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{community_samples, compare_newest_first};
    use crate::model::review::{Review, ReviewDraft};
    use std::cmp::Ordering;

    fn dated(id: &str, created_at_ms: i64) -> Review {
        let mut review = Review::from_draft_at(ReviewDraft::default(), created_at_ms);
        review.id = id.to_string();
        review
    }

    #[test]
    fn newer_review_sorts_before_older() {
        let newer = dated("a", 2_000);
        let older = dated("b", 1_000);
        assert_eq!(compare_newest_first(&newer, &older), Ordering::Less);
        assert_eq!(compare_newest_first(&older, &newer), Ordering::Greater);
    }

    #[test]
    fn equal_timestamps_tie_break_on_id() {
        let first = dated("a", 1_000);
        let second = dated("b", 1_000);
        assert_eq!(compare_newest_first(&first, &second), Ordering::Less);
    }

    #[test]
    fn undated_records_sort_last() {
        let mut undated = dated("a", 1_000);
        undated.created_at_ms = 0;
        undated.date = "not a date".to_string();
        let stamped = dated("b", 1_000);
        assert_eq!(compare_newest_first(&undated, &stamped), Ordering::Greater);
    }

    #[test]
    fn sample_set_is_fixed_and_dated() {
        let samples = community_samples();
        assert_eq!(samples.len(), 2);
        for sample in &samples {
            assert!(sample.sort_timestamp().is_some());
            assert_eq!(sample.date, super::display_date(sample.created_at_ms).unwrap());
        }
    }
}
