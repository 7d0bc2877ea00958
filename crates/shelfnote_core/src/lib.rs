//! Core domain logic for ShelfNote.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod enrich;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use enrich::{EnrichmentProvider, EnrichmentService, IdentifiedBook};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::review::{Review, ReviewDraft, ReviewId, ReviewValidationError};
pub use model::user::User;
pub use repo::record_store::{RecordStore, SqliteRecordStore, StoreError, StoreResult};
pub use repo::review_repo::{JsonReviewRepository, RepoError, RepoResult, ReviewRepository};
pub use service::feed_service::{community_samples, FeedService};
pub use service::session_service::{SessionError, SessionManager};
pub use service::shelf_service::ShelfService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
