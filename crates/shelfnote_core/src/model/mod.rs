//! Domain model for the review diary.
//!
//! # Responsibility
//! - Define the canonical data structures persisted by the record store.
//!
//! # Invariants
//! - Every review is identified by a stable, opaque `ReviewId`.
//! - Serialized field names are camelCase, matching the JSON blobs the
//!   original web client wrote.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod review;
pub mod user;
