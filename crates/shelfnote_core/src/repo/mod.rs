//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate storage and blob-codec details from service orchestration.
//!
//! # Invariants
//! - Review writes enforce `Review::validate()` before persistence.
//! - Unreadable persisted state degrades to the empty/absent default and
//!   is logged, never propagated to callers.

pub mod record_store;
pub mod review_repo;
