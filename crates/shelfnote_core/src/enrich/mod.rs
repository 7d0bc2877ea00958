//! AI enrichment seam.
//!
//! # Responsibility
//! - Define the provider contract concrete backends implement.
//! - Degrade gracefully when no backend is configured or a call fails.
//!
//! # Invariants
//! - Nothing in this module performs network I/O; adapters live outside the
//!   core crate.

pub mod provider;
pub mod service;

pub use provider::{
    parse_identification, EnrichCall, EnrichError, EnrichResult, EnrichmentProvider,
    Identification, IdentifiedBook,
};
pub use service::EnrichmentService;
