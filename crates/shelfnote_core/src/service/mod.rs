//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep caller surfaces decoupled from storage details.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod feed_service;
pub mod session_service;
pub mod shelf_service;
