//! Degrading facade over the enrichment provider SPI.
//!
//! # Responsibility
//! - Route identify/recommend/polish calls to the configured provider.
//! - Absorb provider failures so callers never have to branch on them.
//!
//! # Invariants
//! - A failed or unusable provider reply degrades to "no enrichment":
//!   `None` for identify/recommend, the untouched draft for polish.
//! - Running without a provider is a supported configuration, not an error.

use crate::enrich::provider::{
    parse_identification, EnrichCall, EnrichError, EnrichmentProvider, Identification,
    IdentifiedBook,
};
use log::warn;
use std::sync::Arc;

/// Enrichment entry point held by callers.
///
/// Cloning is cheap; the provider handle is shared.
#[derive(Clone, Default)]
pub struct EnrichmentService {
    provider: Option<Arc<dyn EnrichmentProvider>>,
}

impl EnrichmentService {
    /// Creates a service backed by one provider adapter.
    pub fn new(provider: Arc<dyn EnrichmentProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates a service with no provider. Every call degrades immediately.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Identifies the book on a cover photo, or `None` when the provider is
    /// absent, fails, or replies outside the `Title | Author` convention.
    pub fn identify_cover(&self, image: &[u8]) -> Option<IdentifiedBook> {
        let provider = self.provider.as_ref()?;
        match provider.identify_from_image(image) {
            Ok(reply) => match parse_identification(&reply) {
                Identification::Identified(book) => Some(book),
                Identification::Unparseable => {
                    warn!(
                        "event=enrich_reply_unparseable module=enrich status=degraded \
                         provider={} call={}",
                        provider.provider_id(),
                        EnrichCall::Identify
                    );
                    None
                }
            },
            Err(err) => {
                log_degraded(&err);
                None
            }
        }
    }

    /// Suggests one next read, or `None` when the provider is absent, fails,
    /// or replies with nothing but whitespace.
    pub fn recommend_next(&self, shelf_titles: &[String]) -> Option<String> {
        let provider = self.provider.as_ref()?;
        match provider.recommend(shelf_titles) {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    None
                } else {
                    Some(reply.to_string())
                }
            }
            Err(err) => {
                log_degraded(&err);
                None
            }
        }
    }

    /// Rewrites a draft review, falling back to the untouched draft when the
    /// provider is absent, fails, or returns only whitespace.
    pub fn polish_review(&self, title: &str, author: &str, draft: &str) -> String {
        let Some(provider) = self.provider.as_ref() else {
            return draft.to_string();
        };
        match provider.polish(title, author, draft) {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    draft.to_string()
                } else {
                    reply.to_string()
                }
            }
            Err(err) => {
                log_degraded(&err);
                draft.to_string()
            }
        }
    }
}

fn log_degraded(err: &EnrichError) {
    warn!(
        "event=enrich_call_failed module=enrich status=degraded provider={} call={} \
         code={} retryable={}",
        err.provider_id, err.call, err.code, err.retryable
    );
}
