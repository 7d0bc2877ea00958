//! Enrichment provider SPI and wire-text parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result alias for provider calls.
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Which provider call produced an outcome. Used in error envelopes and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichCall {
    Identify,
    Recommend,
    Polish,
}

impl Display for EnrichCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identify => write!(f, "identify"),
            Self::Recommend => write!(f, "recommend"),
            Self::Polish => write!(f, "polish"),
        }
    }
}

/// Structured provider failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichError {
    pub provider_id: String,
    pub call: EnrichCall,
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl EnrichError {
    pub fn new(
        provider_id: impl Into<String>,
        call: EnrichCall,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            call,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for EnrichError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "enrichment call {} failed on provider {}: {} ({})",
            self.call, self.provider_id, self.message, self.code
        )
    }
}

impl Error for EnrichError {}

/// Contract every enrichment backend adapter implements.
///
/// Calls are synchronous from the caller's point of view; an adapter that
/// talks to a remote model blocks for the duration of the request.
pub trait EnrichmentProvider: Send + Sync {
    /// Stable adapter id used in logs and error envelopes.
    fn provider_id(&self) -> &str;

    /// Identifies the book on a cover photo.
    ///
    /// The reply is free text expected to follow the `Title | Author`
    /// convention; callers run it through [`parse_identification`].
    fn identify_from_image(&self, image: &[u8]) -> EnrichResult<String>;

    /// Suggests one next read given the titles already on the shelf.
    fn recommend(&self, shelf_titles: &[String]) -> EnrichResult<String>;

    /// Rewrites a draft review into a cleaner version, keeping its voice.
    fn polish(&self, title: &str, author: &str, draft: &str) -> EnrichResult<String>;
}

/// A book identified from a cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedBook {
    pub title: String,
    pub author: String,
}

/// Outcome of parsing a provider identification reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    Identified(IdentifiedBook),
    Unparseable,
}

/// Parses a `Title | Author` provider reply.
///
/// Both segments are trimmed and must be non-empty; anything after a second
/// separator is ignored. Replies that do not fit the convention map to
/// [`Identification::Unparseable`] rather than an error, so callers can
/// degrade without special-casing.
pub fn parse_identification(raw: &str) -> Identification {
    let mut segments = raw.splitn(3, '|');
    let title = segments.next().map(str::trim).unwrap_or_default();
    let author = segments.next().map(str::trim).unwrap_or_default();
    if title.is_empty() || author.is_empty() {
        return Identification::Unparseable;
    }
    Identification::Identified(IdentifiedBook {
        title: title.to_string(),
        author: author.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_identification, EnrichCall, EnrichError, Identification};

    #[test]
    fn parses_title_and_author_with_surrounding_whitespace() {
        let parsed = parse_identification("  The Hour of the Star | Clarice Lispector ");
        match parsed {
            Identification::Identified(book) => {
                assert_eq!(book.title, "The Hour of the Star");
                assert_eq!(book.author, "Clarice Lispector");
            }
            Identification::Unparseable => panic!("reply should parse"),
        }
    }

    #[test]
    fn ignores_segments_after_the_second_separator() {
        let parsed = parse_identification("Dune | Frank Herbert | 1965 | sci-fi");
        match parsed {
            Identification::Identified(book) => {
                assert_eq!(book.title, "Dune");
                assert_eq!(book.author, "Frank Herbert");
            }
            Identification::Unparseable => panic!("extra segments should be ignored"),
        }
    }

    #[test]
    fn missing_or_blank_segments_are_unparseable() {
        assert_eq!(
            parse_identification("Just a title"),
            Identification::Unparseable
        );
        assert_eq!(parse_identification(" | Author"), Identification::Unparseable);
        assert_eq!(parse_identification("Title | "), Identification::Unparseable);
        assert_eq!(parse_identification(""), Identification::Unparseable);
        assert_eq!(parse_identification("|"), Identification::Unparseable);
    }

    #[test]
    fn error_envelope_formats_call_and_code() {
        let err = EnrichError::new("mock", EnrichCall::Polish, "quota", "quota exhausted", true);
        let rendered = err.to_string();
        assert!(rendered.contains("polish"));
        assert!(rendered.contains("mock"));
        assert!(rendered.contains("quota"));
        assert!(err.retryable);
    }
}
