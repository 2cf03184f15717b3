//! Error hierarchy for the scraping layer.
//!
//! Mirrors the failure taxonomy the orchestration layer reacts to:
//! - [`FetchError`] — transport/status failures, always recoverable via the
//!   README fallback;
//! - [`ParseError`] — document fetched but a required anchor is missing
//!   (site layout changed, or an error page disguised as 200);
//! - `UnsupportedPlatform` — no parser wired for a platform; treated as a
//!   detection miss by callers.

use thiserror::Error;

/// Convenient alias for scraping results.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Root error type for the problem-scraper crate.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Transport-level fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Terminal HTTP status (anything other than 200 and 403).
    #[error("http status {status} for {url}")]
    Status { status: u16, url: String },

    /// Every escalation profile answered 403.
    #[error("all {attempts} fetch profiles exhausted with {last_status} for {url}")]
    Exhausted {
        attempts: usize,
        last_status: u16,
        url: String,
    },

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return FetchError::Timeout;
        }
        FetchError::Network(e.to_string())
    }
}

/// Document-level extraction failure.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required anchor (title container, statement root) is absent.
    #[error("{platform}: missing {anchor}")]
    MissingAnchor {
        platform: &'static str,
        anchor: &'static str,
    },

    /// GraphQL response carried errors or no question payload.
    #[error("graphql error: {0}")]
    Graphql(String),

    /// Response body could not be interpreted at all.
    #[error("invalid document: {0}")]
    BadDocument(String),
}
