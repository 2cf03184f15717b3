//! Crate-wide error hierarchy for commit-reviewer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Provider-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - No dynamic dispatch, ergonomic `?` via `From` impls.
//!
//! Scraping failures (`problem_scraper::ScrapeError`) deliberately do not
//! convert into this hierarchy: they are handled at the per-file
//! orchestration boundary and never abort a run.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type MentorResult<T> = Result<T, Error>;

/// Root error type for the commit-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API related failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// LLM completion failure.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Configuration problems (missing tokens, bad values).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic catch-all error when nothing else fits.
    #[error("other error: {0}")]
    Other(String),
}

/// Detailed provider-specific error used inside the GitHub layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// LLM call failures.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Non-success status from the completion endpoint.
    #[error("llm api status {status}: {snippet}")]
    Api { status: u16, snippet: String },

    /// 200 response without usable completion text.
    #[error("empty completion")]
    EmptyCompletion,

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => ProviderError::Unauthorized,
                403 => ProviderError::Forbidden,
                404 => ProviderError::NotFound,
                429 => ProviderError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => ProviderError::Server(code),
                _ => ProviderError::HttpStatus(code),
            };
        }
        ProviderError::Network(e.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return LlmError::Timeout;
        }
        LlmError::Network(e.to_string())
    }
}
