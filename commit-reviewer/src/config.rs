//! Environment-driven configuration.
//!
//! Everything comes from the process environment (a GitHub Actions step or
//! a local `.env`). Validation happens once at startup; a bad configuration
//! is the only class of failure allowed to abort a run.

use crate::errors::ConfigError;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "gpt-4o",
            LlmProvider::Anthropic => "claude-3-5-sonnet-latest",
        }
    }

    fn default_endpoint(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "https://api.openai.com",
            LlmProvider::Anthropic => "https://api.anthropic.com",
        }
    }
}

/// GitHub-related configuration.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    /// `owner/repo`.
    pub repository: String,
    pub commit_sha: String,
}

/// LLM-related configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: String,
    pub endpoint: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Review behavior knobs.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    /// Response language, passed through to the prompt untouched.
    pub language: String,
    /// Description cut-off inside the formatted problem block.
    pub max_description_len: usize,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github: GithubConfig,
    pub llm: LlmConfig,
    pub review: ReviewConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let github = GithubConfig {
            token: require("GITHUB_TOKEN")?,
            repository: require("GITHUB_REPOSITORY")?,
            commit_sha: require("GITHUB_SHA")?,
        };

        let provider_raw =
            std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let provider = match provider_raw.to_ascii_lowercase().as_str() {
            "openai" => LlmProvider::OpenAi,
            "anthropic" => LlmProvider::Anthropic,
            _ => {
                return Err(ConfigError::InvalidValue {
                    name: "LLM_PROVIDER",
                    value: provider_raw,
                });
            }
        };

        let temperature = parse_env("LLM_TEMPERATURE", 0.1_f32)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                name: "LLM_TEMPERATURE",
                value: temperature.to_string(),
            });
        }
        let max_tokens: u32 = parse_env("LLM_MAX_TOKENS", 2000)?;
        if max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LLM_MAX_TOKENS",
                value: "0".to_string(),
            });
        }

        let llm = LlmConfig {
            provider,
            model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| provider.default_model().to_string()),
            api_key: require("LLM_API_KEY")?,
            endpoint: std::env::var("LLM_ENDPOINT")
                .unwrap_or_else(|_| provider.default_endpoint().to_string()),
            max_tokens,
            temperature,
        };

        let review = ReviewConfig {
            language: std::env::var("REVIEW_LANGUAGE")
                .unwrap_or_else(|_| "english".to_string()),
            max_description_len: parse_env("REVIEW_MAX_DESC_LEN", 1000)?,
        };

        Ok(AppConfig {
            github,
            llm,
            review,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}
