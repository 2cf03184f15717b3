//! LLM chat clients (enum dispatch, non-streaming).
//!
//! Thin reqwest wrappers around the chat endpoints:
//! - OpenAI:    POST {endpoint}/v1/chat/completions
//! - Anthropic: POST {endpoint}/v1/messages
//!
//! Errors are normalized into [`LlmError`]; a failed completion never
//! carries more than a short body snippet.

use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LlmConfig, LlmProvider};
use crate::errors::{LlmError, MentorResult};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const SNIPPET_MAX: usize = 200;

/// Concrete LLM client (enum-dispatch).
#[derive(Debug)]
pub enum LlmClient {
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
}

impl LlmClient {
    pub fn from_config(cfg: &LlmConfig) -> MentorResult<Self> {
        Ok(match cfg.provider {
            LlmProvider::OpenAi => Self::OpenAi(OpenAiClient::new(cfg.clone())?),
            LlmProvider::Anthropic => Self::Anthropic(AnthropicClient::new(cfg.clone())?),
        })
    }

    /// One non-streaming completion from a system + user message pair.
    pub async fn generate_review(&self, system: &str, user: &str) -> MentorResult<String> {
        match self {
            Self::OpenAi(c) => c.generate(system, user).await,
            Self::Anthropic(c) => c.generate(system, user).await,
        }
    }

    /// "provider (model)" line for the comment footer.
    pub fn describe(&self) -> String {
        let cfg = match self {
            Self::OpenAi(c) => &c.cfg,
            Self::Anthropic(c) => &c.cfg,
        };
        format!("{} ({})", cfg.provider.as_str(), cfg.model)
    }
}

/// Thin client for the OpenAI chat completions API.
#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    cfg: LlmConfig,
    url_chat: String,
}

impl OpenAiClient {
    fn new(cfg: LlmConfig) -> MentorResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
                .map_err(|e| LlmError::Decode(format!("invalid api key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LlmError::from)?;
        let url_chat = format!("{}/v1/chat/completions", cfg.endpoint.trim_end_matches('/'));
        Ok(Self {
            http,
            cfg,
            url_chat,
        })
    }

    async fn generate(&self, system: &str, user: &str) -> MentorResult<String> {
        let request = ChatRequest {
            model: &self.cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.cfg.temperature,
            max_tokens: self.cfg.max_tokens,
        };

        let started = Instant::now();
        let resp = self
            .http
            .post(&self.url_chat)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::from)?;
        let status = resp.status();
        let body = resp.text().await.map_err(LlmError::from)?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                snippet: make_snippet(&body),
            }
            .into());
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)?;

        debug!(
            model = %self.cfg.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "openai completion ok"
        );
        Ok(content)
    }
}

/// Thin client for the Anthropic messages API.
#[derive(Debug)]
pub struct AnthropicClient {
    http: reqwest::Client,
    cfg: LlmConfig,
    url_messages: String,
}

impl AnthropicClient {
    fn new(cfg: LlmConfig) -> MentorResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&cfg.api_key)
                .map_err(|e| LlmError::Decode(format!("invalid api key header: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LlmError::from)?;
        let url_messages = format!("{}/v1/messages", cfg.endpoint.trim_end_matches('/'));
        Ok(Self {
            http,
            cfg,
            url_messages,
        })
    }

    async fn generate(&self, system: &str, user: &str) -> MentorResult<String> {
        let request = MessagesRequest {
            model: &self.cfg.model,
            max_tokens: self.cfg.max_tokens,
            temperature: self.cfg.temperature,
            system,
            messages: vec![ChatMessage {
                role: "user",
                content: user,
            }],
        };

        let started = Instant::now();
        let resp = self
            .http
            .post(&self.url_messages)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::from)?;
        let status = resp.status();
        let body = resp.text().await.map_err(LlmError::from)?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                snippet: make_snippet(&body),
            }
            .into());
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))?;
        let content = parsed
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        if content.trim().is_empty() {
            return Err(LlmError::EmptyCompletion.into());
        }

        debug!(
            model = %self.cfg.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "anthropic completion ok"
        );
        Ok(content)
    }
}

/// Short, log-safe excerpt of an error body.
fn make_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SNIPPET_MAX {
        return trimmed.to_string();
    }
    let mut snippet: String = trimmed.chars().take(SNIPPET_MAX).collect();
    snippet.push_str("...");
    snippet
}

// ===== Wire DTOs =====

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_shape() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "looks good"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "looks good");
    }

    #[test]
    fn messages_response_concatenates_text_blocks() {
        let body = r#"{"content": [{"type": "text", "text": "part one "}, {"type": "text", "text": "part two"}]}"#;
        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        let joined: String = parsed.content.into_iter().map(|b| b.text).collect();
        assert_eq!(joined, "part one part two");
    }

    #[test]
    fn snippets_are_bounded() {
        let short = make_snippet("tiny");
        assert_eq!(short, "tiny");
        let long = make_snippet(&"x".repeat(1000));
        assert!(long.chars().count() <= SNIPPET_MAX + 3);
        assert!(long.ends_with("..."));
    }
}
