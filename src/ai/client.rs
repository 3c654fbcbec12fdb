//! HTTP client for OpenAI-compatible chat completion endpoints

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AiConfig;

/// Completion service errors
#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("AI API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Completion response contained no text")]
    EmptyResponse,
}

/// A single completion call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction framing the model's role
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Free-text completion backend
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Model identifier used for provenance tagging
    fn model(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completion client over reqwest
pub struct CompletionClient {
    client: reqwest::Client,
    cfg: AiConfig,
}

impl CompletionClient {
    /// Create a client with the configured request timeout
    pub fn new(cfg: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self { client, cfg })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    fn model(&self) -> &str {
        &self.cfg.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let body = ChatCompletionRequest {
            model: &self.cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = self.endpoint();
        info!("Calling completion API at {} with model {}", url, self.cfg.model);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(AiError::Status {
                status: status.as_u16(),
                body: truncate(&text, 200).to_string(),
            });
        }

        parse_completion(&text)
    }
}

/// Pull the first choice's text out of a chat completion body
fn parse_completion(body: &str) -> Result<String, AiError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| AiError::InvalidResponse(format!("{} body: {}", e, truncate(body, 200))))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(AiError::EmptyResponse)?;

    debug!("Completion returned {} chars", content.len());
    Ok(content)
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_slash() {
        let mut cfg = AiConfig::with_api_key("sk-test");
        cfg.base_url = "http://localhost:8000/v1/".to_string();
        let client = CompletionClient::new(cfg).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Back the favourite."}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Back the favourite.");
    }

    #[test]
    fn test_parse_completion_empty() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(body), Err(AiError::EmptyResponse)));

        let blank = r#"{"choices":[{"message":{"content":"  "}}]}"#;
        assert!(matches!(parse_completion(blank), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn test_parse_completion_invalid() {
        let err = parse_completion("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse(_)));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_request_serialization() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.5,
            max_tokens: 100,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 100);
    }

    #[test]
    fn test_truncate_respects_chars() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_status_error_display() {
        let err = AiError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "AI API error (429): quota exceeded");
    }
}
