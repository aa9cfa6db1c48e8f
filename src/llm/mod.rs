//! Chat-model access.
//!
//! Every supported provider exposes an OpenAI-compatible chat-completions
//! endpoint, so a single client speaks to all of them; only the base URL,
//! model id and key differ (see [`crate::config::ModelConfig`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::errors::{ConfigError, LlmError};

/// A single-turn chat model: system instructions plus one user message in,
/// the assistant's text out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logs.
    fn model_id(&self) -> &str;

    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
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
    content: Option<String>,
}

const TEMPERATURE: f32 = 0.7;

fn build_request<'a>(model: &'a str, system: &'a str, user: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
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
        temperature: TEMPERATURE,
    }
}

fn first_content(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    config: ModelConfig,
}

impl OpenAiCompatClient {
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if !config.timeout.is_zero() {
            builder = builder.timeout(config.timeout);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatClient {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let provider = self.config.provider.as_str();
        let request = build_request(&self.config.model_id, system, user);

        tracing::debug!(
            provider,
            model = %self.config.model_id,
            prompt_chars = user.len(),
            "chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|source| LlmError::Transport { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|source| LlmError::Transport { provider, source })?;

        first_content(parsed).ok_or(LlmError::EmptyResponse { provider })
    }
}
