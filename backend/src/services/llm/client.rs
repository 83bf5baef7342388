//! HTTP client for the provider's chat completion endpoint
//!
//! A client handle is bound to exactly one model. It owns a reqwest
//! client with the configured timeout plus the credentials needed to
//! call the OpenAI-compatible `/chat/completions` endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::LlmConfig;
use crate::services::llm::composer::ChatMessage;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),

    #[error("Failed to connect to LLM provider: {0}")]
    Connection(String),

    #[error("LLM provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse LLM response: {0}")]
    InvalidResponse(String),

    #[error("LLM response contained no choices")]
    EmptyResponse,
}

/// OpenAI-compatible chat completion request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Subset of the chat completion response envelope we consume.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Handle for one model at the remote provider.
pub struct LlmClient {
    http_client: Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout_seconds: u64,
}

impl LlmClient {
    pub fn new(model: impl Into<String>, config: &LlmConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: model.into(),
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// The model this handle is bound to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the composed messages and return the text of the primary
    /// response message, unmodified.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = ChatCompletionRequest { model: &self.model, messages };

        tracing::debug!("Sending chat request to {} (model: {})", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("LLM provider returned {}: {}", status, message);
            return Err(LlmError::Api { status: status.as_u16(), message });
        }

        let envelope: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse LLM response: {}", e);
            LlmError::InvalidResponse(e.to_string())
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        tracing::debug!("Received {} chars from model {}", content.len(), self.model);
        Ok(content)
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            tracing::error!(
                "Timeout error when interacting with LLM (model: {}): {}",
                self.model,
                err
            );
            LlmError::Timeout(self.timeout_seconds)
        } else {
            tracing::error!(
                "Connection error when interacting with LLM (model: {}): {}",
                self.model,
                err
            );
            LlmError::Connection(err.to_string())
        }
    }
}
