//! End-to-end prompt pipeline
//!
//! detect language -> compose messages -> resolve client -> execute.
//! Every failure is typed; nothing is swallowed into an empty success.

use thiserror::Error;

use crate::config::LlmConfig;
use crate::models::UserPromptRequest;
use crate::services::language::{self, DetectionError};
use crate::services::llm::client::LlmError;
use crate::services::llm::composer;
use crate::services::llm::registry::ClientRegistry;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Language detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

pub struct PromptService {
    registry: ClientRegistry,
    default_model: String,
}

impl PromptService {
    pub fn new(config: LlmConfig) -> Self {
        let default_model = config.default_model.clone();
        Self { registry: ClientRegistry::new(config), default_model }
    }

    /// Process one prompt request and return the provider's response
    /// text unmodified.
    pub async fn process_prompt(&self, request: &UserPromptRequest) -> Result<String, PromptError> {
        tracing::info!("Processing prompt: {}", request.text);

        let language = language::detect_language(&request.text)?;
        tracing::info!("Detected language: {}", language);

        let messages = composer::compose(&request.text, &language, &request.history);

        let model = request.model.as_deref().unwrap_or(&self.default_model);
        tracing::info!("Using model: {}", model);

        let client = self.registry.get_client(model);
        let result = client.chat(&messages).await?;

        Ok(result)
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }
}
