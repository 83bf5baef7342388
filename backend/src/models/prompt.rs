//! Request/response bodies for the prompt endpoint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::services::llm::ChatMessage;

/// Incoming prompt request.
///
/// `text` also accepts the legacy `prompt` key. History turns are parsed
/// into typed role/content pairs; an unknown role fails deserialization.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserPromptRequest {
    #[serde(alias = "prompt")]
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,

    /// Target model; the configured default is used when omitted
    #[serde(default)]
    pub model: Option<String>,

    /// Prior turns, oldest first, forwarded verbatim after the primary messages
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptResponse {
    pub result: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}
