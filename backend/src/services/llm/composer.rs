//! Chat message composition
//!
//! Builds the ordered message sequence sent to the provider: a system
//! instruction parameterized by the detected language, the primary user
//! instruction wrapping the raw prompt, then any prior turns verbatim.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Conversational role tags understood by the provider.
///
/// Parsed at the API boundary so a malformed role is rejected with a
/// validation error instead of being forwarded blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in the outgoing chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// System instruction parameterized by the detected input language.
pub fn system_instruction(language: &str) -> String {
    format!(
        "Please use the user's language ({}) for non-code explanations, and don't append notes in the bottom. Finally, format the code clearly in markdown.",
        language
    )
}

/// Primary user instruction wrapping the raw prompt text.
pub fn user_instruction(text: &str) -> String {
    format!("Please provide full description and code samples for '{}'.", text)
}

/// Build the full message sequence for one request.
///
/// Ordering is significant: the provider treats message order as
/// conversational order, so history follows the two primary messages
/// oldest first, role and content unchanged.
pub fn compose(text: &str, language: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2 + history.len());
    messages.push(ChatMessage::system(system_instruction(language)));
    messages.push(ChatMessage::user(user_instruction(text)));
    messages.extend(history.iter().cloned());
    messages
}
