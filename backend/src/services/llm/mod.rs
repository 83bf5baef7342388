//! LLM Service Module
//!
//! Talks to the hosted LLM provider through its OpenAI-compatible chat
//! completion API. The pipeline is deliberately small:
//!
//! ```text
//! PromptService
//!   ├── language detection (services::language)
//!   ├── composer  (system + user + history messages)
//!   ├── registry  (one client handle per model)
//!   └── client    (HTTP executor, typed errors)
//! ```

mod client;
mod composer;
mod registry;
mod service;

pub use client::{LlmClient, LlmError};
pub use composer::{compose, system_instruction, user_instruction, ChatMessage, ChatRole};
pub use registry::ClientRegistry;
pub use service::{PromptError, PromptService};

#[cfg(test)]
mod tests;
