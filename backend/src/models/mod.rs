pub mod prompt;

pub use prompt::{PromptResponse, UserPromptRequest, WelcomeResponse};
