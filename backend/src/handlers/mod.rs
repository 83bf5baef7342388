pub mod prompt;

pub use prompt::{home, process_prompt};
