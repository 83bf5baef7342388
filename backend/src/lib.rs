//! Code Chat API
//!
//! A small HTTP service that forwards user prompts to a hosted LLM
//! provider and returns the generated text.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use services::PromptService;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub prompt_service: PromptService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let prompt_service = PromptService::new(config.llm.clone());
        Self { config, prompt_service }
    }
}

/// Build the application router with CORS and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    // Open CORS: the API is consumed from arbitrary frontends
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home))
        .route("/api/prompt", post(handlers::process_prompt))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
