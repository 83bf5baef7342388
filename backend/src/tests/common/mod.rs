// Common test utilities and helpers

use std::sync::Arc;

use crate::{app, AppState, Config};
use axum::Router;

/// Build a router wired to the given provider base URL
pub fn create_test_app(api_base: &str) -> Router {
    let mut config = Config::default();
    config.llm.api_key = "test-api-key".to_string();
    config.llm.api_base = api_base.to_string();
    config.llm.timeout_seconds = 5;

    app(Arc::new(AppState::new(config)))
}
