//! Prompt API Handlers
//!
//! REST endpoints consuming the prompt pipeline.

use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::models::{PromptResponse, UserPromptRequest, WelcomeResponse};
use crate::utils::{ApiError, ApiResult};
use crate::AppState;

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    ),
    tag = "Prompt"
)]
pub async fn home() -> Json<WelcomeResponse> {
    Json(WelcomeResponse { message: "Welcome to the Code Chat API!".to_string() })
}

/// Process a user prompt through the LLM pipeline
#[utoipa::path(
    post,
    path = "/api/prompt",
    request_body = UserPromptRequest,
    responses(
        (status = 200, description = "Generated response text", body = PromptResponse),
        (status = 400, description = "Invalid request or undetectable input language"),
        (status = 502, description = "Provider rejected the request"),
        (status = 503, description = "Provider unreachable"),
        (status = 504, description = "Provider timed out"),
    ),
    tag = "Prompt"
)]
pub async fn process_prompt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UserPromptRequest>,
) -> ApiResult<Json<PromptResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::validation_error(e.to_string()))?;

    let result = state.prompt_service.process_prompt(&request).await?;

    Ok(Json(PromptResponse { result }))
}
