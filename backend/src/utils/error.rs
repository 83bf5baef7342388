use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::llm::LlmError;
use crate::services::PromptError;

/// API error surfaced to HTTP clients
///
/// Design: every failure that escapes the pipeline is converted here,
/// the single point that turns errors into client-visible responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Prompt(PromptError::Detection(_)) => StatusCode::BAD_REQUEST,
            Self::Prompt(PromptError::Llm(err)) => match err {
                LlmError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                LlmError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
                LlmError::Api { .. } => StatusCode::BAD_GATEWAY,
                LlmError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
                LlmError::EmptyResponse => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

/// Error body shape: `{"detail": "<stringified error>"}`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiErrorResponse { detail: self.to_string() };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
