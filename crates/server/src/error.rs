use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use concierge::{GenerationError, RecommendError};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Request timeout")]
    Timeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The model call failed or its output was unusable.
    #[error("Generation error: {message}")]
    Generation {
        message: String,
        raw_output: Option<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Generation { .. } => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Timeout => "REQUEST_TIMEOUT",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Generation { .. } => "GENERATION_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServerError::Generation {
                raw_output: Some(raw),
                ..
            } => Some(json!({ "raw_output": raw })),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RecommendError> for ServerError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::Config(msg) => ServerError::Config(msg),
            RecommendError::InvalidPreferences(msg) => ServerError::BadRequest(msg),
            RecommendError::Generation(err) => err.into(),
        }
    }
}

impl From<GenerationError> for ServerError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MissingApiKey => ServerError::Config(err.to_string()),
            err => ServerError::Generation {
                message: err.to_string(),
                raw_output: err.raw_output().map(str::to_string),
            },
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
