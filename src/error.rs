use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP clients. Each request gets at most one of
/// these; none is retried or treated as fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-policy input field; carries the first
    /// violated rule's message.
    #[error("{0}")]
    Validation(String),

    /// Username or email already present; store state unchanged.
    #[error("{0}")]
    Conflict(String),

    /// Unknown username or wrong password. The message is uniform so the
    /// caller cannot tell which one it was.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Unexpected failure; logged, never echoed to the caller.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
