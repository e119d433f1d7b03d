//! API error types and HTTP mapping for the command API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error type that converts to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error (422)
    #[error("Validation failed: {message}")]
    ValidationError {
        message: String,
        field: Option<String>,
    },

    /// Internal server error (500)
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl ApiError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>, field: Option<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "VALIDATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();
        let message = self.to_string();

        let field = match &self {
            ApiError::ValidationError { field, .. } => field.clone(),
            ApiError::Internal { .. } => None,
        };

        match &self {
            ApiError::Internal { .. } => tracing::error!(error = %self, "API error"),
            ApiError::ValidationError { .. } => tracing::warn!(error = %self, "API error"),
        }

        let body = ErrorResponse {
            code,
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let validation = ApiError::validation("bad phone", Some("phone".to_string()));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = ApiError::internal("test");
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_codes() {
        let validation = ApiError::validation("bad phone", None);
        assert_eq!(validation.error_code(), "VALIDATION_ERROR");
    }
}
