//! Agent error types with HTTP status code mapping.
//!
//! [`AgentError`] is the central error type. Storage failures are mostly
//! absorbed inside the persistence layer; the variants that do reach a
//! caller map to a specific HTTP status code and structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid tool arguments: missing field `proverbs`",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status               |
/// |-----------|---------------|---------------------------|
/// | 1000–1999 | Tool boundary | 400 Bad Request / 404     |
/// | 3000–3999 | Server        | 500 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Required connection string is not set.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Schema creation, read, or write failed in the database.
    #[error("storage error: {0}")]
    Storage(String),

    /// The runtime asked for a tool that is not registered.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments did not match the tool's parameter schema.
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AgentError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl AgentError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::UnknownTool(_) => 1001,
            Self::InvalidArguments(_) => 1002,
            Self::Internal(_) => 3000,
            Self::Storage(_) => 3001,
            Self::Configuration(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            Self::UnknownTool(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
