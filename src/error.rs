//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level failures. Each variant maps to one HTTP status; the body is
/// always `{"error": <message>}` with a human-readable message and never a
/// backtrace.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database connection failed")]
    Connection(#[source] sqlx::Error),
    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Query failure with a context string naming the table and operation,
    /// e.g. "Failed to fetch Donor".
    pub fn query(context: impl Into<String>, source: sqlx::Error) -> Self {
        ApiError::Query {
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Connection(e) => {
                tracing::error!(error = %e, "database connection failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Query { context, source } => {
                tracing::error!(error = %source, "{}", context);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
