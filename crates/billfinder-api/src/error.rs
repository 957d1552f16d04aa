use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use billfinder_ingest::error::IngestError;
use billfinder_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    /// An upstream service answered with something unusable; its payload is
    /// returned to the caller.
    Upstream { message: String, payload: Value },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, data) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            ApiError::Upstream { message, payload } => {
                tracing::error!("upstream error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(payload))
            }
        };

        (status, Json(ErrorBody { error: message, data })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("document not found: {key}")),
            StorageError::InvalidKey(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<billfinder_query::error::QueryError> for ApiError {
    fn from(e: billfinder_query::error::QueryError) -> Self {
        match e {
            billfinder_query::error::QueryError::Storage(e) => e.into(),
        }
    }
}

impl From<billfinder_llm::error::LlmError> for ApiError {
    fn from(e: billfinder_llm::error::LlmError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::NoBills { payload } => ApiError::Upstream {
                message: "No bills found in API response".to_string(),
                payload,
            },
            IngestError::Storage(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
