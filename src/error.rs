//! Error types for the cache and its host server
//!
//! Core cache operations never fail; these cover construction and the HTTP
//! surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Engine constructed outside a tokio runtime, so no sweeper can run
    #[error("No tokio runtime available to run the sweeper")]
    NoRuntime,

    /// The process-wide cache was already initialised
    #[error("Global cache already initialized")]
    AlreadyInitialized,
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NoRuntime | CacheError::AlreadyInitialized => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = CacheError::NotFound("k".into()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = CacheError::InvalidRequest("bad".into()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let no_runtime = CacheError::NoRuntime.into_response();
        assert_eq!(no_runtime.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
