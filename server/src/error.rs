//! HTTP-facing errors.
//!
//! # Design
//! Error responses carry a status code and nothing else. Only `Internal` is
//! logged: bad input and missing rows are the client's concern, and the
//! backend detail of a storage failure stays in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path id or request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(reason) => {
                tracing::debug!(%reason, "rejected request");
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "storage operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound(3));
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let err = ApiError::from(StoreError::Storage {
            op: "list",
            message: "database is locked".to_string(),
        });
        assert_eq!(err.to_string(), "list: database is locked");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("invalid id".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
