use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use fleet_store::StoreError;

/// Wire shape of every error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// API-level error, mapped once to a status code and `{message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Direct lookup of an unknown id (404).
    #[error("item with id {0} not found")]
    NotFound(String),

    /// Update aimed at an unknown id. Same message as `NotFound`, but the
    /// API contract answers 400 here rather than 404.
    #[error("item with id {0} not found")]
    UnknownUpdateTarget(String),

    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("version conflict")]
    VersionConflict,

    #[error("path id and body id must match")]
    IdMismatch,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnknownUpdateTarget(_) | Self::Validation(_) | Self::IdMismatch => {
                StatusCode::BAD_REQUEST
            }
            Self::VersionConflict => StatusCode::CONFLICT,
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Never leak internals in a 500 body; the log has the detail.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "unexpected error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound(id),
            StoreError::Validation { missing } => Self::Validation(missing),
            StoreError::VersionConflict { .. } => Self::VersionConflict,
        }
    }
}
