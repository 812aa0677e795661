//! API error type.
//!
//! Wraps the engine errors and renders them as `{"error": ..., "kind": ...}`
//! with a matching HTTP status.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use osim_process::ProcessError;
use osim_vfs::FsError;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Process engine error
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Filesystem engine error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Request could not be decoded or failed boundary validation
    #[error("Argumento inválido: {0}")]
    InvalidArgument(String),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl ApiError {
    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Stable machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Process(e) => e.kind(),
            ApiError::Fs(e) => e.kind(),
            ApiError::InvalidArgument(_) => "invalid_argument",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Process(e) => match e {
                ProcessError::InvalidArgument(_) | ProcessError::EmptyQueue(_) => {
                    StatusCode::BAD_REQUEST
                }
                ProcessError::NotFound(_) => StatusCode::NOT_FOUND,
                ProcessError::DuplicatePid(_) | ProcessError::NotInQueue { .. } => {
                    StatusCode::CONFLICT
                }
            },
            ApiError::Fs(e) => match e {
                FsError::InvalidArgument(_)
                | FsError::NotADirectory(_)
                | FsError::NotAFile(_) => StatusCode::BAD_REQUEST,
                FsError::UnknownUser(_) | FsError::NotFound(_) => StatusCode::NOT_FOUND,
                FsError::AlreadyExists(_) => StatusCode::CONFLICT,
                FsError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            },
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        debug!(status = status.as_u16(), kind = body.kind, error = %body.error, "request failed");
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}
