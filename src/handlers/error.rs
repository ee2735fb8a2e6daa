use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::{ErrorKind, TodoError};
use crate::wire::MalformedRequest;

pub const MALFORMED_TYPE: &str = "Malformed";

/// Error returned to HTTP clients as `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub path: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorContent<'a>,
}

#[derive(Serialize)]
struct ErrorContent<'a> {
    status: u16,
    #[serde(rename = "type")]
    kind: &'a str,
    message: &'a str,
    path: &'a str,
}

impl ApiError {
    pub fn from_error(err: TodoError, path: &str) -> Self {
        Self {
            status: status_for(err.kind()),
            kind: err.kind().as_str(),
            message: err.message().to_string(),
            path: path.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>, path: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: MALFORMED_TYPE,
            message: message.into(),
            path: path.to_string(),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotExist => StatusCode::NOT_FOUND,
        ErrorKind::Internal | ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorContent {
                status: self.status.as_u16(),
                kind: self.kind,
                message: &self.message,
                path: &self.path,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

/// Attaches the request path to a failed step of a handler.
pub trait ResultExt<T> {
    fn at_path(self, path: &str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, TodoError> {
    fn at_path(self, path: &str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::from_error(err, path))
    }
}

impl<T> ResultExt<T> for Result<T, MalformedRequest> {
    fn at_path(self, path: &str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::malformed(err.0, path))
    }
}
