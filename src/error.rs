use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T, E = TodoError> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message handed out in place of any internal failure.
pub const INTERNAL_MESSAGE: &str = "internal server error";

const STORE_ORIGIN: &str = "store";

/// Classification of a failure, used for propagation and status mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[default]
    Unknown,
    Internal,
    Validation,
    NotExist,
}

impl ErrorKind {
    /// Stable type string exposed to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "Unknown",
            ErrorKind::Internal => "Internal",
            ErrorKind::Validation => "Validation",
            ErrorKind::NotExist => "NotExist",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "unknown error",
            ErrorKind::Internal => "internal error",
            ErrorKind::Validation => "schema is not valid",
            ErrorKind::NotExist => "element doesn't exist",
        }
    }

    /// Whether errors of this kind may be shown to clients as they are.
    pub fn is_public(self) -> bool {
        matches!(self, ErrorKind::Validation | ErrorKind::NotExist)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure raised somewhere in the todo stack.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TodoError {
    origin: &'static str,
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
    timestamp: DateTime<Utc>,
}

impl TodoError {
    pub fn new(origin: &'static str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            origin,
            kind,
            message: message.into(),
            source: None,
            timestamp: Utc::now(),
        }
    }

    pub fn validation(origin: &'static str, message: impl Into<String>) -> Self {
        Self::new(origin, ErrorKind::Validation, message)
    }

    pub fn not_exist(origin: &'static str, message: impl Into<String>) -> Self {
        Self::new(origin, ErrorKind::NotExist, message)
    }

    pub fn internal(origin: &'static str, message: impl Into<String>) -> Self {
        Self::new(origin, ErrorKind::Internal, message)
    }

    /// Wraps a failure nobody classified. These count as internal.
    pub fn unclassified(origin: &'static str, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::internal(origin, source.to_string()).with_source(source)
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn origin(&self) -> &'static str {
        self.origin
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl From<rusqlite::Error> for TodoError {
    fn from(err: rusqlite::Error) -> Self {
        TodoError::unclassified(STORE_ORIGIN, err)
    }
}
