//! Validation error types
//!
//! `ValidationError` is what the validator returns; `ValidationErrorResponse`
//! is the serializable body front ends emit when they surface one.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Coarse classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// A required field was empty after trimming
    MissingField,
    /// A non-empty field failed a shape check
    InvalidFormat,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingField => write!(f, "MissingField"),
            ErrorKind::InvalidFormat => write!(f, "InvalidFormat"),
        }
    }
}

/// The first rule a render request violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("validation failed: {field} is a required field")]
    MissingField { field: &'static str },

    #[error("validation failed: {field} {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        ValidationError::MissingField { field }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::MissingField { .. } => ErrorKind::MissingField,
            ValidationError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
        }
    }

    /// Name of the offending field, as it appears in messages
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } | ValidationError::InvalidFormat { field, .. } => {
                *field
            }
        }
    }
}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    pub field: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationErrorResponse {
    pub fn new(err: &ValidationError) -> Self {
        Self {
            error: "ValidationError".to_string(),
            kind: err.kind(),
            field: err.field().to_string(),
            message: err.to_string(),
            code: 400,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl From<&ValidationError> for ValidationErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self::new(err)
    }
}
