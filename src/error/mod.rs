use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// Result alias used throughout the grouping engine
pub type Result<T> = std::result::Result<T, GroupingError>;

/// Errors reported by the grouping operations
///
/// An absent key is never an error; entries without a key are skipped.
/// Every variant aborts the whole grouping call, so a caller sees either a
/// complete result or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    #[error(
        "[E{code:04}] must pass an array to '{operation}'; received {received}",
        code = ErrorCode::ARRAY_EXPECTED
    )]
    ArrayExpected { operation: String, received: String },

    #[error(
        "[E{code:04}] must pass entries carrying a label map to '{operation}'; received {received}",
        code = ErrorCode::TYPE_MISMATCH
    )]
    TypeMismatch { operation: String, received: String },

    #[error(
        "[E{code:04}] key '{path}' passed to '{operation}' resolved to a non-string value: {received}",
        code = ErrorCode::KEY_NOT_STRING
    )]
    KeyNotString {
        operation: String,
        path: String,
        received: String,
    },

    #[error("[E{code:04}] Invalid grouping spec: {message}")]
    InvalidSpec { code: u16, message: String },
}

impl GroupingError {
    pub fn array_expected(operation: &str, received: impl std::fmt::Display) -> Self {
        Self::ArrayExpected {
            operation: operation.to_string(),
            received: received.to_string(),
        }
    }

    pub fn type_mismatch(operation: &str, received: impl std::fmt::Display) -> Self {
        Self::TypeMismatch {
            operation: operation.to_string(),
            received: received.to_string(),
        }
    }

    pub fn key_not_string(operation: &str, path: &str, received: impl std::fmt::Display) -> Self {
        Self::KeyNotString {
            operation: operation.to_string(),
            path: path.to_string(),
            received: received.to_string(),
        }
    }

    pub fn invalid_spec(code: u16, message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            code,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::ArrayExpected { .. } => ErrorCode::ARRAY_EXPECTED,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::KeyNotString { .. } => ErrorCode::KEY_NOT_STRING,
            Self::InvalidSpec { code, .. } => *code,
        }
    }

    /// Name of the grouping operation that failed, if any
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::ArrayExpected { operation, .. }
            | Self::TypeMismatch { operation, .. }
            | Self::KeyNotString { operation, .. } => Some(operation),
            Self::InvalidSpec { .. } => None,
        }
    }
}
