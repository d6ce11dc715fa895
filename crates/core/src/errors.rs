//! Shared error codes and the core error type.
//!
//! Every fallible core operation resolves to one of these codes; tool
//! executors prefix their `isError` text with `[CODE]` so clients can pattern
//! match without parsing prose.

use std::fmt;

use thiserror::Error;

use crate::resource::ResourceType;

/// Stable error code surfaced to tool callers as a `[CODE]` text prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    OutOfBounds,
    Locked,
    NotFound,
    InvalidInput,
    Conflict,
    MigrationRequired,
    Timeout,
    Cancelled,
    IoError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::OutOfBounds => "OUT_OF_BOUNDS",
            ErrorCode::Locked => "LOCKED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::MigrationRequired => "MIGRATION_REQUIRED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::IoError => "IO_ERROR",
        };
        write!(f, "{s}")
    }
}

/// Errors raised by the storage, runtime, and service layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("path escapes its workspace root: {0}")]
    OutOfBounds(String),

    #[error("{}已被会话 {holder} 签出", resource_type.checked_out_label())]
    Locked { resource_type: ResourceType, holder: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("scope requires migration to data version {0}")]
    MigrationRequired(u32),

    #[error("operation timed out after {0}ms")]
    Timeout(u64),

    #[error("operation cancelled")]
    Cancelled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::OutOfBounds(_) => ErrorCode::OutOfBounds,
            CoreError::Locked { .. } => ErrorCode::Locked,
            CoreError::NotFound(_) => ErrorCode::NotFound,
            CoreError::InvalidInput(_) => ErrorCode::InvalidInput,
            CoreError::Conflict(_) => ErrorCode::Conflict,
            CoreError::MigrationRequired(_) => ErrorCode::MigrationRequired,
            CoreError::Timeout(_) => ErrorCode::Timeout,
            CoreError::Cancelled => ErrorCode::Cancelled,
            CoreError::Io(_) => ErrorCode::IoError,
            CoreError::Serde(_) => ErrorCode::IoError,
        }
    }

    /// Render as the `[CODE] message` text a tool result's `text` field uses.
    pub fn as_tool_text(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
