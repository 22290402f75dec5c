//! Error handling for the document model.
//!
//! Every fallible operation in the crate reports one of five error kinds.
//! Each kind carries a stable numeric code and name so that callers (the CLI,
//! the conformance corpus) can compare failures without matching on messages.

use thiserror::Error;

use crate::json::ItemType;

/// All error kinds produced by parsing, accessors, and the binary codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    /// Malformed text input (code 100).
    #[error("syntax error at line {line}: {message}")]
    SyntaxError {
        /// 1-based line of the failure offset.
        line: usize,
        /// What the parser expected to find.
        message: String,
    },

    /// Accessor called against the wrong tag (code 200).
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Tag the accessor requires.
        expected: ItemType,
        /// Tag the item actually holds.
        found: ItemType,
    },

    /// Key or element lookup/removal miss (code 201).
    #[error("not found: {0}")]
    NotFound(String),

    /// Binary buffer structurally invalid or truncated (code 300).
    #[error("corrupt data at offset {offset}: {reason}")]
    CorruptData {
        /// Byte offset into the blob where decoding failed.
        offset: usize,
        /// Which structural check failed.
        reason: String,
    },

    /// File open/read/write failure (code 400).
    #[error("I/O failure on {path}: {reason}")]
    IoFailure {
        /// Path of the file involved.
        path: String,
        /// Rendered operating system error.
        reason: String,
    },
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::SyntaxError { .. } => 100,
            ErrorCode::TypeMismatch { .. } => 200,
            ErrorCode::NotFound(_) => 201,
            ErrorCode::CorruptData { .. } => 300,
            ErrorCode::IoFailure { .. } => 400,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::SyntaxError { .. } => "SyntaxError",
            ErrorCode::TypeMismatch { .. } => "TypeMismatch",
            ErrorCode::NotFound(_) => "NotFound",
            ErrorCode::CorruptData { .. } => "CorruptData",
            ErrorCode::IoFailure { .. } => "IOFailure",
        }
    }

    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        ErrorCode::SyntaxError {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn corrupt(offset: usize, reason: impl Into<String>) -> Self {
        ErrorCode::CorruptData {
            offset,
            reason: reason.into(),
        }
    }

    /// Capture an I/O error against the file it concerns.
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        ErrorCode::IoFailure {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type for document operations.
pub type JsonResult<T> = Result<T, ErrorCode>;
