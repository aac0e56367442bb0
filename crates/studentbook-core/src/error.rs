//! Store error types.
//!
//! Validation failures carry a message suitable for showing to a user
//! verbatim; the presentation layer never has to re-derive the reason.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::StudentId;

/// Why a candidate record, or an operation on one, was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name is empty or whitespace only.
    #[error("name cannot be empty")]
    EmptyName,

    /// The name contains a comma or line break, which the file format cannot represent.
    #[error("name cannot contain commas or line breaks: {0:?}")]
    NameContainsSeparator(String),

    /// A mark is below zero.
    #[error("marks cannot be negative ({field} = {value})")]
    NegativeScore { field: &'static str, value: i64 },

    /// The four marks add up to more than an `i64` can hold.
    #[error("marks are too large: their total does not fit in a 64-bit integer")]
    TotalOutOfRange,

    /// A form field is not an integer.
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Add was called with an id already in the store.
    #[error("student ID already exists: {0}")]
    DuplicateId(StudentId),

    /// Update or delete targeted an id that is not in the store.
    #[error("no student with ID {0}")]
    UnknownId(StudentId),
}

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The operation was rejected and nothing was changed.
    #[error("invalid data: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing the backing file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A class report could not be serialized or parsed.
    #[error("report error: {0}")]
    Report(String),
}

impl StoreError {
    /// Returns `true` for rejections caused by the input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Report(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
