//! Error types for the shared test-case model

use thiserror::Error;

/// Result type alias using the common Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or validating test cases
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Test case id must not be empty")]
    EmptyId,

    #[error("Duplicate test case id: {0}")]
    DuplicateId(String),

    #[error("Invalid input length type '{value}' for {id} (expected S, M or L)")]
    InvalidLength { id: String, value: String },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}
