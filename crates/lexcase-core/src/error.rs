//! # Error Types
//!
//! Errors raised by the foundational types. Engine-level errors (malformed
//! snapshots, presentation tables, configuration) live next to the code that
//! raises them in `lexcase-lifecycle`.

use thiserror::Error;

/// Top-level error type for the foundational layer.
#[derive(Error, Debug)]
pub enum LexcaseError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A timestamp string could not be accepted.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// An identifier string could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values have no stable JCS rendering across producers and are
    /// not permitted in hashed content.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
