//! Error types for the extraction core

use thiserror::Error;

/// Errors raised by the extraction core
///
/// Everything else inside a parsed document degrades gracefully: a missing
/// attribute is an absent anchor, a missing heading is an absent level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The configuration cannot be used, detected before any traversal
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input could not be turned into a document
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias for the extraction core
pub type Result<T> = std::result::Result<T, ExtractError>;
