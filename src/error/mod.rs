//! Error types for qdq-optimizer
//!
//! This module defines all error types used throughout the crate.
//!
//! Note that QDQ *matching* itself never produces an error: a failed match is
//! an expected, frequent outcome communicated as `false`/`None`. The errors
//! here cover graph construction misuse and metadata decoding only.

use thiserror::Error;

/// Main error type for graph construction and metadata decoding
#[derive(Error, Debug)]
pub enum OptError {
    /// Invalid node configuration
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Two nodes claim to produce the same tensor
    #[error("Duplicate producer for tensor: {0}")]
    DuplicateProducer(String),

    /// An initializer with the same name already exists
    #[error("Duplicate initializer: {0}")]
    DuplicateInitializer(String),

    /// Invalid tensor element-type tag
    #[error("Invalid data type: {0}")]
    InvalidDataType(i32),
}

/// Result type alias for graph operations
pub type OptResult<T> = Result<T, OptError>;
