//! Error types for the wordbpe crates.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for learning and applying BPE merge lists.
#[derive(Error, Debug)]
pub enum BpeError {
    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Input text that cannot be processed (e.g. not valid UTF-8)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed codes or vocabulary file
    #[error("Load error: {0}")]
    Load(String),

    /// Structural failure while applying merges
    #[error("Apply error: {0}")]
    Apply(String),
}

/// Result type alias for wordbpe operations.
pub type Result<T> = std::result::Result<T, BpeError>;
