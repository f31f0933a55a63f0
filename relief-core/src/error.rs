//! Error types for relief

use thiserror::Error;

/// Main error type for relief operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for relief operations
pub type Result<T> = std::result::Result<T, Error>;
