//! Error types for idisk

use std::io;
use thiserror::Error;

/// Result type alias for idisk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Raw command output does not have the expected shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown unit of measurement
    #[error("{0}")]
    Measure(String),

    /// Unsupported platform
    #[error("The platform is not supported: {0}")]
    UnsupportedPlatform(String),

    /// Device index outside the physical disk listing
    #[error("Disk {0} does not exist!")]
    DiskNotFound(usize),

    /// External command could not be run or exited with failure
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl Error {
    /// Shorthand for the most common validation failure
    pub(crate) fn invalid_type() -> Self {
        Error::Validation("Not a valid data type!".to_string())
    }
}
