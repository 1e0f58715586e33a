//! Error types for acier-cli

use thiserror::Error;

/// Result type alias for acier-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in acier-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from acier-core
    #[error(transparent)]
    Core(#[from] acier_core::Error),

    /// Error from an ACI operation
    #[error(transparent)]
    Ops(#[from] acier_ops::Error),

    /// Configuration file could not be located, read or written
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
