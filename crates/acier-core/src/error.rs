//! Error types for acier-core.

use thiserror::Error;

/// Result type alias for acier-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the directory collaborators.
///
/// All variants are `#[non_exhaustive]` so new failure kinds can be added
/// without breaking downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A named object (entry, group, task-group, ACI) does not exist.
    #[error("{kind} \"{name}\" not found")]
    NotFound {
        /// What kind of object was looked up
        kind: &'static str,
        /// The name or DN that failed to resolve
        name: String,
    },

    /// The directory backend rejected or failed an operation.
    #[error("Directory error: {message}")]
    Directory {
        /// Human-readable error message
        message: String,
    },

    /// A request parameter failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a not-found error for the given kind of object.
    pub fn not_found<S: Into<String>>(kind: &'static str, name: S) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Creates a directory backend error.
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Error::Directory {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns `true` if this error reports a missing object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
