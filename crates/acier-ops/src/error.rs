//! Error types for acier-ops.

use thiserror::Error;

/// Result type alias for acier-ops operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running an ACI operation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the directory collaborators, including lookups that
    /// found nothing.
    #[error(transparent)]
    Core(#[from] acier_core::Error),

    /// The ACI could not be built or validated.
    #[error(transparent)]
    Aci(#[from] acier_aci::Error),

    /// An ACI structurally equal to the candidate already exists.
    #[error("ACI \"{name}\" already exists")]
    DuplicateEntry {
        /// Name of the rejected ACI
        name: String,
    },

    /// The registry has no handler under this name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A handler was given input meant for another command.
    #[error("Command '{command}' expects {expected} input")]
    InvalidInput {
        /// Command that rejected the input
        command: &'static str,
        /// Kind of input it accepts
        expected: &'static str,
    },
}

impl Error {
    /// Returns `true` if a named ACI, group, task-group or entry was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_not_found())
    }

    /// Returns `true` for a duplicate-entry rejection.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::DuplicateEntry { .. })
    }
}
