//! Error types for acier-aci.

use thiserror::Error;

/// Result type alias for acier-aci operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or validating an ACI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The ACI text does not match the `(version 3.0; acl ...)` body syntax.
    #[error("malformed ACI: {0}")]
    Malformed(String),

    /// A target clause such as `(targetattr = "cn")` could not be parsed.
    #[error("malformed target clause: {0}")]
    Target(String),

    /// A permission keyword is not part of the directory vocabulary.
    #[error("invalid permission: '{0}'")]
    Permission(String),

    /// The bind rule is not of the form `keyword op "expression"`.
    #[error("malformed bind rule: {0}")]
    BindRule(String),

    /// The ACI is well-formed but cannot be written to the directory.
    #[error("invalid ACI: {0}")]
    Invalid(String),
}

impl Error {
    /// Returns `true` for syntax errors found while decoding stored text.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Error::Invalid(_))
    }
}
