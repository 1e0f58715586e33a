//! Acier Core: shared types, traits, errors, and configuration.
//!
//! This crate provides the foundational types used across all Acier crates.
//! It has no internal Acier dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: Directory layout configuration (base DN, containers)
//! - [`directory`]: Collaborator traits for the entry store and group lookup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod directory;
pub mod error;

// Re-export key types at crate root for convenience
pub use config::DirectoryConfig;
pub use directory::{
    ACI_ATTRIBUTE, Attributes, Entry, EntryStore, GroupDirectory, GroupKind, Lookup,
};
pub use error::{Error, Result};
