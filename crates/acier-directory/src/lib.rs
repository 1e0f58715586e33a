//! # acier-directory
//!
//! Directory backends for Acier.
//!
//! This crate provides two implementations of the
//! [`EntryStore`](acier_core::EntryStore) and
//! [`GroupDirectory`](acier_core::GroupDirectory) collaborator traits:
//! - [`MemoryDirectory`]: in-memory, for tests
//! - [`FileDirectory`]: a JSON file on disk, for local use of the CLI

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod file;
pub mod memory;
pub mod tree;

pub use file::FileDirectory;
pub use memory::MemoryDirectory;
pub use tree::{DirectoryTree, normalize_dn};
