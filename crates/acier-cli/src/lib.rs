//! # acier-cli
//!
//! Command-line front end for Acier.
//!
//! The `acier` binary manages ACIs stored in a local JSON directory file:
//! - `create`, `delete`, `modify`, `find`, `show`, dispatched through the
//!   [`CommandRegistry`](acier_ops::CommandRegistry)
//! - `group add` to populate groups and task-groups
//! - `config path|get|init`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod output;

pub use config::AcierConfig;
pub use error::{Error, Result};
