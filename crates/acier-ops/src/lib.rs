//! # acier-ops
//!
//! ACI operations for Acier.
//!
//! This crate implements the operation layer over the ACI model:
//! - Building ACIs from request parameters ([`AciBuilder`])
//! - Create, delete, modify, find and show ([`AciService`])
//! - The find filter passes ([`search`])
//! - An explicit command registry for front ends ([`CommandRegistry`])

#![warn(clippy::all)]

pub mod builder;
pub mod error;
pub mod registry;
pub mod request;
pub mod search;
pub mod service;

pub use builder::AciBuilder;
pub use error::{Error, Result};
pub use registry::{CommandHandler, CommandInput, CommandOutput, CommandRegistry};
pub use request::{
    AciRequest, FindCriteria, FindResult, GroupRef, ModifyRequest, TargetType, subtree_uri,
};
pub use service::{AciService, decode_acis};
