//! # acier-aci
//!
//! Directory Server Access Control Instruction model.
//!
//! This crate owns the ACI value type and its text form:
//! - Parsing stored ACI strings into [`Aci`]
//! - Canonical serialization via `Display`
//! - Structural comparison that ignores formatting and ordering
//! - The permission vocabulary and request normalization
//!
//! ```rust
//! use acier_aci::{Aci, BindRule, Permission};
//!
//! let mut aci = Aci::new("read names");
//! aci.set_permissions([Permission::Read]);
//! aci.set_bind_rule(BindRule::group_dn("cn=staff,dc=example"));
//! aci.set_target_attr(["cn"]);
//!
//! let text = aci.to_string();
//! let back = Aci::parse(&text).unwrap();
//! assert!(back.structural_eq(&aci));
//! ```

#![warn(clippy::all)]

pub mod aci;
pub mod error;
pub mod permission;
pub mod rule;

mod parser;
mod proptests;

pub use aci::{Aci, Action};
pub use error::{Error, Result};
pub use permission::{Permission, join_permissions, normalize_permission_list, normalize_permissions};
pub use rule::{BindRule, Clause, LDAP_URI_PREFIX, Operator, TargetRule, attr_set};
