//! Collaborator traits for directory access.
//!
//! Acier never talks LDAP itself. It is handed two collaborators:
//!
//! - an [`EntryStore`] that reads and writes whole entries by DN, and
//! - a [`GroupDirectory`] that resolves group and task-group names to DNs
//!   and can create task-groups on demand.
//!
//! Name resolution returns an explicit [`Lookup`] rather than an error, so
//! callers decide per call site whether a miss is fatal, inert, or a cue to
//! create the group.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Name of the multi-valued attribute holding every ACI on the base entry.
pub const ACI_ATTRIBUTE: &str = "aci";

/// Attribute map of an entry: attribute name to its values.
pub type Attributes = BTreeMap<String, Vec<String>>;

/// A directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Distinguished name of the entry.
    pub dn: String,
    /// Attribute values, keyed by attribute name.
    #[serde(default)]
    pub attributes: Attributes,
}

impl Entry {
    /// Create an entry with no attributes.
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.insert(
            name.to_string(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Values of an attribute, empty if the attribute is absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.attributes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Which flavour of group a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// An ordinary user group.
    Group,
    /// A task-group, used as the grantee of an ACI.
    TaskGroup,
}

impl GroupKind {
    /// Label used in error messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Group => "group",
            GroupKind::TaskGroup => "taskgroup",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving a group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The group exists; carries its DN.
    Found(String),
    /// No group with that name.
    NotFound,
}

impl Lookup {
    /// The resolved DN, if any.
    pub fn dn(&self) -> Option<&str> {
        match self {
            Lookup::Found(dn) => Some(dn),
            Lookup::NotFound => None,
        }
    }

    /// Convert a miss into [`Error::NotFound`](crate::Error::NotFound).
    pub fn require(self, kind: GroupKind, name: &str) -> Result<String> {
        match self {
            Lookup::Found(dn) => Ok(dn),
            Lookup::NotFound => Err(crate::Error::not_found(kind.label(), name)),
        }
    }
}

/// Reads and writes directory entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Fetch an entry, restricted to the requested attributes.
    ///
    /// Attributes the entry does not carry are simply absent from the
    /// returned map. A missing entry is [`Error::NotFound`](crate::Error::NotFound).
    async fn get_entry(&self, dn: &str, attributes: &[&str]) -> Result<Entry>;

    /// Replace the given attributes of an entry with the supplied values.
    ///
    /// Attributes not named in `attributes` are left untouched.
    async fn update_entry(&self, dn: &str, attributes: Attributes) -> Result<()>;
}

/// Resolves group and task-group names.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Resolve a group name to its DN.
    async fn find_group(&self, kind: GroupKind, name: &str) -> Result<Lookup>;

    /// Create a task-group and return its entry.
    async fn create_taskgroup(&self, name: &str, description: &str) -> Result<Entry>;
}
