//! Request parameters for the ACI operations.
//!
//! Optional qualifiers are modelled as `Option` fields. When several of
//! them write the same target clause the builder applies them in a fixed
//! order and the last one wins:
//!
//! - `target_filter`: `memberof`, then `filter`
//! - `target`: `target_type`, then `targetgroup`, then `subtree`

use std::fmt;
use std::str::FromStr;

use acier_aci::{LDAP_URI_PREFIX, Permission};
use acier_core::DirectoryConfig;
use serde::{Deserialize, Serialize};

/// Object class an ACI can be scoped to with a canned subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// User entries.
    User,
    /// Group entries.
    Group,
    /// Host entries.
    Host,
}

impl TargetType {
    /// All variants, in display order.
    pub const ALL: [TargetType; 3] = [TargetType::User, TargetType::Group, TargetType::Host];

    /// Keyword used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::User => "user",
            TargetType::Group => "group",
            TargetType::Host => "host",
        }
    }

    /// The `target` URI matching every entry of this type.
    pub fn target_uri(self, config: &DirectoryConfig) -> String {
        let (rdn, container) = match self {
            TargetType::User => ("uid", &config.container_user),
            TargetType::Group => ("cn", &config.container_group),
            TargetType::Host => ("cn", &config.container_host),
        };
        format!("{LDAP_URI_PREFIX}{rdn}=*,{}", config.container_dn(container))
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = acier_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(TargetType::User),
            "group" => Ok(TargetType::Group),
            "host" => Ok(TargetType::Host),
            other => Err(acier_core::Error::validation_field(
                "type",
                format!("'{other}' is not one of user, group, host"),
            )),
        }
    }
}

/// Reference to the grantee task-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupRef {
    /// A task-group name, resolved (and created if missing) when building.
    Name(String),
    /// An already-resolved DN, used as-is.
    Dn(String),
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRef::Name(name) => f.write_str(name),
            GroupRef::Dn(dn) => write!(f, "{LDAP_URI_PREFIX}{dn}"),
        }
    }
}

impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        GroupRef::Name(name.to_string())
    }
}

impl From<String> for GroupRef {
    fn from(name: String) -> Self {
        GroupRef::Name(name)
    }
}

/// Prefix a subtree with `ldap:///` unless it already carries it.
pub fn subtree_uri(subtree: &str) -> String {
    if subtree.starts_with(LDAP_URI_PREFIX) {
        subtree.to_string()
    } else {
        format!("{LDAP_URI_PREFIX}{subtree}")
    }
}

/// Parameters for creating an ACI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AciRequest {
    /// Task-group the ACI grants to.
    pub taskgroup: GroupRef,
    /// Rights to grant.
    pub permissions: Vec<Permission>,
    /// Attribute allow-list.
    pub attrs: Option<Vec<String>>,
    /// Canned subtree by object type.
    pub target_type: Option<TargetType>,
    /// Group whose members the ACI targets.
    pub memberof: Option<String>,
    /// Raw LDAP filter.
    pub filter: Option<String>,
    /// Literal subtree.
    pub subtree: Option<String>,
    /// Group entry the ACI targets directly.
    pub targetgroup: Option<String>,
}

impl AciRequest {
    /// A request granting `permissions` to `taskgroup`, with no target yet.
    pub fn new(taskgroup: impl Into<GroupRef>, permissions: Vec<Permission>) -> Self {
        Self {
            taskgroup: taskgroup.into(),
            permissions,
            attrs: None,
            target_type: None,
            memberof: None,
            filter: None,
            subtree: None,
            targetgroup: None,
        }
    }

    /// Set the attribute allow-list.
    pub fn with_attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs = Some(attrs.into_iter().map(Into::into).collect());
        self
    }

    /// Scope to every entry of a type.
    pub fn with_type(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    /// Target members of a group.
    pub fn with_memberof(mut self, group: impl Into<String>) -> Self {
        self.memberof = Some(group.into());
        self
    }

    /// Target entries matching a filter.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Scope to a subtree.
    pub fn with_subtree(mut self, subtree: impl Into<String>) -> Self {
        self.subtree = Some(subtree.into());
        self
    }

    /// Target a group entry.
    pub fn with_targetgroup(mut self, group: impl Into<String>) -> Self {
        self.targetgroup = Some(group.into());
        self
    }
}

/// Parameters for modifying an ACI; unset fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyRequest {
    /// New grantee task-group.
    pub taskgroup: Option<GroupRef>,
    /// New rights.
    pub permissions: Option<Vec<Permission>>,
    /// New attribute allow-list.
    pub attrs: Option<Vec<String>>,
    /// New canned subtree.
    pub target_type: Option<TargetType>,
    /// New member-of group.
    pub memberof: Option<String>,
    /// New raw filter.
    pub filter: Option<String>,
    /// New subtree.
    pub subtree: Option<String>,
    /// New target group.
    pub targetgroup: Option<String>,
}

/// Criteria for finding ACIs; unset criteria do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindCriteria {
    /// Case-insensitive substring of the name; empty matches everything.
    pub term: String,
    /// Exact name.
    pub aciname: Option<String>,
    /// Exact attribute set, ignoring case and order.
    pub attrs: Option<Vec<String>>,
    /// Grantee task-group name.
    pub taskgroup: Option<String>,
    /// Exact permission set.
    pub permissions: Option<Vec<Permission>>,
    /// Group named by a `(memberOf=...)` target filter.
    pub memberof: Option<String>,
    /// Exact target filter.
    pub filter: Option<String>,
    /// Exact target subtree.
    pub subtree: Option<String>,
    /// Canned subtree by object type.
    pub target_type: Option<TargetType>,
}

impl FindCriteria {
    /// Criteria matching names containing `term`.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }
}

/// ACIs returned by a find.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindResult {
    /// Serialized text of each match.
    pub entries: Vec<String>,
    /// Number of matches.
    pub count: usize,
}

impl FindResult {
    /// Wrap matched ACI texts.
    pub fn new(entries: Vec<String>) -> Self {
        let count = entries.len();
        Self { entries, count }
    }
}
