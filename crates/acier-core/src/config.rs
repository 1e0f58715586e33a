//! Directory layout configuration.
//!
//! [`DirectoryConfig`] describes where things live in the directory tree:
//! the base DN that carries the `aci` attribute, and the containers under it
//! that hold users, groups, hosts and task-groups.
//!
//! ```rust
//! use acier_core::DirectoryConfig;
//!
//! let config = DirectoryConfig::default();
//! assert_eq!(
//!     config.container_dn(&config.container_group),
//!     "cn=groups,cn=accounts,dc=example,dc=com"
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Locations of the base entry and the well-known containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Base DN of the tree; its `aci` attribute holds every ACI.
    pub basedn: String,
    /// Relative DN of the user container.
    pub container_user: String,
    /// Relative DN of the group container.
    pub container_group: String,
    /// Relative DN of the host container.
    pub container_host: String,
    /// Relative DN of the task-group container.
    pub container_taskgroup: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            basedn: "dc=example,dc=com".to_string(),
            container_user: "cn=users,cn=accounts".to_string(),
            container_group: "cn=groups,cn=accounts".to_string(),
            container_host: "cn=computers,cn=accounts".to_string(),
            container_taskgroup: "cn=taskgroups,cn=accounts".to_string(),
        }
    }
}

impl DirectoryConfig {
    /// Absolute DN of a container under the base DN.
    pub fn container_dn(&self, container: &str) -> String {
        format!("{container},{}", self.basedn)
    }
}
