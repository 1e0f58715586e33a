//! Permission vocabulary and request normalization.
//!
//! The directory understands nine rights. Only six of them can be granted
//! through a request; the rest (`search`, `compare`, `proxy`) are still
//! accepted when decoding ACIs that were written by other tools.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A directory access right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Read attribute values.
    Read,
    /// Modify attribute values.
    Write,
    /// Create child entries.
    Add,
    /// Delete entries.
    Delete,
    /// Search for entries.
    Search,
    /// Compare attribute values.
    Compare,
    /// Add or remove oneself from a group.
    #[serde(rename = "selfwrite")]
    SelfWrite,
    /// Proxied authorization.
    Proxy,
    /// Every right except proxy.
    All,
}

impl Permission {
    /// Rights a request may grant, in canonical order.
    pub const GRANTABLE: [Permission; 6] = [
        Permission::Read,
        Permission::Write,
        Permission::Add,
        Permission::Delete,
        Permission::SelfWrite,
        Permission::All,
    ];

    /// Keyword used in ACI text.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Add => "add",
            Permission::Delete => "delete",
            Permission::Search => "search",
            Permission::Compare => "compare",
            Permission::SelfWrite => "selfwrite",
            Permission::Proxy => "proxy",
            Permission::All => "all",
        }
    }

    /// Whether a request may grant this right.
    pub fn is_grantable(self) -> bool {
        Self::GRANTABLE.contains(&self)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            "add" => Ok(Permission::Add),
            "delete" => Ok(Permission::Delete),
            "search" => Ok(Permission::Search),
            "compare" => Ok(Permission::Compare),
            "selfwrite" => Ok(Permission::SelfWrite),
            "proxy" => Ok(Permission::Proxy),
            "all" => Ok(Permission::All),
            other => Err(Error::Permission(other.to_string())),
        }
    }
}

/// Normalize a comma-separated permission string from a request.
///
/// Tokens are trimmed and lowercased; anything outside
/// [`Permission::GRANTABLE`] is dropped, as are repeats. The first
/// occurrence of each right keeps its position.
///
/// ```
/// use acier_aci::{normalize_permissions, Permission};
///
/// assert_eq!(
///     normalize_permissions("read, READ ,write"),
///     vec![Permission::Read, Permission::Write]
/// );
/// ```
pub fn normalize_permissions(input: &str) -> Vec<Permission> {
    normalize_permission_list(input.split(','))
}

/// Normalize a list of permission tokens; see [`normalize_permissions`].
pub fn normalize_permission_list<I, S>(tokens: I) -> Vec<Permission>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<Permission> = Vec::new();
    for token in tokens {
        let Ok(permission) = token.as_ref().parse::<Permission>() else {
            continue;
        };
        if permission.is_grantable() && !out.contains(&permission) {
            out.push(permission);
        }
    }
    out
}

/// Join permissions the way the ACI syntax expects (`read,write`).
pub fn join_permissions(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
