//! The [`Aci`] value type.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::parse_aci;
use crate::permission::{Permission, join_permissions};
use crate::rule::{BindRule, Clause, TargetRule};

/// Whether an ACI grants or denies its permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Grant the permissions.
    #[default]
    Allow,
    /// Deny the permissions.
    Deny,
}

impl Action {
    /// Keyword used in ACI text.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Allow => "allow",
            Action::Deny => "deny",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "allow" => Ok(Action::Allow),
            "deny" => Ok(Action::Deny),
            other => Err(Error::Malformed(format!("unknown action '{other}'"))),
        }
    }
}

/// One access control instruction.
///
/// `Display` produces the canonical directory text; [`Aci::parse`] reads it
/// back. Two ACIs that differ only in formatting, permission order, or the
/// case of names compare equal under [`Aci::structural_eq`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aci {
    /// Name of the rule; the identity key, compared case-insensitively.
    pub name: String,
    /// Allow or deny.
    pub action: Action,
    /// Rights covered, without repeats.
    pub permissions: Vec<Permission>,
    /// Who the rule applies to.
    pub bind_rule: BindRule,
    /// What the rule applies to.
    pub target: TargetRule,
}

impl Aci {
    /// A new `allow` ACI with no permissions, bind rule, or target yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: Action::Allow,
            permissions: Vec::new(),
            bind_rule: BindRule::default(),
            target: TargetRule::default(),
        }
    }

    /// Decode ACI text.
    pub fn parse(text: &str) -> Result<Self> {
        parse_aci(text)
    }

    /// Canonical directory text.
    pub fn to_aci_string(&self) -> String {
        self.to_string()
    }

    /// Replace the permissions, dropping repeats but keeping first positions.
    pub fn set_permissions<I: IntoIterator<Item = Permission>>(&mut self, permissions: I) {
        self.permissions.clear();
        for p in permissions {
            if !self.permissions.contains(&p) {
                self.permissions.push(p);
            }
        }
    }

    /// Replace the bind rule.
    pub fn set_bind_rule(&mut self, rule: BindRule) {
        self.bind_rule = rule;
    }

    /// Replace the `target` clause with an `=` clause on `uri`.
    pub fn set_target(&mut self, uri: impl Into<String>) {
        self.target.target = Some(Clause::equal(uri.into().trim().to_string()));
    }

    /// Replace the `targetattr` clause. Names are trimmed; blank ones are
    /// dropped.
    pub fn set_target_attr<I, S>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attrs = attrs
            .into_iter()
            .map(|a| a.into().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self.target.target_attr = Some(Clause::equal(attrs));
    }

    /// Replace the `targetfilter` clause, adding outer parentheses if missing.
    pub fn set_target_filter(&mut self, filter: &str) {
        let filter = filter.trim();
        let filter = if filter.starts_with('(') {
            filter.to_string()
        } else {
            format!("({filter})")
        };
        self.target.target_filter = Some(Clause::equal(filter));
    }

    /// Whether this ACI carries `name`, ignoring case.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Semantic equality.
    ///
    /// Compares name (case-insensitive), action, permissions as a set, the
    /// bind rule, and every target clause.
    pub fn structural_eq(&self, other: &Aci) -> bool {
        self.has_name(&other.name)
            && self.action == other.action
            && self.permission_set() == other.permission_set()
            && self.bind_rule == other.bind_rule
            && self.target.structural_eq(&other.target)
    }

    /// Permissions as an ordered set.
    pub fn permission_set(&self) -> BTreeSet<Permission> {
        self.permissions.iter().copied().collect()
    }

    /// Check that this ACI can be written and read back unchanged.
    ///
    /// Besides the field checks, the serialized text is parsed again and
    /// must compare structurally equal to `self`.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Invalid("name must be set".into()));
        }
        if self.name.contains('"') {
            return Err(Error::Invalid("name must not contain '\"'".into()));
        }
        if self.permissions.is_empty() {
            return Err(Error::Invalid("at least one permission is required".into()));
        }
        if self.target.is_empty() {
            return Err(Error::Invalid("at least one target clause is required".into()));
        }
        if self.bind_rule.expression.is_empty() {
            return Err(Error::Invalid("bind rule must be set".into()));
        }
        if self.target.attrs().is_empty() && self.target.target_attr.is_some() {
            return Err(Error::Invalid("targetattr must list at least one attribute".into()));
        }
        let values = self
            .target
            .clauses()
            .into_iter()
            .map(|(_, _, value)| value)
            .chain(std::iter::once(self.bind_rule.expression.clone()));
        for value in values {
            if value.contains('"') {
                return Err(Error::Invalid(format!("value must not contain '\"': {value}")));
            }
        }

        let text = self.to_string();
        let read_back = Aci::parse(&text)
            .map_err(|e| Error::Invalid(format!("does not read back ({e}): {text}")))?;
        if !read_back.structural_eq(self) {
            return Err(Error::Invalid(format!("reads back as a different ACI: {text}")));
        }
        Ok(())
    }
}

impl fmt::Display for Aci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (keyword, operator, value) in self.target.clauses() {
            write!(f, "({keyword} {operator} \"{value}\")")?;
        }
        write!(
            f,
            "(version 3.0;acl \"{}\";{} ({}) {};)",
            self.name,
            self.action,
            join_permissions(&self.permissions),
            self.bind_rule
        )
    }
}

impl FromStr for Aci {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Aci::parse(s)
    }
}
