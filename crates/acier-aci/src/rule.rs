//! Bind rules and target rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// URI scheme prefix carried by DN-valued expressions.
pub const LDAP_URI_PREFIX: &str = "ldap:///";

/// Keyword of the `target` clause.
pub const TARGET: &str = "target";
/// Keyword of the `targetattr` clause.
pub const TARGET_ATTR: &str = "targetattr";
/// Keyword of the `targetfilter` clause.
pub const TARGET_FILTER: &str = "targetfilter";

#[allow(clippy::expect_used)]
static BIND_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\(?\s*([A-Za-z0-9;.]+)\s*(!?=)\s*"([^"]*)"\s*\)?$"#)
        .expect("bind rule pattern is valid")
});

/// Comparison operator of a clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    #[default]
    #[serde(rename = "=")]
    Equal,
    /// `!=`
    #[serde(rename = "!=")]
    NotEqual,
}

impl Operator {
    /// Textual form of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
        }
    }

    /// Parse `=` or `!=`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(keyword op "expression")` target clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause<T> {
    /// Comparison operator.
    pub operator: Operator,
    /// Clause value.
    pub expression: T,
}

impl<T> Clause<T> {
    /// A clause using the `=` operator.
    pub fn equal(expression: T) -> Self {
        Self {
            operator: Operator::Equal,
            expression,
        }
    }
}

/// Who an ACI applies to, e.g. `groupdn = "ldap:///cn=admins,dc=example"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindRule {
    /// Bind keyword (`groupdn`, `userdn`, ...).
    pub keyword: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Unquoted expression.
    pub expression: String,
}

impl BindRule {
    /// Bind rule granting to members of the group at `dn`.
    pub fn group_dn(dn: &str) -> Self {
        Self {
            keyword: "groupdn".to_string(),
            operator: Operator::Equal,
            expression: format!("{LDAP_URI_PREFIX}{dn}"),
        }
    }

    /// Parse `keyword op "expression"`, optionally wrapped in parentheses.
    ///
    /// Compound rules (`and` / `or` of several conditions) are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = BIND_RULE
            .captures(text.trim())
            .ok_or_else(|| Error::BindRule(text.to_string()))?;
        let operator =
            Operator::parse(&caps[2]).ok_or_else(|| Error::BindRule(text.to_string()))?;
        Ok(Self {
            keyword: caps[1].to_string(),
            operator,
            expression: caps[3].to_string(),
        })
    }

    /// The DN named by an `ldap:///` expression, if it is one.
    pub fn dn(&self) -> Option<&str> {
        self.expression.strip_prefix(LDAP_URI_PREFIX)
    }
}

impl Default for BindRule {
    fn default() -> Self {
        Self {
            keyword: "groupdn".to_string(),
            operator: Operator::Equal,
            expression: String::new(),
        }
    }
}

impl fmt::Display for BindRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.keyword, self.operator, self.expression)
    }
}

/// Which entries and attributes an ACI applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRule {
    /// `target`: LDAP URI scoping the subtree.
    pub target: Option<Clause<String>>,
    /// `targetattr`: attribute allow-list.
    pub target_attr: Option<Clause<Vec<String>>>,
    /// `targetfilter`: LDAP filter, always parenthesised.
    pub target_filter: Option<Clause<String>>,
    /// Any other target keyword, kept verbatim.
    pub extra: BTreeMap<String, Clause<String>>,
}

impl TargetRule {
    /// No clause set at all.
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
            && self.target_attr.is_none()
            && self.target_filter.is_none()
            && self.extra.is_empty()
    }

    /// Store a clause parsed from text under its keyword.
    pub(crate) fn insert(&mut self, keyword: &str, operator: Operator, value: String) {
        match keyword.to_lowercase().as_str() {
            TARGET => self.target = Some(Clause { operator, expression: value }),
            TARGET_ATTR => {
                self.target_attr = Some(Clause {
                    operator,
                    expression: split_attrs(&value),
                })
            }
            TARGET_FILTER => {
                self.target_filter = Some(Clause { operator, expression: value })
            }
            _ => {
                self.extra
                    .insert(keyword.to_string(), Clause { operator, expression: value });
            }
        }
    }

    /// Attribute names of `targetattr`, empty when unset.
    pub fn attrs(&self) -> &[String] {
        self.target_attr
            .as_ref()
            .map(|c| c.expression.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate every clause as `(keyword, operator, rendered value)` in
    /// canonical order.
    pub fn clauses(&self) -> Vec<(&str, Operator, String)> {
        let mut out = Vec::new();
        if let Some(c) = &self.target {
            out.push((TARGET, c.operator, c.expression.clone()));
        }
        if let Some(c) = &self.target_attr {
            out.push((TARGET_ATTR, c.operator, c.expression.join(" || ")));
        }
        if let Some(c) = &self.target_filter {
            out.push((TARGET_FILTER, c.operator, c.expression.clone()));
        }
        for (keyword, c) in &self.extra {
            out.push((keyword.as_str(), c.operator, c.expression.clone()));
        }
        out
    }

    /// Structural comparison; attribute lists compare as case-insensitive sets.
    pub fn structural_eq(&self, other: &TargetRule) -> bool {
        let attrs_eq = match (&self.target_attr, &other.target_attr) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.operator == b.operator && attr_set(&a.expression) == attr_set(&b.expression)
            }
            _ => false,
        };
        attrs_eq
            && self.target == other.target
            && self.target_filter == other.target_filter
            && self.extra == other.extra
    }
}

/// Split a `cn || sn` attribute expression.
pub(crate) fn split_attrs(value: &str) -> Vec<String> {
    value
        .split("||")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed, lowercased, sorted, deduplicated attribute names.
pub fn attr_set<S: AsRef<str>>(attrs: &[S]) -> Vec<String> {
    let mut set: Vec<String> = attrs
        .iter()
        .map(|a| a.as_ref().trim().to_lowercase())
        .collect();
    set.sort();
    set.dedup();
    set
}
