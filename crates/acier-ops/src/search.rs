//! Filter passes used by find.
//!
//! Each pass takes the current matches and returns the subset that
//! survives. Passes that depend on a group lookup take the [`Lookup`]
//! itself: an unresolved name leaves the input untouched.

use std::collections::BTreeSet;

use acier_aci::{Aci, LDAP_URI_PREFIX, Permission, attr_set};
use acier_core::Lookup;

/// Names containing `term`, ignoring case. An empty term keeps everything.
pub fn by_term<'a>(acis: &[&'a Aci], term: &str) -> Vec<&'a Aci> {
    if term.is_empty() {
        return acis.to_vec();
    }
    let term = term.to_lowercase();
    acis.iter()
        .copied()
        .filter(|a| a.name.to_lowercase().contains(&term))
        .collect()
}

/// Exact name match.
pub fn by_name<'a>(acis: &[&'a Aci], name: &str) -> Vec<&'a Aci> {
    acis.iter().copied().filter(|a| a.name == name).collect()
}

/// `targetattr` equal to `attrs` as a case-insensitive set.
pub fn by_attrs<'a>(acis: &[&'a Aci], attrs: &[String]) -> Vec<&'a Aci> {
    let wanted = attr_set(attrs);
    acis.iter()
        .copied()
        .filter(|a| attr_set(a.target.attrs()) == wanted)
        .collect()
}

/// Bind rule naming the resolved task-group.
pub fn by_taskgroup<'a>(acis: &[&'a Aci], taskgroup: &Lookup) -> Vec<&'a Aci> {
    let Some(dn) = taskgroup.dn() else {
        return acis.to_vec();
    };
    let expected = format!("{LDAP_URI_PREFIX}{dn}");
    acis.iter()
        .copied()
        .filter(|a| a.bind_rule.expression == expected)
        .collect()
}

/// Permission set equal to `permissions`.
pub fn by_permissions<'a>(acis: &[&'a Aci], permissions: &[Permission]) -> Vec<&'a Aci> {
    let wanted: BTreeSet<Permission> = permissions.iter().copied().collect();
    acis.iter()
        .copied()
        .filter(|a| a.permission_set() == wanted)
        .collect()
}

/// Target filter equal to `(memberOf=<dn>)` for the resolved group.
pub fn by_memberof<'a>(acis: &[&'a Aci], group: &Lookup) -> Vec<&'a Aci> {
    let Some(dn) = group.dn() else {
        return acis.to_vec();
    };
    by_filter(acis, &format!("(memberOf={dn})"))
}

/// Target filter equal to `filter`; parentheses are added if missing.
pub fn by_filter<'a>(acis: &[&'a Aci], filter: &str) -> Vec<&'a Aci> {
    let filter = filter.trim();
    let expected = if filter.starts_with('(') {
        filter.to_string()
    } else {
        format!("({filter})")
    };
    acis.iter()
        .copied()
        .filter(|a| {
            a.target
                .target_filter
                .as_ref()
                .is_some_and(|f| f.expression == expected)
        })
        .collect()
}

/// Target URI equal to `uri`.
pub fn by_target<'a>(acis: &[&'a Aci], uri: &str) -> Vec<&'a Aci> {
    acis.iter()
        .copied()
        .filter(|a| a.target.target.as_ref().is_some_and(|t| t.expression == uri))
        .collect()
}
