//! A plain map of entries keyed by normalized DN.
//!
//! [`DirectoryTree`] is the shared state behind both backends. It knows how
//! groups and task-groups are laid out (`cn=<name>,<container>,<basedn>`) and
//! nothing else about directory semantics.

use std::collections::BTreeMap;

use acier_core::{ACI_ATTRIBUTE, Attributes, DirectoryConfig, Entry, Error, GroupKind, Lookup, Result};
use serde::{Deserialize, Serialize};

/// Entries of a directory, keyed by normalized DN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryTree {
    #[serde(default)]
    entries: BTreeMap<String, Entry>,
}

impl DirectoryTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding only the base entry, with an empty `aci` attribute.
    pub fn with_base(config: &DirectoryConfig) -> Self {
        let mut tree = Self::new();
        tree.insert(Entry::new(&config.basedn).with_attribute(ACI_ATTRIBUTE, Vec::<String>::new()));
        tree
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, entry: Entry) {
        self.entries.insert(normalize_dn(&entry.dn), entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch an entry restricted to `attributes` (all of them when empty).
    pub fn get(&self, dn: &str, attributes: &[&str]) -> Result<Entry> {
        let entry = self
            .entries
            .get(&normalize_dn(dn))
            .ok_or_else(|| Error::not_found("entry", dn))?;
        if attributes.is_empty() {
            return Ok(entry.clone());
        }
        let selected = entry
            .attributes
            .iter()
            .filter(|(name, _)| attributes.iter().any(|a| a.eq_ignore_ascii_case(name)))
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect();
        Ok(Entry {
            dn: entry.dn.clone(),
            attributes: selected,
        })
    }

    /// Replace the named attributes of an existing entry.
    pub fn update(&mut self, dn: &str, attributes: Attributes) -> Result<()> {
        let entry = self
            .entries
            .get_mut(&normalize_dn(dn))
            .ok_or_else(|| Error::not_found("entry", dn))?;
        for (name, values) in attributes {
            let existing = entry
                .attributes
                .keys()
                .find(|k| k.eq_ignore_ascii_case(&name))
                .cloned();
            entry.attributes.insert(existing.unwrap_or(name), values);
        }
        Ok(())
    }

    /// DN a group of `kind` called `name` lives at.
    pub fn group_dn(config: &DirectoryConfig, kind: GroupKind, name: &str) -> String {
        let container = match kind {
            GroupKind::Group => &config.container_group,
            GroupKind::TaskGroup => &config.container_taskgroup,
        };
        format!("cn={name},{}", config.container_dn(container))
    }

    /// Resolve a group name.
    pub fn find_group(&self, config: &DirectoryConfig, kind: GroupKind, name: &str) -> Lookup {
        let dn = Self::group_dn(config, kind, name);
        match self.entries.get(&normalize_dn(&dn)) {
            Some(entry) => Lookup::Found(entry.dn.clone()),
            None => Lookup::NotFound,
        }
    }

    /// Add a group entry and return its DN.
    pub fn add_group(
        &mut self,
        config: &DirectoryConfig,
        kind: GroupKind,
        name: &str,
        description: &str,
    ) -> Result<Entry> {
        if name.trim().is_empty() || name.contains([',', '"', ';']) {
            return Err(Error::validation_field("cn", format!("invalid group name '{name}'")));
        }
        if self.find_group(config, kind, name) != Lookup::NotFound {
            return Err(Error::directory(format!("{kind} \"{name}\" already exists")));
        }
        let object_class = match kind {
            GroupKind::Group => "groupofnames",
            GroupKind::TaskGroup => "ipataskgroup",
        };
        let entry = Entry::new(Self::group_dn(config, kind, name))
            .with_attribute("objectclass", ["top", object_class])
            .with_attribute("cn", [name])
            .with_attribute("description", [description]);
        self.insert(entry.clone());
        Ok(entry)
    }
}

/// Lowercase a DN and drop spaces around RDN separators.
pub fn normalize_dn(dn: &str) -> String {
    dn.split(',')
        .map(|rdn| rdn.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}
