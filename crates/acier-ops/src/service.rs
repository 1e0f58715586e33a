//! ACI operations over the base entry's `aci` attribute.
//!
//! Every operation reads the whole attribute, works in memory, and (for
//! mutations) writes the whole attribute back. There is no locking and no
//! version check: two concurrent mutations can overwrite each other's
//! changes. Callers that need safety under concurrent writers must
//! serialize access themselves.

use std::sync::Arc;

use acier_aci::Aci;
use acier_core::{ACI_ATTRIBUTE, Attributes, DirectoryConfig, EntryStore, GroupDirectory, GroupKind};

use crate::builder::AciBuilder;
use crate::error::{Error, Result};
use crate::request::{AciRequest, FindCriteria, FindResult, ModifyRequest, subtree_uri};
use crate::search;

/// Raw and decoded ACIs of the base entry.
struct AciSet {
    dn: String,
    raw: Vec<String>,
    acis: Vec<Aci>,
}

impl AciSet {
    fn find_by_name(&self, name: &str) -> Result<&Aci> {
        self.acis
            .iter()
            .find(|a| a.has_name(name))
            .ok_or_else(|| acier_core::Error::not_found("ACI", name).into())
    }
}

/// Decode stored ACI values, dropping any that do not parse.
pub fn decode_acis(raw: &[String]) -> Vec<Aci> {
    raw.iter()
        .filter_map(|text| match Aci::parse(text) {
            Ok(aci) => Some(aci),
            Err(e) => {
                log::debug!("Skipping unparseable ACI: {e}");
                None
            }
        })
        .collect()
}

/// Create, delete, modify, find and show ACIs.
#[derive(Clone)]
pub struct AciService {
    store: Arc<dyn EntryStore>,
    groups: Arc<dyn GroupDirectory>,
    config: DirectoryConfig,
}

impl AciService {
    /// Create a service over the given collaborators.
    pub fn new(
        store: Arc<dyn EntryStore>,
        groups: Arc<dyn GroupDirectory>,
        config: DirectoryConfig,
    ) -> Self {
        Self {
            store,
            groups,
            config,
        }
    }

    /// Directory layout in use.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    async fn load(&self) -> Result<AciSet> {
        let entry = self
            .store
            .get_entry(&self.config.basedn, &[ACI_ATTRIBUTE])
            .await?;
        let raw = entry.values(ACI_ATTRIBUTE).to_vec();
        let acis = decode_acis(&raw);
        log::debug!(
            "Loaded {} ACIs from {} ({} unparseable)",
            acis.len(),
            entry.dn,
            raw.len() - acis.len()
        );
        Ok(AciSet {
            dn: entry.dn,
            raw,
            acis,
        })
    }

    async fn store_raw(&self, dn: &str, raw: Vec<String>) -> Result<()> {
        let mut attributes = Attributes::new();
        attributes.insert(ACI_ATTRIBUTE.to_string(), raw);
        self.store.update_entry(dn, attributes).await?;
        Ok(())
    }

    /// Add a new ACI and return its text.
    ///
    /// Fails with [`Error::DuplicateEntry`] if a structurally equal ACI is
    /// already stored.
    pub async fn create(&self, name: &str, request: &AciRequest) -> Result<String> {
        let set = self.load().await?;
        let aci = AciBuilder::new(self.groups.as_ref(), &self.config)
            .build(name, request)
            .await?;
        let text = self.append(set, &aci).await?;
        log::info!("Created ACI '{name}'");
        Ok(text)
    }

    /// Validate `aci`, reject duplicates, and append it to the stored values.
    async fn append(&self, set: AciSet, aci: &Aci) -> Result<String> {
        aci.validate()?;
        if set.acis.iter().any(|a| a.structural_eq(aci)) {
            return Err(Error::DuplicateEntry {
                name: aci.name.clone(),
            });
        }

        let text = aci.to_string();
        let mut raw = set.raw;
        raw.push(text.clone());
        self.store_raw(&set.dn, raw).await?;
        Ok(text)
    }

    /// Remove the ACI called `name` (case-insensitive).
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let set = self.load().await?;
        let aci = set.find_by_name(name)?;

        let mut raw = set.raw.clone();
        let position = raw
            .iter()
            .position(|text| Aci::parse(text).is_ok_and(|a| a.structural_eq(aci)));
        if let Some(index) = position {
            raw.remove(index);
        }
        self.store_raw(&set.dn, raw).await?;

        log::info!("Deleted ACI '{name}'");
        Ok(true)
    }

    /// Replace the ACI called `name`, keeping any field the request leaves
    /// unset.
    ///
    /// Untouched clauses keep their operator, and an untouched grantee keeps
    /// its bind keyword and operator. Task-group resolution and the
    /// write-back happen after the delete: this is a delete followed by a
    /// create, not an atomic update. If the second step fails (a duplicate
    /// of another ACI, a group that does not resolve, a directory error),
    /// the original ACI stays deleted.
    pub async fn modify(&self, name: &str, request: &ModifyRequest) -> Result<String> {
        let set = self.load().await?;
        let mut updated = set.find_by_name(name)?.clone();
        updated.name = name.to_string();

        self.delete(name).await?;
        match self.recreate(updated, request).await {
            Ok(text) => {
                log::info!("Modified ACI '{name}'");
                Ok(text)
            }
            Err(e) => {
                log::error!("ACI '{name}' was deleted but could not be recreated: {e}");
                Err(e)
            }
        }
    }

    async fn recreate(&self, mut aci: Aci, request: &ModifyRequest) -> Result<String> {
        let set = self.load().await?;
        AciBuilder::new(self.groups.as_ref(), &self.config)
            .apply(&mut aci, request)
            .await?;
        self.append(set, &aci).await
    }

    /// ACIs matching every supplied criterion.
    pub async fn find(&self, criteria: &FindCriteria) -> Result<FindResult> {
        let set = self.load().await?;
        let mut results: Vec<&Aci> = set.acis.iter().collect();

        results = search::by_term(&results, &criteria.term);
        if let Some(name) = &criteria.aciname {
            results = search::by_name(&results, name);
        }
        if let Some(attrs) = &criteria.attrs {
            results = search::by_attrs(&results, attrs);
        }
        if let Some(taskgroup) = &criteria.taskgroup {
            let lookup = self.groups.find_group(GroupKind::TaskGroup, taskgroup).await?;
            results = search::by_taskgroup(&results, &lookup);
        }
        if let Some(permissions) = &criteria.permissions {
            results = search::by_permissions(&results, permissions);
        }
        if let Some(group) = &criteria.memberof {
            let lookup = self.groups.find_group(GroupKind::Group, group).await?;
            results = search::by_memberof(&results, &lookup);
        }
        if let Some(filter) = &criteria.filter {
            results = search::by_filter(&results, filter);
        }
        if let Some(subtree) = &criteria.subtree {
            results = search::by_target(&results, &subtree_uri(subtree));
        }
        if let Some(target_type) = criteria.target_type {
            results = search::by_target(&results, &target_type.target_uri(&self.config));
        }

        Ok(FindResult::new(
            results.iter().map(|a| a.to_string()).collect(),
        ))
    }

    /// Text of the ACI called `name` (case-insensitive).
    pub async fn show(&self, name: &str) -> Result<String> {
        let set = self.load().await?;
        Ok(set.find_by_name(name)?.to_string())
    }
}
