//! In-memory directory, primarily for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use acier_core::{
    Attributes, DirectoryConfig, Entry, EntryStore, GroupDirectory, GroupKind, Lookup, Result,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::tree::DirectoryTree;

/// A directory held entirely in memory.
///
/// Implements both [`EntryStore`] and [`GroupDirectory`]. Every successful
/// `update_entry` bumps a write counter so tests can check that read-only
/// operations never write.
#[derive(Debug)]
pub struct MemoryDirectory {
    config: DirectoryConfig,
    tree: RwLock<DirectoryTree>,
    writes: AtomicUsize,
}

impl MemoryDirectory {
    /// A directory containing only the base entry.
    pub fn new(config: DirectoryConfig) -> Self {
        let tree = DirectoryTree::with_base(&config);
        Self::from_tree(config, tree)
    }

    /// Wrap an existing tree.
    pub fn from_tree(config: DirectoryConfig, tree: DirectoryTree) -> Self {
        Self {
            config,
            tree: RwLock::new(tree),
            writes: AtomicUsize::new(0),
        }
    }

    /// Directory layout in use.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Add a group or task-group and return its DN.
    pub async fn add_group(&self, kind: GroupKind, name: &str) -> Result<String> {
        let mut tree = self.tree.write().await;
        let entry = tree.add_group(&self.config, kind, name, name)?;
        Ok(entry.dn)
    }

    /// Current raw values of the base entry's `aci` attribute.
    pub async fn raw_acis(&self) -> Vec<String> {
        let tree = self.tree.read().await;
        tree.get(&self.config.basedn, &[acier_core::ACI_ATTRIBUTE])
            .map(|entry| entry.values(acier_core::ACI_ATTRIBUTE).to_vec())
            .unwrap_or_default()
    }

    /// Replace the base entry's `aci` attribute outright.
    pub async fn set_raw_acis<I, S>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attrs = Attributes::new();
        attrs.insert(
            acier_core::ACI_ATTRIBUTE.to_string(),
            values.into_iter().map(Into::into).collect(),
        );
        self.tree.write().await.update(&self.config.basedn, attrs)
    }

    /// Number of successful `update_entry` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntryStore for MemoryDirectory {
    async fn get_entry(&self, dn: &str, attributes: &[&str]) -> Result<Entry> {
        self.tree.read().await.get(dn, attributes)
    }

    async fn update_entry(&self, dn: &str, attributes: Attributes) -> Result<()> {
        self.tree.write().await.update(dn, attributes)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl GroupDirectory for MemoryDirectory {
    async fn find_group(&self, kind: GroupKind, name: &str) -> Result<Lookup> {
        Ok(self.tree.read().await.find_group(&self.config, kind, name))
    }

    async fn create_taskgroup(&self, name: &str, description: &str) -> Result<Entry> {
        let mut tree = self.tree.write().await;
        let entry = tree.add_group(&self.config, GroupKind::TaskGroup, name, description)?;
        log::info!("Created taskgroup '{name}' at {}", entry.dn);
        Ok(entry)
    }
}
