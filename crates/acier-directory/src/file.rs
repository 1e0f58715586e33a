//! Directory persisted as a JSON document.
//!
//! Used by the `acier` binary as a local stand-in for a real directory
//! server. The file is read on every call and rewritten on every update, so
//! it has the same read-modify-write behaviour as the real backend: two
//! processes updating it concurrently can lose each other's changes.
//!
//! The document shape is:
//!
//! ```json
//! { "entries": { "dc=example,dc=com": { "dn": "dc=example,dc=com", "attributes": { "aci": [] } } } }
//! ```

use std::path::{Path, PathBuf};

use acier_core::{
    Attributes, DirectoryConfig, Entry, EntryStore, Error, GroupDirectory, GroupKind, Lookup,
    Result,
};
use async_trait::async_trait;

use crate::tree::DirectoryTree;

/// A directory stored in a JSON file.
#[derive(Debug, Clone)]
pub struct FileDirectory {
    path: PathBuf,
    config: DirectoryConfig,
}

impl FileDirectory {
    /// Open a directory file. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>, config: DirectoryConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Create the file with just the base entry.
    ///
    /// Fails if the file already exists and `force` is false.
    pub async fn init(&self, force: bool) -> Result<()> {
        if !force && tokio::fs::try_exists(&self.path).await? {
            return Err(Error::config(format!(
                "Directory file already exists at {}. Use --force to overwrite.",
                self.path.display()
            )));
        }
        self.save(&DirectoryTree::with_base(&self.config)).await
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<DirectoryTree> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "Directory file {} missing, starting from base entry",
                    self.path.display()
                );
                Ok(DirectoryTree::with_base(&self.config))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, tree: &DirectoryTree) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(tree)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl EntryStore for FileDirectory {
    async fn get_entry(&self, dn: &str, attributes: &[&str]) -> Result<Entry> {
        self.load().await?.get(dn, attributes)
    }

    async fn update_entry(&self, dn: &str, attributes: Attributes) -> Result<()> {
        let mut tree = self.load().await?;
        tree.update(dn, attributes)?;
        self.save(&tree).await
    }
}

#[async_trait]
impl GroupDirectory for FileDirectory {
    async fn find_group(&self, kind: GroupKind, name: &str) -> Result<Lookup> {
        Ok(self.load().await?.find_group(&self.config, kind, name))
    }

    async fn create_taskgroup(&self, name: &str, description: &str) -> Result<Entry> {
        let mut tree = self.load().await?;
        let entry = tree.add_group(&self.config, GroupKind::TaskGroup, name, description)?;
        self.save(&tree).await?;
        log::info!("Created taskgroup '{name}' at {}", entry.dn);
        Ok(entry)
    }
}

impl FileDirectory {
    /// Add an ordinary group (or task-group) to the file.
    pub async fn add_group(&self, kind: GroupKind, name: &str, description: &str) -> Result<String> {
        let mut tree = self.load().await?;
        let entry = tree.add_group(&self.config, kind, name, description)?;
        self.save(&tree).await?;
        Ok(entry.dn)
    }
}
