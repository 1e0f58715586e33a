//! Configuration for the `acier` binary.
//!
//! Loaded from a TOML file. The file is located from the `--config` flag
//! (which also reads `ACIER_CONFIG`) or else `<config dir>/acier/config.toml`.
//! A missing file is not an error: every field has a default.
//!
//! ```toml
//! [directory]
//! basedn = "dc=example,dc=com"
//! container_taskgroup = "cn=taskgroups,cn=accounts"
//!
//! [store]
//! path = "/var/lib/acier/directory.json"
//! ```

use std::path::{Path, PathBuf};

use acier_core::DirectoryConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Project name used for the config directory and in hints.
pub const PROJECT_NAME: &str = "acier";

/// Where the JSON directory document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the directory file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(PROJECT_NAME).join("directory.json"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcierConfig {
    /// Directory layout.
    pub directory: DirectoryConfig,
    /// Backing store.
    pub store: StoreConfig,
}

impl AcierConfig {
    /// `<config dir>/acier/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the default one.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load the configuration, falling back to defaults when no file exists.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
