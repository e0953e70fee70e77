//! Project configuration
//!
//! Settings live in the `[storage_layout]` table of `slguard.toml` at the
//! project root. A missing file means all defaults. Unknown keys are rejected
//! so that typos do not silently fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::errors::{invalid_config, io_error, Result};

/// Config file looked up at the project root when no path is given
pub const CONFIG_FILE_NAME: &str = "slguard.toml";

pub const DEFAULT_LAYOUTS_DIR: &str = "storage-layouts";
pub const DEFAULT_BUILD_INFO_DIR: &str = "artifacts/build-info";
pub const DEFAULT_SOURCES_PREFIX: &str = "contracts";

/// The `[storage_layout]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageLayoutConfig {
    /// Allow-list of simple or fully-qualified contract names. Empty selects
    /// every first-party contract.
    pub contracts: Vec<String>,
    /// Name baselines by fully-qualified name instead of contract name
    pub full_path: bool,
    pub layouts_dir: PathBuf,
    pub build_info_dir: PathBuf,
    /// Source path prefix of first-party contracts
    pub sources_prefix: String,
}

impl Default for StorageLayoutConfig {
    fn default() -> Self {
        Self {
            contracts: Vec::new(),
            full_path: true,
            layouts_dir: PathBuf::from(DEFAULT_LAYOUTS_DIR),
            build_info_dir: PathBuf::from(DEFAULT_BUILD_INFO_DIR),
            sources_prefix: DEFAULT_SOURCES_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    storage_layout: StorageLayoutConfig,
}

/// Configuration bound to a project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub storage_layout: StorageLayoutConfig,
}

impl ProjectConfig {
    pub fn new(root: impl Into<PathBuf>, storage_layout: StorageLayoutConfig) -> Self {
        Self {
            root: root.into(),
            storage_layout,
        }
    }

    /// Directory holding baseline snapshots
    pub fn layouts_dir(&self) -> PathBuf {
        normalize_path(&self.root, &self.storage_layout.layouts_dir)
    }

    /// Directory holding compiler build-info documents
    pub fn build_info_dir(&self) -> PathBuf {
        normalize_path(&self.root, &self.storage_layout.build_info_dir)
    }
}

/// Resolve a relative path against the project root.
///
/// Absolute paths pass through. `.` components are dropped and `..` pops
/// a preceding normal component; nothing touches the filesystem.
pub fn normalize_path(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Parse the contents of a config file.
///
/// # Errors
///
/// - `InvalidConfig`: TOML syntax error, wrong value type, or unknown key
pub fn parse_config_str(content: &str, origin: &Path) -> Result<StorageLayoutConfig> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| invalid_config(origin, &e.to_string()))?;
    Ok(file.storage_layout)
}

/// Load configuration for a project.
///
/// With `config_path` unset, `<root>/slguard.toml` is read if present and
/// defaults apply otherwise. An explicit `config_path` must exist.
///
/// # Errors
///
/// - `InvalidConfig`: the file does not parse
/// - `Io`: the file exists but cannot be read, or an explicit path is missing
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<ProjectConfig> {
    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (root.join(CONFIG_FILE_NAME), false),
    };

    let storage_layout = match fs::read_to_string(&path) {
        Ok(content) => parse_config_str(&content, &path)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            StorageLayoutConfig::default()
        }
        Err(e) => return Err(io_error("load_config", &path, e)),
    };

    tracing::debug!(
        path = %path.display(),
        contracts = storage_layout.contracts.len(),
        full_path = storage_layout.full_path,
        "configuration loaded"
    );

    Ok(ProjectConfig::new(root, storage_layout))
}
