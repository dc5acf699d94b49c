//! # Discovery Configuration
//!
//! This module defines `FindConfig`, the single structure that drives a
//! discovery run, and the logic for loading it from a YAML file.
//!
//! ## Layering
//!
//! A configuration is assembled in three layers, later layers winning:
//!
//! 1.  **Defaults** from the `defaults` module.
//! 2.  **Config file**: an optional YAML file, passed with `--config` or named
//!     by the `DIRSIG_CONFIG` environment variable. Every field is optional.
//! 3.  **CLI flags**: `--sig-file`, `--depth`, `--name-hint` and friends.
//!
//! ## Example
//!
//! ```yaml
//! signature_filename: .annex-group
//! max_depth: 2
//! name_hint: annex
//! include_home: false
//! extra_roots:
//!   - /srv/archive
//! ignored_filesystems:
//!   - tmpfs
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Settings for one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FindConfig {
    /// Name of the signature file inside each member directory.
    pub signature_filename: String,

    /// If non-empty, only descend into subdirectories with exactly this name.
    pub name_hint: String,

    /// Maximum number of path segments below a root that may be visited.
    pub max_depth: usize,

    /// Size of the walker thread pool.
    pub workers: usize,

    /// Mount table to enumerate for search roots.
    pub mount_table: PathBuf,

    /// Whether the current user's home directory is a search root.
    pub include_home: bool,

    /// Whether mount targets are search roots.
    pub include_mounts: bool,

    /// Additional search roots, walked after home and mounts.
    pub extra_roots: Vec<PathBuf>,

    /// Filesystem types to skip on top of `defaults::IGNORED_FILESYSTEMS`.
    pub ignored_filesystems: Vec<String>,

    /// Collapse members sharing a device and inode number before probing.
    pub identity_check: bool,
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            signature_filename: defaults::DEFAULT_SIGNATURE_FILENAME.to_string(),
            name_hint: String::new(),
            max_depth: defaults::DEFAULT_MAX_DEPTH,
            workers: defaults::default_workers(),
            mount_table: defaults::default_mount_table(),
            include_home: true,
            include_mounts: true,
            extra_roots: Vec::new(),
            ignored_filesystems: Vec::new(),
            identity_check: true,
        }
    }
}

impl FindConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signature filename.
    pub fn with_signature_filename(mut self, filename: impl Into<String>) -> Self {
        self.signature_filename = filename.into();
        self
    }

    /// Set the directory name hint.
    pub fn with_name_hint(mut self, hint: impl Into<String>) -> Self {
        self.name_hint = hint.into();
        self
    }

    /// Set the maximum traversal depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the walker pool size. Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the mount table path.
    pub fn with_mount_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.mount_table = path.into();
        self
    }

    /// Enable or disable the device/inode identity check.
    pub fn with_identity_check(mut self, enabled: bool) -> Self {
        self.identity_check = enabled;
        self
    }

    /// The complete set of filesystem types to skip.
    pub fn ignore_set(&self) -> BTreeSet<String> {
        defaults::IGNORED_FILESYSTEMS
            .iter()
            .map(|fs| fs.to_string())
            .chain(self.ignored_filesystems.iter().cloned())
            .collect()
    }
}

/// Parses a YAML string into a `FindConfig`.
///
/// Missing fields take their default values; unknown fields are rejected so
/// that typos do not silently fall back to defaults.
pub fn parse(yaml_content: &str) -> Result<FindConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(FindConfig::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| Error::Config {
        message: e.to_string(),
        hint: e
            .to_string()
            .contains("unknown field")
            .then(|| "Check the field names against `FindConfig`".to_string()),
    })
}

/// Loads a `FindConfig` from a YAML file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FindConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("cannot read {}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&content)
}

/// Loads the config file named by `explicit`, falling back to the
/// `DIRSIG_CONFIG` environment variable, falling back to defaults.
pub fn load(explicit: Option<&Path>) -> Result<FindConfig> {
    match explicit {
        Some(path) => from_file(path),
        None => match std::env::var_os(defaults::CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => from_file(PathBuf::from(path)),
            _ => Ok(FindConfig::default()),
        },
    }
}
