//! Default values for dirsig configuration.
//!
//! This module provides centralized default values used by the library and
//! the CLI, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Signature filename looked for in every visited directory.
pub const DEFAULT_SIGNATURE_FILENAME: &str = ".signature";

/// Default maximum traversal depth below each search root.
pub const DEFAULT_MAX_DEPTH: usize = 1;

/// Mount table consulted for search roots.
pub const DEFAULT_MOUNT_TABLE: &str = "/proc/mounts";

/// Name prefix of the probe files the alias resolver drops into candidates.
pub const PROBE_PREFIX: &str = ".dirsig-probe";

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV_VAR: &str = "DIRSIG_CONFIG";

/// Virtual and pseudo filesystem types that never hold user directories.
pub const IGNORED_FILESYSTEMS: &[&str] = &[
    "binfmt_misc",
    "cgroup",
    "configfs",
    "debugfs",
    "devpts",
    "devtmpfs",
    "fuse.gvfsd-fuse",
    "fusectl",
    "mqueue",
    "proc",
    "pstore",
    "securityfs",
    "sysfs",
    "xenfs",
];

/// Returns the default mount table path.
pub fn default_mount_table() -> PathBuf {
    PathBuf::from(DEFAULT_MOUNT_TABLE)
}

/// Returns the default number of walker threads.
///
/// The available parallelism of the host, but never fewer than four.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(4)
}
