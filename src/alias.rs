//! # Alias Resolution
//!
//! Two distinct paths can name the same physical directory: a bind mount, a
//! disk reachable both through its own mount point and through the home
//! tree, an NFS export mounted twice. Grouping by path string would list such
//! a directory once per path. This module collapses each group so that no two
//! remaining members are aliases of one another.
//!
//! ## Detection
//!
//! 1.  **Identity check** (Unix, optional): members whose metadata report the
//!     same device and inode number are the same directory. This works on
//!     read-only mounts but misses aliases that reach the kernel through
//!     different devices, such as the same export mounted over two NFS
//!     connections.
//! 2.  **Probing**: for each remaining member `P`, a uniquely named probe
//!     file is created inside `P`. Every other member `Q` in which that name
//!     is now visible is an alias of `P` and is removed. The probe is then
//!     deleted.
//!
//! Members are considered in sorted order, so the lexicographically first
//! path of a set of aliases is the one that survives.
//!
//! ## Failure handling
//!
//! A member that cannot be probed (read-only filesystem, permission denied)
//! is simply not used as a probe source. This can only leave aliases in the
//! result; it never removes a directory that is not an alias. Probe files are
//! `tempfile` handles and are removed on drop, including during unwinding.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::{Builder, NamedTempFile};

use crate::defaults::PROBE_PREFIX;
use crate::group::DirectoryGroup;

/// Collapses aliasing members of a group.
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver {
    identity_check: bool,
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self {
            identity_check: true,
        }
    }
}

impl AliasResolver {
    /// Create a resolver; `identity_check` enables the device/inode pass.
    pub fn new(identity_check: bool) -> Self {
        Self { identity_check }
    }

    /// Returns `group` with aliases removed.
    pub fn resolve(&self, group: DirectoryGroup) -> DirectoryGroup {
        let group = if self.identity_check {
            collapse_identical(group)
        } else {
            group
        };
        collapse_probed(group)
    }
}

/// Drops members whose device and inode match an earlier member.
#[cfg(unix)]
fn collapse_identical(group: DirectoryGroup) -> DirectoryGroup {
    use std::collections::HashSet;
    use std::os::unix::fs::MetadataExt;

    let mut seen = HashSet::new();
    group
        .into_iter()
        .filter(|dir| match std::fs::metadata(dir) {
            Ok(meta) => {
                let fresh = seen.insert((meta.dev(), meta.ino()));
                if !fresh {
                    debug!("{} shares device and inode with another member", dir.display());
                }
                fresh
            }
            // Leave it for the probe pass
            Err(_) => true,
        })
        .collect()
}

#[cfg(not(unix))]
fn collapse_identical(group: DirectoryGroup) -> DirectoryGroup {
    group
}

/// Probe-based alias removal.
fn collapse_probed(mut group: DirectoryGroup) -> DirectoryGroup {
    if group.len() < 2 {
        return group;
    }

    let candidates: Vec<_> = group.iter().cloned().collect();
    for candidate in candidates {
        // Already removed as an alias of an earlier member
        if !group.contains(&candidate) {
            continue;
        }

        let probe = match create_probe(&candidate) {
            Some(probe) => probe,
            None => continue,
        };
        let aliases = visible_elsewhere(&probe, &candidate, &group);
        release_probe(probe);

        for alias in aliases {
            debug!("{} is an alias of {}", alias.display(), candidate.display());
            group.remove(&alias);
        }
    }

    group
}

fn create_probe(dir: &Path) -> Option<NamedTempFile> {
    match Builder::new().prefix(PROBE_PREFIX).tempfile_in(dir) {
        Ok(probe) => Some(probe),
        Err(e) => {
            debug!("Cannot probe {}: {}", dir.display(), e);
            None
        }
    }
}

/// Members other than `source` in which `probe`'s file name is visible.
fn visible_elsewhere(
    probe: &NamedTempFile,
    source: &Path,
    group: &DirectoryGroup,
) -> BTreeSet<PathBuf> {
    let Some(name) = probe.path().file_name() else {
        return BTreeSet::new();
    };

    group
        .iter()
        .filter(|other| other.as_path() != source)
        .filter(|other| std::fs::symlink_metadata(other.join(name)).is_ok())
        .cloned()
        .collect()
}

fn release_probe(probe: NamedTempFile) {
    let path = probe.path().to_path_buf();
    if let Err(e) = probe.close() {
        warn!("Failed to remove probe file {}: {}", path.display(), e);
    }
}
