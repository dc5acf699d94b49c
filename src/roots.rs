//! Search root selection.
//!
//! The roots of a discovery run are the current user's home directory (when
//! it can be resolved), every non-virtual mount target, and any extra roots
//! named in the configuration, in that order. Roots are not deduplicated;
//! `/` and `/home` may both appear, and the double visits are collapsed
//! after signatures are read.

use std::path::PathBuf;

use log::{debug, warn};

use crate::config::FindConfig;
use crate::mounts;

/// Returns the search roots for `config`.
pub fn search_roots(config: &FindConfig) -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if config.include_home {
        match dirs::home_dir() {
            Some(home) => roots.push(home),
            None => warn!("Cannot resolve home directory; skipping it as a search root"),
        }
    }

    if config.include_mounts {
        roots.extend(mounts::mount_points(
            &config.mount_table,
            &config.ignore_set(),
        ));
    }

    roots.extend(config.extra_roots.iter().cloned());

    debug!("{} search root(s)", roots.len());
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn isolated_config() -> FindConfig {
        FindConfig {
            include_home: false,
            include_mounts: false,
            ..FindConfig::default()
        }
    }

    #[test]
    fn test_no_sources_no_roots() {
        assert!(search_roots(&isolated_config()).is_empty());
    }

    #[test]
    fn test_extra_roots_only() {
        let config = FindConfig {
            extra_roots: vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")],
            ..isolated_config()
        };
        assert_eq!(
            search_roots(&config),
            vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]
        );
    }

    #[test]
    fn test_mount_roots_keep_duplicates() {
        let temp = TempDir::new().unwrap();
        let table = temp.path().join("mounts");
        fs::write(
            &table,
            "/dev/sda1 /data ext4 rw 0 0\n\
             /data /mnt/bind none rw,bind 0 0\n\
             proc /proc proc rw 0 0\n",
        )
        .unwrap();

        let config = FindConfig {
            include_mounts: true,
            mount_table: table,
            extra_roots: vec![PathBuf::from("/data")],
            ..isolated_config()
        };
        assert_eq!(
            search_roots(&config),
            vec![
                PathBuf::from("/data"),
                PathBuf::from("/mnt/bind"),
                PathBuf::from("/data"),
            ]
        );
    }

    #[test]
    fn test_unreadable_mount_table_degrades() {
        let config = FindConfig {
            include_mounts: true,
            mount_table: PathBuf::from("/nonexistent/mounts"),
            extra_roots: vec![PathBuf::from("/srv/a")],
            ..isolated_config()
        };
        assert_eq!(search_roots(&config), vec![PathBuf::from("/srv/a")]);
    }

    #[test]
    fn test_home_is_first_when_included() {
        let config = FindConfig {
            include_home: true,
            extra_roots: vec![PathBuf::from("/srv/a")],
            ..isolated_config()
        };
        let roots = search_roots(&config);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(roots.first(), Some(&home));
            assert_eq!(roots.len(), 2);
        } else {
            assert_eq!(roots, vec![PathBuf::from("/srv/a")]);
        }
    }
}
