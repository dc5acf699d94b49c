//! # Mount Table Enumeration
//!
//! Reads the kernel mount table (`/proc/mounts` format) and turns it into
//! search roots. Each line has the form:
//!
//! ```text
//! <device> <mount path> <fs type> <options> <dump> <pass>
//! ```
//!
//! The kernel escapes whitespace and backslashes in the device and path
//! fields as three-digit octal sequences (`\040` for a space); these are
//! decoded before the paths are used. Entries whose filesystem type is in the
//! ignore set (see `defaults::IGNORED_FILESYSTEMS`) are dropped.
//!
//! An unreadable mount table is not an error: discovery simply proceeds with
//! fewer roots.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, warn};
use regex::{Captures, Regex};

/// One parsed line of the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRecord {
    /// Mounted device or source (e.g. `/dev/sda1`, `server:/export`)
    pub device: String,
    /// Mount target
    pub path: PathBuf,
    /// Filesystem type (e.g. `ext4`, `nfs4`)
    pub fs_type: String,
    /// Everything after the type field, verbatim
    pub options: String,
}

impl MountRecord {
    /// Parses a single mount table line.
    ///
    /// Returns `None` for lines with fewer than three fields.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.splitn(4, ' ');
        let device = fields.next().filter(|f| !f.is_empty())?;
        let path = fields.next().filter(|f| !f.is_empty())?;
        let fs_type = fields.next().filter(|f| !f.is_empty())?;
        let options = fields.next().unwrap_or_default();

        Some(Self {
            device: unescape(device).into_owned(),
            path: PathBuf::from(unescape(path).into_owned()),
            fs_type: fs_type.to_string(),
            options: options.to_string(),
        })
    }

    /// Whether this record's filesystem type is in `ignored`.
    pub fn is_ignored(&self, ignored: &BTreeSet<String>) -> bool {
        ignored.contains(&self.fs_type)
    }
}

/// Decodes the kernel's `\NNN` octal escapes.
///
/// Sequences that are not exactly a backslash followed by three octal digits
/// are left as they are.
pub fn unescape(field: &str) -> Cow<'_, str> {
    static OCTAL: OnceLock<Regex> = OnceLock::new();
    let re = OCTAL.get_or_init(|| Regex::new(r"\\([0-3][0-7]{2})").expect("valid regex"));

    re.replace_all(field, |caps: &Captures| {
        u8::from_str_radix(&caps[1], 8)
            .ok()
            .filter(u8::is_ascii)
            .map(|b| char::from(b).to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
}

/// Parses mount table text into records, skipping malformed lines.
pub fn parse_table(content: &str) -> Vec<MountRecord> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = MountRecord::parse(line);
            if record.is_none() {
                debug!("Skipping malformed mount table line: {:?}", line);
            }
            record
        })
        .collect()
}

/// Reads and parses the mount table at `table`.
///
/// Returns an empty list if the table cannot be read.
pub fn read_table(table: &Path) -> Vec<MountRecord> {
    match std::fs::read_to_string(table) {
        Ok(content) => parse_table(&content),
        Err(e) => {
            warn!("Cannot read mount table {}: {}", table.display(), e);
            Vec::new()
        }
    }
}

/// Mount targets from `table` whose filesystem type is not in `ignored`.
///
/// The result is a plain `Vec`, so callers may iterate it as often as they
/// like.
pub fn mount_points(table: &Path, ignored: &BTreeSet<String>) -> Vec<PathBuf> {
    read_table(table)
        .into_iter()
        .filter(|record| {
            let skip = record.is_ignored(ignored);
            if skip {
                debug!(
                    "Ignoring {} mount at {}",
                    record.fs_type,
                    record.path.display()
                );
            }
            !skip
        })
        .map(|record| record.path)
        .collect()
}
