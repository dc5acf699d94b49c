//! # Signature Grouping
//!
//! Turns a stream of visited directories into groups keyed by signature
//! identifier. Directories without a signature file, or whose signature is
//! malformed or unreadable, are dropped. A directory seen several times (for
//! example through overlapping search roots) is recorded once.
//!
//! Members must have UTF-8 paths so that the groups can always be rendered;
//! a directory whose path is not valid UTF-8 is skipped like an unreadable
//! one.
//!
//! Grouping only looks at path strings. Two different paths to the same
//! physical directory both end up in the group here; collapsing those is
//! the job of the `alias` module.

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::path::PathBuf;

use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Error;
use crate::signature::Signature;

/// The member directories of one group.
pub type DirectoryGroup = BTreeSet<PathBuf>;

/// Discovered groups, keyed by signature identifier.
///
/// Iteration and serialization are sorted by identifier and then by path, so
/// two runs over the same filesystem render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectoryGroups {
    groups: BTreeMap<Uuid, DirectoryGroup>,
}

impl DirectoryGroups {
    /// Create an empty set of groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `dir` as a member of group `uuid`.
    ///
    /// Returns `false` if it was already a member.
    pub fn insert(&mut self, uuid: Uuid, dir: PathBuf) -> bool {
        self.groups.entry(uuid).or_default().insert(dir)
    }

    /// Members of group `uuid`, if any were found.
    pub fn get(&self, uuid: &Uuid) -> Option<&DirectoryGroup> {
        self.groups.get(uuid)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups were found.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of member directories across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Iterate over `(identifier, members)` pairs in identifier order.
    pub fn iter(&self) -> btree_map::Iter<'_, Uuid, DirectoryGroup> {
        self.groups.iter()
    }

    /// Keep only group `uuid`.
    pub fn only(mut self, uuid: &Uuid) -> Self {
        self.groups.retain(|id, _| id == uuid);
        self
    }

    /// Apply `f` to every group, in parallel.
    pub fn par_map_groups<F>(self, f: F) -> Self
    where
        F: Fn(DirectoryGroup) -> DirectoryGroup + Sync + Send,
    {
        let groups = self
            .groups
            .into_par_iter()
            .map(|(id, members)| (id, f(members)))
            .collect();
        Self { groups }
    }
}

impl IntoIterator for DirectoryGroups {
    type Item = (Uuid, DirectoryGroup);
    type IntoIter = btree_map::IntoIter<Uuid, DirectoryGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl FromIterator<(Uuid, PathBuf)> for DirectoryGroups {
    fn from_iter<I: IntoIterator<Item = (Uuid, PathBuf)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (uuid, dir) in iter {
            groups.insert(uuid, dir);
        }
        groups
    }
}

/// Reads the signature `filename` in every directory of `dirs` and groups the
/// directories by identifier.
///
/// Signature files are read in parallel as paths arrive. Directories whose
/// path is not valid UTF-8 are left out.
pub fn aggregate<I>(dirs: I, filename: &str) -> DirectoryGroups
where
    I: Iterator<Item = PathBuf> + Send,
{
    let signed: Vec<(Uuid, PathBuf)> = dirs
        .par_bridge()
        .filter(|dir| {
            let printable = dir.to_str().is_some();
            if !printable {
                debug!("Skipping {}: path is not valid UTF-8", dir.display());
            }
            printable
        })
        .filter_map(|dir| match Signature::read(&dir, filename) {
            Ok(signature) => Some((signature.uuid(), dir)),
            Err(Error::SignatureNotFound { .. }) => None,
            Err(e) => {
                debug!("Skipping {}: {}", dir.display(), e);
                None
            }
        })
        .collect();

    signed.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ID_A: &str = "11111111-1111-4111-8111-111111111111";
    const ID_B: &str = "22222222-2222-4222-8222-222222222222";

    fn sign(dir: &std::path::Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(".signature"), content).unwrap();
    }

    #[test]
    fn test_aggregate_buckets_by_identifier() {
        let temp = TempDir::new().unwrap();
        let one = temp.path().join("one");
        let two = temp.path().join("two");
        let three = temp.path().join("three");
        sign(&one, &format!("{}\n", ID_A));
        sign(&two, &format!("{}\n", ID_A));
        sign(&three, &format!("{}\n", ID_B));

        let groups = aggregate(
            vec![one.clone(), two.clone(), three.clone()].into_iter(),
            ".signature",
        );

        assert_eq!(groups.len(), 2);
        let a = Uuid::parse_str(ID_A).unwrap();
        let b = Uuid::parse_str(ID_B).unwrap();
        assert_eq!(groups.get(&a), Some(&BTreeSet::from([one, two])));
        assert_eq!(groups.get(&b), Some(&BTreeSet::from([three])));
    }

    #[test]
    fn test_aggregate_drops_unsigned_and_malformed() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good");
        let bad = temp.path().join("bad");
        let plain = temp.path().join("plain");
        sign(&good, &format!("{}\n", ID_A));
        sign(&bad, "garbage\n");
        fs::create_dir_all(&plain).unwrap();

        let groups = aggregate(
            vec![good.clone(), bad, plain, temp.path().join("missing")].into_iter(),
            ".signature",
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.member_count(), 1);
        assert!(groups.iter().all(|(_, members)| members.contains(&good)));
    }

    #[cfg(unix)]
    #[test]
    fn test_aggregate_skips_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good");
        let bad = temp.path().join(OsStr::from_bytes(b"bad\xff"));
        let other = temp.path().join("other");
        sign(&good, &format!("{}\n", ID_B));
        sign(&bad, &format!("{}\n", ID_B));
        sign(&other, &format!("{}\n", ID_A));

        let groups = aggregate(
            vec![good.clone(), bad, other.clone()].into_iter(),
            ".signature",
        );

        let a = Uuid::parse_str(ID_A).unwrap();
        let b = Uuid::parse_str(ID_B).unwrap();
        assert_eq!(groups.get(&a), Some(&BTreeSet::from([other])));
        assert_eq!(groups.get(&b), Some(&BTreeSet::from([good])));
        assert!(crate::output::render(&groups, crate::output::OutputFormat::Yaml).is_ok());
        assert!(crate::output::render(&groups, crate::output::OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_aggregate_deduplicates_repeated_paths() {
        let temp = TempDir::new().unwrap();
        let one = temp.path().join("one");
        sign(&one, &format!("{}\n", ID_A));

        let groups = aggregate(vec![one.clone(), one.clone(), one].into_iter(), ".signature");
        assert_eq!(groups.member_count(), 1);
    }

    #[test]
    fn test_aggregate_respects_filename() {
        let temp = TempDir::new().unwrap();
        let one = temp.path().join("one");
        sign(&one, &format!("{}\n", ID_A));

        let groups = aggregate(vec![one].into_iter(), ".other");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_only_filters_groups() {
        let a = Uuid::parse_str(ID_A).unwrap();
        let b = Uuid::parse_str(ID_B).unwrap();
        let groups: DirectoryGroups = vec![
            (a, PathBuf::from("/x")),
            (b, PathBuf::from("/y")),
        ]
        .into_iter()
        .collect();

        let filtered = groups.clone().only(&a);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.get(&a).is_some());

        let unknown = Uuid::new_v4();
        assert!(groups.only(&unknown).is_empty());
    }

    #[test]
    fn test_par_map_groups() {
        let a = Uuid::parse_str(ID_A).unwrap();
        let groups: DirectoryGroups = vec![(a, PathBuf::from("/x")), (a, PathBuf::from("/y"))]
            .into_iter()
            .collect();

        let trimmed = groups.par_map_groups(|members| members.into_iter().take(1).collect());
        assert_eq!(trimmed.member_count(), 1);
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let a = Uuid::parse_str(ID_A).unwrap();
        let groups: DirectoryGroups = vec![(a, PathBuf::from("/home/u/project-a"))]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&groups).unwrap();
        assert_eq!(json, format!(r#"{{"{}":["/home/u/project-a"]}}"#, ID_A));
    }
}
