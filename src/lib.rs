//! # dirsig
//!
//! This library finds groups of directories that belong together, wherever
//! they happen to be mounted. A directory joins a group by holding a small
//! signature file containing the group's random identifier; discovery then
//! walks the home directory and every mounted filesystem looking for those
//! files. It is used by the `dirsig` command-line tool but can be embedded in
//! anything that needs to locate the replicas of a dataset.
//!
//! ## Quick Example
//!
//! ```
//! use dirsig::config::FindConfig;
//! use dirsig::find::find_in;
//! use dirsig::signature::Signature;
//!
//! let a = tempfile::tempdir().unwrap();
//! let b = tempfile::tempdir().unwrap();
//!
//! // Make both directories members of one new group
//! let signature = Signature::new(".signature");
//! signature.write(a.path(), false).unwrap();
//! signature.write(b.path(), false).unwrap();
//!
//! let config = FindConfig::default().with_max_depth(0);
//! let groups = find_in(vec![a.path().into(), b.path().into()], &config);
//!
//! assert_eq!(groups.get(&signature.uuid()).map(|g| g.len()), Some(2));
//! ```
//!
//! ## Core Concepts
//!
//! - **Signatures (`signature`)**: a random UUID persisted in a directory.
//! - **Search roots (`roots`, `mounts`)**: the home directory plus every
//!   non-virtual mount target from the kernel mount table.
//! - **Walking (`walker`)**: a parallel, depth-bounded traversal of each root.
//! - **Grouping (`group`)**: buckets of directories sharing an identifier.
//! - **Aliases (`alias`)**: different paths to the same physical directory,
//!   collapsed so each group lists every location exactly once.
//!
//! ## Execution Flow
//!
//! `find::find` runs roots → walk → read and group → de-alias, and always
//! returns a best-effort result: unreadable parts of the filesystem are
//! skipped, never reported as a failure.

pub mod alias;
pub mod config;
pub mod defaults;
pub mod error;
pub mod find;
pub mod group;
pub mod mounts;
pub mod output;
pub mod roots;
pub mod signature;
pub mod suggestions;
pub mod walker;
