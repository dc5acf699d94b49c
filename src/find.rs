//! # Group Discovery
//!
//! `find` ties the pipeline together:
//!
//! 1.  **Roots**: home directory, mount targets and configured extras
//!     (`roots::search_roots`).
//! 2.  **Walk**: every directory within `max_depth` of each root
//!     (`walker::TreeWalker`).
//! 3.  **Group**: read the signature in each visited directory and bucket the
//!     directories by identifier (`group::aggregate`).
//! 4.  **De-alias**: collapse paths that are the same physical directory
//!     (`alias::AliasResolver`), one group at a time in parallel.
//!
//! Discovery never modifies signature files and never fails as a whole.
//! Anything that goes wrong along the way (an unreadable mount table, a
//! directory that vanishes mid-walk, a corrupt signature) only removes the
//! affected paths from the result.

use std::path::PathBuf;

use log::{info, warn};

use crate::alias::AliasResolver;
use crate::config::FindConfig;
use crate::group::{self, DirectoryGroups};
use crate::roots;
use crate::walker::TreeWalker;

/// Discovers all signature groups reachable from the configured roots.
pub fn find(config: &FindConfig) -> DirectoryGroups {
    find_in(roots::search_roots(config), config)
}

/// Discovers all signature groups reachable from `roots`.
///
/// Only the walk, signature and alias settings of `config` apply; its root
/// selection settings are ignored.
pub fn find_in(roots: Vec<PathBuf>, config: &FindConfig) -> DirectoryGroups {
    let walker = match TreeWalker::new(config.workers, &config.name_hint, config.max_depth) {
        Ok(walker) => walker,
        Err(e) => {
            warn!("Cannot start directory walk: {}", e);
            return DirectoryGroups::new();
        }
    };

    let root_count = roots.len();
    let groups = group::aggregate(walker.walk(roots), &config.signature_filename);
    let before = groups.member_count();

    let resolver = AliasResolver::new(config.identity_check);
    let groups = groups.par_map_groups(|members| resolver.resolve(members));

    info!(
        "Found {} group(s) with {} member(s) under {} root(s); {} alias(es) collapsed",
        groups.len(),
        groups.member_count(),
        root_count,
        before - groups.member_count()
    );
    groups
}
