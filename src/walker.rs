//! # Depth-Bounded Parallel Tree Walker
//!
//! `TreeWalker` visits every directory within `max_depth` path segments of a
//! set of search roots and streams the visited paths to the caller.
//!
//! ## Scheduling
//!
//! - Roots are walked one after another. The next root is not started until
//!   every directory under the current one has been visited.
//! - Within a root, each subdirectory becomes its own task in a `rayon`
//!   scope. The scope runs on a dedicated pool whose size caps the number of
//!   directories being read at once, no matter how wide the tree is.
//! - Visited paths flow through a bounded channel to the consumer, so a slow
//!   consumer throttles the walk and dropping the `Walk` iterator stops it.
//!
//! ## Failure handling
//!
//! A directory that cannot be listed (permission denied, removed mid-walk,
//! not a directory) ends that branch silently. Nothing is reported to the
//! caller beyond a debug log line.
//!
//! Symbolic links are never descended into; entries are classified with the
//! file type returned by the directory listing itself.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, trace};
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// Capacity of the channel between walker tasks and the consumer.
const CHANNEL_CAPACITY: usize = 1024;

/// Walks search roots to a bounded depth on a fixed-size thread pool.
pub struct TreeWalker {
    pool: Arc<ThreadPool>,
    name_hint: Option<String>,
    max_depth: usize,
}

impl TreeWalker {
    /// Create a walker with `workers` threads.
    ///
    /// An empty `name_hint` means every subdirectory is descended into.
    pub fn new(workers: usize, name_hint: &str, max_depth: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("dirsig-walk-{}", i))
            .build()?;

        Ok(Self {
            pool: Arc::new(pool),
            name_hint: (!name_hint.is_empty()).then(|| name_hint.to_string()),
            max_depth,
        })
    }

    /// Maximum depth below each root.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Start walking `roots` and return the stream of visited paths.
    ///
    /// Every root is yielded, even one that does not exist. Output order is
    /// unspecified and the same physical directory may be yielded more than
    /// once when roots overlap.
    pub fn walk(&self, roots: Vec<PathBuf>) -> Walk {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        let pool = Arc::clone(&self.pool);
        let name_hint = self.name_hint.clone();
        let max_depth = self.max_depth;

        let driver = thread::spawn(move || {
            let hint = name_hint.as_deref();
            for root in roots {
                debug!("Walking {} (depth {})", root.display(), max_depth);
                pool.scope(|scope| visit(scope, root, max_depth, hint, &tx));
            }
        });

        Walk {
            receiver: Some(rx),
            driver: Some(driver),
        }
    }
}

/// Emit `dir`, then fan out into its subdirectories if depth remains.
fn visit<'s>(
    scope: &Scope<'s>,
    dir: PathBuf,
    depth: usize,
    hint: Option<&'s str>,
    tx: &'s Sender<PathBuf>,
) {
    if tx.send(dir.clone()).is_err() {
        trace!("Walk consumer dropped; abandoning {}", dir.display());
        return;
    }
    if depth == 0 {
        return;
    }
    for child in subdirectories(&dir, hint) {
        scope.spawn(move |scope| visit(scope, child, depth - 1, hint, tx));
    }
}

/// Immediate subdirectories of `dir`, filtered by `hint`.
///
/// Returns an empty list on any listing error.
fn subdirectories(dir: &Path, hint: Option<&str>) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|entry| hint.is_none_or(|h| entry.file_name() == h))
        .map(|entry| entry.path())
        .collect()
}

/// Lazy stream of visited directories returned by [`TreeWalker::walk`].
///
/// Dropping a `Walk` before it is exhausted stops the walk and waits for
/// in-flight tasks to finish.
pub struct Walk {
    receiver: Option<Receiver<PathBuf>>,
    driver: Option<JoinHandle<()>>,
}

impl Iterator for Walk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl Drop for Walk {
    fn drop(&mut self) {
        // Disconnect first so blocked senders fail fast.
        drop(self.receiver.take());
        if let Some(driver) = self.driver.take() {
            if driver.join().is_err() {
                debug!("Walk driver thread panicked");
            }
        }
    }
}
