//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new();
//!     fixture.sign("tree/project-a", common::IDS[0]);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::dirsig_cmd;
    pub use super::TestFixture;
}

/// Fixed identifiers used across tests.
#[allow(dead_code)]
pub const IDS: [&str; 2] = [
    "11111111-1111-4111-8111-111111111111",
    "22222222-2222-4222-8222-222222222222",
];

/// Get a Command for the dirsig binary
#[allow(dead_code)]
pub fn dirsig_cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("dirsig").unwrap()
}

/// A temporary directory tree plus a config file that confines discovery to
/// it, so tests never walk the real home directory or mount table.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new fixture with an empty tree.
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Root of the fixture.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Create `rel` as a directory and return its path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let child = self.temp.child(rel);
        child.create_dir_all().unwrap();
        child.path().to_path_buf()
    }

    /// Create `rel` holding a `.signature` with `id`.
    pub fn sign(&self, rel: &str, id: &str) -> PathBuf {
        self.sign_as(rel, ".signature", id)
    }

    /// Create `rel` holding signature file `filename` with `id`.
    pub fn sign_as(&self, rel: &str, filename: &str, id: &str) -> PathBuf {
        let dir = self.dir(rel);
        self.temp
            .child(rel)
            .child(filename)
            .write_str(&format!("{}\n", id))
            .unwrap();
        dir
    }

    /// Write a config file rooting discovery at `roots` and return its path.
    pub fn config_for(&self, roots: &[&Path]) -> PathBuf {
        let mut yaml = String::from("include_home: false\ninclude_mounts: false\nextra_roots:\n");
        for root in roots {
            yaml.push_str(&format!("  - {:?}\n", root.display().to_string()));
        }
        let file = self.temp.child("dirsig.yaml");
        file.write_str(&yaml).unwrap();
        file.path().to_path_buf()
    }

    /// Config file rooting discovery at the fixture's `tree` subdirectory.
    pub fn config(&self) -> PathBuf {
        let tree = self.dir("tree");
        self.config_for(&[&tree])
    }
}
