//! # Directory Signatures
//!
//! A signature is a random version-4 UUID stored in a small file inside a
//! directory. Every directory holding the same UUID belongs to the same
//! group. The file contains exactly the hyphenated, lowercase UUID followed
//! by a newline, and nothing else.
//!
//! Only the UUID identifies a signature. The filename it was read from or
//! written to is configuration and takes no part in equality or hashing.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Error, Result};

/// A group identifier together with the filename it is stored under.
#[derive(Debug, Clone)]
pub struct Signature {
    uuid: Uuid,
    filename: String,
}

impl Signature {
    /// Creates a new, random signature.
    pub fn new(filename: impl Into<String>) -> Self {
        Self::from_uuid(Uuid::new_v4(), filename)
    }

    /// Wraps an existing identifier.
    pub fn from_uuid(uuid: Uuid, filename: impl Into<String>) -> Self {
        Self {
            uuid,
            filename: filename.into(),
        }
    }

    /// The group identifier.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The signature filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Location of the signature file inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.filename)
    }

    /// Reads the signature file `filename` from `dir`.
    ///
    /// Trailing line endings are trimmed before parsing. The remaining text
    /// must be the hyphenated lowercase form that `write` produces. A missing
    /// file is reported as `SignatureNotFound`, anything else that is not a
    /// canonical identifier as `SignatureMalformed`.
    pub fn read(dir: &Path, filename: &str) -> Result<Self> {
        let path = dir.join(filename);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::SignatureNotFound { path });
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(Error::SignatureMalformed {
                    path,
                    message: "not valid UTF-8".to_string(),
                });
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let text = content.trim_end_matches(['\r', '\n']);
        let uuid = Uuid::parse_str(text).map_err(|e| Error::SignatureMalformed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        if uuid.hyphenated().to_string() != text {
            return Err(Error::SignatureMalformed {
                path,
                message: format!("'{}' is not a canonical identifier", text),
            });
        }

        Ok(Self::from_uuid(uuid, filename))
    }

    /// Writes this signature into `dir` and returns the file's path.
    ///
    /// Without `force` the file is created exclusively: if one already exists
    /// the call fails with `AlreadyExists` and the existing content is left
    /// untouched.
    pub fn write(&self, dir: &Path, force: bool) -> Result<PathBuf> {
        let path = self.path_in(dir);
        let mut options = OpenOptions::new();
        options.write(true);
        if force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::AlreadyExists { path: path.clone() },
            _ => Error::Io(e),
        })?;
        writeln!(file, "{}", self)?;
        file.sync_all()?;

        Ok(path)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid.hyphenated())
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}
