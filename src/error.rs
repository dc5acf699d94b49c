//! # Error Handling
//!
//! This module defines the centralized error type for the `dirsig` library.
//! It uses `thiserror` to build an `Error` enum covering every failure the
//! library can report, with messages that name the directory or file involved.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all library errors.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Only a few of these ever reach a user. Discovery (`find`) swallows
//! per-directory failures and simply leaves the affected paths out of its
//! result; the variants below matter mostly to signature creation, config
//! loading and output rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for dirsig operations
#[derive(Error, Debug)]
pub enum Error {
    /// No signature file exists at the given location.
    #[error("Signature not found: {}", path.display())]
    SignatureNotFound { path: PathBuf },

    /// The signature file exists but does not contain a valid identifier.
    #[error("Malformed signature in {}: {message}", path.display())]
    SignatureMalformed { path: PathBuf, message: String },

    /// A signature file is already present and overwriting was not requested.
    #[error("Signature already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// An error occurred while loading a configuration file.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The walker thread pool could not be constructed.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
