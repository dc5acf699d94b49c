//! # New Command Implementation
//!
//! This module implements the `new` subcommand, which starts a new directory
//! group by writing a freshly generated signature into a directory.
//!
//! ## Functionality
//!
//! - **Signature Creation**: Generates a random identifier and stores it in
//!   the configured signature file (`--sig-file`, default `.signature`).
//! - **Overwrite Protection**: An existing signature is never replaced unless
//!   `--force` is given; without it the command fails and the existing file is
//!   left exactly as it was.
//! - **Scriptable Output**: The new identifier is printed alone on stdout;
//!   progress messages go to stderr.
//!
//! To add another directory to an existing group, copy the signature file
//! into it.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use dirsig::config::FindConfig;
use dirsig::error::Error;
use dirsig::output::{emoji, OutputConfig};
use dirsig::signature::Signature;
use dirsig::suggestions;

/// Create a new signature file in a directory
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Directory in which to create the signature file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Overwrite an existing signature file
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the `new` command.
pub fn execute(args: NewArgs, config: &FindConfig, output: &OutputConfig) -> Result<()> {
    if !args.path.is_dir() {
        return Err(suggestions::not_a_directory(&args.path));
    }

    let signature = Signature::new(config.signature_filename.as_str());
    eprintln!(
        "{} Placing new signature in {}",
        emoji(output, "🔏", "[NEW]"),
        signature.path_in(&args.path).display()
    );

    match signature.write(&args.path, args.force) {
        Ok(path) => {
            log::info!("Wrote signature {} to {}", signature, path.display());
            println!("{}", signature);
            Ok(())
        }
        Err(Error::AlreadyExists { path }) => Err(suggestions::signature_exists(&path)),
        Err(e) => Err(suggestions::signature_write_failed(&args.path, &e)),
    }
}
