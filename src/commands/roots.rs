//! # Roots Command Implementation
//!
//! Prints the search roots a `find` would walk, one per line, in walk order.
//! Useful for checking which mounts are skipped as virtual filesystems and
//! whether the home directory resolved.

use anyhow::Result;
use clap::Args;

use dirsig::config::FindConfig;
use dirsig::roots::search_roots;

/// List the search roots that would be walked
#[derive(Args, Debug)]
pub struct RootsArgs {
    /// Also report whether each root is currently a readable directory
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the `roots` command.
pub fn execute(args: RootsArgs, config: &FindConfig) -> Result<()> {
    for root in search_roots(config) {
        if args.long {
            let state = match std::fs::read_dir(&root) {
                Ok(_) => "ok",
                Err(_) => "unreadable",
            };
            println!("{:<10} {}", state, root.display());
        } else {
            println!("{}", root.display());
        }
    }
    Ok(())
}
