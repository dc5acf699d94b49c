//! # Find Command Implementation
//!
//! This module implements the `find` subcommand, which searches the home
//! directory and all mounted filesystems for signature files and prints the
//! resulting groups.
//!
//! ## Functionality
//!
//! - **Discovery**: Walks every search root to `--depth` levels and groups
//!   signed directories by identifier, collapsing aliased paths.
//! - **Filtering**: `--uuid` restricts the output to a single group. If that
//!   group has no reachable members an empty mapping is printed and a hint is
//!   logged.
//! - **Structured Output**: The mapping of identifier to paths is printed as
//!   YAML (default) or JSON, suitable for parsing by another process, for
//!   example a caller running `dirsig find` on a remote host.
//!
//! This command is read-only; signature files are never modified.

use anyhow::Result;
use clap::Args;
use uuid::Uuid;

use dirsig::config::FindConfig;
use dirsig::find::find;
use dirsig::output::{self, OutputFormat};
use dirsig::suggestions;

/// Search for signature files
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Only report the group with this identifier
    #[arg(short, long, value_name = "UUID")]
    pub uuid: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Execute the `find` command.
pub fn execute(args: FindArgs, config: &FindConfig) -> Result<()> {
    // Validate before walking so a typo fails fast
    let wanted = args
        .uuid
        .as_deref()
        .map(|raw| Uuid::parse_str(raw).map_err(|e| suggestions::invalid_uuid(raw, &e)))
        .transpose()?;

    let groups = find(config);

    let groups = match wanted {
        Some(uuid) => {
            let known: Vec<String> = groups.iter().map(|(id, _)| id.to_string()).collect();
            let filtered = groups.only(&uuid);
            if filtered.is_empty() {
                log::warn!(
                    "{}",
                    suggestions::group_not_found(&uuid.to_string(), config.max_depth, &known)
                );
            }
            filtered
        }
        None => groups,
    };

    print!("{}", output::render(&groups, args.format)?);
    Ok(())
}
