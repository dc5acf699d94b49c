//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;
use dirsig::config::{self, FindConfig};
use dirsig::output::OutputConfig;

/// dirsig - Find groups of signed directories across mounts and the home tree
#[derive(Parser, Debug)]
#[command(name = "dirsig")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    search: SearchArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

/// Options shared by every command that reads or writes signatures.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Signature filename to look for [default: .signature]
    #[arg(short, long = "sig-file", global = true, value_name = "NAME", env = "DIRSIG_SIG_FILE")]
    pub sig_file: Option<String>,

    /// Maximum search depth below each root [default: 1]
    #[arg(short, long, global = true, value_name = "N")]
    pub depth: Option<usize>,

    /// Only descend into directories with exactly this name
    #[arg(long, global = true, value_name = "NAME")]
    pub name_hint: Option<String>,

    /// Number of directory walker threads
    #[arg(long, global = true, value_name = "N")]
    pub workers: Option<usize>,

    /// YAML configuration file; can also be set with DIRSIG_CONFIG
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SearchArgs {
    /// Layer these flags over the config file (or defaults).
    pub fn resolve(&self) -> Result<FindConfig> {
        let mut config = config::load(self.config.as_deref())?;
        if let Some(sig_file) = &self.sig_file {
            config.signature_filename = sig_file.clone();
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(hint) = &self.name_hint {
            config.name_hint = hint.clone();
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new signature, starting a new directory group
    New(commands::new::NewArgs),

    /// Search for signature files and print the groups found
    Find(commands::find::FindArgs),

    /// List the search roots that would be walked
    Roots(commands::roots::RootsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::New(args) => commands::new::execute(args, &self.search.resolve()?, &output),
            Commands::Find(args) => commands::find::execute(args, &self.search.resolve()?),
            Commands::Roots(args) => commands::roots::execute(args, &self.search.resolve()?),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initialize `env_logger`, letting `RUST_LOG` override `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
