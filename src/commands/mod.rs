//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `dirsig`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` (and, where needed,
//!   the resolved `FindConfig`) and calls into the `dirsig` library.

pub mod completions;
pub mod find;
pub mod new;
pub mod roots;
