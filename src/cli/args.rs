//! Defines the command-line arguments and subcommands for the PegLeg CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pegleg",
    version,
    about = "Run backtracking PEG rules with persistent parse state."
)]
pub struct PeglegArgs {
    /// Raise log verbosity (-v for debug, -vv for trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Match a built-in rule against the start of some input.
    Match {
        /// The built-in rule to run (see `pegleg rules`).
        #[arg(short, long, default_value = "identifier")]
        rule: String,
        /// Only accept a match that consumes the whole input.
        #[arg(long)]
        full: bool,
        /// Print the match report as JSON.
        #[arg(long)]
        json: bool,
        /// Read the input from a file instead of the command line.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// The input text.
        #[arg(required_unless_present = "file")]
        text: Option<String>,
    },
    /// List the built-in rules.
    Rules,
    /// Print the digest of each empty state kind.
    Digests,
}
