//! The PegLeg Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::{fs, process};

use clap::Parser as _;
use miette::Report;
use termcolor::{ColorChoice, StandardStream};

use crate::cli::args::{Command, PeglegArgs};
use crate::combinator::{ParseConfig, Parser};
use crate::errors::CliError;
use crate::state::ParseState;
use crate::{logging, rules};

pub mod args;
pub mod output;

/// Exit status when the rule did not match.
const EXIT_NO_MATCH: i32 = 1;

/// Exit status for usage and I/O failures.
const EXIT_ERROR: i32 = 2;

/// The main entry point for the CLI.
pub fn run() {
    let args = PeglegArgs::parse();
    logging::init_tracing(args.verbose);

    match dispatch(args.command) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_NO_MATCH),
        Err(e) => {
            eprintln!("{:?}", Report::new(e));
            process::exit(EXIT_ERROR);
        }
    }
}

/// Runs one subcommand. `Ok(false)` means the command ran but found no match.
fn dispatch(command: Command) -> Result<bool, CliError> {
    match command {
        Command::Match {
            rule,
            full,
            json,
            file,
            text,
        } => handle_match(&rule, full, json, file, text),
        Command::Rules => {
            let mut stdout = StandardStream::stdout(color_choice());
            output::write_rules(&mut stdout)?;
            Ok(true)
        }
        Command::Digests => {
            let mut stdout = StandardStream::stdout(color_choice());
            output::write_digests(&mut stdout)?;
            Ok(true)
        }
    }
}

/// Colors only when stdout is a terminal.
fn color_choice() -> ColorChoice {
    if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Handles the `match` subcommand.
fn handle_match(
    rule_name: &str,
    full: bool,
    json: bool,
    file: Option<PathBuf>,
    text: Option<String>,
) -> Result<bool, CliError> {
    let input = match file {
        Some(path) => fs::read_to_string(&path).map_err(|source| CliError::ReadInput { path, source })?,
        None => text.unwrap_or_default(),
    };

    let rule = rules::lookup(rule_name).ok_or_else(|| CliError::UnknownRule {
        name: rule_name.to_string(),
        available: rules::available(),
    })?;
    let config = if full {
        ParseConfig::full_match()
    } else {
        ParseConfig::default()
    };
    let parser = Parser::new((rule.build)()?).with_config(config);
    tracing::debug!(rule = rule.name, full, bytes = input.len(), "running rule");

    let found = parser.parse_with_state(&input, &ParseState::empty());
    let report = output::MatchReport::new(rule.name, parser.root().to_string(), &input, found.as_ref());
    if json {
        output::write_json(&mut std::io::stdout().lock(), &report)?;
    } else {
        let mut stdout = StandardStream::stdout(color_choice());
        output::write_match(&mut stdout, &report, &input)?;
    }
    Ok(found.is_some())
}
