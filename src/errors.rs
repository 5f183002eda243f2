//! PegLeg Error Handling
//!
//! Non-matches are ordinary control flow and never show up here. These errors
//! cover grammars that cannot be built (bad bounds, bad regular expressions,
//! repetition that could loop without consuming input) and the CLI's I/O.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// A combinator tree that was rejected while it was being built.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
pub enum GrammarError {
    #[error("character range '{begin}'..='{end}' is empty")]
    #[diagnostic(
        code(pegleg::grammar::empty_char_range),
        help("a character range needs begin <= end")
    )]
    EmptyCharRange { begin: char, end: char },

    #[error("repetition bounds {{{min},{max}}} are inverted")]
    #[diagnostic(
        code(pegleg::grammar::inverted_bounds),
        help("the maximum repetition count must be at least the minimum")
    )]
    InvertedBounds { min: usize, max: usize },

    #[error("invalid regular expression `{pattern}`: {message}")]
    #[diagnostic(code(pegleg::grammar::invalid_regex))]
    InvalidRegex { pattern: String, message: String },

    #[error("unbounded {operator} over an expression that can match empty input")]
    #[diagnostic(
        code(pegleg::grammar::nullable_repetition),
        help("make the repeated expression consume at least one character, or bound the repetition")
    )]
    NullableRepetition { operator: &'static str },
}

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read input file '{}'", path.display())]
    #[diagnostic(code(pegleg::cli::read_input))]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown rule '{name}'")]
    #[diagnostic(code(pegleg::cli::unknown_rule), help("available rules: {available}"))]
    UnknownRule { name: String, available: String },

    #[error("failed to encode match report")]
    #[diagnostic(code(pegleg::cli::encode))]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output")]
    #[diagnostic(code(pegleg::cli::output))]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),
}
