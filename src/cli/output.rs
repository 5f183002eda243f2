//! Handles all user-facing output for the CLI.
//!
//! Match reports, rule listings and digest tables are rendered here, either as
//! colored text through `termcolor` or as JSON. Writers are passed in so the
//! same code serves stdout and in-memory buffers.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::combinator::StatefulMatch;
use crate::hashing::Digest;
use crate::rules::BUILTIN_RULES;
use crate::state::{BackrefState, BoolState, HashState, ParseState, SetState};
use crate::text::InputRange;

// ============================================================================
// MATCH REPORT
// ============================================================================

/// Everything the CLI knows about one match attempt.
#[derive(Debug, Serialize)]
pub struct MatchReport<'a> {
    pub rule: &'a str,
    pub grammar: String,
    pub matched: bool,
    pub consumed: usize,
    pub input_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<InputRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateReport>,
}

/// A readable snapshot of the parse state after a match.
#[derive(Debug, Serialize)]
pub struct StateReport {
    pub digest: Digest,
    pub captures: Vec<CaptureReport>,
    pub sets: BTreeMap<i32, Vec<String>>,
    pub flags: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct CaptureReport {
    pub id: i32,
    pub range: InputRange,
    pub text: String,
}

impl<'a> MatchReport<'a> {
    pub fn new(
        rule: &'a str,
        grammar: String,
        input: &'a str,
        found: Option<&StatefulMatch<'a>>,
    ) -> Self {
        Self {
            rule,
            grammar,
            matched: found.is_some(),
            consumed: found.map_or(0, |f| f.matched.len()),
            input_len: input.len(),
            text: found.map(|f| f.matched.as_str()),
            range: found.map(|f| f.matched.range()),
            state: found
                .filter(|f| !f.state.is_empty())
                .map(|f| StateReport::new(&f.state, input)),
        }
    }
}

impl StateReport {
    fn new(state: &ParseState, input: &str) -> Self {
        let captures = state
            .backrefs()
            .iter()
            .map(|(id, range)| CaptureReport {
                id,
                range,
                text: input.get(range.start()..range.end()).unwrap_or_default().to_string(),
            })
            .collect();
        let sets = state
            .sets()
            .iter()
            .map(|(id, set)| (id, set.iter().map(str::to_string).collect()))
            .collect();
        Self {
            digest: state.digest(),
            captures,
            sets,
            flags: state.bools().iter().collect(),
        }
    }
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Writes a match report with the consumed prefix highlighted.
pub fn write_match(out: &mut impl WriteColor, report: &MatchReport<'_>, input: &str) -> io::Result<()> {
    write_heading(out, report.rule)?;
    writeln!(out, " {}", report.grammar)?;

    let Some(text) = report.text else {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(out, "no match")?;
        return out.reset();
    };

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "{text}")?;
    out.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(out, "{}", &input[report.consumed..])?;
    out.reset()?;
    writeln!(out, "consumed {} of {} bytes", report.consumed, report.input_len)?;

    if let Some(state) = &report.state {
        writeln!(out, "state {}", state.digest)?;
        for capture in &state.captures {
            writeln!(out, "  capture {} = {} {:?}", capture.id, capture.range, capture.text)?;
        }
        for (id, members) in &state.sets {
            writeln!(out, "  set {id} = {{{}}}", members.join(", "))?;
        }
        for flag in &state.flags {
            writeln!(out, "  flag {flag}")?;
        }
    }
    Ok(())
}

/// Writes a match report as a single line of JSON.
pub fn write_json(out: &mut impl Write, report: &MatchReport<'_>) -> Result<(), crate::errors::CliError> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Lists the built-in rules with their grammar.
pub fn write_rules(out: &mut impl WriteColor) -> io::Result<()> {
    for rule in BUILTIN_RULES {
        write_heading(out, rule.name)?;
        writeln!(out, " {}", rule.description)?;
        match (rule.build)() {
            Ok(grammar) => writeln!(out, "    {grammar}")?,
            Err(e) => writeln!(out, "    <invalid: {e}>")?,
        }
    }
    Ok(())
}

/// Writes the digest of the empty instance of each state kind.
pub fn write_digests(out: &mut impl WriteColor) -> io::Result<()> {
    let kinds: [(&str, Digest); 4] = [
        ("backrefs", BackrefState::empty().digest()),
        ("sets", SetState::empty().digest()),
        ("bools", BoolState::empty().digest()),
        ("state", ParseState::empty().digest()),
    ];
    for (name, digest) in kinds {
        write_heading(out, name)?;
        writeln!(out, " {digest}")?;
    }
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_heading(out: &mut impl WriteColor, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(out, "{text}:")?;
    out.reset()
}
