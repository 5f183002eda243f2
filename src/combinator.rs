//! # Combinator Engine
//!
//! Backtracking PEG matchers built by composition over a zero-copy [`Cursor`].
//!
//! ## Vocabulary
//!
//! - **Primitives**: [`char_range`], [`literal`], [`regex`], [`any_char`]
//! - **Composition**: [`sequence`], [`choice`], [`optional`], [`star`], [`plus`],
//!   [`quantify`], [`positive_lookahead`], [`negative_lookahead`]
//! - **State-aware predicates**: [`capture`], [`backref`], [`set_insert`],
//!   [`set_contains`], [`set_excludes`], [`flag_set`], [`flag_test`], [`flag_absent`]
//!
//! ## Matching
//!
//! A match either fails (`None`) or consumes a prefix of the cursor it was
//! given. Failure carries no position or message; it is the normal outcome of
//! trying an alternative. Stateful grammars thread a [`ParseState`] through the
//! match and get back the state after matching. A match that changed nothing
//! returns the very instance passed in, so [`HashState::has_changed`] tells
//! callers whether anything happened.
//!
//! [`HashState::has_changed`]: crate::state::HashState::has_changed

use crate::hashing::Hasher;
use crate::state::ParseState;
use crate::text::{Cursor, InputRange};

mod build;
mod eval;
mod node;
pub mod parser;

pub use build::{
    any_char, backref, capture, char_range, choice, flag_absent, flag_set, flag_test, literal,
    negative_lookahead, optional, plus, positive_lookahead, quantify, regex, sequence,
    set_contains, set_excludes, set_insert, star,
};
pub use node::{Case, Combinator};
pub use parser::{ParseConfig, Parser};

/// The prefix of a cursor consumed by a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    window: Cursor<'a>,
}

impl<'a> Match<'a> {
    pub(crate) fn new(input: Cursor<'a>, len: usize) -> Self {
        Self {
            window: input.prefix(len),
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn as_str(&self) -> &'a str {
        self.window.as_str()
    }

    /// Absolute range of the match within the origin text.
    pub fn range(&self) -> InputRange {
        self.window.range()
    }

    pub fn window(&self) -> Cursor<'a> {
        self.window
    }
}

/// A successful match together with the parse state after matching.
#[derive(Debug, Clone)]
pub struct StatefulMatch<'a> {
    pub matched: Match<'a>,
    pub state: ParseState,
}

impl Combinator {
    /// Matches against `input` with empty side state, discarding any state
    /// the grammar derives.
    pub fn parse<'a>(&self, input: Cursor<'a>) -> Option<Match<'a>> {
        let mut hasher = Hasher::new();
        self.parse_with_state(input, &ParseState::empty(), &mut hasher)
            .map(|found| found.matched)
    }

    /// Matches against `input`, threading `state` through stateful predicates.
    pub fn parse_with_state<'a>(
        &self,
        input: Cursor<'a>,
        state: &ParseState,
        hasher: &mut Hasher,
    ) -> Option<StatefulMatch<'a>> {
        let step = eval::eval(self, input, state, hasher)?;
        Some(StatefulMatch {
            matched: Match::new(input, step.len),
            state: step.state,
        })
    }
}
