//! Configured entry point over a root combinator.

use super::{Combinator, Match, StatefulMatch};
use crate::hashing::Hasher;
use crate::state::ParseState;
use crate::text::Cursor;

/// Settings applied on top of a grammar's own matching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseConfig {
    /// Reject matches that stop before the end of the input.
    pub require_full_match: bool,
}

impl ParseConfig {
    /// A configuration that only accepts matches covering the whole input.
    pub fn full_match() -> Self {
        Self {
            require_full_match: true,
        }
    }
}

/// A root combinator plus the configuration it is run with.
///
/// Each call owns a fresh [`Hasher`], so one `Parser` can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Parser {
    root: Combinator,
    config: ParseConfig,
}

impl Parser {
    pub fn new(root: Combinator) -> Self {
        Self {
            root,
            config: ParseConfig::default(),
        }
    }

    pub fn with_config(self, config: ParseConfig) -> Self {
        Self { config, ..self }
    }

    pub fn config(&self) -> ParseConfig {
        self.config
    }

    pub fn root(&self) -> &Combinator {
        &self.root
    }

    pub fn parse<'a>(&self, text: &'a str) -> Option<Match<'a>> {
        self.parse_with_state(text, &ParseState::empty())
            .map(|found| found.matched)
    }

    pub fn parse_with_state<'a>(
        &self,
        text: &'a str,
        state: &ParseState,
    ) -> Option<StatefulMatch<'a>> {
        let mut hasher = Hasher::new();
        let input = Cursor::new(text);

        match self.root.parse_with_state(input, state, &mut hasher) {
            Some(found) if self.config.require_full_match && found.matched.len() != input.len() => {
                tracing::debug!(
                    consumed = found.matched.len(),
                    total = input.len(),
                    "rejected partial match"
                );
                None
            }
            Some(found) => {
                tracing::trace!(consumed = found.matched.len(), grammar = %self.root, "matched");
                Some(found)
            }
            None => {
                tracing::trace!(grammar = %self.root, "no match");
                None
            }
        }
    }
}
