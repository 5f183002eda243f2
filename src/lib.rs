//! PegLeg: a backtracking PEG combinator engine with persistent parse state.
//!
//! Grammars are trees of [`Combinator`]s matched against a zero-copy
//! [`Cursor`]. Stateful grammars thread a [`ParseState`] through the match:
//! an immutable, content-hashed value whose no-op updates return the same
//! instance, so backtracking is free and "did anything change?" is a pointer
//! comparison.

pub use crate::combinator::{Case, Combinator, Match, ParseConfig, Parser, StatefulMatch};
pub use crate::errors::{CliError, GrammarError};
pub use crate::hashing::{Digest, Hasher};
pub use crate::state::{BackrefState, BoolState, HashState, ParseState, SetState};
pub use crate::text::{Cursor, InputRange};

pub mod cli;
pub mod combinator;
pub mod errors;
pub mod hashing;
pub mod logging;
pub mod rules;
pub mod state;
pub mod text;
