//! The dispatch routine that interprets a combinator tree.
//!
//! Every node maps `(cursor, state)` to either no match or a consumed prefix
//! length plus the state after matching. Nothing is mutated in place: a failed
//! branch simply drops what it derived, and siblings start again from the
//! cursor and state they were handed.

use super::node::{Case, Combinator, Node};
use crate::hashing::Hasher;
use crate::state::{HashState, ParseState};
use crate::text::Cursor;

/// The outcome of a successful match step.
#[derive(Debug, Clone)]
pub(crate) struct Step {
    pub len: usize,
    pub state: ParseState,
}

impl Step {
    fn empty(state: &ParseState) -> Self {
        Self::consumed(0, state)
    }

    fn consumed(len: usize, state: &ParseState) -> Self {
        Self {
            len,
            state: state.clone(),
        }
    }
}

pub(crate) fn eval(
    combinator: &Combinator,
    input: Cursor<'_>,
    state: &ParseState,
    hasher: &mut Hasher,
) -> Option<Step> {
    match combinator.node() {
        Node::CharRange { begin, end } => {
            let c = input.first_char()?;
            (*begin..=*end)
                .contains(&c)
                .then(|| Step::consumed(c.len_utf8(), state))
        }
        Node::Literal { text, case } => {
            match_literal(input.as_str(), text, *case).map(|len| Step::consumed(len, state))
        }
        Node::Regex { regex, .. } => regex
            .find(input.as_str())
            .map(|found| Step::consumed(found.end(), state)),
        Node::AnyChar => input
            .first_char()
            .map(|c| Step::consumed(c.len_utf8(), state)),

        Node::Sequence(children) => {
            let mut offset = 0;
            let mut current = state.clone();
            for child in children {
                let step = eval(child, input.slice_from(offset), &current, hasher)?;
                offset += step.len;
                current = step.state;
            }
            Some(Step {
                len: offset,
                state: current,
            })
        }
        Node::Choice(options) => options
            .iter()
            .find_map(|option| eval(option, input, state, hasher)),
        Node::Optional(child) => {
            Some(eval(child, input, state, hasher).unwrap_or_else(|| Step::empty(state)))
        }
        Node::Star(child) => repeat(child, None, 0, None, input, state, hasher),
        Node::Quantify {
            child,
            min,
            max,
            delimiter,
        } => repeat(child, delimiter.as_ref(), *min, *max, input, state, hasher),

        // A lookahead never commits state, whether it matched or not.
        Node::PositiveLookahead(child) => {
            eval(child, input, state, hasher).map(|_| Step::empty(state))
        }
        Node::NegativeLookahead(child) => match eval(child, input, state, hasher) {
            Some(_) => None,
            None => Some(Step::empty(state)),
        },

        Node::Capture { id, child } => {
            let step = eval(child, input, state, hasher)?;
            let range = input.prefix(step.len).range();
            let state = step.state.backref_add(hasher, *id, range);
            Some(Step {
                len: step.len,
                state,
            })
        }
        Node::Backref { id, case } => {
            let range = state.backref_try_get(*id)?;
            // Captures recorded against a different text cannot match here.
            let captured = input.origin().get(range.start()..range.end())?;
            match_literal(input.as_str(), captured, *case).map(|len| Step::consumed(len, state))
        }
        Node::SetInsert { id, child } => {
            let step = eval(child, input, state, hasher)?;
            let text = input.prefix(step.len).as_str();
            let state = step.state.set_add(hasher, *id, text);
            Some(Step {
                len: step.len,
                state,
            })
        }
        Node::SetTest { id, child, present } => {
            let step = eval(child, input, state, hasher)?;
            let text = input.prefix(step.len).as_str();
            (step.state.set_contains(*id, text) == *present).then_some(step)
        }
        Node::FlagSet { id } => Some(Step {
            len: 0,
            state: state.bool_add(hasher, *id),
        }),
        Node::FlagTest { id, present } => {
            (state.bool_contains(*id) == *present).then(|| Step::empty(state))
        }
    }
}

/// Shared loop behind star and bounded quantify.
///
/// The counter advances once per successful child match. A delimiter that is
/// not followed by a successful child is rolled back along with any state it
/// derived. An iteration that consumes nothing and leaves the state untouched
/// would repeat identically, so it ends the loop and satisfies any remaining
/// minimum.
fn repeat(
    child: &Combinator,
    delimiter: Option<&Combinator>,
    min: usize,
    max: Option<usize>,
    input: Cursor<'_>,
    state: &ParseState,
    hasher: &mut Hasher,
) -> Option<Step> {
    let mut offset = 0;
    let mut count = 0;
    let mut current = state.clone();

    while max.map_or(true, |max| count < max) {
        let mut next_offset = offset;
        let mut next_state = current.clone();
        if let Some(delimiter) = delimiter.filter(|_| count > 0) {
            let Some(step) = eval(delimiter, input.slice_from(offset), &current, hasher) else {
                break;
            };
            next_offset += step.len;
            next_state = step.state;
        }

        let Some(step) = eval(child, input.slice_from(next_offset), &next_state, hasher) else {
            break;
        };
        let stalled = next_offset + step.len == offset && step.state.ptr_eq(&current);
        offset = next_offset + step.len;
        current = step.state;
        count += 1;
        if stalled {
            tracing::trace!(count, "repetition made no progress");
            count = count.max(min);
            break;
        }
    }

    if count < min {
        tracing::trace!(count, min, "repetition fell short of its minimum");
        return None;
    }
    Some(Step {
        len: offset,
        state: current,
    })
}

/// Length of the prefix of `haystack` that matches `needle`, if any.
fn match_literal(haystack: &str, needle: &str, case: Case) -> Option<usize> {
    match case {
        Case::Sensitive => haystack.starts_with(needle).then_some(needle.len()),
        Case::Insensitive => {
            let mut chars = haystack.char_indices();
            let mut consumed = 0;
            for expected in needle.chars() {
                let (index, actual) = chars.next()?;
                if !chars_eq_ignore_case(expected, actual) {
                    return None;
                }
                consumed = index + actual.len_utf8();
            }
            Some(consumed)
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
