//! Constructors for every combinator kind.
//!
//! Builders that can reject their input return [`GrammarError`]; the rest are
//! infallible. Each builder decides the new node's nullability from its
//! children, which is what lets repetition refuse children that could loop
//! forever without consuming input.

use regex::RegexBuilder;

use super::node::{Case, Combinator, Node};
use crate::errors::GrammarError;

// ============================================================================
// PRIMITIVE MATCHERS
// ============================================================================

/// Matches one character in `begin..=end`.
pub fn char_range(begin: char, end: char) -> Result<Combinator, GrammarError> {
    if begin > end {
        return Err(GrammarError::EmptyCharRange { begin, end });
    }
    Ok(Combinator::new(Node::CharRange { begin, end }, false))
}

/// Matches exactly `text`.
pub fn literal(text: &str, case: Case) -> Combinator {
    Combinator::new(
        Node::Literal {
            text: text.into(),
            case,
        },
        text.is_empty(),
    )
}

/// Matches a regular expression anchored at the cursor.
pub fn regex(pattern: &str, case: Case) -> Result<Combinator, GrammarError> {
    let anchored = format!("^(?:{pattern})");
    let insensitive = case == Case::Insensitive;
    let invalid = |message: String| GrammarError::InvalidRegex {
        pattern: pattern.to_string(),
        message,
    };

    let compiled = RegexBuilder::new(&anchored)
        .case_insensitive(insensitive)
        .build()
        .map_err(|e| invalid(e.to_string()))?;
    let hir = regex_syntax::ParserBuilder::new()
        .case_insensitive(insensitive)
        .build()
        .parse(&anchored)
        .map_err(|e| invalid(e.to_string()))?;
    let nullable = hir.properties().minimum_len() == Some(0);
    tracing::debug!(pattern, nullable, "compiled regex matcher");

    Ok(Combinator::new(
        Node::Regex {
            pattern: pattern.into(),
            regex: compiled,
            case,
        },
        nullable,
    ))
}

/// Matches any single character.
pub fn any_char() -> Combinator {
    Combinator::new(Node::AnyChar, false)
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Matches every child in order. An empty sequence matches the empty string.
pub fn sequence(children: impl IntoIterator<Item = Combinator>) -> Combinator {
    let children: Vec<_> = children.into_iter().collect();
    let nullable = children.iter().all(Combinator::is_nullable);
    Combinator::new(Node::Sequence(children), nullable)
}

/// Ordered choice: the first child that matches wins. An empty choice never matches.
pub fn choice(options: impl IntoIterator<Item = Combinator>) -> Combinator {
    let options: Vec<_> = options.into_iter().collect();
    let nullable = options.iter().any(Combinator::is_nullable);
    Combinator::new(Node::Choice(options), nullable)
}

pub fn optional(child: Combinator) -> Combinator {
    Combinator::new(Node::Optional(child), true)
}

/// Zero or more repetitions.
pub fn star(child: Combinator) -> Result<Combinator, GrammarError> {
    if child.is_nullable() {
        tracing::debug!(%child, "rejected star over nullable child");
        return Err(GrammarError::NullableRepetition { operator: "star" });
    }
    Ok(Combinator::new(Node::Star(child), true))
}

/// One or more repetitions: `child child*`.
pub fn plus(child: Combinator) -> Result<Combinator, GrammarError> {
    if child.is_nullable() {
        tracing::debug!(%child, "rejected plus over nullable child");
        return Err(GrammarError::NullableRepetition { operator: "plus" });
    }
    let rest = star(child.clone())?;
    Ok(sequence([child, rest]))
}

/// Between `min` and `max` repetitions (`None` is unbounded), with an optional
/// `delimiter` matched between consecutive repetitions.
///
/// A delimiter that is not followed by a repetition is left unconsumed.
pub fn quantify(
    child: Combinator,
    min: usize,
    max: Option<usize>,
    delimiter: Option<Combinator>,
) -> Result<Combinator, GrammarError> {
    if let Some(max) = max {
        if max < min {
            return Err(GrammarError::InvertedBounds { min, max });
        }
    }

    match (min, max, &delimiter) {
        (0, Some(1), _) => return Ok(optional(child)),
        (0, None, None) => return star(child),
        (1, None, None) => return plus(child),
        (n, Some(max), None) if n == max => {
            return Ok(sequence(std::iter::repeat(child).take(n)));
        }
        _ => {}
    }

    let separated = delimiter.as_ref().is_some_and(|d| !d.is_nullable());
    if max.is_none() && child.is_nullable() && !separated {
        tracing::debug!(%child, "rejected unbounded quantify over nullable child");
        return Err(GrammarError::NullableRepetition { operator: "quantify" });
    }

    let nullable = min == 0 || child.is_nullable();
    Ok(Combinator::new(
        Node::Quantify {
            child,
            min,
            max,
            delimiter,
        },
        nullable,
    ))
}

/// Succeeds without consuming iff `child` matches here.
pub fn positive_lookahead(child: Combinator) -> Combinator {
    Combinator::new(Node::PositiveLookahead(child), true)
}

/// Succeeds without consuming iff `child` does not match here.
pub fn negative_lookahead(child: Combinator) -> Combinator {
    Combinator::new(Node::NegativeLookahead(child), true)
}

// ============================================================================
// STATE-AWARE PREDICATES
// ============================================================================

/// Matches `child` and records the matched range as backreference `id`.
pub fn capture(id: i32, child: Combinator) -> Combinator {
    let nullable = child.is_nullable();
    Combinator::new(Node::Capture { id, child }, nullable)
}

/// Matches the text previously captured as `id`. Fails if nothing was captured.
pub fn backref(id: i32, case: Case) -> Combinator {
    // A capture may have been empty.
    Combinator::new(Node::Backref { id, case }, true)
}

/// Matches `child` and adds the matched text to set `id`.
pub fn set_insert(id: i32, child: Combinator) -> Combinator {
    let nullable = child.is_nullable();
    Combinator::new(Node::SetInsert { id, child }, nullable)
}

/// Matches `child` only if the matched text is already in set `id`.
pub fn set_contains(id: i32, child: Combinator) -> Combinator {
    let nullable = child.is_nullable();
    Combinator::new(
        Node::SetTest {
            id,
            child,
            present: true,
        },
        nullable,
    )
}

/// Matches `child` only if the matched text is not in set `id`.
pub fn set_excludes(id: i32, child: Combinator) -> Combinator {
    let nullable = child.is_nullable();
    Combinator::new(
        Node::SetTest {
            id,
            child,
            present: false,
        },
        nullable,
    )
}

/// Raises flag `id` without consuming input.
pub fn flag_set(id: i32) -> Combinator {
    Combinator::new(Node::FlagSet { id }, true)
}

/// Succeeds without consuming iff flag `id` is raised.
pub fn flag_test(id: i32) -> Combinator {
    Combinator::new(Node::FlagTest { id, present: true }, true)
}

/// Succeeds without consuming iff flag `id` is not raised.
pub fn flag_absent(id: i32) -> Combinator {
    Combinator::new(Node::FlagTest { id, present: false }, true)
}
