use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Case sensitivity for literal and regular-expression matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    /// Ordinal comparison.
    #[default]
    Sensitive,
    /// Locale-invariant comparison under Unicode simple case folding.
    Insensitive,
}

/// A composable matcher.
///
/// Cheap to clone: children are shared, never copied. Built only through the
/// constructors in [`crate::combinator`], which also decide nullability once.
#[derive(Clone)]
pub struct Combinator(Arc<Inner>);

struct Inner {
    node: Node,
    nullable: bool,
}

/// The closed set of combinator kinds interpreted by the dispatch routine.
pub(crate) enum Node {
    CharRange { begin: char, end: char },
    Literal { text: Box<str>, case: Case },
    Regex { pattern: Box<str>, regex: Regex, case: Case },
    AnyChar,
    Sequence(Vec<Combinator>),
    Choice(Vec<Combinator>),
    Optional(Combinator),
    Star(Combinator),
    Quantify {
        child: Combinator,
        min: usize,
        max: Option<usize>,
        delimiter: Option<Combinator>,
    },
    PositiveLookahead(Combinator),
    NegativeLookahead(Combinator),
    Capture { id: i32, child: Combinator },
    Backref { id: i32, case: Case },
    SetInsert { id: i32, child: Combinator },
    SetTest { id: i32, child: Combinator, present: bool },
    FlagSet { id: i32 },
    FlagTest { id: i32, present: bool },
}

impl Combinator {
    pub(crate) fn new(node: Node, nullable: bool) -> Self {
        Self(Arc::new(Inner { node, nullable }))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.0.node
    }

    /// Whether this combinator can succeed without consuming input.
    ///
    /// Conservative: `true` may be reported for expressions that never
    /// actually match empty input, never the other way round.
    pub fn is_nullable(&self) -> bool {
        self.0.nullable
    }

    /// Whether `self` and `other` are the same shared node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// PEG NOTATION
// ============================================================================

fn write_case(f: &mut fmt::Formatter<'_>, case: Case) -> fmt::Result {
    match case {
        Case::Sensitive => Ok(()),
        Case::Insensitive => f.write_str("i"),
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Combinator], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::CharRange { begin, end } if begin == end => write!(f, "[{}]", begin.escape_debug()),
            Node::CharRange { begin, end } => {
                write!(f, "[{}-{}]", begin.escape_debug(), end.escape_debug())
            }
            Node::Literal { text, case } => {
                write!(f, "{text:?}")?;
                write_case(f, *case)
            }
            Node::Regex { pattern, case, .. } => {
                write!(f, "/{pattern}/")?;
                write_case(f, *case)
            }
            Node::AnyChar => f.write_str("."),
            Node::Sequence(children) => write_joined(f, children, " "),
            Node::Choice(options) => write_joined(f, options, " / "),
            Node::Optional(child) => write!(f, "{child}?"),
            Node::Star(child) => write!(f, "{child}*"),
            Node::Quantify {
                child,
                min,
                max,
                delimiter,
            } => {
                write!(f, "{child}{{{min},")?;
                if let Some(max) = max {
                    write!(f, "{max}")?;
                }
                if let Some(delimiter) = delimiter {
                    write!(f, " % {delimiter}")?;
                }
                f.write_str("}")
            }
            Node::PositiveLookahead(child) => write!(f, "&{child}"),
            Node::NegativeLookahead(child) => write!(f, "!{child}"),
            Node::Capture { id, child } => write!(f, "<{id}:{child}>"),
            Node::Backref { id, case } => {
                write!(f, "\\{id}")?;
                write_case(f, *case)
            }
            Node::SetInsert { id, child } => write!(f, "+set{id}:{child}"),
            Node::SetTest { id, child, present } => {
                let op = if *present { "?" } else { "?!" };
                write!(f, "{op}set{id}:{child}")
            }
            Node::FlagSet { id } => write!(f, "+flag{id}"),
            Node::FlagTest { id, present } => {
                let op = if *present { "?" } else { "?!" };
                write!(f, "{op}flag{id}")
            }
        }
    }
}

impl fmt::Debug for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Combinator({self})")
    }
}
