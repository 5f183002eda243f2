//! # Built-in Rules
//!
//! A handful of grammars assembled from the combinator vocabulary, exposed to
//! the CLI by name.
//!
//! ## Rules Provided
//!
//! - **Lexical**: `identifier`, `word`, `integer`, `keyword`
//! - **Lists**: `word-list`
//! - **Stateful**: `repeated-word`, `unique-words`

use crate::combinator::{
    backref, capture, char_range, choice, literal, negative_lookahead, optional, plus, quantify,
    sequence, set_excludes, set_insert, star, Case, Combinator,
};
use crate::errors::GrammarError;

/// Set id used by `unique-words`.
const SEEN_WORDS: i32 = 1;

/// Capture id used by `repeated-word`.
const FIRST_WORD: i32 = 1;

/// A named grammar that can be built on demand.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> Result<Combinator, GrammarError>,
}

pub const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        name: "identifier",
        description: "a letter or underscore, then letters, digits or underscores",
        build: identifier,
    },
    BuiltinRule {
        name: "word",
        description: "one or more ASCII lowercase letters",
        build: lowercase_word,
    },
    BuiltinRule {
        name: "integer",
        description: "an optional minus sign and one or more digits",
        build: integer,
    },
    BuiltinRule {
        name: "keyword",
        description: "`select`, `from` or `where` in any case, not followed by an identifier character",
        build: keyword,
    },
    BuiltinRule {
        name: "word-list",
        description: "comma-separated lowercase words",
        build: word_list,
    },
    BuiltinRule {
        name: "repeated-word",
        description: "a lowercase word, a space, then the same word again",
        build: repeated_word,
    },
    BuiltinRule {
        name: "unique-words",
        description: "space-separated lowercase words, stopping at the first repeat",
        build: unique_words,
    },
];

/// Looks up a built-in rule by name.
pub fn lookup(name: &str) -> Option<&'static BuiltinRule> {
    BUILTIN_RULES.iter().find(|rule| rule.name == name)
}

/// Comma-separated list of the built-in rule names.
pub fn available() -> String {
    BUILTIN_RULES
        .iter()
        .map(|rule| rule.name)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

fn lowercase_letter() -> Result<Combinator, GrammarError> {
    char_range('a', 'z')
}

fn uppercase_letter() -> Result<Combinator, GrammarError> {
    char_range('A', 'Z')
}

fn digit() -> Result<Combinator, GrammarError> {
    char_range('0', '9')
}

fn underscore() -> Combinator {
    literal("_", Case::Sensitive)
}

fn identifier_continue() -> Result<Combinator, GrammarError> {
    Ok(choice([
        lowercase_letter()?,
        uppercase_letter()?,
        underscore(),
        digit()?,
    ]))
}

// ============================================================================
// RULES
// ============================================================================

/// `(lower / upper / "_") (lower / upper / "_" / digit)*`
pub fn identifier() -> Result<Combinator, GrammarError> {
    let first = choice([lowercase_letter()?, uppercase_letter()?, underscore()]);
    let rest = star(identifier_continue()?)?;
    Ok(sequence([first, rest]))
}

/// `[a-z]+`
pub fn lowercase_word() -> Result<Combinator, GrammarError> {
    plus(lowercase_letter()?)
}

/// `"-"? [0-9]+`
pub fn integer() -> Result<Combinator, GrammarError> {
    Ok(sequence([
        optional(literal("-", Case::Sensitive)),
        plus(digit()?)?,
    ]))
}

/// `("select" / "from" / "where")i !identifier_continue`
pub fn keyword() -> Result<Combinator, GrammarError> {
    let words = ["select", "from", "where"].map(|w| literal(w, Case::Insensitive));
    Ok(sequence([
        choice(words),
        negative_lookahead(identifier_continue()?),
    ]))
}

/// `word{1,} % ","`
pub fn word_list() -> Result<Combinator, GrammarError> {
    quantify(
        lowercase_word()?,
        1,
        None,
        Some(literal(",", Case::Sensitive)),
    )
}

/// `<1:word> " " \1`
pub fn repeated_word() -> Result<Combinator, GrammarError> {
    Ok(sequence([
        capture(FIRST_WORD, lowercase_word()?),
        literal(" ", Case::Sensitive),
        backref(FIRST_WORD, Case::Sensitive),
    ]))
}

/// `(+set1:?!set1:word){1,} % " "`
pub fn unique_words() -> Result<Combinator, GrammarError> {
    let fresh = set_insert(SEEN_WORDS, set_excludes(SEEN_WORDS, lowercase_word()?));
    quantify(fresh, 1, None, Some(literal(" ", Case::Sensitive)))
}
