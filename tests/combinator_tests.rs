// tests/combinator_tests.rs

use pegleg::combinator::{
    any_char, backref, capture, char_range, choice, flag_absent, flag_set, flag_test, literal,
    negative_lookahead, optional, plus, positive_lookahead, quantify, regex, sequence,
    set_contains, set_excludes, set_insert, star,
};
use pegleg::{Case, Combinator, Cursor, GrammarError, HashState, Hasher, ParseConfig, ParseState, Parser};
use pretty_assertions::assert_eq;

fn consumed(grammar: &Combinator, text: &str) -> Option<usize> {
    grammar.parse(Cursor::new(text)).map(|m| m.len())
}

fn lit(text: &str) -> Combinator {
    literal(text, Case::Sensitive)
}

fn lower() -> Combinator {
    char_range('a', 'z').unwrap()
}

// ---
// Primitives
// ---

#[test]
fn lowercase_run_stops_at_digits() {
    let word = plus(lower()).unwrap();
    assert_eq!(consumed(&word, "abc123"), Some(3));
    assert_eq!(consumed(&word, "123"), None);
    assert_eq!(consumed(&word, ""), None);
}

#[test]
fn literal_matching_respects_case() {
    assert_eq!(consumed(&lit("let"), "let x"), Some(3));
    assert_eq!(consumed(&lit("let"), "LET x"), None);
    assert_eq!(consumed(&literal("let", Case::Insensitive), "LeT x"), Some(3));
}

#[test]
fn empty_literal_always_matches() {
    assert_eq!(consumed(&lit(""), ""), Some(0));
    assert_eq!(consumed(&lit(""), "abc"), Some(0));
}

#[test]
fn regex_is_anchored_at_the_cursor() {
    let digits = regex("[0-9]+", Case::Sensitive).unwrap();
    assert_eq!(consumed(&digits, "12ab"), Some(2));
    assert_eq!(consumed(&digits, "ab12"), None);

    let shout = regex("hey", Case::Insensitive).unwrap();
    assert_eq!(consumed(&shout, "HEY there"), Some(3));
}

#[test]
fn any_char_consumes_one_character() {
    let m = any_char().parse(Cursor::new("é!")).unwrap();
    assert_eq!(m.as_str(), "é");
    assert_eq!(consumed(&any_char(), ""), None);
}

#[test]
fn matches_are_windows_into_the_input() {
    let input = Cursor::new("hello world").slice_from(6);
    let m = lit("wor").parse(input).unwrap();
    assert_eq!(m.as_str(), "wor");
    assert_eq!(m.range().start(), 6);
    assert_eq!(m.range().end(), 9);
}

// ---
// Composition
// ---

#[test]
fn sequence_sums_child_lengths() {
    let greeting = sequence([lit("hi"), lit(" "), plus(lower()).unwrap()]);
    assert_eq!(consumed(&greeting, "hi there!"), Some(8));
    assert_eq!(consumed(&greeting, "hi 42"), None);
}

#[test]
fn choice_takes_the_first_success() {
    let either = choice([lit("a"), lit("ab")]);
    assert_eq!(consumed(&either, "abc"), Some(1));
    let ordered = choice([lit("ab"), lit("a")]);
    assert_eq!(consumed(&ordered, "abc"), Some(2));
    assert_eq!(consumed(&ordered, "xyz"), None);
}

#[test]
fn optional_and_star_never_fail() {
    assert_eq!(consumed(&optional(lit("x")), "y"), Some(0));
    assert_eq!(consumed(&star(lit("ab")).unwrap(), "ababa"), Some(4));
    assert_eq!(consumed(&star(lit("ab")).unwrap(), ""), Some(0));
}

#[test]
fn bounded_quantify_with_delimiter() {
    let items = quantify(lit("a"), 2, Some(4), Some(lit(","))).unwrap();
    assert_eq!(consumed(&items, "a,a,a"), Some(5));
    assert_eq!(consumed(&items, "a"), None);
    assert_eq!(consumed(&items, "a,a,a,a,a"), Some(7));
}

#[test]
fn trailing_delimiter_is_left_unconsumed() {
    let items = quantify(lit("a"), 1, None, Some(lit(","))).unwrap();
    assert_eq!(consumed(&items, "a,a,"), Some(3));
    assert_eq!(consumed(&items, "a,,a"), Some(1));
}

#[test]
fn exact_quantify() {
    let three = quantify(lower(), 3, Some(3), None).unwrap();
    assert_eq!(consumed(&three, "abcd"), Some(3));
    assert_eq!(consumed(&three, "ab"), None);
}

#[test]
fn lookaheads_consume_nothing() {
    let ahead = positive_lookahead(lit("ab"));
    assert_eq!(consumed(&ahead, "abc"), Some(0));
    assert_eq!(consumed(&ahead, "ba"), None);

    let not_ahead = negative_lookahead(lit("ab"));
    assert_eq!(consumed(&not_ahead, "ba"), Some(0));
    assert_eq!(consumed(&not_ahead, "abc"), None);
}

#[test]
fn keyword_needs_a_word_boundary() {
    let keyword = sequence([literal("if", Case::Insensitive), negative_lookahead(lower())]);
    assert_eq!(consumed(&keyword, "IF (x)"), Some(2));
    assert_eq!(consumed(&keyword, "iffy"), None);
}

// ---
// Construction errors
// ---

#[test]
fn construction_rejects_bad_grammars() {
    assert!(matches!(
        char_range('z', 'a'),
        Err(GrammarError::EmptyCharRange { begin: 'z', end: 'a' })
    ));
    assert!(matches!(
        quantify(lit("a"), 3, Some(2), None),
        Err(GrammarError::InvertedBounds { min: 3, max: 2 })
    ));
    assert!(matches!(
        regex("(", Case::Sensitive),
        Err(GrammarError::InvalidRegex { .. })
    ));
}

#[test]
fn unbounded_repetition_of_nullable_expression_is_rejected() {
    assert!(matches!(
        star(optional(lit("a"))),
        Err(GrammarError::NullableRepetition { .. })
    ));
    let nullable_regex = regex("a*", Case::Sensitive).unwrap();
    assert!(nullable_regex.is_nullable());
    assert!(plus(nullable_regex).is_err());

    // A consuming delimiter guarantees progress.
    let separated = quantify(optional(lit("a")), 0, None, Some(lit(","))).unwrap();
    assert_eq!(consumed(&separated, ",a,"), Some(3));
}

#[test]
fn bounded_repetition_of_empty_match_terminates() {
    let huge = quantify(optional(lit("a")), 0, Some(usize::MAX), None).unwrap();
    assert_eq!(consumed(&huge, "b"), Some(0));
    assert_eq!(consumed(&huge, "aab"), Some(2));

    // Required repetitions that would all match empty are satisfied.
    let required = quantify(optional(lit("a")), 1_000_000, Some(usize::MAX), None).unwrap();
    assert_eq!(consumed(&required, "b"), Some(0));

    let delimited = quantify(optional(lit("a")), 0, Some(usize::MAX), Some(lit(""))).unwrap();
    assert_eq!(consumed(&delimited, "a"), Some(1));
}

// ---
// State threading
// ---

#[test]
fn captured_text_can_be_matched_again() {
    let doubled = sequence([
        capture(1, plus(lower()).unwrap()),
        lit(" "),
        backref(1, Case::Sensitive),
    ]);
    assert_eq!(consumed(&doubled, "go go!"), Some(5));
    assert_eq!(consumed(&doubled, "go gone"), Some(5));
    assert_eq!(consumed(&doubled, "go no"), None);

    let loose = sequence([
        capture(1, plus(lower()).unwrap()),
        lit(" "),
        backref(1, Case::Insensitive),
    ]);
    assert_eq!(consumed(&loose, "go GO"), Some(5));
}

#[test]
fn backref_without_capture_fails() {
    assert_eq!(consumed(&backref(7, Case::Sensitive), "anything"), None);
}

#[test]
fn set_membership_threads_through_sequences() {
    let word = || plus(lower()).unwrap();
    let declared = sequence([set_insert(1, word()), lit(" "), set_contains(1, word())]);
    assert_eq!(consumed(&declared, "ab ab"), Some(5));
    assert_eq!(consumed(&declared, "ab cd"), None);

    let fresh = sequence([set_insert(1, word()), lit(" "), set_excludes(1, word())]);
    assert_eq!(consumed(&fresh, "ab cd"), Some(5));
    assert_eq!(consumed(&fresh, "ab ab"), None);
}

#[test]
fn flags_are_zero_width() {
    assert_eq!(consumed(&sequence([flag_set(3), flag_test(3)]), "x"), Some(0));
    assert_eq!(consumed(&flag_test(3), "x"), None);
    assert_eq!(consumed(&flag_absent(3), "x"), Some(0));
}

#[test]
fn lookahead_discards_state() {
    let grammar = sequence([positive_lookahead(flag_set(1)), flag_test(1)]);
    assert_eq!(consumed(&grammar, ""), None);
}

#[test]
fn failed_alternatives_leave_no_state_behind() {
    let grammar = choice([sequence([flag_set(1), lit("x")]), lit("y")]);
    let start = ParseState::empty();
    let mut hasher = Hasher::new();
    let found = grammar
        .parse_with_state(Cursor::new("y"), &start, &mut hasher)
        .unwrap();
    assert_eq!(found.matched.len(), 1);
    assert!(found.state.ptr_eq(&start));
    assert!(!ParseState::has_changed(&start, &found.state));
}

#[test]
fn stateful_match_reports_new_state() {
    let grammar = capture(2, plus(lower()).unwrap());
    let start = ParseState::empty();
    let mut hasher = Hasher::new();
    let found = grammar
        .parse_with_state(Cursor::new("abc def"), &start, &mut hasher)
        .unwrap();
    assert!(ParseState::has_changed(&start, &found.state));
    let range = found.state.backref_try_get(2).unwrap();
    assert_eq!((range.start(), range.end()), (0, 3));
}

#[test]
fn supplied_state_is_visible_to_predicates() {
    let mut hasher = Hasher::new();
    let known = ParseState::empty().set_add(&mut hasher, 4, "int");
    let type_name = set_contains(4, plus(lower()).unwrap());
    let found = type_name
        .parse_with_state(Cursor::new("int x"), &known, &mut hasher)
        .unwrap();
    assert_eq!(found.matched.as_str(), "int");
    assert!(found.state.ptr_eq(&known));
    assert!(type_name
        .parse_with_state(Cursor::new("float x"), &known, &mut hasher)
        .is_none());
}

// ---
// Parser
// ---

#[test]
fn parser_full_match_rejects_leftovers() {
    let word = plus(lower()).unwrap();
    let prefix = Parser::new(word.clone());
    let full = Parser::new(word).with_config(ParseConfig::full_match());
    assert_eq!(prefix.parse("abc1").map(|m| m.len()), Some(3));
    assert!(full.parse("abc1").is_none());
    assert_eq!(full.parse("abc").map(|m| m.as_str()), Some("abc"));
}

#[test]
fn grammars_display_in_peg_notation() {
    let grammar = sequence([
        literal("a", Case::Insensitive),
        star(lower()).unwrap(),
        negative_lookahead(any_char()),
    ]);
    assert_eq!(grammar.to_string(), "(\"a\"i [a-z]* !.)");
}
