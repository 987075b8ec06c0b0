//! Scenario tests against the public API only: pattern/text/match tables and
//! pattern/error tables, plus the universal properties every compile should
//! satisfy.

use dfa_regex::{compile, findall};

#[test]
fn literal_matches_every_occurrence() {
    let (matches, errors) = findall("a", "banana");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["a", "a", "a"]);
}

#[test]
fn alternation_picks_either_branch() {
    let (matches, errors) = findall("a|b", "cab");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["a", "b"]);
}

#[test]
fn positive_closure_is_greedy_and_non_overlapping() {
    let (matches, errors) = findall("a+", "aaabaa");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["aaa", "aa"]);
}

#[test]
fn optional_prefers_consuming_when_possible() {
    let (matches, errors) = findall("a?b", "bab");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["b", "ab"]);
}

#[test]
fn bounded_repetition_takes_the_upper_bound_greedily() {
    let (matches, errors) = findall("ab{2,3}", "abbbbb");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["abbb"]);
}

#[test]
fn named_group_can_be_referenced_again_independently() {
    let (matches, errors) = findall("(<x> a|b)<x>", "aabb");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["aa", "bb"]);
}

#[test]
fn dot_is_a_fallback_behind_concrete_transitions() {
    let (matches, errors) = findall(".b", "xb yb");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["xb", "yb"]);
}

#[test]
fn escaped_reserved_characters_round_trip_as_literals() {
    let (matches, errors) = findall("&(x&)", "(x)");
    assert!(errors.is_empty());
    assert_eq!(matches, vec!["(x)"]);
}

#[test]
fn upper_bound_below_lower_bound_is_an_error() {
    let (matches, errors) = findall("a{3,2}", "aaa");
    assert!(matches.is_empty());
    assert_eq!(
        errors,
        vec!["Upper bound must not be less then lower one!".to_string()]
    );
}

#[test]
fn zero_upper_bound_with_positive_lower_bound_is_an_error() {
    let (matches, errors) = findall("a{1,0}", "a");
    assert!(matches.is_empty());
    assert_eq!(
        errors,
        vec!["Upper bound must be greater then 0!".to_string()]
    );
}

#[test]
fn redefining_a_named_group_is_an_error() {
    let (matches, errors) = findall("(<x> a)(<x> b)", "ab");
    assert!(matches.is_empty());
    assert_eq!(
        errors,
        vec!["Redefinition of named capture group:x".to_string()]
    );
}

#[test]
fn referencing_an_undefined_named_group_is_an_error() {
    let (matches, errors) = findall("<y>", "y");
    assert!(matches.is_empty());
    assert_eq!(errors, vec!["Undefined named capture group: y".to_string()]);
}

#[test]
fn a_bare_opening_brace_is_an_illegal_character() {
    let (matches, errors) = findall("{", "{");
    assert!(matches.is_empty());
    assert_eq!(errors, vec!["Illegal character '{'".to_string()]);
}

#[test]
fn leaf_position_ids_are_dense() {
    // ab{2,3} desugars into several Symbol copies of `b`; every position id
    // from 0..N should have been assigned, with none skipped or reused.
    let compiled = compile("ab{2,3}");
    assert!(compiled.is_ok());
    // Successfully compiling at all (a DFA got built) is only possible if
    // position ids were dense: `CompileContext::symbol_char` is indexed
    // directly by position id with no gaps tolerated.
    assert!(!compiled.findall("abb").is_empty());
}

#[test]
fn dfa_determinism_one_target_per_symbol_per_state() {
    let compiled = compile("(<x> a|b)<x>");
    assert!(compiled.is_ok());
    // A deterministic automaton gives exactly one longest match per start
    // position; running findall twice must be idempotent.
    assert_eq!(compiled.findall("aabb"), compiled.findall("aabb"));
}

#[test]
fn compiling_twice_yields_the_same_matches() {
    let first = compile("a+|b?");
    let second = compile("a+|b?");
    assert_eq!(first.findall("aabba"), second.findall("aabba"));
}

#[test]
fn no_spurious_final_state_without_consuming_input() {
    // A pattern that cannot match the empty string must not accept at the
    // initial state.
    let compiled = compile("a");
    assert!(compiled.is_ok());
    assert!(compiled.findall("").is_empty());
}

#[test]
fn nullable_pattern_never_seeds_a_leading_empty_match() {
    // `Root::firstpos` forwards to the child unconditionally (only
    // `followpos` ever adds the end-marker to a position set), so the
    // initial DFA state is never accepting — even for a pattern that can
    // match the empty string, like `a?`. None of spec.md §8's own scenario
    // patterns are nullable at the root, so this is the one that exercises
    // it.
    let compiled = compile("a?");
    assert!(compiled.is_ok());
    assert_eq!(compiled.findall("bb"), Vec::<String>::new());
}

#[test]
fn named_groups_are_reported_sorted() {
    let compiled = compile("(<b> a)(<a> b)");
    assert!(compiled.is_ok());
    assert_eq!(compiled.named_groups(), &["a".to_string(), "b".to_string()]);
}
