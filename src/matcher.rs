//! Longest-match, non-overlapping scanning over a compiled [`Dfa`], and the
//! public `compile`/`findall` entry points.

use crate::ast::AstNode;
use crate::context::CompileContext;
use crate::dfa::{Dfa, DfaBuilder, StateId};
use crate::error::CompileError;
use crate::lexer::Lexer;
use crate::parser;

/// The result of compiling a pattern. Holds the built [`Dfa`] only when
/// compilation produced no errors; an erroring pattern still returns a
/// `CompiledPattern` (never a panic or a `Result::Err`), whose `findall`
/// is simply a no-op, per the "discard the DFA, matching does nothing"
/// contract.
pub struct CompiledPattern {
    dfa: Option<Dfa>,
    errors: Vec<CompileError>,
    named_groups: Vec<String>,
}

impl CompiledPattern {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    /// Names of the pattern's named capture groups, sorted for determinism.
    pub fn named_groups(&self) -> &[String] {
        &self.named_groups
    }

    /// Every longest, non-overlapping match of this pattern in `text`, in
    /// left-to-right order. Empty (never an error) when `is_ok()` is false.
    pub fn findall(&self, text: &str) -> Vec<String> {
        let Some(dfa) = self.dfa.as_ref() else {
            return Vec::new();
        };

        let chars: Vec<char> = text.chars().collect();
        let mut results = Vec::new();

        if dfa.is_final(dfa.initial) {
            results.push(String::new());
        }

        let mut rest: &[char] = &chars;
        while !rest.is_empty() {
            let (matched, leftover) = find_next(dfa, rest);
            if matched.is_empty() {
                rest = &rest[1..];
            } else {
                results.push(matched.into_iter().collect());
                rest = leftover;
            }
        }
        results
    }
}

/// One-step lookahead used to decide whether an accepting state should stop
/// the match or keep extending it greedily. This mirrors the reference
/// matcher's `predict` exactly: it asks only "is there a transition out of
/// `state` on the very next character", not "does some longer match exist
/// further down the line". That single-step horizon is why the matcher is
/// greedy with only a one-state pre-accept lookahead rather than a full
/// longest-match search past the first accepting state.
fn predict(dfa: &Dfa, rest: &[char], state: StateId) -> bool {
    match rest.first() {
        Some(&c) => dfa.transition(state, c).is_some(),
        None => false,
    }
}

/// Scans a single match starting at the front of `text`. Returns the
/// matched characters and the remainder of `text` after them; an empty
/// first element means no match starts here (with `text` itself as the
/// unconsumed remainder, so the caller can retry one character later).
fn find_next<'a>(dfa: &Dfa, text: &'a [char]) -> (Vec<char>, &'a [char]) {
    let mut state = dfa.initial;
    let mut consumed = Vec::new();
    let mut i = 0;

    while i < text.len() {
        let c = text[i];
        match dfa.transition(state, c) {
            Some(next) => {
                state = next;
                consumed.push(c);
                i += 1;
            }
            None => return (Vec::new(), text),
        }
        if dfa.is_final(state) && !predict(dfa, &text[i..], state) {
            return (consumed, &text[i..]);
        }
    }
    (Vec::new(), text)
}

/// Compiles a pattern string into a [`CompiledPattern`]. Never panics and
/// never returns `Result`: lexical, syntactic and semantic problems all
/// accumulate into `CompiledPattern::errors`, and an erroring pattern just
/// compiles to a DFA-less, always-empty matcher.
pub fn compile(pattern: &str) -> CompiledPattern {
    let (tokens, lex_errors) = Lexer::new(pattern).tokenize();
    let mut ctx = CompileContext::new();
    for err in lex_errors {
        ctx.push_error(err);
    }

    let ast: AstNode = parser::parse(&tokens, &mut ctx);

    let mut named_groups: Vec<String> = ctx.named_group_names().into_iter().collect();
    named_groups.sort();

    if !ctx.errors().is_empty() {
        return CompiledPattern {
            dfa: None,
            errors: ctx.into_errors(),
            named_groups,
        };
    }

    let dfa = DfaBuilder::new().build(&ast, &mut ctx);
    CompiledPattern {
        dfa: Some(dfa),
        errors: ctx.into_errors(),
        named_groups,
    }
}

/// Compiles `pattern` and returns every match in `text`, alongside the
/// pattern's compile errors (rendered with `Display`) if any.
pub fn findall(pattern: &str, text: &str) -> (Vec<String>, Vec<String>) {
    let compiled = compile(pattern);
    let errors = compiled.errors.iter().map(|e| e.to_string()).collect();
    let matches = compiled.findall(text);
    (matches, errors)
}
