//! `dfa-regex` is a small regular-expression engine that compiles a pattern
//! directly to a deterministic finite automaton using the Aho-Sethi-Ullman
//! (`nullable`/`firstpos`/`lastpos`/`followpos`) position-set construction,
//! skipping the usual NFA-subset-construction detour and any subsequent
//! minimisation pass.
//!
//! # Overview
//!
//! Compiling a pattern goes through four stages, each its own module:
//!
//! - [`lexer`] splits the pattern string into a [`lexer::Token`] stream.
//! - [`parser`] turns the token stream into an [`ast::AstNode`] tree,
//!   registering named capture groups on a [`context::CompileContext`] as it
//!   goes.
//! - [`ast`] computes the position-set attributes over that tree.
//! - [`dfa`] runs subset construction over position sets to build a
//!   [`dfa::Dfa`].
//!
//! [`matcher::compile`] drives all four stages and returns a
//! [`matcher::CompiledPattern`], whose [`matcher::CompiledPattern::findall`]
//! performs longest-match, non-overlapping scanning over input text.
//!
//! Nothing in this crate panics on a malformed pattern. Lexical, syntactic
//! and semantic problems all collect into an ordered list of
//! [`error::CompileError`]s on the [`context::CompileContext`]; a pattern
//! with any errors simply compiles to a `CompiledPattern` whose `findall`
//! always returns no matches.
//!
//! # Example
//!
//! ```
//! use dfa_regex::findall;
//!
//! let (matches, errors) = findall("a+", "aaabaa");
//! assert_eq!(matches, vec!["aaa", "aa"]);
//! assert!(errors.is_empty());
//! ```
//!
//! # License
//! [dfa-regex](crate) is provided under the MIT license.

mod ast;
mod context;
mod dfa;
mod error;
mod lexer;
mod matcher;
mod parser;

pub use error::CompileError;
pub use matcher::{compile, findall, CompiledPattern};
