//! Per-compile state: the position table, the followpos table and the
//! named-group table.
//!
//! The reference implementation keeps these as module-level globals reset by
//! an `initGlobals()` call at the start of every compile. This crate
//! threads an explicit [`CompileContext`] value through lexing, parsing and
//! tree-building instead (per the design notes), so "reset" is just
//! constructing a new value — there is nothing to leak between compiles.

use std::collections::{HashMap, HashSet};

use crate::ast::AstNode;
use crate::error::CompileError;

/// A position id, or the end-marker sentinel (`-1`).
pub type Pos = i64;
pub const END: Pos = -1;

/// The character (or sentinel) a leaf [`AstNode::Symbol`] matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolChar {
    Literal(char),
    Any,
}

/// Upper bound on the number of `Symbol` copies a single `{low,top}`
/// expansion may produce, guarding against a pathological bound blowing up
/// compile time and memory (see design notes on `Repit` recursion depth).
pub const MAX_REPIT_EXPANSION: usize = 10_000;

/// The mutable state threaded through a single compilation: the position
/// table (one entry per leaf `Symbol`, indexed by position id), the parallel
/// followpos table, the named-group table and the ordered error list.
pub struct CompileContext {
    symbols: Vec<SymbolChar>,
    followpos: Vec<HashSet<Pos>>,
    named_groups: HashMap<String, AstNode>,
    errors: Vec<CompileError>,
}

impl CompileContext {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            followpos: Vec::new(),
            named_groups: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Registers a fresh leaf `Symbol` and returns its position id. Every
    /// call — including those made while deep-copying a named group's
    /// subtree — allocates a brand-new id, which is what keeps position sets
    /// from two different uses of the same named group from colliding.
    pub fn new_position(&mut self, char: SymbolChar) -> Pos {
        let id = self.symbols.len() as Pos;
        self.symbols.push(char);
        self.followpos.push(HashSet::new());
        id
    }

    pub fn symbol_char(&self, pos: Pos) -> SymbolChar {
        self.symbols[pos as usize]
    }

    pub fn followpos(&self, pos: Pos) -> &HashSet<Pos> {
        &self.followpos[pos as usize]
    }

    pub fn add_followpos(&mut self, pos: Pos, targets: impl IntoIterator<Item = Pos>) {
        self.followpos[pos as usize].extend(targets);
    }

    /// Number of leaf positions registered so far (`N` in the "leaf-ids
    /// dense" testable property).
    pub fn position_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn push_error(&mut self, error: CompileError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<CompileError> {
        self.errors
    }

    /// Registers `name -> subtree`, or records a redefinition error if the
    /// name is already taken.
    pub fn define_named_group(&mut self, name: String, subtree: AstNode) {
        if self.named_groups.contains_key(&name) {
            self.push_error(CompileError::RedefinedNamedGroup(name));
        } else {
            self.named_groups.insert(name, subtree);
        }
    }

    /// Returns a fresh `Ncg(copy, name)` node wrapping a deep,
    /// freshly position-numbered copy of the subtree registered under
    /// `name`, or records an undefined-group error.
    pub fn expand_named_group(&mut self, name: &str) -> Option<AstNode> {
        match self.named_groups.get(name).cloned() {
            Some(subtree) => {
                let fresh = subtree.copy(self);
                Some(AstNode::Ncg(Box::new(fresh), name.to_string()))
            }
            None => {
                self.push_error(CompileError::UndefinedNamedGroup(name.to_string()));
                None
            }
        }
    }

    pub fn named_groups(&self) -> impl Iterator<Item = &String> {
        self.named_groups.keys()
    }

    pub fn named_group_names(&self) -> HashSet<String> {
        self.named_groups.keys().cloned().collect()
    }
}

impl Default for CompileContext {
    fn default() -> Self {
        Self::new()
    }
}
