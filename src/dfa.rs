//! Subset-style construction of a DFA from an augmented syntax tree, using
//! the position/followpos table built by [`crate::ast`].

use std::collections::{HashMap, HashSet, VecDeque};

use crate::ast::AstNode;
use crate::context::{CompileContext, Pos, SymbolChar, END};

pub type StateId = usize;

/// A deterministic finite automaton over `char` (plus the `.` wildcard),
/// built directly from position sets without a minimisation pass.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// `states[id]` is the canonical (sorted) set of position ids — and,
    /// for accepting states, the end-marker `-1` — that make up that state.
    pub states: Vec<Vec<Pos>>,
    pub transitions: Vec<HashMap<SymbolChar, StateId>>,
    pub finals: HashSet<StateId>,
    pub initial: StateId,
}

impl Dfa {
    pub fn transition(&self, state: StateId, c: char) -> Option<StateId> {
        let table = &self.transitions[state];
        table
            .get(&SymbolChar::Literal(c))
            .or_else(|| table.get(&SymbolChar::Any))
            .copied()
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }
}

fn canonicalize(set: HashSet<Pos>) -> Vec<Pos> {
    let mut v: Vec<Pos> = set.into_iter().collect();
    v.sort_unstable();
    v
}

/// Builds a [`Dfa`] from a `Root`-augmented AST. `ctx` must be the same
/// context the tree was built with (it holds the position table the
/// followpos computation reads from).
pub struct DfaBuilder {
    trace: bool,
}

impl DfaBuilder {
    pub fn new() -> Self {
        Self { trace: false }
    }

    /// Enables `cfg(debug_assertions)`-gated tracing of newly discovered
    /// states, in the same ambient-diagnostics idiom as the teacher's
    /// `Log`-gated lexeme tracing.
    pub fn with_trace(trace: bool) -> Self {
        Self { trace }
    }

    pub fn build(&self, root: &AstNode, ctx: &mut CompileContext) -> Dfa {
        root.followpos(ctx);

        let s0 = canonicalize(root.firstpos());
        let mut states: Vec<Vec<Pos>> = vec![s0.clone()];
        let mut transitions: Vec<HashMap<SymbolChar, StateId>> = vec![HashMap::new()];
        let mut index_of: HashMap<Vec<Pos>, StateId> = HashMap::new();
        index_of.insert(s0, 0);
        let mut worklist: VecDeque<StateId> = VecDeque::from([0]);

        while let Some(state_id) = worklist.pop_front() {
            let positions = states[state_id].clone();

            let mut alphabet: HashSet<SymbolChar> = HashSet::new();
            for &p in &positions {
                if p != END {
                    alphabet.insert(ctx.symbol_char(p));
                }
            }

            for symbol in alphabet {
                let mut target: HashSet<Pos> = HashSet::new();
                for &p in &positions {
                    if p != END && ctx.symbol_char(p) == symbol {
                        target.extend(ctx.followpos(p).iter().copied());
                    }
                }
                if target.is_empty() {
                    continue;
                }
                let canonical = canonicalize(target);
                let target_id = *index_of.entry(canonical.clone()).or_insert_with(|| {
                    let id = states.len();
                    states.push(canonical.clone());
                    transitions.push(HashMap::new());
                    worklist.push_back(id);
                    #[cfg(debug_assertions)]
                    if self.trace {
                        eprintln!("dfa: discovered state {} = {:?}", id, canonical);
                    }
                    id
                });
                transitions[state_id].insert(symbol, target_id);
            }
        }

        let finals = states
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.contains(&END).then_some(id))
            .collect();

        Dfa {
            states,
            transitions,
            finals,
            initial: 0,
        }
    }
}

impl Default for DfaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
