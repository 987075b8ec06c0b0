//! The abstract syntax tree of regex operators and its Aho-Sethi-Ullman
//! attribute algebra (`nullable`, `firstpos`, `lastpos`, `followpos`).
//!
//! `Opt`, `PositClos` and `Repit` from the data model have no dedicated
//! variant here: the spec itself describes them as "transparent ... indis-
//! tinguishable from their expansion" at attribute-query time, so the parser
//! desugars them into `Concat`/`Or`/`Closure` trees at construction time (see
//! `ast::posit_clos`, `ast::opt`, `ast::repit`) and this enum never has to
//! special-case them.

use std::collections::HashSet;

use crate::context::{CompileContext, Pos, SymbolChar, END, MAX_REPIT_EXPANSION};
use crate::error::CompileError;

#[derive(Debug, Clone)]
pub enum AstNode {
    /// Augments the pattern with an implicit end-marker: final DFA states
    /// are those whose position set contains `END`.
    Root(Box<AstNode>),
    Or(Box<AstNode>, Box<AstNode>),
    Concat(Box<AstNode>, Box<AstNode>),
    /// Zero-or-more.
    Closure(Box<AstNode>),
    /// Named group: identity over its child, carries the name for debugging
    /// only (the named-group table itself lives on `CompileContext`).
    Ncg(Box<AstNode>, String),
    /// Leaf; `pos` was assigned by `CompileContext::new_position` when this
    /// node was created.
    Symbol(Pos, SymbolChar),
    /// Nullable leaf contributing no position.
    Empty,
}

impl AstNode {
    pub fn symbol(ctx: &mut CompileContext, char: SymbolChar) -> Self {
        let pos = ctx.new_position(char);
        AstNode::Symbol(pos, char)
    }

    pub fn nullable(&self) -> bool {
        match self {
            AstNode::Root(child) => child.nullable(),
            AstNode::Or(a, b) => a.nullable() || b.nullable(),
            AstNode::Concat(a, b) => a.nullable() && b.nullable(),
            AstNode::Closure(_) => true,
            AstNode::Ncg(child, _) => child.nullable(),
            AstNode::Symbol(..) => false,
            AstNode::Empty => true,
        }
    }

    pub fn firstpos(&self) -> HashSet<Pos> {
        match self {
            // No end-marker injection here: followpos is the only place `END`
            // enters a position set (see `Root::followpos` below). A nullable
            // pattern therefore never makes the initial state accepting —
            // carried over from the reference implementation as-is.
            AstNode::Root(child) => child.firstpos(),
            AstNode::Or(a, b) => union(a.firstpos(), b.firstpos()),
            AstNode::Concat(a, b) => {
                if a.nullable() {
                    union(a.firstpos(), b.firstpos())
                } else {
                    a.firstpos()
                }
            }
            AstNode::Closure(child) => child.firstpos(),
            AstNode::Ncg(child, _) => child.firstpos(),
            AstNode::Symbol(pos, _) => [*pos].into_iter().collect(),
            AstNode::Empty => HashSet::new(),
        }
    }

    pub fn lastpos(&self) -> HashSet<Pos> {
        match self {
            AstNode::Root(child) => child.lastpos(),
            AstNode::Or(a, b) => union(a.lastpos(), b.lastpos()),
            AstNode::Concat(a, b) => {
                if b.nullable() {
                    union(a.lastpos(), b.lastpos())
                } else {
                    b.lastpos()
                }
            }
            AstNode::Closure(child) => child.lastpos(),
            AstNode::Ncg(child, _) => child.lastpos(),
            AstNode::Symbol(pos, _) => [*pos].into_iter().collect(),
            AstNode::Empty => HashSet::new(),
        }
    }

    /// Populates `ctx`'s followpos table for this node and all descendants.
    /// Called once, on the `Root`, after the whole tree has been built.
    pub fn followpos(&self, ctx: &mut CompileContext) {
        match self {
            AstNode::Root(child) => {
                for pos in child.lastpos() {
                    ctx.add_followpos(pos, [END]);
                }
                child.followpos(ctx);
            }
            AstNode::Or(a, b) => {
                a.followpos(ctx);
                b.followpos(ctx);
            }
            AstNode::Concat(a, b) => {
                let b_first = b.firstpos();
                for pos in a.lastpos() {
                    ctx.add_followpos(pos, b_first.iter().copied());
                }
                a.followpos(ctx);
                b.followpos(ctx);
            }
            AstNode::Closure(child) => {
                let first = child.firstpos();
                for pos in child.lastpos() {
                    ctx.add_followpos(pos, first.iter().copied());
                }
                child.followpos(ctx);
            }
            AstNode::Ncg(child, _) => child.followpos(ctx),
            AstNode::Symbol(..) | AstNode::Empty => {}
        }
    }

    /// Deep copy producing fresh `Symbol` nodes (and therefore fresh
    /// position ids) for every leaf, re-registered in `ctx`. Required
    /// whenever a subtree is reused — named-group expansion and repetition
    /// unrolling — so that position sets for the two uses never collide.
    pub fn copy(&self, ctx: &mut CompileContext) -> AstNode {
        match self {
            AstNode::Root(child) => AstNode::Root(Box::new(child.copy(ctx))),
            AstNode::Or(a, b) => AstNode::Or(Box::new(a.copy(ctx)), Box::new(b.copy(ctx))),
            AstNode::Concat(a, b) => {
                AstNode::Concat(Box::new(a.copy(ctx)), Box::new(b.copy(ctx)))
            }
            AstNode::Closure(child) => AstNode::Closure(Box::new(child.copy(ctx))),
            AstNode::Ncg(child, name) => {
                AstNode::Ncg(Box::new(child.copy(ctx)), name.clone())
            }
            AstNode::Symbol(_, char) => AstNode::symbol(ctx, *char),
            AstNode::Empty => AstNode::Empty,
        }
    }
}

fn union(mut a: HashSet<Pos>, b: HashSet<Pos>) -> HashSet<Pos> {
    a.extend(b);
    a
}

/// Desugars `reg+` into `Concat(child, Closure(child_copy))`.
pub fn posit_clos(child: AstNode, ctx: &mut CompileContext) -> AstNode {
    let copy = child.copy(ctx);
    AstNode::Concat(Box::new(child), Box::new(AstNode::Closure(Box::new(copy))))
}

/// Desugars `reg?` into `Or(Empty, child)`.
pub fn opt(child: AstNode) -> AstNode {
    AstNode::Or(Box::new(AstNode::Empty), Box::new(child))
}

fn concat_copies(child: &AstNode, count: usize, ctx: &mut CompileContext) -> AstNode {
    debug_assert!(count >= 1);
    let mut acc = child.copy(ctx);
    for _ in 1..count {
        acc = AstNode::Concat(Box::new(acc), Box::new(child.copy(ctx)));
    }
    acc
}

/// Desugars bounded repetition `reg{low,top}` per the spec's repetition
/// semantics table. `top == -1` means unbounded.
pub fn repit(
    child: AstNode,
    low: i64,
    top: i64,
    ctx: &mut CompileContext,
) -> Result<AstNode, CompileError> {
    // `top == 0` is rejected outright regardless of `low` (so `{0,0}` and
    // `{3,0}` both report the same "must be greater than 0" error, never the
    // lower-bound one) — checked before the low-vs-top comparison below.
    if top == 0 {
        return Err(CompileError::UpperBoundNotGreaterThanZero);
    }
    if top > 0 && low > top {
        return Err(CompileError::UpperBoundLessThanLowerBound);
    }

    if top < 0 {
        if low == 0 {
            return Ok(AstNode::Closure(Box::new(child)));
        }
        let low = low as usize;
        if low > MAX_REPIT_EXPANSION {
            return Err(CompileError::RepetitionTooLarge(low));
        }
        let first = concat_copies(&child, low, ctx);
        return Ok(AstNode::Concat(
            Box::new(first),
            Box::new(AstNode::Closure(Box::new(child))),
        ));
    }

    let top = top as usize;
    let low = low as usize;
    if top > MAX_REPIT_EXPANSION {
        return Err(CompileError::RepetitionTooLarge(top));
    }

    let mut result = if low == 0 {
        AstNode::Empty
    } else {
        concat_copies(&child, low, ctx)
    };
    for k in low..top {
        let alt = concat_copies(&child, k + 1, ctx);
        result = AstNode::Or(Box::new(result), Box::new(alt));
    }
    Ok(result)
}
