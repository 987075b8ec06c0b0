//! Recursive-descent parser: consumes the lexer's token stream, builds an
//! [`AstNode`] tree and maintains the named-group table via [`CompileContext`].
//!
//! Grammar precedence, low to high: `OR` < concatenation (juxtaposition) <
//! postfix (`+`, `?`, `{low,top}`). Parenthesised `(reg)` returns the inner
//! AST unchanged; `(<name> reg)` additionally registers `reg` under `name`.

use crate::ast::{self, AstNode};
use crate::context::{CompileContext, SymbolChar};
use crate::error::CompileError;
use crate::lexer::Token;

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

/// Parses a full token stream into a `Root`-augmented AST. Never aborts:
/// every syntax problem is recorded on `ctx` and parsing keeps going with an
/// `Empty` placeholder in place of the unparsable fragment, per the "no
/// exceptions, only an error list" contract.
pub fn parse(tokens: &[Token], ctx: &mut CompileContext) -> AstNode {
    let mut parser = Parser { tokens, pos: 0 };
    let inner = parser.parse_alt(ctx);
    if parser.pos < parser.tokens.len() {
        ctx.push_error(CompileError::UnexpectedToken(parser.current_repr()));
    }
    AstNode::Root(Box::new(inner))
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_repr(&self) -> String {
        match self.peek() {
            Some(token) => token.repr(),
            None => "<eof>".to_string(),
        }
    }

    fn bump(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expect_rrb(&mut self, ctx: &mut CompileContext) {
        match self.peek() {
            Some(Token::Rrb) => {
                self.pos += 1;
            }
            _ => ctx.push_error(CompileError::UnexpectedToken(self.current_repr())),
        }
    }

    fn starts_atom(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Symbol(_)) | Some(Token::Dot) | Some(Token::Lrb) | Some(Token::Id(_))
        )
    }

    fn parse_alt(&mut self, ctx: &mut CompileContext) -> AstNode {
        let mut node = self.parse_concat(ctx);
        while matches!(self.peek(), Some(Token::Or)) {
            self.pos += 1;
            let rhs = self.parse_concat(ctx);
            node = AstNode::Or(Box::new(node), Box::new(rhs));
        }
        node
    }

    fn parse_concat(&mut self, ctx: &mut CompileContext) -> AstNode {
        let mut node = self.parse_postfix(ctx);
        while self.starts_atom() {
            let rhs = self.parse_postfix(ctx);
            node = AstNode::Concat(Box::new(node), Box::new(rhs));
        }
        node
    }

    fn parse_postfix(&mut self, ctx: &mut CompileContext) -> AstNode {
        let mut node = self.parse_atom(ctx);
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    node = ast::posit_clos(node, ctx);
                }
                Some(Token::Opt) => {
                    self.pos += 1;
                    node = ast::opt(node);
                }
                Some(&Token::Repit { low, top }) => {
                    self.pos += 1;
                    node = match ast::repit(node, low, top, ctx) {
                        Ok(n) => n,
                        Err(err) => {
                            ctx.push_error(err);
                            AstNode::Empty
                        }
                    };
                }
                _ => break,
            }
        }
        node
    }

    fn parse_atom(&mut self, ctx: &mut CompileContext) -> AstNode {
        match self.bump().cloned() {
            Some(Token::Symbol(c)) => AstNode::symbol(ctx, SymbolChar::Literal(c)),
            Some(Token::Dot) => AstNode::symbol(ctx, SymbolChar::Any),
            Some(Token::Id(name)) => ctx.expand_named_group(&name).unwrap_or(AstNode::Empty),
            Some(Token::Lrb) => self.parse_group(ctx),
            other => {
                let repr = other.map(|t| t.repr()).unwrap_or_else(|| "<eof>".to_string());
                ctx.push_error(CompileError::UnexpectedToken(repr));
                AstNode::Empty
            }
        }
    }

    /// Handles everything after an already-consumed `(`: either a named
    /// group definition `<name> reg` or a plain grouped `reg`. The two are
    /// disambiguated by whether the token right after the name is `)` (a
    /// bare named-group reference standing alone in parens, e.g. `(<x>)`)
    /// or something else (a definition, e.g. `(<x> a|b)`).
    fn parse_group(&mut self, ctx: &mut CompileContext) -> AstNode {
        if let Some(Token::Id(name)) = self.peek().cloned() {
            let is_definition = !matches!(self.tokens.get(self.pos + 1), Some(Token::Rrb));
            if is_definition {
                self.pos += 1; // consume the name
                let inner = self.parse_alt(ctx);
                self.expect_rrb(ctx);
                ctx.define_named_group(name.clone(), inner.clone());
                return AstNode::Ncg(Box::new(inner), name);
            }
        }
        let inner = self.parse_alt(ctx);
        self.expect_rrb(ctx);
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_pattern(pattern: &str) -> (AstNode, CompileContext) {
        let (tokens, lex_errors) = Lexer::new(pattern).tokenize();
        let mut ctx = CompileContext::new();
        for err in lex_errors {
            ctx.push_error(err);
        }
        let ast = parse(&tokens, &mut ctx);
        (ast, ctx)
    }

    #[test]
    fn parses_simple_alternation() {
        let (ast, ctx) = parse_pattern("a|b");
        assert!(ctx.errors().is_empty());
        match ast {
            AstNode::Root(child) => assert!(matches!(*child, AstNode::Or(..))),
            _ => panic!("expected root"),
        }
    }

    #[test]
    fn rejects_bad_repetition_bounds() {
        let (_, ctx) = parse_pattern("a{3,2}");
        assert_eq!(
            ctx.errors(),
            [CompileError::UpperBoundLessThanLowerBound]
        );

        let (_, ctx) = parse_pattern("a{1,0}");
        assert_eq!(
            ctx.errors(),
            [CompileError::UpperBoundNotGreaterThanZero]
        );
    }

    #[test]
    fn named_group_redefinition_is_reported() {
        let (_, ctx) = parse_pattern("( <x> a )( <x> b )");
        assert_eq!(
            ctx.errors(),
            [CompileError::RedefinedNamedGroup("x".to_string())]
        );
    }

    #[test]
    fn undefined_named_group_reference_is_reported() {
        let (_, ctx) = parse_pattern("<y>");
        assert_eq!(
            ctx.errors(),
            [CompileError::UndefinedNamedGroup("y".to_string())]
        );
    }

    #[test]
    fn bare_reference_in_parens_is_not_a_redefinition() {
        let (_, ctx) = parse_pattern("( <x> a )(<x>)");
        assert!(ctx.errors().is_empty());
    }
}
