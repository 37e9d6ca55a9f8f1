//! Zig tokenization and parsing.
//!
//! Real Zig source is parsed by the Zig compiler itself; no such grammar
//! exists as a Rust crate. This crate stands in for that external
//! collaborator, producing the token stream and AST the rest of the
//! toolchain — the semantic model, the directive parser, and every rule —
//! is built against. It implements the subset of Zig's grammar that
//! observable lint behavior depends on, not full language fidelity.

mod ast;
mod lexer;
mod parser;
mod token;

pub use ast::{
    Ast, AssignOp, BinaryOp, ContainerKind, DeclFlags, Node, NodeId, NodeKind, NodeTag, UnaryOp,
};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenId, TokenKind, Tokens};

use zlint_span::Span;

/// A file successfully tokenized, plus whatever the parser managed to
/// build. Parse errors don't abort analysis: the dispatcher still runs
/// over the partial tree, and `errors` surfaces as `invalid-syntax`-style
/// diagnostics upstream.
#[derive(Debug)]
pub struct Parsed {
    pub ast: Ast,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token while parsing {context}")]
    UnexpectedToken { context: &'static str, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
        }
    }
}

/// Tokenizes and parses a complete Zig source file.
pub fn parse(source: &str) -> Parsed {
    let (tokens, comments) = Lexer::new(source).tokenize();
    let _ = comments; // collected separately for the directive parser via `tokenize_with_comments`
    let (ast, errors) = Parser::new(source, tokens).parse();
    Parsed { ast, errors }
}

/// Tokenizes and parses a file, also returning the line-comment spans the
/// disable-directive parser scans for `zlint-disable` markers.
pub fn parse_with_comments(source: &str) -> (Parsed, Vec<Span>) {
    let (tokens, comments) = Lexer::new(source).tokenize();
    let (ast, errors) = Parser::new(source, tokens).parse();
    (Parsed { ast, errors }, comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_file() {
        let parsed = parse("const std = @import(\"std\");\n");
        assert!(!parsed.has_errors());
        assert_eq!(parsed.ast.children(parsed.ast.root()).len(), 1);
    }

    #[test]
    fn collects_comments_alongside_parse() {
        let (parsed, comments) = parse_with_comments("// zlint-disable\nconst x = 1;\n");
        assert!(!parsed.has_errors());
        assert_eq!(comments.len(), 1);
    }
}
