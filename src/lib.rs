//! # exprtree
//!
//! Turns integer arithmetic expressions (`+ - * / %` and parentheses) into
//! an abstract syntax tree.
//!
//! ## Architecture
//!
//! - `lexer`: Tokenization of source text
//! - `parser`: Building the AST from tokens
//! - `error`: Error values and diagnostics
//! - `logger`: `tracing` subscriber setup for the binary
//!
//! ```
//! use exprtree::{lex, parse, Node, BinaryOp};
//!
//! let tokens = lex("11 + 13").unwrap();
//! let tree = parse(&tokens).unwrap();
//! assert_eq!(
//!     tree.children,
//!     vec![Node::binary(Node::integer(11), BinaryOp::Add, Node::integer(13))]
//! );
//! ```

pub mod error;
pub mod lexer;
pub mod logger;
pub mod parser;

// Re-export commonly used types
pub use error::{Diagnostic, ExprError, ExprResult, Feature, Position, Problem};
pub use lexer::{lex, Lexer, Token, TokenKind, TokenValue};
pub use parser::{parse, BinaryOp, Block, LiteralValue, Node, Parser};

/// Version of exprtree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lex and parse `source` into a root block
///
/// The first error from either stage is returned as-is.
pub fn parse_source(source: &str) -> ExprResult<Block> {
    let tokens = lex(source)?;
    parse(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_source_surfaces_lexer_errors() {
        let err = parse_source("(1 + [2])").unwrap_err();
        assert!(err.is_unimplemented());
    }
}
