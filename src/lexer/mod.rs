//! Lexical analysis module
//!
//! This module turns arithmetic source text into positioned tokens.

pub mod token;
pub mod scanner;

pub use token::{Token, TokenKind, TokenValue};
pub use scanner::{lex, Lexer};
