//! Token definitions
//!
//! Tokens are produced once by the lexer and only ever read afterwards.

use serde::Serialize;
use std::fmt;

use crate::error::Position;

/// A positioned token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<TokenValue>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, position: Position, value: Option<TokenValue>) -> Self {
        Self {
            kind,
            position,
            value,
        }
    }

    pub fn integer(value: i64, position: Position) -> Self {
        Self::new(TokenKind::Integer, position, Some(TokenValue::Integer(value)))
    }

    pub fn operator(symbol: char, position: Position) -> Self {
        Self::new(TokenKind::Operator, position, Some(TokenValue::Symbol(symbol)))
    }

    /// A token that carries no value, such as a parenthesis
    pub fn bare(kind: TokenKind, position: Position) -> Self {
        Self::new(kind, position, None)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Integer,
    String,
    Identifier,
    Operator,
    LeftParen,
    RightParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::String => write!(f, "string"),
            Self::Identifier => write!(f, "identifier"),
            Self::Operator => write!(f, "operator"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
        }
    }
}

/// Payload carried by integer, operator, string and identifier tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Integer(i64),
    Symbol(char),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Symbol(c) => write!(f, "{}", c),
            Self::Text(s) => write!(f, "{:?}", s),
        }
    }
}
