//! Error handling and diagnostics for exprtree
//!
//! Lexing and parsing are fail-fast: the first fault aborts the pass and is
//! returned as an [`ExprError`]. Callers can tell a missing feature apart from
//! bad input by matching on the variant.

use std::fmt;

use serde::Serialize;

use crate::lexer::TokenKind;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for exprtree operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Snapshot of the scanner position when a token was emitted
///
/// All fields are 0-based. `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub cursor: usize,
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(cursor: usize, row: usize, col: usize) -> Self {
        Self { cursor, row, col }
    }

    /// Format as `file:row:col`
    pub fn format(&self, file: &str) -> String {
        format!("{}:{}:{}", file, self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Language features that are reserved but not supported yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Identifier,
    StringLiteral,
    Bracket,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifiers"),
            Self::StringLiteral => write!(f, "string literals"),
            Self::Bracket => write!(f, "brackets"),
        }
    }
}

/// Ways the input can be malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    UnrecognizedCharacter(char),
    /// Digit run that does not fit an `i64`
    IntegerOutOfRange(String),
    MissingLeftOperand,
    MissingClosingParen,
    UnexpectedRightParen,
    UnexpectedToken(TokenKind),
    UnexpectedEndOfInput,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCharacter(c) => write!(f, "unrecognized character {:?}", c),
            Self::IntegerOutOfRange(digits) => write!(f, "integer literal '{}' is out of range", digits),
            Self::MissingLeftOperand => write!(f, "operator has no left-hand operand"),
            Self::MissingClosingParen => write!(f, "missing closing parenthesis"),
            Self::UnexpectedRightParen => write!(f, "unexpected right parenthesis"),
            Self::UnexpectedToken(kind) => write!(f, "unexpected {} token", kind),
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
        }
    }
}

/// Main error type for exprtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// The input uses a reserved construct that has no implementation
    Unimplemented {
        feature: Feature,
        location: Option<Position>,
    },
    /// The input can never form a valid tree
    Malformed {
        problem: Problem,
        location: Option<Position>,
    },
}

impl ExprError {
    /// Create a new unimplemented-feature error
    pub fn unimplemented(feature: Feature, location: Position) -> Self {
        Self::Unimplemented {
            feature,
            location: Some(location),
        }
    }

    /// Create a new malformed-input error
    pub fn malformed(problem: Problem, location: Position) -> Self {
        Self::Malformed {
            problem,
            location: Some(location),
        }
    }

    /// Create a malformed-input error that has no position to point at
    pub fn malformed_at_end(problem: Problem) -> Self {
        Self::Malformed {
            problem,
            location: None,
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::Unimplemented { .. } => "Unimplemented",
            Self::Malformed { .. } => "Malformed Input",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Unimplemented { feature, .. } => format!("{} are not implemented", feature),
            Self::Malformed { problem, .. } => problem.to_string(),
        }
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&Position> {
        match self {
            Self::Unimplemented { location, .. } | Self::Malformed { location, .. } => {
                location.as_ref()
            }
        }
    }

    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }

    /// The malformed-input problem, if this is one
    pub fn problem(&self) -> Option<&Problem> {
        match self {
            Self::Malformed { problem, .. } => Some(problem),
            Self::Unimplemented { .. } => None,
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(f, "{}: {} at {}", self.kind(), self.message(), location)
        } else {
            write!(f, "{}: {}", self.kind(), self.message())
        }
    }
}

impl std::error::Error for ExprError {}
