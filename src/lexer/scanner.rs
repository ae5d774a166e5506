//! Lexer/Scanner implementation
//!
//! Scans source text left to right and emits a flat list of tokens.
//! Whitespace and newlines never become tokens but still move the position.

use tracing::{debug, trace};

use super::token::{Token, TokenKind};
use crate::error::{ExprError, ExprResult, Feature, Position, Problem};

/// Lexer for arithmetic source text
pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    position: Position,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            position: Position::default(),
        }
    }

    /// Tokenize the source code
    ///
    /// Calling this again starts over from the beginning of the source.
    pub fn tokenize(&mut self) -> ExprResult<Vec<Token>> {
        self.position = Position::default();
        self.tokens.clear();

        while !self.is_at_end() {
            self.scan_token()?;
        }

        debug!(tokens = self.tokens.len(), chars = self.source.len(), "lexed source");
        Ok(std::mem::take(&mut self.tokens))
    }

    /// Scan a single character category
    fn scan_token(&mut self) -> ExprResult<()> {
        let c = self.peek();

        match c {
            ' ' => {
                self.advance();
                Ok(())
            }

            '\n' | '\r' => {
                self.position.row += 1;
                self.advance();
                self.position.col = 0;
                Ok(())
            }

            '+' | '-' | '/' | '*' | '%' => {
                self.add_token(Token::operator(c, self.position));
                self.advance();
                Ok(())
            }

            c if c.is_ascii_digit() => self.scan_number(),

            c if c.is_ascii_alphabetic() || c == '_' => {
                Err(ExprError::unimplemented(Feature::Identifier, self.position))
            }

            '\'' | '"' => Err(ExprError::unimplemented(Feature::StringLiteral, self.position)),

            '(' => {
                self.add_token(Token::bare(TokenKind::LeftParen, self.position));
                self.advance();
                Ok(())
            }

            ')' => {
                self.add_token(Token::bare(TokenKind::RightParen, self.position));
                self.advance();
                Ok(())
            }

            '{' | '}' | '[' | ']' => Err(ExprError::unimplemented(Feature::Bracket, self.position)),

            _ => Err(ExprError::malformed(Problem::UnrecognizedCharacter(c), self.position)),
        }
    }

    /// Scan a maximal run of digits
    ///
    /// The token is stamped with the position after the run, not its start.
    fn scan_number(&mut self) -> ExprResult<()> {
        let start = self.position.cursor;
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }

        let digits: String = self.source[start..self.position.cursor].iter().collect();
        let value = digits
            .parse::<i64>()
            .map_err(|_| ExprError::malformed(Problem::IntegerOutOfRange(digits.clone()), self.position))?;

        self.add_token(Token::integer(value, self.position));
        Ok(())
    }

    fn add_token(&mut self, token: Token) {
        trace!(kind = %token.kind, position = %token.position, "token");
        self.tokens.push(token);
    }

    fn advance(&mut self) {
        self.position.cursor += 1;
        self.position.col += 1;
    }

    fn peek(&self) -> char {
        self.source[self.position.cursor]
    }

    fn is_at_end(&self) -> bool {
        self.position.cursor >= self.source.len()
    }
}

/// Tokenize `source` in one call
pub fn lex(source: &str) -> ExprResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}
