//! Parser implementation
//!
//! A single forward cursor walks the tokens. There is no precedence table:
//! an operator pops the previous sibling out of the block currently being
//! built and uses it as its left operand, so `1 + 5 / 2` groups as
//! `(1 + 5) / 2`. Only parentheses change that.
//!
//! After every top-level or grouped expression the caller advances one
//! more token, on top of whatever the expression itself consumed.

use tracing::debug;

use super::ast::{BinaryOp, Block, LiteralValue, Node};
use crate::error::{ExprError, ExprResult, Feature, Problem};
use crate::lexer::{Token, TokenKind, TokenValue};

/// Parser over a borrowed token sequence
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser from tokens
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse tokens into a root block
    pub fn parse(&mut self) -> ExprResult<Block> {
        self.current = 0;
        let mut root = Block::default();

        while !self.is_at_end() {
            let node = self.parse_expression(&mut root.children)?;
            root.children.push(node);
            self.advance();
        }

        debug!(tokens = self.tokens.len(), children = root.children.len(), "parsed tokens");
        Ok(root)
    }

    /// Parse one expression starting at the current token
    ///
    /// `scope` is the node list of the block under construction; operators
    /// take their left operand from its tail.
    fn parse_expression(&mut self, scope: &mut Vec<Node>) -> ExprResult<Node> {
        let token = self
            .peek()
            .ok_or_else(|| ExprError::malformed_at_end(Problem::UnexpectedEndOfInput))?;

        match token.kind {
            TokenKind::Integer | TokenKind::String => self.literal(token),

            TokenKind::Identifier => Err(ExprError::unimplemented(Feature::Identifier, token.position)),

            TokenKind::Operator => self.binary(token, scope),

            TokenKind::LeftParen => self.grouped(token),

            TokenKind::RightParen => Err(ExprError::malformed(Problem::UnexpectedRightParen, token.position)),
        }
    }

    /// Literals leave the cursor on their own token
    fn literal(&self, token: &Token) -> ExprResult<Node> {
        let value = match (&token.kind, &token.value) {
            (TokenKind::Integer, Some(TokenValue::Integer(n))) => LiteralValue::Integer(*n),
            (TokenKind::String, Some(TokenValue::Text(s))) => LiteralValue::String(s.clone()),
            _ => return Err(ExprError::malformed(Problem::UnexpectedToken(token.kind), token.position)),
        };
        Ok(Node::Literal { value })
    }

    fn binary(&mut self, token: &Token, scope: &mut Vec<Node>) -> ExprResult<Node> {
        let operator = match token.value {
            Some(TokenValue::Symbol(symbol)) => BinaryOp::from_symbol(symbol),
            _ => None,
        }
        .ok_or_else(|| ExprError::malformed(Problem::UnexpectedToken(token.kind), token.position))?;
        self.advance();

        let left = scope
            .pop()
            .ok_or_else(|| ExprError::malformed(Problem::MissingLeftOperand, token.position))?;
        let right = self.parse_expression(scope)?;

        Ok(Node::binary(left, operator, right))
    }

    /// The closing paren is left under the cursor for the caller to step over
    fn grouped(&mut self, open: &Token) -> ExprResult<Node> {
        self.advance();
        let mut inner = Block::default();

        loop {
            match self.peek() {
                None => return Err(ExprError::malformed(Problem::MissingClosingParen, open.position)),
                Some(token) if token.kind == TokenKind::RightParen => break,
                Some(_) => {}
            }
            let node = self.parse_expression(&mut inner.children)?;
            inner.children.push(node);
            self.advance();
        }

        Ok(Node::GroupedExpression { inner })
    }

    fn advance(&mut self) {
        self.current += 1;
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }
}

/// Parse a token sequence in one call
pub fn parse(tokens: &[Token]) -> ExprResult<Block> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Position;
    use crate::lexer::lex;

    fn parse_source(source: &str) -> ExprResult<Block> {
        parse(&lex(source)?)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(&[]).unwrap(), Block::default());
    }

    #[test]
    fn test_literals() {
        let block = parse_source("1 2 3").unwrap();
        assert_eq!(
            block.children,
            vec![Node::integer(1), Node::integer(2), Node::integer(3)]
        );
    }

    #[test]
    fn test_string_token_becomes_literal() {
        let tokens = vec![Token::new(
            TokenKind::String,
            Position::default(),
            Some(TokenValue::Text("abc".to_string())),
        )];
        let block = parse(&tokens).unwrap();
        assert_eq!(
            block.children,
            vec![Node::Literal {
                value: LiteralValue::String("abc".to_string())
            }]
        );
    }

    #[test]
    fn test_simple_binary() {
        let block = parse_source("11 + 13").unwrap();
        assert_eq!(
            block.children,
            vec![Node::binary(Node::integer(11), BinaryOp::Add, Node::integer(13))]
        );
    }

    #[test]
    fn test_operators_chain_left_to_right() {
        // No precedence: the multiplication wraps the finished addition.
        let block = parse_source("1 + 2 * 3").unwrap();
        assert_eq!(
            block.children,
            vec![Node::binary(
                Node::binary(Node::integer(1), BinaryOp::Add, Node::integer(2)),
                BinaryOp::Multiply,
                Node::integer(3),
            )]
        );
    }

    #[test]
    fn test_operator_pops_only_the_last_sibling() {
        let block = parse_source("1 2 - 3").unwrap();
        assert_eq!(
            block.children,
            vec![
                Node::integer(1),
                Node::binary(Node::integer(2), BinaryOp::Subtract, Node::integer(3)),
            ]
        );
    }

    #[test]
    fn test_operator_as_right_operand_pops_again() {
        let block = parse_source("1 2 + % 3").unwrap();
        assert_eq!(
            block.children,
            vec![Node::binary(
                Node::integer(2),
                BinaryOp::Add,
                Node::binary(Node::integer(1), BinaryOp::Modulo, Node::integer(3)),
            )]
        );
    }

    #[test]
    fn test_grouping_changes_evaluation_order() {
        let block = parse_source("1 + (2 * 3)").unwrap();
        assert_eq!(
            block.children,
            vec![Node::binary(
                Node::integer(1),
                BinaryOp::Add,
                Node::grouped(vec![Node::binary(Node::integer(2), BinaryOp::Multiply, Node::integer(3))]),
            )]
        );
    }

    #[test]
    fn test_operator_inside_group_cannot_reach_outer_block() {
        let err = parse_source("1 (+ 2)").unwrap_err();
        assert_eq!(err, ExprError::malformed(Problem::MissingLeftOperand, Position::new(3, 0, 3)));
    }

    #[test]
    fn test_empty_and_nested_groups() {
        let block = parse_source("() ((4))").unwrap();
        assert_eq!(
            block.children,
            vec![
                Node::grouped(vec![]),
                Node::grouped(vec![Node::grouped(vec![Node::integer(4)])]),
            ]
        );
    }

    #[test]
    fn test_missing_left_operand() {
        let err = parse_source("% 2").unwrap_err();
        assert_eq!(err, ExprError::malformed(Problem::MissingLeftOperand, Position::new(0, 0, 0)));
    }

    #[test]
    fn test_missing_right_operand() {
        let err = parse_source("1 +").unwrap_err();
        assert_eq!(err, ExprError::malformed_at_end(Problem::UnexpectedEndOfInput));

        let err = parse_source("(1 +)").unwrap_err();
        assert_eq!(err.problem(), Some(&Problem::UnexpectedRightParen));
    }

    #[test]
    fn test_unmatched_left_paren() {
        let err = parse_source("  (1 + 2").unwrap_err();
        assert_eq!(err, ExprError::malformed(Problem::MissingClosingParen, Position::new(2, 0, 2)));
    }

    #[test]
    fn test_leading_right_paren() {
        let err = parse_source(")").unwrap_err();
        assert_eq!(err, ExprError::malformed(Problem::UnexpectedRightParen, Position::new(0, 0, 0)));
        assert_eq!(parse_source("1)").unwrap_err().problem(), Some(&Problem::UnexpectedRightParen));
    }

    #[test]
    fn test_identifier_token_is_unimplemented() {
        let tokens = vec![Token::new(
            TokenKind::Identifier,
            Position::new(4, 0, 4),
            Some(TokenValue::Text("x".to_string())),
        )];
        assert_eq!(
            parse(&tokens).unwrap_err(),
            ExprError::unimplemented(Feature::Identifier, Position::new(4, 0, 4))
        );
    }

    #[test]
    fn test_token_without_value_is_rejected() {
        let tokens = vec![Token::bare(TokenKind::Integer, Position::default())];
        assert_eq!(
            parse(&tokens).unwrap_err().problem(),
            Some(&Problem::UnexpectedToken(TokenKind::Integer))
        );

        let tokens = vec![
            Token::integer(1, Position::new(1, 0, 1)),
            Token::operator('^', Position::new(2, 0, 2)),
        ];
        assert_eq!(
            parse(&tokens).unwrap_err().problem(),
            Some(&Problem::UnexpectedToken(TokenKind::Operator))
        );
    }

    #[test]
    fn test_parser_is_reusable() {
        let tokens = lex("(1 + 5 / 2)").unwrap();
        let mut parser = Parser::new(&tokens);
        let first = parser.parse().unwrap();
        let second = parser.parse().unwrap();
        assert_eq!(first, second);
    }
}
