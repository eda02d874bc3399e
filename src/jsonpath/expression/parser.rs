//! Precedence-climbing parser for expressions.

use super::{BinaryOp, Expression};
use crate::jsonpath::ast::JsonPath;
use crate::jsonpath::error::JsonPathError;
use crate::jsonpath::parser::Parser;

/// Two-character operators come first so `<=` is not read as `<`.
const OPERATORS: &[(&str, BinaryOp)] = &[
    ("||", BinaryOp::Or),
    ("&&", BinaryOp::And),
    ("==", BinaryOp::Equal),
    ("!=", BinaryOp::NotEqual),
    ("<=", BinaryOp::LessEqual),
    (">=", BinaryOp::GreaterEqual),
    ("<", BinaryOp::Less),
    (">", BinaryOp::Greater),
    ("+", BinaryOp::Add),
    ("-", BinaryOp::Subtract),
    ("*", BinaryOp::Multiply),
    ("/", BinaryOp::Divide),
    ("%", BinaryOp::Modulo),
    ("^", BinaryOp::Power),
];

impl Parser<'_> {
    /// Parses an expression up to the first token that cannot continue it.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, JsonPathError> {
        self.parse_binary(BinaryOp::Or.precedence())
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression, JsonPathError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            let Some((symbol, op)) = self.peek_operator() else {
                break;
            };
            if op.precedence() < min_precedence {
                break;
            }
            self.advance(symbol.len());

            let next_min = if op.is_right_associative() {
                op.precedence()
            } else {
                op.precedence() + 1
            };
            let right = self.parse_binary(next_min)?;
            left = Expression::binary(op, left, right);
        }
        Ok(left)
    }

    fn peek_operator(&self) -> Option<(&'static str, BinaryOp)> {
        OPERATORS
            .iter()
            .find(|(symbol, _)| self.starts_with(symbol))
            .copied()
    }

    fn parse_unary(&mut self) -> Result<Expression, JsonPathError> {
        self.skip_whitespace();
        match self.peek() {
            Some('!') if !self.starts_with("!=") => {
                self.next();
                Ok(Expression::Not(Box::new(self.parse_unary()?)))
            }
            Some('-') if !self.byte_at(1).map(|b| b.is_ascii_digit()).unwrap_or(false) => {
                self.next();
                Ok(Expression::Negate(Box::new(self.parse_unary()?)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, JsonPathError> {
        match self.peek() {
            Some('(') => {
                self.next();
                let expression = self.parse_expression()?;
                self.expect(')')?;
                Ok(expression)
            }
            Some('$' | '@') => {
                let mut path = JsonPath::default();
                self.parse_path(&mut path, true)?;
                Ok(Expression::Path(path))
            }
            Some('\'' | '"') => Ok(Expression::String(self.parse_quoted()?)),
            Some('-' | '0'..='9') => Ok(Expression::Number(self.parse_number()?)),
            _ if self.at_keyword("true") => {
                self.advance(4);
                Ok(Expression::Boolean(true))
            }
            _ if self.at_keyword("false") => {
                self.advance(5);
                Ok(Expression::Boolean(false))
            }
            _ if self.at_keyword("null") => {
                self.advance(4);
                Ok(Expression::Null)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}
