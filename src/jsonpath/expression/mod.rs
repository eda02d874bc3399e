//! The expression sub-language used inside `[?(...)]`, `[(...)]` and
//! `.indexOf(...)`.
//!
//! Expressions combine literals, sub-paths rooted at `@` (the value under test)
//! or `$` (the document), comparison, boolean and arithmetic operators.
//!
//! # Precedence
//!
//! From loosest to tightest: `||`, `&&`, `==` `!=`, `<` `<=` `>` `>=`,
//! `+` `-`, `*` `/` `%`, `^` (right associative), unary `!` and `-`.

mod eval;
mod parser;

use std::fmt;

use super::ast::{write_quoted, JsonPath};

pub use eval::is_truthy;

/// A parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    /// A sub-path such as `@.price` or `$.limits.max`
    Path(JsonPath),
    /// `!expr`
    Not(Box<Expression>),
    /// `-expr`
    Negate(Box<Expression>),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

/// Binary operators, loosest binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    /// Binding strength; larger binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Equal | BinaryOp::NotEqual => 3,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => 4,
            BinaryOp::Add | BinaryOp::Subtract => 5,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 6,
            BinaryOp::Power => 7,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Power)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "^",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Expression {
    pub fn path(path: JsonPath) -> Self {
        Expression::Path(path)
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expression) -> Self {
        Expression::Not(Box::new(operand))
    }

    fn precedence(&self) -> Option<u8> {
        match self {
            Expression::Binary { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }
}

/// Writes `child` wrapped in parentheses when printing it bare would regroup it.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    child: &Expression,
    parent: BinaryOp,
    right_side: bool,
) -> fmt::Result {
    let needs_parens = match child.precedence() {
        Some(p) if p < parent.precedence() => true,
        Some(p) if p == parent.precedence() => right_side != parent.is_right_associative(),
        _ => false,
    };
    if needs_parens {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

fn write_unary(f: &mut fmt::Formatter<'_>, symbol: &str, operand: &Expression) -> fmt::Result {
    match operand {
        Expression::Binary { .. } | Expression::Number(_) => write!(f, "{}({})", symbol, operand),
        _ => write!(f, "{}{}", symbol, operand),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::String(s) => write_quoted(f, s, '"'),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::Null => f.write_str("null"),
            Expression::Path(path) => write!(f, "{}", path),
            Expression::Not(operand) => write_unary(f, "!", operand),
            Expression::Negate(operand) => write_unary(f, "-", operand),
            Expression::Binary { op, left, right } => {
                write_operand(f, left, *op, false)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, *op, true)
            }
        }
    }
}
