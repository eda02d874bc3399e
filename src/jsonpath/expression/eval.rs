//! Expression evaluation.
//!
//! Every expression yields either a value or nothing. "Nothing" comes from a
//! sub-path with no matches or from an operator applied to operands it has no
//! meaning for, and it is falsy wherever a boolean is needed.

use std::borrow::Cow;
use std::cmp::Ordering;

use super::{BinaryOp, Expression};
use crate::document::JsonValue;
use crate::jsonpath::ast::PathRoot;

impl Expression {
    /// Evaluates against `current` (what `@` refers to) and `root` (what `$`
    /// refers to).
    ///
    /// A sub-path with a single match yields that value, several matches yield
    /// an array of them and no match yields `None`.
    pub fn evaluate<'a>(
        &self,
        current: &'a JsonValue,
        root: &'a JsonValue,
    ) -> Option<Cow<'a, JsonValue>> {
        match self {
            Expression::Number(n) => Some(Cow::Owned(JsonValue::Number(*n))),
            Expression::String(s) => Some(Cow::Owned(JsonValue::String(s.clone()))),
            Expression::Boolean(b) => Some(Cow::Owned(JsonValue::Boolean(*b))),
            Expression::Null => Some(Cow::Owned(JsonValue::Null)),
            Expression::Path(path) => {
                let start = match path.root {
                    PathRoot::Document => root,
                    PathRoot::Current => current,
                };
                let mut matches = path.select_from(start, root);
                match matches.len() {
                    0 => None,
                    1 => matches.pop(),
                    _ => Some(Cow::Owned(JsonValue::Array(
                        matches.into_iter().map(Cow::into_owned).collect(),
                    ))),
                }
            }
            Expression::Not(operand) => {
                let value = operand.evaluate(current, root);
                Some(boolean(!is_truthy(value.as_deref())))
            }
            Expression::Negate(operand) => match &*operand.evaluate(current, root)? {
                JsonValue::Number(n) => Some(Cow::Owned(JsonValue::Number(-n))),
                _ => None,
            },
            Expression::Binary { op, left, right } => {
                evaluate_binary(*op, left, right, current, root)
            }
        }
    }

    /// Evaluates the expression as a filter predicate.
    pub fn is_satisfied_by(&self, current: &JsonValue, root: &JsonValue) -> bool {
        is_truthy(self.evaluate(current, root).as_deref())
    }
}

/// Missing, `null` and `false` are false; every other value is true.
pub fn is_truthy(value: Option<&JsonValue>) -> bool {
    !matches!(value, None | Some(JsonValue::Null) | Some(JsonValue::Boolean(false)))
}

fn boolean<'a>(value: bool) -> Cow<'a, JsonValue> {
    Cow::Owned(JsonValue::Boolean(value))
}

fn evaluate_binary<'a>(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    current: &'a JsonValue,
    root: &'a JsonValue,
) -> Option<Cow<'a, JsonValue>> {
    let truthy = |expression: &Expression| is_truthy(expression.evaluate(current, root).as_deref());
    match op {
        BinaryOp::Or => return Some(boolean(truthy(left) || truthy(right))),
        BinaryOp::And => return Some(boolean(truthy(left) && truthy(right))),
        _ => {}
    }

    let left = left.evaluate(current, root);
    let right = right.evaluate(current, root);
    let (left, right) = (left.as_deref(), right.as_deref());

    match op {
        BinaryOp::Equal => Some(boolean(left == right)),
        BinaryOp::NotEqual => Some(boolean(left != right)),
        BinaryOp::Less => Some(boolean(compare(left, right) == Some(Ordering::Less))),
        BinaryOp::LessEqual => Some(boolean(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::Greater => Some(boolean(compare(left, right) == Some(Ordering::Greater))),
        BinaryOp::GreaterEqual => Some(boolean(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        _ => arithmetic(op, left?, right?).map(Cow::Owned),
    }
}

/// Numbers compare numerically and strings lexicographically. Anything else is
/// unordered, so every ordering comparison on it is false.
fn compare(left: Option<&JsonValue>, right: Option<&JsonValue>) -> Option<Ordering> {
    match (left?, right?) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a.partial_cmp(b),
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn arithmetic(op: BinaryOp, left: &JsonValue, right: &JsonValue) -> Option<JsonValue> {
    match (left, right) {
        (JsonValue::Number(a), JsonValue::Number(b)) => {
            let (a, b) = (*a, *b);
            let result = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Subtract => a - b,
                BinaryOp::Multiply => a * b,
                BinaryOp::Divide => a / b,
                BinaryOp::Modulo => a % b,
                BinaryOp::Power => a.powf(b),
                _ => return None,
            };
            Some(JsonValue::Number(result))
        }
        (JsonValue::String(a), JsonValue::String(b)) if op == BinaryOp::Add => {
            Some(JsonValue::String(format!("{}{}", a, b)))
        }
        _ => None,
    }
}
