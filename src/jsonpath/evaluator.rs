use std::borrow::Cow;

use super::ast::{ArrayQuery, JsonPath, Operator, SearchParameter, Slice};
use crate::document::JsonValue;

/// A match is usually borrowed from the document. `.length`, `..length` and
/// `.indexOf()` produce numbers that exist nowhere in it.
pub type Match<'a> = Cow<'a, JsonValue>;

pub struct Evaluator<'a> {
    root: &'a JsonValue,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Evaluator { root }
    }

    /// Evaluates `path` from the document root.
    pub fn evaluate(&self, path: &JsonPath) -> Vec<Match<'a>> {
        self.evaluate_from(self.root, &path.operators)
    }

    /// Applies each operator in turn to the match array, starting from
    /// `start` alone.
    pub fn evaluate_from(&self, start: &'a JsonValue, operators: &[Operator]) -> Vec<Match<'a>> {
        let mut current = vec![Cow::Borrowed(start)];
        for operator in operators {
            if current.is_empty() {
                break;
            }
            current = self.apply(operator, current);
        }
        current
    }

    fn apply(&self, operator: &Operator, current: Vec<Match<'a>>) -> Vec<Match<'a>> {
        match operator {
            Operator::Name(name) => current
                .iter()
                .filter_map(document_node)
                .filter_map(|value| value.as_object()?.get(name))
                .map(Cow::Borrowed)
                .collect(),
            Operator::Wildcard => current
                .iter()
                .filter_map(document_node)
                .flat_map(JsonValue::children)
                .map(Cow::Borrowed)
                .collect(),
            Operator::Array(query) => current
                .iter()
                .filter_map(document_node)
                .flat_map(|value| self.query_container(query, value))
                .map(Cow::Borrowed)
                .collect(),
            Operator::Search(parameter) => {
                let mut found = Vec::new();
                for value in current.iter().filter_map(document_node) {
                    self.search(parameter, value, &mut found);
                }
                found
            }
            Operator::Length => current
                .iter()
                .filter_map(|hit| match &**hit {
                    JsonValue::Array(items) => Some(number(items.len() as f64)),
                    _ => None,
                })
                .collect(),
            Operator::IndexOf(expression) => {
                let matches: JsonValue = current.iter().map(|hit| (**hit).clone()).collect();
                let target = expression
                    .evaluate(&matches, self.root)
                    .map(Cow::into_owned);
                current
                    .iter()
                    .filter_map(|hit| hit.as_array())
                    .map(|items| {
                        let position = target
                            .as_ref()
                            .and_then(|target| items.iter().position(|item| item == target));
                        number(position.map_or(-1.0, |index| index as f64))
                    })
                    .collect()
            }
        }
    }

    /// Applies an array query to the elements of an array, or to the member
    /// values of an object.
    fn query_container(&self, query: &ArrayQuery, container: &'a JsonValue) -> Vec<&'a JsonValue> {
        match container {
            JsonValue::Array(items) => self.query(query, items.iter().collect(), container),
            JsonValue::Object(map) => {
                let values: Vec<&'a JsonValue> = map.values().collect();
                match query {
                    // Index expressions see the member values as an array.
                    ArrayQuery::Index(_) => {
                        let projected: JsonValue = values.iter().map(|v| (*v).clone()).collect();
                        let index = self.index_for(query, &projected);
                        index.and_then(|i| values.get(i).copied()).into_iter().collect()
                    }
                    _ => self.query(query, values, container),
                }
            }
            _ => Vec::new(),
        }
    }

    fn query(
        &self,
        query: &ArrayQuery,
        elements: Vec<&'a JsonValue>,
        container: &'a JsonValue,
    ) -> Vec<&'a JsonValue> {
        match query {
            ArrayQuery::Slices(slices) => slices
                .iter()
                .flat_map(|slice| slice.indices(elements.len()))
                .map(|index| elements[index])
                .collect(),
            ArrayQuery::Wildcard => elements,
            ArrayQuery::Filter(expression) => elements
                .into_iter()
                .filter(|element| expression.is_satisfied_by(element, self.root))
                .collect(),
            ArrayQuery::Index(_) => self
                .index_for(query, container)
                .and_then(|index| elements.get(index).copied())
                .into_iter()
                .collect(),
        }
    }

    /// Evaluates an index expression with `@` bound to `subject`. Only a
    /// non-negative integral number selects anything.
    fn index_for(&self, query: &ArrayQuery, subject: &JsonValue) -> Option<usize> {
        let ArrayQuery::Index(expression) = query else {
            return None;
        };
        match &*expression.evaluate(subject, self.root)? {
            JsonValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
            _ => None,
        }
    }

    /// Collects matches at `value` and then at every descendant, depth first
    /// in document order.
    fn search(&self, parameter: &SearchParameter, value: &'a JsonValue, found: &mut Vec<Match<'a>>) {
        match parameter {
            SearchParameter::Name(name) => {
                if let Some(child) = value.as_object().and_then(|map| map.get(name)) {
                    found.push(Cow::Borrowed(child));
                }
            }
            SearchParameter::Wildcard => {
                found.extend(value.children().into_iter().map(Cow::Borrowed));
            }
            SearchParameter::Array(query) => {
                if value.is_array() {
                    found.extend(
                        self.query_container(query, value)
                            .into_iter()
                            .map(Cow::Borrowed),
                    );
                }
            }
            // Unlike `.length`, every child counts: non-arrays as 1.
            SearchParameter::Length => {
                found.extend(value.children().into_iter().map(|child| match child {
                    JsonValue::Array(items) => number(items.len() as f64),
                    _ => number(1.0),
                }));
            }
        }

        for child in value.children() {
            self.search(parameter, child, found);
        }
    }
}

/// Only values that live in the document can be navigated into.
fn document_node<'a>(hit: &Match<'a>) -> Option<&'a JsonValue> {
    match hit {
        Cow::Borrowed(value) => Some(*value),
        Cow::Owned(_) => None,
    }
}

fn number<'a>(n: f64) -> Match<'a> {
    Cow::Owned(JsonValue::Number(n))
}

impl Slice {
    /// Resolves this slice against an array of `len` elements, in selection
    /// order. Out of range positions are dropped and a zero step selects
    /// nothing.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let len = len as i64;
        let resolve = |i: i64| if i < 0 { i + len } else { i };

        match *self {
            Slice::Index(index) => {
                let index = resolve(index);
                if (0..len).contains(&index) {
                    vec![index as usize]
                } else {
                    Vec::new()
                }
            }
            Slice::Range { start, end, step } => {
                let step = step.unwrap_or(1);
                let mut indices = Vec::new();
                if step > 0 {
                    let mut i = start.map_or(0, |s| resolve(s).clamp(0, len));
                    let end = end.map_or(len, |e| resolve(e).clamp(0, len));
                    while i < end {
                        indices.push(i as usize);
                        match i.checked_add(step) {
                            Some(next) => i = next,
                            None => break,
                        }
                    }
                } else if step < 0 {
                    let mut i = start.map_or(len - 1, |s| resolve(s).clamp(-1, len - 1));
                    let end = end.map_or(-1, |e| resolve(e).clamp(-1, len - 1));
                    while i > end {
                        indices.push(i as usize);
                        match i.checked_add(step) {
                            Some(next) => i = next,
                            None => break,
                        }
                    }
                }
                indices
            }
        }
    }
}

impl JsonPath {
    /// Evaluates this path against `root`, borrowing matches from the document
    /// where possible.
    pub fn select<'a>(&self, root: &'a JsonValue) -> Vec<Match<'a>> {
        let matches = Evaluator::new(root).evaluate(self);
        tracing::trace!(path = %self, matches = matches.len(), "evaluated JSONPath");
        matches
    }

    /// Evaluates this path against `root` and returns copies of the matches.
    ///
    /// A path rooted at `@` starts from `root` here.
    pub fn evaluate(&self, root: &JsonValue) -> Vec<JsonValue> {
        self.select(root).into_iter().map(Cow::into_owned).collect()
    }

    /// Evaluates this path from `start` with `$` bound to `root`.
    pub(crate) fn select_from<'a>(&self, start: &'a JsonValue, root: &'a JsonValue) -> Vec<Match<'a>> {
        Evaluator::new(root).evaluate_from(start, &self.operators)
    }
}
