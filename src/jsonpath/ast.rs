//! Abstract syntax tree types for JSONPath expressions.
//!
//! Every type here prints back to valid path source through `Display`, so a
//! parsed path can be stored as text and parsed again to an equal value.

use std::fmt;

use super::expression::Expression;

/// What a path starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathRoot {
    /// `$` - the document root
    #[default]
    Document,
    /// `@` - the value currently under test in a filter or index expression
    Current,
}

/// A complete JSONPath expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonPath {
    /// The `$` or `@` the path starts from.
    pub root: PathRoot,
    /// Operators applied in order to the match array.
    pub operators: Vec<Operator>,
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// `.name` or `['name']`
    Name(String),
    /// `.*`
    Wildcard,
    /// `[...]` - slices, `*`, filter or index expression
    Array(ArrayQuery),
    /// `..name`, `..*`, `..[...]`, `..length`
    Search(SearchParameter),
    /// `.length`
    Length,
    /// `.indexOf(expr)`
    IndexOf(Expression),
}

/// Selects elements out of one array.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayQuery {
    /// `[1]`, `[1:3]`, `[0,2,-1]` - results of each slice are concatenated
    Slices(Vec<Slice>),
    /// `[*]`
    Wildcard,
    /// `[?(expr)]` - elements for which `expr` is truthy
    Filter(Expression),
    /// `[(expr)]` - the element at the computed index
    Index(Expression),
}

/// What a recursive search collects at every level.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParameter {
    Name(String),
    Wildcard,
    Array(ArrayQuery),
    Length,
}

/// An array index or a Python-style `start:end:step` range.
///
/// Negative numbers count from the end of the array and are resolved when the
/// path is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Index(i64),
    Range {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
}

impl JsonPath {
    /// Creates a path with the given root and operators.
    pub fn new(root: PathRoot, operators: Vec<Operator>) -> Self {
        Self { root, operators }
    }

    /// `$`
    pub fn root() -> Self {
        Self::new(PathRoot::Document, Vec::new())
    }

    /// `@`
    pub fn current() -> Self {
        Self::new(PathRoot::Current, Vec::new())
    }

    /// Appends an operator.
    pub fn push(&mut self, operator: Operator) {
        self.operators.push(operator);
    }

    pub fn with(mut self, operator: Operator) -> Self {
        self.push(operator);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.with(Operator::Name(name.into()))
    }

    pub fn wildcard(self) -> Self {
        self.with(Operator::Wildcard)
    }

    pub fn index(self, index: i64) -> Self {
        self.with(Operator::Array(ArrayQuery::Slices(vec![Slice::Index(index)])))
    }

    pub fn slice(self, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Self {
        self.with(Operator::Array(ArrayQuery::Slices(vec![Slice::Range {
            start,
            end,
            step,
        }])))
    }

    pub fn array(self, query: ArrayQuery) -> Self {
        self.with(Operator::Array(query))
    }

    pub fn filter(self, expression: Expression) -> Self {
        self.array(ArrayQuery::Filter(expression))
    }

    pub fn search(self, parameter: SearchParameter) -> Self {
        self.with(Operator::Search(parameter))
    }

    pub fn length(self) -> Self {
        self.with(Operator::Length)
    }

    pub fn index_of(self, expression: Expression) -> Self {
        self.with(Operator::IndexOf(expression))
    }
}

/// Returns true if `name` can be written after a `.` without quoting.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_identifier_byte)
}

pub(crate) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Writes `value` as a quoted string literal with backslash escapes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str, quote: char) -> fmt::Result {
    write!(f, "{}", quote)?;
    for ch in value.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

/// `.name` when possible, `['name']` otherwise. `length` is always quoted so it
/// does not read back as the length operator.
fn write_name(f: &mut fmt::Formatter<'_>, dotted: &str, bracketed: &str, name: &str) -> fmt::Result {
    if is_identifier(name) && name != "length" {
        write!(f, "{}{}", dotted, name)
    } else {
        write!(f, "{}[", bracketed)?;
        write_quoted(f, name, '\'')?;
        f.write_str("]")
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            PathRoot::Document => f.write_str("$")?,
            PathRoot::Current => f.write_str("@")?,
        }
        for operator in &self.operators {
            write!(f, "{}", operator)?;
        }
        Ok(())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Name(name) => write_name(f, ".", "", name),
            Operator::Wildcard => f.write_str(".*"),
            Operator::Array(query) => write!(f, "[{}]", query),
            Operator::Search(parameter) => write!(f, "{}", parameter),
            Operator::Length => f.write_str(".length"),
            Operator::IndexOf(expression) => write!(f, ".indexOf({})", expression),
        }
    }
}

impl fmt::Display for ArrayQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayQuery::Slices(slices) => {
                for (i, slice) in slices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", slice)?;
                }
                Ok(())
            }
            ArrayQuery::Wildcard => f.write_str("*"),
            ArrayQuery::Filter(expression) => write!(f, "?({})", expression),
            ArrayQuery::Index(expression) => write!(f, "({})", expression),
        }
    }
}

impl fmt::Display for SearchParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchParameter::Name(name) => write_name(f, "..", "..", name),
            SearchParameter::Wildcard => f.write_str("..*"),
            SearchParameter::Array(query) => write!(f, "..[{}]", query),
            SearchParameter::Length => f.write_str("..length"),
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slice::Index(index) => write!(f, "{}", index),
            Slice::Range { start, end, step } => {
                if let Some(start) = start {
                    write!(f, "{}", start)?;
                }
                f.write_str(":")?;
                if let Some(end) = end {
                    write!(f, "{}", end)?;
                }
                if let Some(step) = step {
                    write!(f, ":{}", step)?;
                }
                Ok(())
            }
        }
    }
}
