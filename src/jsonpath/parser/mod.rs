//! JSONPath query string parser.
//!
//! Parsing walks the input with a cursor. At each position an ordered table of
//! parser modules is consulted; the first module whose `handles` predicate
//! accepts the lookahead consumes its syntax and appends operators to the path.
//! The table order decides ties, so it is part of the grammar.

mod lexer;
mod modules;

use super::ast::JsonPath;
use super::error::{JsonPathError, PathSyntaxError};
use modules::MODULES;

/// Parser for JSONPath query strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    /// Where the path currently being parsed began. Sub-paths inside
    /// expressions start mid-input.
    path_start: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given query string.
    pub fn new(query: &'a str) -> Self {
        Self {
            input: query,
            position: 0,
            path_start: 0,
        }
    }

    /// Parses the query string into a JsonPath.
    ///
    /// On failure the error carries the operators parsed before the problem.
    pub fn parse(query: &str) -> Result<JsonPath, PathSyntaxError> {
        let mut parser = Parser::new(query);
        let mut path = JsonPath::default();
        match parser.parse_path(&mut path, false) {
            Ok(()) => Ok(path),
            Err(error) => {
                tracing::debug!(query, %error, "JSONPath parse failed");
                Err(PathSyntaxError::new(path, error))
            }
        }
    }

    /// Parses one path starting at the cursor into `path`.
    ///
    /// A top-level path must consume the whole input. A nested path (inside an
    /// expression) ends at the first position no module handles.
    pub(crate) fn parse_path(
        &mut self,
        path: &mut JsonPath,
        nested: bool,
    ) -> Result<(), JsonPathError> {
        let saved = self.path_start;
        self.path_start = self.position;
        let result = self.parse_operators(path, nested);
        self.path_start = saved;
        result
    }

    fn parse_operators(&mut self, path: &mut JsonPath, nested: bool) -> Result<(), JsonPathError> {
        if !matches!(self.peek(), Some('$') | Some('@')) {
            return Err(self.unexpected("'$' or '@'"));
        }

        while !self.is_eof() {
            match MODULES.iter().find(|module| (module.handles)(self)) {
                Some(module) => {
                    tracing::trace!(module = module.name, position = self.position, "parser module");
                    (module.parse)(self, path)?;
                }
                None if nested => break,
                None => return Err(self.unexpected("a path operator")),
            }
        }
        Ok(())
    }

    /// Returns true at the first character of the path being parsed.
    pub(crate) fn at_path_start(&self) -> bool {
        self.position == self.path_start
    }
}
