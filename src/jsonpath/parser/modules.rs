//! The ordered table of path parser modules.

use super::Parser;
use crate::jsonpath::ast::{
    is_identifier_byte, ArrayQuery, JsonPath, Operator, PathRoot, SearchParameter, Slice,
};
use crate::jsonpath::error::JsonPathError;

type Handles = fn(&Parser<'_>) -> bool;
type Parse = fn(&mut Parser<'_>, &mut JsonPath) -> Result<(), JsonPathError>;

/// One entry of the parser table.
pub(super) struct ParserModule {
    pub name: &'static str,
    /// Inspects the lookahead without consuming anything.
    pub handles: Handles,
    /// Consumes the syntax and appends operators.
    pub parse: Parse,
}

/// Consulted in order; the first module that handles the lookahead wins.
pub(super) const MODULES: &[ParserModule] = &[
    ParserModule {
        name: "start",
        handles: handles_start,
        parse: parse_start,
    },
    ParserModule {
        name: "dotted",
        handles: handles_dotted,
        parse: parse_dotted,
    },
    ParserModule {
        name: "search",
        handles: handles_search,
        parse: parse_search,
    },
    ParserModule {
        name: "array",
        handles: handles_array,
        parse: parse_array,
    },
    ParserModule {
        name: "quoted name",
        handles: handles_quoted,
        parse: parse_quoted_name,
    },
    ParserModule {
        name: "filter",
        handles: handles_filter,
        parse: parse_array,
    },
    ParserModule {
        name: "index expression",
        handles: handles_index_expression,
        parse: parse_array,
    },
];

fn handles_start(parser: &Parser<'_>) -> bool {
    parser.at_path_start() && matches!(parser.peek(), Some('$' | '@'))
}

fn parse_start(parser: &mut Parser<'_>, path: &mut JsonPath) -> Result<(), JsonPathError> {
    path.root = match parser.next() {
        Some('@') => PathRoot::Current,
        _ => PathRoot::Document,
    };
    Ok(())
}

fn handles_dotted(parser: &Parser<'_>) -> bool {
    parser.byte_at(0) == Some(b'.')
        && parser
            .byte_at(1)
            .map(|b| b == b'*' || is_identifier_byte(b))
            .unwrap_or(false)
}

fn parse_dotted(parser: &mut Parser<'_>, path: &mut JsonPath) -> Result<(), JsonPathError> {
    parser.next();
    if parser.peek() == Some('*') {
        parser.next();
        path.push(Operator::Wildcard);
        return Ok(());
    }

    let name = parser.parse_identifier()?;
    let operator = match name.as_str() {
        "length" => Operator::Length,
        "indexOf" if parser.peek() == Some('(') => {
            parser.next();
            let expression = parser.parse_expression()?;
            parser.expect(')')?;
            Operator::IndexOf(expression)
        }
        _ => Operator::Name(name),
    };
    path.push(operator);
    Ok(())
}

fn handles_search(parser: &Parser<'_>) -> bool {
    parser.starts_with("..")
}

fn parse_search(parser: &mut Parser<'_>, path: &mut JsonPath) -> Result<(), JsonPathError> {
    parser.advance(2);
    let parameter = match parser.peek() {
        Some('*') => {
            parser.next();
            SearchParameter::Wildcard
        }
        Some('[') if handles_quoted(parser) => {
            SearchParameter::Name(parse_bracketed_name(parser)?)
        }
        Some('[') => SearchParameter::Array(parse_array_query(parser)?),
        _ => {
            let name = parser.parse_identifier()?;
            if name == "length" {
                SearchParameter::Length
            } else {
                SearchParameter::Name(name)
            }
        }
    };
    path.push(Operator::Search(parameter));
    Ok(())
}

/// Index, slice, list or `[*]`.
fn handles_array(parser: &Parser<'_>) -> bool {
    parser.peek() == Some('[')
        && matches!(
            first_in_brackets(parser),
            Some(b'0'..=b'9' | b'-' | b':' | b'*')
        )
}

fn parse_array(parser: &mut Parser<'_>, path: &mut JsonPath) -> Result<(), JsonPathError> {
    let query = parse_array_query(parser)?;
    path.push(Operator::Array(query));
    Ok(())
}

fn handles_quoted(parser: &Parser<'_>) -> bool {
    parser.peek() == Some('[') && matches!(first_in_brackets(parser), Some(b'\'' | b'"'))
}

fn parse_quoted_name(parser: &mut Parser<'_>, path: &mut JsonPath) -> Result<(), JsonPathError> {
    let name = parse_bracketed_name(parser)?;
    path.push(Operator::Name(name));
    Ok(())
}

fn handles_filter(parser: &Parser<'_>) -> bool {
    parser.peek() == Some('[') && first_in_brackets(parser) == Some(b'?')
}

fn handles_index_expression(parser: &Parser<'_>) -> bool {
    parser.peek() == Some('[') && first_in_brackets(parser) == Some(b'(')
}

/// First non-whitespace byte after the `[` at the cursor.
fn first_in_brackets(parser: &Parser<'_>) -> Option<u8> {
    parser.rest()[1..]
        .bytes()
        .find(|b| !b.is_ascii_whitespace())
}

fn parse_bracketed_name(parser: &mut Parser<'_>) -> Result<String, JsonPathError> {
    parser.expect('[')?;
    parser.skip_whitespace();
    let name = parser.parse_quoted()?;
    parser.expect(']')?;
    Ok(name)
}

/// Parses `[...]` holding slices, `*`, `?(expr)` or `(expr)`.
fn parse_array_query(parser: &mut Parser<'_>) -> Result<ArrayQuery, JsonPathError> {
    parser.expect('[')?;
    parser.skip_whitespace();

    let query = if parser.starts_with("?(") {
        parser.advance(2);
        let expression = parser.parse_expression()?;
        parser.expect(')')?;
        ArrayQuery::Filter(expression)
    } else if parser.peek() == Some('(') {
        parser.next();
        let expression = parser.parse_expression()?;
        parser.expect(')')?;
        ArrayQuery::Index(expression)
    } else if parser.peek() == Some('*') {
        parser.next();
        ArrayQuery::Wildcard
    } else {
        ArrayQuery::Slices(parse_slices(parser)?)
    };

    parser.expect(']')?;
    Ok(query)
}

fn parse_slices(parser: &mut Parser<'_>) -> Result<Vec<Slice>, JsonPathError> {
    let mut slices = vec![parse_slice(parser)?];
    loop {
        parser.skip_whitespace();
        if parser.peek() != Some(',') {
            return Ok(slices);
        }
        parser.next();
        slices.push(parse_slice(parser)?);
    }
}

fn parse_slice(parser: &mut Parser<'_>) -> Result<Slice, JsonPathError> {
    parser.skip_whitespace();
    let start = parser.parse_optional_integer()?;
    parser.skip_whitespace();
    if parser.peek() != Some(':') {
        return match start {
            Some(index) => Ok(Slice::Index(index)),
            None => Err(parser.unexpected("an index or slice")),
        };
    }
    parser.next();

    parser.skip_whitespace();
    let end = parser.parse_optional_integer()?;
    parser.skip_whitespace();
    let step = if parser.peek() == Some(':') {
        parser.next();
        parser.skip_whitespace();
        parser.parse_optional_integer()?
    } else {
        None
    };

    Ok(Slice::Range { start, end, step })
}
