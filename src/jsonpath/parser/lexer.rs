//! Cursor and token helpers shared by the path and expression parsers.

use super::Parser;
use crate::jsonpath::ast::is_identifier_byte;
use crate::jsonpath::error::JsonPathError;

impl Parser<'_> {
    /// The unparsed remainder of the input.
    pub(crate) fn rest(&self) -> &str {
        &self.input[self.position..]
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Returns the current character without advancing.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the next character and advances position.
    pub(crate) fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Advances past `len` bytes already checked by the caller.
    pub(crate) fn advance(&mut self, len: usize) {
        self.position = (self.position + len).min(self.input.len());
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// The byte `offset` bytes past the cursor.
    pub(crate) fn byte_at(&self, offset: usize) -> Option<u8> {
        self.rest().as_bytes().get(offset).copied()
    }

    /// Skips whitespace characters.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Checks if we've reached the end of input.
    pub(crate) fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Builds the error for whatever sits at the cursor.
    pub(crate) fn unexpected(&self, expected: &str) -> JsonPathError {
        match self.peek() {
            Some(ch) => JsonPathError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: expected.to_string(),
            },
            None => JsonPathError::UnexpectedEnd {
                expected: expected.to_string(),
            },
        }
    }

    /// Expects a specific character and advances, or returns an error.
    pub(crate) fn expect(&mut self, expected: char) -> Result<(), JsonPathError> {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.next();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    /// Parses an identifier (property name) made of letters, digits and `_`.
    pub(crate) fn parse_identifier(&mut self) -> Result<String, JsonPathError> {
        let len = self
            .rest()
            .bytes()
            .take_while(|b| is_identifier_byte(*b))
            .count();
        if len == 0 {
            return Err(self.unexpected("an identifier"));
        }
        let name = self.rest()[..len].to_string();
        self.position += len;
        Ok(name)
    }

    /// Returns true if `word` sits at the cursor and is not the prefix of a
    /// longer identifier.
    pub(crate) fn at_keyword(&self, word: &str) -> bool {
        self.starts_with(word)
            && !self
                .byte_at(word.len())
                .map(is_identifier_byte)
                .unwrap_or(false)
    }

    /// Parses a single or double quoted string with backslash escapes.
    pub(crate) fn parse_quoted(&mut self) -> Result<String, JsonPathError> {
        let quote = match self.peek() {
            Some(ch @ ('\'' | '"')) => ch,
            _ => return Err(self.unexpected("a quoted string")),
        };
        self.next();

        let closing = format!("closing {}", quote);
        let mut value = String::new();
        loop {
            let escape_position = self.position;
            match self.next() {
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => {
                    let escaped = match self.next() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some(ch @ ('\\' | '/' | '\'' | '"')) => ch,
                        Some('u') => self.parse_unicode_escape(escape_position)?,
                        Some(other) => {
                            return Err(JsonPathError::InvalidSyntax {
                                position: escape_position,
                                message: format!("Invalid escape sequence '\\{}'", other),
                            })
                        }
                        None => return Err(JsonPathError::UnexpectedEnd { expected: closing }),
                    };
                    value.push(escaped);
                }
                Some(ch) => value.push(ch),
                None => return Err(JsonPathError::UnexpectedEnd { expected: closing }),
            }
        }
    }

    fn parse_unicode_escape(&mut self, escape_position: usize) -> Result<char, JsonPathError> {
        let invalid = || JsonPathError::InvalidSyntax {
            position: escape_position,
            message: "Invalid unicode escape".to_string(),
        };
        let digits = self.rest().get(..4).ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let code = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let ch = char::from_u32(code).ok_or_else(invalid)?;
        self.position += 4;
        Ok(ch)
    }

    /// Parses an optionally negative integer, or returns `None` when there is
    /// no number at the cursor.
    pub(crate) fn parse_optional_integer(&mut self) -> Result<Option<i64>, JsonPathError> {
        let start = self.position;
        let sign = usize::from(self.byte_at(0) == Some(b'-'));
        let digits = self.rest().as_bytes()[sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            if sign == 1 {
                self.advance(1);
                return Err(self.unexpected("a digit"));
            }
            return Ok(None);
        }

        let text = &self.rest()[..sign + digits];
        let value = text.parse::<i64>().map_err(|_| JsonPathError::InvalidSyntax {
            position: start,
            message: format!("Integer out of range: {}", text),
        })?;
        self.position += sign + digits;
        Ok(Some(value))
    }

    /// Parses a decimal number literal with optional sign, fraction and
    /// exponent.
    pub(crate) fn parse_number(&mut self) -> Result<f64, JsonPathError> {
        let start = self.position;
        let bytes = self.rest().as_bytes();
        let digits_from = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

        let mut len = usize::from(bytes.first() == Some(&b'-'));
        let integral = digits_from(len);
        if integral == 0 {
            self.advance(len);
            return Err(self.unexpected("a number"));
        }
        len += integral;

        if bytes.get(len) == Some(&b'.') && digits_from(len + 1) > 0 {
            len += 1 + digits_from(len + 1);
        }

        if matches!(bytes.get(len), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
            let exponent = digits_from(len + 1 + sign);
            if exponent > 0 {
                len += 1 + sign + exponent;
            }
        }

        let text = &self.rest()[..len];
        let value = text.parse::<f64>().map_err(|_| JsonPathError::InvalidSyntax {
            position: start,
            message: format!("Invalid number: {}", text),
        })?;
        self.position += len;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_handles_multibyte() {
        let mut parser = Parser::new("é$");
        assert_eq!(parser.next(), Some('é'));
        assert_eq!(parser.peek(), Some('$'));
        assert_eq!(parser.position(), 2);
    }

    #[test]
    fn test_parse_quoted_escapes() {
        let mut parser = Parser::new(r#"'a\n\'bA\/'"#);
        assert_eq!(parser.parse_quoted().unwrap(), "a\n'bA/");
        assert!(parser.is_eof());
    }

    #[test]
    fn test_parse_quoted_double() {
        let mut parser = Parser::new(r#""it's""#);
        assert_eq!(parser.parse_quoted().unwrap(), "it's");
    }

    #[test]
    fn test_parse_quoted_bad_unicode() {
        let mut parser = Parser::new(r"'\u12'");
        assert!(matches!(
            parser.parse_quoted(),
            Err(JsonPathError::InvalidSyntax { position: 1, .. })
        ));
    }

    #[test]
    fn test_parse_optional_integer() {
        let mut parser = Parser::new("-12:x");
        assert_eq!(parser.parse_optional_integer().unwrap(), Some(-12));
        assert_eq!(parser.peek(), Some(':'));
        parser.next();
        assert_eq!(parser.parse_optional_integer().unwrap(), None);
        assert_eq!(parser.peek(), Some('x'));
    }

    #[test]
    fn test_parse_optional_integer_lone_minus() {
        let mut parser = Parser::new("-]");
        assert!(matches!(
            parser.parse_optional_integer(),
            Err(JsonPathError::UnexpectedToken { position: 1, .. })
        ));
    }

    #[test]
    fn test_parse_number_forms() {
        for (source, expected) in [("42", 42.0), ("-3.5", -3.5), ("1e3", 1000.0), ("2.5E-1", 0.25)] {
            let mut parser = Parser::new(source);
            assert_eq!(parser.parse_number().unwrap(), expected, "{}", source);
            assert!(parser.is_eof());
        }
    }

    #[test]
    fn test_parse_number_stops_before_dot_without_digits() {
        let mut parser = Parser::new("1.length");
        assert_eq!(parser.parse_number().unwrap(), 1.0);
        assert_eq!(parser.peek(), Some('.'));
    }

    #[test]
    fn test_at_keyword() {
        assert!(Parser::new("true)").at_keyword("true"));
        assert!(!Parser::new("trueish").at_keyword("true"));
    }
}
