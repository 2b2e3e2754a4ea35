//! The recursive-descent parser. It owns exactly one token of lookahead (the current token), and
//! each production leaves the current token on the first token after the construct it parsed.
use tracing::trace;

use crate::coords::{Coords, Span};
use crate::errors::{Details, Error, Expected, ParserResult};
use crate::lexer::{Lexer, PackedToken, Token, TokenKind};
use crate::table::{PropertyTable, DEFAULT_TABLE_CAPACITY};
use crate::value::JsonValue;
use crate::vector::{ElementVector, DEFAULT_VECTOR_CAPACITY};
use crate::{lexer_error, parser_error};

/// Default limit on object/array nesting
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do with a string containing an invalid escape sequence
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Fail the parse with [Details::InvalidEscapeSequence]
    #[default]
    Reject,
    /// Accept the raw string as if it were well-formed
    Tolerate,
}

/// Parser configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Handling of strings with invalid escapes
    pub escapes: EscapePolicy,
    /// Initial slot count for each object's property table
    pub object_capacity: usize,
    /// Initial capacity for each array's element vector
    pub array_capacity: usize,
    /// Maximum nesting of objects and arrays
    pub max_depth: usize,
    /// Whether [Parser::parse_document] insists that nothing follows the value
    pub require_eof: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            escapes: EscapePolicy::default(),
            object_capacity: DEFAULT_TABLE_CAPACITY,
            array_capacity: DEFAULT_VECTOR_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            require_eof: false,
        }
    }
}

impl ParserOptions {
    /// Use a specific [EscapePolicy] for strings containing invalid escapes
    pub fn with_escape_policy(mut self, escapes: EscapePolicy) -> Self {
        self.escapes = escapes;
        self
    }

    /// Set the number of slots each new [PropertyTable] starts with
    pub fn with_object_capacity(mut self, capacity: usize) -> Self {
        self.object_capacity = capacity;
        self
    }

    /// Set the number of slots each new [ElementVector] starts with
    pub fn with_array_capacity(mut self, capacity: usize) -> Self {
        self.array_capacity = capacity;
        self
    }

    /// Limit how deeply objects and arrays may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reject documents with anything other than end of input after the top-level value
    pub fn with_require_eof(mut self, require_eof: bool) -> Self {
        self.require_eof = require_eof;
        self
    }
}

/// Main JSON parser struct
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// The single token of lookahead
    current: PackedToken<'a>,
    options: ParserOptions,
    /// Current object/array nesting
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source` with the default options. No token has been consumed yet:
    /// call [Parser::advance_token] before [Parser::parse_value], or use
    /// [Parser::parse_document] which does both.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    /// Create a new parser using a specific set of [ParserOptions]
    pub fn with_options(source: &'a str, options: ParserOptions) -> Self {
        Parser {
            lexer: Lexer::new(source),
            current: (
                Token {
                    kind: TokenKind::Eof,
                    text: "",
                },
                Span::default(),
            ),
            options,
            depth: 0,
        }
    }

    /// Convenience check for callers that only want a yes/no answer
    pub fn is_valid(source: &str) -> bool {
        Parser::new(source).parse_document().is_ok()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The current token
    pub fn current(&self) -> &PackedToken<'a> {
        &self.current
    }

    /// Replace the current token with the next one from the lexer
    pub fn advance_token(&mut self) {
        self.current = self.lexer.consume();
    }

    /// Prime the lookahead, parse a single value, and optionally check that only end of input
    /// follows it
    pub fn parse_document(&mut self) -> ParserResult<JsonValue<'a>> {
        self.advance_token();
        let value = self.parse_value()?;
        if self.options.require_eof && self.kind() != TokenKind::Eof {
            return self.error(Details::TrailingInput(self.kind()));
        }
        Ok(value)
    }

    /// Parse the value starting at the current token, leaving the current token on whatever
    /// follows it
    pub fn parse_value(&mut self) -> ParserResult<JsonValue<'a>> {
        let value = match self.kind() {
            TokenKind::String => JsonValue::String(self.text()),
            TokenKind::StringWithErrorEscape => match self.string_text() {
                Ok(text) => JsonValue::String(text),
                Err(err) => return self.skip_current(Err(err)),
            },
            TokenKind::StringWithIncomplete => {
                let err = self.lexical_error(Details::UnterminatedString);
                return self.skip_current(err);
            }
            TokenKind::CurlyOpen => self.parse_object()?,
            TokenKind::SquareOpen => self.parse_array()?,
            TokenKind::True => JsonValue::Boolean(true),
            TokenKind::False => JsonValue::Boolean(false),
            TokenKind::Null => JsonValue::Null,
            TokenKind::Number => self.parse_number()?,
            TokenKind::BrokenNumber => {
                let err = self.lexical_error(Details::BrokenNumber);
                return self.skip_current(err);
            }
            found => {
                let err = self.error(Details::UnexpectedToken {
                    expected: Expected::Value,
                    found,
                });
                return self.skip_current(err);
            }
        };
        self.advance_token();
        Ok(value)
    }

    /// Parse an object. Called with the current token on `{`, returns with it on `}`.
    fn parse_object(&mut self) -> ParserResult<JsonValue<'a>> {
        self.enter()?;
        let result = self.parse_object_body();
        self.depth -= 1;
        result
    }

    fn parse_object_body(&mut self) -> ParserResult<JsonValue<'a>> {
        let mut table =
            PropertyTable::with_capacity(self.options.object_capacity).map_err(|e| self.locate(e))?;
        self.advance_token();
        while self.kind() != TokenKind::CurlyClose {
            let key = match self.kind() {
                TokenKind::String | TokenKind::StringWithErrorEscape => self.string_text()?,
                TokenKind::StringWithIncomplete => {
                    return self.lexical_error(Details::UnterminatedString)
                }
                found => {
                    return self.error(Details::UnexpectedToken {
                        expected: Expected::PropertyKey,
                        found,
                    })
                }
            };
            self.advance_token();
            self.expect(TokenKind::Colon, Expected::Colon)?;
            self.advance_token();
            let value = self.parse_value()?;
            table.insert(key, value).map_err(|e| self.locate(e))?;
            if self.kind() != TokenKind::Comma {
                break;
            }
            self.advance_token();
            if self.kind() == TokenKind::CurlyClose {
                return self.error(Details::TrailingComma(TokenKind::CurlyClose));
            }
        }
        self.expect(TokenKind::CurlyClose, Expected::CommaOrCloseBrace)?;
        Ok(JsonValue::Object(table))
    }

    /// Parse an array. Called with the current token on `[`, returns with it on `]`.
    fn parse_array(&mut self) -> ParserResult<JsonValue<'a>> {
        self.enter()?;
        let result = self.parse_array_body();
        self.depth -= 1;
        result
    }

    fn parse_array_body(&mut self) -> ParserResult<JsonValue<'a>> {
        let mut vector =
            ElementVector::with_capacity(self.options.array_capacity).map_err(|e| self.locate(e))?;
        loop {
            self.advance_token();
            if self.kind() == TokenKind::SquareClose {
                if !vector.is_empty() {
                    return self.error(Details::TrailingComma(TokenKind::SquareClose));
                }
                break;
            }
            let value = self.parse_value()?;
            vector.push(value).map_err(|e| self.locate(e))?;
            if self.kind() != TokenKind::Comma {
                self.expect(TokenKind::SquareClose, Expected::CommaOrCloseBracket)?;
                break;
            }
        }
        Ok(JsonValue::Array(vector))
    }

    /// Convert the current number token. The lexer has already checked its shape.
    fn parse_number(&self) -> ParserResult<JsonValue<'a>> {
        match convert_number(self.text()) {
            Some(n) => Ok(JsonValue::Number(n)),
            None => self.error(Details::InvalidNumericRepresentation(self.text().to_string())),
        }
    }

    /// The text of the current string token, subject to the escape policy
    fn string_text(&self) -> ParserResult<&'a str> {
        match (self.kind(), self.options.escapes) {
            (TokenKind::StringWithErrorEscape, EscapePolicy::Reject) => {
                self.lexical_error(Details::InvalidEscapeSequence)
            }
            _ => Ok(self.text()),
        }
    }

    /// Move past a token that could not start a value so repeated calls always make progress
    fn skip_current<T>(&mut self, err: ParserResult<T>) -> ParserResult<T> {
        self.advance_token();
        err
    }

    /// Step one level deeper into the tree, enforcing the nesting limit
    fn enter(&mut self) -> ParserResult<()> {
        if self.depth >= self.options.max_depth {
            return self.error(Details::NestingTooDeep(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn expect(&self, kind: TokenKind, expected: Expected) -> ParserResult<()> {
        if self.kind() == kind {
            Ok(())
        } else {
            self.error(Details::UnexpectedToken {
                expected,
                found: self.kind(),
            })
        }
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.current.0.kind
    }

    #[inline]
    fn text(&self) -> &'a str {
        self.current.0.text
    }

    #[inline]
    fn coords(&self) -> Coords {
        self.current.1.start
    }

    /// Pin an error raised without position information to the current token
    fn locate(&self, err: Error) -> Error {
        err.at(self.coords())
    }

    fn error<T>(&self, details: Details) -> ParserResult<T> {
        trace!(coords = %self.coords(), %details, "parse error");
        parser_error!(details, self.coords())
    }

    fn lexical_error<T>(&self, details: Details) -> ParserResult<T> {
        trace!(coords = %self.coords(), %details, "lexical error");
        lexer_error!(details, self.coords())
    }
}

#[cfg(not(feature = "lexical"))]
fn convert_number(text: &str) -> Option<f64> {
    fast_float::parse::<f64, _>(text).ok()
}

#[cfg(feature = "lexical")]
fn convert_number(text: &str) -> Option<f64> {
    lexical::parse::<f64, _>(text).ok()
}
