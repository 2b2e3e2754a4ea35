//! General error types for the parser

use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::lexer::TokenKind;

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the various different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The lexer stage of the parser
    Lexer,
    /// The parsing/tree construction stage of the parser
    Parser,
    /// Growth of the property table or element vector backing storage
    Storage,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
            Stage::Storage => write!(f, "storage"),
        }
    }
}

/// The construct the parser was looking for when it found something else
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Any value
    Value,
    /// A string property key
    PropertyKey,
    /// The `:` between a key and its value
    Colon,
    /// A `,` or the closing `}` of an object
    CommaOrCloseBrace,
    /// A `,` or the closing `]` of an array
    CommaOrCloseBracket,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Value => write!(f, "a value"),
            Expected::PropertyKey => write!(f, "a property key"),
            Expected::Colon => write!(f, "':'"),
            Expected::CommaOrCloseBrace => write!(f, "',' or '}}'"),
            Expected::CommaOrCloseBracket => write!(f, "',' or ']'"),
        }
    }
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Details {
    #[error("input is not valid utf-8")]
    NonUtf8InputDetected,
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: Expected, found: TokenKind },
    #[error("trailing comma before {0}")]
    TrailingComma(TokenKind),
    #[error("invalid escape sequence in string")]
    InvalidEscapeSequence,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("malformed number")]
    BrokenNumber,
    #[error("invalid numeric representation '{0}'")]
    InvalidNumericRepresentation(String),
    #[error("nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
    #[error("unexpected {0} after the document value")]
    TrailingInput(TokenKind),
    #[error("failed to allocate backing storage")]
    AllocationFailure,
}

/// The general error structure
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The details of the error
    pub details: Details,
    /// Optional source coordinates
    pub coords: Option<Coords>,
}

impl Error {
    /// Attach coordinates to an error raised somewhere that had none to hand
    pub fn at(mut self, coords: Coords) -> Self {
        self.coords.get_or_insert(coords);
        self
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error: {} at {}", self.stage, self.details, coords),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.details)
    }
}

#[macro_export]
macro_rules! lexer_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: Some($coords),
        })
    };
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: None,
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: None,
        })
    };
}

#[macro_export]
macro_rules! storage_error {
    () => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Storage,
            details: $crate::errors::Details::AllocationFailure,
            coords: None,
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::coords::Coords;
    use crate::errors::{Details, Error, Expected, ParserResult, Stage};
    use crate::lexer::TokenKind;

    #[test]
    fn should_render_expected_and_found() {
        let err: ParserResult<()> = parser_error!(
            Details::UnexpectedToken {
                expected: Expected::Colon,
                found: TokenKind::Comma
            },
            Coords {
                absolute: 5,
                line: 0,
                column: 5
            }
        );
        let rendered = err.unwrap_err().to_string();
        assert_eq!(
            rendered,
            "parser error: expected ':', found ',' at [abs: 5, line: 0, column: 5]"
        );
    }

    #[test]
    fn should_only_attach_coords_once() {
        let err: ParserResult<()> = storage_error!();
        let first = Coords {
            absolute: 1,
            ..Default::default()
        };
        let second = Coords {
            absolute: 9,
            ..Default::default()
        };
        let err: Error = err.unwrap_err().at(first).at(second);
        assert_eq!(err.stage, Stage::Storage);
        assert_eq!(err.coords, Some(first));
    }
}
