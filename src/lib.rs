//! A zero-copy JSON parser. The source text is scanned by a [lexer::Lexer], one token at a time,
//! and a recursive-descent [parser::Parser] builds a [JsonValue] tree whose strings and keys
//! borrow from the source.
//!
//! Numbers are decimal only (no exponents) and `\u` escapes are not supported.
use std::str;

use crate::coords::Coords;
use crate::errors::{Details, Error, ParserResult, Stage};

pub mod coords;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod table;
pub mod value;
pub mod vector;
#[cfg(test)]
mod test_macros;

pub use crate::parser::{EscapePolicy, Parser, ParserOptions};
pub use crate::table::PropertyTable;
pub use crate::value::JsonValue;
pub use crate::vector::ElementVector;

/// Parse a complete document with the default options
pub fn parse_str(source: &str) -> ParserResult<JsonValue> {
    Parser::new(source).parse_document()
}

/// Parse a complete document held as raw bytes, which must be valid utf-8
pub fn parse_bytes(bytes: &[u8]) -> ParserResult<JsonValue> {
    parse_bytes_with_options(bytes, ParserOptions::default())
}

/// Parse raw bytes using a specific set of [ParserOptions]
pub fn parse_bytes_with_options(bytes: &[u8], options: ParserOptions) -> ParserResult<JsonValue> {
    let source = decode(bytes)?;
    Parser::with_options(source, options).parse_document()
}

/// Check the input is utf-8, reporting the position of the first bad byte if it isn't
pub fn decode(bytes: &[u8]) -> ParserResult<&str> {
    str::from_utf8(bytes).map_err(|err| {
        let valid = &bytes[..err.valid_up_to()];
        let mut coords = Coords::default();
        valid.iter().for_each(|b| coords.bump(*b));
        Error {
            stage: Stage::Lexer,
            details: Details::NonUtf8InputDetected,
            coords: Some(coords),
        }
    })
}

#[cfg(test)]
mod tests {
    use crate::errors::Details;
    use crate::{parse_bytes, parse_str, JsonValue};

    #[test]
    fn should_parse_from_str() {
        let value = parse_str("[1,2,3]").unwrap();
        let numbers: Vec<f64> = value
            .as_array()
            .unwrap()
            .iter()
            .filter_map(JsonValue::as_f64)
            .collect();
        assert_eq!(numbers, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn should_reject_invalid_utf8() {
        let err = parse_bytes(b"[\"ok\",\n \"\xff\"]").unwrap_err();
        assert_eq!(err.details, Details::NonUtf8InputDetected);
        let coords = err.coords.unwrap();
        assert_eq!(coords.absolute, 9);
        assert_eq!(coords.line, 1);
        assert_eq!(coords.column, 2);
    }
}
