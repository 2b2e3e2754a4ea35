//! The lexer scans the source text one token at a time. It never fails: malformed input is
//! reported through the [TokenKind] of the token produced, and it is up to the parser to decide
//! what to do about it.
use std::fmt::{Display, Formatter};

use tracing::debug;

use crate::coords::{Coords, Span};

/// Enumeration of the kinds of token the lexer can produce
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A well-formed string
    String,
    /// A terminated string containing at least one invalid escape sequence
    StringWithErrorEscape,
    /// A string that runs off the end of the input
    StringWithIncomplete,
    CurlyOpen,
    CurlyClose,
    Colon,
    Comma,
    SquareOpen,
    SquareClose,
    True,
    False,
    Null,
    Number,
    /// A sign without digits, or a fraction point without digits
    BrokenNumber,
    Unknown,
    /// End of input. Terminal, repeated calls keep producing it
    Eof,
}

impl TokenKind {
    /// Whether this is one of the three string kinds
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::StringWithErrorEscape | TokenKind::StringWithIncomplete
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::String => write!(f, "string"),
            TokenKind::StringWithErrorEscape => write!(f, "string with invalid escape"),
            TokenKind::StringWithIncomplete => write!(f, "unterminated string"),
            TokenKind::CurlyOpen => write!(f, "'{{'"),
            TokenKind::CurlyClose => write!(f, "'}}'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::SquareOpen => write!(f, "'['"),
            TokenKind::SquareClose => write!(f, "']'"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Null => write!(f, "null"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::BrokenNumber => write!(f, "malformed number"),
            TokenKind::Unknown => write!(f, "unknown token"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token: its kind, plus the slice of source text it covers. For strings the slice excludes
/// the surrounding quotes and escapes are left undecoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// A packed token consists of a [Token] and the [Span] associated with it
pub type PackedToken<'a> = (Token<'a>, Span);

/// Convenience macro for packing tokens along with their positional information
macro_rules! packed_token {
    ($k:expr, $t:expr, $s:expr, $e:expr) => {
        (Token { kind: $k, text: $t }, Span { start: $s, end: $e })
    };
    ($k:expr, $t:expr, $s:expr) => {
        (Token { kind: $k, text: $t }, Span { start: $s, end: $s })
    };
}

/// Scanner over an immutable source buffer. The only mutable state is the cursor position.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The source text. Never mutated
    source: &'a str,
    /// Current cursor position
    coords: Coords,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            coords: Coords::default(),
        }
    }

    /// The full source text being scanned
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The current cursor position
    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Consume the next token from the input. Whitespace (space, tab and newline only) is
    /// skipped, after which the first byte decides what kind of token is scanned. On return the
    /// cursor sits on the first byte after the token.
    pub fn consume(&mut self) -> PackedToken<'a> {
        self.skip_whitespace();
        let start = self.coords;
        match self.peek() {
            None => packed_token!(TokenKind::Eof, "", start),
            Some(b) => match b {
                b'f' | b't' | b'n' => self.match_literal(start),
                b'-' | b'0'..=b'9' => self.match_number(start),
                b'"' => self.match_string(start),
                b'{' => self.match_symbol(TokenKind::CurlyOpen, start),
                b'}' => self.match_symbol(TokenKind::CurlyClose, start),
                b'[' => self.match_symbol(TokenKind::SquareOpen, start),
                b']' => self.match_symbol(TokenKind::SquareClose, start),
                b':' => self.match_symbol(TokenKind::Colon, start),
                b',' => self.match_symbol(TokenKind::Comma, start),
                _ => self.match_unknown(start),
            },
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.coords.absolute).copied()
    }

    #[inline]
    fn advance(&mut self) {
        if let Some(b) = self.peek() {
            self.coords.bump(b);
        }
    }

    /// The source text between `start` and the cursor. Callers only ever stop the cursor on an
    /// ASCII byte or the end of input, so this is always on a char boundary.
    #[inline]
    fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.coords.absolute]
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n') = self.peek() {
            self.advance();
        }
    }

    /// Consume a single structural character
    fn match_symbol(&mut self, kind: TokenKind, start: Coords) -> PackedToken<'a> {
        self.advance();
        packed_token!(kind, self.slice_from(start.absolute), start, self.coords)
    }

    /// Consume a whole run of lowercase letters and classify it. Anything other than an exact
    /// `true`, `false` or `null` is [TokenKind::Unknown], so `truex` is one unknown token.
    fn match_literal(&mut self, start: Coords) -> PackedToken<'a> {
        while let Some(b'a'..=b'z') = self.peek() {
            self.advance();
        }
        let text = self.slice_from(start.absolute);
        let kind = match text {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Unknown,
        };
        packed_token!(kind, text, start, self.coords)
    }

    /// Consume an optional `-`, a run of digits and an optional fraction. Exponents are not
    /// recognised, so the `e` of `1e5` starts the next token.
    fn match_number(&mut self, start: Coords) -> PackedToken<'a> {
        if self.peek() == Some(b'-') {
            self.advance();
        }
        let integral = self.skip_digits();
        let mut kind = TokenKind::Number;
        if integral == 0 {
            kind = TokenKind::BrokenNumber;
        } else if self.peek() == Some(b'.') {
            self.advance();
            if self.skip_digits() == 0 {
                kind = TokenKind::BrokenNumber;
            }
        }
        packed_token!(kind, self.slice_from(start.absolute), start, self.coords)
    }

    /// Skip a run of ascii digits, returning how many were skipped
    fn skip_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
            count += 1;
        }
        count
    }

    /// Scan a string. Escapes are validated but not decoded: a bad escape degrades the token to
    /// [TokenKind::StringWithErrorEscape] and scanning carries on to the closing quote. `\u` is
    /// not a supported escape.
    fn match_string(&mut self, start: Coords) -> PackedToken<'a> {
        self.advance();
        let content = self.coords.absolute;
        let mut kind = TokenKind::String;
        loop {
            match self.peek() {
                None => {
                    debug!(coords = %start, "unterminated string");
                    return packed_token!(
                        TokenKind::StringWithIncomplete,
                        self.slice_from(content),
                        start,
                        self.coords
                    );
                }
                Some(b'"') => {
                    let text = self.slice_from(content);
                    self.advance();
                    return packed_token!(kind, text, start, self.coords);
                }
                Some(b'\\') => {
                    self.advance();
                    match self.peek() {
                        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                            self.advance()
                        }
                        Some(_) => {
                            debug!(coords = %self.coords, "invalid escape sequence in string");
                            kind = TokenKind::StringWithErrorEscape;
                            self.advance();
                        }
                        None => (),
                    }
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Consume one unrecognised character, stepping over every byte of it
    fn match_unknown(&mut self, start: Coords) -> PackedToken<'a> {
        let width = self.source[start.absolute..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        for _ in 0..width {
            self.advance();
        }
        packed_token!(
            TokenKind::Unknown,
            self.slice_from(start.absolute),
            start,
            self.coords
        )
    }
}
