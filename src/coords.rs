//! Coordinate structures used to reference specific locations within the source text
#![allow(clippy::len_without_is_empty)]

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single byte location within the source text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Coords {
    /// The absolute byte offset
    pub absolute: usize,
    /// The (zero-based) line
    pub line: usize,
    /// The (zero-based) byte column within the line
    pub column: usize,
}

impl Coords {
    /// Step the coordinates over a single byte of input
    #[inline]
    pub(crate) fn bump(&mut self, byte: u8) {
        self.absolute += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

/// A [Span] represents a half-open interval within the source text, between two [Coords]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start [Coords] for the span
    pub start: Coords,
    /// End [Coords] for the span (one past the last byte)
    pub end: Coords,
}

impl Span {
    /// Number of bytes covered by the span
    pub fn len(&self) -> usize {
        self.end.absolute.saturating_sub(self.start.absolute)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start: {}, end: {}, length: {}",
            self.start,
            self.end,
            self.len()
        )
    }
}
