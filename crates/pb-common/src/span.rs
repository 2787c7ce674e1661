//! Source positions and locations.

use std::fmt;
use std::ops::Range;

/// A single point in a source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number (in characters).
    pub column: u32,
    /// 0-indexed byte offset.
    pub offset: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in a source file, carried by every AST node and every error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Location used for errors that have no source counterpart,
    /// e.g. a badly registered external function.
    pub const fn unknown() -> Self {
        Self {
            start: Position::new(1, 1, 0),
            end: Position::new(1, 1, 0),
        }
    }

    /// The smallest location covering both `self` and `other`.
    pub fn to(self, other: Location) -> Location {
        Location {
            start: self.start,
            end: other.end,
        }
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.start.line
    }

    /// Byte range, for diagnostics rendering.
    pub fn byte_range(&self) -> Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_to_spans_both() {
        let a = Location::new(Position::new(1, 1, 0), Position::new(1, 4, 3));
        let b = Location::new(Position::new(2, 2, 6), Position::new(2, 5, 9));
        let joined = a.to(b);
        assert_eq!(joined.start, a.start);
        assert_eq!(joined.end, b.end);
        assert_eq!(joined.byte_range(), 0..9);
    }

    #[test]
    fn test_display() {
        let loc = Location::new(Position::new(3, 7, 20), Position::new(3, 12, 25));
        assert_eq!(loc.to_string(), "3:7 - 3:12");
    }
}
