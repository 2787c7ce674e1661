//! Source text management.
//!
//! A `SourceFile` owns the program text together with a table of line start
//! offsets, so the lexer can turn byte offsets into line/column positions.

use std::sync::Arc;

use crate::span::{Location, Position};

/// A source file with its content and line table.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: Arc<str>,
    source: Arc<str>,
    /// Byte offsets of line starts. The first element is always 0.
    line_starts: Vec<u32>,
}

impl SourceFile {
    pub fn new(name: impl Into<Arc<str>>, source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let line_starts = Self::compute_line_starts(&source);
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    fn compute_line_starts(source: &str) -> Vec<u32> {
        let mut starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                starts.push((i + 1) as u32);
            }
        }
        starts
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into a 1-based line/column position.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line_idx = self.line_starts.partition_point(|&s| s as usize <= offset) - 1;
        let line_start = self.line_starts[line_idx] as usize;
        let column = self.source[line_start..offset].chars().count() + 1;
        Position::new(line_idx as u32 + 1, column as u32, offset as u32)
    }

    /// Converts a byte range into a location.
    pub fn location(&self, start: usize, end: usize) -> Location {
        Location::new(self.position(start), self.position(end))
    }

    /// Text of a 1-based line without its trailing newline.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&e| e as usize)
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches(['\n', '\r']))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let file = SourceFile::new("test.pb", "var a = 1\nprint(a)\n");
        assert_eq!(file.position(0), Position::new(1, 1, 0));
        assert_eq!(file.position(4), Position::new(1, 5, 4));
        assert_eq!(file.position(10), Position::new(2, 1, 10));
        assert_eq!(file.position(16), Position::new(2, 7, 16));
        assert_eq!(file.line_count(), 3);
    }

    #[test]
    fn test_columns_count_characters() {
        let file = SourceFile::new("test.pb", "\"🔥\" x");
        // the emoji is 4 bytes but one column
        assert_eq!(file.position(7), Position::new(1, 5, 7));
    }

    #[test]
    fn test_line_text() {
        let file = SourceFile::new("test.pb", "first\r\nsecond");
        assert_eq!(file.line_text(1), Some("first"));
        assert_eq!(file.line_text(2), Some("second"));
        assert_eq!(file.line_text(3), None);
        assert_eq!(file.line_text(0), None);
    }
}
