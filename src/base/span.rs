//! Source positions and diagnostic locations.

use std::fmt;
use std::sync::Arc;

pub use text_size::TextSize;

/// A line and column position in a source document.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Converts byte offsets reported by the XML reader into line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let offset = TextSize::from(offset.min(u32::MAX as usize) as u32).min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        LineCol {
            line: line as u32,
            col: (offset - self.line_starts[line]).into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Where a diagnostic points: a host-supplied document path and, when known,
/// a position inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: Option<Arc<str>>,
    pub position: Option<LineCol>,
}

impl Location {
    /// A location with no document attached.
    pub const fn none() -> Self {
        Self {
            path: None,
            position: None,
        }
    }

    pub fn file(path: impl Into<Arc<str>>) -> Self {
        Self {
            path: Some(path.into()),
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<LineCol>) -> Self {
        self.position = position;
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.position) {
            (Some(path), Some(pos)) => write!(f, "{path}:{pos}"),
            (Some(path), None) => f.write_str(path),
            (None, Some(pos)) => write!(f, "{pos}"),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        assert_eq!(format!("{}", LineCol::new(0, 0)), "1:1");
        assert_eq!(format!("{}", LineCol::new(5, 10)), "6:11");
    }

    #[test]
    fn test_line_index_single_line() {
        let index = LineIndex::new("<CommandTable/>");

        assert_eq!(index.line_col(0), LineCol::new(0, 0));
        assert_eq!(index.line_col(5), LineCol::new(0, 5));
        assert_eq!(index.line_count(), 1);
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("<a>\n  <b/>\n</a>");

        assert_eq!(index.line_col(3), LineCol::new(0, 3));
        assert_eq!(index.line_col(4), LineCol::new(1, 0));
        assert_eq!(index.line_col(6), LineCol::new(1, 2));
        assert_eq!(index.line_col(11), LineCol::new(2, 0));
    }

    #[test]
    fn test_line_index_clamps_past_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_col(400), LineCol::new(1, 2));
    }

    #[test]
    fn test_location_display() {
        let loc = Location::file("Commands.vsct").with_position(Some(LineCol::new(2, 4)));
        assert_eq!(loc.to_string(), "Commands.vsct:3:5");
        assert_eq!(Location::file("a.vsct").to_string(), "a.vsct");
        assert_eq!(Location::none().to_string(), "<unknown>");
    }
}
