//! Text span, range and position types for source location tracking.
//!
//! Tokens and syntax nodes carry [`TextRange`]s of byte offsets. Line and
//! column information is resolved lazily through a [`LineMap`].

use crate::source::SourceId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A complete text range with start and end byte offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= pos);
        Self { pos, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }

    /// The smallest range covering both `self` and `other`.
    #[inline]
    pub fn cover(&self, other: TextRange) -> TextRange {
        TextRange::new(self.pos.min(other.pos), self.end.max(other.end))
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    /// Convert to a byte range usable for slicing the source text.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.pos, self.end)
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

/// A range under construction. Either endpoint may be absent, e.g. while a
/// node has been opened but its closing token has not been consumed yet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct PartialRange {
    pub start: Option<TextPos>,
    pub end: Option<TextPos>,
}

impl PartialRange {
    /// Open a range at `start` with no end yet.
    #[inline]
    pub fn open(start: TextPos) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    #[inline]
    pub fn with_end(mut self, end: TextPos) -> Self {
        self.end = Some(end);
        self
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Close the range. Returns `None` unless both endpoints are known.
    #[inline]
    pub fn close(self) -> Option<TextRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some(TextRange::new(start, end)),
            _ => None,
        }
    }
}

impl From<TextRange> for PartialRange {
    fn from(range: TextRange) -> Self {
        Self {
            start: Some(range.pos),
            end: Some(range.end),
        }
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in bytes from the start of the line.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A resolved source position.
///
/// Equality, hashing and ordering only consider the source unit and the
/// byte offset; `line` and `column` are derived data.
#[derive(Debug, Copy, Clone)]
pub struct Position {
    pub offset: TextPos,
    /// 0-based line.
    pub line: u32,
    /// 0-based column in UTF-16 code units.
    pub column: u32,
    pub source: SourceId,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.offset == other.offset
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.offset.hash(state);
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.source, self.offset).cmp(&(other.source, other.offset))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Byte offsets of the start of each line.
///
/// The map is append-only while a scan is in progress: the cursor records a
/// new line start every time it steps over a line terminator. Offsets are
/// kept strictly increasing, so re-scanning text after a rollback never
/// records a line twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// An empty map containing only the first line.
    pub fn empty() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Build a complete line map from source text.
    pub fn new(text: &str) -> Self {
        let mut map = Self::empty();
        let mut chars = text.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        continue;
                    }
                    map.push_line_start((i + 1) as TextPos);
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    map.push_line_start((i + ch.len_utf8()) as TextPos);
                }
                _ => {}
            }
        }
        map
    }

    /// Record the start of a new line. Offsets at or before the last known
    /// line start are ignored.
    #[inline]
    pub fn push_line_start(&mut self, offset: TextPos) {
        if self.line_starts.last().is_some_and(|&last| offset > last) {
            self.line_starts.push(offset);
        }
    }

    /// Drop every line start recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.line_starts.truncate(len.max(1));
    }

    /// Number of line starts that are at or before `offset`.
    pub fn count_through(&self, offset: TextPos) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Get the line number (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the line and byte column for a byte offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }

    /// Resolve a byte offset into a [`Position`] whose column is measured in
    /// UTF-16 code units of `text`.
    pub fn resolve(&self, text: &str, offset: TextPos, source: SourceId) -> Position {
        let line = self.line_of(offset);
        let line_start = self.line_starts[line as usize] as usize;
        let end = (offset as usize).min(text.len());
        let column = text
            .get(line_start..end)
            .map(|prefix| prefix.chars().map(char::len_utf16).sum::<usize>())
            .unwrap_or(end.saturating_sub(line_start));
        Position {
            offset,
            line,
            column: column as u32,
            source,
        }
    }

    /// Get the byte offset of the start of a line.
    pub fn line_start(&self, line: u32) -> Option<TextPos> {
        self.line_starts.get(line as usize).copied()
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }
}

impl Default for LineMap {
    fn default() -> Self {
        Self::empty()
    }
}
