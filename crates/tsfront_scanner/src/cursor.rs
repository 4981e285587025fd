//! Repositionable character cursor with nested marks.
//!
//! The cursor walks a `&str` by byte offset and records line starts into the
//! session's [`LineMap`] as it crosses line terminators, so the map is built
//! incrementally during the one scan that needs it.

use memchr::memchr3;
use tsfront_core::text::{LineMap, TextPos, TextRange};

use crate::char_codes::{is_line_break, is_white_space_single_line};
use crate::error::{CursorError, PResult, SyntaxError};

/// A saved cursor position together with the line-map length at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMark {
    pub offset: usize,
    pub line_len: usize,
}

#[derive(Debug)]
pub struct CharCursor<'s> {
    text: &'s str,
    pos: usize,
    line_map: LineMap,
    marks: Vec<CursorMark>,
}

impl<'s> CharCursor<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            pos: 0,
            line_map: LineMap::empty(),
            marks: Vec::new(),
        }
    }

    #[inline]
    pub fn text(&self) -> &'s str {
        self.text
    }

    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'s str {
        self.text.get(start..end).unwrap_or("")
    }

    /// The character under the cursor, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// The `n`th character after the current one (`peek(0)` is `current()`).
    #[inline]
    pub fn peek(&self, n: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(n)
    }

    /// The character starting `offset` bytes after the cursor. Only valid for
    /// offsets known to land on a char boundary, such as after ASCII.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset..)?.chars().next()
    }

    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    /// Whether at least `n` more characters remain.
    pub fn has_next(&self, n: usize) -> bool {
        n == 0 || self.text[self.pos..].chars().nth(n - 1).is_some()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn offset(&self) -> TextPos {
        self.pos as TextPos
    }

    /// Move to an absolute byte offset. Line starts are not touched; callers
    /// that move backwards go through [`CharCursor::restore`] instead.
    pub fn set_position(&mut self, pos: usize) -> Result<(), CursorError> {
        if pos > self.text.len() || !self.text.is_char_boundary(pos) {
            return Err(CursorError::OutOfBounds { offset: pos as TextPos });
        }
        self.pos = pos;
        Ok(())
    }

    /// Consume the current character and return it.
    pub fn advance(&mut self) -> Result<char, CursorError> {
        let ch = self.current().ok_or(CursorError::OutOfBounds { offset: self.offset() })?;
        self.bump(ch);
        Ok(ch)
    }

    /// Consume `n` characters.
    pub fn advance_by(&mut self, n: usize) -> Result<(), CursorError> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    /// Consume the current character and return the one after it.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.bump(ch);
        self.current()
    }

    /// Consume the current character if it equals `expected`.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.bump(expected);
            true
        } else {
            false
        }
    }

    /// Consume `ch`, which must be the current character.
    #[inline]
    pub(crate) fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
        match ch {
            '\r' => {
                if self.byte_at(0) != Some(b'\n') {
                    self.line_map.push_line_start(self.pos as TextPos);
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => self.line_map.push_line_start(self.pos as TextPos),
            _ => {}
        }
    }

    /// Skip ASCII bytes that are known not to be line terminators.
    #[inline]
    pub(crate) fn bump_ascii(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn mark(&mut self) {
        self.marks.push(self.snapshot());
    }

    /// Return to the most recent mark and discard it.
    pub fn reset_to_mark(&mut self) -> Result<(), CursorError> {
        let mark = self.marks.pop().ok_or(CursorError::InvalidCheckpoint)?;
        self.restore(mark);
        Ok(())
    }

    /// Discard the most recent mark without moving.
    pub fn unmark(&mut self) -> Result<(), CursorError> {
        self.marks.pop().map(|_| ()).ok_or(CursorError::InvalidCheckpoint)
    }

    pub fn mark_depth(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    pub fn snapshot(&self) -> CursorMark {
        CursorMark {
            offset: self.pos,
            line_len: self.line_map.line_count(),
        }
    }

    pub fn restore(&mut self, mark: CursorMark) {
        self.pos = mark.offset.min(self.text.len());
        self.line_map.truncate(mark.line_len);
    }

    /// Skip whitespace. Line terminators are skipped only when
    /// `pass_newlines` is set. Returns whether a line terminator was crossed.
    pub fn skip_whitespace(&mut self, pass_newlines: bool) -> bool {
        let mut crossed = false;
        while let Some(ch) = self.current() {
            if is_line_break(ch) {
                if !pass_newlines {
                    break;
                }
                crossed = true;
            } else if !is_white_space_single_line(ch) {
                break;
            }
            self.bump(ch);
        }
        crossed
    }

    /// Skip any run of whitespace and comments. Returns whether a line
    /// terminator was crossed, including one inside a block comment.
    pub fn skip_comments(&mut self) -> PResult<bool> {
        let mut crossed = false;
        loop {
            crossed |= self.skip_whitespace(true);
            match (self.byte_at(0), self.byte_at(1)) {
                (Some(b'/'), Some(b'/')) => self.skip_line_comment(),
                (Some(b'/'), Some(b'*')) => crossed |= self.skip_block_comment()?,
                _ => return Ok(crossed),
            }
        }
    }

    /// Skip `// ...` up to, not including, the line terminator.
    pub(crate) fn skip_line_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        // \r and \n are found directly; the U+2028/U+2029 encodings start with 0xE2.
        let mut offset = 0;
        loop {
            match memchr3(b'\n', b'\r', 0xE2, &rest[offset..]) {
                Some(i) => {
                    let at = offset + i;
                    if rest[at] != 0xE2 || matches!(rest.get(at..at + 3), Some([0xE2, 0x80, 0xA8 | 0xA9])) {
                        self.pos += at;
                        return;
                    }
                    offset = at + 1;
                }
                None => {
                    self.pos = self.text.len();
                    return;
                }
            }
        }
    }

    /// Skip `/* ... */`. Returns whether the comment spans a line terminator.
    pub(crate) fn skip_block_comment(&mut self) -> PResult<bool> {
        let start = self.offset();
        self.bump_ascii(2);
        let mut crossed = false;
        while let Some(ch) = self.current() {
            if ch == '*' && self.byte_at(1) == Some(b'/') {
                self.bump_ascii(2);
                return Ok(crossed);
            }
            crossed |= is_line_break(ch);
            self.bump(ch);
        }
        Err(SyntaxError::UnterminatedLiteral {
            what: "comment",
            range: TextRange::new(start, self.offset()),
        })
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    pub fn into_line_map(self) -> LineMap {
        self.line_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_nest_and_restore() {
        let mut cursor = CharCursor::new("abcdef");
        cursor.advance().unwrap();
        cursor.mark();
        cursor.advance_by(2).unwrap();
        cursor.mark();
        cursor.advance().unwrap();
        assert_eq!(cursor.current(), Some('e'));

        cursor.reset_to_mark().unwrap();
        assert_eq!(cursor.current(), Some('d'));
        cursor.unmark().unwrap();
        assert_eq!(cursor.current(), Some('d'));
        assert_eq!(cursor.reset_to_mark(), Err(CursorError::InvalidCheckpoint));
        assert_eq!(cursor.unmark(), Err(CursorError::InvalidCheckpoint));
    }

    #[test]
    fn advancing_past_end_is_out_of_bounds() {
        let mut cursor = CharCursor::new("a");
        assert_eq!(cursor.advance(), Ok('a'));
        assert_eq!(cursor.advance(), Err(CursorError::OutOfBounds { offset: 1 }));
        assert!(cursor.set_position(5).is_err());
        assert!(!cursor.has_next(1));
    }

    #[test]
    fn set_position_rejects_split_chars() {
        let mut cursor = CharCursor::new("é");
        assert!(cursor.set_position(1).is_err());
        assert!(cursor.set_position(2).is_ok());
    }

    #[test]
    fn peek_and_next_char() {
        let mut cursor = CharCursor::new("xyz");
        assert_eq!(cursor.peek(2), Some('z'));
        assert_eq!(cursor.next_char(), Some('y'));
        assert!(cursor.has_next(2));
        assert!(!cursor.has_next(3));
    }

    #[test]
    fn line_terminators_are_recorded_once() {
        let mut cursor = CharCursor::new("a\r\nb\rc\u{2028}d\ne");
        while cursor.advance().is_ok() {}
        assert_eq!(cursor.line_map().line_starts(), &[0, 3, 5, 9, 11]);
    }

    #[test]
    fn reset_truncates_line_map() {
        let mut cursor = CharCursor::new("a\nb\nc");
        cursor.mark();
        cursor.advance_by(4).unwrap();
        assert_eq!(cursor.line_map().line_count(), 3);
        cursor.reset_to_mark().unwrap();
        assert_eq!(cursor.line_map().line_count(), 1);
    }

    #[test]
    fn whitespace_reports_newlines() {
        let mut cursor = CharCursor::new("  \t\n x");
        assert!(!cursor.skip_whitespace(false));
        assert_eq!(cursor.current(), Some('\n'));
        assert!(cursor.skip_whitespace(true));
        assert_eq!(cursor.current(), Some('x'));
    }

    #[test]
    fn comments_are_skipped() {
        let mut cursor = CharCursor::new("// one\n/* two\n */ /**/x");
        assert!(cursor.skip_comments().unwrap());
        assert_eq!(cursor.current(), Some('x'));
        assert_eq!(cursor.line_map().line_count(), 3);
    }

    #[test]
    fn line_comment_stops_at_paragraph_separator() {
        let mut cursor = CharCursor::new("// a\u{2029}b");
        cursor.skip_line_comment();
        assert_eq!(cursor.current(), Some('\u{2029}'));
    }

    #[test]
    fn unterminated_block_comment_is_eof() {
        let mut cursor = CharCursor::new("/* open");
        let err = cursor.skip_comments().unwrap_err();
        assert!(matches!(err, SyntaxError::UnterminatedLiteral { what: "comment", .. }));
        assert_eq!(err.code(), 1010);
    }
}
