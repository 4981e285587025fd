//! The JavaScript/TypeScript scanner.
//!
//! Tokens are produced on demand from a [`CharCursor`]. Classification is
//! split in two: [`Scanner::classify`] looks at no more than four bytes to
//! pick a token kind, and the literal scanners finish the bodies of
//! numbers, strings, templates and identifiers. Regular expressions,
//! template continuations and composite `>` operators are only produced when
//! the parser asks for them, because the characters alone cannot tell.

use std::borrow::Cow;
use std::collections::VecDeque;

use tracing::trace;
use tsfront_ast::{SyntaxKind, TokenFlags};
use tsfront_core::source::{SourceId, SourceText};
use tsfront_core::text::{LineMap, Position, TextPos, TextRange};
use tsfront_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

use crate::char_codes::*;
use crate::cursor::{CharCursor, CursorMark};
use crate::error::{CursorError, Expected, PResult, SyntaxError};
use crate::token::{NumberValue, NumericBase, NumericValue, Token, TokenValue};

const REGEX_FLAGS: &str = "dgimsuvy";

/// Everything needed to roll the scanner back to a token boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerCheckpoint {
    /// `full_start` of the first token not yet consumed.
    pub offset: TextPos,
    /// Line-map length at `offset`.
    pub line_starts: usize,
    /// Buffered tokens discarded by a restore.
    pub lookahead: usize,
    pub diagnostics: usize,
}

#[derive(Debug, Clone)]
struct Buffered<'s> {
    token: Token<'s>,
    /// Diagnostic count before this token was scanned.
    diagnostics_before: usize,
}

/// Result of the hint step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hint {
    Punctuation(SyntaxKind, usize),
    Number,
    String(char),
    Template,
    Identifier,
    PrivateName,
    Invalid(char),
}

/// Decoded run of digits, separators removed.
struct DigitRun {
    text: String,
    count: u32,
    separators: bool,
}

pub struct Scanner<'s> {
    cursor: CharCursor<'s>,
    source_id: SourceId,
    lookahead: VecDeque<Buffered<'s>>,
    /// Sticky end-of-file token, once produced.
    eof: Option<Token<'s>>,
    marks: Vec<ScannerCheckpoint>,
    diagnostics: DiagnosticCollection,
    retain_comments: bool,
}

impl<'s> Scanner<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            cursor: CharCursor::new(text),
            source_id: SourceId::default(),
            lookahead: VecDeque::with_capacity(4),
            eof: None,
            marks: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
            retain_comments: false,
        }
    }

    pub fn for_source(source: &'s SourceText) -> Self {
        Self {
            source_id: source.id(),
            ..Self::new(source.text())
        }
    }

    /// Return comments as trivia tokens instead of skipping them.
    pub fn set_retain_comments(&mut self, retain: bool) {
        self.retain_comments = retain;
    }

    #[inline]
    pub fn text(&self) -> &'s str {
        self.cursor.text()
    }

    // ========================================================================
    // Token stream
    // ========================================================================

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> PResult<Token<'s>> {
        match self.lookahead.pop_front() {
            Some(buffered) => Ok(buffered.token),
            None => self.scan(),
        }
    }

    pub fn peek(&mut self) -> PResult<&Token<'s>> {
        self.peek_nth(0)
    }

    /// The `n`th unconsumed token, `peek_nth(0)` being the next one.
    pub fn peek_nth(&mut self, n: usize) -> PResult<&Token<'s>> {
        while self.lookahead.len() <= n {
            let diagnostics_before = self.diagnostics.len();
            let token = self.scan()?;
            self.lookahead.push_back(Buffered {
                token,
                diagnostics_before,
            });
        }
        Ok(&self.lookahead[n].token)
    }

    pub fn peek_kind(&mut self) -> PResult<SyntaxKind> {
        Ok(self.peek()?.kind)
    }

    pub fn peek_nth_kind(&mut self, n: usize) -> PResult<SyntaxKind> {
        Ok(self.peek_nth(n)?.kind)
    }

    /// Consume the next token if it has the given kind.
    pub fn next_token_if(&mut self, kind: SyntaxKind) -> PResult<Option<Token<'s>>> {
        self.next_token_if_with(|token| token.kind == kind)
    }

    pub fn next_token_if_with(&mut self, pred: impl FnOnce(&Token<'s>) -> bool) -> PResult<Option<Token<'s>>> {
        if pred(self.peek()?) {
            self.next_token().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume the next token if its kind is one of `kinds`.
    pub fn next_token_is_any(&mut self, kinds: &[SyntaxKind]) -> PResult<Option<Token<'s>>> {
        self.next_token_if_with(|token| kinds.contains(&token.kind))
    }

    /// Consume a token of the given kind or fail.
    pub fn expect(&mut self, kind: SyntaxKind) -> PResult<Token<'s>> {
        let token = self.next_token()?;
        if token.kind == kind {
            return Ok(token);
        }
        if token.kind == SyntaxKind::EndOfFileToken {
            return Err(SyntaxError::UnexpectedEof {
                context: kind.describe(),
                range: token.range,
            });
        }
        Err(SyntaxError::unexpected(token.kind, token.raw, Expected::Kind(kind), token.range))
    }

    // ========================================================================
    // Checkpoints
    // ========================================================================

    pub fn checkpoint(&self) -> ScannerCheckpoint {
        let (offset, diagnostics) = match (self.lookahead.front(), &self.eof) {
            (Some(first), _) => (first.token.full_start, first.diagnostics_before),
            (None, Some(eof)) => (eof.full_start, self.diagnostics.len()),
            (None, None) => (self.cursor.offset(), self.diagnostics.len()),
        };
        ScannerCheckpoint {
            offset,
            line_starts: self.cursor.line_map().count_through(offset),
            lookahead: self.lookahead.len(),
            diagnostics,
        }
    }

    /// Roll back to `checkpoint`, discarding every token scanned since.
    pub fn restore(&mut self, checkpoint: ScannerCheckpoint) {
        trace!(offset = checkpoint.offset, dropped = self.lookahead.len(), "scanner restore");
        self.lookahead.clear();
        self.eof = None;
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.cursor.restore(CursorMark {
            offset: checkpoint.offset as usize,
            line_len: checkpoint.line_starts,
        });
    }

    pub fn mark(&mut self) {
        let checkpoint = self.checkpoint();
        trace!(offset = checkpoint.offset, depth = self.marks.len(), "scanner mark");
        self.marks.push(checkpoint);
    }

    /// Roll back to the most recent mark and discard it.
    pub fn reset(&mut self) -> Result<(), CursorError> {
        let checkpoint = self.marks.pop().ok_or(CursorError::InvalidCheckpoint)?;
        self.restore(checkpoint);
        Ok(())
    }

    /// Discard the most recent mark, keeping the current position.
    pub fn unmark(&mut self) -> Result<(), CursorError> {
        self.marks.pop().map(|_| ()).ok_or(CursorError::InvalidCheckpoint)
    }

    /// Move the cursor back to `offset`, which must not precede the first
    /// unconsumed token's own start, and drop the lookahead.
    fn rewind_to(&mut self, offset: TextPos) {
        if let Some(first) = self.lookahead.front() {
            self.diagnostics.truncate(first.diagnostics_before);
        }
        self.lookahead.clear();
        self.eof = None;
        let line_len = self.cursor.line_map().count_through(offset);
        self.cursor.restore(CursorMark {
            offset: offset as usize,
            line_len,
        });
    }

    /// Make `token` the next token to be consumed.
    fn push_front(&mut self, token: Token<'s>) -> Token<'s> {
        self.lookahead.push_front(Buffered {
            token: token.clone(),
            diagnostics_before: self.diagnostics.len(),
        });
        token
    }

    // ========================================================================
    // Parser-driven re-scans
    // ========================================================================

    /// Re-read a `/` or `/=` token as a regular expression literal. The
    /// result becomes the next token.
    pub fn rescan_as_regex(&mut self, slash: &Token<'s>) -> PResult<Token<'s>> {
        trace!(pos = slash.range.pos, "rescan as regex");
        self.rewind_to(slash.range.pos);
        let start = slash.range.pos as usize;
        self.cursor.bump_ascii(1);

        let mut in_class = false;
        let mut depth = 0u32;
        loop {
            let Some(ch) = self.cursor.current() else {
                return Err(self.unterminated("regular expression literal", start));
            };
            match ch {
                _ if is_line_break(ch) => return Err(self.unterminated("regular expression literal", start)),
                '\\' => {
                    self.cursor.bump_ascii(1);
                    match self.cursor.current() {
                        Some(escaped) if !is_line_break(escaped) => self.cursor.bump(escaped),
                        _ => return Err(self.unterminated("regular expression literal", start)),
                    }
                    continue;
                }
                '[' => in_class = true,
                ']' if in_class => in_class = false,
                '(' if !in_class => depth += 1,
                ')' if !in_class => depth = depth.saturating_sub(1),
                '/' if !in_class && depth == 0 => break,
                _ => {}
            }
            self.cursor.bump(ch);
        }
        let pattern = self.cursor.slice(start + 1, self.cursor.position());
        self.cursor.bump_ascii(1);

        let flags_start = self.cursor.position();
        while let Some(ch) = self.cursor.current() {
            if !is_identifier_part(ch) {
                break;
            }
            let at = self.cursor.position();
            if !REGEX_FLAGS.contains(ch) {
                return Err(self.invalid(&messages::UNKNOWN_REGULAR_EXPRESSION_FLAG, &[], at, at + ch.len_utf8()));
            }
            if self.cursor.slice(flags_start, at).contains(ch) {
                return Err(self.invalid(&messages::DUPLICATE_REGULAR_EXPRESSION_FLAG, &[], at, at + 1));
            }
            self.cursor.bump(ch);
        }
        let flags = self.cursor.slice(flags_start, self.cursor.position());

        let mut token = self.finish(SyntaxKind::RegularExpressionLiteral, slash.full_start, start, slash.flags);
        token.value = TokenValue::Regex { pattern, flags };
        Ok(self.push_front(token))
    }

    /// Re-read a `}` that closes a template substitution as the next
    /// template middle or tail. The result becomes the next token.
    pub fn rescan_template_continuation(&mut self, close_brace: &Token<'s>) -> PResult<Token<'s>> {
        trace!(pos = close_brace.range.pos, "rescan template continuation");
        self.rewind_to(close_brace.range.pos);
        let start = close_brace.range.pos as usize;
        self.cursor.bump_ascii(1);
        let token = self.scan_template(close_brace.full_start, start, close_brace.flags, false)?;
        Ok(self.push_front(token))
    }

    /// Merge a `>` token with directly following `>` and `=` characters into
    /// a shift, comparison or assignment operator. The result becomes the
    /// next token. Other tokens are returned unchanged.
    pub fn rescan_greater_than(&mut self, greater_than: &Token<'s>) -> PResult<Token<'s>> {
        if greater_than.kind != SyntaxKind::GreaterThanToken {
            return Ok(greater_than.clone());
        }
        let start = greater_than.range.pos as usize;
        let text = &self.text().as_bytes()[start..];
        let (kind, len) = match text {
            [b'>', b'>', b'>', b'=', ..] => (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4),
            [b'>', b'>', b'>', ..] => (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3),
            [b'>', b'>', b'=', ..] => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
            [b'>', b'>', ..] => (SyntaxKind::GreaterThanGreaterThanToken, 2),
            [b'>', b'=', ..] => (SyntaxKind::GreaterThanEqualsToken, 2),
            _ => return Ok(greater_than.clone()),
        };
        trace!(pos = start, ?kind, "rescan greater than");
        self.rewind_to(greater_than.range.pos);
        self.cursor.bump_ascii(len);
        let token = self.finish(kind, greater_than.full_start, start, greater_than.flags);
        Ok(self.push_front(token))
    }

    // ========================================================================
    // Positions and diagnostics
    // ========================================================================

    /// Resolve an offset to line and column. Offsets beyond what has been
    /// scanned are resolved against a freshly built line map.
    pub fn resolve_position(&self, offset: TextPos) -> Position {
        if offset <= self.cursor.offset() {
            self.cursor.line_map().resolve(self.text(), offset, self.source_id)
        } else {
            LineMap::new(self.text()).resolve(self.text(), offset, self.source_id)
        }
    }

    pub fn line_map(&self) -> &LineMap {
        self.cursor.line_map()
    }

    pub fn into_line_map(self) -> LineMap {
        self.cursor.into_line_map()
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Record a non-fatal diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }

    fn warn(&mut self, message: &DiagnosticMessage, args: &[&str], start: usize, end: usize) {
        let range = TextRange::new(start as TextPos, end as TextPos);
        self.diagnostics.add(Diagnostic::at(range.to_span(), message, args));
    }

    fn invalid(&self, message: &DiagnosticMessage, args: &[&str], start: usize, end: usize) -> SyntaxError {
        SyntaxError::invalid_literal(message, args, TextRange::new(start as TextPos, end as TextPos))
    }

    fn unterminated(&self, what: &'static str, start: usize) -> SyntaxError {
        SyntaxError::UnterminatedLiteral {
            what,
            range: TextRange::new(start as TextPos, self.cursor.offset()),
        }
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    fn finish(&self, kind: SyntaxKind, full_start: TextPos, start: usize, flags: TokenFlags) -> Token<'s> {
        let end = self.cursor.position();
        let mut token = Token::new(
            kind,
            full_start,
            TextRange::new(start as TextPos, end as TextPos),
            self.cursor.slice(start, end),
        );
        token.flags = flags;
        token
    }

    fn scan(&mut self) -> PResult<Token<'s>> {
        if let Some(eof) = &self.eof {
            return Ok(eof.clone());
        }
        let full_start = self.cursor.offset();
        let mut flags = TokenFlags::NONE;

        loop {
            if self.cursor.skip_whitespace(true) {
                flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
            let start = self.cursor.position();
            match (self.cursor.byte_at(0), self.cursor.byte_at(1)) {
                (Some(b'#'), Some(b'!')) if start == 0 => self.cursor.skip_line_comment(),
                (Some(b'/'), Some(b'/')) => {
                    self.cursor.skip_line_comment();
                    if self.retain_comments {
                        return Ok(self.comment(SyntaxKind::SingleLineCommentTrivia, full_start, start, flags));
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    if self.cursor.skip_block_comment()? {
                        flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    if self.retain_comments {
                        return Ok(self.comment(SyntaxKind::MultiLineCommentTrivia, full_start, start, flags));
                    }
                }
                _ => break,
            }
        }

        let start = self.cursor.position();
        if self.cursor.is_eof() {
            let token = self.finish(SyntaxKind::EndOfFileToken, full_start, start, flags);
            self.eof = Some(token.clone());
            return Ok(token);
        }

        let token = match self.classify() {
            Hint::Punctuation(kind, len) => {
                self.cursor.bump_ascii(len);
                self.finish(kind, full_start, start, flags)
            }
            Hint::Number => self.scan_number(full_start, start, flags)?,
            Hint::String(quote) => self.scan_string(quote, full_start, start, flags)?,
            Hint::Template => {
                self.cursor.bump_ascii(1);
                self.scan_template(full_start, start, flags, true)?
            }
            Hint::Identifier => self.scan_identifier(full_start, start, flags)?,
            Hint::PrivateName => {
                self.cursor.bump_ascii(1);
                let mut token = self.scan_identifier(full_start, start, flags)?;
                token.kind = SyntaxKind::PrivateIdentifier;
                token
            }
            Hint::Invalid(ch) => {
                return Err(SyntaxError::UnexpectedCharacter {
                    ch,
                    range: TextRange::new(start as TextPos, (start + ch.len_utf8()) as TextPos),
                })
            }
        };
        Ok(token)
    }

    fn comment(&self, kind: SyntaxKind, full_start: TextPos, start: usize, flags: TokenFlags) -> Token<'s> {
        let mut token = self.finish(kind, full_start, start, flags);
        token.value = TokenValue::Comment(token.raw);
        token
    }

    /// Pick the kind of the token at the cursor from at most four bytes.
    fn classify(&self) -> Hint {
        use SyntaxKind::*;
        let b = |n| self.cursor.byte_at(n);
        let punct = Hint::Punctuation;
        let Some(first) = b(0) else {
            return Hint::Invalid('\0');
        };
        match first {
            b'{' => punct(OpenBraceToken, 1),
            b'}' => punct(CloseBraceToken, 1),
            b'(' => punct(OpenParenToken, 1),
            b')' => punct(CloseParenToken, 1),
            b'[' => punct(OpenBracketToken, 1),
            b']' => punct(CloseBracketToken, 1),
            b';' => punct(SemicolonToken, 1),
            b',' => punct(CommaToken, 1),
            b'~' => punct(TildeToken, 1),
            b'@' => punct(AtToken, 1),
            b':' => punct(ColonToken, 1),
            // Composite `>` operators are formed by `rescan_greater_than`.
            b'>' => punct(GreaterThanToken, 1),
            b'.' => match (b(1), b(2)) {
                (Some(b'.'), Some(b'.')) => punct(DotDotDotToken, 3),
                (Some(d), _) if d.is_ascii_digit() => Hint::Number,
                _ => punct(DotToken, 1),
            },
            b'?' => match (b(1), b(2)) {
                (Some(b'?'), Some(b'=')) => punct(QuestionQuestionEqualsToken, 3),
                (Some(b'?'), _) => punct(QuestionQuestionToken, 2),
                (Some(b'.'), d) if !d.is_some_and(|d| d.is_ascii_digit()) => punct(QuestionDotToken, 2),
                _ => punct(QuestionToken, 1),
            },
            b'<' => match (b(1), b(2)) {
                (Some(b'<'), Some(b'=')) => punct(LessThanLessThanEqualsToken, 3),
                (Some(b'<'), _) => punct(LessThanLessThanToken, 2),
                (Some(b'='), _) => punct(LessThanEqualsToken, 2),
                _ => punct(LessThanToken, 1),
            },
            b'=' => match (b(1), b(2)) {
                (Some(b'='), Some(b'=')) => punct(EqualsEqualsEqualsToken, 3),
                (Some(b'='), _) => punct(EqualsEqualsToken, 2),
                (Some(b'>'), _) => punct(EqualsGreaterThanToken, 2),
                _ => punct(EqualsToken, 1),
            },
            b'!' => match (b(1), b(2)) {
                (Some(b'='), Some(b'=')) => punct(ExclamationEqualsEqualsToken, 3),
                (Some(b'='), _) => punct(ExclamationEqualsToken, 2),
                _ => punct(ExclamationToken, 1),
            },
            b'+' => match b(1) {
                Some(b'+') => punct(PlusPlusToken, 2),
                Some(b'=') => punct(PlusEqualsToken, 2),
                _ => punct(PlusToken, 1),
            },
            b'-' => match b(1) {
                Some(b'-') => punct(MinusMinusToken, 2),
                Some(b'=') => punct(MinusEqualsToken, 2),
                _ => punct(MinusToken, 1),
            },
            b'*' => match (b(1), b(2)) {
                (Some(b'*'), Some(b'=')) => punct(AsteriskAsteriskEqualsToken, 3),
                (Some(b'*'), _) => punct(AsteriskAsteriskToken, 2),
                (Some(b'='), _) => punct(AsteriskEqualsToken, 2),
                _ => punct(AsteriskToken, 1),
            },
            b'/' => match b(1) {
                Some(b'=') => punct(SlashEqualsToken, 2),
                _ => punct(SlashToken, 1),
            },
            b'%' => match b(1) {
                Some(b'=') => punct(PercentEqualsToken, 2),
                _ => punct(PercentToken, 1),
            },
            b'&' => match (b(1), b(2)) {
                (Some(b'&'), Some(b'=')) => punct(AmpersandAmpersandEqualsToken, 3),
                (Some(b'&'), _) => punct(AmpersandAmpersandToken, 2),
                (Some(b'='), _) => punct(AmpersandEqualsToken, 2),
                _ => punct(AmpersandToken, 1),
            },
            b'|' => match (b(1), b(2)) {
                (Some(b'|'), Some(b'=')) => punct(BarBarEqualsToken, 3),
                (Some(b'|'), _) => punct(BarBarToken, 2),
                (Some(b'='), _) => punct(BarEqualsToken, 2),
                _ => punct(BarToken, 1),
            },
            b'^' => match b(1) {
                Some(b'=') => punct(CaretEqualsToken, 2),
                _ => punct(CaretToken, 1),
            },
            b'\'' | b'"' => Hint::String(first as char),
            b'`' => Hint::Template,
            b'0'..=b'9' => Hint::Number,
            b'\\' => Hint::Identifier,
            b'#' => match self.cursor.char_at(1) {
                Some(ch) if ch == '\\' || is_identifier_start(ch) => Hint::PrivateName,
                _ => Hint::Invalid('#'),
            },
            _ => match self.cursor.current() {
                Some(ch) if is_identifier_start(ch) => Hint::Identifier,
                Some(ch) => Hint::Invalid(ch),
                None => Hint::Invalid('\0'),
            },
        }
    }

    // ------------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------------

    /// Consume digits accepted by `is_digit`, with `_` separators allowed
    /// only between two digits.
    fn scan_digit_run(&mut self, is_digit: fn(char) -> bool, allow_separators: bool) -> PResult<DigitRun> {
        let mut run = DigitRun {
            text: String::new(),
            count: 0,
            separators: false,
        };
        let mut last_was_separator = false;
        while let Some(ch) = self.cursor.current() {
            let at = self.cursor.position();
            if ch == '_' {
                if !allow_separators || run.count == 0 {
                    return Err(self.invalid(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[], at, at + 1));
                }
                if last_was_separator {
                    return Err(self.invalid(
                        &messages::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS_ARE_NOT_PERMITTED,
                        &[],
                        at,
                        at + 1,
                    ));
                }
                run.separators = true;
                last_was_separator = true;
            } else if is_digit(ch) {
                run.text.push(ch);
                run.count += 1;
                last_was_separator = false;
            } else {
                break;
            }
            self.cursor.bump_ascii(1);
        }
        if last_was_separator {
            let at = self.cursor.position() - 1;
            return Err(self.invalid(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[], at, at + 1));
        }
        Ok(run)
    }

    fn scan_number(&mut self, full_start: TextPos, start: usize, flags: TokenFlags) -> PResult<Token<'s>> {
        let prefix = match (self.cursor.byte_at(0), self.cursor.byte_at(1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some((NumericBase::Hex, TokenFlags::HEX_SPECIFIER)),
            (Some(b'0'), Some(b'b' | b'B')) => Some((NumericBase::Binary, TokenFlags::BINARY_SPECIFIER)),
            (Some(b'0'), Some(b'o' | b'O')) => Some((NumericBase::Octal, TokenFlags::OCTAL_SPECIFIER)),
            _ => None,
        };
        let token = match prefix {
            Some((base, specifier)) => self.scan_prefixed_number(base, full_start, start, flags | specifier)?,
            None if self.cursor.byte_at(0) == Some(b'0') && self.cursor.byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_legacy_number(full_start, start, flags)?
            }
            None if self.cursor.byte_at(0) == Some(b'0') && self.cursor.byte_at(1) == Some(b'_') => {
                return Err(self.invalid(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[], start + 1, start + 2));
            }
            None => self.scan_decimal_number(String::new(), 0, full_start, start, flags)?,
        };
        let base = token.numeric().map_or(NumericBase::Decimal, |n| n.base);
        self.check_numeric_suffix(base)?;
        Ok(token)
    }

    fn scan_prefixed_number(
        &mut self,
        base: NumericBase,
        full_start: TextPos,
        start: usize,
        mut flags: TokenFlags,
    ) -> PResult<Token<'s>> {
        self.cursor.bump_ascii(2);
        let (is_digit, missing): (fn(char) -> bool, &DiagnosticMessage) = match base {
            NumericBase::Hex => (is_hex_digit, &messages::HEXADECIMAL_DIGIT_EXPECTED),
            NumericBase::Binary => (is_binary_digit, &messages::BINARY_DIGIT_EXPECTED),
            _ => (is_octal_digit, &messages::OCTAL_DIGIT_EXPECTED),
        };
        let run = self.scan_digit_run(is_digit, true)?;
        if run.count == 0 {
            let at = self.cursor.position();
            return Err(self.invalid(missing, &[], at, at));
        }
        if run.separators {
            flags |= TokenFlags::CONTAINS_SEPARATOR;
        }
        if self.cursor.eat('n') {
            let mut token = self.finish(SyntaxKind::BigIntLiteral, full_start, start, flags);
            let prefix = &token.raw[..2];
            token.value = TokenValue::BigInt(Cow::Owned(format!("{}{}", prefix.to_ascii_lowercase(), run.text)));
            return Ok(token);
        }

        let radix = base.radix();
        let value = match u64::from_str_radix(&run.text, radix) {
            Ok(v) => NumberValue::Integer(v),
            Err(_) => NumberValue::Float(
                run.text
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0.0, |acc, d| acc * radix as f64 + d as f64),
            ),
        };
        let mut token = self.finish(SyntaxKind::NumericLiteral, full_start, start, flags);
        token.value = TokenValue::Numeric(NumericValue {
            base,
            value,
            digits: run.count,
            separators: run.separators,
        });
        Ok(token)
    }

    /// `0` followed by more digits: implicit octal unless an `8`/`9`, a
    /// fraction or an exponent turns it into a decimal literal.
    fn scan_legacy_number(&mut self, full_start: TextPos, start: usize, flags: TokenFlags) -> PResult<Token<'s>> {
        self.cursor.bump_ascii(1);
        let run = self.scan_digit_run(|c| c.is_ascii_digit(), false)?;
        let is_octal = run.text.chars().all(is_octal_digit);
        let decimal_tail = matches!(self.cursor.byte_at(0), Some(b'.' | b'e' | b'E'));

        if !is_octal || decimal_tail {
            let text = format!("0{}", run.text);
            return self.scan_decimal_number(text, run.count + 1, full_start, start, flags);
        }

        let value = match u64::from_str_radix(&run.text, 8) {
            Ok(v) => NumberValue::Integer(v),
            Err(_) => NumberValue::Float(
                run.text
                    .chars()
                    .filter_map(|c| c.to_digit(8))
                    .fold(0.0, |acc, d| acc * 8.0 + d as f64),
            ),
        };
        let mut token = self.finish(SyntaxKind::NumericLiteral, full_start, start, flags | TokenFlags::IMPLICIT_OCTAL);
        let suggestion = format!("0o{}", run.text);
        self.warn(
            &messages::OCTAL_LITERALS_ARE_DEPRECATED_USE_THE_SYNTAX_0,
            &[&suggestion],
            start,
            self.cursor.position(),
        );
        token.value = TokenValue::Numeric(NumericValue {
            base: NumericBase::ImplicitOctal,
            value,
            digits: run.count,
            separators: false,
        });
        Ok(token)
    }

    /// Decimal literal. `integer`/`integer_digits` hold digits already
    /// consumed by the legacy-octal path.
    fn scan_decimal_number(
        &mut self,
        mut text: String,
        mut digits: u32,
        full_start: TextPos,
        start: usize,
        mut flags: TokenFlags,
    ) -> PResult<Token<'s>> {
        let legacy = digits > 0;
        let mut separators = false;
        let mut integral = true;

        if !legacy {
            let run = self.scan_digit_run(|c| c.is_ascii_digit(), true)?;
            text.push_str(&run.text);
            digits += run.count;
            separators |= run.separators;
        }
        if self.cursor.byte_at(0) == Some(b'.') {
            self.cursor.bump_ascii(1);
            integral = false;
            text.push('.');
            let run = self.scan_digit_run(|c| c.is_ascii_digit(), true)?;
            text.push_str(&run.text);
            digits += run.count;
            separators |= run.separators;
        }
        if let Some(b'e' | b'E') = self.cursor.byte_at(0) {
            self.cursor.bump_ascii(1);
            integral = false;
            flags |= TokenFlags::SCIENTIFIC;
            text.push('e');
            if let Some(sign @ (b'+' | b'-')) = self.cursor.byte_at(0) {
                self.cursor.bump_ascii(1);
                text.push(sign as char);
            }
            let run = self.scan_digit_run(|c| c.is_ascii_digit(), true)?;
            if run.count == 0 {
                let at = self.cursor.position();
                return Err(self.invalid(&messages::DIGIT_EXPECTED, &[], at, at));
            }
            text.push_str(&run.text);
            digits += run.count;
            separators |= run.separators;
        }
        if separators {
            flags |= TokenFlags::CONTAINS_SEPARATOR;
        }

        if integral && !legacy && self.cursor.eat('n') {
            let mut token = self.finish(SyntaxKind::BigIntLiteral, full_start, start, flags);
            let raw = token.raw;
            token.value = TokenValue::BigInt(if separators {
                Cow::Owned(text)
            } else {
                Cow::Borrowed(&raw[..raw.len() - 1])
            });
            return Ok(token);
        }

        let value = match text.parse::<u64>() {
            Ok(v) if integral => NumberValue::Integer(v),
            _ => NumberValue::Float(text.parse::<f64>().unwrap_or(f64::NAN)),
        };
        let mut token = self.finish(SyntaxKind::NumericLiteral, full_start, start, flags);
        token.value = TokenValue::Numeric(NumericValue {
            base: NumericBase::Decimal,
            value,
            digits,
            separators,
        });
        Ok(token)
    }

    /// A numeric literal must not run straight into an identifier or into a
    /// digit its base does not allow.
    fn check_numeric_suffix(&self, base: NumericBase) -> PResult<()> {
        match self.cursor.current() {
            Some(ch) if ch.is_ascii_digit() => {
                let message = match base {
                    NumericBase::Binary => &messages::BINARY_DIGIT_EXPECTED,
                    NumericBase::Octal => &messages::OCTAL_DIGIT_EXPECTED,
                    _ => &messages::DIGIT_EXPECTED,
                };
                let at = self.cursor.position();
                Err(self.invalid(message, &[], at, at + 1))
            }
            Some(ch) if ch == '\\' || is_identifier_start(ch) => {
                let at = self.cursor.position();
                Err(self.invalid(
                    &messages::AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
                    &[],
                    at,
                    at + ch.len_utf8(),
                ))
            }
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Strings and templates
    // ------------------------------------------------------------------------

    fn scan_string(&mut self, quote: char, full_start: TextPos, start: usize, mut flags: TokenFlags) -> PResult<Token<'s>> {
        self.cursor.bump_ascii(1);
        if quote == '\'' {
            flags |= TokenFlags::SINGLE_QUOTE;
        }
        let content_start = self.cursor.position();
        let mut cooked: Option<String> = None;
        let mut segment = content_start;
        loop {
            let Some(ch) = self.cursor.current() else {
                return Err(self.unterminated("string literal", start));
            };
            if ch == quote {
                break;
            }
            match ch {
                '\n' | '\r' => return Err(self.unterminated("string literal", start)),
                '\\' => {
                    let mut out = cooked.take().unwrap_or_default();
                    out.push_str(self.cursor.slice(segment, self.cursor.position()));
                    flags |= self.scan_escape(&mut out, false)?;
                    cooked = Some(out);
                    segment = self.cursor.position();
                }
                _ => self.cursor.bump(ch),
            }
        }
        let content_end = self.cursor.position();
        self.cursor.bump_ascii(1);

        let value = match cooked {
            Some(mut out) => {
                out.push_str(self.cursor.slice(segment, content_end));
                Cow::Owned(out)
            }
            None => Cow::Borrowed(self.cursor.slice(content_start, content_end)),
        };
        let mut token = self.finish(SyntaxKind::StringLiteral, full_start, start, flags);
        token.value = TokenValue::String(value);
        Ok(token)
    }

    /// Scan a template chunk whose opening delimiter (`` ` `` or `}`) has
    /// been consumed.
    fn scan_template(&mut self, full_start: TextPos, start: usize, flags: TokenFlags, head: bool) -> PResult<Token<'s>> {
        let content_start = self.cursor.position();
        let mut cooked: Option<String> = None;
        let mut segment = content_start;
        let (kind, content_end) = loop {
            let Some(ch) = self.cursor.current() else {
                return Err(self.unterminated("template literal", start));
            };
            let at = self.cursor.position();
            match ch {
                '`' => {
                    self.cursor.bump_ascii(1);
                    let kind = if head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                    break (kind, at);
                }
                '$' if self.cursor.byte_at(1) == Some(b'{') => {
                    self.cursor.bump_ascii(2);
                    let kind = if head { SyntaxKind::TemplateHead } else { SyntaxKind::TemplateMiddle };
                    break (kind, at);
                }
                '\\' => {
                    let mut out = cooked.take().unwrap_or_default();
                    out.push_str(self.cursor.slice(segment, at));
                    self.scan_escape(&mut out, true)?;
                    cooked = Some(out);
                    segment = self.cursor.position();
                }
                '\r' => {
                    let mut out = cooked.take().unwrap_or_default();
                    out.push_str(self.cursor.slice(segment, at));
                    out.push('\n');
                    self.cursor.bump('\r');
                    self.cursor.eat('\n');
                    cooked = Some(out);
                    segment = self.cursor.position();
                }
                _ => self.cursor.bump(ch),
            }
        };

        let raw = self.cursor.slice(content_start, content_end);
        let cooked = match cooked {
            Some(mut out) => {
                out.push_str(self.cursor.slice(segment, content_end));
                Cow::Owned(out)
            }
            None => Cow::Borrowed(raw),
        };
        let mut token = self.finish(kind, full_start, start, flags);
        token.value = TokenValue::Template { cooked, raw };
        Ok(token)
    }

    /// Decode one escape sequence starting at `\` into `out`. Returns flags
    /// describing the escape.
    fn scan_escape(&mut self, out: &mut String, in_template: bool) -> PResult<TokenFlags> {
        let start = self.cursor.position();
        self.cursor.bump_ascii(1);
        let Some(ch) = self.cursor.current() else {
            // The enclosing literal reports the missing terminator.
            return Ok(TokenFlags::NONE);
        };
        match ch {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{000B}'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            '0' if !self.cursor.byte_at(1).is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            '0'..='7' => {
                if in_template {
                    return Err(self.invalid_escape(start, start + 2));
                }
                let mut value = 0u32;
                let mut len = 0;
                while let Some(d) = self.cursor.current().and_then(|c| c.to_digit(8)) {
                    if len == 3 || value * 8 + d > 255 {
                        break;
                    }
                    value = value * 8 + d;
                    len += 1;
                    self.cursor.bump_ascii(1);
                }
                out.push(char::from(value as u8));
                let suggestion = format!("\\x{value:02X}");
                self.warn(
                    &messages::OCTAL_ESCAPE_SEQUENCES_ARE_DEPRECATED_USE_THE_SYNTAX_0,
                    &[&suggestion],
                    start,
                    self.cursor.position(),
                );
                return Ok(TokenFlags::OCTAL_ESCAPE);
            }
            '8' | '9' => {
                if in_template {
                    return Err(self.invalid_escape(start, start + 2));
                }
                let escape = format!("\\{ch}");
                let plain = ch.to_string();
                self.warn(&messages::ESCAPE_SEQUENCE_0_IS_UNNECESSARY, &[&escape, &plain], start, start + 2);
                out.push(ch);
            }
            'x' => {
                self.cursor.bump_ascii(1);
                let value = self.scan_hex_digits(2, start)?;
                out.push(char::from(value as u8));
                return Ok(TokenFlags::NONE);
            }
            'u' => {
                let code = self.scan_unicode_escape(start)?;
                self.push_code_point(out, code, start);
                return Ok(TokenFlags::NONE);
            }
            '\r' => {
                self.cursor.bump('\r');
                self.cursor.eat('\n');
                return Ok(TokenFlags::NONE);
            }
            '\n' => {
                self.cursor.bump('\n');
                self.cursor.eat('\r');
                return Ok(TokenFlags::NONE);
            }
            '\u{2028}' | '\u{2029}' => {}
            _ => out.push(ch),
        }
        self.cursor.bump(ch);
        Ok(TokenFlags::NONE)
    }

    fn invalid_escape(&self, start: usize, end: usize) -> SyntaxError {
        let text = self.cursor.slice(start, end.min(self.text().len()));
        self.invalid(&messages::INVALID_ESCAPE_SEQUENCE, &[text], start, end)
    }

    /// Exactly `count` hex digits.
    fn scan_hex_digits(&mut self, count: usize, escape_start: usize) -> PResult<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            match self.cursor.current().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    value = value * 16 + d;
                    self.cursor.bump_ascii(1);
                }
                None => {
                    let at = self.cursor.position();
                    return Err(self.invalid(&messages::HEXADECIMAL_DIGIT_EXPECTED, &[], escape_start, at));
                }
            }
        }
        Ok(value)
    }

    /// Decode `\uXXXX` or `\u{X...}` with the cursor on the `u`.
    fn scan_unicode_escape(&mut self, escape_start: usize) -> PResult<u32> {
        self.cursor.bump_ascii(1);
        if !self.cursor.eat('{') {
            return self.scan_hex_digits(4, escape_start);
        }
        let mut value = 0u32;
        let mut count = 0;
        while let Some(d) = self.cursor.current().and_then(|c| c.to_digit(16)) {
            value = value.saturating_mul(16).saturating_add(d);
            count += 1;
            self.cursor.bump_ascii(1);
        }
        let at = self.cursor.position();
        if count == 0 {
            return Err(self.invalid(&messages::HEXADECIMAL_DIGIT_EXPECTED, &[], escape_start, at));
        }
        if value > 0x10FFFF {
            return Err(self.invalid(
                &messages::AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF,
                &[],
                escape_start,
                at,
            ));
        }
        if !self.cursor.eat('}') {
            return Err(self.invalid(&messages::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE, &[], escape_start, at));
        }
        Ok(value)
    }

    /// Append a decoded code point, pairing surrogate halves written as two
    /// consecutive `\u` escapes.
    fn push_code_point(&mut self, out: &mut String, code: u32, escape_start: usize) {
        if let Some(ch) = char::from_u32(code) {
            out.push(ch);
            return;
        }
        if (0xD800..0xDC00).contains(&code) {
            let bytes = self.text().as_bytes();
            let at = self.cursor.position();
            if bytes.get(at..at + 2) == Some(b"\\u") {
                let low = self
                    .text()
                    .get(at + 2..at + 6)
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .filter(|low| (0xDC00..0xE000).contains(low));
                if let Some(low) = low {
                    self.cursor.bump_ascii(6);
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return;
                }
            }
        }
        out.push(char::REPLACEMENT_CHARACTER);
        let escape = format!("\\u{code:04X}");
        self.warn(&messages::LONE_SURROGATE_0_REPLACED, &[&escape], escape_start, self.cursor.position());
    }

    // ------------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------------

    fn scan_identifier(&mut self, full_start: TextPos, start: usize, mut flags: TokenFlags) -> PResult<Token<'s>> {
        let name_start = self.cursor.position();
        let mut cooked: Option<String> = None;
        let mut segment = name_start;
        loop {
            let at = self.cursor.position();
            match self.cursor.current() {
                Some('\\') => {
                    let mut out = cooked.take().unwrap_or_default();
                    out.push_str(self.cursor.slice(segment, at));
                    if self.cursor.byte_at(1) != Some(b'u') {
                        return Err(self.invalid_escape(at, at + 2));
                    }
                    self.cursor.bump_ascii(1);
                    let code = self.scan_unicode_escape(at)?;
                    let first = at == name_start;
                    match char::from_u32(code) {
                        Some(ch) if (first && is_identifier_start(ch)) || (!first && is_identifier_part(ch)) => {
                            out.push(ch)
                        }
                        _ => return Err(self.invalid_escape(at, self.cursor.position())),
                    }
                    flags |= TokenFlags::UNICODE_ESCAPE;
                    cooked = Some(out);
                    segment = self.cursor.position();
                }
                Some(ch) if is_identifier_part(ch) => self.cursor.bump(ch),
                _ => break,
            }
        }
        let end = self.cursor.position();
        let name = match cooked {
            Some(mut out) => {
                out.push_str(self.cursor.slice(segment, end));
                Cow::Owned(out)
            }
            None => Cow::Borrowed(self.cursor.slice(name_start, end)),
        };
        let kind = if flags.contains(TokenFlags::UNICODE_ESCAPE) {
            SyntaxKind::Identifier
        } else {
            SyntaxKind::from_keyword(&name).unwrap_or(SyntaxKind::Identifier)
        };
        let mut token = self.finish(kind, full_start, start, flags);
        token.value = TokenValue::Identifier(match name {
            // Private names keep their `#`.
            Cow::Borrowed(_) if start < name_start => Cow::Borrowed(token.raw),
            Cow::Owned(name) if start < name_start => Cow::Owned(format!("#{name}")),
            name => name,
        });
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = scanner.next_token().unwrap();
            if token.kind == SyntaxKind::EndOfFileToken {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn hint_step_splits_punctuation() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("= == === => / /= . ... .5"),
            vec![
                EqualsToken,
                EqualsEqualsToken,
                EqualsEqualsEqualsToken,
                EqualsGreaterThanToken,
                SlashToken,
                SlashEqualsToken,
                DotToken,
                DotDotDotToken,
                NumericLiteral,
            ]
        );
    }

    #[test]
    fn question_dot_before_digit_is_conditional() {
        use SyntaxKind::*;
        assert_eq!(kinds("a?.5:1"), vec![Identifier, QuestionToken, NumericLiteral, ColonToken, NumericLiteral]);
        assert_eq!(kinds("a?.b"), vec![Identifier, QuestionDotToken, Identifier]);
    }

    #[test]
    fn greater_than_is_always_single() {
        use SyntaxKind::*;
        assert_eq!(
            kinds(">>>= >="),
            vec![GreaterThanToken, GreaterThanToken, GreaterThanToken, EqualsToken, GreaterThanToken, EqualsToken]
        );
    }

    #[test]
    fn peek_does_not_consume() {
        let mut scanner = Scanner::new("a b c");
        assert_eq!(scanner.peek_nth(2).unwrap().raw, "c");
        assert_eq!(scanner.peek().unwrap().raw, "a");
        assert_eq!(scanner.next_token().unwrap().raw, "a");
        assert_eq!(scanner.next_token().unwrap().raw, "b");
    }

    #[test]
    fn checkpoint_discards_lookahead_warnings() {
        let mut scanner = Scanner::new("x 017 y");
        scanner.next_token().unwrap();
        let checkpoint = scanner.checkpoint();
        scanner.peek_nth(1).unwrap();
        assert_eq!(scanner.diagnostics().len(), 1);
        scanner.restore(checkpoint);
        assert!(scanner.diagnostics().is_empty());
        assert_eq!(scanner.next_token().unwrap().raw, "017");
        assert_eq!(scanner.diagnostics().len(), 1);
    }
}
