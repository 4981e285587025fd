//! The recursive descent parser.
//!
//! The grammar is split across several files, each adding an
//! `impl Parser` block: statements, declarations, expressions, types and
//! the expression-to-pattern reinterpretation. This file holds the state,
//! the token helpers shared by all of them and the compilation-unit entry.
//!
//! Errors are never recovered from. Every production returns `PResult` and
//! the first `Err` aborts the parse, except inside [`Parser::speculate`],
//! where an `Err` only means the alternative did not apply.

use std::borrow::Cow;

use bumpalo::Bump;
use tracing::{debug, trace};
use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::intern::StringInterner;
use tsfront_core::source::SourceText;
use tsfront_core::text::{TextPos, TextRange};
use tsfront_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use tsfront_scanner::{Expected, PResult, Scanner, ScannerCheckpoint, SyntaxError, Token, TokenValue};

use crate::context::{ContextCheckpoint, ContextFlags, ParseContext};
use crate::features::{feature, FeatureSet};
use crate::labels::LabelTable;
use crate::options::ParserOptions;

/// Everything a speculative parse can disturb, captured so that a failed
/// attempt leaves no trace.
#[derive(Debug, Clone)]
pub struct ParserCheckpoint {
    pub scanner: ScannerCheckpoint,
    pub context: ContextCheckpoint,
    pub labels: LabelTable,
    diagnostics: usize,
    prev_end: TextPos,
    depth: u32,
    cover_initializer: Option<TextRange>,
}

/// Parses one source unit into an arena-allocated [`CompilationUnit`].
pub struct Parser<'a> {
    pub(crate) arena: &'a Bump,
    pub(crate) source: &'a SourceText,
    pub(crate) scanner: Scanner<'a>,
    pub(crate) options: ParserOptions,
    pub(crate) features: FeatureSet,
    pub(crate) context: ParseContext,
    pub(crate) labels: LabelTable,
    pub(crate) interner: StringInterner,
    /// Parser warnings. Scanner diagnostics live in the scanner, whose
    /// re-scans may drop them.
    pub(crate) diagnostics: DiagnosticCollection,
    pub(crate) depth: u32,
    /// End of the last consumed token.
    pub(crate) prev_end: TextPos,
    /// `{ a = 1 }` seen in an object literal that has not yet become a
    /// pattern.
    pub(crate) cover_initializer: Option<TextRange>,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source: &'a SourceText, options: ParserOptions) -> Self {
        Self::with_interner(arena, source, options, StringInterner::new())
    }

    /// Parser that records identifier atoms in `interner`, which may be
    /// shared with parsers running on other threads.
    pub fn with_interner(
        arena: &'a Bump,
        source: &'a SourceText,
        options: ParserOptions,
        interner: StringInterner,
    ) -> Self {
        let features = options.feature_set();
        let mut flags = ContextFlags::IN_ALLOWED | ContextFlags::COVER_GRAMMAR | ContextFlags::TYPE_NON_NULL_POSTFIX;
        if options.starts_strict() {
            flags |= ContextFlags::STRICT;
        }
        if options.module {
            flags |= ContextFlags::AWAIT_ALLOWED;
        }
        Self {
            arena,
            source,
            scanner: Scanner::for_source(source),
            options,
            features,
            context: ParseContext::new(flags),
            labels: LabelTable::new(),
            interner,
            diagnostics: DiagnosticCollection::new(),
            depth: 0,
            prev_end: 0,
            cover_initializer: None,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Parse the whole source unit.
    pub fn parse_compilation_unit(mut self) -> Result<CompilationUnit<'a>, SyntaxError> {
        debug!(file = self.source.name(), len = self.source.len(), "parse compilation unit");
        let statements = self.parse_statement_list(SyntaxKind::EndOfFileToken, true, true)?;
        self.expect(SyntaxKind::EndOfFileToken)?;

        let strict = self.context.has(ContextFlags::STRICT);
        let module = self.options.module || statements.iter().any(is_module_item);
        let end = self.source.len() as TextPos;
        let mut data = NodeData::new(SyntaxKind::CompilationUnit, 0, end);
        if strict {
            data = data.with_flags(NodeFlags::STRICT);
        }

        let file_name = self.source.name().to_string();
        let mut diagnostics = self.scanner.take_diagnostics();
        diagnostics.extend(std::mem::take(&mut self.diagnostics));
        diagnostics.attach_file(&file_name);
        diagnostics.sort();
        debug!(
            file = file_name.as_str(),
            statements = statements.len(),
            warnings = diagnostics.len(),
            strict,
            module,
            "compilation unit parsed"
        );

        Ok(CompilationUnit {
            data,
            statements,
            source: self.source.id(),
            file_name,
            line_map: self.scanner.into_line_map(),
            strict,
            module,
            diagnostics: diagnostics.into_diagnostics(),
            interner: self.interner,
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn peek(&mut self) -> PResult<&Token<'a>> {
        self.scanner.peek()
    }

    #[inline]
    pub(crate) fn peek_kind(&mut self) -> PResult<SyntaxKind> {
        self.scanner.peek_kind()
    }

    #[inline]
    pub(crate) fn peek_nth_kind(&mut self, n: usize) -> PResult<SyntaxKind> {
        self.scanner.peek_nth_kind(n)
    }

    #[inline]
    pub(crate) fn at(&mut self, kind: SyntaxKind) -> PResult<bool> {
        Ok(self.peek_kind()? == kind)
    }

    /// Consume the next token.
    pub(crate) fn bump(&mut self) -> PResult<Token<'a>> {
        let token = self.scanner.next_token()?;
        self.prev_end = token.end();
        Ok(token)
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> PResult<bool> {
        if self.at(kind)? {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> PResult<Token<'a>> {
        let token = self.scanner.expect(kind)?;
        self.prev_end = token.end();
        Ok(token)
    }

    /// Start offset of the next token.
    #[inline]
    pub(crate) fn start(&mut self) -> PResult<TextPos> {
        Ok(self.peek()?.pos())
    }

    /// Node data spanning from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn finish(&self, kind: SyntaxKind, start: TextPos) -> NodeData {
        NodeData::new(kind, start, self.prev_end.max(start))
    }

    pub(crate) fn line_break_before(&mut self) -> PResult<bool> {
        Ok(self.peek()?.has_preceding_line_break())
    }

    pub(crate) fn line_break_before_nth(&mut self, n: usize) -> PResult<bool> {
        Ok(self.scanner.peek_nth(n)?.has_preceding_line_break())
    }

    /// `;`, or an inserted one before `}`, end of input or a line break.
    pub(crate) fn parse_semicolon(&mut self) -> PResult<()> {
        if self.can_insert_semicolon()? {
            self.eat(SyntaxKind::SemicolonToken)?;
            Ok(())
        } else {
            self.unexpected(Expected::Kind(SyntaxKind::SemicolonToken))
        }
    }

    pub(crate) fn can_insert_semicolon(&mut self) -> PResult<bool> {
        let token = self.peek()?;
        Ok(matches!(
            token.kind,
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || token.has_preceding_line_break())
    }

    // ========================================================================
    // Errors and feature gates
    // ========================================================================

    /// Fail at the next token.
    pub(crate) fn unexpected<T>(&mut self, expected: Expected) -> PResult<T> {
        let token = self.peek()?;
        if token.kind == SyntaxKind::EndOfFileToken {
            let context = match &expected {
                Expected::Kind(kind) => kind.describe(),
                Expected::Value(value) => *value,
                Expected::Nothing | Expected::Reason(_) => "source text",
            };
            return Err(SyntaxError::UnexpectedEof { context, range: token.range });
        }
        Err(SyntaxError::unexpected(token.kind, token.raw, expected, token.range))
    }

    pub(crate) fn semantic<T>(&self, message: &DiagnosticMessage, args: &[&str], range: TextRange) -> PResult<T> {
        Err(SyntaxError::semantic(message, args, range))
    }

    pub(crate) fn warn(&mut self, message: &DiagnosticMessage, args: &[&str], range: TextRange) {
        self.diagnostics.add(Diagnostic::at(range.to_span(), message, args));
    }

    #[inline]
    pub(crate) fn supports(&self, key: &str) -> bool {
        self.features.supports(key)
    }

    #[inline]
    pub(crate) fn typescript(&self) -> bool {
        self.features.supports(feature::TYPESCRIPT)
    }

    /// Fail with `UnsupportedFeature` unless the dialect has `key`.
    pub(crate) fn require(&self, key: &'static str, range: TextRange) -> PResult<()> {
        if self.features.supports(key) {
            return Ok(());
        }
        if !self.context.has(ContextFlags::SPECULATIVE) {
            debug!(feature = key, pos = range.pos, "feature gate rejected construct");
        }
        Err(SyntaxError::UnsupportedFeature {
            feature: key.to_string(),
            range,
        })
    }

    // ========================================================================
    // Context scoping
    // ========================================================================

    /// Run `f` in a frame with `set` turned on and `clear` turned off.
    pub(crate) fn scoped<T>(
        &mut self,
        set: ContextFlags,
        clear: ContextFlags,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.context.push_with(set, clear);
        let result = f(self);
        self.context.pop();
        result
    }

    /// Parse a sub-expression whose cover-grammar status is tracked on its
    /// own. A shorthand initializer left unclaimed inside it is an error.
    pub(crate) fn isolated<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.context.isolate_cover_grammar();
        let outer = self.cover_initializer.take();
        let result = f(self);
        self.context.pop();
        let result = match (result, self.cover_initializer.take()) {
            (Ok(_), Some(range)) => self.semantic(&messages::INVALID_SHORTHAND_PROPERTY_INITIALIZER, &[], range),
            (result, _) => result,
        };
        self.cover_initializer = outer;
        result
    }

    /// Parse a sub-expression whose cover-grammar bits are and-ed into the
    /// enclosing one, as array and object literal elements are.
    pub(crate) fn inherited<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.context.push_cover_grammar();
        let result = f(self);
        self.context.inherit_cover_grammar();
        result
    }

    /// Record that the expression just built is neither an assignment target
    /// nor a binding element.
    #[inline]
    pub(crate) fn not_a_target(&mut self) {
        self.context.set(ContextFlags::COVER_GRAMMAR, false);
    }

    #[inline]
    pub(crate) fn strict(&self) -> bool {
        self.context.has(ContextFlags::STRICT)
    }

    /// Node flags contributed by the surrounding context.
    pub(crate) fn context_node_flags(&self) -> NodeFlags {
        let mut flags = NodeFlags::NONE;
        if self.context.has(ContextFlags::AMBIENT) {
            flags |= NodeFlags::AMBIENT;
        }
        if self.strict() {
            flags |= NodeFlags::STRICT;
        }
        flags
    }

    /// Guard against unbounded recursion on deeply nested input.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            let range = self.peek()?.range;
            let limit = self.options.max_depth.to_string();
            debug!(depth = self.depth, "nesting limit reached");
            return self.semantic(&messages::MAXIMUM_NESTING_DEPTH_OF_0_EXCEEDED, &[&limit], range);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    pub(crate) fn checkpoint(&self) -> ParserCheckpoint {
        ParserCheckpoint {
            scanner: self.scanner.checkpoint(),
            context: self.context.checkpoint(),
            labels: self.labels.clone(),
            diagnostics: self.diagnostics.len(),
            prev_end: self.prev_end,
            depth: self.depth,
            cover_initializer: self.cover_initializer,
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: ParserCheckpoint) {
        self.scanner.restore(checkpoint.scanner);
        self.context.restore(checkpoint.context);
        self.labels = checkpoint.labels;
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.prev_end = checkpoint.prev_end;
        self.depth = checkpoint.depth;
        self.cover_initializer = checkpoint.cover_initializer;
    }

    /// Try an alternative. `Some` commits what `f` consumed; `None` rolls the
    /// scanner, context and labels back to where they were.
    pub(crate) fn speculate<T>(&mut self, what: &'static str, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        let pos = checkpoint.scanner.offset;
        let was_speculative = self.context.has(ContextFlags::SPECULATIVE);
        self.context.set(ContextFlags::SPECULATIVE, true);
        trace!(what, pos, "speculate");
        match f(self) {
            Ok(value) => {
                self.context.set(ContextFlags::SPECULATIVE, was_speculative);
                trace!(what, pos, "speculation committed");
                Some(value)
            }
            Err(err) => {
                trace!(what, pos, error = %err, "speculation rolled back");
                self.restore(checkpoint);
                None
            }
        }
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub(crate) fn alloc_list<T>(&self, items: Vec<T>) -> &'a [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    pub(crate) fn alloc_cow(&self, text: Cow<'a, str>) -> &'a str {
        match text {
            Cow::Borrowed(text) => text,
            Cow::Owned(text) => self.arena.alloc_str(&text),
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Build an identifier node from an identifier, keyword or private-name
    /// token.
    pub(crate) fn identifier_from(&self, token: &Token<'a>) -> Identifier<'a> {
        let name = match &token.value {
            TokenValue::Identifier(name) => self.alloc_cow(name.clone()),
            _ => token.raw,
        };
        let kind = if token.kind == SyntaxKind::PrivateIdentifier {
            SyntaxKind::PrivateIdentifier
        } else {
            SyntaxKind::Identifier
        };
        Identifier {
            data: NodeData::with_range(kind, token.range),
            name,
            symbol: self.interner.intern(name),
            original_keyword_kind: token.kind.is_keyword().then_some(token.kind),
        }
    }

    /// Whether a token of `kind` may be used as an identifier reference or
    /// binding here.
    pub(crate) fn is_identifier_kind(&self, kind: SyntaxKind) -> bool {
        match kind {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword => !self.strict() && !self.context.has(ContextFlags::YIELD_ALLOWED),
            SyntaxKind::AwaitKeyword => !self.context.has(ContextFlags::AWAIT_ALLOWED),
            _ if kind.is_strict_mode_reserved_word() => !self.strict(),
            _ => kind.is_contextual_keyword(),
        }
    }

    /// Reject a name token that cannot be an identifier here.
    fn check_identifier(&self, token: &Token<'a>) -> PResult<()> {
        // Escaped spellings of reserved words never become keywords, but
        // they are still not identifiers.
        let kind = match (&token.kind, &token.value) {
            (SyntaxKind::Identifier, TokenValue::Identifier(name)) => {
                SyntaxKind::from_keyword(name).unwrap_or(SyntaxKind::Identifier)
            }
            (kind, _) => *kind,
        };
        self.check_identifier_kind(kind, token.text(), token.range)
    }

    /// Re-check a name that was parsed as an identifier name, such as the
    /// key of a shorthand property.
    pub(crate) fn check_identifier_name(&self, id: &Identifier<'a>) -> PResult<()> {
        let kind = id
            .original_keyword_kind
            .or_else(|| SyntaxKind::from_keyword(id.name))
            .unwrap_or(SyntaxKind::Identifier);
        self.check_identifier_kind(kind, id.name, id.data.range)
    }

    fn check_identifier_kind(&self, kind: SyntaxKind, text: &str, range: TextRange) -> PResult<()> {
        if self.is_identifier_kind(kind) {
            return Ok(());
        }
        if kind.is_strict_mode_reserved_word() && self.strict() {
            return self.semantic(&messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE, &[text], range);
        }
        if kind.is_keyword() {
            return self.semantic(&messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD, &[text], range);
        }
        Err(SyntaxError::unexpected(kind, text, Expected::Kind(SyntaxKind::Identifier), range))
    }

    /// An identifier used as a reference or a binding.
    pub(crate) fn parse_identifier(&mut self) -> PResult<Identifier<'a>> {
        if self.peek_kind()? == SyntaxKind::EndOfFileToken {
            return self.unexpected(Expected::Kind(SyntaxKind::Identifier));
        }
        let token = self.bump()?;
        self.check_identifier(&token)?;
        Ok(self.identifier_from(&token))
    }

    /// Any identifier or keyword, as after `.` or in property keys.
    pub(crate) fn parse_identifier_name(&mut self) -> PResult<Identifier<'a>> {
        if !self.peek_kind()?.is_identifier_or_keyword() {
            return self.unexpected(Expected::Kind(SyntaxKind::Identifier));
        }
        let token = self.bump()?;
        Ok(self.identifier_from(&token))
    }

    /// An identifier name or a `#private` name.
    pub(crate) fn parse_member_name(&mut self) -> PResult<Identifier<'a>> {
        if self.at(SyntaxKind::PrivateIdentifier)? {
            let token = self.bump()?;
            self.require(feature::PRIVATE_NAMES, token.range)?;
            return Ok(self.identifier_from(&token));
        }
        self.parse_identifier_name()
    }

    /// A plain string literal node from a consumed string token.
    pub(crate) fn string_literal_from(&self, token: &Token<'a>) -> StringLiteral<'a> {
        let value = match &token.value {
            TokenValue::String(value) => self.alloc_cow(value.clone()),
            _ => token.raw,
        };
        StringLiteral {
            data: NodeData::with_range(SyntaxKind::StringLiteral, token.range),
            value,
            single_quote: token.flags.contains(TokenFlags::SINGLE_QUOTE),
        }
    }

    pub(crate) fn parse_string_literal(&mut self) -> PResult<StringLiteral<'a>> {
        let token = self.expect(SyntaxKind::StringLiteral)?;
        Ok(self.string_literal_from(&token))
    }

    // ========================================================================
    // Statement lists and directive prologues
    // ========================================================================

    /// Statements up to (not including) `end`. With `directives`, a leading
    /// run of string-literal statements is a directive prologue and
    /// `"use strict"` in it makes the enclosing frame strict. With
    /// `module_items`, import and export declarations are accepted.
    pub(crate) fn parse_statement_list(
        &mut self,
        end: SyntaxKind,
        directives: bool,
        module_items: bool,
    ) -> PResult<&'a [Statement<'a>]> {
        let saved = self.context.has(ContextFlags::DIRECTIVE_POSITION);
        self.context.set(ContextFlags::DIRECTIVE_POSITION, directives);
        let result = self.parse_statement_list_items(end, module_items);
        self.context.set(ContextFlags::DIRECTIVE_POSITION, saved);
        result.map(|statements| self.alloc_list(statements))
    }

    fn parse_statement_list_items(&mut self, end: SyntaxKind, module_items: bool) -> PResult<Vec<Statement<'a>>> {
        let mut statements = Vec::new();
        loop {
            let kind = self.peek_kind()?;
            if kind == end || kind == SyntaxKind::EndOfFileToken {
                break;
            }
            let statement = if module_items {
                self.parse_module_item()?
            } else {
                self.parse_statement()?
            };
            if self.context.has(ContextFlags::DIRECTIVE_POSITION) {
                self.process_directive(&statement);
            }
            statements.push(statement);
        }
        Ok(statements)
    }

    fn process_directive(&mut self, statement: &Statement<'a>) {
        let Some(literal) = directive_literal(statement) else {
            self.context.set(ContextFlags::DIRECTIVE_POSITION, false);
            return;
        };
        // The directive must be spelled exactly, without escapes.
        let range = literal.data.range;
        let raw = self
            .source
            .text()
            .get(range.pos as usize + 1..(range.end as usize).saturating_sub(1))
            .unwrap_or("");
        if raw != "use strict" {
            return;
        }
        if self.strict() {
            self.warn(&messages::REDUNDANT_USE_STRICT_DIRECTIVE, &[], range);
        } else {
            trace!(pos = range.pos, "use strict directive");
            self.context.set(ContextFlags::STRICT, true);
        }
    }
}

/// Top-level import or export syntax makes a script a module.
fn is_module_item(statement: &Statement<'_>) -> bool {
    matches!(
        statement,
        Statement::ImportDeclaration(_) | Statement::ExportDeclaration(_) | Statement::ExportAssignment(_)
    ) || statement.data().modifier_flags.contains(ModifierFlags::EXPORT)
}

/// The string literal of a directive-shaped statement.
fn directive_literal<'s, 'a>(statement: &'s Statement<'a>) -> Option<&'s StringLiteral<'a>> {
    let Statement::ExpressionStatement(statement) = statement else {
        return None;
    };
    match statement.expression {
        Expression::StringLiteral(literal) => Some(literal),
        _ => None,
    }
}
