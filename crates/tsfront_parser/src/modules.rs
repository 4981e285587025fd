//! Import and export declarations.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::text::TextPos;
use tsfront_scanner::{Expected, PResult};

use crate::context::ContextFlags;
use crate::features::feature;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_import_declaration(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let keyword = self.bump()?;
        self.require(feature::MODULES, keyword.range)?;

        // import "m";
        if self.at(SyntaxKind::StringLiteral)? {
            let module_specifier = self.parse_string_literal()?;
            self.parse_semicolon()?;
            return Ok(Statement::ImportDeclaration(ImportDeclaration {
                data: self.finish(SyntaxKind::ImportDeclaration, start),
                specifiers: &[],
                module_specifier,
            }));
        }

        // `import type X from` but not `import type from "m"`.
        let type_only = self.typescript()
            && self.at(SyntaxKind::TypeKeyword)?
            && match self.peek_nth_kind(1)? {
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
                SyntaxKind::FromKeyword => self.peek_nth_kind(2)? == SyntaxKind::FromKeyword,
                SyntaxKind::CommaToken => false,
                next => self.is_identifier_kind(next),
            };
        if type_only {
            self.bump()?;
        }

        let mut specifiers = Vec::new();
        let next = self.peek_kind()?;
        if self.is_identifier_kind(next) {
            let local = self.parse_identifier()?;
            specifiers.push(ImportSpecifier {
                data: NodeData::with_range(SyntaxKind::ImportSpecifier, local.data.range),
                kind: ImportSpecifierKind::Default,
                imported: Some(local),
                local,
                type_only: false,
            });
            if !self.eat(SyntaxKind::CommaToken)? {
                return self.finish_import(start, specifiers, type_only);
            }
        }
        match self.peek_kind()? {
            SyntaxKind::AsteriskToken => {
                let specifier_start = self.start()?;
                self.bump()?;
                self.expect(SyntaxKind::AsKeyword)?;
                let local = self.parse_identifier()?;
                specifiers.push(ImportSpecifier {
                    data: self.finish(SyntaxKind::ImportSpecifier, specifier_start),
                    kind: ImportSpecifierKind::Namespace,
                    imported: None,
                    local,
                    type_only: false,
                });
            }
            SyntaxKind::OpenBraceToken => {
                self.bump()?;
                while !self.at(SyntaxKind::CloseBraceToken)? {
                    specifiers.push(self.parse_import_specifier()?);
                    if !self.eat(SyntaxKind::CommaToken)? {
                        break;
                    }
                }
                self.expect(SyntaxKind::CloseBraceToken)?;
            }
            _ => return self.unexpected(Expected::Value("import clause")),
        }
        self.finish_import(start, specifiers, type_only)
    }

    fn finish_import(
        &mut self,
        start: TextPos,
        specifiers: Vec<ImportSpecifier<'a>>,
        type_only: bool,
    ) -> PResult<Statement<'a>> {
        self.expect(SyntaxKind::FromKeyword)?;
        let module_specifier = self.parse_string_literal()?;
        self.parse_semicolon()?;
        let flags = if type_only { NodeFlags::TYPE_ONLY } else { NodeFlags::NONE };
        Ok(Statement::ImportDeclaration(ImportDeclaration {
            data: self.finish(SyntaxKind::ImportDeclaration, start).with_flags(flags),
            specifiers: self.alloc_list(specifiers),
            module_specifier,
        }))
    }

    /// `a`, `a as b`, `type a` or `"s" as b` inside `import { }`.
    fn parse_import_specifier(&mut self) -> PResult<ImportSpecifier<'a>> {
        let start = self.start()?;
        let type_only = self.eat_type_modifier()?;
        let (imported, local) = if self.peek_nth_kind(1)? == SyntaxKind::AsKeyword
            || self.at(SyntaxKind::StringLiteral)?
        {
            let imported = self.parse_module_export_name()?;
            self.expect(SyntaxKind::AsKeyword)?;
            (imported, self.parse_identifier()?)
        } else {
            let local = self.parse_identifier()?;
            (local, local)
        };
        Ok(ImportSpecifier {
            data: self.finish(SyntaxKind::ImportSpecifier, start),
            kind: ImportSpecifierKind::Named,
            imported: Some(imported),
            local,
            type_only,
        })
    }

    /// A `type` prefix on a single specifier, as in `{ type A }`. `{ type }`
    /// and `{ type as t }` import a binding named `type`.
    fn eat_type_modifier(&mut self) -> PResult<bool> {
        if !self.typescript() || !self.at(SyntaxKind::TypeKeyword)? {
            return Ok(false);
        }
        let next = self.peek_nth_kind(1)?;
        let is_modifier = match next {
            SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken => false,
            SyntaxKind::AsKeyword => {
                // `type as as x` and `type as x` differ only in the third token.
                self.peek_nth_kind(2)? == SyntaxKind::AsKeyword
                    || matches!(self.peek_nth_kind(2)?, SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken)
            }
            _ => next.is_identifier_or_keyword() || next == SyntaxKind::StringLiteral,
        };
        if is_modifier {
            self.bump()?;
        }
        Ok(is_modifier)
    }

    /// An exported name: any identifier name, or a string literal spelled
    /// as an identifier.
    fn parse_module_export_name(&mut self) -> PResult<Identifier<'a>> {
        if self.at(SyntaxKind::StringLiteral)? {
            let token = self.bump()?;
            let literal = self.string_literal_from(&token);
            return Ok(Identifier {
                data: literal.data,
                name: literal.value,
                symbol: self.interner.intern(literal.value),
                original_keyword_kind: None,
            });
        }
        self.parse_identifier_name()
    }

    pub(crate) fn parse_export_declaration(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let keyword = self.bump()?;
        self.require(feature::MODULES, keyword.range)?;

        match self.peek_kind()? {
            SyntaxKind::EqualsToken => {
                let token = self.bump()?;
                self.require(feature::TYPESCRIPT, token.range)?;
                let expression = self.parse_assignment()?;
                self.parse_semicolon()?;
                Ok(Statement::ExportAssignment(ExportAssignment {
                    data: self.finish(SyntaxKind::ExportAssignment, start),
                    is_export_equals: true,
                    expression: self.alloc(expression),
                }))
            }
            SyntaxKind::DefaultKeyword => {
                self.bump()?;
                self.parse_export_default(start)
            }
            SyntaxKind::AsteriskToken => {
                self.bump()?;
                let exported = if self.eat(SyntaxKind::AsKeyword)? {
                    Some(self.parse_module_export_name()?)
                } else {
                    None
                };
                self.expect(SyntaxKind::FromKeyword)?;
                let module_specifier = self.parse_string_literal()?;
                self.parse_semicolon()?;
                Ok(Statement::ExportDeclaration(ExportDeclaration {
                    data: self.finish(SyntaxKind::ExportDeclaration, start),
                    clause: ExportClause::Namespace(exported),
                    module_specifier: Some(module_specifier),
                }))
            }
            SyntaxKind::TypeKeyword
                if self.typescript() && self.peek_nth_kind(1)? == SyntaxKind::OpenBraceToken =>
            {
                self.bump()?;
                self.parse_export_named(start, true)
            }
            SyntaxKind::OpenBraceToken => self.parse_export_named(start, false),
            _ => self.parse_declaration(start, ModifierFlags::EXPORT),
        }
    }

    fn parse_export_default(&mut self, start: TextPos) -> PResult<Statement<'a>> {
        let modifiers = ModifierFlags::EXPORT_DEFAULT;
        match self.peek_kind()? {
            SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword => self.parse_declaration(start, modifiers),
            SyntaxKind::AsyncKeyword
                if self.peek_nth_kind(1)? == SyntaxKind::FunctionKeyword && !self.line_break_before_nth(1)? =>
            {
                self.parse_declaration(start, modifiers)
            }
            SyntaxKind::AbstractKeyword
                if self.peek_nth_kind(1)? == SyntaxKind::ClassKeyword && !self.line_break_before_nth(1)? =>
            {
                self.parse_declaration(start, modifiers)
            }
            SyntaxKind::InterfaceKeyword
                if self.typescript() && self.peek_nth_kind(1)?.is_identifier_or_keyword() =>
            {
                self.parse_declaration(start, modifiers)
            }
            _ => {
                let expression =
                    self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_assignment())?;
                self.parse_semicolon()?;
                Ok(Statement::ExportAssignment(ExportAssignment {
                    data: self.finish(SyntaxKind::ExportAssignment, start).with_modifiers(modifiers),
                    is_export_equals: false,
                    expression: self.alloc(expression),
                }))
            }
        }
    }

    /// `export { a, b as c }`, optionally re-exported `from "m"`.
    fn parse_export_named(&mut self, start: TextPos, type_only: bool) -> PResult<Statement<'a>> {
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken)? {
            let specifier_start = self.start()?;
            let specifier_type_only = self.eat_type_modifier()?;
            let local = self.parse_module_export_name()?;
            let exported = if self.eat(SyntaxKind::AsKeyword)? {
                self.parse_module_export_name()?
            } else {
                local
            };
            specifiers.push(ExportSpecifier {
                data: self.finish(SyntaxKind::ExportSpecifier, specifier_start),
                local,
                exported,
                type_only: specifier_type_only,
            });
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        let module_specifier = if self.eat(SyntaxKind::FromKeyword)? {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        self.parse_semicolon()?;
        let flags = if type_only { NodeFlags::TYPE_ONLY } else { NodeFlags::NONE };
        Ok(Statement::ExportDeclaration(ExportDeclaration {
            data: self.finish(SyntaxKind::ExportDeclaration, start).with_flags(flags),
            clause: ExportClause::Named(self.alloc_list(specifiers)),
            module_specifier,
        }))
    }
}
