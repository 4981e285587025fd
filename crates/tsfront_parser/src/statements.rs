//! Statement grammar.

use tracing::trace;
use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::text::TextPos;
use tsfront_diagnostics::messages;
use tsfront_scanner::{Expected, PResult};

use crate::context::ContextFlags;
use crate::features::feature;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// A statement or an import/export declaration. Used at the top level
    /// and in namespace bodies.
    pub(crate) fn parse_module_item(&mut self) -> PResult<Statement<'a>> {
        match self.peek_kind()? {
            SyntaxKind::ImportKeyword
                if !matches!(
                    self.peek_nth_kind(1)?,
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                ) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            _ => self.parse_statement(),
        }
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<Statement<'a>> {
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        match kind {
            SyntaxKind::OpenBraceToken => self.parse_block().map(Statement::Block),
            SyntaxKind::SemicolonToken => {
                let token = self.bump()?;
                Ok(Statement::EmptyStatement(NodeData::with_range(SyntaxKind::EmptyStatement, token.range)))
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_declaration(start, ModifierFlags::NONE),
            SyntaxKind::LetKeyword if self.let_starts_declaration()? => {
                self.parse_declaration(start, ModifierFlags::NONE)
            }
            SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword | SyntaxKind::EnumKeyword => {
                self.parse_declaration(start, ModifierFlags::NONE)
            }
            SyntaxKind::AsyncKeyword
                if self.peek_nth_kind(1)? == SyntaxKind::FunctionKeyword && !self.line_break_before_nth(1)? =>
            {
                self.parse_declaration(start, ModifierFlags::NONE)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword | SyntaxKind::BreakKeyword => self.parse_jump_statement(kind),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                let token = self.bump()?;
                self.parse_semicolon()?;
                Ok(Statement::DebuggerStatement(NodeData::new(
                    SyntaxKind::DebuggerStatement,
                    token.pos(),
                    self.prev_end,
                )))
            }
            SyntaxKind::ImportKeyword | SyntaxKind::ExportKeyword
                if !matches!(
                    self.peek_nth_kind(1)?,
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                ) =>
            {
                self.unexpected(Expected::Reason(format!(
                    "{} declarations may only appear at the top level of a module",
                    kind.describe()
                )))
            }
            _ if self.at_contextual_declaration()? => self.parse_declaration(start, ModifierFlags::NONE),
            _ if self.is_identifier_kind(kind) && self.peek_nth_kind(1)? == SyntaxKind::ColonToken => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` begins a declaration when a binding follows it; otherwise it
    /// is an identifier.
    fn let_starts_declaration(&mut self) -> PResult<bool> {
        let next = self.peek_nth_kind(1)?;
        Ok(matches!(next, SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken)
            || (next.is_identifier_or_keyword() && !matches!(next, SyntaxKind::InKeyword | SyntaxKind::InstanceOfKeyword)))
    }

    /// A TypeScript declaration introduced by a contextual keyword, which
    /// must be followed on the same line by the declared name.
    fn at_contextual_declaration(&mut self) -> PResult<bool> {
        if !self.typescript() || self.line_break_before_nth(1)? {
            return Ok(false);
        }
        let next = self.peek_nth_kind(1)?;
        Ok(match self.peek_kind()? {
            SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword | SyntaxKind::NamespaceKeyword => {
                next.is_identifier_or_keyword()
            }
            SyntaxKind::ModuleKeyword => next.is_identifier_or_keyword() || next == SyntaxKind::StringLiteral,
            SyntaxKind::DeclareKeyword => next.is_identifier_or_keyword(),
            SyntaxKind::AbstractKeyword => next == SyntaxKind::ClassKeyword,
            _ => false,
        })
    }

    /// A declaration, possibly after `export` or `declare` whose modifiers
    /// are passed in.
    pub(crate) fn parse_declaration(&mut self, start: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let kind = self.peek_kind()?;
        match kind {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword => self.parse_variable_statement(start, modifiers),
            SyntaxKind::ConstKeyword if self.peek_nth_kind(1)? == SyntaxKind::EnumKeyword => {
                self.bump()?;
                self.parse_enum_declaration(start, modifiers | ModifierFlags::CONST)
            }
            SyntaxKind::ConstKeyword => self.parse_variable_statement(start, modifiers),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start, modifiers),
            SyntaxKind::AsyncKeyword if self.peek_nth_kind(1)? == SyntaxKind::FunctionKeyword => {
                self.bump()?;
                self.parse_function_declaration(start, modifiers | ModifierFlags::ASYNC)
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(start, modifiers),
            SyntaxKind::AbstractKeyword if self.peek_nth_kind(1)? == SyntaxKind::ClassKeyword => {
                let token = self.bump()?;
                self.require(feature::TYPESCRIPT, token.range)?;
                self.parse_class_declaration(start, modifiers | ModifierFlags::ABSTRACT)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(start, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(start, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(start, modifiers),
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword => self.parse_module_declaration(start, modifiers),
            SyntaxKind::GlobalKeyword if self.context.has(ContextFlags::AMBIENT) => {
                self.parse_module_declaration(start, modifiers)
            }
            SyntaxKind::DeclareKeyword if !modifiers.contains(ModifierFlags::AMBIENT) => {
                self.parse_ambient_declaration(start, modifiers)
            }
            _ => self.unexpected(Expected::Value("declaration")),
        }
    }

    /// `declare` followed by a declaration; everything inside is ambient.
    fn parse_ambient_declaration(&mut self, start: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let token = self.bump()?;
        self.require(feature::TYPESCRIPT, token.range)?;
        self.scoped(ContextFlags::AMBIENT, ContextFlags::NONE, |p| {
            p.parse_declaration(start, modifiers | ModifierFlags::AMBIENT)
        })
    }

    pub(crate) fn parse_block(&mut self) -> PResult<Block<'a>> {
        let start = self.start()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let statements = self.parse_statement_list(SyntaxKind::CloseBraceToken, false, false)?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Block {
            data: self.finish(SyntaxKind::Block, start),
            statements,
        })
    }

    fn parse_expression_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            data: self.finish(SyntaxKind::ExpressionStatement, start),
            expression: self.alloc(expression),
        }))
    }

    // ========================================================================
    // Variable declarations
    // ========================================================================

    fn parse_variable_statement(&mut self, start: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let declaration_list = self.parse_variable_declaration_list(false)?;
        self.parse_semicolon()?;
        Ok(Statement::VariableStatement(VariableStatement {
            data: self
                .finish(SyntaxKind::VariableStatement, start)
                .with_modifiers(modifiers)
                .with_flags(self.context_node_flags()),
            declaration_list,
        }))
    }

    /// `var`/`let`/`const` and its declarators. In a `for` head the
    /// initializer checks are left to the loop, which knows whether it is
    /// a `for-in`/`for-of`.
    pub(crate) fn parse_variable_declaration_list(&mut self, in_for_head: bool) -> PResult<VariableDeclarationList<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        let kind = match token.kind {
            SyntaxKind::LetKeyword => VariableKind::Let,
            SyntaxKind::ConstKeyword => VariableKind::Const,
            _ => VariableKind::Var,
        };
        if kind != VariableKind::Var {
            self.require(feature::LET_CONST, token.range)?;
        }
        let mut declarations = Vec::new();
        loop {
            let declaration = self.parse_variable_declaration(kind)?;
            if !in_for_head {
                self.check_declaration_initializer(kind, &declaration)?;
            }
            declarations.push(declaration);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        Ok(VariableDeclarationList {
            data: self
                .finish(SyntaxKind::VariableDeclarationList, start)
                .with_flags(kind.node_flags()),
            kind,
            declarations: self.alloc_list(declarations),
        })
    }

    fn parse_variable_declaration(&mut self, kind: VariableKind) -> PResult<VariableDeclaration<'a>> {
        let start = self.start()?;
        let name = self.parse_binding_target()?;
        let definite = self.typescript()
            && matches!(name, Pattern::Identifier(_))
            && self.at(SyntaxKind::ExclamationToken)?
            && !self.line_break_before()?
            && self.eat(SyntaxKind::ExclamationToken)?;
        let type_annotation = if self.typescript() && self.eat(SyntaxKind::ColonToken)? {
            let type_annotation = self.parse_type()?;
            Some(self.alloc(type_annotation))
        } else {
            None
        };
        let initializer = if self.at(SyntaxKind::EqualsToken)? {
            let token = self.bump()?;
            if self.context.has(ContextFlags::AMBIENT) && kind != VariableKind::Const {
                return self.semantic(&messages::INITIALIZERS_ARE_NOT_ALLOWED_IN_AMBIENT_CONTEXTS, &[], token.range);
            }
            let initializer = self.parse_assignment()?;
            Some(self.alloc(initializer))
        } else {
            None
        };
        Ok(VariableDeclaration {
            data: self.finish(SyntaxKind::VariableDeclaration, start),
            name,
            definite,
            type_annotation,
            initializer,
        })
    }

    fn check_declaration_initializer(&self, kind: VariableKind, declaration: &VariableDeclaration<'a>) -> PResult<()> {
        if declaration.initializer.is_some() || self.context.has(ContextFlags::AMBIENT) {
            return Ok(());
        }
        let range = declaration.name.range();
        if kind == VariableKind::Const {
            return self.semantic(&messages::CONST_DECLARATIONS_MUST_BE_INITIALIZED, &[], range);
        }
        if declaration.name.is_destructuring() {
            return self.semantic(&messages::A_DESTRUCTURING_DECLARATION_MUST_HAVE_AN_INITIALIZER, &[], range);
        }
        Ok(())
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `( Expression )` as in `if`, `while` and `switch` heads.
    fn parse_parenthesized_condition(&mut self) -> PResult<&'a Expression<'a>> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(self.alloc(expression))
    }

    /// The body of a loop, where `break` and `continue` are allowed.
    fn parse_loop_body(&mut self) -> PResult<&'a Statement<'a>> {
        let statement = self.scoped(
            ContextFlags::BREAK_ALLOWED | ContextFlags::CONTINUE_ALLOWED,
            ContextFlags::NONE,
            |p| p.parse_statement(),
        )?;
        Ok(self.alloc(statement))
    }

    fn parse_if_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let expression = self.parse_parenthesized_condition()?;
        let then_statement = self.parse_statement()?;
        let then_statement = self.alloc(then_statement);
        let else_statement = if self.eat(SyntaxKind::ElseKeyword)? {
            let statement = self.parse_statement()?;
            Some(self.alloc(statement))
        } else {
            None
        };
        Ok(Statement::IfStatement(IfStatement {
            data: self.finish(SyntaxKind::IfStatement, start),
            expression,
            then_statement,
            else_statement,
        }))
    }

    fn parse_do_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let statement = self.parse_loop_body()?;
        self.expect(SyntaxKind::WhileKeyword)?;
        let expression = self.parse_parenthesized_condition()?;
        // A `;` after `do ... while (x)` is optional even on the same line.
        self.eat(SyntaxKind::SemicolonToken)?;
        Ok(Statement::DoStatement(LoopStatement {
            data: self.finish(SyntaxKind::DoStatement, start),
            expression,
            statement,
        }))
    }

    fn parse_while_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let expression = self.parse_parenthesized_condition()?;
        let statement = self.parse_loop_body()?;
        Ok(Statement::WhileStatement(LoopStatement {
            data: self.finish(SyntaxKind::WhileStatement, start),
            expression,
            statement,
        }))
    }

    fn parse_for_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let is_await = if self.at(SyntaxKind::AwaitKeyword)? {
            let token = self.bump()?;
            if !self.context.has(ContextFlags::AWAIT_ALLOWED) {
                return self.semantic(&messages::AWAIT_EXPRESSIONS_ARE_ONLY_ALLOWED_WITHIN_ASYNC_FUNCTIONS, &[], token.range);
            }
            self.require(feature::ASYNC_AWAIT, token.range)?;
            true
        } else {
            false
        };
        self.expect(SyntaxKind::OpenParenToken)?;

        let outer_initializer = self.cover_initializer.take();
        let result = self.parse_for_rest(start, is_await);
        self.cover_initializer = outer_initializer;
        result
    }

    fn parse_for_rest(&mut self, start: TextPos, is_await: bool) -> PResult<Statement<'a>> {
        let mut assignable = false;
        let initializer = match self.peek_kind()? {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => Some(self.parse_for_declarations()?),
            SyntaxKind::LetKeyword if self.let_starts_declaration()? => Some(self.parse_for_declarations()?),
            _ => {
                self.context.isolate_cover_grammar();
                self.context.set(ContextFlags::IN_ALLOWED, false);
                let expression = self.parse_expression_cover();
                assignable = self.context.has(ContextFlags::ASSIGNMENT_TARGET);
                self.context.pop();
                Some(ForInitializer::Expression(self.alloc(expression?)))
            }
        };

        let kind = self.peek_kind()?;
        if matches!(kind, SyntaxKind::OfKeyword | SyntaxKind::InKeyword) {
            if is_await && kind == SyntaxKind::InKeyword {
                return self.unexpected(Expected::Kind(SyntaxKind::OfKeyword));
            }
            let Some(initializer) = initializer else {
                return self.unexpected(Expected::Value("expression"));
            };
            let initializer = self.for_in_of_head(initializer, assignable, kind)?;
            let keyword = self.bump()?;
            if kind == SyntaxKind::OfKeyword {
                self.require(feature::FOR_OF, keyword.range)?;
            }
            let expression = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| {
                if kind == SyntaxKind::OfKeyword {
                    p.parse_assignment()
                } else {
                    p.parse_expression()
                }
            })?;
            self.expect(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_loop_body()?;
            let flags = if is_await { NodeFlags::AWAIT } else { NodeFlags::NONE };
            let node_kind = if kind == SyntaxKind::OfKeyword {
                SyntaxKind::ForOfStatement
            } else {
                SyntaxKind::ForInStatement
            };
            let node = ForInOrOfStatement {
                data: self.finish(node_kind, start).with_flags(flags),
                initializer,
                expression: self.alloc(expression),
                statement,
            };
            return Ok(if kind == SyntaxKind::OfKeyword {
                Statement::ForOfStatement(node)
            } else {
                Statement::ForInStatement(node)
            });
        }

        if is_await {
            return self.unexpected(Expected::Kind(SyntaxKind::OfKeyword));
        }
        if let Some(range) = self.cover_initializer.take() {
            return self.semantic(&messages::INVALID_SHORTHAND_PROPERTY_INITIALIZER, &[], range);
        }
        if let Some(ForInitializer::VariableDeclarationList(list)) = &initializer {
            for declaration in list.declarations {
                self.check_declaration_initializer(list.kind, declaration)?;
            }
        }
        self.expect(SyntaxKind::SemicolonToken)?;
        let condition = if self.at(SyntaxKind::SemicolonToken)? {
            None
        } else {
            let condition = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
            Some(self.alloc(condition))
        };
        self.expect(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.at(SyntaxKind::CloseParenToken)? {
            None
        } else {
            let incrementor = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
            Some(self.alloc(incrementor))
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_loop_body()?;
        Ok(Statement::ForStatement(ForStatement {
            data: self.finish(SyntaxKind::ForStatement, start),
            initializer,
            condition,
            incrementor,
            statement,
        }))
    }

    fn parse_for_declarations(&mut self) -> PResult<ForInitializer<'a>> {
        let list = self.scoped(ContextFlags::NONE, ContextFlags::IN_ALLOWED, |p| {
            p.parse_variable_declaration_list(true)
        })?;
        Ok(ForInitializer::VariableDeclarationList(list))
    }

    /// Validate the left side of `in`/`of`: a single declaration without
    /// an initializer, or an expression that converts to a pattern.
    fn for_in_of_head(
        &mut self,
        initializer: ForInitializer<'a>,
        assignable: bool,
        keyword: SyntaxKind,
    ) -> PResult<ForInitializer<'a>> {
        match initializer {
            ForInitializer::VariableDeclarationList(list) => {
                let single = list.declarations.len() == 1;
                let has_initializer = list.declarations.iter().any(|d| d.initializer.is_some());
                // Annex B keeps `for (var x = 1 in y)` in sloppy scripts.
                let legacy = keyword == SyntaxKind::InKeyword
                    && list.kind == VariableKind::Var
                    && !self.strict()
                    && matches!(list.declarations.first().map(|d| d.name), Some(Pattern::Identifier(_)));
                if !single || (has_initializer && !legacy) {
                    return self.unexpected(Expected::Kind(SyntaxKind::SemicolonToken));
                }
                Ok(ForInitializer::VariableDeclarationList(list))
            }
            ForInitializer::Expression(expr) => {
                if !assignable {
                    return self.semantic(
                        &messages::THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS,
                        &[],
                        expr.range(),
                    );
                }
                let pattern = self.expression_to_assignment_pattern(expr)?;
                self.cover_initializer = None;
                trace!(pos = expr.pos(), "for head reinterpreted as a pattern");
                Ok(ForInitializer::Pattern(pattern))
            }
            ForInitializer::Pattern(pattern) => Ok(ForInitializer::Pattern(pattern)),
        }
    }

    fn parse_jump_statement(&mut self, kind: SyntaxKind) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        let next = self.peek_kind()?;
        let label = if !self.can_insert_semicolon()? && self.is_identifier_kind(next) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let is_break = kind == SyntaxKind::BreakKeyword;
        match &label {
            None if is_break && !self.context.has(ContextFlags::BREAK_ALLOWED) => {
                return self.semantic(
                    &messages::A_BREAK_STATEMENT_CAN_ONLY_BE_USED_WITHIN_AN_ENCLOSING_ITERATION_OR_SWITCH_STATEMENT,
                    &[],
                    token.range,
                );
            }
            None if !is_break && !self.context.has(ContextFlags::CONTINUE_ALLOWED) => {
                return self.semantic(
                    &messages::A_CONTINUE_STATEMENT_CAN_ONLY_BE_USED_WITHIN_AN_ENCLOSING_ITERATION_STATEMENT,
                    &[],
                    token.range,
                );
            }
            Some(label) if is_break && !self.labels.can_break_to(label.symbol) => {
                return self.semantic(
                    &messages::A_BREAK_STATEMENT_CAN_ONLY_JUMP_TO_A_LABEL_OF_AN_ENCLOSING_STATEMENT,
                    &[],
                    label.data.range,
                );
            }
            Some(label) if !is_break && !self.labels.can_continue_to(label.symbol) => {
                return self.semantic(
                    &messages::A_CONTINUE_STATEMENT_CAN_ONLY_JUMP_TO_A_LABEL_OF_AN_ENCLOSING_ITERATION_STATEMENT,
                    &[],
                    label.data.range,
                );
            }
            _ => {}
        }
        self.parse_semicolon()?;
        let node_kind = if is_break {
            SyntaxKind::BreakStatement
        } else {
            SyntaxKind::ContinueStatement
        };
        let node = JumpStatement {
            data: self.finish(node_kind, start),
            label,
        };
        Ok(if is_break {
            Statement::BreakStatement(node)
        } else {
            Statement::ContinueStatement(node)
        })
    }

    fn parse_return_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        if !self.context.has(ContextFlags::RETURN_ALLOWED) {
            return self.semantic(&messages::A_RETURN_STATEMENT_CAN_ONLY_BE_USED_WITHIN_A_FUNCTION_BODY, &[], token.range);
        }
        let expression = if self.can_insert_semicolon()? {
            None
        } else {
            let expression = self.parse_expression()?;
            Some(self.alloc(expression))
        };
        self.parse_semicolon()?;
        Ok(Statement::ReturnStatement(ReturnStatement {
            data: self.finish(SyntaxKind::ReturnStatement, start),
            expression,
        }))
    }

    fn parse_with_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        if self.strict() {
            return self.semantic(&messages::WITH_STATEMENTS_ARE_NOT_ALLOWED_IN_STRICT_MODE, &[], token.range);
        }
        let expression = self.parse_parenthesized_condition()?;
        let statement = self.parse_statement()?;
        Ok(Statement::WithStatement(WithStatement {
            data: self.finish(SyntaxKind::WithStatement, start),
            expression,
            statement: self.alloc(statement),
        }))
    }

    fn parse_switch_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let expression = self.parse_parenthesized_condition()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let clauses = self.scoped(ContextFlags::BREAK_ALLOWED, ContextFlags::NONE, |p| p.parse_case_clauses())?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Statement::SwitchStatement(SwitchStatement {
            data: self.finish(SyntaxKind::SwitchStatement, start),
            expression,
            clauses,
        }))
    }

    fn parse_case_clauses(&mut self) -> PResult<&'a [CaseClause<'a>]> {
        let mut clauses = Vec::new();
        let mut seen_default = false;
        while !self.at(SyntaxKind::CloseBraceToken)? {
            let start = self.start()?;
            let (kind, expression) = match self.peek_kind()? {
                SyntaxKind::CaseKeyword => {
                    self.bump()?;
                    let expression =
                        self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
                    (SyntaxKind::CaseClause, Some(self.alloc(expression)))
                }
                SyntaxKind::DefaultKeyword => {
                    let token = self.bump()?;
                    if seen_default {
                        return self.semantic(
                            &messages::A_DEFAULT_CLAUSE_CANNOT_APPEAR_MORE_THAN_ONCE_IN_A_SWITCH_STATEMENT,
                            &[],
                            token.range,
                        );
                    }
                    seen_default = true;
                    (SyntaxKind::DefaultClause, None)
                }
                _ => return self.unexpected(Expected::Kind(SyntaxKind::CaseKeyword)),
            };
            self.expect(SyntaxKind::ColonToken)?;
            let mut statements = Vec::new();
            while !matches!(
                self.peek_kind()?,
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                statements.push(self.parse_statement()?);
            }
            clauses.push(CaseClause {
                data: self.finish(kind, start),
                expression,
                statements: self.alloc_list(statements),
            });
        }
        Ok(self.alloc_list(clauses))
    }

    fn parse_labeled_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        let label = self.parse_identifier()?;
        self.bump()?;
        let iteration = self.iteration_follows_labels()?;
        if !self.labels.push(label.symbol, iteration) {
            return self.semantic(&messages::DUPLICATE_LABEL_0, &[label.name], label.data.range);
        }
        let statement = self.parse_statement();
        self.labels.pop();
        let statement = statement?;
        Ok(Statement::LabeledStatement(LabeledStatement {
            data: self.finish(SyntaxKind::LabeledStatement, start),
            label,
            statement: self.alloc(statement),
        }))
    }

    /// Whether the labels ahead (`a: b: ...`) end in a loop, making them
    /// valid `continue` targets.
    fn iteration_follows_labels(&mut self) -> PResult<bool> {
        let mut n = 0;
        loop {
            let kind = self.peek_nth_kind(n)?;
            if matches!(kind, SyntaxKind::ForKeyword | SyntaxKind::WhileKeyword | SyntaxKind::DoKeyword) {
                return Ok(true);
            }
            if kind.is_identifier_or_keyword() && self.peek_nth_kind(n + 1)? == SyntaxKind::ColonToken {
                n += 2;
                continue;
            }
            return Ok(false);
        }
    }

    fn parse_throw_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        if self.line_break_before()? {
            let range = self.peek()?.range;
            return self.semantic(&messages::LINE_BREAK_NOT_PERMITTED_HERE, &[], range);
        }
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(Statement::ThrowStatement(ThrowStatement {
            data: self.finish(SyntaxKind::ThrowStatement, start),
            expression: self.alloc(expression),
        }))
    }

    fn parse_try_statement(&mut self) -> PResult<Statement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let try_block = self.parse_block()?;
        let catch_clause = if self.at(SyntaxKind::CatchKeyword)? {
            Some(self.parse_catch_clause()?)
        } else {
            None
        };
        let finally_block = if self.eat(SyntaxKind::FinallyKeyword)? {
            Some(self.parse_block()?)
        } else {
            None
        };
        if catch_clause.is_none() && finally_block.is_none() {
            return self.unexpected(Expected::Value("'catch' or 'finally'"));
        }
        Ok(Statement::TryStatement(TryStatement {
            data: self.finish(SyntaxKind::TryStatement, start),
            try_block,
            catch_clause,
            finally_block,
        }))
    }

    fn parse_catch_clause(&mut self) -> PResult<CatchClause<'a>> {
        let start = self.start()?;
        self.bump()?;
        let (variable, type_annotation) = if self.eat(SyntaxKind::OpenParenToken)? {
            let variable = self.parse_binding_target()?;
            let type_annotation = if self.typescript() && self.eat(SyntaxKind::ColonToken)? {
                let type_annotation = self.parse_type()?;
                Some(self.alloc(type_annotation))
            } else {
                None
            };
            self.expect(SyntaxKind::CloseParenToken)?;
            (Some(variable), type_annotation)
        } else {
            (None, None)
        };
        let block = self.parse_block()?;
        Ok(CatchClause {
            data: self.finish(SyntaxKind::CatchClause, start),
            variable,
            type_annotation,
            block,
        })
    }
}
