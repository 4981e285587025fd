//! Functions, parameters, classes, binding patterns and the TypeScript
//! declaration forms.

use tracing::trace;
use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::text::{TextPos, TextRange};
use tsfront_diagnostics::messages;
use tsfront_scanner::{Expected, PResult, SyntaxError};

use crate::context::ContextFlags;
use crate::features::feature;
use crate::parser::Parser;
use crate::utilities::{can_follow_modifier, can_start_property_name};

/// Modifiers accepted on class members.
const CLASS_MEMBER_MODIFIERS: ModifierFlags = ModifierFlags::ACCESSIBILITY_MODIFIER
    .union(ModifierFlags::STATIC)
    .union(ModifierFlags::READONLY)
    .union(ModifierFlags::ABSTRACT)
    .union(ModifierFlags::OVERRIDE)
    .union(ModifierFlags::ASYNC)
    .union(ModifierFlags::ACCESSOR)
    .union(ModifierFlags::AMBIENT);

/// Modifiers that must come after an accessibility modifier.
const AFTER_ACCESSIBILITY: &[ModifierFlags] = &[
    ModifierFlags::STATIC,
    ModifierFlags::READONLY,
    ModifierFlags::ABSTRACT,
    ModifierFlags::OVERRIDE,
    ModifierFlags::ASYNC,
    ModifierFlags::ACCESSOR,
];

/// Modifiers that must come after `static`.
const AFTER_STATIC: &[ModifierFlags] = &[
    ModifierFlags::READONLY,
    ModifierFlags::ASYNC,
    ModifierFlags::ABSTRACT,
    ModifierFlags::ACCESSOR,
];

fn modifier_flag(kind: SyntaxKind) -> ModifierFlags {
    match kind {
        SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
        SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
        SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
        SyntaxKind::ConstKeyword => ModifierFlags::CONST,
        SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
        SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
        SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
        SyntaxKind::InKeyword => ModifierFlags::IN,
        SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
        SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
        SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
        SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
        SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
        SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
        _ => ModifierFlags::NONE,
    }
}

/// Flags to set and clear when entering a function of the given kind.
/// Arrows keep the enclosing `IN_FUNCTION` state.
fn function_frame(is_generator: bool, is_async: bool, is_arrow: bool) -> (ContextFlags, ContextFlags) {
    let mut set = ContextFlags::RETURN_ALLOWED | ContextFlags::IN_ALLOWED;
    if !is_arrow {
        set |= ContextFlags::IN_FUNCTION;
    }
    if is_generator {
        set |= ContextFlags::YIELD_ALLOWED | ContextFlags::IN_GENERATOR;
    }
    if is_async {
        set |= ContextFlags::AWAIT_ALLOWED;
    }
    (set, ContextFlags::FUNCTION_BOUNDARY.difference(set))
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Functions
    // ========================================================================

    pub(crate) fn parse_function_declaration(
        &mut self,
        start: TextPos,
        modifiers: ModifierFlags,
    ) -> PResult<Statement<'a>> {
        self.expect(SyntaxKind::FunctionKeyword)?;
        let is_async = modifiers.contains(ModifierFlags::ASYNC);
        let is_generator = self.parse_generator_star()?;
        // `export default function () {}` is the only anonymous form.
        let name = if modifiers.contains(ModifierFlags::DEFAULT)
            && matches!(self.peek_kind()?, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            None
        } else {
            Some(self.parse_identifier()?)
        };
        let body_optional = self.typescript() || self.context.has(ContextFlags::AMBIENT);
        let function = self.parse_function_rest(
            start,
            SyntaxKind::FunctionDeclaration,
            name,
            is_generator,
            is_async,
            modifiers,
            body_optional,
        )?;
        Ok(Statement::FunctionDeclaration(function))
    }

    /// `function` (after any `async`) in expression position.
    pub(crate) fn parse_function_expression(&mut self, start: TextPos, is_async: bool) -> PResult<Expression<'a>> {
        self.expect(SyntaxKind::FunctionKeyword)?;
        let is_generator = self.parse_generator_star()?;
        // The name of a function expression is bound inside it.
        let (set, clear) = function_frame(is_generator, is_async, false);
        let name = self.scoped(set, clear, |p| {
            let next = p.peek_kind()?;
            if p.is_identifier_kind(next) {
                p.parse_identifier().map(Some)
            } else {
                Ok(None)
            }
        })?;
        let modifiers = if is_async { ModifierFlags::ASYNC } else { ModifierFlags::NONE };
        let function = self.parse_function_rest(
            start,
            SyntaxKind::FunctionExpression,
            name,
            is_generator,
            is_async,
            modifiers,
            false,
        )?;
        Ok(Expression::Function(function))
    }

    fn parse_generator_star(&mut self) -> PResult<bool> {
        if !self.at(SyntaxKind::AsteriskToken)? {
            return Ok(false);
        }
        let token = self.bump()?;
        self.require(feature::GENERATORS, token.range)?;
        Ok(true)
    }

    /// Signature and body of any non-arrow function. `kind` is the node
    /// kind of the finished function.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn parse_function_rest(
        &mut self,
        start: TextPos,
        kind: SyntaxKind,
        name: Option<Identifier<'a>>,
        is_generator: bool,
        is_async: bool,
        modifiers: ModifierFlags,
        body_optional: bool,
    ) -> PResult<Function<'a>> {
        if is_async {
            self.require(feature::ASYNC_AWAIT, TextRange::new(start, self.prev_end))?;
        }
        let (set, clear) = function_frame(is_generator, is_async, false);
        let is_constructor = kind == SyntaxKind::Constructor;
        let (type_parameters, parameters, return_type) = self.scoped(
            set.difference(ContextFlags::RETURN_ALLOWED),
            clear | ContextFlags::RETURN_ALLOWED,
            |p| p.parse_signature(is_constructor),
        )?;
        let body = if body_optional && !self.at(SyntaxKind::OpenBraceToken)? {
            self.parse_semicolon()?;
            None
        } else {
            let block = self.parse_function_block(is_generator, is_async, false)?;
            Some(FunctionBody::Block(self.alloc(block)))
        };
        Ok(Function {
            data: self
                .finish(kind, start)
                .with_modifiers(modifiers)
                .with_flags(self.context_node_flags()),
            name,
            is_generator,
            is_async,
            is_arrow: false,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    /// Type parameters, parameter list and return type annotation.
    #[allow(clippy::type_complexity)]
    pub(crate) fn parse_signature(
        &mut self,
        is_constructor: bool,
    ) -> PResult<(
        Option<&'a [TypeParameter<'a>]>,
        &'a [Parameter<'a>],
        Option<&'a TypeNode<'a>>,
    )> {
        let type_parameters = if self.typescript() && self.at(SyntaxKind::LessThanToken)? {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        let parameters = self.parse_parameter_list(is_constructor)?;
        let return_type = if self.typescript() && self.eat(SyntaxKind::ColonToken)? {
            let return_type = self.parse_return_type()?;
            Some(self.alloc(return_type))
        } else {
            None
        };
        Ok((type_parameters, parameters, return_type))
    }

    /// `{ ... }` of a function, with its own labels and directive prologue.
    pub(crate) fn parse_function_block(
        &mut self,
        is_generator: bool,
        is_async: bool,
        is_arrow: bool,
    ) -> PResult<Block<'a>> {
        let (set, clear) = function_frame(is_generator, is_async, is_arrow);
        let start = self.start()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        self.labels.enter_function();
        let statements = self.scoped(set, clear, |p| {
            p.parse_statement_list(SyntaxKind::CloseBraceToken, true, false)
        });
        self.labels.exit_function();
        let statements = statements?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Block {
            data: self.finish(SyntaxKind::Block, start),
            statements,
        })
    }

    pub(crate) fn parse_parameter_list(&mut self, is_constructor: bool) -> PResult<&'a [Parameter<'a>]> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        while !self.at(SyntaxKind::CloseParenToken)? {
            let parameter = self.parse_parameter(is_constructor)?;
            if parameter.rest && self.at(SyntaxKind::CommaToken)? {
                return self.semantic(&messages::A_REST_PARAMETER_MUST_BE_LAST, &[], parameter.data.range);
            }
            parameters.push(parameter);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(self.alloc_list(parameters))
    }

    pub(crate) fn parse_parameter(&mut self, is_constructor: bool) -> PResult<Parameter<'a>> {
        let start = self.start()?;
        let modifiers = if self.typescript() {
            self.parse_modifiers(ModifierFlags::PARAMETER_PROPERTY_MODIFIER)?
        } else {
            ModifierFlags::NONE
        };
        if !modifiers.is_empty() && !is_constructor {
            return self.semantic(
                &messages::A_PARAMETER_PROPERTY_IS_ONLY_ALLOWED_IN_A_CONSTRUCTOR_IMPLEMENTATION,
                &[],
                TextRange::new(start, self.prev_end),
            );
        }
        let rest = if self.at(SyntaxKind::DotDotDotToken)? {
            let token = self.bump()?;
            self.require(feature::REST_PARAMETERS, token.range)?;
            true
        } else {
            false
        };
        let name = if self.typescript() && !rest && modifiers.is_empty() && self.at(SyntaxKind::ThisKeyword)? {
            let token = self.bump()?;
            Pattern::Identifier(self.identifier_from(&token))
        } else {
            self.parse_binding_target()?
        };
        let optional = self.typescript() && self.eat(SyntaxKind::QuestionToken)?;
        let type_annotation = if self.typescript() && self.eat(SyntaxKind::ColonToken)? {
            let type_annotation = self.parse_type()?;
            Some(self.alloc(type_annotation))
        } else {
            None
        };
        let initializer = if self.at(SyntaxKind::EqualsToken)? {
            let token = self.bump()?;
            self.require(feature::DEFAULT_PARAMETERS, token.range)?;
            if rest {
                return self.semantic(&messages::A_REST_PARAMETER_CANNOT_HAVE_AN_INITIALIZER, &[], token.range);
            }
            if optional {
                return self.semantic(&messages::PARAMETER_CANNOT_HAVE_QUESTION_MARK_AND_INITIALIZER, &[], token.range);
            }
            let initializer = self.parse_assignment()?;
            Some(self.alloc(initializer))
        } else {
            None
        };
        Ok(Parameter {
            data: self.finish(SyntaxKind::Parameter, start).with_modifiers(modifiers),
            rest,
            name,
            optional,
            type_annotation,
            initializer,
        })
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Leading modifier keywords. A keyword only counts as a modifier when
    /// something that can follow a modifier comes next; `static() {}` is a
    /// method named `static`.
    pub(crate) fn parse_modifiers(&mut self, allowed: ModifierFlags) -> PResult<ModifierFlags> {
        let mut seen = ModifierFlags::NONE;
        loop {
            let kind = self.peek_kind()?;
            if !kind.is_modifier_kind() || !self.next_can_follow_modifier(kind)? {
                return Ok(seen);
            }
            let token = self.bump()?;
            let flag = modifier_flag(kind);
            let text = flag.keyword();
            if !allowed.contains(flag) {
                return self.semantic(&messages::_0_MODIFIER_CANNOT_BE_USED_HERE, &[text], token.range);
            }
            if flag.intersects(ModifierFlags::TYPE_SCRIPT_MODIFIER) {
                self.require(feature::TYPESCRIPT, token.range)?;
            }
            if seen.contains(flag) {
                return self.semantic(&messages::_0_MODIFIER_ALREADY_SEEN, &[text], token.range);
            }
            if flag.intersects(ModifierFlags::ACCESSIBILITY_MODIFIER) {
                if seen.intersects(ModifierFlags::ACCESSIBILITY_MODIFIER) {
                    return self.semantic(&messages::ACCESSIBILITY_MODIFIER_ALREADY_SEEN, &[], token.range);
                }
                if let Some(later) = AFTER_ACCESSIBILITY.iter().find(|later| seen.contains(**later)) {
                    return self.semantic(
                        &messages::_0_MODIFIER_MUST_PRECEDE_1_MODIFIER,
                        &[text, later.keyword()],
                        token.range,
                    );
                }
            }
            if flag == ModifierFlags::STATIC {
                if let Some(later) = AFTER_STATIC.iter().find(|later| seen.contains(**later)) {
                    return self.semantic(
                        &messages::_0_MODIFIER_MUST_PRECEDE_1_MODIFIER,
                        &[text, later.keyword()],
                        token.range,
                    );
                }
            }
            seen |= flag;
        }
    }

    fn next_can_follow_modifier(&mut self, kind: SyntaxKind) -> PResult<bool> {
        let next = self.peek_nth_kind(1)?;
        if !can_follow_modifier(next) {
            return Ok(false);
        }
        // `async` must share a line with what it modifies.
        if kind == SyntaxKind::AsyncKeyword && self.line_break_before_nth(1)? {
            return Ok(false);
        }
        Ok(true)
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class_declaration(&mut self, start: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let name_required = !modifiers.contains(ModifierFlags::DEFAULT);
        let class = self.parse_class(start, SyntaxKind::ClassDeclaration, modifiers, name_required)?;
        Ok(Statement::ClassDeclaration(class))
    }

    pub(crate) fn parse_class_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let class = self.parse_class(start, SyntaxKind::ClassExpression, ModifierFlags::NONE, false)?;
        Ok(Expression::Class(class))
    }

    /// Class bodies and heritage clauses are always strict.
    fn parse_class(
        &mut self,
        start: TextPos,
        kind: SyntaxKind,
        modifiers: ModifierFlags,
        name_required: bool,
    ) -> PResult<Class<'a>> {
        let keyword = self.expect(SyntaxKind::ClassKeyword)?;
        self.require(feature::CLASSES, keyword.range)?;
        self.scoped(ContextFlags::STRICT, ContextFlags::NONE, |p| {
            let next = p.peek_kind()?;
            let name = if p.is_identifier_kind(next) || name_required {
                Some(p.parse_identifier()?)
            } else {
                None
            };
            let type_parameters = if p.typescript() && p.at(SyntaxKind::LessThanToken)? {
                Some(p.parse_type_parameters()?)
            } else {
                None
            };
            let heritage_clauses = p.parse_heritage_clauses(false)?;
            p.expect(SyntaxKind::OpenBraceToken)?;
            let members = p.scoped(ContextFlags::IN_CLASS, ContextFlags::NONE, |p| p.parse_class_members())?;
            p.expect(SyntaxKind::CloseBraceToken)?;
            Ok(Class {
                data: p
                    .finish(kind, start)
                    .with_modifiers(modifiers)
                    .with_flags(p.context_node_flags()),
                name,
                type_parameters,
                heritage_clauses,
                members,
            })
        })
    }

    /// `extends` and `implements` clauses of a class or interface.
    pub(crate) fn parse_heritage_clauses(&mut self, is_interface: bool) -> PResult<&'a [HeritageClause<'a>]> {
        let mut clauses = Vec::new();
        let mut seen_extends = false;
        let mut seen_implements = false;
        loop {
            let kind = self.peek_kind()?;
            if !matches!(kind, SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword) {
                break;
            }
            let start = self.start()?;
            let token = self.bump()?;
            if kind == SyntaxKind::ImplementsKeyword {
                if is_interface {
                    return Err(SyntaxError::unexpected(
                        token.kind,
                        token.raw,
                        Expected::Kind(SyntaxKind::OpenBraceToken),
                        token.range,
                    ));
                }
                self.require(feature::TYPESCRIPT, token.range)?;
                if seen_implements {
                    return self.semantic(&messages::_0_CLAUSE_ALREADY_SEEN, &["implements"], token.range);
                }
                seen_implements = true;
            } else {
                if seen_extends {
                    return self.semantic(&messages::_0_CLAUSE_ALREADY_SEEN, &["extends"], token.range);
                }
                if seen_implements {
                    return self.semantic(&messages::EXTENDS_CLAUSE_MUST_PRECEDE_IMPLEMENTS_CLAUSE, &[], token.range);
                }
                seen_extends = true;
            }
            let mut types = Vec::new();
            loop {
                types.push(self.parse_expression_with_type_arguments()?);
                if !self.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            if kind == SyntaxKind::ExtendsKeyword && !is_interface && types.len() > 1 {
                return self.semantic(&messages::CLASSES_CAN_ONLY_EXTEND_A_SINGLE_CLASS, &[], types[1].data.range);
            }
            clauses.push(HeritageClause {
                data: self.finish(SyntaxKind::HeritageClause, start),
                token: kind,
                types: self.alloc_list(types),
            });
        }
        Ok(self.alloc_list(clauses))
    }

    fn parse_expression_with_type_arguments(&mut self) -> PResult<ExpressionWithTypeArguments<'a>> {
        let start = self.start()?;
        let expression = self.isolated(|p| p.parse_lhs_cover())?;
        let type_arguments = if self.typescript() && self.at(SyntaxKind::LessThanToken)? {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(ExpressionWithTypeArguments {
            data: self.finish(SyntaxKind::ExpressionWithTypeArguments, start),
            expression: self.alloc(expression),
            type_arguments,
        })
    }

    fn parse_class_members(&mut self) -> PResult<&'a [ClassElement<'a>]> {
        let mut members = Vec::new();
        while !matches!(
            self.peek_kind()?,
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let member = self.nested(|p| p.parse_class_member())?;
            members.push(member);
        }
        Ok(self.alloc_list(members))
    }

    fn parse_class_member(&mut self) -> PResult<ClassElement<'a>> {
        let start = self.start()?;
        if self.eat(SyntaxKind::SemicolonToken)? {
            return Ok(ClassElement::SemicolonClassElement(NodeData::new(
                SyntaxKind::SemicolonClassElement,
                start,
                self.prev_end,
            )));
        }
        if self.at(SyntaxKind::StaticKeyword)? && self.peek_nth_kind(1)? == SyntaxKind::OpenBraceToken {
            return self.parse_class_static_block(start);
        }

        let modifiers = self.parse_modifiers(CLASS_MEMBER_MODIFIERS)?;
        let body_optional = self.typescript() || self.context.has(ContextFlags::AMBIENT);
        if self.typescript() && self.is_index_signature_start()? {
            let signature = self.parse_index_signature(start, modifiers)?;
            self.parse_semicolon()?;
            return Ok(ClassElement::IndexSignature(signature));
        }

        let kind = self.peek_kind()?;
        if matches!(kind, SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && can_start_property_name(self.peek_nth_kind(1)?)
        {
            self.bump()?;
            let name = self.parse_property_name()?;
            let accessor = self.parse_accessor(start, kind, name, modifiers, body_optional)?;
            return Ok(if kind == SyntaxKind::GetKeyword {
                ClassElement::GetAccessor(accessor)
            } else {
                ClassElement::SetAccessor(accessor)
            });
        }

        let is_generator = self.parse_generator_star()?;
        if !is_generator
            && !modifiers.contains(ModifierFlags::STATIC)
            && self.at_constructor_name()?
            && self.peek_nth_kind(1)? == SyntaxKind::OpenParenToken
        {
            self.bump()?;
            let constructor = self.parse_function_rest(
                start,
                SyntaxKind::Constructor,
                None,
                false,
                false,
                modifiers,
                body_optional,
            )?;
            return Ok(ClassElement::Constructor(constructor));
        }

        let name = self.parse_property_name()?;
        let optional = self.typescript() && self.eat(SyntaxKind::QuestionToken)?;
        if self.at(SyntaxKind::OpenParenToken)? || self.at(SyntaxKind::LessThanToken)? {
            let method = self.parse_method(start, name, optional, is_generator, modifiers, body_optional)?;
            return Ok(ClassElement::MethodDeclaration(method));
        }
        if is_generator {
            return self.unexpected(Expected::Kind(SyntaxKind::OpenParenToken));
        }
        self.parse_property_declaration(start, name, optional, modifiers)
            .map(ClassElement::PropertyDeclaration)
    }

    fn at_constructor_name(&mut self) -> PResult<bool> {
        let token = self.peek()?;
        Ok(token.kind == SyntaxKind::ConstructorKeyword
            || (token.kind == SyntaxKind::StringLiteral && token.text() == "constructor"))
    }

    fn parse_property_declaration(
        &mut self,
        start: TextPos,
        name: PropertyName<'a>,
        optional: bool,
        modifiers: ModifierFlags,
    ) -> PResult<PropertyDeclaration<'a>> {
        if !self.typescript() {
            self.require(feature::CLASS_FIELDS, TextRange::new(start, self.prev_end))?;
        }
        let definite = self.typescript()
            && !optional
            && self.at(SyntaxKind::ExclamationToken)?
            && self.eat(SyntaxKind::ExclamationToken)?;
        let type_annotation = if self.typescript() && self.eat(SyntaxKind::ColonToken)? {
            let type_annotation = self.parse_type()?;
            Some(self.alloc(type_annotation))
        } else {
            None
        };
        let initializer = if self.at(SyntaxKind::EqualsToken)? {
            let token = self.bump()?;
            if self.context.has(ContextFlags::AMBIENT) || modifiers.contains(ModifierFlags::AMBIENT) {
                return self.semantic(&messages::INITIALIZERS_ARE_NOT_ALLOWED_IN_AMBIENT_CONTEXTS, &[], token.range);
            }
            // Field initializers run as methods: no `yield` or `await`.
            let initializer = self.scoped(
                ContextFlags::IN_ALLOWED,
                ContextFlags::YIELD_ALLOWED | ContextFlags::AWAIT_ALLOWED,
                |p| p.parse_assignment(),
            )?;
            Some(self.alloc(initializer))
        } else {
            None
        };
        self.parse_semicolon()?;
        Ok(PropertyDeclaration {
            data: self.finish(SyntaxKind::PropertyDeclaration, start).with_modifiers(modifiers),
            name,
            optional,
            definite,
            type_annotation,
            initializer,
        })
    }

    fn parse_class_static_block(&mut self, start: TextPos) -> PResult<ClassElement<'a>> {
        let token = self.bump()?;
        self.require(feature::CLASS_FIELDS, token.range)?;
        self.labels.enter_function();
        let body = self.scoped(ContextFlags::NONE, ContextFlags::FUNCTION_BOUNDARY, |p| p.parse_block());
        self.labels.exit_function();
        Ok(ClassElement::ClassStaticBlock(ClassStaticBlock {
            body: body?,
            data: self.finish(SyntaxKind::ClassStaticBlockDeclaration, start),
        }))
    }

    /// A method in a class body or object literal, positioned after its name.
    pub(crate) fn parse_method(
        &mut self,
        start: TextPos,
        name: PropertyName<'a>,
        optional: bool,
        is_generator: bool,
        modifiers: ModifierFlags,
        body_optional: bool,
    ) -> PResult<MethodDeclaration<'a>> {
        let is_async = modifiers.contains(ModifierFlags::ASYNC);
        let function = self.parse_function_rest(
            start,
            SyntaxKind::MethodDeclaration,
            None,
            is_generator,
            is_async,
            modifiers,
            body_optional,
        )?;
        Ok(MethodDeclaration {
            data: self.finish(SyntaxKind::MethodDeclaration, start).with_modifiers(modifiers),
            name,
            optional,
            function,
        })
    }

    /// A `get` or `set` accessor, positioned after its name. `kind` is the
    /// `get`/`set` keyword.
    pub(crate) fn parse_accessor(
        &mut self,
        start: TextPos,
        kind: SyntaxKind,
        name: PropertyName<'a>,
        modifiers: ModifierFlags,
        body_optional: bool,
    ) -> PResult<AccessorDeclaration<'a>> {
        let node_kind = if kind == SyntaxKind::GetKeyword {
            SyntaxKind::GetAccessor
        } else {
            SyntaxKind::SetAccessor
        };
        let function = self.parse_function_rest(start, node_kind, None, false, false, modifiers, body_optional)?;
        match node_kind {
            SyntaxKind::GetAccessor if !function.parameters.is_empty() => {
                return self.semantic(
                    &messages::A_GET_ACCESSOR_CANNOT_HAVE_PARAMETERS,
                    &[],
                    function.parameters[0].data.range,
                );
            }
            SyntaxKind::SetAccessor if function.parameters.len() != 1 || function.parameters[0].rest => {
                return self.semantic(
                    &messages::A_SET_ACCESSOR_MUST_HAVE_EXACTLY_ONE_PARAMETER,
                    &[],
                    name.range(),
                );
            }
            _ => {}
        }
        Ok(AccessorDeclaration {
            data: self.finish(node_kind, start).with_modifiers(modifiers),
            name,
            function,
        })
    }

    // ========================================================================
    // TypeScript declarations
    // ========================================================================

    pub(crate) fn parse_interface_declaration(
        &mut self,
        start: TextPos,
        modifiers: ModifierFlags,
    ) -> PResult<Statement<'a>> {
        let keyword = self.bump()?;
        self.require(feature::TYPESCRIPT, keyword.range)?;
        let name = self.parse_identifier()?;
        let type_parameters = if self.at(SyntaxKind::LessThanToken)? {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        let heritage_clauses = self.parse_heritage_clauses(true)?;
        let members = self.parse_type_members()?;
        Ok(Statement::InterfaceDeclaration(InterfaceDeclaration {
            data: self
                .finish(SyntaxKind::InterfaceDeclaration, start)
                .with_modifiers(modifiers)
                .with_flags(self.context_node_flags()),
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    pub(crate) fn parse_type_alias_declaration(
        &mut self,
        start: TextPos,
        modifiers: ModifierFlags,
    ) -> PResult<Statement<'a>> {
        let keyword = self.bump()?;
        self.require(feature::TYPESCRIPT, keyword.range)?;
        let name = self.parse_identifier()?;
        let type_parameters = if self.at(SyntaxKind::LessThanToken)? {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        self.expect(SyntaxKind::EqualsToken)?;
        let type_node = self.parse_type()?;
        self.parse_semicolon()?;
        Ok(Statement::TypeAliasDeclaration(TypeAliasDeclaration {
            data: self
                .finish(SyntaxKind::TypeAliasDeclaration, start)
                .with_modifiers(modifiers)
                .with_flags(self.context_node_flags()),
            name,
            type_parameters,
            type_node: self.alloc(type_node),
        }))
    }

    pub(crate) fn parse_enum_declaration(&mut self, start: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let keyword = self.expect(SyntaxKind::EnumKeyword)?;
        self.require(feature::TYPESCRIPT, keyword.range)?;
        let name = self.parse_identifier()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken)? {
            let member_start = self.start()?;
            let member_name = self.parse_property_name()?;
            let initializer = if self.eat(SyntaxKind::EqualsToken)? {
                let initializer =
                    self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_assignment())?;
                Some(self.alloc(initializer))
            } else {
                None
            };
            members.push(EnumMember {
                data: self.finish(SyntaxKind::EnumMember, member_start),
                name: member_name,
                initializer,
            });
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Statement::EnumDeclaration(EnumDeclaration {
            data: self
                .finish(SyntaxKind::EnumDeclaration, start)
                .with_modifiers(modifiers)
                .with_flags(self.context_node_flags()),
            name,
            members: self.alloc_list(members),
        }))
    }

    /// `namespace a.b { }`, `module a { }`, `declare module "m" { }` and
    /// `declare global { }`.
    pub(crate) fn parse_module_declaration(
        &mut self,
        start: TextPos,
        modifiers: ModifierFlags,
    ) -> PResult<Statement<'a>> {
        let keyword = self.bump()?;
        self.require(feature::TYPESCRIPT, keyword.range)?;
        let flags = self.context_node_flags();
        let declaration = match keyword.kind {
            SyntaxKind::GlobalKeyword => {
                let name = ModuleName::Identifier(self.identifier_from(&keyword));
                let body = self.parse_module_block()?;
                ModuleDeclaration {
                    data: self
                        .finish(SyntaxKind::ModuleDeclaration, start)
                        .with_modifiers(modifiers)
                        .with_flags(flags | NodeFlags::GLOBAL_AUGMENTATION),
                    name,
                    body: Some(ModuleBody::ModuleBlock(body)),
                }
            }
            SyntaxKind::ModuleKeyword if self.at(SyntaxKind::StringLiteral)? => {
                let name = self.parse_string_literal()?;
                if !self.context.has(ContextFlags::AMBIENT) {
                    return self.semantic(&messages::ONLY_AMBIENT_MODULES_CAN_USE_QUOTED_NAMES, &[], name.data.range);
                }
                let body = if self.at(SyntaxKind::OpenBraceToken)? {
                    Some(ModuleBody::ModuleBlock(self.parse_module_block()?))
                } else {
                    self.parse_semicolon()?;
                    None
                };
                ModuleDeclaration {
                    data: self
                        .finish(SyntaxKind::ModuleDeclaration, start)
                        .with_modifiers(modifiers)
                        .with_flags(flags),
                    name: ModuleName::StringLiteral(name),
                    body,
                }
            }
            _ => {
                let flags = if keyword.kind == SyntaxKind::NamespaceKeyword {
                    flags | NodeFlags::NAMESPACE
                } else {
                    flags
                };
                self.parse_namespace_rest(start, flags, modifiers)?
            }
        };
        Ok(Statement::ModuleDeclaration(declaration))
    }

    /// One link of a possibly dotted namespace name and what follows it.
    fn parse_namespace_rest(
        &mut self,
        start: TextPos,
        flags: NodeFlags,
        modifiers: ModifierFlags,
    ) -> PResult<ModuleDeclaration<'a>> {
        self.nested(|p| {
            let name = p.parse_identifier()?;
            let body = if p.eat(SyntaxKind::DotToken)? {
                let inner_start = p.start()?;
                let inner = p.parse_namespace_rest(inner_start, flags | NodeFlags::NESTED_NAMESPACE, ModifierFlags::NONE)?;
                ModuleBody::Namespace(p.alloc(inner))
            } else {
                ModuleBody::ModuleBlock(p.parse_module_block()?)
            };
            Ok(ModuleDeclaration {
                data: p
                    .finish(SyntaxKind::ModuleDeclaration, start)
                    .with_modifiers(modifiers)
                    .with_flags(flags),
                name: ModuleName::Identifier(name),
                body: Some(body),
            })
        })
    }

    fn parse_module_block(&mut self) -> PResult<Block<'a>> {
        let start = self.start()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        trace!(pos = start, "module block");
        let statements = self.parse_statement_list(SyntaxKind::CloseBraceToken, false, true)?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Block {
            data: self.finish(SyntaxKind::ModuleBlock, start),
            statements,
        })
    }

    // ========================================================================
    // Binding patterns
    // ========================================================================

    /// An identifier or destructuring pattern in declaration position.
    pub(crate) fn parse_binding_target(&mut self) -> PResult<Pattern<'a>> {
        match self.peek_kind()? {
            SyntaxKind::OpenBracketToken => self.nested(|p| p.parse_array_binding_pattern()),
            SyntaxKind::OpenBraceToken => self.nested(|p| p.parse_object_binding_pattern()),
            _ => self.parse_identifier().map(Pattern::Identifier),
        }
    }

    fn parse_binding_initializer(&mut self) -> PResult<Option<&'a Expression<'a>>> {
        if !self.eat(SyntaxKind::EqualsToken)? {
            return Ok(None);
        }
        let initializer = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_assignment())?;
        Ok(Some(self.alloc(initializer)))
    }

    /// `...target`, which must close the pattern.
    fn parse_binding_rest(&mut self, close: SyntaxKind) -> PResult<&'a RestElement<'a>> {
        let start = self.start()?;
        self.bump()?;
        let target = self.parse_binding_target()?;
        let rest = RestElement {
            data: self.finish(SyntaxKind::RestElement, start),
            target,
        };
        if self.at(SyntaxKind::CommaToken)? && self.peek_nth_kind(1)? == close {
            return self.semantic(
                &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA,
                &[],
                rest.data.range,
            );
        }
        if !self.at(close)? {
            return self.semantic(&messages::A_REST_ELEMENT_MUST_BE_LAST_IN_A_DESTRUCTURING_PATTERN, &[], rest.data.range);
        }
        Ok(self.alloc(rest))
    }

    fn parse_array_binding_pattern(&mut self) -> PResult<Pattern<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        self.require(feature::DESTRUCTURING, token.range)?;
        let mut elements = Vec::new();
        let mut rest = None;
        while !self.at(SyntaxKind::CloseBracketToken)? {
            if self.eat(SyntaxKind::CommaToken)? {
                elements.push(None);
                continue;
            }
            if self.at(SyntaxKind::DotDotDotToken)? {
                rest = Some(self.parse_binding_rest(SyntaxKind::CloseBracketToken)?);
                break;
            }
            let element_start = self.start()?;
            let target = self.parse_binding_target()?;
            let initializer = self.parse_binding_initializer()?;
            elements.push(Some(PatternElement {
                data: self.finish(SyntaxKind::PatternElement, element_start),
                target,
                initializer,
            }));
            if !self.at(SyntaxKind::CloseBracketToken)? {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(Pattern::Array(ArrayPattern {
            data: self.finish(SyntaxKind::ArrayPattern, start),
            elements: self.alloc_list(elements),
            rest,
        }))
    }

    fn parse_object_binding_pattern(&mut self) -> PResult<Pattern<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        self.require(feature::DESTRUCTURING, token.range)?;
        let mut properties = Vec::new();
        let mut rest = None;
        while !self.at(SyntaxKind::CloseBraceToken)? {
            if self.at(SyntaxKind::DotDotDotToken)? {
                rest = Some(self.parse_binding_rest(SyntaxKind::CloseBraceToken)?);
                break;
            }
            let property_start = self.start()?;
            let key = self.parse_property_name()?;
            let (value, shorthand) = if self.eat(SyntaxKind::ColonToken)? {
                (self.parse_binding_target()?, false)
            } else if let PropertyName::Identifier(id) = key {
                self.check_identifier_name(&id)?;
                (Pattern::Identifier(id), true)
            } else {
                return self.unexpected(Expected::Kind(SyntaxKind::ColonToken));
            };
            let initializer = self.parse_binding_initializer()?;
            properties.push(PatternProperty {
                data: self.finish(SyntaxKind::PatternProperty, property_start),
                key,
                value,
                initializer,
                shorthand,
            });
            if !self.at(SyntaxKind::CloseBraceToken)? {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Pattern::Object(ObjectPattern {
            data: self.finish(SyntaxKind::ObjectPattern, start),
            properties: self.alloc_list(properties),
            rest,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_frames_allow_yield_only() {
        let (set, clear) = function_frame(true, false, false);
        assert!(set.contains(ContextFlags::YIELD_ALLOWED | ContextFlags::IN_FUNCTION));
        assert!(clear.contains(ContextFlags::AWAIT_ALLOWED));
        assert!(clear.contains(ContextFlags::BREAK_ALLOWED | ContextFlags::CONTINUE_ALLOWED));
        assert!(!clear.intersects(set));
    }

    #[test]
    fn arrows_keep_the_enclosing_function_state() {
        let (set, clear) = function_frame(false, true, true);
        assert!(set.contains(ContextFlags::AWAIT_ALLOWED));
        assert!(!set.contains(ContextFlags::IN_FUNCTION));
        assert!(!clear.contains(ContextFlags::IN_FUNCTION));
    }

    #[test]
    fn modifier_keywords_map_to_flags() {
        assert_eq!(modifier_flag(SyntaxKind::DeclareKeyword), ModifierFlags::AMBIENT);
        assert_eq!(modifier_flag(SyntaxKind::Identifier), ModifierFlags::NONE);
        assert!(CLASS_MEMBER_MODIFIERS.contains(ModifierFlags::OVERRIDE));
        assert!(!CLASS_MEMBER_MODIFIERS.contains(ModifierFlags::EXPORT));
    }
}
