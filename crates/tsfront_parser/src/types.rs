//! TypeScript type grammar: annotations, type arguments and parameters,
//! object type members and return-type predicates.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::text::TextPos;
use tsfront_scanner::{Expected, PResult};

use crate::context::ContextFlags;
use crate::features::feature;
use crate::parser::Parser;
use crate::utilities::can_start_type;

/// Flags that do not reach into bracketed sub-types.
const ENCLOSED_TYPE_RESET: ContextFlags =
    ContextFlags::DISALLOW_CONDITIONAL_TYPES.union(ContextFlags::TYPE_OPTIONAL_POSTFIX);

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> PResult<TypeNode<'a>> {
        self.nested(|p| p.parse_type_inner())
    }

    /// A type inside brackets or parentheses, where conditional types are
    /// allowed again.
    fn parse_enclosed_type(&mut self) -> PResult<TypeNode<'a>> {
        self.scoped(ContextFlags::TYPE_NON_NULL_POSTFIX, ENCLOSED_TYPE_RESET, |p| p.parse_type())
    }

    fn parse_type_inner(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        match self.peek_kind()? {
            SyntaxKind::LessThanToken => {
                return self.parse_function_type(start, SyntaxKind::FunctionType, ModifierFlags::NONE);
            }
            SyntaxKind::NewKeyword => {
                self.bump()?;
                return self.parse_function_type(start, SyntaxKind::ConstructorType, ModifierFlags::NONE);
            }
            SyntaxKind::AbstractKeyword if self.peek_nth_kind(1)? == SyntaxKind::NewKeyword => {
                self.bump()?;
                self.bump()?;
                return self.parse_function_type(start, SyntaxKind::ConstructorType, ModifierFlags::ABSTRACT);
            }
            SyntaxKind::OpenParenToken => {
                if let Some(function_type) = self.try_parse_parenthesized_function_type(start)? {
                    return Ok(function_type);
                }
            }
            _ => {}
        }

        let check_type = self.parse_union_type()?;
        if self.context.has(ContextFlags::DISALLOW_CONDITIONAL_TYPES)
            || self.line_break_before()?
            || !self.at(SyntaxKind::ExtendsKeyword)?
        {
            return Ok(check_type);
        }
        self.bump()?;
        let extends_type = self.scoped(ContextFlags::DISALLOW_CONDITIONAL_TYPES, ContextFlags::NONE, |p| {
            p.parse_type()
        })?;
        self.expect(SyntaxKind::QuestionToken)?;
        let true_type = self.parse_enclosed_type()?;
        self.expect(SyntaxKind::ColonToken)?;
        let false_type = self.parse_enclosed_type()?;
        Ok(TypeNode::ConditionalType(ConditionalTypeNode {
            data: self.finish(SyntaxKind::ConditionalType, start),
            check_type: self.alloc(check_type),
            extends_type: self.alloc(extends_type),
            true_type: self.alloc(true_type),
            false_type: self.alloc(false_type),
        }))
    }

    /// `(` starts a function type when the next tokens look like a parameter
    /// list followed by `=>`. Destructured parameters are settled by trying.
    fn try_parse_parenthesized_function_type(&mut self, start: TextPos) -> PResult<Option<TypeNode<'a>>> {
        let next = self.peek_nth_kind(1)?;
        let is_function = match next {
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => true,
            SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => {
                return Ok(self.speculate("function type", |p| {
                    p.parse_function_type(start, SyntaxKind::FunctionType, ModifierFlags::NONE)
                }));
            }
            _ if next.is_identifier_or_keyword() => match self.peek_nth_kind(2)? {
                SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken => {
                    true
                }
                SyntaxKind::CloseParenToken => self.peek_nth_kind(3)? == SyntaxKind::EqualsGreaterThanToken,
                _ => next.is_modifier_kind() && self.peek_nth_kind(2)?.is_identifier_or_keyword(),
            },
            _ => false,
        };
        if !is_function {
            return Ok(None);
        }
        self.parse_function_type(start, SyntaxKind::FunctionType, ModifierFlags::NONE)
            .map(Some)
    }

    fn parse_function_type(
        &mut self,
        start: TextPos,
        kind: SyntaxKind,
        modifiers: ModifierFlags,
    ) -> PResult<TypeNode<'a>> {
        let type_parameters = if self.at(SyntaxKind::LessThanToken)? {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        let parameters = self.scoped(ContextFlags::NONE, ENCLOSED_TYPE_RESET, |p| p.parse_parameter_list(false))?;
        self.expect(SyntaxKind::EqualsGreaterThanToken)?;
        let return_type = self.parse_return_type()?;
        Ok(TypeNode::FunctionType(FunctionTypeNode {
            data: self.finish(kind, start).with_modifiers(modifiers),
            type_parameters,
            parameters,
            return_type: self.alloc(return_type),
        }))
    }

    fn parse_union_type(&mut self) -> PResult<TypeNode<'a>> {
        self.parse_type_list(SyntaxKind::BarToken, SyntaxKind::UnionType, Self::parse_intersection_type)
    }

    fn parse_intersection_type(&mut self) -> PResult<TypeNode<'a>> {
        self.parse_type_list(SyntaxKind::AmpersandToken, SyntaxKind::IntersectionType, Self::parse_type_operator)
    }

    /// Operands joined by `|` or `&`, with an optional leading separator.
    /// A leading separator alone still makes a one-member list.
    fn parse_type_list(
        &mut self,
        separator: SyntaxKind,
        kind: SyntaxKind,
        parse_operand: fn(&mut Self) -> PResult<TypeNode<'a>>,
    ) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let leading = self.eat(separator)?;
        let first = parse_operand(self)?;
        if !leading && !self.at(separator)? {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(separator)? {
            types.push(parse_operand(self)?);
        }
        let node = UnionOrIntersectionTypeNode {
            data: self.finish(kind, start),
            types: self.alloc_list(types),
        };
        Ok(if kind == SyntaxKind::UnionType {
            TypeNode::UnionType(node)
        } else {
            TypeNode::IntersectionType(node)
        })
    }

    fn parse_type_operator(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        match kind {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword
                if can_start_type(self.peek_nth_kind(1)?) =>
            {
                self.bump()?;
                let operand = self.nested(|p| p.parse_type_operator())?;
                Ok(TypeNode::TypeOperator(TypeOperatorNode {
                    data: self.finish(SyntaxKind::TypeOperator, start),
                    operator: kind,
                    type_node: self.alloc(operand),
                }))
            }
            SyntaxKind::InferKeyword => self.parse_infer_type(),
            _ => self.parse_postfix_type(),
        }
    }

    /// `infer U` with an optional `extends` constraint. Outside the
    /// `extends` operand of a conditional type, `infer U extends X ?` is
    /// read as a conditional type instead.
    fn parse_infer_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        self.bump()?;
        let name_start = self.start()?;
        let name = self.parse_identifier()?;
        let constraint = if self.at(SyntaxKind::ExtendsKeyword)? {
            let disallowed = self.context.has(ContextFlags::DISALLOW_CONDITIONAL_TYPES);
            self.speculate("infer constraint", |p| {
                p.bump()?;
                let constraint = p.scoped(ContextFlags::DISALLOW_CONDITIONAL_TYPES, ContextFlags::NONE, |p| {
                    p.parse_type()
                })?;
                if !disallowed && p.at(SyntaxKind::QuestionToken)? {
                    return p.unexpected(Expected::Nothing);
                }
                Ok(constraint)
            })
        } else {
            None
        };
        let type_parameter = TypeParameter {
            data: self.finish(SyntaxKind::TypeParameter, name_start),
            name,
            constraint: constraint.map(|constraint| self.alloc(constraint)),
            default: None,
        };
        Ok(TypeNode::InferType(InferTypeNode {
            data: self.finish(SyntaxKind::InferType, start),
            type_parameter,
        }))
    }

    /// Array types `T[]`, indexed access `T[K]`, non-null `T!` and, inside
    /// tuples, the optional marker `T?`.
    fn parse_postfix_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let mut type_node = self.parse_primary_type()?;
        loop {
            if self.line_break_before()? {
                break;
            }
            match self.peek_kind()? {
                SyntaxKind::OpenBracketToken => {
                    self.bump()?;
                    if self.eat(SyntaxKind::CloseBracketToken)? {
                        type_node = TypeNode::ArrayType(ArrayTypeNode {
                            data: self.finish(SyntaxKind::ArrayType, start),
                            element_type: self.alloc(type_node),
                        });
                    } else {
                        let index_type = self.parse_enclosed_type()?;
                        self.expect(SyntaxKind::CloseBracketToken)?;
                        type_node = TypeNode::IndexedAccessType(IndexedAccessTypeNode {
                            data: self.finish(SyntaxKind::IndexedAccessType, start),
                            object_type: self.alloc(type_node),
                            index_type: self.alloc(index_type),
                        });
                    }
                }
                SyntaxKind::ExclamationToken if self.context.has(ContextFlags::TYPE_NON_NULL_POSTFIX) => {
                    self.bump()?;
                    type_node = TypeNode::NonNullType(WrappedTypeNode {
                        data: self.finish(SyntaxKind::NonNullType, start),
                        type_node: self.alloc(type_node),
                    });
                }
                SyntaxKind::QuestionToken
                    if self.context.has(ContextFlags::TYPE_OPTIONAL_POSTFIX)
                        && matches!(
                            self.peek_nth_kind(1)?,
                            SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
                        ) =>
                {
                    self.bump()?;
                    return Ok(TypeNode::OptionalType(WrappedTypeNode {
                        data: self.finish(SyntaxKind::OptionalType, start),
                        type_node: self.alloc(type_node),
                    }));
                }
                _ => break,
            }
        }
        Ok(type_node)
    }

    fn parse_primary_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        match kind {
            _ if kind.is_keyword_type() && self.peek_nth_kind(1)? != SyntaxKind::DotToken => {
                let token = self.bump()?;
                Ok(TypeNode::KeywordType(NodeData::with_range(kind, token.range)))
            }
            SyntaxKind::ThisKeyword => {
                let token = self.bump()?;
                Ok(TypeNode::ThisType(NodeData::with_range(SyntaxKind::ThisType, token.range)))
            }
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::OpenBraceToken => {
                if self.at_mapped_type()? {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_type_members()?;
                    Ok(TypeNode::TypeLiteral(TypeLiteralNode {
                        data: self.finish(SyntaxKind::TypeLiteral, start),
                        members,
                    }))
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.bump()?;
                let inner = self.parse_enclosed_type()?;
                self.expect(SyntaxKind::CloseParenToken)?;
                Ok(TypeNode::ParenthesizedType(WrappedTypeNode {
                    data: self.finish(SyntaxKind::ParenthesizedType, start),
                    type_node: self.alloc(inner),
                }))
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal_type(),
            SyntaxKind::MinusToken
                if matches!(
                    self.peek_nth_kind(1)?,
                    SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
                ) =>
            {
                self.parse_literal_type()
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(),
            _ if kind.is_identifier_or_keyword() => self.parse_type_reference(),
            _ => self.unexpected(Expected::Value("type")),
        }
    }

    fn parse_type_reference(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let type_name = self.parse_entity_name()?;
        let type_arguments = if self.at(SyntaxKind::LessThanToken)? && !self.line_break_before()? {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(TypeNode::TypeReference(TypeReferenceNode {
            data: self.finish(SyntaxKind::TypeReference, start),
            type_name,
            type_arguments,
        }))
    }

    /// `a.b.c` in type position.
    fn parse_entity_name(&mut self) -> PResult<EntityName<'a>> {
        let start = self.start()?;
        let mut name = EntityName::Identifier(self.parse_identifier_name()?);
        while self.eat(SyntaxKind::DotToken)? {
            let right = self.parse_identifier_name()?;
            name = EntityName::QualifiedName(self.alloc(QualifiedName {
                data: self.finish(SyntaxKind::QualifiedName, start),
                left: name,
                right,
            }));
        }
        Ok(name)
    }

    fn parse_type_query(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        self.bump()?;
        let expr_name = self.parse_entity_name()?;
        let type_arguments = if self.at(SyntaxKind::LessThanToken)? && !self.line_break_before()? {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(TypeNode::TypeQuery(TypeQueryNode {
            data: self.finish(SyntaxKind::TypeQuery, start),
            expr_name,
            type_arguments,
        }))
    }

    /// `as const`: a reference to the type named `const`.
    pub(crate) fn parse_const_type_reference(&mut self) -> PResult<TypeNode<'a>> {
        let token = self.expect(SyntaxKind::ConstKeyword)?;
        Ok(TypeNode::TypeReference(TypeReferenceNode {
            data: NodeData::with_range(SyntaxKind::TypeReference, token.range),
            type_name: EntityName::Identifier(self.identifier_from(&token)),
            type_arguments: None,
        }))
    }

    fn parse_literal_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let negative = self.eat(SyntaxKind::MinusToken)?;
        let token = self.bump()?;
        let mut literal = match token.kind {
            SyntaxKind::StringLiteral => Expression::StringLiteral(self.string_literal_from(&token)),
            SyntaxKind::NumericLiteral => Expression::NumericLiteral(self.numeric_literal(&token)?),
            SyntaxKind::BigIntLiteral => {
                self.require(feature::BIGINT, token.range)?;
                Expression::BigIntLiteral(self.bigint_literal(&token))
            }
            SyntaxKind::TrueKeyword => Expression::TrueKeyword(NodeData::with_range(token.kind, token.range)),
            SyntaxKind::FalseKeyword => Expression::FalseKeyword(NodeData::with_range(token.kind, token.range)),
            _ => {
                self.require(feature::TEMPLATE_LITERALS, token.range)?;
                Expression::NoSubstitutionTemplateLiteral(self.template_piece(&token))
            }
        };
        if negative {
            literal = Expression::PrefixUnary(UnaryExpression {
                data: self.finish(SyntaxKind::PrefixUnaryExpression, start),
                operator: SyntaxKind::MinusToken,
                operand: self.alloc(literal),
            });
        }
        Ok(TypeNode::LiteralType(LiteralTypeNode {
            data: self.finish(SyntaxKind::LiteralType, start),
            literal: self.alloc(literal),
        }))
    }

    fn parse_template_literal_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let head = self.bump()?;
        self.require(feature::TEMPLATE_LITERALS, head.range)?;
        let head = self.template_piece(&head);
        let mut spans = Vec::new();
        loop {
            let span_start = self.start()?;
            let type_node = self.parse_enclosed_type()?;
            let literal = self.parse_template_continuation()?;
            let done = literal.data.kind == SyntaxKind::TemplateTail;
            spans.push(TemplateLiteralTypeSpan {
                data: self.finish(SyntaxKind::TemplateLiteralTypeSpan, span_start),
                type_node: self.alloc(type_node),
                literal,
            });
            if done {
                break;
            }
        }
        Ok(TypeNode::TemplateLiteralType(TemplateLiteralTypeNode {
            data: self.finish(SyntaxKind::TemplateLiteralType, start),
            head,
            template_spans: self.alloc_list(spans),
        }))
    }

    fn parse_tuple_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        self.bump()?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBracketToken)? {
            let element = self.scoped(
                ContextFlags::TYPE_OPTIONAL_POSTFIX | ContextFlags::TYPE_NON_NULL_POSTFIX,
                ContextFlags::DISALLOW_CONDITIONAL_TYPES,
                |p| p.parse_tuple_element(),
            )?;
            elements.push(element);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(TypeNode::TupleType(TupleTypeNode {
            data: self.finish(SyntaxKind::TupleType, start),
            elements: self.alloc_list(elements),
        }))
    }

    fn parse_tuple_element(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let offset = usize::from(self.at(SyntaxKind::DotDotDotToken)?);
        let named = self.peek_nth_kind(offset)?.is_identifier_or_keyword()
            && match self.peek_nth_kind(offset + 1)? {
                SyntaxKind::ColonToken => true,
                SyntaxKind::QuestionToken => self.peek_nth_kind(offset + 2)? == SyntaxKind::ColonToken,
                _ => false,
            };
        if named {
            let rest = self.eat(SyntaxKind::DotDotDotToken)?;
            let name = self.parse_identifier_name()?;
            let optional = self.eat(SyntaxKind::QuestionToken)?;
            self.expect(SyntaxKind::ColonToken)?;
            let type_node = self.parse_type()?;
            return Ok(TypeNode::NamedTupleMember(NamedTupleMemberNode {
                data: self.finish(SyntaxKind::NamedTupleMember, start),
                rest,
                name,
                optional,
                type_node: self.alloc(type_node),
            }));
        }
        if self.eat(SyntaxKind::DotDotDotToken)? {
            let type_node = self.parse_type()?;
            return Ok(TypeNode::RestType(WrappedTypeNode {
                data: self.finish(SyntaxKind::RestType, start),
                type_node: self.alloc(type_node),
            }));
        }
        self.parse_type()
    }

    /// `{ [K in T]: U }`, possibly with `readonly` and `+`/`-` markers.
    fn at_mapped_type(&mut self) -> PResult<bool> {
        let mut n = 1;
        match self.peek_nth_kind(1)? {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                if self.peek_nth_kind(2)? != SyntaxKind::ReadonlyKeyword {
                    return Ok(false);
                }
                n = 3;
            }
            SyntaxKind::ReadonlyKeyword => n = 2,
            _ => {}
        }
        Ok(self.peek_nth_kind(n)? == SyntaxKind::OpenBracketToken
            && self.peek_nth_kind(n + 1)?.is_identifier_or_keyword()
            && self.peek_nth_kind(n + 2)? == SyntaxKind::InKeyword)
    }

    fn parse_mapped_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let readonly_token = self.parse_mapped_modifier(SyntaxKind::ReadonlyKeyword)?;
        self.expect(SyntaxKind::OpenBracketToken)?;
        let parameter_start = self.start()?;
        let name = self.parse_identifier()?;
        self.expect(SyntaxKind::InKeyword)?;
        let constraint = self.parse_enclosed_type()?;
        let type_parameter = TypeParameter {
            data: self.finish(SyntaxKind::TypeParameter, parameter_start),
            name,
            constraint: Some(self.alloc(constraint)),
            default: None,
        };
        let name_type = if self.eat(SyntaxKind::AsKeyword)? {
            let name_type = self.parse_enclosed_type()?;
            Some(self.alloc(name_type))
        } else {
            None
        };
        self.expect(SyntaxKind::CloseBracketToken)?;
        let question_token = self.parse_mapped_modifier(SyntaxKind::QuestionToken)?;
        let type_node = if self.eat(SyntaxKind::ColonToken)? {
            let type_node = self.parse_enclosed_type()?;
            Some(self.alloc(type_node))
        } else {
            None
        };
        if !self.eat(SyntaxKind::SemicolonToken)? {
            self.eat(SyntaxKind::CommaToken)?;
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(TypeNode::MappedType(MappedTypeNode {
            data: self.finish(SyntaxKind::MappedType, start),
            readonly_token,
            type_parameter,
            name_type,
            question_token,
            type_node,
        }))
    }

    /// `marker`, `+marker` or `-marker`; the sign wins when present.
    fn parse_mapped_modifier(&mut self, marker: SyntaxKind) -> PResult<Option<SyntaxKind>> {
        let kind = self.peek_kind()?;
        if kind == marker {
            self.bump()?;
            return Ok(Some(marker));
        }
        if matches!(kind, SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            self.bump()?;
            self.expect(marker)?;
            return Ok(Some(kind));
        }
        Ok(None)
    }

    // ========================================================================
    // Type arguments and parameters
    // ========================================================================

    pub(crate) fn parse_type_arguments(&mut self) -> PResult<&'a [TypeNode<'a>]> {
        let open = self.expect(SyntaxKind::LessThanToken)?;
        self.require(feature::TYPESCRIPT, open.range)?;
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_enclosed_type()?);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::GreaterThanToken)?;
        Ok(self.alloc_list(arguments))
    }

    pub(crate) fn parse_type_parameters(&mut self) -> PResult<&'a [TypeParameter<'a>]> {
        let open = self.expect(SyntaxKind::LessThanToken)?;
        self.require(feature::TYPESCRIPT, open.range)?;
        let mut parameters = Vec::new();
        while !self.at(SyntaxKind::GreaterThanToken)? {
            parameters.push(self.parse_type_parameter()?);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        if parameters.is_empty() {
            return self.unexpected(Expected::Kind(SyntaxKind::Identifier));
        }
        self.expect(SyntaxKind::GreaterThanToken)?;
        Ok(self.alloc_list(parameters))
    }

    fn parse_type_parameter(&mut self) -> PResult<TypeParameter<'a>> {
        let start = self.start()?;
        let mut modifiers = ModifierFlags::NONE;
        loop {
            let token = self.peek()?;
            let flag = match token.kind {
                SyntaxKind::ConstKeyword => ModifierFlags::CONST,
                SyntaxKind::InKeyword => ModifierFlags::IN,
                SyntaxKind::Identifier if token.text() == "out" => ModifierFlags::OUT,
                _ => break,
            };
            if !self.peek_nth_kind(1)?.is_identifier_or_keyword() {
                break;
            }
            self.bump()?;
            modifiers |= flag;
        }
        let name = self.parse_identifier()?;
        let constraint = if self.eat(SyntaxKind::ExtendsKeyword)? {
            let constraint = self.parse_enclosed_type()?;
            Some(self.alloc(constraint))
        } else {
            None
        };
        let default = if self.eat(SyntaxKind::EqualsToken)? {
            let default = self.parse_enclosed_type()?;
            Some(self.alloc(default))
        } else {
            None
        };
        Ok(TypeParameter {
            data: self.finish(SyntaxKind::TypeParameter, start).with_modifiers(modifiers),
            name,
            constraint,
            default,
        })
    }

    // ========================================================================
    // Object type members
    // ========================================================================

    /// `{ ... }` of an interface or type literal. Members are separated by
    /// `;`, `,` or a line break.
    pub(crate) fn parse_type_members(&mut self) -> PResult<&'a [TypeElement<'a>]> {
        self.expect(SyntaxKind::OpenBraceToken)?;
        let members = self.scoped(ContextFlags::NONE, ENCLOSED_TYPE_RESET, |p| {
            let mut members = Vec::new();
            while !p.at(SyntaxKind::CloseBraceToken)? {
                members.push(p.nested(|p| p.parse_type_member())?);
                if p.eat(SyntaxKind::SemicolonToken)? || p.eat(SyntaxKind::CommaToken)? {
                    continue;
                }
                if !p.at(SyntaxKind::CloseBraceToken)? && !p.line_break_before()? {
                    return p.unexpected(Expected::Kind(SyntaxKind::SemicolonToken));
                }
            }
            Ok(members)
        })?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.alloc_list(members))
    }

    fn parse_type_member(&mut self) -> PResult<TypeElement<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        if matches!(kind, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let signature = self.parse_signature_declaration(start, SyntaxKind::CallSignature)?;
            return Ok(TypeElement::CallSignature(signature));
        }
        if kind == SyntaxKind::NewKeyword
            && matches!(
                self.peek_nth_kind(1)?,
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.bump()?;
            let signature = self.parse_signature_declaration(start, SyntaxKind::ConstructSignature)?;
            return Ok(TypeElement::ConstructSignature(signature));
        }

        let modifiers = self.parse_modifiers(ModifierFlags::READONLY)?;
        if self.is_index_signature_start()? {
            return self.parse_index_signature(start, modifiers).map(TypeElement::IndexSignature);
        }
        let name = self.parse_property_name()?;
        let optional = self.eat(SyntaxKind::QuestionToken)?;
        if self.at(SyntaxKind::OpenParenToken)? || self.at(SyntaxKind::LessThanToken)? {
            let (type_parameters, parameters, return_type) = self.parse_signature(false)?;
            return Ok(TypeElement::MethodSignature(MethodSignature {
                data: self.finish(SyntaxKind::MethodSignature, start).with_modifiers(modifiers),
                name,
                optional,
                type_parameters,
                parameters,
                return_type,
            }));
        }
        let type_annotation = if self.eat(SyntaxKind::ColonToken)? {
            let type_annotation = self.parse_type()?;
            Some(self.alloc(type_annotation))
        } else {
            None
        };
        Ok(TypeElement::PropertySignature(PropertySignature {
            data: self.finish(SyntaxKind::PropertySignature, start).with_modifiers(modifiers),
            name,
            optional,
            type_annotation,
        }))
    }

    fn parse_signature_declaration(&mut self, start: TextPos, kind: SyntaxKind) -> PResult<SignatureDeclaration<'a>> {
        let (type_parameters, parameters, return_type) = self.parse_signature(false)?;
        Ok(SignatureDeclaration {
            data: self.finish(kind, start),
            type_parameters,
            parameters,
            return_type,
        })
    }

    /// `[name: ...` opens an index signature; any other `[` is a computed
    /// property name.
    pub(crate) fn is_index_signature_start(&mut self) -> PResult<bool> {
        Ok(self.at(SyntaxKind::OpenBracketToken)?
            && self.peek_nth_kind(1)?.is_identifier_or_keyword()
            && self.peek_nth_kind(2)? == SyntaxKind::ColonToken)
    }

    pub(crate) fn parse_index_signature(&mut self, start: TextPos, modifiers: ModifierFlags) -> PResult<IndexSignature<'a>> {
        self.expect(SyntaxKind::OpenBracketToken)?;
        let parameter_start = self.start()?;
        let name = self.parse_identifier()?;
        self.expect(SyntaxKind::ColonToken)?;
        let key_type = self.parse_enclosed_type()?;
        let parameter = Parameter {
            data: self.finish(SyntaxKind::Parameter, parameter_start),
            rest: false,
            name: Pattern::Identifier(name),
            optional: false,
            type_annotation: Some(self.alloc(key_type)),
            initializer: None,
        };
        self.expect(SyntaxKind::CloseBracketToken)?;
        self.expect(SyntaxKind::ColonToken)?;
        let type_annotation = self.parse_type()?;
        Ok(IndexSignature {
            data: self.finish(SyntaxKind::IndexSignature, start).with_modifiers(modifiers),
            parameter,
            type_annotation: self.alloc(type_annotation),
        })
    }

    // ========================================================================
    // Return types
    // ========================================================================

    /// The type after `:` or `=>` of a signature, which may be a type
    /// predicate: `x is T`, `asserts x`, `asserts this is T`.
    pub(crate) fn parse_return_type(&mut self) -> PResult<TypeNode<'a>> {
        let start = self.start()?;
        let next = self.peek_nth_kind(1)?;
        let asserts = self.at(SyntaxKind::AssertsKeyword)?
            && (next.is_identifier_or_keyword())
            && next != SyntaxKind::IsKeyword
            && !self.line_break_before_nth(1)?;
        let predicate = asserts
            || (self.peek_kind()?.is_identifier_or_keyword()
                && next == SyntaxKind::IsKeyword
                && !self.line_break_before_nth(1)?);
        if !predicate {
            return self.parse_type();
        }
        if asserts {
            self.bump()?;
        }
        let parameter_name = if self.at(SyntaxKind::ThisKeyword)? {
            let token = self.bump()?;
            TypePredicateParameterName::ThisType(NodeData::with_range(SyntaxKind::ThisType, token.range))
        } else {
            TypePredicateParameterName::Identifier(self.parse_identifier_name()?)
        };
        let type_node = if self.eat(SyntaxKind::IsKeyword)? {
            let type_node = self.parse_type()?;
            Some(self.alloc(type_node))
        } else {
            None
        };
        if !asserts && type_node.is_none() {
            return self.unexpected(Expected::Kind(SyntaxKind::IsKeyword));
        }
        Ok(TypeNode::TypePredicate(TypePredicateNode {
            data: self.finish(SyntaxKind::TypePredicate, start),
            asserts,
            parameter_name,
            type_node,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosed_types_reset_postfix_and_conditional_flags() {
        assert!(ENCLOSED_TYPE_RESET.contains(ContextFlags::DISALLOW_CONDITIONAL_TYPES));
        assert!(ENCLOSED_TYPE_RESET.contains(ContextFlags::TYPE_OPTIONAL_POSTFIX));
        assert!(!ENCLOSED_TYPE_RESET.contains(ContextFlags::IN_ALLOWED));
    }
}
