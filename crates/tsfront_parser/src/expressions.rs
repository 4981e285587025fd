//! Expression grammar.
//!
//! Binary operators are parsed with an explicit operand/operator stack
//! rather than one function per precedence level. Parenthesized lists,
//! object literals and array literals are parsed once as expressions and
//! converted to patterns or parameters when the token after them shows
//! that they were patterns all along; the cover-grammar bits in
//! [`ContextFlags`] track whether such a conversion can still succeed.

use tracing::trace;
use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::text::{TextPos, TextRange};
use tsfront_diagnostics::messages;
use tsfront_scanner::{Expected, PResult, SyntaxError, Token, TokenValue};

use crate::context::ContextFlags;
use crate::features::feature;
use crate::parser::Parser;
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::*;

/// One element of a parenthesized list before it is known whether the list
/// is a grouping or arrow parameters.
enum CoverElement<'a> {
    Expression(Expression<'a>),
    /// Only valid as a parameter: `...rest`, `x?` or `x: T`.
    Parameter(Parameter<'a>),
}

#[derive(Default)]
struct CoverList<'a> {
    elements: Vec<CoverElement<'a>>,
    trailing_comma: bool,
}

impl CoverList<'_> {
    fn has_parameter(&self) -> bool {
        self.elements
            .iter()
            .any(|element| matches!(element, CoverElement::Parameter(_)))
    }
}

pub(crate) fn is_arrow(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::Function(function) if function.is_arrow)
}

/// The operator of an unparenthesized unary expression, which may not be
/// the left operand of `**`.
fn unary_operator_text(expr: &Expression<'_>) -> Option<&'static str> {
    match expr {
        Expression::PrefixUnary(unary) => unary.operator.punctuation_text().or(unary.operator.keyword_text()),
        Expression::Await(_) => Some("await"),
        _ => None,
    }
}

/// `??` next to an unparenthesized `||` or `&&` operand, or the reverse.
/// Returns the operand's operator.
fn mixed_logical_operator(operator: SyntaxKind, operand: &Expression<'_>) -> Option<SyntaxKind> {
    let Expression::Binary(binary) = operand else {
        return None;
    };
    let is_logical = |kind: SyntaxKind| matches!(kind, SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken);
    let mixed = match operator {
        SyntaxKind::QuestionQuestionToken => is_logical(binary.operator),
        kind if is_logical(kind) => binary.operator == SyntaxKind::QuestionQuestionToken,
        _ => false,
    };
    mixed.then_some(binary.operator)
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Entry points
    // ========================================================================

    /// A full expression, comma sequences included.
    pub(crate) fn parse_expression(&mut self) -> PResult<Expression<'a>> {
        self.isolated(|p| p.parse_expression_cover())
    }

    /// Like [`Self::parse_expression`], but the cover state and any pending
    /// shorthand initializer are left for the caller, as a `for-in` head
    /// needs.
    pub(crate) fn parse_expression_cover(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let first = self.inherited(|p| p.parse_assignment_cover())?;
        if !self.at(SyntaxKind::CommaToken)? {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(SyntaxKind::CommaToken)? {
            expressions.push(self.inherited(|p| p.parse_assignment_cover())?);
        }
        self.not_a_target();
        Ok(Expression::Sequence(SequenceExpression {
            data: self.finish(SyntaxKind::SequenceExpression, start),
            expressions: self.alloc_list(expressions),
        }))
    }

    /// An assignment expression: no top-level commas.
    pub(crate) fn parse_assignment(&mut self) -> PResult<Expression<'a>> {
        self.isolated(|p| p.parse_assignment_cover())
    }

    pub(crate) fn parse_assignment_cover(&mut self) -> PResult<Expression<'a>> {
        self.nested(|p| p.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> PResult<Expression<'a>> {
        let kind = self.peek_kind()?;
        if kind == SyntaxKind::YieldKeyword {
            if self.context.has(ContextFlags::YIELD_ALLOWED) {
                return self.parse_yield();
            }
            if self.strict() && self.looks_like_operand_follows()? {
                let range = self.peek()?.range;
                return self.semantic(&messages::A_YIELD_EXPRESSION_IS_ONLY_ALLOWED_IN_A_GENERATOR_BODY, &[], range);
            }
        }
        if let Some(arrow) = self.try_parse_arrow_function()? {
            return Ok(arrow);
        }

        let start = self.start()?;
        let left = self.parse_conditional_cover()?;
        if is_arrow(&left) {
            return Ok(left);
        }
        let operator = self.peek_kind()?;
        if !operator.is_assignment_operator() {
            return Ok(left);
        }

        let target = if operator == SyntaxKind::EqualsToken {
            if !self.context.has(ContextFlags::ASSIGNMENT_TARGET) {
                return self.invalid_assignment_target(&left);
            }
            let left = self.alloc(left);
            let target = self.expression_to_assignment_pattern(left)?;
            // A shorthand initializer inside the literal belongs to the
            // pattern now. One from an earlier sibling element stays pending.
            if self.cover_initializer.is_some_and(|range| left.range().contains(range.pos)) {
                self.cover_initializer = None;
            }
            target
        } else {
            if !left.is_simple_assignment_target() {
                return self.invalid_assignment_target(&left);
            }
            let range = self.peek()?.range;
            if operator.is_logical_assignment() {
                self.require(feature::LOGICAL_ASSIGNMENT, range)?;
            } else if operator == SyntaxKind::AsteriskAsteriskEqualsToken {
                self.require(feature::EXPONENTIATION, range)?;
            }
            let left = self.alloc(left);
            match left.skip_parentheses() {
                Expression::Identifier(id) => Pattern::Identifier(*id),
                _ => Pattern::Expression(left),
            }
        };
        self.bump()?;
        let right = self.parse_assignment()?;
        self.not_a_target();
        Ok(Expression::Assignment(AssignmentExpression {
            data: self.finish(SyntaxKind::AssignmentExpression, start),
            target,
            operator,
            right: self.alloc(right),
        }))
    }

    fn invalid_assignment_target<T>(&self, left: &Expression<'a>) -> PResult<T> {
        self.semantic(
            &messages::THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS,
            &[],
            left.range(),
        )
    }

    /// A keyword used as an operator is followed by its operand on the same
    /// line (`await x`, `yield x`).
    fn looks_like_operand_follows(&mut self) -> PResult<bool> {
        if self.line_break_before_nth(1)? {
            return Ok(false);
        }
        let next = self.peek_nth_kind(1)?;
        Ok(is_left_hand_side_expression_start(next)
            && !matches!(
                next,
                SyntaxKind::InKeyword
                    | SyntaxKind::InstanceOfKeyword
                    | SyntaxKind::AsKeyword
                    | SyntaxKind::SatisfiesKeyword
                    | SyntaxKind::OfKeyword
            ))
    }

    fn parse_yield(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        self.bump()?;
        let same_line = !self.line_break_before()?;
        let delegate = same_line && self.eat(SyntaxKind::AsteriskToken)?;
        let expression = if delegate || (same_line && can_start_expression(self.peek_kind()?)) {
            let expression = self.parse_assignment()?;
            Some(self.alloc(expression))
        } else {
            None
        };
        self.not_a_target();
        Ok(Expression::Yield(YieldExpression {
            data: self.finish(SyntaxKind::YieldExpression, start),
            delegate,
            expression,
        }))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Arrow forms that are recognized before the conditional expression:
    /// `x =>`, `async x =>`, `async (...) =>` and `<T>(...) =>`.
    fn try_parse_arrow_function(&mut self) -> PResult<Option<Expression<'a>>> {
        let kind = self.peek_kind()?;
        let start = self.start()?;
        if self.is_identifier_kind(kind)
            && self.peek_nth_kind(1)? == SyntaxKind::EqualsGreaterThanToken
            && !self.line_break_before_nth(1)?
        {
            return self.parse_simple_arrow(start, false).map(Some);
        }
        if kind == SyntaxKind::AsyncKeyword && !self.line_break_before_nth(1)? {
            let next = self.peek_nth_kind(1)?;
            if self.is_identifier_kind(next)
                && self.peek_nth_kind(2)? == SyntaxKind::EqualsGreaterThanToken
                && !self.line_break_before_nth(2)?
            {
                return self.parse_simple_arrow(start, true).map(Some);
            }
            if next == SyntaxKind::OpenParenToken || (next == SyntaxKind::LessThanToken && self.typescript()) {
                return Ok(self.speculate("async arrow function", |p| {
                    p.bump()?;
                    let type_parameters = if p.at(SyntaxKind::LessThanToken)? {
                        Some(p.parse_type_parameters()?)
                    } else {
                        None
                    };
                    p.parse_parenthesized_cover(start, true, type_parameters)
                }));
            }
        }
        if kind == SyntaxKind::LessThanToken && self.typescript() {
            return Ok(self.speculate("generic arrow function", |p| {
                let type_parameters = p.parse_type_parameters()?;
                if !p.at(SyntaxKind::OpenParenToken)? {
                    return p.unexpected(Expected::Kind(SyntaxKind::OpenParenToken));
                }
                p.parse_parenthesized_cover(start, false, Some(type_parameters))
            }));
        }
        Ok(None)
    }

    fn parse_simple_arrow(&mut self, start: TextPos, is_async: bool) -> PResult<Expression<'a>> {
        if is_async {
            self.bump()?;
        }
        let name = self.parse_identifier()?;
        let parameter = Parameter {
            data: NodeData::with_range(SyntaxKind::Parameter, name.data.range),
            rest: false,
            name: Pattern::Identifier(name),
            optional: false,
            type_annotation: None,
            initializer: None,
        };
        let arrow = self.expect(SyntaxKind::EqualsGreaterThanToken)?;
        self.require(feature::ARROW_FUNCTIONS, arrow.range)?;
        if is_async {
            self.require(feature::ASYNC_AWAIT, arrow.range)?;
        }
        let parameters = self.alloc_list(vec![parameter]);
        self.finish_arrow(start, is_async, None, parameters, None)
    }

    /// A parenthesized list starting at `(`: either a grouping or the
    /// parameters of an arrow function. With `is_async` or type parameters
    /// it must be an arrow.
    fn parse_parenthesized_cover(
        &mut self,
        start: TextPos,
        is_async: bool,
        type_parameters: Option<&'a [TypeParameter<'a>]>,
    ) -> PResult<Expression<'a>> {
        self.expect(SyntaxKind::OpenParenToken)?;
        self.context.push_cover_grammar();
        self.context.set(ContextFlags::MAYBE_PARAMETERS | ContextFlags::IN_ALLOWED, true);
        let list = self.parse_cover_list();
        self.context.inherit_cover_grammar();
        let list = list?;

        let arrow_follows = self.at(SyntaxKind::EqualsGreaterThanToken)? && !self.line_break_before()?;
        let return_type = if !arrow_follows && self.typescript() && self.at(SyntaxKind::ColonToken)? {
            self.speculate("arrow return type", |p| {
                p.bump()?;
                let return_type = p.parse_return_type()?;
                if p.at(SyntaxKind::EqualsGreaterThanToken)? && !p.line_break_before()? {
                    Ok(return_type)
                } else {
                    p.unexpected(Expected::Kind(SyntaxKind::EqualsGreaterThanToken))
                }
            })
        } else {
            None
        };

        let must_be_arrow = is_async
            || type_parameters.is_some()
            || list.elements.is_empty()
            || list.trailing_comma
            || list.has_parameter();
        if arrow_follows || return_type.is_some() || must_be_arrow {
            return self.parse_arrow_from_cover(start, is_async, type_parameters, list, return_type);
        }

        let mut expressions = Vec::with_capacity(list.elements.len());
        for element in list.elements {
            if let CoverElement::Expression(expr) = element {
                expressions.push(expr);
            }
        }
        let inner = if expressions.len() == 1 {
            expressions.pop()
        } else {
            None
        };
        let inner = match inner {
            Some(inner) => inner,
            None => {
                let pos = expressions.first().map_or(start, Expression::pos);
                let end = expressions.last().map_or(pos, Expression::end);
                self.not_a_target();
                Expression::Sequence(SequenceExpression {
                    data: NodeData::new(SyntaxKind::SequenceExpression, pos, end),
                    expressions: self.alloc_list(expressions),
                })
            }
        };
        self.context.set(ContextFlags::BINDING_ELEMENT, false);
        if !inner.is_simple_assignment_target() {
            self.context.set(ContextFlags::ASSIGNMENT_TARGET, false);
        }
        Ok(Expression::Parenthesized(ParenthesizedExpression {
            data: self.finish(SyntaxKind::ParenthesizedExpression, start),
            expression: self.alloc(inner),
        }))
    }

    /// Elements of a parenthesized list, through the closing `)`.
    fn parse_cover_list(&mut self) -> PResult<CoverList<'a>> {
        let mut list = CoverList::default();
        while !self.at(SyntaxKind::CloseParenToken)? {
            let kind = self.peek_kind()?;
            if kind == SyntaxKind::DotDotDotToken {
                let parameter = self.parse_parameter(false)?;
                if self.at(SyntaxKind::CommaToken)? {
                    return self.semantic(&messages::A_REST_PARAMETER_MUST_BE_LAST, &[], parameter.data.range);
                }
                list.elements.push(CoverElement::Parameter(parameter));
                break;
            }
            if self.typescript()
                && self.is_identifier_kind(kind)
                && self.peek_nth_kind(1)? == SyntaxKind::QuestionToken
                && can_follow_optional_parameter(self.peek_nth_kind(2)?)
            {
                let parameter = self.parse_parameter(false)?;
                list.elements.push(CoverElement::Parameter(parameter));
            } else {
                let start = self.start()?;
                let expr = self.parse_cover_element()?;
                if self.typescript() && self.at(SyntaxKind::ColonToken)? {
                    let parameter = self.typed_cover_parameter(start, expr)?;
                    list.elements.push(CoverElement::Parameter(parameter));
                } else {
                    list.elements.push(CoverElement::Expression(expr));
                }
            }
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
            if self.at(SyntaxKind::CloseParenToken)? {
                list.trailing_comma = true;
            }
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(list)
    }

    /// `name: T` or `name: T = init` found inside a parenthesized list.
    fn typed_cover_parameter(&mut self, start: TextPos, expr: Expression<'a>) -> PResult<Parameter<'a>> {
        let expr = self.alloc(expr);
        let name = self.expression_to_pattern(expr, crate::patterns::PatternKind::Binding)?;
        self.bump()?;
        let type_annotation = self.parse_type()?;
        let initializer = if self.at(SyntaxKind::EqualsToken)? {
            let token = self.bump()?;
            self.require(feature::DEFAULT_PARAMETERS, token.range)?;
            let initializer = self.parse_assignment()?;
            Some(self.alloc(initializer))
        } else {
            None
        };
        Ok(Parameter {
            data: self.finish(SyntaxKind::Parameter, start),
            rest: false,
            name,
            optional: false,
            type_annotation: Some(self.alloc(type_annotation)),
            initializer,
        })
    }

    fn parse_arrow_from_cover(
        &mut self,
        start: TextPos,
        is_async: bool,
        type_parameters: Option<&'a [TypeParameter<'a>]>,
        list: CoverList<'a>,
        return_type: Option<TypeNode<'a>>,
    ) -> PResult<Expression<'a>> {
        let head = TextRange::new(start, self.prev_end);
        self.require(feature::ARROW_FUNCTIONS, head)?;
        if is_async {
            self.require(feature::ASYNC_AWAIT, head)?;
        }
        trace!(pos = start, parameters = list.elements.len(), "parenthesized list reinterpreted as arrow parameters");
        let mut parameters = Vec::with_capacity(list.elements.len());
        for element in list.elements {
            let parameter = match element {
                CoverElement::Parameter(parameter) => parameter,
                CoverElement::Expression(expr) => {
                    let expr = self.alloc(expr);
                    self.expression_to_parameter(expr)?
                }
            };
            parameters.push(parameter);
        }
        self.cover_initializer = None;

        if self.at(SyntaxKind::EqualsGreaterThanToken)? && self.line_break_before()? {
            let range = self.peek()?.range;
            return self.semantic(&messages::LINE_BREAK_NOT_PERMITTED_HERE, &[], range);
        }
        self.expect(SyntaxKind::EqualsGreaterThanToken)?;
        let parameters = self.alloc_list(parameters);
        let return_type = return_type.map(|ty| self.alloc(ty));
        self.finish_arrow(start, is_async, type_parameters, parameters, return_type)
    }

    /// The body after `=>`.
    fn finish_arrow(
        &mut self,
        start: TextPos,
        is_async: bool,
        type_parameters: Option<&'a [TypeParameter<'a>]>,
        parameters: &'a [Parameter<'a>],
        return_type: Option<&'a TypeNode<'a>>,
    ) -> PResult<Expression<'a>> {
        let body = self.parse_arrow_body(is_async)?;
        let modifiers = if is_async { ModifierFlags::ASYNC } else { ModifierFlags::NONE };
        self.not_a_target();
        Ok(Expression::Function(Function {
            data: self.finish(SyntaxKind::ArrowFunction, start).with_modifiers(modifiers),
            name: None,
            is_generator: false,
            is_async,
            is_arrow: true,
            type_parameters,
            parameters,
            return_type,
            body: Some(body),
        }))
    }

    fn parse_arrow_body(&mut self, is_async: bool) -> PResult<FunctionBody<'a>> {
        if self.at(SyntaxKind::OpenBraceToken)? {
            let block = self.parse_function_block(false, is_async, true)?;
            return Ok(FunctionBody::Block(self.alloc(block)));
        }
        let (set, clear) = if is_async {
            (ContextFlags::AWAIT_ALLOWED, ContextFlags::YIELD_ALLOWED | ContextFlags::IN_GENERATOR)
        } else {
            (
                ContextFlags::NONE,
                ContextFlags::AWAIT_ALLOWED | ContextFlags::YIELD_ALLOWED | ContextFlags::IN_GENERATOR,
            )
        };
        let body = self.scoped(set, clear, |p| p.parse_assignment())?;
        Ok(FunctionBody::Expression(self.alloc(body)))
    }

    // ========================================================================
    // Conditional and binary
    // ========================================================================

    fn parse_conditional_cover(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let condition = self.parse_binary_cover()?;
        if is_arrow(&condition) || !self.at(SyntaxKind::QuestionToken)? {
            return Ok(condition);
        }
        self.bump()?;
        let when_true = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_assignment())?;
        self.expect(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment()?;
        self.not_a_target();
        Ok(Expression::Conditional(ConditionalExpression {
            data: self.finish(SyntaxKind::ConditionalExpression, start),
            condition: self.alloc(condition),
            when_true: self.alloc(when_true),
            when_false: self.alloc(when_false),
        }))
    }

    /// The binary operator at the next token, if it continues the current
    /// expression. A `>` is first merged with whatever `>`/`=` follows it.
    fn binary_operator(&mut self) -> PResult<Option<SyntaxKind>> {
        if self.peek_kind()? == SyntaxKind::GreaterThanToken {
            let token = self.peek()?.clone();
            self.scanner.rescan_greater_than(&token)?;
        }
        let kind = self.peek_kind()?;
        let is_operator = match kind {
            SyntaxKind::InKeyword => self.context.has(ContextFlags::IN_ALLOWED),
            SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword => {
                self.typescript() && !self.line_break_before()?
            }
            _ => get_binary_operator_precedence(kind) != OperatorPrecedence::Invalid,
        };
        Ok(is_operator.then_some(kind))
    }

    fn parse_binary_cover(&mut self) -> PResult<Expression<'a>> {
        let first = self.parse_unary_cover()?;
        if is_arrow(&first) {
            return Ok(first);
        }
        let mut operands = vec![first];
        let mut operators: Vec<(SyntaxKind, OperatorPrecedence)> = Vec::new();

        while let Some(operator) = self.binary_operator()? {
            let precedence = get_binary_operator_precedence(operator);
            while let Some(&(_, top)) = operators.last() {
                if precedence > top || (precedence == top && precedence.is_right_associative()) {
                    break;
                }
                self.reduce_binary(&mut operands, &mut operators)?;
            }
            let token = self.bump()?;
            match operator {
                SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword => {
                    let type_node = if operator == SyntaxKind::AsKeyword && self.at(SyntaxKind::ConstKeyword)? {
                        self.parse_const_type_reference()?
                    } else {
                        self.scoped(ContextFlags::NONE, ContextFlags::TYPE_NON_NULL_POSTFIX, |p| p.parse_type())?
                    };
                    if let Some(expression) = operands.pop() {
                        let (kind, pos) = (
                            if operator == SyntaxKind::AsKeyword {
                                SyntaxKind::AsExpression
                            } else {
                                SyntaxKind::SatisfiesExpression
                            },
                            expression.pos(),
                        );
                        let cast = TypeCastExpression {
                            data: self.finish(kind, pos),
                            expression: self.alloc(expression),
                            type_node: self.alloc(type_node),
                        };
                        let mut cast = if operator == SyntaxKind::AsKeyword {
                            Expression::As(cast)
                        } else {
                            Expression::Satisfies(cast)
                        };
                        // `x as T!` asserts the cast, not the type.
                        while self.at(SyntaxKind::ExclamationToken)? && !self.line_break_before()? {
                            self.bump()?;
                            cast = Expression::NonNull(NonNullExpression {
                                data: self.finish(SyntaxKind::NonNullExpression, pos),
                                expression: self.alloc(cast),
                            });
                        }
                        operands.push(cast);
                    }
                    self.not_a_target();
                    continue;
                }
                SyntaxKind::QuestionQuestionToken => self.require(feature::NULLISH_COALESCING, token.range)?,
                SyntaxKind::AsteriskAsteriskToken => {
                    self.require(feature::EXPONENTIATION, token.range)?;
                    if let Some(left) = operands.last() {
                        if let Some(text) = unary_operator_text(left) {
                            return self.semantic(
                                &messages::AN_UNARY_EXPRESSION_WITH_THE_0_OPERATOR_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                                &[text],
                                left.range(),
                            );
                        }
                    }
                }
                _ => {}
            }
            let right = self.isolated(|p| p.parse_unary_cover())?;
            operators.push((operator, precedence));
            operands.push(right);
            self.not_a_target();
        }

        while !operators.is_empty() {
            self.reduce_binary(&mut operands, &mut operators)?;
        }
        match operands.pop() {
            Some(expr) => Ok(expr),
            None => self.unexpected(Expected::Value("expression")),
        }
    }

    fn reduce_binary(
        &self,
        operands: &mut Vec<Expression<'a>>,
        operators: &mut Vec<(SyntaxKind, OperatorPrecedence)>,
    ) -> PResult<()> {
        let Some((operator, _)) = operators.pop() else {
            return Ok(());
        };
        let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
            return Ok(());
        };
        if let Some(inner) = mixed_logical_operator(operator, &left) {
            return self.mixed_logical_operators(inner, operator, left.range());
        }
        if let Some(inner) = mixed_logical_operator(operator, &right) {
            return self.mixed_logical_operators(operator, inner, right.range());
        }
        let data = NodeData::new(SyntaxKind::BinaryExpression, left.pos(), right.end());
        operands.push(Expression::Binary(BinaryExpression {
            data,
            left: self.alloc(left),
            operator,
            right: self.alloc(right),
        }));
        Ok(())
    }

    fn mixed_logical_operators<T>(&self, first: SyntaxKind, second: SyntaxKind, range: TextRange) -> PResult<T> {
        self.semantic(
            &messages::_0_AND_1_OPERATIONS_CANNOT_BE_MIXED_WITHOUT_PARENTHESES,
            &[first.punctuation_text().unwrap_or_default(), second.punctuation_text().unwrap_or_default()],
            range,
        )
    }

    // ========================================================================
    // Unary and update
    // ========================================================================

    fn parse_unary_cover(&mut self) -> PResult<Expression<'a>> {
        self.nested(|p| p.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        match kind {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::TildeToken | SyntaxKind::ExclamationToken => {
                self.bump()?;
                let operand = self.parse_unary_cover()?;
                self.not_a_target();
                Ok(self.prefix_unary(SyntaxKind::PrefixUnaryExpression, kind, start, operand))
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.bump()?;
                let operand = self.parse_unary_cover()?;
                self.check_update_operand(&operand)?;
                self.not_a_target();
                Ok(self.prefix_unary(SyntaxKind::PrefixUnaryExpression, kind, start, operand))
            }
            SyntaxKind::DeleteKeyword | SyntaxKind::TypeOfKeyword | SyntaxKind::VoidKeyword => {
                self.bump()?;
                let operand = self.parse_unary_cover()?;
                if kind == SyntaxKind::DeleteKeyword
                    && self.strict()
                    && matches!(operand.skip_parentheses(), Expression::Identifier(_))
                {
                    return self.semantic(
                        &messages::DELETE_CANNOT_BE_CALLED_ON_AN_IDENTIFIER_IN_STRICT_MODE,
                        &[],
                        operand.range(),
                    );
                }
                let node_kind = match kind {
                    SyntaxKind::DeleteKeyword => SyntaxKind::DeleteExpression,
                    SyntaxKind::TypeOfKeyword => SyntaxKind::TypeOfExpression,
                    _ => SyntaxKind::VoidExpression,
                };
                self.not_a_target();
                Ok(self.prefix_unary(node_kind, kind, start, operand))
            }
            SyntaxKind::AwaitKeyword if self.context.has(ContextFlags::AWAIT_ALLOWED) => {
                let token = self.bump()?;
                self.require(feature::ASYNC_AWAIT, token.range)?;
                let operand = self.parse_unary_cover()?;
                self.not_a_target();
                Ok(Expression::Await(AwaitExpression {
                    data: self.finish(SyntaxKind::AwaitExpression, start),
                    expression: self.alloc(operand),
                }))
            }
            SyntaxKind::AwaitKeyword if self.looks_like_operand_follows()? => {
                let range = self.peek()?.range;
                self.semantic(&messages::AWAIT_EXPRESSIONS_ARE_ONLY_ALLOWED_WITHIN_ASYNC_FUNCTIONS, &[], range)
            }
            SyntaxKind::LessThanToken if self.typescript() => {
                self.bump()?;
                let type_node = self.parse_type()?;
                self.expect(SyntaxKind::GreaterThanToken)?;
                let operand = self.parse_unary_cover()?;
                Ok(Expression::TypeAssertion(TypeAssertionExpression {
                    data: self.finish(SyntaxKind::TypeAssertionExpression, start),
                    type_node: self.alloc(type_node),
                    expression: self.alloc(operand),
                }))
            }
            _ => self.parse_postfix_cover(),
        }
    }

    fn prefix_unary(
        &self,
        node_kind: SyntaxKind,
        operator: SyntaxKind,
        start: TextPos,
        operand: Expression<'a>,
    ) -> Expression<'a> {
        Expression::PrefixUnary(UnaryExpression {
            data: self.finish(node_kind, start),
            operator,
            operand: self.alloc(operand),
        })
    }

    fn check_update_operand(&self, operand: &Expression<'a>) -> PResult<()> {
        if operand.is_simple_assignment_target() {
            return Ok(());
        }
        self.semantic(
            &messages::THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS,
            &[],
            operand.range(),
        )
    }

    fn parse_postfix_cover(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let expr = self.parse_lhs_cover()?;
        if is_arrow(&expr) {
            return Ok(expr);
        }
        let kind = self.peek_kind()?;
        if matches!(kind, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) && !self.line_break_before()? {
            self.check_update_operand(&expr)?;
            self.bump()?;
            self.not_a_target();
            return Ok(Expression::PostfixUnary(UnaryExpression {
                data: self.finish(SyntaxKind::PostfixUnaryExpression, start),
                operator: kind,
                operand: self.alloc(expr),
            }));
        }
        Ok(expr)
    }

    // ========================================================================
    // Left-hand-side expressions
    // ========================================================================

    pub(crate) fn parse_lhs_cover(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let expr = match self.peek_kind()? {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => {
                let token = self.bump()?;
                if !matches!(
                    self.peek_kind()?,
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
                ) {
                    return self.unexpected(Expected::Reason(
                        "'super' must be followed by an argument list or member access".to_string(),
                    ));
                }
                self.not_a_target();
                Expression::SuperKeyword(NodeData::with_range(SyntaxKind::SuperKeyword, token.range))
            }
            SyntaxKind::ImportKeyword => self.parse_import_expression()?,
            _ => self.parse_primary_cover()?,
        };
        if is_arrow(&expr) {
            return Ok(expr);
        }
        self.parse_member_tail(expr, start, true)
    }

    /// `import(...)` (the call is parsed by the member loop) or
    /// `import.meta`.
    fn parse_import_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let token = self.bump()?;
        if self.eat(SyntaxKind::DotToken)? {
            let name = self.parse_identifier_name()?;
            if name.name != "meta" {
                return Err(SyntaxError::unexpected(
                    SyntaxKind::Identifier,
                    name.name,
                    Expected::Value("meta"),
                    name.data.range,
                ));
            }
            self.require(feature::MODULES, name.data.range)?;
            self.not_a_target();
            return Ok(Expression::MetaProperty(MetaPropertyExpression {
                data: self.finish(SyntaxKind::MetaProperty, start),
                keyword_token: SyntaxKind::ImportKeyword,
                name,
            }));
        }
        if !self.at(SyntaxKind::OpenParenToken)? {
            return self.unexpected(Expected::Kind(SyntaxKind::OpenParenToken));
        }
        self.require(feature::MODULES, token.range)?;
        self.not_a_target();
        Ok(Expression::Identifier(self.identifier_from(&token)))
    }

    fn parse_new_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        self.bump()?;
        if self.eat(SyntaxKind::DotToken)? {
            let name = self.parse_identifier_name()?;
            if name.name != "target" {
                return Err(SyntaxError::unexpected(
                    SyntaxKind::Identifier,
                    name.name,
                    Expected::Value("target"),
                    name.data.range,
                ));
            }
            self.not_a_target();
            return Ok(Expression::MetaProperty(MetaPropertyExpression {
                data: self.finish(SyntaxKind::MetaProperty, start),
                keyword_token: SyntaxKind::NewKeyword,
                name,
            }));
        }

        let callee_start = self.start()?;
        let callee = if self.at(SyntaxKind::NewKeyword)? {
            self.parse_new_expression()?
        } else {
            let primary = self.parse_primary_cover()?;
            self.parse_member_tail(primary, callee_start, false)?
        };
        let type_arguments = if self.typescript() && self.at(SyntaxKind::LessThanToken)? {
            self.speculate("type arguments", |p| p.parse_type_arguments())
        } else {
            None
        };
        let arguments = if self.at(SyntaxKind::OpenParenToken)? {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        self.not_a_target();
        Ok(Expression::New(NewExpression {
            data: self.finish(SyntaxKind::NewExpression, start),
            expression: self.alloc(callee),
            type_arguments,
            arguments,
        }))
    }

    /// Member accesses, calls, non-null assertions and tagged templates
    /// after `expr`. Without `allow_call` (the callee of `new`), stops at
    /// the first argument list.
    fn parse_member_tail(&mut self, mut expr: Expression<'a>, start: TextPos, allow_call: bool) -> PResult<Expression<'a>> {
        let mut in_chain = false;
        loop {
            let chain = if in_chain { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
            expr = match self.peek_kind()? {
                SyntaxKind::DotToken => {
                    self.bump()?;
                    let name = self.parse_member_name()?;
                    self.member_target(in_chain);
                    Expression::PropertyAccess(PropertyAccessExpression {
                        data: self.finish(SyntaxKind::PropertyAccessExpression, start).with_flags(chain),
                        expression: self.alloc(expr),
                        question_dot: false,
                        name,
                    })
                }
                SyntaxKind::QuestionDotToken if allow_call => {
                    let token = self.bump()?;
                    self.require(feature::OPTIONAL_CHAINING, token.range)?;
                    in_chain = true;
                    self.not_a_target();
                    self.parse_optional_link(expr, start)?
                }
                SyntaxKind::OpenBracketToken => {
                    self.bump()?;
                    let argument = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
                    self.expect(SyntaxKind::CloseBracketToken)?;
                    self.member_target(in_chain);
                    Expression::ElementAccess(ElementAccessExpression {
                        data: self.finish(SyntaxKind::ElementAccessExpression, start).with_flags(chain),
                        expression: self.alloc(expr),
                        question_dot: false,
                        argument_expression: self.alloc(argument),
                    })
                }
                SyntaxKind::ExclamationToken if self.typescript() && !self.line_break_before()? => {
                    self.bump()?;
                    Expression::NonNull(NonNullExpression {
                        data: self.finish(SyntaxKind::NonNullExpression, start).with_flags(chain),
                        expression: self.alloc(expr),
                    })
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    if in_chain {
                        return self.unexpected(Expected::Reason(
                            "tagged templates cannot be used in an optional chain".to_string(),
                        ));
                    }
                    self.tagged_template(expr, start, None)?
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_arguments()?;
                    self.not_a_target();
                    Expression::Call(CallExpression {
                        data: self.finish(SyntaxKind::CallExpression, start).with_flags(chain),
                        expression: self.alloc(expr),
                        question_dot: false,
                        type_arguments: None,
                        arguments,
                    })
                }
                SyntaxKind::LessThanToken if allow_call && self.typescript() => {
                    let Some(type_arguments) =
                        self.speculate("type arguments", |p| p.parse_type_arguments_in_expression())
                    else {
                        break;
                    };
                    if self.at(SyntaxKind::OpenParenToken)? {
                        let arguments = self.parse_arguments()?;
                        self.not_a_target();
                        Expression::Call(CallExpression {
                            data: self.finish(SyntaxKind::CallExpression, start).with_flags(chain),
                            expression: self.alloc(expr),
                            question_dot: false,
                            type_arguments: Some(type_arguments),
                            arguments,
                        })
                    } else {
                        self.tagged_template(expr, start, Some(type_arguments))?
                    }
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    /// What follows `?.`.
    fn parse_optional_link(&mut self, expr: Expression<'a>, start: TextPos) -> PResult<Expression<'a>> {
        let chain = NodeFlags::OPTIONAL_CHAIN;
        match self.peek_kind()? {
            SyntaxKind::OpenParenToken => {
                let arguments = self.parse_arguments()?;
                Ok(Expression::Call(CallExpression {
                    data: self.finish(SyntaxKind::CallExpression, start).with_flags(chain),
                    expression: self.alloc(expr),
                    question_dot: true,
                    type_arguments: None,
                    arguments,
                }))
            }
            SyntaxKind::LessThanToken if self.typescript() => {
                let type_arguments = self.parse_type_arguments()?;
                let arguments = self.parse_arguments()?;
                Ok(Expression::Call(CallExpression {
                    data: self.finish(SyntaxKind::CallExpression, start).with_flags(chain),
                    expression: self.alloc(expr),
                    question_dot: true,
                    type_arguments: Some(type_arguments),
                    arguments,
                }))
            }
            SyntaxKind::OpenBracketToken => {
                self.bump()?;
                let argument = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                Ok(Expression::ElementAccess(ElementAccessExpression {
                    data: self.finish(SyntaxKind::ElementAccessExpression, start).with_flags(chain),
                    expression: self.alloc(expr),
                    question_dot: true,
                    argument_expression: self.alloc(argument),
                }))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => self.unexpected(Expected::Reason(
                "tagged templates cannot be used in an optional chain".to_string(),
            )),
            _ => {
                let name = self.parse_member_name()?;
                Ok(Expression::PropertyAccess(PropertyAccessExpression {
                    data: self.finish(SyntaxKind::PropertyAccessExpression, start).with_flags(chain),
                    expression: self.alloc(expr),
                    question_dot: true,
                    name,
                }))
            }
        }
    }

    /// A member access is an assignment target unless it is part of an
    /// optional chain; it is never a binding element.
    fn member_target(&mut self, in_chain: bool) {
        self.context.set(ContextFlags::ASSIGNMENT_TARGET, !in_chain);
        self.context.set(ContextFlags::BINDING_ELEMENT, false);
    }

    fn tagged_template(
        &mut self,
        tag: Expression<'a>,
        start: TextPos,
        type_arguments: Option<&'a [TypeNode<'a>]>,
    ) -> PResult<Expression<'a>> {
        let template = self.parse_template_expression()?;
        self.not_a_target();
        Ok(Expression::TaggedTemplate(TaggedTemplateExpression {
            data: self.finish(SyntaxKind::TaggedTemplateExpression, start),
            tag: self.alloc(tag),
            type_arguments,
            template: self.alloc(template),
        }))
    }

    /// Type arguments are only kept in an expression when a call or a
    /// template follows; otherwise `<` is a comparison.
    fn parse_type_arguments_in_expression(&mut self) -> PResult<&'a [TypeNode<'a>]> {
        let type_arguments = self.parse_type_arguments()?;
        if can_follow_type_arguments_in_expression(self.peek_kind()?) {
            Ok(type_arguments)
        } else {
            self.unexpected(Expected::Kind(SyntaxKind::OpenParenToken))
        }
    }

    pub(crate) fn parse_arguments(&mut self) -> PResult<&'a [Expression<'a>]> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| {
            while !p.at(SyntaxKind::CloseParenToken)? {
                let argument = if p.at(SyntaxKind::DotDotDotToken)? {
                    let start = p.start()?;
                    let token = p.bump()?;
                    p.require(feature::SPREAD, token.range)?;
                    let expression = p.parse_assignment()?;
                    Expression::Spread(SpreadElement {
                        data: p.finish(SyntaxKind::SpreadElement, start),
                        expression: p.alloc(expression),
                    })
                } else {
                    p.parse_assignment()?
                };
                arguments.push(argument);
                if !p.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(self.alloc_list(arguments))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_cover(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        let expr = match kind {
            SyntaxKind::ThisKeyword | SyntaxKind::NullKeyword | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let token = self.bump()?;
                let data = NodeData::with_range(kind, token.range);
                match kind {
                    SyntaxKind::ThisKeyword => Expression::ThisKeyword(data),
                    SyntaxKind::NullKeyword => Expression::NullKeyword(data),
                    SyntaxKind::TrueKeyword => Expression::TrueKeyword(data),
                    _ => Expression::FalseKeyword(data),
                }
            }
            SyntaxKind::NumericLiteral => {
                let token = self.bump()?;
                Expression::NumericLiteral(self.numeric_literal(&token)?)
            }
            SyntaxKind::BigIntLiteral => {
                let token = self.bump()?;
                self.require(feature::BIGINT, token.range)?;
                Expression::BigIntLiteral(self.bigint_literal(&token))
            }
            SyntaxKind::StringLiteral => {
                let token = self.bump()?;
                Expression::StringLiteral(self.string_literal_from(&token))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => self.parse_template_expression()?,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                let slash = self.peek()?.clone();
                self.scanner.rescan_as_regex(&slash)?;
                let token = self.bump()?;
                let (pattern, flags) = match token.value {
                    TokenValue::Regex { pattern, flags } => (pattern, flags),
                    _ => (token.raw, ""),
                };
                Expression::RegularExpressionLiteral(RegularExpressionLiteral {
                    data: NodeData::with_range(SyntaxKind::RegularExpressionLiteral, token.range),
                    pattern,
                    flags,
                })
            }
            SyntaxKind::OpenParenToken => return self.parse_parenthesized_cover(start, false, None),
            SyntaxKind::OpenBracketToken => return self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => return self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(start, false)?,
            SyntaxKind::AsyncKeyword
                if self.peek_nth_kind(1)? == SyntaxKind::FunctionKeyword && !self.line_break_before_nth(1)? =>
            {
                self.bump()?;
                self.parse_function_expression(start, true)?
            }
            SyntaxKind::ClassKeyword => self.parse_class_expression()?,
            _ if kind.is_identifier_or_keyword() => {
                return self.parse_identifier().map(Expression::Identifier);
            }
            _ => return self.unexpected(Expected::Value("expression")),
        };
        self.not_a_target();
        Ok(expr)
    }

    pub(crate) fn numeric_literal(&self, token: &Token<'a>) -> PResult<NumericLiteral<'a>> {
        let flags = token.flags & TokenFlags::NUMERIC_LITERAL_FLAGS;
        if flags.intersects(TokenFlags::BINARY_SPECIFIER | TokenFlags::OCTAL_SPECIFIER) {
            self.require(feature::BINARY_OCTAL_LITERALS, token.range)?;
        }
        if flags.contains(TokenFlags::CONTAINS_SEPARATOR) {
            self.require(feature::NUMERIC_SEPARATORS, token.range)?;
        }
        if flags.contains(TokenFlags::IMPLICIT_OCTAL) && self.strict() {
            let suggestion = format!("0o{}", token.raw.get(1..).unwrap_or(""));
            return self.semantic(&messages::OCTAL_LITERALS_ARE_NOT_ALLOWED_IN_STRICT_MODE, &[&suggestion], token.range);
        }
        Ok(NumericLiteral {
            data: NodeData::with_range(SyntaxKind::NumericLiteral, token.range),
            value: token.numeric().map_or(f64::NAN, |value| value.as_f64()),
            raw: token.raw,
            numeric_literal_flags: flags,
        })
    }

    pub(crate) fn bigint_literal(&self, token: &Token<'a>) -> BigIntLiteral<'a> {
        let digits = match &token.value {
            TokenValue::BigInt(digits) => self.alloc_cow(digits.clone()),
            _ => token.raw,
        };
        BigIntLiteral {
            data: NodeData::with_range(SyntaxKind::BigIntLiteral, token.range),
            digits,
        }
    }

    // ========================================================================
    // Templates
    // ========================================================================

    pub(crate) fn parse_template_expression(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        let head = self.bump()?;
        self.require(feature::TEMPLATE_LITERALS, head.range)?;
        let head_piece = self.template_piece(&head);
        if head.kind == SyntaxKind::NoSubstitutionTemplateLiteral {
            return Ok(Expression::NoSubstitutionTemplateLiteral(head_piece));
        }
        let mut spans = Vec::new();
        loop {
            let span_start = self.start()?;
            let expression = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_expression())?;
            let literal = self.parse_template_continuation()?;
            let done = literal.data.kind == SyntaxKind::TemplateTail;
            spans.push(TemplateSpan {
                data: self.finish(SyntaxKind::TemplateSpan, span_start),
                expression: self.alloc(expression),
                literal,
            });
            if done {
                break;
            }
        }
        Ok(Expression::TemplateExpression(TemplateExpression {
            data: self.finish(SyntaxKind::TemplateExpression, start),
            head: head_piece,
            template_spans: self.alloc_list(spans),
        }))
    }

    /// The `}...${` or `}...`` ` piece after a substitution.
    pub(crate) fn parse_template_continuation(&mut self) -> PResult<TemplatePiece<'a>> {
        let close = self.peek()?.clone();
        if close.kind != SyntaxKind::CloseBraceToken {
            return self.unexpected(Expected::Kind(SyntaxKind::CloseBraceToken));
        }
        self.scanner.rescan_template_continuation(&close)?;
        let token = self.bump()?;
        Ok(self.template_piece(&token))
    }

    pub(crate) fn template_piece(&self, token: &Token<'a>) -> TemplatePiece<'a> {
        let (cooked, raw) = match &token.value {
            TokenValue::Template { cooked, raw } => (self.alloc_cow(cooked.clone()), *raw),
            _ => (token.raw, token.raw),
        };
        TemplatePiece {
            data: NodeData::with_range(token.kind, token.range),
            cooked,
            raw,
        }
    }

    // ========================================================================
    // Array and object literals
    // ========================================================================

    /// An element of an array or object literal: its cover bits are and-ed
    /// into the literal's, and `in` is always allowed inside the brackets.
    fn parse_cover_element(&mut self) -> PResult<Expression<'a>> {
        self.inherited(|p| {
            p.context.set(ContextFlags::IN_ALLOWED, true);
            let element = p.parse_assignment_cover()?;
            // `target = init` is a defaulted element once the literal turns
            // out to be a pattern; its target was already checked.
            if let Expression::Assignment(assignment) = &element {
                if assignment.operator == SyntaxKind::EqualsToken {
                    p.context.set(ContextFlags::ASSIGNMENT_TARGET, true);
                    let binds = p.rebind(assignment.target).is_ok();
                    p.context.set(ContextFlags::BINDING_ELEMENT, binds);
                }
            }
            Ok(element)
        })
    }

    fn parse_array_literal(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        self.bump()?;
        let mut elements = Vec::new();
        let mut trailing_comma = false;
        loop {
            let kind = self.peek_kind()?;
            if kind == SyntaxKind::CloseBracketToken {
                break;
            }
            trailing_comma = false;
            if kind == SyntaxKind::CommaToken {
                let comma = self.bump()?;
                elements.push(Expression::OmittedExpression(NodeData::new(
                    SyntaxKind::OmittedExpression,
                    comma.pos(),
                    comma.pos(),
                )));
                continue;
            }
            let element = if kind == SyntaxKind::DotDotDotToken {
                let spread_start = self.start()?;
                let token = self.bump()?;
                self.require(feature::SPREAD, token.range)?;
                let expression = self.parse_cover_element()?;
                Expression::Spread(SpreadElement {
                    data: self.finish(SyntaxKind::SpreadElement, spread_start),
                    expression: self.alloc(expression),
                })
            } else {
                self.parse_cover_element()?
            };
            elements.push(element);
            if !self.at(SyntaxKind::CloseBracketToken)? {
                self.expect(SyntaxKind::CommaToken)?;
                trailing_comma = true;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.finish(SyntaxKind::ArrayLiteralExpression, start),
            elements: self.alloc_list(elements),
            trailing_comma,
        }))
    }

    fn parse_object_literal(&mut self) -> PResult<Expression<'a>> {
        let start = self.start()?;
        self.bump()?;
        let mut properties = Vec::new();
        let mut trailing_comma = false;
        while !self.at(SyntaxKind::CloseBraceToken)? {
            properties.push(self.parse_object_literal_element()?);
            trailing_comma = !self.at(SyntaxKind::CloseBraceToken)?;
            if trailing_comma {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self.finish(SyntaxKind::ObjectLiteralExpression, start),
            properties: self.alloc_list(properties),
            trailing_comma,
        }))
    }

    fn parse_object_literal_element(&mut self) -> PResult<ObjectLiteralElement<'a>> {
        let start = self.start()?;
        let kind = self.peek_kind()?;
        if kind == SyntaxKind::DotDotDotToken {
            let token = self.bump()?;
            self.require(feature::SPREAD, token.range)?;
            let expression = self.parse_cover_element()?;
            return Ok(ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
                data: self.finish(SyntaxKind::SpreadAssignment, start),
                expression: self.alloc(expression),
            }));
        }

        let next = self.peek_nth_kind(1)?;
        if matches!(kind, SyntaxKind::GetKeyword | SyntaxKind::SetKeyword) && can_start_property_name(next) {
            self.bump()?;
            let name = self.parse_property_name()?;
            let accessor = self.parse_accessor(start, kind, name, ModifierFlags::NONE, false)?;
            self.not_a_target();
            return Ok(if kind == SyntaxKind::GetKeyword {
                ObjectLiteralElement::GetAccessor(accessor)
            } else {
                ObjectLiteralElement::SetAccessor(accessor)
            });
        }
        let is_async = kind == SyntaxKind::AsyncKeyword
            && !self.line_break_before_nth(1)?
            && (can_start_property_name(next) || next == SyntaxKind::AsteriskToken);
        if is_async {
            self.bump()?;
        }
        let is_generator = self.eat(SyntaxKind::AsteriskToken)?;
        let name = self.parse_property_name()?;
        if let PropertyName::PrivateIdentifier(id) = name {
            return Err(SyntaxError::unexpected(
                SyntaxKind::PrivateIdentifier,
                id.name,
                Expected::Value("property name"),
                id.data.range,
            ));
        }

        if is_async || is_generator || self.at(SyntaxKind::OpenParenToken)? || self.at(SyntaxKind::LessThanToken)? {
            let modifiers = if is_async { ModifierFlags::ASYNC } else { ModifierFlags::NONE };
            let method = self.parse_method(start, name, false, is_generator, modifiers, false)?;
            self.not_a_target();
            return Ok(ObjectLiteralElement::MethodDeclaration(method));
        }
        if self.eat(SyntaxKind::ColonToken)? {
            let value = self.parse_cover_element()?;
            return Ok(ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                data: self.finish(SyntaxKind::PropertyAssignment, start),
                name,
                initializer: self.alloc(value),
            }));
        }

        let PropertyName::Identifier(id) = name else {
            return self.unexpected(Expected::Kind(SyntaxKind::ColonToken));
        };
        self.check_identifier_name(&id)?;
        let object_assignment_initializer = if self.at(SyntaxKind::EqualsToken)? {
            self.bump()?;
            let initializer = self.parse_assignment()?;
            // Only valid if the literal becomes a pattern; claimed by the
            // conversion, reported otherwise.
            let range = TextRange::new(start, self.prev_end);
            self.cover_initializer.get_or_insert(range);
            Some(self.alloc(initializer))
        } else {
            None
        };
        Ok(ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
            data: self.finish(SyntaxKind::ShorthandPropertyAssignment, start),
            name: id,
            object_assignment_initializer,
        }))
    }

    /// A property name in an object literal, class body, type literal or
    /// enum.
    pub(crate) fn parse_property_name(&mut self) -> PResult<PropertyName<'a>> {
        let kind = self.peek_kind()?;
        match kind {
            SyntaxKind::StringLiteral => self.parse_string_literal().map(PropertyName::StringLiteral),
            SyntaxKind::NumericLiteral => {
                let token = self.bump()?;
                self.numeric_literal(&token).map(PropertyName::NumericLiteral)
            }
            SyntaxKind::OpenBracketToken => {
                let start = self.start()?;
                self.bump()?;
                let expression = self.scoped(ContextFlags::IN_ALLOWED, ContextFlags::NONE, |p| p.parse_assignment())?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                Ok(PropertyName::ComputedPropertyName(ComputedPropertyName {
                    data: self.finish(SyntaxKind::ComputedPropertyName, start),
                    expression: self.alloc(expression),
                }))
            }
            SyntaxKind::PrivateIdentifier => self.parse_member_name().map(PropertyName::PrivateIdentifier),
            _ if kind.is_identifier_or_keyword() => self.parse_identifier_name().map(PropertyName::Identifier),
            _ => self.unexpected(Expected::Value("property name")),
        }
    }
}
