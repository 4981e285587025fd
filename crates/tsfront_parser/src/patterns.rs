//! Reinterpretation of already-built expressions as patterns.
//!
//! An object or array literal cannot be told apart from a destructuring
//! pattern until the `=`, `=>`, `in` or `of` after it is seen, so the
//! literal is parsed as an expression and converted here. The conversion is
//! purely structural: no tokens are re-read.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_diagnostics::messages;
use tsfront_scanner::{PResult, SyntaxError};

use crate::features::feature;
use crate::parser::Parser;

/// Where a converted pattern will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternKind {
    /// Left of `=` or the head of `for-in`/`for-of`; member accesses are
    /// allowed as leaves.
    Assignment,
    /// Arrow parameters; only identifiers are allowed as leaves.
    Binding,
}

/// A short description of an expression for error messages.
pub(crate) fn describe_construct(expr: &Expression<'_>) -> &'static str {
    match expr {
        Expression::Identifier(_) => "identifier",
        Expression::ThisKeyword(_) => "'this'",
        Expression::SuperKeyword(_) => "'super'",
        Expression::NullKeyword(_) | Expression::TrueKeyword(_) | Expression::FalseKeyword(_) => "keyword literal",
        Expression::NumericLiteral(_) | Expression::BigIntLiteral(_) => "numeric literal",
        Expression::StringLiteral(_) => "string literal",
        Expression::RegularExpressionLiteral(_) => "regular expression literal",
        Expression::NoSubstitutionTemplateLiteral(_) | Expression::TemplateExpression(_) => "template literal",
        Expression::ArrayLiteral(_) => "array literal",
        Expression::ObjectLiteral(_) => "object literal",
        Expression::PropertyAccess(_) => "property access",
        Expression::ElementAccess(_) => "element access",
        Expression::Call(_) => "call expression",
        Expression::New(_) => "'new' expression",
        Expression::TaggedTemplate(_) => "tagged template",
        Expression::TypeAssertion(_) => "type assertion",
        Expression::Parenthesized(_) => "parenthesized expression",
        Expression::Function(function) if function.is_arrow => "arrow function",
        Expression::Function(_) => "function expression",
        Expression::Class(_) => "class expression",
        Expression::PrefixUnary(_) | Expression::PostfixUnary(_) => "unary expression",
        Expression::Await(_) => "'await' expression",
        Expression::Yield(_) => "'yield' expression",
        Expression::Binary(_) => "binary expression",
        Expression::Assignment(_) => "assignment expression",
        Expression::Conditional(_) => "conditional expression",
        Expression::Sequence(_) => "comma expression",
        Expression::Spread(_) => "spread element",
        Expression::OmittedExpression(_) => "elision",
        Expression::As(_) => "'as' expression",
        Expression::Satisfies(_) => "'satisfies' expression",
        Expression::NonNull(_) => "non-null assertion",
        Expression::MetaProperty(_) => "meta property",
    }
}

fn unconvertible<T>(expr: &Expression<'_>) -> PResult<T> {
    Err(SyntaxError::UnconvertiblePattern {
        construct: describe_construct(expr),
        range: expr.range(),
    })
}

impl<'a> Parser<'a> {
    /// Convert the left side of `=` or a `for-in`/`for-of` head.
    pub(crate) fn expression_to_assignment_pattern(&mut self, expr: &'a Expression<'a>) -> PResult<Pattern<'a>> {
        self.expression_to_pattern(expr, PatternKind::Assignment)
    }

    /// Convert one element of a parenthesized list into an arrow parameter.
    pub(crate) fn expression_to_parameter(&mut self, expr: &'a Expression<'a>) -> PResult<Parameter<'a>> {
        let (name, initializer) = match expr {
            Expression::Assignment(assignment) if assignment.operator == SyntaxKind::EqualsToken => {
                self.require(feature::DEFAULT_PARAMETERS, assignment.data.range)?;
                (self.rebind(assignment.target)?, Some(assignment.right))
            }
            _ => (self.expression_to_pattern(expr, PatternKind::Binding)?, None),
        };
        Ok(Parameter {
            data: NodeData::with_range(SyntaxKind::Parameter, expr.range()),
            rest: false,
            name,
            optional: false,
            type_annotation: None,
            initializer,
        })
    }

    pub(crate) fn expression_to_pattern(&mut self, expr: &'a Expression<'a>, kind: PatternKind) -> PResult<Pattern<'a>> {
        match expr {
            Expression::Identifier(id) => Ok(Pattern::Identifier(*id)),
            Expression::ArrayLiteral(array) => {
                self.require(feature::DESTRUCTURING, array.data.range)?;
                self.array_literal_to_pattern(array, kind)
            }
            Expression::ObjectLiteral(object) => {
                self.require(feature::DESTRUCTURING, object.data.range)?;
                self.object_literal_to_pattern(object, kind)
            }
            Expression::PropertyAccess(_) | Expression::ElementAccess(_)
                if kind == PatternKind::Assignment && expr.is_simple_assignment_target() =>
            {
                Ok(Pattern::Expression(expr))
            }
            Expression::Parenthesized(_)
            | Expression::NonNull(_)
            | Expression::As(_)
            | Expression::Satisfies(_)
            | Expression::TypeAssertion(_)
                if kind == PatternKind::Assignment && expr.is_simple_assignment_target() =>
            {
                match expr.skip_parentheses() {
                    Expression::Identifier(id) => Ok(Pattern::Identifier(*id)),
                    _ => Ok(Pattern::Expression(expr)),
                }
            }
            _ => unconvertible(expr),
        }
    }

    /// Re-check a pattern that was converted for assignment when it turns
    /// out to be a binding, as in `(a = 1) => a`.
    pub(crate) fn rebind(&self, pattern: Pattern<'a>) -> PResult<Pattern<'a>> {
        match pattern {
            Pattern::Expression(expr) => unconvertible(expr),
            Pattern::Identifier(_) => Ok(pattern),
            Pattern::Object(object) => {
                for property in object.properties {
                    self.rebind(property.value)?;
                }
                if let Some(rest) = object.rest {
                    self.rebind(rest.target)?;
                }
                Ok(pattern)
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.rebind(element.target)?;
                }
                if let Some(rest) = array.rest {
                    self.rebind(rest.target)?;
                }
                Ok(pattern)
            }
        }
    }

    /// `target = init` inside a literal becomes a target with a default.
    fn element_target(
        &mut self,
        expr: &'a Expression<'a>,
        kind: PatternKind,
    ) -> PResult<(Pattern<'a>, Option<&'a Expression<'a>>)> {
        match expr {
            Expression::Assignment(assignment) if assignment.operator == SyntaxKind::EqualsToken => {
                let target = match kind {
                    PatternKind::Assignment => assignment.target,
                    PatternKind::Binding => self.rebind(assignment.target)?,
                };
                Ok((target, Some(assignment.right)))
            }
            _ => Ok((self.expression_to_pattern(expr, kind)?, None)),
        }
    }

    fn rest_target(&mut self, expr: &'a Expression<'a>, kind: PatternKind) -> PResult<Pattern<'a>> {
        if let Expression::Assignment(_) = expr {
            return unconvertible(expr);
        }
        self.expression_to_pattern(expr, kind)
    }

    fn array_literal_to_pattern(&mut self, array: &'a ArrayLiteralExpression<'a>, kind: PatternKind) -> PResult<Pattern<'a>> {
        let mut elements = Vec::with_capacity(array.elements.len());
        let mut rest = None;
        for (index, element) in array.elements.iter().enumerate() {
            match element {
                Expression::OmittedExpression(_) => elements.push(None),
                Expression::Spread(spread) => {
                    if index + 1 != array.elements.len() {
                        return self.semantic(
                            &messages::A_REST_ELEMENT_MUST_BE_LAST_IN_A_DESTRUCTURING_PATTERN,
                            &[],
                            spread.data.range,
                        );
                    }
                    if array.trailing_comma {
                        return self.semantic(
                            &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA,
                            &[],
                            spread.data.range,
                        );
                    }
                    let target = self.rest_target(spread.expression, kind)?;
                    rest = Some(self.alloc(RestElement {
                        data: NodeData::with_range(SyntaxKind::RestElement, spread.data.range),
                        target,
                    }));
                }
                _ => {
                    let (target, initializer) = self.element_target(element, kind)?;
                    elements.push(Some(PatternElement {
                        data: NodeData::with_range(SyntaxKind::PatternElement, element.range()),
                        target,
                        initializer,
                    }));
                }
            }
        }
        Ok(Pattern::Array(ArrayPattern {
            data: NodeData::with_range(SyntaxKind::ArrayPattern, array.data.range),
            elements: self.alloc_list(elements),
            rest,
        }))
    }

    fn object_literal_to_pattern(
        &mut self,
        object: &'a ObjectLiteralExpression<'a>,
        kind: PatternKind,
    ) -> PResult<Pattern<'a>> {
        let mut properties = Vec::with_capacity(object.properties.len());
        let mut rest = None;
        for (index, property) in object.properties.iter().enumerate() {
            match property {
                ObjectLiteralElement::PropertyAssignment(assignment) => {
                    let (value, initializer) = self.element_target(assignment.initializer, kind)?;
                    properties.push(PatternProperty {
                        data: NodeData::with_range(SyntaxKind::PatternProperty, assignment.data.range),
                        key: assignment.name,
                        value,
                        initializer,
                        shorthand: false,
                    });
                }
                ObjectLiteralElement::ShorthandPropertyAssignment(shorthand) => {
                    properties.push(PatternProperty {
                        data: NodeData::with_range(SyntaxKind::PatternProperty, shorthand.data.range),
                        key: PropertyName::Identifier(shorthand.name),
                        value: Pattern::Identifier(shorthand.name),
                        initializer: shorthand.object_assignment_initializer,
                        shorthand: true,
                    });
                }
                ObjectLiteralElement::SpreadAssignment(spread) => {
                    if index + 1 != object.properties.len() {
                        return self.semantic(
                            &messages::A_REST_ELEMENT_MUST_BE_LAST_IN_A_DESTRUCTURING_PATTERN,
                            &[],
                            spread.data.range,
                        );
                    }
                    if object.trailing_comma {
                        return self.semantic(
                            &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA,
                            &[],
                            spread.data.range,
                        );
                    }
                    // Object rest takes a plain name or, when assigning, a
                    // member access; never a nested pattern.
                    let target = match self.rest_target(spread.expression, kind)? {
                        Pattern::Object(_) | Pattern::Array(_) => return unconvertible(spread.expression),
                        target => target,
                    };
                    rest = Some(self.alloc(RestElement {
                        data: NodeData::with_range(SyntaxKind::RestElement, spread.data.range),
                        target,
                    }));
                }
                ObjectLiteralElement::MethodDeclaration(method) => {
                    return Err(SyntaxError::UnconvertiblePattern {
                        construct: "method",
                        range: method.data.range,
                    });
                }
                ObjectLiteralElement::GetAccessor(accessor) | ObjectLiteralElement::SetAccessor(accessor) => {
                    return Err(SyntaxError::UnconvertiblePattern {
                        construct: "accessor",
                        range: accessor.data.range,
                    });
                }
            }
        }
        Ok(Pattern::Object(ObjectPattern {
            data: NodeData::with_range(SyntaxKind::ObjectPattern, object.data.range),
            properties: self.alloc_list(properties),
            rest,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_are_named() {
        let this = Expression::ThisKeyword(NodeData::new(SyntaxKind::ThisKeyword, 0, 4));
        assert_eq!(describe_construct(&this), "'this'");
        let hole = Expression::OmittedExpression(NodeData::new(SyntaxKind::OmittedExpression, 0, 0));
        assert_eq!(describe_construct(&hole), "elision");
    }

    #[test]
    fn unconvertible_reports_the_range() {
        let null = Expression::NullKeyword(NodeData::new(SyntaxKind::NullKeyword, 3, 7));
        match unconvertible::<()>(&null) {
            Err(SyntaxError::UnconvertiblePattern { construct, range }) => {
                assert_eq!(construct, "keyword literal");
                assert_eq!((range.pos, range.end), (3, 7));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
