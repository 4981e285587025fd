//! Token-class predicates used for lookahead decisions.

use tsfront_ast::SyntaxKind;

/// Check if a token kind can start an expression. Contextual keywords count
/// because they are ordinary identifiers in expression position.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    if kind.is_contextual_keyword() || kind.is_strict_mode_reserved_word() {
        return true;
    }
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ImportKeyword
    )
}

/// Check if a token kind is a left-hand-side expression start, i.e. a
/// token after which `await` reads as an operator rather than a name.
pub fn is_left_hand_side_expression_start(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
        || matches!(
            kind,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateHead
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::PrivateIdentifier
        )
}

/// Check if a token kind can start a type.
pub fn can_start_type(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
        || matches!(
            kind,
            SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::BarToken
                | SyntaxKind::AmpersandToken
                | SyntaxKind::MinusToken
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateHead
                | SyntaxKind::DotDotDotToken
        )
}

/// Tokens that may start a property name in an object literal, class body
/// or type literal.
pub fn can_start_property_name(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
        || matches!(
            kind,
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        )
}

/// Whether a modifier keyword followed by `next` really is a modifier, as
/// opposed to the name of the member (`static() {}`, `readonly: T`).
pub fn can_follow_modifier(next: SyntaxKind) -> bool {
    can_start_property_name(next)
        || matches!(
            next,
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken | SyntaxKind::DotDotDotToken
        )
}

/// After speculatively parsed type arguments in an expression, only a call or
/// a tagged template commits them.
pub fn can_follow_type_arguments_in_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
    )
}

/// `?` followed by one of these inside parentheses marks an optional
/// parameter rather than a conditional expression.
pub fn can_follow_optional_parameter(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::CloseParenToken | SyntaxKind::EqualsToken
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contextual_keywords_start_expressions() {
        assert!(can_start_expression(SyntaxKind::AsyncKeyword));
        assert!(can_start_expression(SyntaxKind::YieldKeyword));
        assert!(!can_start_expression(SyntaxKind::IfKeyword));
        assert!(!can_start_expression(SyntaxKind::CloseParenToken));
    }

    #[test]
    fn type_starts() {
        assert!(can_start_type(SyntaxKind::TemplateHead));
        assert!(can_start_type(SyntaxKind::KeyOfKeyword));
        assert!(!can_start_type(SyntaxKind::CloseBracketToken));
        assert!(!can_start_type(SyntaxKind::EqualsToken));
    }

    #[test]
    fn modifier_lookahead() {
        assert!(can_follow_modifier(SyntaxKind::Identifier));
        assert!(can_follow_modifier(SyntaxKind::OpenBracketToken));
        assert!(!can_follow_modifier(SyntaxKind::OpenParenToken));
        assert!(!can_follow_modifier(SyntaxKind::ColonToken));
    }
}
