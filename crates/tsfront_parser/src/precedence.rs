//! Operator precedence for binary operators.

use tsfront_ast::SyntaxKind;

/// Operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma = 0,
    Spread = 1,
    Yield = 2,
    Assignment = 3,
    Conditional = 4,
    NullishCoalescing = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    BitwiseOr = 8,
    BitwiseXor = 9,
    BitwiseAnd = 10,
    Equality = 11,
    Relational = 12,
    Shift = 13,
    Additive = 14,
    Multiplicative = 15,
    Exponentiation = 16,
    Unary = 17,
    Update = 18,
    LeftHandSide = 19,
    Member = 20,
    Primary = 21,
    Highest = 22,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// Whether operators at this level group right to left.
    #[inline]
    pub fn is_right_associative(self) -> bool {
        self == OperatorPrecedence::Exponentiation
    }
}

/// Binary precedence of a token, or `Invalid` if it is not a binary
/// operator. `as` and `satisfies` bind like relational operators.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword
        | SyntaxKind::SatisfiesKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert!(
            get_binary_operator_precedence(SyntaxKind::AsteriskToken)
                > get_binary_operator_precedence(SyntaxKind::PlusToken)
        );
        assert!(
            get_binary_operator_precedence(SyntaxKind::AmpersandAmpersandToken)
                > get_binary_operator_precedence(SyntaxKind::BarBarToken)
        );
    }

    #[test]
    fn only_exponentiation_is_right_associative() {
        assert!(get_binary_operator_precedence(SyntaxKind::AsteriskAsteriskToken).is_right_associative());
        assert!(!get_binary_operator_precedence(SyntaxKind::MinusToken).is_right_associative());
    }

    #[test]
    fn non_operators_are_invalid() {
        assert_eq!(get_binary_operator_precedence(SyntaxKind::EqualsToken), OperatorPrecedence::Invalid);
        assert_eq!(get_binary_operator_precedence(SyntaxKind::CommaToken), OperatorPrecedence::Invalid);
    }
}
