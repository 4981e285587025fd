//! Tokens produced by the scanner.

use std::borrow::Cow;

use tsfront_ast::{SyntaxKind, TokenFlags};
use tsfront_core::text::{TextPos, TextRange};

/// Radix of a numeric literal as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericBase {
    Decimal,
    Hex,
    Octal,
    Binary,
    /// Legacy `017` form.
    ImplicitOctal,
}

impl NumericBase {
    pub fn radix(self) -> u32 {
        match self {
            NumericBase::Decimal => 10,
            NumericBase::Hex => 16,
            NumericBase::Octal | NumericBase::ImplicitOctal => 8,
            NumericBase::Binary => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Integer(u64),
    Float(f64),
}

/// Decoded payload of a numeric literal.
///
/// `digits` counts digit characters only, in every base: the radix prefix,
/// the leading `0` of an implicit octal, separators, the decimal point, the
/// exponent marker and sign, and a BigInt suffix are all excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericValue {
    pub base: NumericBase,
    pub value: NumberValue,
    pub digits: u32,
    pub separators: bool,
}

impl NumericValue {
    pub fn as_f64(&self) -> f64 {
        match self.value {
            NumberValue::Integer(v) => v as f64,
            NumberValue::Float(v) => v,
        }
    }

    /// The integral value, if the literal is integral and fits in `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self.value {
            NumberValue::Integer(v) => Some(v),
            NumberValue::Float(v) if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 => Some(v as u64),
            NumberValue::Float(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue<'s> {
    None,
    Identifier(Cow<'s, str>),
    String(Cow<'s, str>),
    Numeric(NumericValue),
    /// Decimal or prefixed digits with separators and the `n` suffix removed.
    BigInt(Cow<'s, str>),
    Regex { pattern: &'s str, flags: &'s str },
    Template { cooked: Cow<'s, str>, raw: &'s str },
    Comment(&'s str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'s> {
    pub kind: SyntaxKind,
    /// Offset where the token's leading trivia began.
    pub full_start: TextPos,
    pub range: TextRange,
    pub raw: &'s str,
    pub value: TokenValue<'s>,
    pub flags: TokenFlags,
}

impl<'s> Token<'s> {
    pub fn new(kind: SyntaxKind, full_start: TextPos, range: TextRange, raw: &'s str) -> Self {
        Self {
            kind,
            full_start,
            range,
            raw,
            value: TokenValue::None,
            flags: TokenFlags::NONE,
        }
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Identifier or keyword, including escaped spellings.
    pub fn is_identifier_name(&self) -> bool {
        self.kind.is_identifier_or_keyword()
    }

    /// Decoded text for identifiers, keywords and string-like literals; the
    /// raw source text otherwise.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Identifier(name) | TokenValue::String(name) | TokenValue::Template { cooked: name, .. } => name.as_ref(),
            _ => self.raw,
        }
    }

    pub fn numeric(&self) -> Option<&NumericValue> {
        match &self.value {
            TokenValue::Numeric(n) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accessors() {
        let int = NumericValue {
            base: NumericBase::Hex,
            value: NumberValue::Integer(255),
            digits: 2,
            separators: false,
        };
        assert_eq!(int.as_f64(), 255.0);
        assert_eq!(int.as_u64(), Some(255));

        let float = NumericValue {
            base: NumericBase::Decimal,
            value: NumberValue::Float(1.5),
            digits: 2,
            separators: false,
        };
        assert_eq!(float.as_u64(), None);
        assert_eq!(NumericBase::ImplicitOctal.radix(), 8);
    }

    #[test]
    fn token_text_prefers_decoded_value() {
        let mut token = Token::new(SyntaxKind::Identifier, 0, TextRange::new(0, 6), "\\u0061b");
        token.value = TokenValue::Identifier(Cow::Borrowed("ab"));
        assert_eq!(token.text(), "ab");
        assert!(token.is_identifier_name());
    }
}
