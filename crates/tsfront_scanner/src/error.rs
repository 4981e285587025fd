//! Hard errors raised by the scanner and parser.
//!
//! A [`SyntaxError`] aborts the current parse call. Non-fatal findings go to
//! the scanner's [`DiagnosticCollection`](tsfront_diagnostics::DiagnosticCollection)
//! instead.

use std::fmt;

use thiserror::Error;
use tsfront_ast::SyntaxKind;
use tsfront_core::text::{TextPos, TextRange};
use tsfront_diagnostics::{messages, Diagnostic, DiagnosticCategory};

/// Result alias used throughout the scanner and parser.
pub type PResult<T> = Result<T, SyntaxError>;

/// Misuse of the character cursor. These indicate a bug in the caller rather
/// than malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor offset {offset} is out of bounds")]
    OutOfBounds { offset: TextPos },
    #[error("no checkpoint to reset to")]
    InvalidCheckpoint,
}

/// What the parser was looking for when it met an unexpected token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Nothing,
    Kind(SyntaxKind),
    Value(&'static str),
    Reason(String),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Nothing => Ok(()),
            Expected::Kind(kind) => write!(f, ", expected '{}'", kind.describe()),
            Expected::Value(value) => write!(f, ", expected '{value}'"),
            Expected::Reason(reason) => write!(f, ": {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("unexpected token '{text}'{expected}")]
    UnexpectedToken {
        found: SyntaxKind,
        text: String,
        expected: Expected,
        range: TextRange,
    },

    #[error("unexpected end of input in {context}")]
    UnexpectedEof { context: &'static str, range: TextRange },

    #[error("unterminated {what}")]
    UnterminatedLiteral { what: &'static str, range: TextRange },

    #[error("{message}")]
    InvalidLiteral { code: u32, message: String, range: TextRange },

    #[error("invalid character {ch:?}")]
    UnexpectedCharacter { ch: char, range: TextRange },

    #[error("feature '{feature}' is not supported by the selected dialect")]
    UnsupportedFeature { feature: String, range: TextRange },

    #[error("{construct} cannot be used as a destructuring target")]
    UnconvertiblePattern { construct: &'static str, range: TextRange },

    #[error("{message}")]
    Semantic { code: u32, message: String, range: TextRange },

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

impl SyntaxError {
    pub fn unexpected(found: SyntaxKind, text: impl Into<String>, expected: Expected, range: TextRange) -> Self {
        SyntaxError::UnexpectedToken {
            found,
            text: text.into(),
            expected,
            range,
        }
    }

    /// Build an [`SyntaxError::InvalidLiteral`] from a catalog message.
    pub fn invalid_literal(message: &tsfront_diagnostics::DiagnosticMessage, args: &[&str], range: TextRange) -> Self {
        SyntaxError::InvalidLiteral {
            code: message.code,
            message: message.format(args),
            range,
        }
    }

    /// Build an [`SyntaxError::Semantic`] from a catalog message.
    pub fn semantic(message: &tsfront_diagnostics::DiagnosticMessage, args: &[&str], range: TextRange) -> Self {
        SyntaxError::Semantic {
            code: message.code,
            message: message.format(args),
            range,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            SyntaxError::UnexpectedToken { range, .. }
            | SyntaxError::UnexpectedEof { range, .. }
            | SyntaxError::UnterminatedLiteral { range, .. }
            | SyntaxError::InvalidLiteral { range, .. }
            | SyntaxError::UnexpectedCharacter { range, .. }
            | SyntaxError::UnsupportedFeature { range, .. }
            | SyntaxError::UnconvertiblePattern { range, .. }
            | SyntaxError::Semantic { range, .. } => *range,
            SyntaxError::Cursor(CursorError::OutOfBounds { offset }) => TextRange::empty(*offset),
            SyntaxError::Cursor(CursorError::InvalidCheckpoint) => TextRange::empty(0),
        }
    }

    /// The diagnostic code this error is reported under.
    pub fn code(&self) -> u32 {
        self.to_diagnostic("").code
    }

    /// Render as a catalog diagnostic attached to `file_name`.
    pub fn to_diagnostic(&self, file_name: &str) -> Diagnostic {
        let span = self.range().to_span();
        let mut diagnostic = match self {
            SyntaxError::UnexpectedToken { text, expected, .. } => match expected {
                Expected::Nothing => Diagnostic::at(span, &messages::UNEXPECTED_TOKEN, &[text.as_str()]),
                Expected::Kind(kind) => {
                    Diagnostic::at(span, &messages::_0_EXPECTED_FOUND_1, &[kind.describe(), text.as_str()])
                }
                Expected::Value(value) => Diagnostic::at(span, &messages::_0_EXPECTED_FOUND_1, &[*value, text.as_str()]),
                Expected::Reason(reason) => Diagnostic::at(span, &messages::UNEXPECTED_TOKEN_0_1, &[text.as_str(), reason.as_str()]),
            },
            SyntaxError::UnexpectedEof { context, .. } => {
                Diagnostic::at(span, &messages::UNEXPECTED_END_OF_INPUT_IN_0, &[*context])
            }
            SyntaxError::UnterminatedLiteral { what, .. } => {
                let message = match *what {
                    "string literal" => &messages::UNTERMINATED_STRING_LITERAL,
                    "template literal" => &messages::UNTERMINATED_TEMPLATE_LITERAL,
                    "regular expression literal" => &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    "comment" => &messages::ASTERISK_SLASH_EXPECTED,
                    _ => &messages::UNTERMINATED_0,
                };
                Diagnostic::at(span, message, &[*what])
            }
            SyntaxError::InvalidLiteral { code, message, .. } | SyntaxError::Semantic { code, message, .. } => {
                Diagnostic::from_text(*code, DiagnosticCategory::Error, message.clone(), span)
            }
            SyntaxError::UnexpectedCharacter { .. } => Diagnostic::at(span, &messages::INVALID_CHARACTER, &[]),
            SyntaxError::UnsupportedFeature { feature, .. } => {
                Diagnostic::at(span, &messages::_0_IS_NOT_SUPPORTED_BY_THE_SELECTED_DIALECT, &[feature.as_str()])
            }
            SyntaxError::UnconvertiblePattern { construct, .. } => {
                Diagnostic::at(span, &messages::_0_CANNOT_BE_USED_AS_A_DESTRUCTURING_TARGET, &[*construct])
            }
            SyntaxError::Cursor(err @ CursorError::OutOfBounds { .. }) => Diagnostic::from_text(
                messages::UNEXPECTED_END_OF_TEXT.code,
                DiagnosticCategory::Error,
                err.to_string(),
                span,
            ),
            SyntaxError::Cursor(err) => Diagnostic::from_text(0, DiagnosticCategory::Error, err.to_string(), span),
        };
        if !file_name.is_empty() {
            diagnostic.file = Some(file_name.to_string());
        }
        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_kind_maps_to_expected_found() {
        let err = SyntaxError::unexpected(
            SyntaxKind::CommaToken,
            ",",
            Expected::Kind(SyntaxKind::CloseParenToken),
            TextRange::new(3, 4),
        );
        let diagnostic = err.to_diagnostic("a.ts");
        assert_eq!(diagnostic.code, 1005);
        assert_eq!(diagnostic.message_text, "')' expected, found ','.");
        assert_eq!(diagnostic.file.as_deref(), Some("a.ts"));
        assert_eq!(err.to_string(), "unexpected token ',', expected ')'");
    }

    #[test]
    fn unterminated_literals_keep_catalog_codes() {
        let string = SyntaxError::UnterminatedLiteral { what: "string literal", range: TextRange::new(0, 4) };
        let regex = SyntaxError::UnterminatedLiteral {
            what: "regular expression literal",
            range: TextRange::new(0, 4),
        };
        assert_eq!(string.code(), 1002);
        assert_eq!(regex.code(), 1161);
    }

    #[test]
    fn cursor_errors_convert() {
        let err: SyntaxError = CursorError::OutOfBounds { offset: 9 }.into();
        assert_eq!(err.range(), TextRange::empty(9));
        assert_eq!(err.code(), 1126);
    }
}
