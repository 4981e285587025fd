//! tsfront_diagnostics: Diagnostic messages and the diagnostic sink.
//!
//! Every message the scanner and parser can produce lives in [`messages`]
//! with a stable numeric code. Hard syntax errors are converted into a
//! [`Diagnostic`] by the caller; non-fatal warnings are pushed into a
//! [`DiagnosticCollection`] while scanning and handed back with the parse
//! result.

use tsfront_core::text::TextSpan;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002).
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Fill in the template placeholders.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The source unit name, if any.
    pub file: Option<String>,
    /// The source text span, if any.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a diagnostic attached to a span but not yet to a file. The
    /// scanner reports this way; the file name is filled in by
    /// [`DiagnosticCollection::attach_file`].
    pub fn at(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Create a diagnostic with file and span info.
    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Build a diagnostic from an already formatted message text.
    pub fn from_text(code: u32, category: DiagnosticCategory, message_text: String, span: TextSpan) -> Self {
        Self {
            file: None,
            span: Some(span),
            message_text,
            code,
            category,
            related_information: Vec::new(),
        }
    }

    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} TSF{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// The diagnostic sink.
///
/// Entries are only ever appended; [`truncate`](Self::truncate) exists so
/// that a rolled-back speculative scan can drop what it reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every entry recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Set the file name on every entry that has none yet.
    pub fn attach_file(&mut self, file: &str) {
        for diagnostic in self.diagnostics.iter_mut().filter(|d| d.file.is_none()) {
            diagnostic.file = Some(file.to_string());
        }
    }

    /// Whether any entry carries the given code.
    pub fn contains_code(&self, code: u32) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, Error, "Digit expected.");
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1125, Error, "Hexadecimal digit expected.");
    pub const UNEXPECTED_END_OF_TEXT: DiagnosticMessage = diag!(1126, Error, "Unexpected end of text.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const BINARY_DIGIT_EXPECTED: DiagnosticMessage = diag!(1177, Error, "Binary digit expected.");
    pub const OCTAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1178, Error, "Octal digit expected.");
    pub const AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF: DiagnosticMessage = diag!(1198, Error, "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.");
    pub const UNTERMINATED_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1199, Error, "Unterminated Unicode escape sequence.");
    pub const AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL: DiagnosticMessage = diag!(1351, Error, "An identifier or keyword cannot immediately follow a numeric literal.");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1488, Error, "Invalid escape sequence '{0}'.");
    pub const UNKNOWN_REGULAR_EXPRESSION_FLAG: DiagnosticMessage = diag!(1499, Error, "Unknown regular expression flag.");
    pub const DUPLICATE_REGULAR_EXPRESSION_FLAG: DiagnosticMessage = diag!(1500, Error, "Duplicate regular expression flag.");
    pub const NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(6188, Error, "Numeric separators are not allowed here.");
    pub const MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS_ARE_NOT_PERMITTED: DiagnosticMessage = diag!(6189, Error, "Multiple consecutive numeric separators are not permitted.");

    // ========================================================================
    // Scanner warnings (reported into the diagnostic sink, never fatal)
    // ========================================================================
    pub const OCTAL_LITERALS_ARE_DEPRECATED_USE_THE_SYNTAX_0: DiagnosticMessage = diag!(1121, Warning, "Octal literals are deprecated. Use the syntax '{0}'.");
    pub const OCTAL_ESCAPE_SEQUENCES_ARE_DEPRECATED_USE_THE_SYNTAX_0: DiagnosticMessage = diag!(1487, Warning, "Octal escape sequences are deprecated. Use the syntax '{0}'.");
    pub const ESCAPE_SEQUENCE_0_IS_UNNECESSARY: DiagnosticMessage = diag!(1489, Warning, "Escape sequence '{0}' is unnecessary; it stands for '{1}'.");
    pub const LONE_SURROGATE_0_REPLACED: DiagnosticMessage = diag!(1490, Warning, "Lone surrogate '{0}' was replaced with U+FFFD.");

    // ========================================================================
    // Parser errors
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const _0_EXPECTED_FOUND_1: DiagnosticMessage = diag!(1005, Error, "'{0}' expected, found '{1}'.");
    pub const TRAILING_COMMA_NOT_ALLOWED: DiagnosticMessage = diag!(1009, Error, "Trailing comma not allowed.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token '{0}'.");
    pub const UNEXPECTED_TOKEN_0_1: DiagnosticMessage = diag!(1012, Error, "Unexpected token '{0}'. {1}");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1110, Error, "Type expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1136, Error, "Property assignment expected.");
    pub const STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1141, Error, "String literal expected.");
    pub const UNEXPECTED_END_OF_INPUT_IN_0: DiagnosticMessage = diag!(1126, Error, "Unexpected end of input in {0}.");
    pub const UNTERMINATED_0: DiagnosticMessage = diag!(1002, Error, "Unterminated {0}.");
    pub const _0_IS_NOT_SUPPORTED_BY_THE_SELECTED_DIALECT: DiagnosticMessage = diag!(1550, Error, "Feature '{0}' is not supported by the selected dialect.");
    pub const _0_CANNOT_BE_USED_AS_A_DESTRUCTURING_TARGET: DiagnosticMessage = diag!(1551, Error, "Invalid destructuring target: {0} cannot be reinterpreted as a pattern.");
    pub const MAXIMUM_NESTING_DEPTH_OF_0_EXCEEDED: DiagnosticMessage = diag!(1552, Error, "Maximum nesting depth of {0} exceeded.");

    // ========================================================================
    // Errors detected eagerly while parsing
    // ========================================================================
    pub const A_REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(1014, Error, "A rest parameter must be last in a parameter list.");
    pub const PARAMETER_CANNOT_HAVE_QUESTION_MARK_AND_INITIALIZER: DiagnosticMessage = diag!(1015, Error, "Parameter cannot have question mark and initializer.");
    pub const ACCESSIBILITY_MODIFIER_ALREADY_SEEN: DiagnosticMessage = diag!(1028, Error, "Accessibility modifier already seen.");
    pub const _0_MODIFIER_MUST_PRECEDE_1_MODIFIER: DiagnosticMessage = diag!(1029, Error, "'{0}' modifier must precede '{1}' modifier.");
    pub const _0_MODIFIER_ALREADY_SEEN: DiagnosticMessage = diag!(1030, Error, "'{0}' modifier already seen.");
    pub const ONLY_AMBIENT_MODULES_CAN_USE_QUOTED_NAMES: DiagnosticMessage = diag!(1035, Error, "Only ambient modules can use quoted names.");
    pub const INITIALIZERS_ARE_NOT_ALLOWED_IN_AMBIENT_CONTEXTS: DiagnosticMessage = diag!(1039, Error, "Initializers are not allowed in ambient contexts.");
    pub const _0_MODIFIER_CANNOT_BE_USED_HERE: DiagnosticMessage = diag!(1042, Error, "'{0}' modifier cannot be used here.");
    pub const A_REST_PARAMETER_CANNOT_HAVE_AN_INITIALIZER: DiagnosticMessage = diag!(1048, Error, "A rest parameter cannot have an initializer.");
    pub const A_SET_ACCESSOR_MUST_HAVE_EXACTLY_ONE_PARAMETER: DiagnosticMessage = diag!(1049, Error, "A 'set' accessor must have exactly one parameter.");
    pub const A_GET_ACCESSOR_CANNOT_HAVE_PARAMETERS: DiagnosticMessage = diag!(1054, Error, "A 'get' accessor cannot have parameters.");
    pub const WITH_STATEMENTS_ARE_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1101, Error, "'with' statements are not allowed in strict mode.");
    pub const DELETE_CANNOT_BE_CALLED_ON_AN_IDENTIFIER_IN_STRICT_MODE: DiagnosticMessage = diag!(1102, Error, "'delete' cannot be called on an identifier in strict mode.");
    pub const A_CONTINUE_STATEMENT_CAN_ONLY_BE_USED_WITHIN_AN_ENCLOSING_ITERATION_STATEMENT: DiagnosticMessage = diag!(1104, Error, "A 'continue' statement can only be used within an enclosing iteration statement.");
    pub const A_BREAK_STATEMENT_CAN_ONLY_BE_USED_WITHIN_AN_ENCLOSING_ITERATION_OR_SWITCH_STATEMENT: DiagnosticMessage = diag!(1105, Error, "A 'break' statement can only be used within an enclosing iteration or switch statement.");
    pub const A_RETURN_STATEMENT_CAN_ONLY_BE_USED_WITHIN_A_FUNCTION_BODY: DiagnosticMessage = diag!(1108, Error, "A 'return' statement can only be used within a function body.");
    pub const A_DEFAULT_CLAUSE_CANNOT_APPEAR_MORE_THAN_ONCE_IN_A_SWITCH_STATEMENT: DiagnosticMessage = diag!(1113, Error, "A 'default' clause cannot appear more than once in a 'switch' statement.");
    pub const DUPLICATE_LABEL_0: DiagnosticMessage = diag!(1114, Error, "Duplicate label '{0}'.");
    pub const A_CONTINUE_STATEMENT_CAN_ONLY_JUMP_TO_A_LABEL_OF_AN_ENCLOSING_ITERATION_STATEMENT: DiagnosticMessage = diag!(1115, Error, "A 'continue' statement can only jump to a label of an enclosing iteration statement.");
    pub const A_BREAK_STATEMENT_CAN_ONLY_JUMP_TO_A_LABEL_OF_AN_ENCLOSING_STATEMENT: DiagnosticMessage = diag!(1116, Error, "A 'break' statement can only jump to a label of an enclosing statement.");
    pub const OCTAL_LITERALS_ARE_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1121, Error, "Octal literals are not allowed in strict mode. Use the syntax '{0}'.");
    pub const LINE_BREAK_NOT_PERMITTED_HERE: DiagnosticMessage = diag!(1142, Error, "Line break not permitted here.");
    pub const CONST_DECLARATIONS_MUST_BE_INITIALIZED: DiagnosticMessage = diag!(1155, Error, "'const' declarations must be initialized.");
    pub const A_YIELD_EXPRESSION_IS_ONLY_ALLOWED_IN_A_GENERATOR_BODY: DiagnosticMessage = diag!(1163, Error, "A 'yield' expression is only allowed in a generator body.");
    pub const _0_CLAUSE_ALREADY_SEEN: DiagnosticMessage = diag!(1172, Error, "'{0}' clause already seen.");
    pub const EXTENDS_CLAUSE_MUST_PRECEDE_IMPLEMENTS_CLAUSE: DiagnosticMessage = diag!(1173, Error, "'extends' clause must precede 'implements' clause.");
    pub const CLASSES_CAN_ONLY_EXTEND_A_SINGLE_CLASS: DiagnosticMessage = diag!(1174, Error, "Classes can only extend a single class.");
    pub const A_DESTRUCTURING_DECLARATION_MUST_HAVE_AN_INITIALIZER: DiagnosticMessage = diag!(1182, Error, "A destructuring declaration must have an initializer.");
    pub const IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE: DiagnosticMessage = diag!(1212, Error, "Identifier expected. '{0}' is a reserved word in strict mode.");
    pub const AWAIT_EXPRESSIONS_ARE_ONLY_ALLOWED_WITHIN_ASYNC_FUNCTIONS: DiagnosticMessage = diag!(1308, Error, "'await' expressions are only allowed within async functions and at the top levels of modules.");
    pub const INVALID_SHORTHAND_PROPERTY_INITIALIZER: DiagnosticMessage = diag!(1312, Error, "An '=' can only follow a property name when the containing object literal is part of a destructuring pattern.");
    pub const IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD: DiagnosticMessage = diag!(1359, Error, "Identifier expected. '{0}' is a reserved word that cannot be used here.");
    pub const THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS: DiagnosticMessage = diag!(2357, Error, "The operand of an increment or decrement operator must be a variable or a property access.");
    pub const THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS: DiagnosticMessage = diag!(2364, Error, "The left-hand side of an assignment expression must be a variable or a property access.");
    pub const A_PARAMETER_PROPERTY_IS_ONLY_ALLOWED_IN_A_CONSTRUCTOR_IMPLEMENTATION: DiagnosticMessage = diag!(2369, Error, "A parameter property is only allowed in a constructor implementation.");
    pub const A_REST_ELEMENT_MUST_BE_LAST_IN_A_DESTRUCTURING_PATTERN: DiagnosticMessage = diag!(2462, Error, "A rest element must be last in a destructuring pattern.");
    pub const A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA: DiagnosticMessage = diag!(1013, Error, "A rest parameter or binding pattern may not have a trailing comma.");
    pub const _0_AND_1_OPERATIONS_CANNOT_BE_MIXED_WITHOUT_PARENTHESES: DiagnosticMessage = diag!(5076, Error, "'{0}' and '{1}' operations cannot be mixed without parentheses.");
    pub const AN_UNARY_EXPRESSION_WITH_THE_0_OPERATOR_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION: DiagnosticMessage = diag!(17006, Error, "An unary expression with the '{0}' operator is not allowed in the left-hand side of an exponentiation expression. Consider enclosing the expression in parentheses.");

    // ========================================================================
    // Parser warnings
    // ========================================================================
    pub const REDUNDANT_USE_STRICT_DIRECTIVE: DiagnosticMessage = diag!(1553, Warning, "Redundant 'use strict' directive; the code is already strict.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("'{0}' expected, found '{1}'.", &[")", "]"]);
        assert_eq!(msg, "')' expected, found ']'.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Expression expected.", &[]);
        assert_eq!(msg, "Expression expected.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "test.ts".to_string(),
            TextSpan::new(10, 5),
            &messages::DUPLICATE_LABEL_0,
            &["outer"],
        );
        let display = format!("{}", diag);
        assert!(display.contains("test.ts(10)"));
        assert!(display.contains("TSF1114"));
        assert!(display.contains("outer"));
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::EXPRESSION_EXPECTED, &[]);
        assert!(diag.file.is_none());
        assert!(diag.span.is_none());
        assert_eq!(diag.code, 1109);
        assert!(diag.is_error());
        let diag = diag.with_related(Diagnostic::new(&messages::DUPLICATE_LABEL_0, &["a"]));
        assert_eq!(diag.related_information.len(), 1);
    }

    #[test]
    fn test_collection_truncate_and_attach() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::at(
            TextSpan::new(0, 3),
            &messages::OCTAL_LITERALS_ARE_DEPRECATED_USE_THE_SYNTAX_0,
            &["0o17"],
        ));
        let mark = collection.len();
        collection.add(Diagnostic::at(
            TextSpan::new(5, 4),
            &messages::OCTAL_ESCAPE_SEQUENCES_ARE_DEPRECATED_USE_THE_SYNTAX_0,
            &["\\x0a"],
        ));
        assert_eq!(collection.warning_count(), 2);
        assert_eq!(collection.error_count(), 0);
        collection.truncate(mark);
        assert_eq!(collection.len(), 1);
        assert!(!collection.has_errors());

        collection.attach_file("a.js");
        assert_eq!(collection.diagnostics()[0].file.as_deref(), Some("a.js"));
        assert!(collection.contains_code(1121));
    }

    #[test]
    fn test_diagnostic_collection_sort() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location(
            "b.ts".to_string(),
            TextSpan::new(10, 1),
            &messages::EXPRESSION_EXPECTED,
            &[],
        ));
        collection.add(Diagnostic::with_location(
            "a.ts".to_string(),
            TextSpan::new(5, 1),
            &messages::IDENTIFIER_EXPECTED,
            &[],
        ));
        collection.sort();
        assert_eq!(collection.diagnostics()[0].file.as_deref(), Some("a.ts"));
        assert_eq!(collection.diagnostics()[1].file.as_deref(), Some("b.ts"));
    }
}
