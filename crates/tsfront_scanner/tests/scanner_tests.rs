//! Scanner integration tests.
//!
//! Verifies tokenization of JavaScript/TypeScript constructs, literal
//! decoding, lookahead, checkpoints and the parser-driven re-scans.

use tsfront_ast::{SyntaxKind, TokenFlags};
use tsfront_scanner::{NumberValue, NumericBase, NumericValue, Scanner, SyntaxError, Token, TokenValue};

/// Helper: scan all tokens up to end of file.
fn scan_all(source: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token().unwrap();
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push(token);
    }
    tokens
}

fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|t| t.kind).collect()
}

/// Helper: the single token in `source`, plus any diagnostics reported.
fn scan_one(source: &str) -> (Token<'_>, Vec<u32>) {
    let mut scanner = Scanner::new(source);
    let token = scanner.next_token().unwrap();
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::EndOfFileToken);
    let codes = scanner.diagnostics().diagnostics().iter().map(|d| d.code).collect();
    (token, codes)
}

fn numeric(source: &str) -> NumericValue {
    let (token, _) = scan_one(source);
    assert_eq!(token.kind, SyntaxKind::NumericLiteral, "{source}");
    *token.numeric().unwrap()
}

fn scan_error(source: &str) -> SyntaxError {
    let mut scanner = Scanner::new(source);
    loop {
        match scanner.next_token() {
            Ok(token) if token.kind == SyntaxKind::EndOfFileToken => panic!("no error in {source:?}"),
            Ok(_) => {}
            Err(err) => return err,
        }
    }
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
    assert!(scan_all("   \n\t  ").is_empty());
}

#[test]
fn test_end_of_file_is_sticky() {
    let mut scanner = Scanner::new("x ");
    assert_eq!(scanner.next_token().unwrap().raw, "x");
    let first = scanner.next_token().unwrap();
    let second = scanner.next_token().unwrap();
    assert_eq!(first.kind, SyntaxKind::EndOfFileToken);
    assert_eq!(first, second);
    assert_eq!(first.range.pos, 2);
    assert_eq!(first.full_start, 1);
}

#[test]
fn test_prefixed_numbers() {
    let hex = numeric("0xFF");
    assert_eq!(hex.base, NumericBase::Hex);
    assert_eq!(hex.value, NumberValue::Integer(255));
    assert_eq!(hex.digits, 2);

    let bin = numeric("0b1010");
    assert_eq!(bin.base, NumericBase::Binary);
    assert_eq!(bin.value, NumberValue::Integer(10));
    assert_eq!(bin.digits, 4);

    let oct = numeric("0o17");
    assert_eq!(oct.base, NumericBase::Octal);
    assert_eq!(oct.value, NumberValue::Integer(15));
    assert_eq!(oct.digits, 2);

    let (token, _) = scan_one("0XaB");
    assert!(token.flags.contains(TokenFlags::HEX_SPECIFIER));
    assert_eq!(token.numeric().unwrap().as_u64(), Some(0xAB));
}

#[test]
fn test_legacy_octal_warns() {
    let (token, codes) = scan_one("017");
    let value = token.numeric().unwrap();
    assert_eq!(value.base, NumericBase::ImplicitOctal);
    assert_eq!(value.value, NumberValue::Integer(15));
    assert_eq!(value.digits, 2);
    assert!(token.flags.contains(TokenFlags::IMPLICIT_OCTAL));
    assert_eq!(codes, vec![1121]);

    let mut scanner = Scanner::new("017");
    scanner.next_token().unwrap();
    assert!(scanner.diagnostics().diagnostics()[0].message_text.contains("'0o17'"));
}

#[test]
fn test_legacy_octal_upgrades_to_decimal() {
    let eight = numeric("08");
    assert_eq!(eight.base, NumericBase::Decimal);
    assert_eq!(eight.value, NumberValue::Integer(8));
    assert_eq!(eight.digits, 2);

    let fraction = numeric("0101.");
    assert_eq!(fraction.base, NumericBase::Decimal);
    assert_eq!(fraction.value, NumberValue::Float(101.0));
    assert_eq!(fraction.digits, 4);

    let exponent = numeric("00e999");
    assert_eq!(exponent.base, NumericBase::Decimal);
    assert_eq!(exponent.as_f64(), 0.0);

    let (_, codes) = scan_one("09.5");
    assert!(codes.is_empty());
}

#[test]
fn test_decimal_numbers() {
    let int = numeric("1234567890");
    assert_eq!(int.value, NumberValue::Integer(1234567890));
    assert_eq!(int.digits, 10);

    let float = numeric("3.14");
    assert_eq!(float.value, NumberValue::Float(3.14));
    assert_eq!(float.digits, 3);

    let leading_dot = numeric(".5");
    assert_eq!(leading_dot.as_f64(), 0.5);
    assert_eq!(leading_dot.digits, 1);

    let (token, _) = scan_one("1e3");
    assert!(token.flags.contains(TokenFlags::SCIENTIFIC));
    assert_eq!(token.numeric().unwrap().as_f64(), 1000.0);

    let signed = numeric("2.5E-1");
    assert_eq!(signed.as_f64(), 0.25);
    assert_eq!(signed.digits, 3);

    let huge = numeric("18446744073709551616");
    assert!(matches!(huge.value, NumberValue::Float(_)));
}

#[test]
fn test_numeric_separators() {
    let (token, _) = scan_one("1_000_000");
    let value = token.numeric().unwrap();
    assert_eq!(value.value, NumberValue::Integer(1_000_000));
    assert_eq!(value.digits, 7);
    assert!(value.separators);
    assert!(token.flags.contains(TokenFlags::CONTAINS_SEPARATOR));

    assert_eq!(numeric("0b1_1").value, NumberValue::Integer(3));
    assert_eq!(scan_error("1__0").code(), 6189);
    assert_eq!(scan_error("1_").code(), 6188);
    assert_eq!(scan_error("0x_1").code(), 6188);
    assert_eq!(scan_error("1._5").code(), 6188);
    assert_eq!(scan_error("0_7").code(), 6188);
}

#[test]
fn test_malformed_numbers() {
    assert_eq!(scan_error("0x").code(), 1125);
    assert_eq!(scan_error("0b").code(), 1177);
    assert_eq!(scan_error("0o").code(), 1178);
    assert_eq!(scan_error("0b12").code(), 1177);
    assert_eq!(scan_error("0o78").code(), 1178);
    assert_eq!(scan_error("1e").code(), 1124);
    assert_eq!(scan_error("3in x").code(), 1351);
    assert_eq!(scan_error("08n").code(), 1351);
}

#[test]
fn test_bigint_literals() {
    for (source, digits) in [("123n", "123"), ("0x1Fn", "0x1F"), ("0B11n", "0b11"), ("1_0n", "10"), ("0n", "0")] {
        let (token, _) = scan_one(source);
        assert_eq!(token.kind, SyntaxKind::BigIntLiteral, "{source}");
        assert_eq!(token.value, TokenValue::BigInt(digits.into()), "{source}");
    }
    assert_eq!(scan_error("1.5n").code(), 1351);
}

#[test]
fn test_member_access_on_number() {
    assert_eq!(
        scan_kinds("1..toString()"),
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
        ]
    );
}

#[test]
fn test_string_literals() {
    let (token, codes) = scan_one("'hello'");
    assert_eq!(token.kind, SyntaxKind::StringLiteral);
    assert_eq!(token.text(), "hello");
    assert!(token.flags.contains(TokenFlags::SINGLE_QUOTE));
    assert!(codes.is_empty());
    assert!(matches!(token.value, TokenValue::String(std::borrow::Cow::Borrowed("hello"))));

    let (token, _) = scan_one(r#""""#);
    assert_eq!(token.text(), "");
    assert!(!token.flags.contains(TokenFlags::SINGLE_QUOTE));

    let (token, _) = scan_one("\"a\u{2028}b\"");
    assert_eq!(token.text(), "a\u{2028}b");
}

#[test]
fn test_string_escape_sequences() {
    let (token, codes) = scan_one(r#""a\nb\t\\\"\'\0""#);
    assert_eq!(token.text(), "a\nb\t\\\"'\0");
    assert!(codes.is_empty());

    let (token, _) = scan_one(r#""\x41B\u{43}\q""#);
    assert_eq!(token.text(), "ABCq");

    let (token, _) = scan_one(r#""\u{1F600}😀""#);
    assert_eq!(token.text(), "\u{1F600}\u{1F600}");

    let (token, _) = scan_one("'a\\\r\nb\\\nc'");
    assert_eq!(token.text(), "abc");
}

#[test]
fn test_string_escape_warnings() {
    let (token, codes) = scan_one(r#""\101""#);
    assert_eq!(token.text(), "A");
    assert!(token.flags.contains(TokenFlags::OCTAL_ESCAPE));
    assert_eq!(codes, vec![1487]);

    let (token, codes) = scan_one(r#""\8""#);
    assert_eq!(token.text(), "8");
    assert_eq!(codes, vec![1489]);

    let (token, codes) = scan_one(r#""\uD800x""#);
    assert_eq!(token.text(), "\u{FFFD}x");
    assert_eq!(codes, vec![1490]);
}

#[test]
fn test_invalid_string_escapes() {
    assert_eq!(scan_error(r#""\x4""#).code(), 1125);
    assert_eq!(scan_error(r#""\u{110000}""#).code(), 1198);
    assert_eq!(scan_error(r#""\u{41""#).code(), 1199);
}

#[test]
fn test_unterminated_strings() {
    assert_eq!(scan_error("\"abc").code(), 1002);
    assert_eq!(scan_error("'ab\ncd'").code(), 1002);
    let err = scan_error("x = 'open");
    assert_eq!(err.range().pos, 4);
}

#[test]
fn test_no_substitution_template() {
    let (token, _) = scan_one("`abc`");
    assert_eq!(token.kind, SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(token.value, TokenValue::Template { cooked: "abc".into(), raw: "abc" });

    let (token, _) = scan_one("`a\r\nb\\x41`");
    assert_eq!(token.value, TokenValue::Template { cooked: "a\nbA".into(), raw: "a\r\nb\\x41" });
}

#[test]
fn test_template_with_substitutions() {
    let mut scanner = Scanner::new("`a${x}b${y}c`");
    let head = scanner.next_token().unwrap();
    assert_eq!(head.kind, SyntaxKind::TemplateHead);
    assert_eq!(head.text(), "a");
    assert_eq!(scanner.next_token().unwrap().raw, "x");

    let brace = scanner.next_token().unwrap();
    assert_eq!(brace.kind, SyntaxKind::CloseBraceToken);
    let middle = scanner.rescan_template_continuation(&brace).unwrap();
    assert_eq!(middle.kind, SyntaxKind::TemplateMiddle);
    assert_eq!(middle.raw, "}b${");
    assert_eq!(scanner.next_token().unwrap(), middle);

    assert_eq!(scanner.next_token().unwrap().raw, "y");
    let brace = scanner.next_token().unwrap();
    let tail = scanner.rescan_template_continuation(&brace).unwrap();
    assert_eq!(tail.kind, SyntaxKind::TemplateTail);
    assert_eq!(tail.text(), "c");
    scanner.next_token().unwrap();
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn test_template_rejects_legacy_escapes() {
    assert_eq!(scan_error(r"`\01`").code(), 1488);
    assert_eq!(scan_error(r"`\8`").code(), 1488);
    assert_eq!(scan_error("`open").code(), 1160);
}

#[test]
fn test_identifiers_and_keywords() {
    let tokens = scan_all("foo _bar $baz ä const");
    assert!(tokens[..4].iter().all(|t| t.kind == SyntaxKind::Identifier));
    assert_eq!(tokens[3].text(), "ä");
    assert_eq!(tokens[4].kind, SyntaxKind::ConstKeyword);
}

#[test]
fn test_escaped_identifier_is_never_keyword() {
    let (token, _) = scan_one(r"\u0063onst");
    assert_eq!(token.kind, SyntaxKind::Identifier);
    assert_eq!(token.text(), "const");
    assert!(token.flags.contains(TokenFlags::UNICODE_ESCAPE));

    let (token, _) = scan_one(r"a\u{62}c");
    assert_eq!(token.text(), "abc");

    assert_eq!(scan_error(r"\u0031a").code(), 1488);
    assert_eq!(scan_error(r"a\x62").code(), 1488);
}

#[test]
fn test_private_names() {
    let (token, _) = scan_one("#count");
    assert_eq!(token.kind, SyntaxKind::PrivateIdentifier);
    assert_eq!(token.text(), "#count");

    let (token, _) = scan_one("#if");
    assert_eq!(token.kind, SyntaxKind::PrivateIdentifier);

    assert!(matches!(scan_error("# x"), SyntaxError::UnexpectedCharacter { ch: '#', .. }));
}

#[test]
fn test_invalid_character() {
    let err = scan_error("a \u{00AC}");
    assert!(matches!(err, SyntaxError::UnexpectedCharacter { ch: '\u{00AC}', .. }));
    assert_eq!(err.code(), 1127);
    assert_eq!(err.range().pos, 2);
}

#[test]
fn test_operators() {
    use SyntaxKind::*;
    assert_eq!(
        scan_kinds("+ ++ += - -- -= * ** *= **= % %= & && &= &&= | || |= ||= ^ ^= ~ !"),
        vec![
            PlusToken,
            PlusPlusToken,
            PlusEqualsToken,
            MinusToken,
            MinusMinusToken,
            MinusEqualsToken,
            AsteriskToken,
            AsteriskAsteriskToken,
            AsteriskEqualsToken,
            AsteriskAsteriskEqualsToken,
            PercentToken,
            PercentEqualsToken,
            AmpersandToken,
            AmpersandAmpersandToken,
            AmpersandEqualsToken,
            AmpersandAmpersandEqualsToken,
            BarToken,
            BarBarToken,
            BarEqualsToken,
            BarBarEqualsToken,
            CaretToken,
            CaretEqualsToken,
            TildeToken,
            ExclamationToken,
        ]
    );
    assert_eq!(
        scan_kinds("< << <<= <= == === != !== ? ?? ??= ?. => ... @"),
        vec![
            LessThanToken,
            LessThanLessThanToken,
            LessThanLessThanEqualsToken,
            LessThanEqualsToken,
            EqualsEqualsToken,
            EqualsEqualsEqualsToken,
            ExclamationEqualsToken,
            ExclamationEqualsEqualsToken,
            QuestionToken,
            QuestionQuestionToken,
            QuestionQuestionEqualsToken,
            QuestionDotToken,
            EqualsGreaterThanToken,
            DotDotDotToken,
            AtToken,
        ]
    );
}

#[test]
fn test_greater_than_rescan() {
    let mut scanner = Scanner::new("a >>= b");
    scanner.next_token().unwrap();
    let gt = scanner.next_token().unwrap();
    assert_eq!(gt.kind, SyntaxKind::GreaterThanToken);
    let merged = scanner.rescan_greater_than(&gt).unwrap();
    assert_eq!(merged.kind, SyntaxKind::GreaterThanGreaterThanEqualsToken);
    assert_eq!(merged.raw, ">>=");
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::GreaterThanGreaterThanEqualsToken);
    assert_eq!(scanner.next_token().unwrap().raw, "b");

    for (source, kind) in [
        (">>", SyntaxKind::GreaterThanGreaterThanToken),
        (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
        (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
        (">=", SyntaxKind::GreaterThanEqualsToken),
        ("> >", SyntaxKind::GreaterThanToken),
    ] {
        let mut scanner = Scanner::new(source);
        let gt = scanner.peek().unwrap().clone();
        assert_eq!(scanner.rescan_greater_than(&gt).unwrap().kind, kind, "{source}");
    }
}

#[test]
fn test_regex_rescan() {
    let mut scanner = Scanner::new("x = /a[/]b(c)\\//gi;");
    scanner.next_token().unwrap();
    scanner.next_token().unwrap();
    let slash = scanner.next_token().unwrap();
    assert_eq!(slash.kind, SyntaxKind::SlashToken);

    let regex = scanner.rescan_as_regex(&slash).unwrap();
    assert_eq!(regex.kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.value, TokenValue::Regex { pattern: "a[/]b(c)\\/", flags: "gi" });
    assert_eq!(scanner.next_token().unwrap(), regex);
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::SemicolonToken);
}

#[test]
fn test_regex_rescan_from_lookahead() {
    let mut scanner = Scanner::new("/=a/ b");
    scanner.peek_nth(2).unwrap();
    let slash = scanner.peek().unwrap().clone();
    assert_eq!(slash.kind, SyntaxKind::SlashEqualsToken);
    let regex = scanner.rescan_as_regex(&slash).unwrap();
    assert_eq!(regex.raw, "/=a/");
    scanner.next_token().unwrap();
    assert_eq!(scanner.next_token().unwrap().raw, "b");
}

#[test]
fn test_regex_errors() {
    let rescan = |source: &str| {
        let mut scanner = Scanner::new(source);
        let slash = scanner.next_token().unwrap();
        scanner.rescan_as_regex(&slash).unwrap_err()
    };
    assert_eq!(rescan("/a/x").code(), 1499);
    assert_eq!(rescan("/a/gg").code(), 1500);
    assert_eq!(rescan("/abc\n/").code(), 1161);
    assert_eq!(rescan("/[/").code(), 1161);
}

#[test]
fn test_preceding_line_break() {
    let tokens = scan_all("a\nb /*\n*/ c /* */ d\u{2028}e");
    let breaks: Vec<bool> = tokens.iter().map(Token::has_preceding_line_break).collect();
    assert_eq!(breaks, vec![false, true, true, false, true]);
}

#[test]
fn test_comments_skipped_or_retained() {
    assert_eq!(scan_kinds("// c\nx /* d */ y"), vec![SyntaxKind::Identifier, SyntaxKind::Identifier]);

    let mut scanner = Scanner::new("// c\nx /* d */");
    scanner.set_retain_comments(true);
    let comment = scanner.next_token().unwrap();
    assert_eq!(comment.kind, SyntaxKind::SingleLineCommentTrivia);
    assert_eq!(comment.value, TokenValue::Comment("// c"));
    assert_eq!(scanner.next_token().unwrap().raw, "x");
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::MultiLineCommentTrivia);

    assert_eq!(scan_error("x /* open").code(), 1010);
}

#[test]
fn test_shebang_skipping() {
    let tokens = scan_all("#!/usr/bin/env node\nlet x");
    assert_eq!(tokens[0].kind, SyntaxKind::LetKeyword);
    assert!(tokens[0].has_preceding_line_break());
}

#[test]
fn test_token_positions() {
    let tokens = scan_all("  foo  bar");
    assert_eq!(tokens[0].full_start, 0);
    assert_eq!(tokens[0].range.pos, 2);
    assert_eq!(tokens[0].range.end, 5);
    assert_eq!(tokens[1].full_start, 5);
    assert_eq!(tokens[1].range.pos, 7);
}

#[test]
fn test_lookahead_and_conditional_consumption() {
    let mut scanner = Scanner::new("let x = 1");
    assert_eq!(scanner.peek_nth_kind(2).unwrap(), SyntaxKind::EqualsToken);
    assert!(scanner.next_token_if(SyntaxKind::ConstKeyword).unwrap().is_none());
    assert!(scanner.next_token_if(SyntaxKind::LetKeyword).unwrap().is_some());
    assert!(scanner
        .next_token_is_any(&[SyntaxKind::Identifier, SyntaxKind::StringLiteral])
        .unwrap()
        .is_some());
    let err = scanner.expect(SyntaxKind::ColonToken).unwrap_err();
    assert_eq!(err.code(), 1005);
    assert_eq!(scanner.expect(SyntaxKind::NumericLiteral).unwrap().raw, "1");

    let err = scanner.expect(SyntaxKind::SemicolonToken).unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedEof { .. }));
}

#[test]
fn test_mark_and_reset() {
    let mut scanner = Scanner::new("a\nb\nc");
    scanner.next_token().unwrap();
    scanner.mark();
    scanner.next_token().unwrap();
    scanner.next_token().unwrap();
    assert_eq!(scanner.line_map().line_count(), 3);

    scanner.reset().unwrap();
    assert_eq!(scanner.line_map().line_count(), 1);
    assert_eq!(scanner.next_token().unwrap().raw, "b");
    assert!(scanner.reset().is_err());
    assert!(scanner.unmark().is_err());

    scanner.mark();
    scanner.next_token().unwrap();
    scanner.unmark().unwrap();
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn test_checkpoint_after_end_of_file() {
    let mut scanner = Scanner::new("a");
    scanner.next_token().unwrap();
    scanner.next_token().unwrap();
    let checkpoint = scanner.checkpoint();
    assert_eq!(checkpoint.offset, 1);
    scanner.restore(checkpoint);
    assert_eq!(scanner.next_token().unwrap().kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn test_resolve_position() {
    let scanner = Scanner::new("a\nbc");
    let position = scanner.resolve_position(3);
    assert_eq!((position.line, position.column), (1, 1));

    let mut scanner = Scanner::new("a\nbc");
    while scanner.next_token().unwrap().kind != SyntaxKind::EndOfFileToken {}
    let position = scanner.resolve_position(2);
    assert_eq!((position.line, position.column), (1, 0));
    assert_eq!(scanner.into_line_map().line_starts(), &[0, 2]);
}
