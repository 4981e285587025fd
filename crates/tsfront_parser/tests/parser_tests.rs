//! Parser integration tests.
//!
//! Parses small JavaScript and TypeScript programs and checks the shape of
//! the resulting tree, or the error the parse fails with.

use bumpalo::Bump;
use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_ast::visitor::AstVisitor;
use tsfront_core::source::{SourceId, SourceText};
use tsfront_parser::{parse, Dialect, ParserOptions, SyntaxError};

fn source(text: &str) -> SourceText {
    SourceText::new(SourceId::new(0), "test.ts", text)
}

/// Helper: parse with `options` and hand the unit to `check`.
fn with_unit_opts<R>(text: &str, options: ParserOptions, check: impl FnOnce(&CompilationUnit<'_>) -> R) -> R {
    let arena = Bump::new();
    let source = source(text);
    match parse(&arena, &source, options) {
        Ok(unit) => check(&unit),
        Err(err) => panic!("failed to parse {text:?}: {err}"),
    }
}

fn with_unit<R>(text: &str, check: impl FnOnce(&CompilationUnit<'_>) -> R) -> R {
    with_unit_opts(text, ParserOptions::default(), check)
}

fn parse_error_opts(text: &str, options: ParserOptions) -> SyntaxError {
    let arena = Bump::new();
    let source = source(text);
    match parse(&arena, &source, options) {
        Ok(_) => panic!("expected {text:?} to fail"),
        Err(err) => err,
    }
}

fn parse_error(text: &str) -> SyntaxError {
    parse_error_opts(text, ParserOptions::default())
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(text: &str, expected: usize) {
    let count = with_unit(text, |unit| unit.statements.len());
    assert_eq!(count, expected, "source: {text}");
}

fn assert_semantic(text: &str, expected: u32) {
    match parse_error(text) {
        SyntaxError::Semantic { code, .. } => assert_eq!(code, expected, "source: {text}"),
        other => panic!("expected semantic error {expected} for {text:?}, got {other:?}"),
    }
}

fn es(dialect: Dialect) -> ParserOptions {
    ParserOptions::default().with_dialect(dialect)
}

fn expression<'u, 'a>(statement: &'u Statement<'a>) -> &'u Expression<'a> {
    match statement {
        Statement::ExpressionStatement(statement) => statement.expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn binary<'u, 'a>(expr: &'u Expression<'a>) -> &'u BinaryExpression<'a> {
    match expr {
        Expression::Binary(binary) => binary,
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

fn arrow<'u, 'a>(expr: &'u Expression<'a>) -> &'u Function<'a> {
    match expr {
        Expression::Function(function) if function.is_arrow => function,
        other => panic!("expected an arrow function, got {other:?}"),
    }
}

fn type_alias<'u, 'a>(statement: &'u Statement<'a>) -> &'u TypeNode<'a> {
    match statement {
        Statement::TypeAliasDeclaration(alias) => alias.type_node,
        other => panic!("expected a type alias, got {other:?}"),
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_const_declaration() {
    assert_statement_count("const x = 42;", 1);
}

#[test]
fn test_parse_let_and_var() {
    assert_statement_count("let y = 'hello'; var z = true", 2);
}

#[test]
fn test_parse_typed_declaration() {
    with_unit("let x: number = 1, y!: string;", |unit| {
        let Statement::VariableStatement(statement) = &unit.statements[0] else {
            panic!("expected a variable statement");
        };
        let list = &statement.declaration_list;
        assert_eq!(list.kind, VariableKind::Let);
        assert!(list.data.flags.contains(NodeFlags::LET));
        assert_eq!(list.declarations.len(), 2);
        let first = &list.declarations[0];
        assert!(matches!(first.type_annotation, Some(TypeNode::KeywordType(data)) if data.kind == SyntaxKind::NumberKeyword));
        assert!(list.declarations[1].definite);
    });
}

#[test]
fn test_parse_destructuring_declaration() {
    with_unit("const { a, b: [c, ...d], ...e } = obj;", |unit| {
        let Statement::VariableStatement(statement) = &unit.statements[0] else {
            panic!("expected a variable statement");
        };
        let declaration = &statement.declaration_list.declarations[0];
        assert!(declaration.name.is_destructuring());
    });
}

#[test]
fn test_const_requires_initializer() {
    assert_semantic("const x;", 1155);
}

#[test]
fn test_let_as_identifier_in_sloppy_mode() {
    assert_statement_count("let = 1; let\n[a] = b;", 2);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    with_unit("1+2*3", |unit| {
        let sum = binary(expression(&unit.statements[0]));
        assert_eq!(sum.operator, SyntaxKind::PlusToken);
        assert!(matches!(sum.left, Expression::NumericLiteral(n) if n.value == 1.0));
        assert_eq!(binary(sum.right).operator, SyntaxKind::AsteriskToken);
    });
}

#[test]
fn test_exponentiation_is_right_associative() {
    with_unit("2**3**2", |unit| {
        let outer = binary(expression(&unit.statements[0]));
        assert_eq!(outer.operator, SyntaxKind::AsteriskAsteriskToken);
        assert!(matches!(outer.left, Expression::NumericLiteral(n) if n.value == 2.0));
        let inner = binary(outer.right);
        assert_eq!(inner.operator, SyntaxKind::AsteriskAsteriskToken);
    });
}

#[test]
fn test_subtraction_is_left_associative() {
    with_unit("2-3-1", |unit| {
        let outer = binary(expression(&unit.statements[0]));
        assert_eq!(outer.operator, SyntaxKind::MinusToken);
        assert!(matches!(outer.right, Expression::NumericLiteral(n) if n.value == 1.0));
        assert_eq!(binary(outer.left).operator, SyntaxKind::MinusToken);
    });
}

#[test]
fn test_unary_operand_of_exponentiation_is_rejected() {
    assert_semantic("-2 ** 2", 17006);
    assert_statement_count("(-2) ** 2", 1);
}

#[test]
fn test_numeric_literal_bases() {
    with_unit("0xFF; 0b1010; 0o17; 1234567890;", |unit| {
        let values: Vec<f64> = unit
            .statements
            .iter()
            .map(|statement| match expression(statement) {
                Expression::NumericLiteral(n) => n.value,
                other => panic!("expected a number, got {other:?}"),
            })
            .collect();
        assert_eq!(values, vec![255.0, 10.0, 15.0, 1234567890.0]);
    });
}

#[test]
fn test_assignment_to_literal_is_rejected() {
    assert_semantic("1 = 2", 2364);
    assert_semantic("a + b += 1", 2364);
}

#[test]
fn test_destructuring_assignment() {
    with_unit("[a, { b }] = c", |unit| {
        assert!(matches!(expression(&unit.statements[0]), Expression::Assignment(_)));
    });
}

fn assignment<'u, 'a>(expr: &'u Expression<'a>) -> &'u AssignmentExpression<'a> {
    match expr {
        Expression::Assignment(assignment) => assignment,
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn test_destructuring_assignment_with_defaults() {
    with_unit("[a = 1] = b;", |unit| {
        let Pattern::Array(pattern) = &assignment(expression(&unit.statements[0])).target else {
            panic!("expected an array pattern");
        };
        let element = pattern.elements[0].as_ref().unwrap();
        assert!(matches!(element.target, Pattern::Identifier(_)));
        assert!(matches!(element.initializer, Some(Expression::NumericLiteral(n)) if n.value == 1.0));
    });
    with_unit("[a, b = 1] = d;", |unit| {
        let Pattern::Array(pattern) = &assignment(expression(&unit.statements[0])).target else {
            panic!("expected an array pattern");
        };
        assert!(pattern.elements[0].as_ref().unwrap().initializer.is_none());
        assert!(pattern.elements[1].as_ref().unwrap().initializer.is_some());
    });
    with_unit("({x: y = 1} = b);", |unit| {
        let Expression::Parenthesized(paren) = expression(&unit.statements[0]) else {
            panic!("expected a parenthesized expression");
        };
        let Pattern::Object(pattern) = &assignment(paren.expression).target else {
            panic!("expected an object pattern");
        };
        assert!(matches!(pattern.properties[0].value, Pattern::Identifier(_)));
        assert!(pattern.properties[0].initializer.is_some());
    });
    with_unit("[a.b = 1] = c;", |unit| {
        let Pattern::Array(pattern) = &assignment(expression(&unit.statements[0])).target else {
            panic!("expected an array pattern");
        };
        assert!(matches!(pattern.elements[0].as_ref().unwrap().target, Pattern::Expression(_)));
    });
    assert_statement_count("[[a = 1], {b = 2}, c = 3] = d;", 1);
    assert_statement_count("({ a = 1 } = b); [{ a = 1 }] = b;", 2);
}

#[test]
fn test_defaulted_element_still_checks_its_target() {
    assert_semantic("[a + b = 1] = c;", 2364);
    assert_semantic("[a = 1] += b;", 2364);
    assert_semantic("(a = 1) = 2;", 2364);
    assert_semantic("([a = 1]) = b;", 2364);
    // The pending `{b = 2}` is not claimed by the sibling's `=`.
    assert_semantic("x = [{b = 2}, c = 3];", 1312);
}

#[test]
fn test_defaulted_array_element_as_arrow_parameter() {
    with_unit("([a = 1]) => a;", |unit| {
        let function = arrow(expression(&unit.statements[0]));
        assert!(matches!(function.parameters[0].name, Pattern::Array(_)));
    });
    assert!(matches!(parse_error("([a.b = 1]) => a;"), SyntaxError::UnconvertiblePattern { .. }));
}

#[test]
fn test_rest_element_with_trailing_comma_is_rejected() {
    assert_semantic("[...a,] = b;", 1013);
    assert_semantic("({...a,} = b);", 1013);
    assert_semantic("let [...a,] = b;", 1013);
    assert_semantic("[...a, b] = c;", 2462);
    assert_statement_count("[a,] = b; [...a] = b; x = [...a,];", 3);
}

#[test]
fn test_update_of_string_literal_fails() {
    assert_semantic("++'foo'", 2357);
    assert_semantic("'foo'++", 2357);
    assert_statement_count("x++; --a.b", 2);
}

#[test]
fn test_delete_identifier_depends_on_strictness() {
    assert_statement_count("delete foo", 1);
    assert_statement_count("delete foo.bar", 1);
    match parse_error_opts("delete foo", ParserOptions::default().with_strict(true)) {
        SyntaxError::Semantic { code, .. } => assert_eq!(code, 1102),
        other => panic!("unexpected error {other:?}"),
    }
    assert_semantic("'use strict'; delete foo", 1102);
}

#[test]
fn test_optional_chain_and_nullish_coalescing() {
    with_unit("a?.b.c ?? d", |unit| {
        let coalesce = binary(expression(&unit.statements[0]));
        assert_eq!(coalesce.operator, SyntaxKind::QuestionQuestionToken);
        assert!(coalesce.left.data().flags.contains(NodeFlags::OPTIONAL_CHAIN));
    });
}

#[test]
fn test_template_and_regex_literals() {
    assert_statement_count("let t = `a${b}c${d}`; let r = /ab+c/g.test(t);", 2);
}

#[test]
fn test_cast_followed_by_non_null_assertion() {
    with_unit("x as Foo!;", |unit| {
        let Expression::NonNull(assertion) = expression(&unit.statements[0]) else {
            panic!("expected a non-null assertion");
        };
        assert!(matches!(assertion.expression, Expression::As(_)));
    });
}

#[test]
fn test_nullish_coalescing_does_not_mix_with_logical_operators() {
    assert_semantic("a ?? b || c", 5076);
    assert_semantic("a || b ?? c", 5076);
    assert_semantic("a && b ?? c", 5076);
    assert_semantic("a ?? b && c", 5076);
    assert_statement_count("(a ?? b) || c; a ?? (b || c); (a && b) ?? c; a ?? b ?? c; a || b && c", 5);
}

#[test]
fn test_cast_binds_like_a_relational_operator() {
    with_unit("a * b as T;", |unit| {
        let Expression::As(cast) = expression(&unit.statements[0]) else {
            panic!("expected an 'as' expression");
        };
        assert_eq!(binary(cast.expression).operator, SyntaxKind::AsteriskToken);
    });
    with_unit("a ** b satisfies T;", |unit| {
        let Expression::Satisfies(cast) = expression(&unit.statements[0]) else {
            panic!("expected a 'satisfies' expression");
        };
        assert_eq!(binary(cast.expression).operator, SyntaxKind::AsteriskAsteriskToken);
    });
    with_unit("a + b as T + c;", |unit| {
        // `as` closes the additive chain; `+ c` then adds to the cast.
        let sum = binary(expression(&unit.statements[0]));
        assert_eq!(sum.operator, SyntaxKind::PlusToken);
        assert!(matches!(sum.left, Expression::As(_)));
    });
    with_unit("a == b as T;", |unit| {
        let equality = binary(expression(&unit.statements[0]));
        assert_eq!(equality.operator, SyntaxKind::EqualsEqualsToken);
        assert!(matches!(equality.right, Expression::As(_)));
    });
}

// ============================================================================
// Arrow Functions
// ============================================================================

#[test]
fn test_arrow_parameter_forms() {
    let cases: &[(&str, usize)] = &[
        ("()=>{}", 0),
        ("x=>x", 1),
        ("(x)=>x", 1),
        ("(x,y)=>x", 2),
        ("(...x)=>x", 1),
        ("(x:T)=>x", 1),
        ("(x=5)=>x", 1),
    ];
    for &(text, count) in cases {
        with_unit(text, |unit| {
            let function = arrow(expression(&unit.statements[0]));
            assert_eq!(function.parameters.len(), count, "source: {text}");
        });
    }
}

#[test]
fn test_arrow_parameter_details() {
    with_unit("(...x)=>x", |unit| {
        assert!(arrow(expression(&unit.statements[0])).parameters[0].rest);
    });
    with_unit("(x:T)=>x", |unit| {
        assert!(arrow(expression(&unit.statements[0])).parameters[0].type_annotation.is_some());
    });
    with_unit("(x=5)=>x", |unit| {
        assert!(arrow(expression(&unit.statements[0])).parameters[0].initializer.is_some());
    });
    with_unit("async (a, { b }) => await a", |unit| {
        let function = arrow(expression(&unit.statements[0]));
        assert!(function.is_async);
        assert!(function.parameters[1].name.is_destructuring());
        assert!(matches!(function.body, Some(FunctionBody::Expression(Expression::Await(_)))));
    });
}

#[test]
fn test_empty_parentheses_are_not_an_arrow_body() {
    parse_error("()=>()");
}

#[test]
fn test_parenthesized_expression_is_not_an_arrow() {
    with_unit("(a, b)", |unit| {
        assert!(matches!(expression(&unit.statements[0]), Expression::Parenthesized(_)));
    });
}

#[test]
fn test_unconvertible_arrow_parameter() {
    assert!(matches!(parse_error("(a + b) => 1"), SyntaxError::UnconvertiblePattern { .. }));
}

#[test]
fn test_generic_arrow_function() {
    with_unit("const id = <T,>(x: T): T => x;", |unit| {
        let Statement::VariableStatement(statement) = &unit.statements[0] else {
            panic!("expected a variable statement");
        };
        let initializer = statement.declaration_list.declarations[0].initializer.expect("initializer");
        let function = arrow(initializer);
        assert_eq!(function.type_parameters.map(|list| list.len()), Some(1));
        assert!(function.return_type.is_some());
    });
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_control_flow() {
    let text = "
        if (a) b(); else { c(); }
        for (let i = 0; i < 10; i++) continue;
        for (const k in o) {}
        for (const v of list) break;
        while (x) x--;
        do { y++ } while (y < 3)
        switch (z) { case 1: break; default: }
        try { f() } catch { } finally { g() }
        outer: for (;;) { inner: while (1) { continue outer; } }
    ";
    assert_statement_count(text, 9);
}

#[test]
fn test_for_of_with_destructuring_expression() {
    with_unit("for ([a, b] of pairs);", |unit| {
        assert!(matches!(
            &unit.statements[0],
            Statement::ForOfStatement(ForInOrOfStatement { initializer: ForInitializer::Pattern(_), .. })
        ));
    });
}

#[test]
fn test_for_of_with_defaulted_pattern() {
    with_unit("for ([a = 1] of b);", |unit| {
        let Statement::ForOfStatement(ForInOrOfStatement {
            initializer: ForInitializer::Pattern(Pattern::Array(pattern)),
            ..
        }) = &unit.statements[0]
        else {
            panic!("expected a for-of over an array pattern");
        };
        assert!(pattern.elements[0].as_ref().unwrap().initializer.is_some());
    });
    assert_statement_count("for ({ x: y = 1 } of b); for ([a.b = 1] in c);", 2);
}

#[test]
fn test_jump_statement_checks() {
    assert_semantic("break;", 1105);
    assert_semantic("while (1) { continue missing; }", 1115);
    assert_semantic("return 1;", 1108);
    assert_semantic("a: { a: ; }", 1114);
    assert_semantic("switch (x) { default: default: }", 1113);
}

#[test]
fn test_with_statement_in_strict_mode() {
    assert_statement_count("with (a) { b }", 1);
    assert_semantic("'use strict'; with (a) { b }", 1101);
}

#[test]
fn test_throw_requires_expression_on_same_line() {
    assert_semantic("throw\nnew Error()", 1142);
}

#[test]
fn test_try_requires_catch_or_finally() {
    assert!(matches!(parse_error("try {}"), SyntaxError::UnexpectedToken { .. } | SyntaxError::UnexpectedEof { .. }));
}

#[test]
fn test_asi_rules() {
    assert_statement_count("a\nb\nc", 3);
    assert_statement_count("return_ = 1\n;(x)", 2);
    assert!(matches!(parse_error("a b"), SyntaxError::UnexpectedToken { .. }));
}

// ============================================================================
// Functions and Classes
// ============================================================================

#[test]
fn test_parse_function_declarations() {
    with_unit("async function* gen(a, b = 1, ...rest) { yield await a; }", |unit| {
        let Statement::FunctionDeclaration(function) = &unit.statements[0] else {
            panic!("expected a function declaration");
        };
        assert!(function.is_async && function.is_generator);
        assert_eq!(function.name.map(|name| name.name), Some("gen"));
        assert_eq!(function.parameters.len(), 3);
        assert!(function.parameters[2].rest);
    });
}

#[test]
fn test_yield_outside_generator_is_identifier() {
    assert_statement_count("var yield = 1; function f() { return yield; }", 2);
    parse_error("function* g() { var yield = 1; }");
}

#[test]
fn test_rest_parameter_must_be_last() {
    assert_semantic("function f(...a, b) {}", 1014);
}

#[test]
fn test_parse_class_members() {
    let text = "
        abstract class Shape<T> extends Base implements Drawable, Sized {
            private readonly id: number = 1;
            static count = 0;
            #secret?: string;
            [key: string]: unknown;
            constructor(public name: string) { super(); }
            get area(): number { return 0; }
            set area(value) {}
            abstract draw(): void;
            static { Shape.count++; }
            *items() {}
            async load() {}
        }
    ";
    with_unit(text, |unit| {
        let Statement::ClassDeclaration(class) = &unit.statements[0] else {
            panic!("expected a class declaration");
        };
        assert!(class.data.modifier_flags.contains(ModifierFlags::ABSTRACT));
        assert_eq!(class.heritage_clauses.len(), 2);
        assert_eq!(class.heritage_clauses[1].types.len(), 2);
        assert_eq!(class.members.len(), 11);
        assert!(matches!(class.members[3], ClassElement::IndexSignature(_)));
        let ClassElement::Constructor(constructor) = &class.members[4] else {
            panic!("expected a constructor");
        };
        assert!(constructor.parameters[0].data.modifier_flags.contains(ModifierFlags::PUBLIC));
        assert!(matches!(class.members[8], ClassElement::ClassStaticBlock(_)));
    });
}

#[test]
fn test_class_modifier_errors() {
    assert_semantic("class A { public public x: number; }", 1030);
    assert_semantic("class A { public private x: number; }", 1028);
    assert_semantic("class A { static public x: number; }", 1029);
    assert_semantic("class A { get x(a) { return a; } }", 1054);
    assert_semantic("class A { set x() {} }", 1049);
    assert_semantic("class A extends B extends C {}", 1172);
    assert_semantic("class A implements I extends B {}", 1173);
    assert_semantic("function f(private x) {}", 2369);
}

#[test]
fn test_member_named_like_modifier() {
    assert_statement_count("class A { static() {} get; set = 1; async\nfoo() {} }", 1);
}

// ============================================================================
// Imports and Exports
// ============================================================================

#[test]
fn test_parse_default_import() {
    with_unit("import defaultMember from 'module-name';", |unit| {
        let Statement::ImportDeclaration(import) = &unit.statements[0] else {
            panic!("expected an import declaration");
        };
        assert_eq!(import.specifiers.len(), 1);
        let specifier = &import.specifiers[0];
        assert_eq!(specifier.kind, ImportSpecifierKind::Default);
        assert_eq!(specifier.imported.map(|name| name.name), Some("defaultMember"));
        assert_eq!(specifier.local.name, "defaultMember");
        assert_eq!(import.module_specifier.value, "module-name");
        assert!(unit.module);
    });
}

#[test]
fn test_parse_import_forms() {
    let text = r#"
        import "side-effect";
        import * as ns from "ns";
        import def, { a, b as c, "string name" as d, type E } from "named";
        import type { F } from "types";
        import type from "from-type";
    "#;
    with_unit(text, |unit| {
        assert_eq!(unit.statements.len(), 5);
        let Statement::ImportDeclaration(named) = &unit.statements[2] else {
            panic!("expected an import declaration");
        };
        assert_eq!(named.specifiers.len(), 5);
        assert_eq!(named.specifiers[2].local.name, "c");
        assert_eq!(named.specifiers[3].imported.map(|name| name.name), Some("string name"));
        assert!(named.specifiers[4].type_only);
        assert!(unit.statements[3].data().flags.contains(NodeFlags::TYPE_ONLY));
        let Statement::ImportDeclaration(default_type) = &unit.statements[4] else {
            panic!("expected an import declaration");
        };
        assert_eq!(default_type.specifiers[0].local.name, "type");
    });
}

#[test]
fn test_malformed_imports_fail() {
    let cases = [
        "import foo;",
        "import {*} from 'x';",
        "import * from 'x';",
        "import { a } 'x';",
        "import a, from 'x';",
        "import { a as } from 'x';",
        "import from 'x';",
        "import {a} from x;",
    ];
    for text in cases {
        let arena = Bump::new();
        let source = source(text);
        assert!(parse(&arena, &source, ParserOptions::default()).is_err(), "source: {text}");
    }
}

#[test]
fn test_parse_export_forms() {
    let text = r#"
        export const a = 1;
        export default function () {}
        export { a as b, c };
        export * from "all";
        export * as ns from "ns";
        export type { T } from "types";
        export interface I {}
    "#;
    with_unit(text, |unit| {
        assert_eq!(unit.statements.len(), 7);
        let Statement::FunctionDeclaration(function) = &unit.statements[1] else {
            panic!("expected a function declaration");
        };
        assert!(function.name.is_none());
        assert!(function.data.modifier_flags.contains(ModifierFlags::EXPORT_DEFAULT));
        assert!(unit.module);
    });
    with_unit("export = foo;", |unit| {
        assert!(matches!(&unit.statements[0], Statement::ExportAssignment(e) if e.is_export_equals));
    });
}

#[test]
fn test_import_is_only_allowed_at_top_level() {
    assert!(matches!(parse_error("{ import a from 'b'; }"), SyntaxError::UnexpectedToken { .. }));
    assert_statement_count("{ import('b'); }", 1);
}

// ============================================================================
// TypeScript Declarations
// ============================================================================

#[test]
fn test_parse_empty_interface() {
    with_unit("interface Foo{}", |unit| {
        let Statement::InterfaceDeclaration(interface) = &unit.statements[0] else {
            panic!("expected an interface declaration");
        };
        assert_eq!(interface.name.name, "Foo");
        assert!(interface.heritage_clauses.is_empty());
        assert!(interface.members.is_empty());
    });
}

#[test]
fn test_parse_interface_property() {
    with_unit("interface HasName {name: string;}", |unit| {
        let Statement::InterfaceDeclaration(interface) = &unit.statements[0] else {
            panic!("expected an interface declaration");
        };
        assert_eq!(interface.members.len(), 1);
        let TypeElement::PropertySignature(property) = &interface.members[0] else {
            panic!("expected a property signature");
        };
        assert_eq!(property.name.static_text(), Some("name"));
        assert!(matches!(property.type_annotation, Some(TypeNode::KeywordType(data)) if data.kind == SyntaxKind::StringKeyword));
    });
}

#[test]
fn test_parse_interface_members() {
    let text = "
        interface Api<T> extends Base<T>, Other {
            (x: number): string
            new (x: string): Api<T>;
            readonly [key: string]: unknown,
            method?<U>(u: U): void;
            readonly prop: T
        }
    ";
    with_unit(text, |unit| {
        let Statement::InterfaceDeclaration(interface) = &unit.statements[0] else {
            panic!("expected an interface declaration");
        };
        assert_eq!(interface.heritage_clauses[0].types.len(), 2);
        let kinds: Vec<SyntaxKind> = interface.members.iter().map(|member| member.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::CallSignature,
                SyntaxKind::ConstructSignature,
                SyntaxKind::IndexSignature,
                SyntaxKind::MethodSignature,
                SyntaxKind::PropertySignature,
            ]
        );
        assert!(interface.members[4].data().modifier_flags.contains(ModifierFlags::READONLY));
    });
}

#[test]
fn test_parse_enum_namespace_and_declare() {
    let text = r#"
        const enum Color { Red, Green = 2, "Blue" }
        namespace A.B.C { export const x = 1; }
        declare module "ext" { export function f(): void; }
        declare global { interface Window {} }
        declare let ambient: number;
    "#;
    with_unit(text, |unit| {
        assert_eq!(unit.statements.len(), 5);
        let Statement::EnumDeclaration(color) = &unit.statements[0] else {
            panic!("expected an enum declaration");
        };
        assert_eq!(color.members.len(), 3);
        assert!(color.data.modifier_flags.contains(ModifierFlags::CONST));
        assert!(unit.statements[1].data().flags.contains(NodeFlags::NAMESPACE));
        assert!(unit.statements[3].data().flags.contains(NodeFlags::GLOBAL_AUGMENTATION));
        assert!(unit.statements[4].data().modifier_flags.contains(ModifierFlags::AMBIENT));
    });
}

#[test]
fn test_ambient_initializer_and_quoted_module() {
    assert_semantic("declare let x = 1;", 1039);
    assert_semantic("module 'm' {}", 1035);
}

#[test]
fn test_contextual_keywords_remain_identifiers() {
    assert_statement_count("type = 1; interface\nFoo; declare\nlet x; abstract\nclass B {}", 7);
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_parse_conditional_and_infer_types() {
    with_unit("type U<T> = T extends Array<infer E> ? E : T extends string ? 's' : never;", |unit| {
        let TypeNode::ConditionalType(conditional) = type_alias(&unit.statements[0]) else {
            panic!("expected a conditional type");
        };
        assert!(matches!(conditional.false_type, TypeNode::ConditionalType(_)));
        let TypeNode::TypeReference(array) = conditional.extends_type else {
            panic!("expected a type reference");
        };
        assert!(matches!(array.type_arguments.map(|args| &args[0]), Some(TypeNode::InferType(_))));
    });
}

#[test]
fn test_parse_mapped_type() {
    with_unit("type M<T> = { -readonly [K in keyof T as `get${K}`]+?: T[K] };", |unit| {
        let TypeNode::MappedType(mapped) = type_alias(&unit.statements[0]) else {
            panic!("expected a mapped type");
        };
        assert_eq!(mapped.readonly_token, Some(SyntaxKind::MinusToken));
        assert_eq!(mapped.question_token, Some(SyntaxKind::PlusToken));
        assert!(matches!(mapped.name_type, Some(TypeNode::TemplateLiteralType(_))));
        assert!(matches!(mapped.type_node, Some(TypeNode::IndexedAccessType(_))));
    });
}

#[test]
fn test_parse_tuple_types() {
    with_unit("type A = [a: string, b?: number, ...rest: boolean[]]; type B = [string, number?, ...T];", |unit| {
        let TypeNode::TupleType(named) = type_alias(&unit.statements[0]) else {
            panic!("expected a tuple type");
        };
        assert!(named.elements.iter().all(|element| matches!(element, TypeNode::NamedTupleMember(_))));
        let TypeNode::TupleType(plain) = type_alias(&unit.statements[1]) else {
            panic!("expected a tuple type");
        };
        assert!(matches!(plain.elements[1], TypeNode::OptionalType(_)));
        assert!(matches!(plain.elements[2], TypeNode::RestType(_)));
    });
}

#[test]
fn test_parse_function_and_constructor_types() {
    let text = "
        type F = (a: string, b?: number) => void;
        type G = <T>(x: T) => T;
        type C = abstract new () => object;
        type P = (string | number)[];
    ";
    with_unit(text, |unit| {
        assert!(matches!(type_alias(&unit.statements[0]), TypeNode::FunctionType(f) if f.parameters.len() == 2));
        assert!(matches!(type_alias(&unit.statements[1]), TypeNode::FunctionType(f) if f.type_parameters.is_some()));
        let TypeNode::FunctionType(constructor) = type_alias(&unit.statements[2]) else {
            panic!("expected a constructor type");
        };
        assert_eq!(constructor.data.kind, SyntaxKind::ConstructorType);
        assert!(constructor.data.modifier_flags.contains(ModifierFlags::ABSTRACT));
        let TypeNode::ArrayType(array) = type_alias(&unit.statements[3]) else {
            panic!("expected an array type");
        };
        assert!(matches!(array.element_type, TypeNode::ParenthesizedType(_)));
    });
}

#[test]
fn test_parse_literal_and_operator_types() {
    let text = "
        type L = 'a' | -1 | 10n | true | `plain`;
        type K = keyof typeof obj;
        type Q = import_.a.b<string>;
        type N = Foo!;
        type V = | 'x';
    ";
    with_unit(text, |unit| {
        assert!(matches!(type_alias(&unit.statements[0]), TypeNode::UnionType(u) if u.types.len() == 5));
        assert!(matches!(type_alias(&unit.statements[1]), TypeNode::TypeOperator(op) if op.operator == SyntaxKind::KeyOfKeyword));
        assert!(matches!(type_alias(&unit.statements[2]), TypeNode::TypeReference(r) if r.type_name.last_identifier().name == "b"));
        assert!(matches!(type_alias(&unit.statements[3]), TypeNode::NonNullType(_)));
        assert!(matches!(type_alias(&unit.statements[4]), TypeNode::UnionType(u) if u.types.len() == 1));
    });
}

#[test]
fn test_parse_type_predicates() {
    let text = "
        function isString(x: unknown): x is string { return typeof x === 'string'; }
        declare function assert(v: unknown): asserts v;
        declare function assertThis(): asserts this is Foo;
    ";
    with_unit(text, |unit| {
        let predicates: Vec<(bool, bool)> = unit
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::FunctionDeclaration(Function {
                    return_type: Some(TypeNode::TypePredicate(predicate)),
                    ..
                }) => (predicate.asserts, predicate.type_node.is_some()),
                other => panic!("expected a predicate, got {other:?}"),
            })
            .collect();
        assert_eq!(predicates, vec![(false, true), (true, false), (true, true)]);
    });
}

#[test]
fn test_type_parameter_modifiers() {
    with_unit("function f<const T extends readonly unknown[], in out U = T>() {}", |unit| {
        let Statement::FunctionDeclaration(function) = &unit.statements[0] else {
            panic!("expected a function declaration");
        };
        let parameters = function.type_parameters.expect("type parameters");
        assert!(parameters[0].data.modifier_flags.contains(ModifierFlags::CONST));
        assert!(parameters[0].constraint.is_some());
        assert!(parameters[1].data.modifier_flags.contains(ModifierFlags::IN | ModifierFlags::OUT));
        assert!(parameters[1].default.is_some());
    });
}

#[test]
fn test_generic_call_versus_comparison() {
    with_unit("f<string>(x); a < b > c;", |unit| {
        assert!(matches!(expression(&unit.statements[0]), Expression::Call(call) if call.type_arguments.is_some()));
        assert!(matches!(expression(&unit.statements[1]), Expression::Binary(_)));
    });
}

// ============================================================================
// Directives, Modules and Options
// ============================================================================

#[test]
fn test_use_strict_directive() {
    with_unit("'use strict'; 'use strict'; x", |unit| {
        assert!(unit.strict);
        assert!(unit.data.flags.contains(NodeFlags::STRICT));
        assert_eq!(unit.diagnostics.len(), 1);
        assert_eq!(unit.diagnostics[0].code, 1553);
        assert_eq!(unit.diagnostics[0].file.as_deref(), Some("test.ts"));
    });
    with_unit("x; 'use strict';", |unit| assert!(!unit.strict));
    with_unit("'use\\x20strict';", |unit| assert!(!unit.strict));
}

#[test]
fn test_module_goal_is_strict() {
    with_unit_opts("x", ParserOptions::default().with_module(true), |unit| {
        assert!(unit.strict);
        assert!(unit.module);
    });
    with_unit("x", |unit| assert!(!unit.module));
}

#[test]
fn test_line_map_is_attached() {
    with_unit("a;\nb;\n\nc;", |unit| {
        assert_eq!(unit.statements.len(), 3);
        assert_eq!(unit.line_map.line_count(), 4);
    });
}

#[test]
fn test_maximum_nesting_depth() {
    let text = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    match parse_error_opts(&text, ParserOptions::default().with_max_depth(32)) {
        SyntaxError::Semantic { code, .. } => assert_eq!(code, 1552),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_default_depth_limit_stops_deep_input() {
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let text = format!("{}1{}", "[".repeat(5000), "]".repeat(5000));
            parse_error(&text).code()
        })
        .expect("spawn parser thread");
    assert_eq!(handle.join().expect("parser thread"), 1552);
}

// ============================================================================
// Dialects
// ============================================================================

#[test]
fn test_dialect_gates() {
    let cases: &[(&str, Dialect, &str)] = &[
        ("let x = 1;", Dialect::Es5, "let-const"),
        ("class A {}", Dialect::Es5, "classes"),
        ("f(...args);", Dialect::Es5, "spread"),
        ("a ** b;", Dialect::Es2015, "exponentiation"),
        ("async function f() {}", Dialect::Es2016, "async-await"),
        ("a?.b;", Dialect::Es2017, "optional-chaining"),
        ("class A { x = 1 }", Dialect::Es2020, "class-fields"),
        ("enum E { A }", Dialect::EsNext, "typescript"),
        ("export interface I {}", Dialect::EsNext, "typescript"),
    ];
    for &(text, dialect, expected) in cases {
        match parse_error_opts(text, es(dialect)) {
            SyntaxError::UnsupportedFeature { feature, .. } => assert_eq!(feature, expected, "source: {text}"),
            other => panic!("expected feature error for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_features_can_be_enabled_individually() {
    let options = ParserOptions {
        enable: vec!["class-fields".to_string()],
        ..es(Dialect::Es2015)
    };
    with_unit_opts("class A { x = 1 }", options, |unit| assert_eq!(unit.statements.len(), 1));

    let options = ParserOptions {
        disable: vec!["arrow-functions".to_string()],
        ..ParserOptions::default()
    };
    assert!(matches!(parse_error_opts("x => x", options), SyntaxError::UnsupportedFeature { .. }));
}

#[test]
fn test_options_from_json() {
    let options = ParserOptions::from_json(r#"{ "dialect": "es5", "module": true }"#).expect("options");
    assert_eq!(options.dialect, Dialect::Es5);
    assert!(matches!(parse_error_opts("const a = 1;", options), SyntaxError::UnsupportedFeature { .. }));
}

#[test]
fn test_javascript_rejects_type_annotations() {
    assert!(matches!(
        parse_error_opts("let x: number = 1;", es(Dialect::EsNext)),
        SyntaxError::UnexpectedToken { .. }
    ));
}

#[test]
fn test_visitor_walks_parsed_unit() {
    struct Names(Vec<String>);

    impl<'a> AstVisitor<'a> for Names {
        fn visit_identifier(&mut self, id: &Identifier<'a>) {
            self.0.push(id.name.to_string());
        }
    }

    with_unit("let total = price * count;", |unit| {
        let mut names = Names(Vec::new());
        names.visit_compilation_unit(unit);
        assert_eq!(names.0, ["total", "price", "count"]);
    });
}
