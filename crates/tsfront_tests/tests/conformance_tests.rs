//! Conformance table: positive and negative inputs per dialect.
//!
//! The built-in table always runs. Setting `TSFRONT_CORPUS_PATH` to a
//! directory of `.ts`/`.js` files additionally parses that corpus and
//! reports how much of it is accepted:
//!   TSFRONT_CORPUS_PATH=/path/to/TypeScript/tests/cases/conformance

use std::path::PathBuf;

use tsfront_parser::{feature, Dialect};
use tsfront_tests::{collect_sources, run_corpus, run_table, Case, Rejection};

use Dialect::{Es2015, Es2016, Es2017, Es2020, Es2022, Es5, EsNext, TypeScript};
use Rejection::{Grammar, Lexical, Semantic, Unconvertible, Unsupported};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn assert_table(cases: &[Case]) {
    init_tracing();
    let report = run_table(cases);
    assert_eq!(report.outcomes.len(), cases.len());
    assert!(report.failures().next().is_none(), "{}", report.summary());
}

// ============================================================================
// Accepted inputs
// ============================================================================

const ACCEPTED: &[Case] = &[
    Case::accept(
        "es5_functions",
        Es5,
        "var f = function (a, b) { return a + b; };\nif (f(1, 2) > 2) { f = null; }",
    ),
    Case::accept("es5_object_literal", Es5, "var o = { a: 1, 'b': [1, 2], get c() { return 1; } };"),
    Case::accept("es5_regex", Es5, "var re = /ab+c/gi;\nre.test('abc');"),
    Case::accept("es5_yield_is_identifier", Es5, "var yield = 1;"),
    Case::accept(
        "es2015_classes",
        Es2015,
        "class A extends B {\n  constructor() { super(); }\n  get x() { return this.y; }\n  static m() {}\n}",
    ),
    Case::accept(
        "es2015_destructuring_and_arrows",
        Es2015,
        "const { a, b: [c, ...d] } = o;\nconst f = (x = 1, ...rest) => `${x}${rest}`;",
    ),
    Case::accept("es2015_generators", Es2015, "function* g() { yield 1; yield* other(); }"),
    Case::accept("es2015_for_of", Es2015, "for (const [k, v] of entries) {}"),
    Case::accept("es2016_exponentiation", Es2016, "let a = 2 ** 10;\na **= 2;"),
    Case::accept(
        "es2017_async",
        Es2017,
        "async function f() { await g(); }\nconst h = async (x) => await x;",
    ),
    Case::accept("es2020_optional_and_nullish", Es2020, "const v = a?.b?.[c] ?? d?.(1);\nconst n = 10n;"),
    Case::accept(
        "es2022_class_fields",
        Es2022,
        "class A {\n  #x = 1;\n  static y = 2;\n  static { A.y++; }\n  m() { return this.#x; }\n}\na ||= b;\nconst big = 1_000_000;",
    ),
    Case::accept("esnext_top_level_await", EsNext, "await ready;").in_module(),
    Case::accept("esnext_imports", EsNext, "import a, { b as c } from \"m\";\nexport default a;").in_module(),
    Case::accept("ts_mapped_type", TypeScript, "type T<K extends keyof O = keyof O> = { readonly [P in K]?: O[P] };"),
    Case::accept("ts_generic_calls", TypeScript, "const m = new Map<string, number>();\nf<T>(x);"),
    Case::accept("ts_ambient_module", TypeScript, "declare module \"x\" { export const y: number; }"),
    Case::accept("ts_abstract_class", TypeScript, "abstract class S { protected abstract area(): number; }"),
    Case::accept(
        "ts_interfaces_and_enums",
        TypeScript,
        "interface P { x: number; y?: number }\nconst enum E { A = 1, B }\nlet p: P = { x: E.A };",
    ),
    Case::accept(
        "es2015_defaulted_destructuring",
        Es2015,
        "[a, b = 1] = c;\n({ x: y = 2, z } = d);\nfor ([k, v = 0] of pairs);",
    ),
];

#[test]
fn test_accepted_inputs() {
    assert_table(ACCEPTED);
}

// ============================================================================
// Dialect gates
// ============================================================================

const GATED: &[Case] = &[
    Case::reject("es5_let", Es5, "let x = 1;", Unsupported(feature::LET_CONST)),
    Case::reject("es5_arrow", Es5, "var f = x => x;", Unsupported(feature::ARROW_FUNCTIONS)),
    Case::reject("es5_class", Es5, "class A {}", Unsupported(feature::CLASSES)),
    Case::reject("es5_generator", Es5, "function* g() {}", Unsupported(feature::GENERATORS)),
    Case::reject("es5_template", Es5, "var s = `x`;", Unsupported(feature::TEMPLATE_LITERALS)),
    Case::reject("es5_spread", Es5, "f(...args);", Unsupported(feature::SPREAD)),
    Case::reject("es5_destructuring", Es5, "var [a] = b;", Unsupported(feature::DESTRUCTURING)),
    Case::reject("es5_default_parameter", Es5, "function f(a = 1) {}", Unsupported(feature::DEFAULT_PARAMETERS)),
    Case::reject("es5_rest_parameter", Es5, "function f(...a) {}", Unsupported(feature::REST_PARAMETERS)),
    Case::reject("es5_for_of", Es5, "for (var x of xs) {}", Unsupported(feature::FOR_OF)),
    Case::reject("es5_binary_literal", Es5, "var b = 0b1010;", Unsupported(feature::BINARY_OCTAL_LITERALS)),
    Case::reject("es5_import", Es5, "import a from \"m\";", Unsupported(feature::MODULES)),
    Case::reject("es2015_exponentiation", Es2015, "var p = 2 ** 3;", Unsupported(feature::EXPONENTIATION)),
    Case::reject("es2016_async", Es2016, "async function f() {}", Unsupported(feature::ASYNC_AWAIT)),
    Case::reject("es2017_optional_chain", Es2017, "a?.b;", Unsupported(feature::OPTIONAL_CHAINING)),
    Case::reject("es2017_nullish", Es2017, "a ?? b;", Unsupported(feature::NULLISH_COALESCING)),
    Case::reject("es2017_bigint", Es2017, "var n = 1n;", Unsupported(feature::BIGINT)),
    Case::reject("es2020_class_field", Es2020, "class A { x = 1; }", Unsupported(feature::CLASS_FIELDS)),
    Case::reject("es2020_private_method", Es2020, "class A { #m() {} }", Unsupported(feature::PRIVATE_NAMES)),
    Case::reject("es2020_logical_assignment", Es2020, "a ||= b;", Unsupported(feature::LOGICAL_ASSIGNMENT)),
    Case::reject("es2020_numeric_separator", Es2020, "var n = 1_000;", Unsupported(feature::NUMERIC_SEPARATORS)),
    Case::reject("esnext_enum", EsNext, "enum E { A }", Unsupported(feature::TYPESCRIPT)),
];

#[test]
fn test_dialect_gates() {
    assert_table(GATED);
}

#[test]
fn test_gated_inputs_parse_under_typescript() {
    // Every gated snippet is valid TypeScript.
    let cases: Vec<Case> = GATED
        .iter()
        .map(|case| Case::accept(case.name, TypeScript, case.source))
        .collect();
    assert_table(&cases);
}

// ============================================================================
// Semantic checks
// ============================================================================

const SEMANTIC: &[Case] = &[
    Case::reject("rest_not_last", TypeScript, "function f(...a, b) {}", Semantic(1014)),
    Case::reject("accessibility_seen", TypeScript, "class A { public private x: number; }", Semantic(1028)),
    Case::reject("modifier_order", TypeScript, "class A { static public x: number; }", Semantic(1029)),
    Case::reject("modifier_seen", TypeScript, "class A { public public x: number; }", Semantic(1030)),
    Case::reject("quoted_module_name", TypeScript, "module \"m\" {}", Semantic(1035)),
    Case::reject("ambient_initializer", TypeScript, "declare let x = 1;", Semantic(1039)),
    Case::reject("setter_arity", TypeScript, "class A { set x() {} }", Semantic(1049)),
    Case::reject("getter_arity", TypeScript, "class A { get x(a) { return a; } }", Semantic(1054)),
    Case::reject("with_in_module", TypeScript, "with (a) {}", Semantic(1101)).in_module(),
    Case::reject("strict_delete", TypeScript, "\"use strict\";\ndelete x;", Semantic(1102)),
    Case::reject("continue_outside_loop", TypeScript, "continue;", Semantic(1104)),
    Case::reject("break_outside_loop", TypeScript, "break;", Semantic(1105)),
    Case::reject("return_outside_function", TypeScript, "return;", Semantic(1108)),
    Case::reject("default_twice", TypeScript, "switch (x) { default: default: }", Semantic(1113)),
    Case::reject("duplicate_label", TypeScript, "a: a: ;", Semantic(1114)),
    Case::reject("continue_unknown_label", TypeScript, "while (1) { continue missing; }", Semantic(1115)),
    Case::reject("break_unknown_label", TypeScript, "break missing;", Semantic(1116)),
    Case::reject("throw_line_break", TypeScript, "throw\nerr;", Semantic(1142)),
    Case::reject("const_initializer", TypeScript, "const x;", Semantic(1155)),
    Case::reject("extends_twice", TypeScript, "class A extends B extends C {}", Semantic(1172)),
    Case::reject("implements_before_extends", TypeScript, "class A implements I extends B {}", Semantic(1173)),
    Case::reject("extends_two_classes", TypeScript, "class A extends B, C {}", Semantic(1174)),
    Case::reject("destructuring_initializer", TypeScript, "var [a];", Semantic(1182)),
    Case::reject("literal_assignment", TypeScript, "1 = 2;", Semantic(2364)),
    Case::reject("parameter_property", TypeScript, "function f(private x) {}", Semantic(2369)),
    Case::reject("rest_element_not_last", TypeScript, "var [...a, b] = c;", Semantic(2462)),
    Case::reject("unary_exponent_base", TypeScript, "-a ** 2;", Semantic(17006)),
    Case::reject("rest_trailing_comma", TypeScript, "[...a,] = b;", Semantic(1013)),
    Case::reject("nullish_mixed_with_or", TypeScript, "a ?? b || c;", Semantic(5076)),
];

#[test]
fn test_semantic_checks() {
    assert_table(SEMANTIC);
}

// ============================================================================
// Grammar and lexical errors
// ============================================================================

const MALFORMED: &[Case] = &[
    Case::reject("missing_semicolon", TypeScript, "a b", Grammar),
    Case::reject("bare_try", TypeScript, "try {}", Grammar),
    Case::reject("open_condition", TypeScript, "if (a", Grammar),
    Case::reject("nested_import", TypeScript, "{ import a from 'b'; }", Grammar),
    Case::reject("empty_arrow_body", TypeScript, "() => ()", Grammar),
    Case::reject("binary_parameter", TypeScript, "(a + b) => 1;", Unconvertible),
    Case::reject("unterminated_string", TypeScript, "var s = \"abc", Lexical),
    Case::reject("stray_hash", TypeScript, "var a = # 1;", Lexical),
    Case::reject("unterminated_comment", TypeScript, "/* open", Lexical),
];

#[test]
fn test_malformed_inputs() {
    assert_table(MALFORMED);
}

#[test]
fn test_parallel_runs_share_one_interner() {
    init_tracing();
    let report = run_table(ACCEPTED);
    // `a` appears in several sources but is interned once.
    assert!(report.interned > 0);
    assert!(report.interned < ACCEPTED.iter().map(|case| case.source.len()).sum::<usize>());
}

// ============================================================================
// On-disk corpus (opt-in)
// ============================================================================

#[test]
fn test_corpus() {
    init_tracing();
    let Some(root) = std::env::var("TSFRONT_CORPUS_PATH").ok().map(PathBuf::from) else {
        eprintln!("Skipping corpus run: TSFRONT_CORPUS_PATH not set.");
        return;
    };
    if !root.exists() {
        eprintln!("Skipping corpus run: {root:?} does not exist.");
        return;
    }
    let max_files = std::env::var("TSFRONT_CORPUS_MAX_FILES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(500);

    let files = collect_sources(&root, max_files);
    let outcomes = run_corpus(&files);
    let parsed = outcomes.iter().filter(|outcome| outcome.result.is_ok()).count();
    println!("Parsed {parsed}/{} files", outcomes.len());
    for outcome in outcomes.iter().filter(|outcome| outcome.result.is_err()).take(10) {
        if let Err(reason) = &outcome.result {
            let reason: String = reason.chars().take(100).collect();
            println!("  {:?}: {reason}", outcome.path);
        }
    }
    // Rejections are expected on a conformance suite; panics are not.
    assert!(
        outcomes
            .iter()
            .all(|outcome| !matches!(&outcome.result, Err(reason) if reason.starts_with("parser panicked"))),
        "the parser panicked on at least one corpus file"
    );
}
