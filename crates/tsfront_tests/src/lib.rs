//! Conformance harness for the front end.
//!
//! A [`Case`] pairs a source snippet with the dialect it is parsed under and
//! the outcome it must produce. [`run_table`] parses a whole table on the
//! rayon pool with every parser sharing one [`StringInterner`], and
//! [`run_corpus`] does the same for files on disk.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use bumpalo::Bump;
use rayon::prelude::*;
use tracing::{debug, info};
use tsfront_core::{SourceId, SourceText, StringInterner};
use tsfront_parser::{Dialect, Parser, ParserOptions, SyntaxError};

/// The kind of failure a rejected input must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// An unexpected token or end of input.
    Grammar,
    /// An error raised by the scanner.
    Lexical,
    /// Syntax the dialect does not enable, by feature key.
    Unsupported(&'static str),
    /// An expression reinterpreted as a binding pattern it cannot be.
    Unconvertible,
    /// A semantic check reported under the given diagnostic code.
    Semantic(u32),
}

impl Rejection {
    pub fn matches(self, err: &SyntaxError) -> bool {
        match (self, err) {
            (Rejection::Grammar, SyntaxError::UnexpectedToken { .. } | SyntaxError::UnexpectedEof { .. }) => true,
            (
                Rejection::Lexical,
                SyntaxError::UnterminatedLiteral { .. }
                | SyntaxError::InvalidLiteral { .. }
                | SyntaxError::UnexpectedCharacter { .. },
            ) => true,
            (Rejection::Unsupported(key), SyntaxError::UnsupportedFeature { feature, .. }) => feature.as_str() == key,
            (Rejection::Unconvertible, SyntaxError::UnconvertiblePattern { .. }) => true,
            (Rejection::Semantic(code), SyntaxError::Semantic { code: found, .. }) => code == *found,
            _ => false,
        }
    }
}

/// One row of a conformance table.
#[derive(Debug, Clone, Copy)]
pub struct Case {
    pub name: &'static str,
    pub source: &'static str,
    pub dialect: Dialect,
    pub module: bool,
    /// `None` when the input must parse.
    pub expect: Option<Rejection>,
}

impl Case {
    pub const fn accept(name: &'static str, dialect: Dialect, source: &'static str) -> Self {
        Self {
            name,
            source,
            dialect,
            module: false,
            expect: None,
        }
    }

    pub const fn reject(name: &'static str, dialect: Dialect, source: &'static str, rejection: Rejection) -> Self {
        Self {
            name,
            source,
            dialect,
            module: false,
            expect: Some(rejection),
        }
    }

    /// Parse the case as a module.
    pub const fn in_module(mut self) -> Self {
        self.module = true;
        self
    }

    pub fn options(&self) -> ParserOptions {
        ParserOptions::default()
            .with_dialect(self.dialect)
            .with_module(self.module)
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub name: &'static str,
    pub dialect: Dialect,
    /// `Err` carries a description of the mismatch.
    pub result: Result<(), String>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    /// Distinct names in the shared interner after the run.
    pub interned: usize,
}

impl Report {
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    /// One line per failing case.
    pub fn summary(&self) -> String {
        let mut summary = format!("{}/{} cases passed", self.passed(), self.outcomes.len());
        for outcome in self.failures() {
            if let Err(reason) = &outcome.result {
                summary.push_str(&format!("\n  {} ({:?}): {}", outcome.name, outcome.dialect, reason));
            }
        }
        summary
    }
}

/// Parse `source`, reporting the statement count. A panic inside the parser
/// is caught and returned as the outer error.
fn parse_guarded(
    source: &SourceText,
    options: ParserOptions,
    interner: &StringInterner,
) -> Result<Result<usize, SyntaxError>, String> {
    catch_unwind(AssertUnwindSafe(|| {
        let arena = Bump::new();
        let parsed = Parser::with_interner(&arena, source, options, interner.clone())
            .parse_compilation_unit()
            .map(|unit| unit.statements.len());
        parsed
    }))
    .map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    }
}

pub fn run_case(case: &Case, interner: &StringInterner) -> Outcome {
    let source = SourceText::new(SourceId::new(0), case.name, case.source);
    let result = match (parse_guarded(&source, case.options(), interner), case.expect) {
        (Err(panic), _) => Err(format!("parser panicked: {panic}")),
        (Ok(Ok(_)), None) => Ok(()),
        (Ok(Ok(statements)), Some(rejection)) => {
            Err(format!("expected {rejection:?}, parsed {statements} statement(s)"))
        }
        (Ok(Err(err)), None) => Err(format!("rejected: {err}")),
        (Ok(Err(err)), Some(rejection)) if rejection.matches(&err) => Ok(()),
        (Ok(Err(err)), Some(rejection)) => Err(format!("expected {rejection:?}, got {err:?}")),
    };
    debug!(case = case.name, dialect = ?case.dialect, passed = result.is_ok(), "conformance case");
    Outcome {
        name: case.name,
        dialect: case.dialect,
        result,
    }
}

/// Run every case in parallel against one shared interner.
pub fn run_table(cases: &[Case]) -> Report {
    let interner = StringInterner::with_capacity(cases.len() * 4);
    let outcomes: Vec<Outcome> = cases.par_iter().map(|case| run_case(case, &interner)).collect();
    let report = Report {
        outcomes,
        interned: interner.len(),
    };
    info!(
        cases = report.outcomes.len(),
        passed = report.passed(),
        interned = report.interned,
        "conformance table finished"
    );
    report
}

// ============================================================================
// Corpus runs
// ============================================================================

/// `.ts` files are parsed as TypeScript, `.js`/`.mjs` as the newest
/// ECMAScript dialect; anything else is skipped.
pub fn dialect_for(path: &Path) -> Option<Dialect> {
    match path.extension()?.to_str()? {
        "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
        "js" | "mjs" | "cjs" => Some(Dialect::EsNext),
        _ => None,
    }
}

/// Collect up to `max_files` parseable sources under `dir`, depth first.
pub fn collect_sources(dir: &Path, max_files: usize) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_sources_into(dir, &mut files, max_files);
    files
}

fn collect_sources_into(dir: &Path, files: &mut Vec<PathBuf>, max_files: usize) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    for path in paths {
        if files.len() >= max_files {
            return;
        }
        if path.is_dir() {
            collect_sources_into(&path, files, max_files);
        } else if dialect_for(&path).is_some() {
            files.push(path);
        }
    }
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Statement count, or the reason the file was not parsed.
    pub result: Result<usize, String>,
}

/// Parse each file under the dialect its extension selects. Module files
/// (`.mjs`, `.mts`) are parsed as modules.
pub fn run_corpus(files: &[PathBuf]) -> Vec<FileOutcome> {
    let interner = StringInterner::new();
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .enumerate()
        .map(|(index, path)| FileOutcome {
            path: path.clone(),
            result: parse_file(index as u32, path, &interner),
        })
        .collect();
    info!(
        files = outcomes.len(),
        parsed = outcomes.iter().filter(|outcome| outcome.result.is_ok()).count(),
        "corpus run finished"
    );
    outcomes
}

fn parse_file(index: u32, path: &Path, interner: &StringInterner) -> Result<usize, String> {
    let dialect = dialect_for(path).ok_or_else(|| "unrecognized extension".to_string())?;
    let bytes = std::fs::read(path).map_err(|err| format!("failed to read file: {err}"))?;
    let source = SourceText::from_utf8(SourceId::new(index), &path.to_string_lossy(), &bytes)
        .map_err(|err| err.to_string())?;
    let module = matches!(path.extension().and_then(|ext| ext.to_str()), Some("mjs" | "mts"));
    let options = ParserOptions::default().with_dialect(dialect).with_module(module);
    match parse_guarded(&source, options, interner).map_err(|panic| format!("parser panicked: {panic}"))? {
        Ok(statements) => Ok(statements),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_matches_by_variant_and_code() {
        let err = SyntaxError::Semantic {
            code: 1108,
            message: "A 'return' statement can only be used within a function body.".to_string(),
            range: tsfront_core::TextRange::new(0, 6),
        };
        assert!(Rejection::Semantic(1108).matches(&err));
        assert!(!Rejection::Semantic(1105).matches(&err));
        assert!(!Rejection::Grammar.matches(&err));

        let unsupported = SyntaxError::UnsupportedFeature {
            feature: "bigint".to_string(),
            range: tsfront_core::TextRange::new(0, 2),
        };
        assert!(Rejection::Unsupported("bigint").matches(&unsupported));
        assert!(!Rejection::Unsupported("spread").matches(&unsupported));
    }

    #[test]
    fn dialect_follows_extension() {
        assert_eq!(dialect_for(Path::new("a/b.ts")), Some(Dialect::TypeScript));
        assert_eq!(dialect_for(Path::new("b.mjs")), Some(Dialect::EsNext));
        assert_eq!(dialect_for(Path::new("README.md")), None);
        assert_eq!(dialect_for(Path::new("Makefile")), None);
    }

    #[test]
    fn corpus_parses_by_extension() {
        let dir = std::env::temp_dir().join(format!("tsfront-corpus-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("a.ts"), "let x: number = 1;").unwrap();
        std::fs::write(dir.join("nested/b.js"), "let x: number = 1;").unwrap();
        std::fs::write(dir.join("notes.txt"), "not a source").unwrap();

        let files = collect_sources(&dir, 10);
        let outcomes = run_corpus(&files);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(outcomes[0].result, Ok(1));
        // Type annotations are not JavaScript.
        assert!(outcomes[1].result.is_err());
    }

    #[test]
    fn mismatch_is_reported() {
        let interner = StringInterner::new();
        let case = Case::reject("accepted", Dialect::TypeScript, "let x = 1;", Rejection::Grammar);
        let outcome = run_case(&case, &interner);
        assert!(!outcome.passed());

        let case = Case::accept("rejected", Dialect::Es5, "let x = 1;");
        assert!(!run_case(&case, &interner).passed());
    }
}
