//! tsfront_parser: recursive descent parser for JavaScript and TypeScript.
//!
//! Pulls tokens from the scanner on demand and builds an arena-allocated
//! [`CompilationUnit`]. Grammar decisions that depend on the surrounding
//! code (strict mode, `yield`/`await` as keywords, `in` in `for` heads,
//! cover grammars) are driven by the [`ParseContext`] flag stack; which
//! syntax is accepted at all is decided by the [`FeatureSet`] derived from
//! [`ParserOptions`].
//!
//! ```no_run
//! use bumpalo::Bump;
//! use tsfront_core::source::{SourceId, SourceText};
//! use tsfront_parser::{parse, ParserOptions};
//!
//! let arena = Bump::new();
//! let source = SourceText::new(SourceId::new(0), "main.ts", "let x: number = 1;");
//! let unit = parse(&arena, &source, ParserOptions::default()).unwrap();
//! assert_eq!(unit.statements.len(), 1);
//! ```

mod context;
mod declarations;
mod expressions;
mod features;
mod labels;
mod modules;
mod options;
mod parser;
mod patterns;
mod precedence;
mod statements;
mod types;
mod utilities;

use bumpalo::Bump;
use tsfront_ast::node::CompilationUnit;
use tsfront_core::source::SourceText;

pub use context::{ContextFlags, ParseContext};
pub use features::{feature, Dialect, FeatureSet};
pub use labels::LabelTable;
pub use options::{ParserOptions, DEFAULT_MAX_DEPTH};
pub use parser::{Parser, ParserCheckpoint};
pub use tsfront_scanner::{Expected, PResult, SyntaxError};

/// Parse `source` into a compilation unit allocated in `arena`.
pub fn parse<'a>(
    arena: &'a Bump,
    source: &'a SourceText,
    options: ParserOptions,
) -> Result<CompilationUnit<'a>, SyntaxError> {
    Parser::new(arena, source, options).parse_compilation_unit()
}
