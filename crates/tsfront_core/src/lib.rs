//! tsfront_core: Core utilities for the tsfront JavaScript/TypeScript front end.
//!
//! Provides source units, text ranges and positions, the line map, and
//! string interning used by the scanner and parser.

pub mod intern;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use source::{SourceError, SourceId, SourceText};
pub use text::{LineAndColumn, LineMap, PartialRange, Position, TextPos, TextRange, TextSpan};
