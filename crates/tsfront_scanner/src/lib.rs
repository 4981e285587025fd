//! tsfront_scanner: the lexical layer of the front end.
//!
//! [`CharCursor`] walks source text and records line starts as it goes.
//! [`Scanner`] turns it into [`Token`]s on demand, with buffered lookahead,
//! checkpoints and the parser-driven re-scans for regular expressions,
//! template continuations and composite `>` operators.

mod char_codes;
pub mod cursor;
pub mod error;
pub mod scanner;
pub mod token;

pub use cursor::{CharCursor, CursorMark};
pub use error::{CursorError, Expected, PResult, SyntaxError};
pub use scanner::{Scanner, ScannerCheckpoint};
pub use token::{NumberValue, NumericBase, NumericValue, Token, TokenValue};
