//! tsfront_ast: syntax-tree definitions for the tsfront front end.
//!
//! Defines the closed `SyntaxKind` tag set shared by tokens and nodes, the
//! flag types, the arena-allocated node enums and the `AstVisitor` walk.

pub mod generated;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::AstVisitor;
