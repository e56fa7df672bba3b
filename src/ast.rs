//! # simplequery - Abstract Syntax Tree
//!
//! Types shared by the lexer and parser of the filter language, and the
//! tree the parser hands to callers.
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[nodes]** - Tree nodes (leaves, negation, binary operators)
//! - **[operators]** - Binary operators (comparison and logical)
//! - **[canonical]** - Reader for the canonical tree rendering
//!
//! ## Quick Start
//!
//! ```text
//! size > 10MB AND (owner = "root" OR NOT name : /^tmp/)
//! ```
//!
//! compiles to
//!
//! ```text
//! AND{GT{ID{"size"},VAL{"10MB"}},OR{EQ{ID{"owner"},VAL{"root"}},NOT{SET{ID{"name"},VAL{"/^tmp/"}}}}}
//! ```
//!
//! ## Precedence
//!
//! From tightest to loosest: comparisons (`=`, `:`, `!=`, `<`, `<=`, `>`,
//! `>=`), `NOT`, `AND`, `OR`. Parentheses override it.
//!
//! Comparisons are atomic predicates: both sides must be a bare identifier or
//! literal, so `a = b = c` and `(a) = b` are rejected.
pub mod canonical;
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use canonical::{CanonicalError, read_canonical};
pub use nodes::Node;
pub use operators::BinOp;
pub use tokens::{Token, TokenKind};
