pub mod ast;
pub mod cli;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{BinOp, CanonicalError, Node, Token, TokenKind, read_canonical};
pub use error::Error;
pub use lexer::{LexError, Lexeme, LexemeKind, Lexer, tokenize};
pub use output::{to_json, to_pretty};
pub use parser::{ParseError, ParseOptions, Parser, Side, parse, parse_with};

/// Compile a filter expression into its tree.
///
/// The input is tokenized and then parsed; the first failure is returned
/// unchanged.
pub fn compile(source: &str) -> Result<Node, Error> {
    compile_with(source, &ParseOptions::default())
}

/// [`compile`] with explicit parser options.
pub fn compile_with(source: &str, options: &ParseOptions) -> Result<Node, Error> {
    tracing::debug!(source, "compiling");
    let tokens = tokenize(source)?;
    tracing::trace!(count = tokens.len(), "tokenized");
    let node = parse_with(tokens, options)?;
    tracing::debug!(%node, "compiled");
    Ok(node)
}
