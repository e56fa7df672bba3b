//! Dump the token stream of an expression

use super::CliError;
use crate::tokenize;

/// Tokenize `expression` and render one token per line,
/// e.g. `ID["foo"]{1}`.
pub fn list_tokens(expression: &str) -> Result<Vec<String>, CliError> {
    let tokens = tokenize(expression)?;
    Ok(tokens.iter().map(|t| t.to_string()).collect())
}
