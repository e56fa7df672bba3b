//! Compile an expression and render its tree

use std::fmt;
use std::str::FromStr;

use super::CliError;
use crate::{ParseOptions, compile_with, to_json, to_pretty};

/// How the check command prints the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One-line canonical form, `EQ{ID{"x"},VAL{"1"}}`
    #[default]
    Canonical,
    /// Canonical form spread over indented lines
    Pretty,
    /// JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(OutputFormat::Canonical),
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{}' (expected canonical, pretty or json)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Canonical => write!(f, "canonical"),
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter expression to compile
    pub expression: Option<String>,
    /// Output format for the tree
    pub format: OutputFormat,
    /// Only validate syntax, don't print the tree
    pub syntax_only: bool,
    /// Parser configuration
    pub parse_options: ParseOptions,
}

/// Result of a check operation
#[derive(Debug, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rendered tree
    Tree(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = options.expression.as_deref().ok_or(CliError::NoInput)?;
    let tree = compile_with(expression, &options.parse_options)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let rendered = match options.format {
        OutputFormat::Canonical => tree.to_string(),
        OutputFormat::Pretty => to_pretty(&tree),
        OutputFormat::Json => serde_json::to_string_pretty(&to_json(&tree))?,
    };
    Ok(CheckResult::Tree(rendered))
}
