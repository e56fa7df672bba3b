//! Tokenizer for the filter language.
//!
//! Input is consumed front to back. At each step the rules below are tried
//! in order against the remaining input and the first one that matches a
//! non-empty prefix wins.
//!
//! Keywords are tried before identifiers, so an identifier that starts with
//! `and`, `or` or `not` (any case) is split: `andrew` lexes as `AND` followed
//! by `ID["rew"]`. Avoid such field names.

use std::fmt;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Token, TokenKind};

/// What a lexer rule produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
    /// Skipped, never turned into a token
    Whitespace,
    Token(TokenKind),
}

/// A matched span of the input, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub span: Range<usize>,
}

/// Lexer rules in priority order. `<=` and `>=` must precede `<` and `>`.
const RULE_PATTERNS: &[(LexemeKind, &str)] = &[
    (LexemeKind::Whitespace, r"^[\t\n\x0C\r ]+"),
    (LexemeKind::Token(TokenKind::Eq), r"^="),
    (LexemeKind::Token(TokenKind::Set), r"^:"),
    (LexemeKind::Token(TokenKind::Ne), r"^!="),
    (LexemeKind::Token(TokenKind::Lte), r"^<="),
    (LexemeKind::Token(TokenKind::Lt), r"^<"),
    (LexemeKind::Token(TokenKind::Gte), r"^>="),
    (LexemeKind::Token(TokenKind::Gt), r"^>"),
    (LexemeKind::Token(TokenKind::And), r"^(?i)and"),
    (LexemeKind::Token(TokenKind::Or), r"^(?i)or"),
    (LexemeKind::Token(TokenKind::Not), r"^(?i)not"),
    (LexemeKind::Token(TokenKind::Identifier), r"^[A-Za-z][A-Za-z0-9_.-]*"),
    (
        LexemeKind::Token(TokenKind::Literal),
        r#"^(?:[0-9][A-Za-z0-9_.-]*|"[^"]*"|/[^/]*/[a-z]*)"#,
    ),
    (LexemeKind::Token(TokenKind::LParen), r"^\("),
    (LexemeKind::Token(TokenKind::RParen), r"^\)"),
];

static RULES: Lazy<Vec<(LexemeKind, Regex)>> = Lazy::new(|| {
    RULE_PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("valid lexer rule")))
        .collect()
});

/// No lexer rule matches the remaining input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Unconsumed input starting at the offending character
    pub remainder: String,
    /// 1-based offset of the remainder in the original input
    pub position: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected token in condition at position {}: {:?}",
            self.position, self.remainder
        )
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Byte offset of the next unconsumed character.
    pub fn offset(&self) -> usize {
        self.position
    }

    /// Match the next span, whitespace included. `Ok(None)` at end of input.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexError> {
        let remaining = &self.input[self.position..];
        if remaining.is_empty() {
            return Ok(None);
        }

        for (kind, regex) in RULES.iter() {
            if let Some(m) = regex.find(remaining) {
                if m.is_empty() {
                    continue;
                }
                let span = self.position..self.position + m.end();
                self.position = span.end;
                tracing::trace!(?kind, ?span, "lexeme");
                return Ok(Some(Lexeme { kind: *kind, span }));
            }
        }

        Err(LexError {
            remainder: remaining.to_string(),
            position: self.position + 1,
        })
    }

    /// Next token, skipping whitespace. `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        while let Some(lexeme) = self.next_lexeme()? {
            if let LexemeKind::Token(kind) = lexeme.kind {
                let matched = &self.input[lexeme.span.clone()];
                let text = match kind {
                    TokenKind::Literal if is_quoted(matched) => &matched[1..matched.len() - 1],
                    _ => matched,
                };
                return Ok(Some(Token::new(kind, text, lexeme.span)));
            }
        }
        Ok(None)
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Split `input` into tokens. Whitespace is dropped; positions refer to
/// `input`. Either every token is returned or the first error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[test]
fn test_keywords() {
    let tokens = tokenize("and OR Not").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::And, TokenKind::Or, TokenKind::Not]);
    assert_eq!(tokens[1].text, "OR");
}

#[test]
fn test_comparison() {
    let mut lexer = Lexer::new("size>=10");
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::new(TokenKind::Identifier, "size", 0..4))
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::new(TokenKind::Gte, ">=", 4..6))
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::new(TokenKind::Literal, "10", 6..8))
    );
    assert_eq!(lexer.next_token().unwrap(), None);
}

#[test]
fn test_every_rule_compiles() {
    assert_eq!(RULES.len(), RULE_PATTERNS.len());
    for ((kind, regex), (expected, pattern)) in RULES.iter().zip(RULE_PATTERNS) {
        assert_eq!(kind, expected);
        assert_eq!(regex.as_str(), *pattern);
    }
}
