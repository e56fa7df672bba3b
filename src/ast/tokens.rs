use std::fmt;
use std::ops::Range;

/// Kind of a lexical token.
///
/// Whitespace is recognized while scanning but never becomes a token, see
/// [`LexemeKind`](crate::lexer::LexemeKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords (case-insensitive)
    /// Logical conjunction
    ///
    /// # Examples
    /// ```text
    /// size > 10 AND owner = "root"
    /// ```
    And,

    /// Logical disjunction
    Or,

    /// Logical negation, prefix only
    ///
    /// # Examples
    /// ```text
    /// NOT name = "tmp"
    /// not (a = 1 or b = 2)
    /// ```
    Not,

    // Operands
    /// Field name: a letter followed by letters, digits, `_`, `.` or `-`
    ///
    /// # Examples
    /// ```text
    /// name
    /// file.size
    /// x-forwarded-for
    /// ```
    Identifier,

    /// Literal value
    ///
    /// Three forms are recognized. Only the quoted form is rewritten
    /// (delimiters stripped); the others are kept verbatim for the caller.
    ///
    /// # Examples
    /// ```text
    /// 10
    /// 100MB
    /// "hello world"
    /// /^err/i
    /// ```
    Literal,

    // Delimiters
    /// Left parenthesis
    LParen,

    /// Right parenthesis
    RParen,

    // Comparison
    /// Equality (`=`)
    Eq,

    /// Set/match membership (`:`)
    Set,

    /// Inequality (`!=`)
    Ne,

    /// Less than (`<`)
    Lt,

    /// Less than or equal (`<=`)
    Lte,

    /// Greater than (`>`)
    Gt,

    /// Greater than or equal (`>=`)
    Gte,
}

impl TokenKind {
    /// Short name used in token and tree renderings.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Identifier => "ID",
            TokenKind::Literal => "VAL",
            TokenKind::LParen => "LPAR",
            TokenKind::RParen => "RPAR",
            TokenKind::Eq => "EQ",
            TokenKind::Set => "SET",
            TokenKind::Ne => "NE",
            TokenKind::Lt => "LT",
            TokenKind::Lte => "LTE",
            TokenKind::Gt => "GT",
            TokenKind::Gte => "GTE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, positioned substring of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Matched text. Quoted literals have their delimiters stripped.
    pub text: String,
    /// Byte range of the full match in the original input.
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// 1-based offset of the first byte of the match.
    pub fn position(&self) -> usize {
        self.span.start + 1
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{:?}]{{{}}}", self.kind, self.text, self.position())
    }
}
