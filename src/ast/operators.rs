use std::fmt;

use crate::ast::TokenKind;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Comparison
    /// Equal (`=`)
    Equal,
    /// Set/match (`:`)
    Set,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Logical
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl BinOp {
    /// Comparison operators in the order the parser resolves them.
    pub const COMPARISONS: [BinOp; 7] = [
        BinOp::Equal,
        BinOp::Set,
        BinOp::NotEqual,
        BinOp::GreaterThan,
        BinOp::GreaterEqual,
        BinOp::LessThan,
        BinOp::LessEqual,
    ];

    pub fn name(self) -> &'static str {
        self.token_kind().name()
    }

    pub fn is_comparison(self) -> bool {
        !matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            BinOp::Equal => TokenKind::Eq,
            BinOp::Set => TokenKind::Set,
            BinOp::NotEqual => TokenKind::Ne,
            BinOp::LessThan => TokenKind::Lt,
            BinOp::LessEqual => TokenKind::Lte,
            BinOp::GreaterThan => TokenKind::Gt,
            BinOp::GreaterEqual => TokenKind::Gte,
            BinOp::And => TokenKind::And,
            BinOp::Or => TokenKind::Or,
        }
    }

    pub fn from_name(name: &str) -> Option<BinOp> {
        match name {
            "EQ" => Some(BinOp::Equal),
            "SET" => Some(BinOp::Set),
            "NE" => Some(BinOp::NotEqual),
            "LT" => Some(BinOp::LessThan),
            "LTE" => Some(BinOp::LessEqual),
            "GT" => Some(BinOp::GreaterThan),
            "GTE" => Some(BinOp::GreaterEqual),
            "AND" => Some(BinOp::And),
            "OR" => Some(BinOp::Or),
            _ => None,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
