use std::fmt;

use crate::ast::BinOp;

/// Abstract Syntax Tree node produced by the parser.
///
/// Leaves carry a value, `Not` carries one child and `Binary` two, left
/// operand first. Each child is owned by its parent; the caller owns the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Field name
    ///
    /// # Example
    /// ```text
    /// ID{"size"}
    /// ```
    Identifier(String),

    /// Literal value, verbatim except for stripped string quotes
    ///
    /// # Example
    /// ```text
    /// VAL{"100MB"}
    /// VAL{"/^err/i"}
    /// ```
    Literal(String),

    /// Negation (`NOT expr`)
    Not(Box<Node>),

    /// Comparison or logical connective
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn identifier(value: impl Into<String>) -> Self {
        Node::Identifier(value.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(value.into())
    }

    pub fn not(child: Node) -> Self {
        Node::Not(Box::new(child))
    }

    pub fn binary(op: BinOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Canonical kind name (`ID`, `VAL`, `NOT`, `AND`, `EQ`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Identifier(_) => "ID",
            Node::Literal(_) => "VAL",
            Node::Not(_) => "NOT",
            Node::Binary { op, .. } => op.name(),
        }
    }

    /// The carried value. Only leaves have one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Identifier(v) | Node::Literal(v) => Some(v.as_str()),
            Node::Not(_) | Node::Binary { .. } => None,
        }
    }

    /// Child nodes, left operand first.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Identifier(_) | Node::Literal(_) => vec![],
            Node::Not(child) => vec![child.as_ref()],
            Node::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.value().is_some()
    }
}

/// Canonical rendering: `KIND{child,child}`, `KIND{child}` or `KIND{"value"}`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Identifier(v) | Node::Literal(v) => write!(f, "{}{{{:?}}}", self.kind(), v),
            Node::Not(child) => write!(f, "NOT{{{}}}", child),
            Node::Binary { op, left, right } => write!(f, "{}{{{},{}}}", op, left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let tree = Node::not(Node::binary(
            BinOp::Equal,
            Node::identifier("X"),
            Node::literal("5"),
        ));

        assert_eq!(tree.kind(), "NOT");
        assert_eq!(tree.value(), None);
        assert_eq!(tree.children().len(), 1);

        let eq = tree.children()[0];
        assert_eq!(eq.kind(), "EQ");
        assert_eq!(eq.children()[0].value(), Some("X"));
        assert_eq!(eq.children()[1].value(), Some("5"));
        assert!(eq.children()[1].children().is_empty());
    }

    #[test]
    fn test_canonical_rendering_escapes_values() {
        let tree = Node::binary(
            BinOp::Set,
            Node::identifier("msg"),
            Node::literal("/a\"b/"),
        );
        assert_eq!(tree.to_string(), r#"SET{ID{"msg"},VAL{"/a\"b/"}}"#);
    }
}
