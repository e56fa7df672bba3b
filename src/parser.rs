//! Parser for the filter language.
//!
//! Instead of recursive descent the parser reduces a flat working sequence
//! in place. Each slot of the sequence is either a raw token or an already
//! built node. Parenthesized groups are reduced first, recursively; then the
//! operators are reduced one precedence group at a time:
//!
//! 1. identifiers and literals become leaves
//! 2. comparisons `=` `:` `!=` `>` `>=` `<` `<=` take the neighbouring leaves
//! 3. `NOT` takes the node to its right
//! 4. `AND` and then `OR` take the nodes on both sides, left to right
//!
//! Exactly one node must remain at the end.
//!
//! [`ParseOptions::max_depth`] bounds both the parenthesis nesting and the
//! depth of the built tree, so every tree the parser returns can be dropped,
//! rendered and read back without exhausting the stack.

use std::fmt;

use crate::ast::{BinOp, Node, Token, TokenKind};

/// Default bound on parenthesis nesting and tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum parenthesis nesting, and maximum number of operators on any
    /// path from the root to a leaf. Deeper input is rejected.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Which operand of an operator an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Errors produced while building the tree. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `(` is the last token
    DanglingOpenParen { position: usize },
    /// `(` without a matching `)`
    UnbalancedParens { position: usize },
    /// `()`
    EmptySubexpression { position: usize },
    /// Operator at the start or end of its sequence
    MissingOperand { operator: TokenKind, side: Side },
    /// Operand is a token that has not been reduced, e.g. `X = NOT Y`
    NotANode {
        operator: TokenKind,
        side: Side,
        found: Token,
    },
    /// Comparison operand that is not a bare identifier or literal
    InvalidOperand { operator: TokenKind, side: Side },
    /// Parentheses or operators nested deeper than [`ParseOptions::max_depth`]
    NestingTooDeep { limit: usize },
    /// Failure inside a parenthesized group
    Subexpression(Box<ParseError>),
    /// Zero or several nodes, or a leftover token, after all reductions
    NoStartNode,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::DanglingOpenParen { position } => write!(
                f,
                "condition ends with an opening parenthesis at position {}",
                position
            ),
            ParseError::UnbalancedParens { position } => write!(
                f,
                "missing matching closing parenthesis for '(' at position {}",
                position
            ),
            ParseError::EmptySubexpression { position } => {
                write!(f, "empty subexpression found at position {}", position)
            }
            ParseError::MissingOperand { operator, side } => {
                write!(f, "missing {} parameter for {} operator", side, operator)
            }
            ParseError::NotANode {
                operator,
                side,
                found,
            } => write!(
                f,
                "{} parameter for {} operator is not a node, got: {}",
                side, operator, found
            ),
            ParseError::InvalidOperand { operator, side } => write!(
                f,
                "{} parameter for {} operator must be an identifier or a literal",
                side, operator
            ),
            ParseError::NestingTooDeep { limit } => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
            ParseError::Subexpression(inner) => {
                write!(f, "could not parse subexpression: {}", inner)
            }
            ParseError::NoStartNode => write!(f, "parse tree must have exactly one start node"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Subexpression(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

/// One element of the working sequence. Built nodes carry their depth.
#[derive(Debug)]
enum Slot {
    Token(Token),
    Node(Node, usize),
    /// Node built from a parenthesized group
    Group(Node, usize),
}

impl Slot {
    fn is_token(&self, kind: TokenKind) -> bool {
        matches!(self, Slot::Token(token) if token.kind == kind)
    }
}

pub struct Parser {
    options: ParseOptions,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParseOptions::default())
    }
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    /// Build the tree for a complete token sequence.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Node, ParseError> {
        let slots = tokens.into_iter().map(Slot::Token).collect();
        let (node, _) = self.reduce(slots, 0)?;
        Ok(node)
    }

    /// Reduce a sequence to its single node and that node's depth.
    fn reduce(&self, mut slots: Vec<Slot>, depth: usize) -> Result<(Node, usize), ParseError> {
        if depth > self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        self.reduce_groups(&mut slots, depth)?;

        let limit = self.options.max_depth;
        reduce_leaves(&mut slots);
        for op in BinOp::COMPARISONS {
            while let Some(i) = find_token(&slots, op.token_kind()) {
                reduce_binary(&mut slots, i, op, limit)?;
            }
        }
        // Rightmost first so that `NOT NOT x` nests inside out
        while let Some(i) = slots.iter().rposition(|s| s.is_token(TokenKind::Not)) {
            reduce_not(&mut slots, i, limit)?;
        }
        for op in [BinOp::And, BinOp::Or] {
            while let Some(i) = find_token(&slots, op.token_kind()) {
                reduce_binary(&mut slots, i, op, limit)?;
            }
        }

        if slots.len() != 1 {
            return Err(ParseError::NoStartNode);
        }
        match slots.pop() {
            Some(Slot::Node(node, depth)) | Some(Slot::Group(node, depth)) => Ok((node, depth)),
            _ => Err(ParseError::NoStartNode),
        }
    }

    /// Replace every `( ... )` span by the node parsed from its contents.
    fn reduce_groups(&self, slots: &mut Vec<Slot>, depth: usize) -> Result<(), ParseError> {
        while let Some(open) = find_token(slots, TokenKind::LParen) {
            let position = match &slots[open] {
                Slot::Token(token) => token.position(),
                _ => 0,
            };
            if open + 1 == slots.len() {
                return Err(ParseError::DanglingOpenParen { position });
            }

            let close = find_matching_close(slots, open)
                .ok_or(ParseError::UnbalancedParens { position })?;
            if close == open + 1 {
                return Err(ParseError::EmptySubexpression { position });
            }

            let mut inner: Vec<Slot> = slots.drain(open..=close).collect();
            inner.pop();
            inner.remove(0);

            let (node, node_depth) = match self.reduce(inner, depth + 1) {
                Ok(reduced) => reduced,
                Err(e @ ParseError::NestingTooDeep { .. }) => return Err(e),
                Err(e) => return Err(ParseError::Subexpression(Box::new(e))),
            };
            tracing::trace!(depth, %node, "reduced group");
            slots.insert(open, Slot::Group(node, node_depth));
        }
        Ok(())
    }
}

/// Build the tree with default options.
pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::default().parse(tokens)
}

/// Build the tree with explicit options.
pub fn parse_with(tokens: Vec<Token>, options: &ParseOptions) -> Result<Node, ParseError> {
    Parser::new(*options).parse(tokens)
}

fn find_token(slots: &[Slot], kind: TokenKind) -> Option<usize> {
    slots.iter().position(|s| s.is_token(kind))
}

fn find_matching_close(slots: &[Slot], open: usize) -> Option<usize> {
    let mut nesting = 0usize;
    for (i, slot) in slots.iter().enumerate().skip(open + 1) {
        if slot.is_token(TokenKind::LParen) {
            nesting += 1;
        } else if slot.is_token(TokenKind::RParen) {
            if nesting == 0 {
                return Some(i);
            }
            nesting -= 1;
        }
    }
    None
}

fn reduce_leaves(slots: &mut [Slot]) {
    for slot in slots.iter_mut() {
        let leaf = match slot {
            Slot::Token(token) if token.kind == TokenKind::Identifier => {
                Node::identifier(std::mem::take(&mut token.text))
            }
            Slot::Token(token) if token.kind == TokenKind::Literal => {
                Node::literal(std::mem::take(&mut token.text))
            }
            _ => continue,
        };
        *slot = Slot::Node(leaf, 0);
    }
}

/// Remove the slot at `index` and return it, with its depth, as an operand
/// of `operator`. Comparisons only accept bare leaves.
fn take_operand(
    slots: &mut Vec<Slot>,
    index: usize,
    operator: TokenKind,
    side: Side,
    bare_only: bool,
) -> Result<(Node, usize), ParseError> {
    if index >= slots.len() {
        return Err(ParseError::MissingOperand { operator, side });
    }
    match slots.remove(index) {
        Slot::Token(found) => Err(ParseError::NotANode {
            operator,
            side,
            found,
        }),
        Slot::Node(node, depth) if !bare_only || node.is_leaf() => Ok((node, depth)),
        Slot::Group(node, depth) if !bare_only => Ok((node, depth)),
        _ => Err(ParseError::InvalidOperand { operator, side }),
    }
}

/// Depth of a node one level above `child_depth`, if within `limit`.
fn parent_depth(child_depth: usize, limit: usize) -> Result<usize, ParseError> {
    if child_depth >= limit {
        return Err(ParseError::NestingTooDeep { limit });
    }
    Ok(child_depth + 1)
}

fn reduce_binary(
    slots: &mut Vec<Slot>,
    i: usize,
    op: BinOp,
    limit: usize,
) -> Result<(), ParseError> {
    let operator = op.token_kind();
    let bare_only = op.is_comparison();

    let (right, right_depth) = take_operand(slots, i + 1, operator, Side::Right, bare_only)?;
    if i == 0 {
        return Err(ParseError::MissingOperand {
            operator,
            side: Side::Left,
        });
    }
    let (left, left_depth) = take_operand(slots, i - 1, operator, Side::Left, bare_only)?;
    let depth = parent_depth(left_depth.max(right_depth), limit)?;

    let node = Node::binary(op, left, right);
    tracing::trace!(%node, depth, "reduced operator");
    slots[i - 1] = Slot::Node(node, depth);
    Ok(())
}

fn reduce_not(slots: &mut Vec<Slot>, i: usize, limit: usize) -> Result<(), ParseError> {
    let (child, child_depth) = take_operand(slots, i + 1, TokenKind::Not, Side::Right, false)?;
    let depth = parent_depth(child_depth, limit)?;

    let node = Node::not(child);
    tracing::trace!(%node, depth, "reduced operator");
    slots[i] = Slot::Node(node, depth);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(input: &str) -> Result<Node, ParseError> {
        parse(tokenize(input).unwrap())
    }

    #[test]
    fn test_single_comparison() {
        let tree = parse_str("X = 5").unwrap();
        assert_eq!(
            tree,
            Node::binary(BinOp::Equal, Node::identifier("X"), Node::literal("5"))
        );
    }

    #[test]
    fn test_matching_close_skips_nested_pairs() {
        let tree = parse_str("((a = 1) AND (b = 2))").unwrap();
        assert_eq!(
            tree.to_string(),
            r#"AND{EQ{ID{"a"},VAL{"1"}},EQ{ID{"b"},VAL{"2"}}}"#
        );
    }

    #[test]
    fn test_depth_limit_is_configurable() {
        let tokens = tokenize("((x = 1))").unwrap();
        let shallow = ParseOptions { max_depth: 1 };
        assert_eq!(
            parse_with(tokens.clone(), &shallow),
            Err(ParseError::NestingTooDeep { limit: 1 })
        );
        assert!(parse_with(tokens, &ParseOptions { max_depth: 2 }).is_ok());
    }
}
