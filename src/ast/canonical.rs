//! Reader for the canonical tree rendering produced by `Display for Node`.
//!
//! ```text
//! OR{AND{EQ{ID{"X"},VAL{"5"}},EQ{ID{"Y"},VAL{"6"}}},EQ{ID{"Z"},VAL{"7"}}}
//! ```
//!
//! Reading a rendering and displaying the result gives back the same string.
//! Trees are read under the same depth bound as the parser builds them, so
//! anything [`compile_with`](crate::compile_with) returns reads back with the
//! same [`ParseOptions`].

use std::fmt;
use std::str::FromStr;

use crate::ast::{BinOp, Node};
use crate::parser::ParseOptions;

/// Error reading a canonical tree rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalError {
    /// 1-based character offset
    pub position: usize,
    pub message: String,
}

impl fmt::Display for CanonicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for CanonicalError {}

struct Reader {
    input: Vec<char>,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl Reader {
    fn new(input: &str, max_depth: usize) -> Self {
        Reader {
            input: input.chars().collect(),
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, message: impl Into<String>) -> CanonicalError {
        CanonicalError {
            position: self.position + 1,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), CanonicalError> {
        match self.current_char() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn read_kind(&mut self) -> String {
        let mut kind = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_uppercase() {
                kind.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        kind
    }

    fn read_string(&mut self) -> Result<String, CanonicalError> {
        self.expect('"')?;
        let mut result = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    let escaped = match self.current_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('u') => {
                            self.advance();
                            self.read_unicode_escape()?
                        }
                        Some(ch) => return Err(self.error(format!("invalid escape sequence \\{}", ch))),
                        None => return Err(self.error("unterminated string")),
                    };
                    // \u{..} leaves the cursor on the closing brace
                    result.push(escaped);
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.error("unterminated string"))
    }

    fn read_unicode_escape(&mut self) -> Result<char, CanonicalError> {
        self.expect('{')?;
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '}' {
                break;
            }
            digits.push(ch);
            self.advance();
        }
        if self.current_char() != Some('}') {
            return Err(self.error("unterminated unicode escape"));
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid unicode escape \\u{{{}}}", digits)))
    }

    fn read_node(&mut self) -> Result<Node, CanonicalError> {
        // `depth` counts the operators above this node
        if self.depth > self.max_depth {
            return Err(self.error(format!(
                "tree nesting exceeds the maximum depth of {}",
                self.max_depth
            )));
        }
        self.depth += 1;

        let kind = self.read_kind();
        self.expect('{')?;
        let node = match kind.as_str() {
            "ID" => Node::Identifier(self.read_string()?),
            "VAL" => Node::Literal(self.read_string()?),
            "NOT" => Node::not(self.read_node()?),
            other => {
                let op = BinOp::from_name(other)
                    .ok_or_else(|| self.error(format!("unknown node kind '{}'", other)))?;
                let left = self.read_node()?;
                self.expect(',')?;
                let right = self.read_node()?;
                Node::binary(op, left, right)
            }
        };
        self.expect('}')?;

        self.depth -= 1;
        Ok(node)
    }
}

/// Read a canonical rendering, bounding its depth by `options.max_depth`.
pub fn read_canonical(input: &str, options: &ParseOptions) -> Result<Node, CanonicalError> {
    let mut reader = Reader::new(input, options.max_depth);
    let node = reader.read_node()?;
    if reader.current_char().is_some() {
        return Err(reader.error("trailing input after tree"));
    }
    Ok(node)
}

impl FromStr for Node {
    type Err = CanonicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_canonical(s, &ParseOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_nested_tree() {
        let tree: Node = r#"NOT{AND{EQ{ID{"X"},VAL{"10"}},GTE{ID{"Y"},VAL{"11"}}}}"#
            .parse()
            .unwrap();

        assert_eq!(
            tree,
            Node::not(Node::binary(
                BinOp::And,
                Node::binary(BinOp::Equal, Node::identifier("X"), Node::literal("10")),
                Node::binary(BinOp::GreaterEqual, Node::identifier("Y"), Node::literal("11")),
            ))
        );
    }

    #[test]
    fn test_read_escaped_value() {
        let tree: Node = r#"VAL{"a\"b\\c\n\u{7f}"}"#.parse().unwrap();
        assert_eq!(tree, Node::literal("a\"b\\c\n\u{7f}"));
        assert_eq!(tree.to_string(), r#"VAL{"a\"b\\c\n\u{7f}"}"#);
    }

    #[test]
    fn test_unknown_kind() {
        let err = r#"XOR{ID{"a"},ID{"b"}}"#.parse::<Node>().unwrap_err();
        assert_eq!(err.message, "unknown node kind 'XOR'");
    }

    #[test]
    fn test_trailing_input() {
        let err = r#"ID{"a"}ID{"b"}"#.parse::<Node>().unwrap_err();
        assert_eq!(err.position, 8);
    }

    fn not_chain(depth: usize) -> String {
        format!("{}ID{{\"x\"}}{}", "NOT{".repeat(depth), "}".repeat(depth))
    }

    #[test]
    fn test_depth_limit() {
        let limit = ParseOptions::default().max_depth;
        assert!(not_chain(limit).parse::<Node>().is_ok());

        let err = not_chain(limit + 1).parse::<Node>().unwrap_err();
        assert_eq!(
            err.message,
            format!("tree nesting exceeds the maximum depth of {}", limit)
        );
    }

    #[test]
    fn test_depth_limit_follows_options() {
        let options = ParseOptions { max_depth: 2 };
        assert!(read_canonical(&not_chain(2), &options).is_ok());
        assert!(read_canonical(&not_chain(3), &options).is_err());
    }
}
