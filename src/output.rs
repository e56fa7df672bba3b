//! Human- and machine-readable renderings of a compiled tree.
//!
//! The canonical one-line form is the tree's `Display` impl. This module adds:
//!
//! - **Pretty output** via [`to_pretty()`] - the canonical form with every
//!   `{`, `}` and `,` on its own line, indented by two spaces per level
//! - **JSON output** via [`to_json()`] - a `serde_json::Value` with a `kind`
//!   and either a `value` (leaves) or `children` (operators)
//!
//! # Examples
//!
//! ```
//! use simplequery::{compile, to_pretty};
//!
//! let tree = compile("X = 5").unwrap();
//! assert_eq!(
//!     to_pretty(&tree),
//!     "EQ {\n  ID {\n    \"X\",\n  },\n  VAL {\n    \"5\",\n  },\n}"
//! );
//! ```

use serde_json::{Value, json};

use crate::ast::Node;

pub struct PrettyPrinter {
    indent_width: usize,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        PrettyPrinter::new(2)
    }
}

impl PrettyPrinter {
    pub fn new(indent_width: usize) -> Self {
        PrettyPrinter { indent_width }
    }

    pub fn print(&self, node: &Node) -> String {
        let mut out = String::new();
        self.print_node(node, 0, &mut out);
        out
    }

    fn print_node(&self, node: &Node, indent: usize, out: &mut String) {
        out.push_str(node.kind());
        out.push_str(" {\n");

        match node.value() {
            Some(value) => {
                out.push_str(&self.indent(indent + 1));
                out.push_str(&format!("{:?}", value));
                out.push_str(",\n");
            }
            None => {
                for child in node.children() {
                    out.push_str(&self.indent(indent + 1));
                    self.print_node(child, indent + 1, out);
                    out.push_str(",\n");
                }
            }
        }

        out.push_str(&self.indent(indent));
        out.push('}');
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(level * self.indent_width)
    }
}

/// Multi-line rendering with two-space indentation.
pub fn to_pretty(node: &Node) -> String {
    PrettyPrinter::default().print(node)
}

/// JSON rendering of the tree.
pub fn to_json(node: &Node) -> Value {
    match node.value() {
        Some(value) => json!({ "kind": node.kind(), "value": value }),
        None => {
            let children: Vec<Value> = node.children().into_iter().map(to_json).collect();
            json!({ "kind": node.kind(), "children": children })
        }
    }
}
