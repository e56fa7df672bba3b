use simplequery::cli::{CheckOptions, CheckResult, CliError, OutputFormat, execute_check, list_tokens};
use simplequery::{
    Error, LexError, Node, ParseError, ParseOptions, compile, compile_with, read_canonical, to_json,
    to_pretty,
};

fn check(expression: &str, format: OutputFormat) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        expression: Some(expression.to_string()),
        format,
        ..Default::default()
    })
}

// ============================================================================
// compile
// ============================================================================

#[test]
fn test_compile() {
    let tree = compile("size > 10MB AND owner : \"root\"").unwrap();
    assert_eq!(
        tree.to_string(),
        r#"AND{GT{ID{"size"},VAL{"10MB"}},SET{ID{"owner"},VAL{"root"}}}"#
    );
}

#[test]
fn test_compile_forwards_lex_error() {
    assert_eq!(
        compile("a = 1 & b = 2"),
        Err(Error::Lex(LexError {
            remainder: "& b = 2".to_string(),
            position: 7,
        }))
    );
}

#[test]
fn test_compile_forwards_parse_error() {
    assert_eq!(
        compile("()"),
        Err(Error::Parse(ParseError::EmptySubexpression { position: 1 }))
    );
    assert_eq!(
        compile("()").unwrap_err().to_string(),
        "empty subexpression found at position 1"
    );
}

#[test]
fn test_lex_error_wins_over_parse_error() {
    // unbalanced and unlexable: the tokenizer fails first
    assert!(matches!(compile("(a = #"), Err(Error::Lex(_))));
}

#[test]
fn test_compile_with_options() {
    let options = ParseOptions { max_depth: 0 };
    assert!(compile_with("a", &options).is_ok());
    assert_eq!(
        compile_with("(a)", &options),
        Err(Error::Parse(ParseError::NestingTooDeep { limit: 0 }))
    );
    assert_eq!(
        compile_with("a = 1", &options),
        Err(Error::Parse(ParseError::NestingTooDeep { limit: 0 }))
    );
}

#[test]
fn test_tree_is_reusable_after_compile() {
    let first = compile("a = 1").unwrap();
    let second = compile("a = 1").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.clone(), second);
}

// ============================================================================
// Canonical round trip
// ============================================================================

#[test]
fn test_canonical_form_reads_back() {
    for input in [
        "X = 5",
        "X = 5 AND Y = 6 OR Z = 7",
        "(X = 5 AND Y = 6) OR (X = 10 AND Y = 11)",
        "NOT NOT a : /x\"y/i",
        r#"path = "C:\temp""#,
    ] {
        let rendered = compile(input).unwrap().to_string();
        let reread: Node = rendered.parse().unwrap();
        assert_eq!(reread.to_string(), rendered, "Failed for input: {}", input);
    }
}

#[test]
fn test_deepest_trees_read_back() {
    let limit = ParseOptions::default().max_depth;
    let and_chain = vec!["x = 1"; limit].join(" AND ");
    let not_chain = format!("{}x", "NOT ".repeat(limit));

    for input in [and_chain, not_chain] {
        let tree = compile(&input).unwrap();
        let rendered = tree.to_string();
        let reread: Node = rendered.parse().unwrap();
        assert_eq!(reread, tree);
        assert_eq!(reread.to_string(), rendered);
    }
}

#[test]
fn test_read_back_with_custom_depth() {
    let options = ParseOptions { max_depth: 3 };
    let tree = compile_with("NOT NOT a = 1", &options).unwrap();
    let rendered = tree.to_string();
    assert_eq!(read_canonical(&rendered, &options), Ok(tree));
    assert!(read_canonical(&rendered, &ParseOptions { max_depth: 2 }).is_err());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_pretty_print() {
    let tree = compile(r#"foo < 10 AND (bar = "x" OR NOT baz = "y")"#).unwrap();
    let expected = r#"AND {
  LT {
    ID {
      "foo",
    },
    VAL {
      "10",
    },
  },
  OR {
    EQ {
      ID {
        "bar",
      },
      VAL {
        "x",
      },
    },
    NOT {
      EQ {
        ID {
          "baz",
        },
        VAL {
          "y",
        },
      },
    },
  },
}"#;
    assert_eq!(to_pretty(&tree), expected);
}

#[test]
fn test_json_output() {
    let tree = compile("a != 1").unwrap();
    assert_eq!(
        to_json(&tree),
        serde_json::json!({
            "kind": "NE",
            "children": [
                { "kind": "ID", "value": "a" },
                { "kind": "VAL", "value": "1" }
            ]
        })
    );
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_check_canonical() {
    assert_eq!(
        check("x = 1", OutputFormat::Canonical).unwrap(),
        CheckResult::Tree(r#"EQ{ID{"x"},VAL{"1"}}"#.to_string())
    );
}

#[test]
fn test_check_pretty() {
    assert_eq!(
        check("x", OutputFormat::Pretty).unwrap(),
        CheckResult::Tree("ID {\n  \"x\",\n}".to_string())
    );
}

#[test]
fn test_check_json() {
    let result = check("x", OutputFormat::Json).unwrap();
    let CheckResult::Tree(json) = result else {
        panic!("Expected a rendered tree");
    };
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "ID");
    assert_eq!(value["value"], "x");
}

#[test]
fn test_check_syntax_only() {
    let result = execute_check(&CheckOptions {
        expression: Some("a = 1 OR b = 2".to_string()),
        syntax_only: true,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(result, CheckResult::SyntaxValid);
}

#[test]
fn test_check_reports_errors() {
    let err = check("X =", OutputFormat::Canonical).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error: missing right parameter for EQ operator"
    );

    let err = check("X ~ 1", OutputFormat::Canonical).unwrap_err();
    assert!(err.to_string().starts_with("Lex error: "));
}

#[test]
fn test_check_without_expression() {
    let err = execute_check(&CheckOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("pretty".parse::<OutputFormat>(), Ok(OutputFormat::Pretty));
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert!("yaml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_list_tokens() {
    assert_eq!(
        list_tokens("a >= 1").unwrap(),
        vec![r#"ID["a"]{1}"#, r#"GTE[">="]{3}"#, r#"VAL["1"]{6}"#]
    );
}
