//! Property-based tests for the reindent printer
//!
//! Trees are generated directly, flattened to the compact form the external
//! serializer produces, and pushed through the printer. The properties are
//! structural:
//! - output depends only on structure, never on incidental whitespace
//! - output is balanced and indentation never exceeds depth * width
//! - leaf-only calls take one line, calls holding calls do not

use nestfmt::{format, format_with, parse, FormatError, Node, PrintOptions};
use proptest::prelude::*;

fn call_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,7}"
}

fn atom_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,5}".prop_map(Node::atom),
        "<[A-Za-z]{1,4}>".prop_map(Node::atom),
        "\"[a-z ,()]{0,6}\"".prop_map(Node::atom),
        Just(Node::Epsilon),
    ]
}

fn node_strategy() -> impl Strategy<Value = Node> {
    atom_strategy().prop_recursive(5, 48, 4, |inner| {
        (call_name_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(name, args)| Node::call(name, args))
    })
}

fn call_strategy() -> impl Strategy<Value = Node> {
    (call_name_strategy(), prop::collection::vec(node_strategy(), 0..4))
        .prop_map(|(name, args)| Node::call(name, args))
}

/// Remove whitespace outside quoted atoms.
fn strip_whitespace(text: &str) -> String {
    let mut out = String::new();
    let mut quoted = false;
    let mut escaped = false;
    for c in text.chars() {
        if quoted {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                quoted = false;
            }
        } else if c == '"' {
            quoted = true;
            out.push(c);
        } else if !c.is_whitespace() {
            out.push(c);
        }
    }
    out
}

/// Lines the printer should use: one for a collapsed node, otherwise the
/// opening line plus every argument's own lines.
fn expected_lines(node: &Node) -> usize {
    if node.is_simple() {
        1
    } else {
        1 + node.children().iter().map(expected_lines).sum::<usize>()
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_parse_recovers_generated_tree(node in node_strategy()) {
        let flat = node.to_flat("ε");
        prop_assert_eq!(parse(&flat).unwrap(), node);
    }

    #[test]
    fn test_output_is_a_fixed_point(node in node_strategy()) {
        let output = format(&node.to_flat("ε")).unwrap();
        prop_assert_eq!(format(&strip_whitespace(&output)).unwrap(), output.clone());
        prop_assert_eq!(format(&output).unwrap(), output);
    }

    #[test]
    fn test_input_whitespace_is_irrelevant(node in node_strategy(), pad in "[ \t\n]{1,3}") {
        let flat = node.to_flat("ε");
        let padded = flat.replace(',', &format!("{},{}", pad, pad)).replace('(', &format!("({}", pad));
        // quoted atoms may contain ',' and '(' themselves
        prop_assume!(!flat.contains('"'));
        prop_assert_eq!(format(&padded).unwrap(), format(&flat).unwrap());
    }

    #[test]
    fn test_output_is_balanced(node in node_strategy()) {
        let output = format(&node.to_flat("ε")).unwrap();
        let unquoted: String = strip_whitespace(&output)
            .split('"')
            .step_by(2)
            .collect();
        let opens = unquoted.matches('(').count();
        let closes = unquoted.matches(')').count();
        prop_assert_eq!(opens, closes);
        prop_assert_eq!(opens, node.call_count());
    }

    #[test]
    fn test_indentation_is_bounded(node in node_strategy(), width in 1usize..5) {
        let options = PrintOptions::new().with_indent_width(width);
        let output = format_with(&node.to_flat("ε"), &options).unwrap();
        for line in output.lines() {
            let indent = leading_spaces(line);
            prop_assert!(indent <= node.depth() * width, "line {:?} too deep", line);
            prop_assert_eq!(indent % width, 0);
        }
    }

    #[test]
    fn test_collapse_rule(node in call_strategy()) {
        let output = format(&node.to_flat("ε")).unwrap();
        let lines = output.lines().count();
        prop_assert_eq!(lines, expected_lines(&node));
        if node.is_simple() {
            prop_assert_eq!(lines, 1);
        } else {
            prop_assert!(output.lines().next().is_some_and(|first| first.ends_with('(')));
        }
    }

    #[test]
    fn test_truncated_input_is_unbalanced(node in call_strategy()) {
        let flat = node.to_flat("ε");
        let truncated = &flat[..flat.len() - 1];
        let is_unclosed = matches!(
            format(truncated),
            Err(FormatError::UnbalancedNesting { .. })
        );
        prop_assert!(is_unclosed, "{:?} was accepted", truncated);
    }
}
