//! Example-based tests for the reindent printer
//!
//! Tables of small inputs go through rstest; full grammar dumps are pinned
//! with inline insta snapshots so the layout is visible in the test itself.

use nestfmt::{format, format_with, FormatError, FormatRegistry, Imbalance, PrintOptions};
use rstest::rstest;

#[rstest]
#[case::leaf_call("A(b,c,d)", "A(b,c,d)")]
#[case::epsilon_leaf("Foo(ε)", "Foo(ε)")]
#[case::empty_call("B()", "B()")]
#[case::bare_atom("x", "x")]
#[case::bare_epsilon("ε", "ε")]
#[case::spaced_separators("A(b,   c,\n\td)", "A(b,c,d)")]
#[case::nested("A(B(),C(D(),E()))", "A(\n  B(),\n  C(\n    D(),\n    E()))")]
#[case::mixed_args("Seq(a,B(c),ε)", "Seq(\n  a,\n  B(c),\n  ε)")]
#[case::closes_stack("A(B(C(d)))", "A(\n  B(\n    C(d)))")]
#[case::quoted_terminal(r#"T("a,(b)")"#, r#"T("a,(b)")"#)]
fn test_reindent_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(format(input).unwrap(), expected);
}

#[rstest]
#[case::unclosed("A(B(", FormatError::UnbalancedNesting { offset: 4, imbalance: Imbalance::Unclosed { count: 2 } })]
#[case::extra_close("A(b))", FormatError::UnbalancedNesting { offset: 4, imbalance: Imbalance::UnmatchedClose })]
#[case::top_level_separator("a,b", FormatError::MalformedSeparator { offset: 1 })]
#[case::trailing_separator("A(b,)", FormatError::MalformedSeparator { offset: 3 })]
#[case::empty("", FormatError::EmptyInput)]
fn test_rejected_inputs(#[case] input: &str, #[case] expected: FormatError) {
    assert_eq!(format(input).unwrap_err(), expected);
}

#[test]
fn test_grammar_dump_layout() {
    let dump = "Grammar(Rule(NonTerminal(A),Alternation(Terminal(a),Terminal(b),Repetition(Terminal(c)))))";
    insta::assert_snapshot!(format(dump).unwrap(), @r"
Grammar(
  Rule(
    NonTerminal(A),
    Alternation(
      Terminal(a),
      Terminal(b),
      Repetition(
        Terminal(c)))))
");
}

#[test]
fn test_deep_left_recursion_dump() {
    let depth = 1000;
    let dump = format!("{}ε{}", "Seq(".repeat(depth), ")".repeat(depth));
    let output = format(&dump).unwrap();
    assert_eq!(output.lines().count(), depth);
    let last = output.lines().last().unwrap();
    assert_eq!(last.trim_start().len(), "Seq(ε".len() + depth);
    assert_eq!(last.len() - last.trim_start().len(), (depth - 1) * 2);
}

#[test]
fn test_grammar_dump_with_epsilon_and_wide_indent() {
    let dump = "Grammar(Rule(NonTerminal(S),Alternation(Sequence(Terminal(x),NonTerminal(S)),ε)))";
    let options = PrintOptions::new().with_indent_width(3);
    insta::assert_snapshot!(format_with(dump, &options).unwrap(), @r"
Grammar(
   Rule(
      NonTerminal(S),
      Alternation(
         Sequence(
            Terminal(x),
            NonTerminal(S)),
         ε)))
");
}

#[test]
fn test_grammar_dump_treeviz() {
    let dump = "Rule(NonTerminal(A),Alternation(a,ε))";
    let output = FormatRegistry::default()
        .format_source(dump, "treeviz", &PrintOptions::default())
        .unwrap();
    insta::assert_snapshot!(output.trim_end(), @r"
ƒ Rule
├─ ƒ NonTerminal
│ └─ ◦ A
└─ ƒ Alternation
  ├─ ◦ a
  └─ ε
");
}

#[test]
fn test_json_output_shape() {
    let output = FormatRegistry::default()
        .format_source("F(a,ε)", "json", &PrintOptions::default())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["type"], "call");
    assert_eq!(value["args"][0]["name"], "a");
    assert_eq!(value["args"][1]["type"], "epsilon");
}
