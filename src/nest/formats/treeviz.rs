//! Treeviz formatter for node trees
//!
//! One line per node, nesting drawn with box connectors, 2 columns per level.
//!
//! So the format is :
//! <prefix><connector> <icon><space><label>
//!
//! Example for `Rule(A,Alt(a,ε))`:
//!
//! ƒ Rule
//! ├─ ◦ A
//! └─ ƒ Alt
//!   ├─ ◦ a
//!   └─ ε
//!
//! Icons
//!     Call: ƒ
//!     Atom: ◦
//!     Epsilon: ε (the configured symbol, no label)

use crate::nest::ast::Node;
use crate::nest::options::PrintOptions;

/// Labels longer than this are cut and suffixed with `...`.
const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn line_for(node: &Node, options: &PrintOptions) -> String {
    match node {
        Node::Call { name, .. } => format!("ƒ {}", truncate(name, MAX_LABEL_CHARS)),
        Node::Atom { name } => format!("◦ {}", truncate(name, MAX_LABEL_CHARS)),
        Node::Epsilon => options.epsilon.clone(),
    }
}

fn format_child(
    node: &Node,
    prefix: &str,
    is_last: bool,
    options: &PrintOptions,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!("{}{} {}\n", prefix, connector, line_for(node, options)));

    let children = node.children();
    if !children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        for (i, child) in children.iter().enumerate() {
            format_child(child, &child_prefix, i == children.len() - 1, options, output);
        }
    }
}

/// Render a node tree as treeviz text, one node per line.
pub fn to_treeviz_str(node: &Node, options: &PrintOptions) -> String {
    let mut output = format!("{}\n", line_for(node, options));
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        format_child(child, "", i == children.len() - 1, options, &mut output);
    }
    output
}
