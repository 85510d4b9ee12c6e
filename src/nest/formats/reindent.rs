//! Reindenting pretty-printer
//!
//! Reflows a flat nested-call string into an indented, selectively collapsed
//! layout. The decision is local to each call:
//!
//! - a call whose arguments are all leaves (atoms, epsilon, or nothing) is
//!   printed on one line: `Rule(A,b,ε)`;
//! - a call holding at least one call puts every argument on its own line,
//!   indented one level deeper than the call itself, with the `,` ending the
//!   previous argument and the closing `)` glued to the last one.
//!
//! ```text
//! A(
//!   B(),
//!   C(
//!     D(),
//!     E()))
//! ```
//!
//! Indentation is always `depth * indent_width` where depth counts the calls
//! still open at that point in the input, so it never goes negative and every
//! increment has its matching `)`.

use crate::nest::ast::Node;
use crate::nest::error::FormatError;
use crate::nest::options::PrintOptions;
use crate::nest::parsing::parse_with;

/// Format with the default options (2-space indent, `ε` as epsilon).
pub fn format(source: &str) -> Result<String, FormatError> {
    format_with(source, &PrintOptions::default())
}

/// Parse and render a flat nested-call string.
pub fn format_with(source: &str, options: &PrintOptions) -> Result<String, FormatError> {
    let node = parse_with(source, options)?;
    render(&node, options)
}

/// Render an already parsed tree.
pub fn render(node: &Node, options: &PrintOptions) -> Result<String, FormatError> {
    options.validate()?;
    let mut printer = Printer {
        out: String::new(),
        options,
    };
    printer.write_node(node)?;
    Ok(printer.out)
}

/// Pending output, popped in order.
enum Step<'n> {
    Node { node: &'n Node, depth: usize },
    Break { depth: usize },
    Text(char),
}

struct Printer<'a> {
    out: String,
    options: &'a PrintOptions,
}

impl Printer<'_> {
    fn write_node(&mut self, root: &Node) -> Result<(), FormatError> {
        let mut pending = vec![Step::Node {
            node: root,
            depth: 0,
        }];
        while let Some(step) = pending.pop() {
            match step {
                Step::Text(c) => self.out.push(c),
                Step::Break { depth } => self.newline(depth)?,
                Step::Node { node, depth } => match node {
                    Node::Atom { name } => self.out.push_str(name),
                    Node::Epsilon => self.out.push_str(&self.options.epsilon),
                    Node::Call { name, args } => {
                        self.out.push_str(name);
                        self.out.push('(');
                        let collapsed = node.is_simple();
                        tracing::trace!(call = %name, depth, collapsed, "rendering call");
                        pending.push(Step::Text(')'));
                        for (i, arg) in args.iter().enumerate().rev() {
                            pending.push(Step::Node {
                                node: arg,
                                depth: depth + 1,
                            });
                            if !collapsed {
                                pending.push(Step::Break { depth: depth + 1 });
                            }
                            if i > 0 {
                                pending.push(Step::Text(','));
                            }
                        }
                    }
                },
            }
        }
        Ok(())
    }

    fn newline(&mut self, depth: usize) -> Result<(), FormatError> {
        let width = depth
            .checked_mul(self.options.indent_width)
            .ok_or_else(|| {
                FormatError::InvalidOption(format!(
                    "indentation for depth {} overflows with indent_width {}",
                    depth, self.options.indent_width
                ))
            })?;
        self.out.push('\n');
        self.out.extend(std::iter::repeat(' ').take(width));
        Ok(())
    }
}
