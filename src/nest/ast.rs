//! The node tree a nested-call string parses into

use crate::nest::options::DEFAULT_EPSILON;
use serde::Serialize;
use std::fmt;

/// One node of a parsed nested-call expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// `name(arg, ...)`
    Call { name: String, args: Vec<Node> },
    /// A leaf name, possibly a quoted string kept verbatim.
    Atom { name: String },
    /// The empty production.
    Epsilon,
}

impl Node {
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call {
            name: name.into(),
            args,
        }
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Node::Atom { name: name.into() }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Node::Call { .. })
    }

    /// A node is simple when none of its children is a call. Leaves are
    /// trivially simple.
    pub fn is_simple(&self) -> bool {
        match self {
            Node::Call { args, .. } => !args.iter().any(Node::is_call),
            _ => true,
        }
    }

    /// Arguments of a call; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Call { args, .. } => args,
            _ => &[],
        }
    }

    /// Deepest call nesting below and including this node. Leaves are 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            if let Node::Call { args, .. } = node {
                deepest = deepest.max(level + 1);
                stack.extend(args.iter().map(|arg| (arg, level + 1)));
            }
        }
        deepest
    }

    /// Number of call nodes in this subtree.
    pub fn call_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Node::Call { args, .. } = node {
                count += 1;
                stack.extend(args);
            }
        }
        count
    }

    /// Compact single-line rendering with no whitespace at all.
    pub fn to_flat(&self, epsilon: &str) -> String {
        let mut out = String::new();
        let mut stack = vec![Flat::Node(self)];
        while let Some(step) = stack.pop() {
            match step {
                Flat::Text(c) => out.push(c),
                Flat::Node(Node::Atom { name }) => out.push_str(name),
                Flat::Node(Node::Epsilon) => out.push_str(epsilon),
                Flat::Node(Node::Call { name, args }) => {
                    out.push_str(name);
                    out.push('(');
                    stack.push(Flat::Text(')'));
                    for (i, arg) in args.iter().enumerate().rev() {
                        stack.push(Flat::Node(arg));
                        if i > 0 {
                            stack.push(Flat::Text(','));
                        }
                    }
                }
            }
        }
        out
    }
}

/// Pending work for [`Node::to_flat`].
enum Flat<'n> {
    Node(&'n Node),
    Text(char),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_flat(DEFAULT_EPSILON))
    }
}
