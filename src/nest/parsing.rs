//! Parser for nested-call strings
//!
//! Grammar:
//!
//! ```text
//! document := node EOF
//! node     := CALL_OPEN args ")" | ATOM | QUOTED
//! args     := <empty> | node ("," node)*
//! ```
//!
//! Atoms spelled like the configured epsilon symbol become [`Node::Epsilon`].
//! Malformed input is rejected with the error kind that names the actual
//! defect: a missing or extra `)` is [`FormatError::UnbalancedNesting`], a
//! `,` with no argument on one side is [`FormatError::MalformedSeparator`].
//!
//! Open calls live on an explicit stack, so nesting depth is limited only by
//! memory unless [`PrintOptions::max_depth`] sets a bound.

use crate::nest::ast::Node;
use crate::nest::error::{FormatError, Imbalance};
use crate::nest::lexing::{tokenize, Token};
use crate::nest::options::PrintOptions;
use std::ops::Range;

type Spanned = (Token, Range<usize>);

/// Parse with the default options.
pub fn parse(source: &str) -> Result<Node, FormatError> {
    parse_with(source, &PrintOptions::default())
}

/// Parse a flat nested-call string into a node tree.
pub fn parse_with(source: &str, options: &PrintOptions) -> Result<Node, FormatError> {
    options.validate()?;
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
        options,
    };
    let node = parser.document()?;
    tracing::debug!(
        depth = node.depth(),
        calls = node.call_count(),
        "parsed nested-call string"
    );
    Ok(node)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Offset reported for errors found at end of input.
    end: usize,
    options: &'a PrintOptions,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        let tokens = self.tokens;
        tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let item = self.peek();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn previous_offset(&self) -> usize {
        self.pos
            .checked_sub(2)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |(_, span)| span.start)
    }

    fn unclosed(&self, count: usize) -> FormatError {
        FormatError::UnbalancedNesting {
            offset: self.end,
            imbalance: Imbalance::Unclosed { count },
        }
    }

    fn document(&mut self) -> Result<Node, FormatError> {
        if self.tokens.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let node = self.node()?;
        match self.peek() {
            None => Ok(node),
            Some((Token::CallClose, span)) => Err(FormatError::UnbalancedNesting {
                offset: span.start,
                imbalance: Imbalance::UnmatchedClose,
            }),
            Some((Token::Separator, span)) => {
                Err(FormatError::MalformedSeparator { offset: span.start })
            }
            Some((token, span)) => Err(FormatError::UnexpectedToken {
                offset: span.start,
                found: token.to_string(),
                expected: "end of input",
            }),
        }
    }

    fn node(&mut self) -> Result<Node, FormatError> {
        let mut open: Vec<Frame<'a>> = Vec::new();

        'args: loop {
            let mut done = match self.next() {
                None => return Err(self.unclosed(open.len())),
                Some((Token::CallOpen(name), span)) => {
                    self.check_call(name, span, open.len())?;
                    if let Some((Token::CallClose, _)) = self.peek() {
                        self.pos += 1;
                        Node::call(name.as_str(), Vec::new())
                    } else {
                        open.push(Frame {
                            name,
                            args: Vec::new(),
                        });
                        continue 'args;
                    }
                }
                Some((Token::Atom(name), _)) if *name == self.options.epsilon => Node::Epsilon,
                Some((Token::Atom(name), _)) | Some((Token::Quoted(name), _)) => {
                    Node::atom(name.as_str())
                }
                Some((Token::CallClose, span)) if open.is_empty() => {
                    return Err(FormatError::UnbalancedNesting {
                        offset: span.start,
                        imbalance: Imbalance::UnmatchedClose,
                    })
                }
                // `)` right after a separator: trailing comma
                Some((Token::CallClose, _)) => {
                    return Err(FormatError::MalformedSeparator {
                        offset: self.previous_offset(),
                    })
                }
                Some((Token::Separator, span)) => {
                    return Err(FormatError::MalformedSeparator { offset: span.start })
                }
            };

            // Hand the finished node to its parent, closing every call whose
            // `)` follows directly.
            while let Some(mut frame) = open.pop() {
                frame.args.push(done);
                match self.next() {
                    Some((Token::Separator, _)) => {
                        open.push(frame);
                        continue 'args;
                    }
                    Some((Token::CallClose, _)) => done = Node::call(frame.name.as_str(), frame.args),
                    None => return Err(self.unclosed(open.len() + 1)),
                    Some((token, span)) => {
                        return Err(FormatError::UnexpectedToken {
                            offset: span.start,
                            found: token.to_string(),
                            expected: "',' or ')'",
                        })
                    }
                }
            }
            return Ok(done);
        }
    }

    /// Reject a call that may not be opened with `depth` calls already open.
    fn check_call(&self, name: &str, open: &Range<usize>, depth: usize) -> Result<(), FormatError> {
        if name == self.options.epsilon {
            return Err(FormatError::UnexpectedToken {
                offset: open.start,
                found: format!("call '{}('", name),
                expected: "epsilon as a bare atom",
            });
        }
        match self.options.max_depth {
            Some(limit) if depth >= limit => Err(FormatError::NestingTooDeep {
                offset: open.start,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// A call whose `)` has not been seen yet.
struct Frame<'a> {
    name: &'a String,
    args: Vec<Node>,
}
