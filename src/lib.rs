//! # nestfmt
//!
//! A re-indenting pretty-printer for flat nested-call dumps such as
//! `Grammar(Rule(A,Alternation(a,b,Repetition(c))))`.
//!
//! The flat string is lexed, parsed into an explicit [`Node`] tree and then
//! rendered. Calls whose arguments are all leaves stay on one line; calls
//! holding another call are broken over several lines with structural
//! indentation:
//!
//! ```text
//! A(B(),C(D(),E()))   =>   A(
//!                            B(),
//!                            C(
//!                              D(),
//!                              E()))
//! ```
//!
//! File Layout
//!
//! src/nest
//!   ├── lexing      logos tokens and span-preserving tokenization
//!   ├── parsing     recursive descent into the node tree
//!   ├── ast         the node tree and its queries
//!   ├── formats     the reindent printer plus the other output formats
//!   └── demo        pipeline adapter around external grammar collaborators

pub mod nest;

pub use nest::ast::Node;
pub use nest::error::{FormatError, Imbalance};
pub use nest::formats::reindent::{format, format_with, render};
pub use nest::formats::{Format, FormatRegistry};
pub use nest::options::PrintOptions;
pub use nest::parsing::{parse, parse_with};
