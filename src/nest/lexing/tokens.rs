//! Token definitions for flat nested-call strings
//!
//! The tokens are defined using the logos derive macro. Whitespace between
//! tokens carries no meaning and is skipped by the lexer itself.
use logos::{Lexer, Logos};
use std::fmt;

fn call_name(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[..slice.len() - 1].to_string()
}

fn text(lex: &mut Lexer<Token>) -> String {
    lex.slice().to_string()
}

/// All possible tokens in a nested-call string
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"\s+")]
pub enum Token {
    /// A call name immediately followed by `(`; carries the name only.
    #[regex(r"\w+\(", call_name)]
    CallOpen(String),

    #[token(")")]
    CallClose,

    #[token(",")]
    Separator,

    /// A double-quoted atom, quotes and escapes kept verbatim.
    #[regex(r#""([^"\\]|\\.)*""#, text)]
    Quoted(String),

    /// Any other run of non-structural characters.
    #[regex(r#"[^\s(),"]+"#, text)]
    Atom(String),
}

impl Token {
    /// Check if this token opens a call
    pub fn is_call_open(&self) -> bool {
        matches!(self, Token::CallOpen(_))
    }

    /// Check if this token is a leaf (atom or quoted atom)
    pub fn is_leaf(&self) -> bool {
        matches!(self, Token::Atom(_) | Token::Quoted(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::CallOpen(name) => write!(f, "call '{}('", name),
            Token::CallClose => write!(f, "')'"),
            Token::Separator => write!(f, "','"),
            Token::Quoted(text) => write!(f, "quoted atom {}", text),
            Token::Atom(text) => write!(f, "atom '{}'", text),
        }
    }
}
