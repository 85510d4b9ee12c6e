//! Lexer module for nested-call strings
//!
//! Tokenization is handled entirely by logos; this module only attaches spans
//! and turns logos' unit error into a [`FormatError`] pointing at the offending
//! text.

pub mod tokens;

pub use tokens::Token;

use crate::nest::error::FormatError;
use logos::Logos;
use std::ops::Range;

/// Tokenize a string, keeping the byte span of every token.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, FormatError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(FormatError::InvalidCharacter {
                    offset: lexer.span().start,
                    found: lexer.slice().to_string(),
                })
            }
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized nested-call string");
    Ok(tokens)
}
