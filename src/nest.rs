//! Main module for nestfmt library functionality

pub mod ast;
pub mod demo;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod options;
pub mod parsing;
