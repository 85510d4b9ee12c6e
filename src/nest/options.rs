//! Knobs shared by the parser and the printers

use crate::nest::error::FormatError;

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Default symbol for the empty production.
pub const DEFAULT_EPSILON: &str = "ε";

/// Widest indent step accepted per nesting level.
pub const MAX_INDENT_WIDTH: usize = 64;

/// Options controlling how a nested-call string is read and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces added per level of call nesting.
    pub indent_width: usize,
    /// Atom that denotes the empty production.
    pub epsilon: String,
    /// Deepest call nesting accepted before parsing fails. `None` accepts
    /// any depth.
    pub max_depth: Option<usize>,
}

impl PrintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_epsilon(mut self, epsilon: impl Into<String>) -> Self {
        self.epsilon = epsilon.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the epsilon symbol lexes as a single atom, the indent step
    /// is at most [`MAX_INDENT_WIDTH`] and a depth limit admits at least one
    /// call.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.indent_width > MAX_INDENT_WIDTH {
            return Err(FormatError::InvalidOption(format!(
                "indent_width {} exceeds the maximum of {}",
                self.indent_width, MAX_INDENT_WIDTH
            )));
        }
        if self.epsilon.is_empty() {
            return Err(FormatError::InvalidOption(
                "epsilon symbol must not be empty".to_string(),
            ));
        }
        if let Some(c) = self
            .epsilon
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '(' | ')' | ',' | '"'))
        {
            return Err(FormatError::InvalidOption(format!(
                "epsilon symbol {:?} contains reserved character {:?}",
                self.epsilon, c
            )));
        }
        if self.max_depth == Some(0) {
            return Err(FormatError::InvalidOption(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            epsilon: DEFAULT_EPSILON.to_string(),
            max_depth: None,
        }
    }
}
