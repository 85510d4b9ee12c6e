//! Output formats for parsed node trees
//!
//! Every format turns a [`Node`] into text. The [`FormatRegistry`] looks them
//! up by name so front ends can offer a `--format` switch without knowing the
//! implementations.

pub mod reindent;
pub mod treeviz;

use crate::nest::ast::Node;
use crate::nest::error::FormatError;
use crate::nest::options::PrintOptions;
use crate::nest::parsing::parse_with;
use std::collections::BTreeMap;

pub use reindent::{format, format_with, render};
pub use treeviz::to_treeviz_str;

/// Name of the format used when none is requested.
pub const DEFAULT_FORMAT: &str = "reindent";

/// Trait for node tree output formats
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "reindent", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Serialize a node tree into text
    fn serialize(&self, node: &Node, options: &PrintOptions) -> Result<String, FormatError>;
}

/// The reindenting pretty-printer.
pub struct ReindentFormat;

impl Format for ReindentFormat {
    fn name(&self) -> &str {
        "reindent"
    }

    fn description(&self) -> &str {
        "Indented layout; calls holding only leaves stay on one line"
    }

    fn serialize(&self, node: &Node, options: &PrintOptions) -> Result<String, FormatError> {
        render(node, options)
    }
}

/// Compact single-line form with all whitespace removed.
pub struct FlatFormat;

impl Format for FlatFormat {
    fn name(&self) -> &str {
        "flat"
    }

    fn description(&self) -> &str {
        "Single line, no whitespace"
    }

    fn serialize(&self, node: &Node, options: &PrintOptions) -> Result<String, FormatError> {
        Ok(node.to_flat(&options.epsilon))
    }
}

pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "One node per line with box-drawing connectors"
    }

    fn serialize(&self, node: &Node, options: &PrintOptions) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node, options))
    }
}

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Node tree as pretty-printed JSON"
    }

    fn serialize(&self, node: &Node, _options: &PrintOptions) -> Result<String, FormatError> {
        serde_json::to_string_pretty(node).map_err(|e| FormatError::Serialization(e.to_string()))
    }
}

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Node tree as YAML"
    }

    fn serialize(&self, node: &Node, _options: &PrintOptions) -> Result<String, FormatError> {
        serde_yaml::to_string(node).map_err(|e| FormatError::Serialization(e.to_string()))
    }
}

/// Registry of output formats
///
/// If a format with the same name is registered twice, the later one wins.
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Register a format
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Iterate over registered formats in name order
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Format + 'static)> + '_ {
        self.formats.values().map(|f| f.as_ref())
    }

    /// Serialize a node tree using the specified format
    pub fn serialize(
        &self,
        node: &Node,
        format: &str,
        options: &PrintOptions,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        tracing::debug!(format = fmt.name(), "serializing node tree");
        fmt.serialize(node, options)
    }

    /// Parse a flat nested-call string and serialize it in one step
    pub fn format_source(
        &self,
        source: &str,
        format: &str,
        options: &PrintOptions,
    ) -> Result<String, FormatError> {
        // Resolve the name first so an unknown format wins over a parse error
        let fmt = self.get(format)?;
        let node = parse_with(source, options)?;
        fmt.serialize(&node, options)
    }
}

impl Default for FormatRegistry {
    /// Registry holding every built-in format.
    fn default() -> Self {
        let mut registry = FormatRegistry::new();
        registry.register(ReindentFormat);
        registry.register(FlatFormat);
        registry.register(TreevizFormat);
        registry.register(JsonFormat);
        registry.register(YamlFormat);
        registry
    }
}
