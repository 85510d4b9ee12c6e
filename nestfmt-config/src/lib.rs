//! Shared configuration loader for the nestfmt toolchain.
//!
//! `defaults/nestfmt.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`NestfmtConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use nestfmt::nest::demo::ExternalToolkit;
use nestfmt::{FormatRegistry, PrintOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/nestfmt.default.toml");

/// Top-level configuration consumed by nestfmt applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NestfmtConfig {
    pub printer: PrinterConfig,
    pub output: OutputConfig,
    pub collaborators: CollaboratorsConfig,
}

/// Mirrors the knobs exposed by the printer.
#[derive(Debug, Clone, Deserialize)]
pub struct PrinterConfig {
    pub indent_width: usize,
    pub epsilon: String,
    /// Unset means no limit.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl PrinterConfig {
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions::new()
            .with_indent_width(self.indent_width)
            .with_epsilon(self.epsilon.clone())
            .with_max_depth(self.max_depth)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// Argv lists of the external grammar routines. Empty means unconfigured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollaboratorsConfig {
    pub normalizer: Vec<String>,
    pub serializer: Vec<String>,
    pub structure_parser: Vec<String>,
    pub ll1_checker: Vec<String>,
}

impl CollaboratorsConfig {
    /// Toolkit that runs the configured commands.
    pub fn toolkit(&self) -> ExternalToolkit {
        ExternalToolkit {
            normalizer: self.normalizer.clone(),
            serializer: self.serializer.clone(),
            structure_parser: self.structure_parser.clone(),
            ll1_checker: self.ll1_checker.clone(),
        }
    }
}

impl NestfmtConfig {
    /// Reject values the printer or the format registry would refuse later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.printer
            .print_options()
            .validate()
            .map_err(|e| ConfigError::Message(format!("printer: {}", e)))?;

        let registry = FormatRegistry::default();
        if !registry.has(&self.output.format) {
            return Err(ConfigError::Message(format!(
                "output.format '{}' is not one of: {}",
                self.output.format,
                registry.list_formats().join(", ")
            )));
        }
        Ok(())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<NestfmtConfig, ConfigError> {
        let config: NestfmtConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NestfmtConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.printer.indent_width, 2);
        assert_eq!(config.printer.epsilon, "ε");
        assert_eq!(config.printer.max_depth, None);
        assert_eq!(config.output.format, "reindent");
        assert!(config.collaborators.serializer.is_empty());
        assert_eq!(config.printer.print_options(), PrintOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("printer.indent_width", 4_i64)
            .expect("override to apply")
            .set_override("output.format", "treeviz")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.printer.indent_width, 4);
        assert_eq!(config.output.format, "treeviz");
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[printer]\nepsilon = \"EPS\"\n\n[collaborators]\nserializer = [\"ebnf\", \"--nested\"]"
        )
        .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.printer.epsilon, "EPS");
        assert_eq!(config.printer.indent_width, 2);
        assert_eq!(config.collaborators.serializer, vec!["ebnf", "--nested"]);
        assert_eq!(
            config.collaborators.toolkit().serializer,
            vec!["ebnf", "--nested"]
        );
        assert!(config.collaborators.toolkit().normalizer.is_empty());
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/nestfmt.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "reindent");
    }

    #[test]
    fn required_file_must_exist() {
        assert!(Loader::new()
            .with_file("/definitely/not/here/nestfmt.toml")
            .build()
            .is_err());
    }

    #[test]
    fn rejects_bad_epsilon() {
        let err = Loader::new()
            .set_override("printer.epsilon", "a b")
            .expect("override to apply")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("printer: invalid print options"));
    }

    #[test]
    fn max_depth_is_opt_in() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[printer]\nmax_depth = 8").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.printer.max_depth, Some(8));
        assert_eq!(config.printer.print_options().max_depth, Some(8));
    }

    #[test]
    fn rejects_huge_indent_width() {
        let err = Loader::new()
            .set_override("printer.indent_width", i64::MAX)
            .expect("override to apply")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("indent_width"));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Loader::new()
            .set_override("output.format", "xml")
            .expect("override to apply")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("output.format 'xml'"));
    }
}
