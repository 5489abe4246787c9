//! Configuration loading.
//!
//! `defaults/orgscan.default.toml` is embedded into the binary so documented defaults and runtime
//! behavior stay in sync. Callers layer user files, `ORGSCAN_*` environment variables and CLI
//! overrides on top via [`Loader`] before deserializing into [`OrgscanConfig`].

use super::formats::Format;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/orgscan.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct OrgscanConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Knobs for feeding the scanner and sizing the item stream.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub chunk_size: usize,
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Format,
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

    /// Layer `ORGSCAN_SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        let source = Environment::with_prefix("ORGSCAN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
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

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<OrgscanConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<OrgscanConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.scan.chunk_size, 8192);
        assert_eq!(config.scan.channel_capacity, 100);
        assert_eq!(config.output.format, Format::Text);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("scan.chunk_size", 16_i64)
            .unwrap()
            .set_override("output.format", "json")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.scan.chunk_size, 16);
        assert_eq!(config.scan.channel_capacity, 100);
        assert_eq!(config.output.format, Format::Json);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[scan]\nchannel_capacity = 7").unwrap();
        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.scan.channel_capacity, 7);
        assert_eq!(config.scan.chunk_size, 8192);
    }

    #[test]
    fn user_file_format_is_checked_on_load() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nformat = \"yml\"").unwrap();
        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.output.format, Format::Yaml);

        let result = Loader::new()
            .set_override("output.format", "html")
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/orgscan.toml").build();
        assert!(result.is_err());
    }
}
