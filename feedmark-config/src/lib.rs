//! Shared configuration loader for feedmark.
//!
//! `defaults/feedmark.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`FeedmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use feedmark_babel::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError as LoadError;

const DEFAULT_TOML: &str = include_str!("../defaults/feedmark.default.toml");

/// Name of the per-directory configuration file picked up when present.
pub const LOCAL_CONFIG_FILE: &str = "feedmark.toml";

/// Top-level configuration consumed by feedmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedmarkConfig {
    pub feed: FeedConfig,
    pub convert: ConvertConfig,
    pub display: DisplayConfig,
}

/// Feed reading.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub limit: usize,
}

/// Mirrors the knobs exposed by the HTML converter.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub max_quote_depth: usize,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            max_quote_depth: config.max_quote_depth,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub dates: DateStyle,
}

/// How publication dates are shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DateStyle {
    #[serde(rename = "relative")]
    Relative,
    #[serde(rename = "long")]
    Long,
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

    /// Apply a single key/value override; command-line flags win over every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FeedmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FeedmarkConfig, ConfigError> {
    Loader::new().build()
}
