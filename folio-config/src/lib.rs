//! Shared configuration loader for the folio toolchain.
//!
//! `defaults/folio.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`FolioConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use folio_babel::{ElementTable, FormatError, HtmlTables};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Optional configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "folio.toml";

/// Top-level configuration consumed by folio applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    pub html: HtmlTablesConfig,
    pub convert: ConvertConfig,
}

/// Lookup tables for the HTML codec.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlTablesConfig {
    pub elements: Vec<ElementEntry>,
    pub block_elements: Vec<String>,
    pub inline_elements: Vec<String>,
    pub marks: Vec<MarkEntry>,
    pub image_type: String,
}

/// One `elements` row: an element key and its semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkEntry {
    pub tag: String,
    pub mark: String,
}

impl TryFrom<&HtmlTablesConfig> for HtmlTables {
    type Error = FormatError;

    fn try_from(config: &HtmlTablesConfig) -> Result<Self, Self::Error> {
        let elements = ElementTable::new(
            config
                .elements
                .iter()
                .map(|entry| (entry.key.as_str(), entry.kind.as_str())),
        )?;
        Ok(HtmlTables::default()
            .with_elements(elements)
            .with_block_elements(&config.block_elements)
            .with_inline_elements(&config.inline_elements)
            .with_mark_elements(
                config
                    .marks
                    .iter()
                    .map(|entry| (entry.tag.as_str(), entry.mark.as_str())),
            )
            .with_image_type(config.image_type.as_str()))
    }
}

impl TryFrom<HtmlTablesConfig> for HtmlTables {
    type Error = FormatError;

    fn try_from(config: HtmlTablesConfig) -> Result<Self, Self::Error> {
        HtmlTables::try_from(&config)
    }
}

/// Conversion defaults for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub default_to: String,
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
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

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FolioConfig, ConfigError> {
    Loader::new().build()
}
