//! Configuration management for mdvis.
//!
//! Parses `mdvis.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File format
//!
//! ```toml
//! [render]
//! gfm = true
//! math = true
//! diagrams = true
//! highlight = true
//!
//! [sanitize]
//! tags = ["mark"]
//! global_attributes = ["translate"]
//!
//! [sanitize.attributes]
//! mark = ["class"]
//!
//! [sanitize.protocols]
//! href = ["tel"]
//! ```
//!
//! The `[sanitize]` section extends the built-in schema; it can only add to
//! the allow-lists, and additions that would allow active content are
//! rejected.

use std::path::{Path, PathBuf};

use mdvis_sanitizer::{SanitizationSchema, SchemaError, SchemaExtension};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
    /// Override math flag.
    pub math: Option<bool>,
    /// Override diagram rewriting flag.
    pub diagrams: Option<bool>,
    /// Override syntax highlighting flag.
    pub highlight: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdvis.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Markdown dialect switches.
    pub render: RenderConfig,
    /// Additions to the sanitization schema.
    pub sanitize: SchemaExtension,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown dialect configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderConfig {
    /// Tables, strikethrough, task lists and bare URL and email autolinks.
    pub gfm: bool,
    /// `$inline$` and `$$display$$` math.
    pub math: bool,
    /// Mermaid code block rewriting.
    pub diagrams: bool,
    /// Class-based highlighting of fenced code with a known language.
    pub highlight: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            math: true,
            diagrams: true,
            highlight: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Schema extension allows active content.
    #[error("Sanitize configuration error: {0}")]
    Schema(#[from] SchemaError),
}

/// Require every entry of a name list to be non-empty and free of whitespace.
fn require_names<'a>(
    names: impl IntoIterator<Item = &'a String>,
    field: &str,
) -> Result<(), ConfigError> {
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{field} entries cannot be empty"
            )));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "{field} entry `{name}` cannot contain whitespace"
            )));
        }
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdvis.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(math) = settings.math {
            self.render.math = math;
        }
        if let Some(diagrams) = settings.diagrams {
            self.render.diagrams = diagrams;
        }
        if let Some(highlight) = settings.highlight {
            self.render.highlight = highlight;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        discover_from(&current)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for malformed names and
    /// `ConfigError::Schema` for additions that would allow active content.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sanitize = &self.sanitize;
        require_names(&sanitize.tags, "sanitize.tags")?;
        require_names(&sanitize.global_attributes, "sanitize.global_attributes")?;
        require_names(&sanitize.strip, "sanitize.strip")?;
        require_names(sanitize.attributes.keys(), "sanitize.attributes")?;
        for (tag, attributes) in &sanitize.attributes {
            require_names(attributes, &format!("sanitize.attributes.{tag}"))?;
        }
        require_names(sanitize.protocols.keys(), "sanitize.protocols")?;
        for (attribute, schemes) in &sanitize.protocols {
            require_names(schemes, &format!("sanitize.protocols.{attribute}"))?;
        }
        require_names(&sanitize.data_image_types, "sanitize.data_image_types")?;

        sanitize.validate()?;
        Ok(())
    }

    /// Build the sanitization schema: the default schema extended with the
    /// `[sanitize]` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Schema` if the extension allows active content.
    pub fn build_schema(&self) -> Result<SanitizationSchema, ConfigError> {
        Ok(SanitizationSchema::default().extend(&self.sanitize)?)
    }
}

/// Search for the config file in `start` and its parents.
fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
