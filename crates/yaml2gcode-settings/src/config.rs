//! Configuration for yaml2gcode
//!
//! Settings are read from a `.toml` or `.json` file. The default location is
//! `<config dir>/yaml2gcode/config.toml`; command-line flags override
//! whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use yaml2gcode_macros::{EmitterOptions, DEFAULT_INDENT_UNIT, DEFAULT_TRAILER};

use crate::error::{SettingsError, SettingsResult};

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File written when no output path is given
    pub default_file: PathBuf,
    /// Indentation for one level of macro nesting
    pub indent_unit: String,
    /// Trailer written when the input has no `finish` block
    pub default_trailer: String,
    /// Treat inline diagnostics as fatal
    pub strict: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from("out.nc"),
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            default_trailer: DEFAULT_TRAILER.to_string(),
            strict: false,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yaml2gcode").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the default config file if it exists, defaults otherwise
    pub fn load_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let output = &self.output;

        if output.indent_unit.is_empty() || !output.indent_unit.chars().all(char::is_whitespace) {
            return Err(SettingsError::InvalidSetting {
                key: "output.indent_unit".to_string(),
                reason: "must be non-empty whitespace".to_string(),
            });
        }

        if output.default_trailer.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.default_trailer".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if output.default_file.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.default_file".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Emitter options derived from these settings
    pub fn emitter_options(&self) -> EmitterOptions {
        EmitterOptions {
            indent_unit: self.output.indent_unit.clone(),
            default_trailer: self.output.default_trailer.clone(),
            strict: self.output.strict,
        }
    }
}
