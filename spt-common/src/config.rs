//! Configuration file loading and setting resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (clap also folds the matching environment variable in here)
//! 2. TOML config file
//! 3. Compiled default

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "studio-one-preset-tool";

/// Config file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Contents of the optional TOML config file
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Path to the `.song` project file
    pub in_path: Option<PathBuf>,
    /// Output directory for generated `.instrument` files
    pub out_path: Option<PathBuf>,
    /// Purge the output directory before publishing
    pub remove_existing: Option<bool>,
    /// Packaging worker count
    pub workers: Option<usize>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    ConfigFile,
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SettingSource::CommandLine => "command line",
            SettingSource::ConfigFile => "config file",
            SettingSource::Default => "default",
        };
        f.write_str(label)
    }
}

/// Default config file location for the platform
///
/// `~/.config/studio-one-preset-tool/config.toml` on Linux, the matching
/// application-support locations on macOS and Windows.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load and parse a TOML config file
///
/// Fails if the file cannot be read or does not parse.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Load the config file if one is available
///
/// An explicitly requested path must exist. The default location is optional:
/// when it is missing the compiled defaults are used.
pub fn load_optional_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        tracing::info!(path = %path.display(), "Loading config file");
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::info!(path = %path.display(), "Loading config file");
            load_toml_config(&path)
        }
        Some(path) => {
            tracing::debug!(path = %path.display(), "No config file found, using defaults");
            Ok(TomlConfig::default())
        }
        None => {
            tracing::debug!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Resolve one setting across command line, config file and default
///
/// Returns `None` only when no tier supplies a value.
pub fn resolve_setting<T>(
    name: &str,
    cli: Option<T>,
    file: Option<T>,
    default: Option<T>,
) -> Option<(T, SettingSource)> {
    let resolved = cli
        .map(|v| (v, SettingSource::CommandLine))
        .or_else(|| file.map(|v| (v, SettingSource::ConfigFile)))
        .or_else(|| default.map(|v| (v, SettingSource::Default)));

    match &resolved {
        Some((_, source)) => tracing::debug!(setting = name, %source, "Setting resolved"),
        None => tracing::debug!(setting = name, "Setting not configured"),
    }

    resolved
}
