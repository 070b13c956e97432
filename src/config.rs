//! Configuration file.
//!
//! Every field has a default, so a missing file or a partial file both
//! work. Command-line flags override what is loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::reducer::ReducerMode;
use crate::types::{FormVariant, OutputFormat};

/// Config file name within the app's config directory.
const CONFIG_FILENAME: &str = "config.toml";

/// Application name, used for config and data directories.
pub const APP_DIR: &str = "profile-form";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Form variant used when `--variant` is not given.
    pub variant: FormVariant,
    /// Reject unknown fields and mismatched payloads.
    pub strict: bool,
    /// Output format for submissions.
    pub format: OutputFormat,
    pub log_level: LogLevel,
    /// Log destination for the interactive form. Defaults to a file in
    /// the data directory.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn reducer_mode(&self) -> ReducerMode {
        if self.strict { ReducerMode::Strict } else { ReducerMode::Lenient }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Default config location: `<config dir>/profile-form/config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Load the config from its default location.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path`. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.variant, FormVariant::Employee);
        assert_eq!(config.reducer_mode(), ReducerMode::Lenient);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "variant = \"profile\"\nstrict = true\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.variant, FormVariant::Profile);
        assert_eq!(config.reducer_mode(), ReducerMode::Strict);
        assert_eq!(config.format, OutputFormat::Human);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn full_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "variant = \"employee\"\nformat = \"json\"\nlog_level = \"debug\"\nlog_file = \"/tmp/form.log\"\n",
        )
        .unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/form.log")));
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "variant = \"manager\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn log_level_maps_to_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    }
}
