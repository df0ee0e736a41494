//! Optional TOML configuration.
//!
//! The config file only provides defaults; CLI arguments always win.

use crate::constants::{
    APP_NAME, DEFAULT_FP_THRESHOLD_FACTOR, DEFAULT_MAX_LOAD_SECS, DEFAULT_PERCENTILE,
};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    pub defaults: DefaultsConfig,
}

/// Default detection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// False positive threshold factor.
    pub fp_threshold_factor: i32,

    /// Event detection percentile.
    pub percentile: f64,

    /// Maximum audio duration decoded per file, in seconds.
    pub max_load_secs: f32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            fp_threshold_factor: DEFAULT_FP_THRESHOLD_FACTOR,
            percentile: DEFAULT_PERCENTILE,
            max_load_secs: DEFAULT_MAX_LOAD_SECS,
        }
    }
}

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/jinglecut/`
/// - macOS: `~/Library/Application Support/jinglecut/`
/// - Windows: `%APPDATA%\jinglecut\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load configuration from the default platform-specific path.
///
/// Returns default config if no config file exists.
pub fn load_default_config() -> Result<Config> {
    config_file_path().map_or_else(|_| Ok(Config::default()), |path| load_config_file(&path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let config = load_config_file(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(
            config.defaults.fp_threshold_factor,
            DEFAULT_FP_THRESHOLD_FACTOR
        );
        assert_eq!(config.defaults.percentile, DEFAULT_PERCENTILE);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r"
[defaults]
fp_threshold_factor = 20
percentile = 99.5
"
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.defaults.fp_threshold_factor, 20);
        assert_eq!(config.defaults.percentile, 99.5);
        // Unset keys keep their defaults.
        assert_eq!(config.defaults.max_load_secs, DEFAULT_MAX_LOAD_SECS);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        assert!(load_config_file(file.path()).is_err());
    }

    #[test]
    fn test_config_file_path_ends_with_toml() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
