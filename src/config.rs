//! Configuration file support for edge-crop
//!
//! Supports TOML configuration files with the following search order:
//! 1. `--config <path>` - explicitly specified path
//! 2. `./edgecrop.toml` - current directory
//! 3. `~/.config/edge-crop/config.toml` - user config
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [thresholds]
//! mode_exclude = 0.1
//! row_effective_length = 12
//! column_effective_length = 0.05
//!
//! [output]
//! path = "./cropped.png"
//! threads = 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::border::ThresholdOptions;

/// Local config file name
pub const LOCAL_CONFIG_FILE: &str = "edgecrop.toml";

/// Directory under the user config dir
pub const USER_CONFIG_DIR: &str = "edge-crop";

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// File not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Threshold settings; fractions (`<= 1`) or pixel counts (`> 1`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub mode_exclude: Option<f64>,

    #[serde(default)]
    pub row_effective_length: Option<f64>,

    #[serde(default)]
    pub column_effective_length: Option<f64>,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Destination for single-image runs
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Side-by-side preview destination
    #[serde(default)]
    pub preview: Option<PathBuf>,

    /// Worker threads for directory input
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default search path
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::load_from_path(&user_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Merge with CLI arguments; CLI values take precedence
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> RunConfig {
        let thresholds = ThresholdOptions::from_raw(
            cli.mode_exclude.or(self.thresholds.mode_exclude),
            cli.row_effective_length
                .or(self.thresholds.row_effective_length),
            cli.column_effective_length
                .or(self.thresholds.column_effective_length),
        );

        RunConfig {
            thresholds,
            output: cli.output.clone().or_else(|| self.output.path.clone()),
            preview: cli.preview.clone().or_else(|| self.output.preview.clone()),
            threads: cli.threads.or(self.output.threads),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode_exclude: Option<f64>,
    pub row_effective_length: Option<f64>,
    pub column_effective_length: Option<f64>,
    pub output: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub threads: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub thresholds: ThresholdOptions,
    pub output: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub threads: Option<usize>,
}

impl RunConfig {
    /// Thread count, defaulting to the number of CPUs
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.merge_with_cli(&CliOverrides::new()).thresholds,
            ThresholdOptions::default()
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [thresholds]
            mode_exclude = 0.2
            row_effective_length = 12
            column_effective_length = 0.01

            [output]
            path = "out.png"
            preview = "preview.png"
            threads = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds.mode_exclude, Some(0.2));
        assert_eq!(config.thresholds.row_effective_length, Some(12.0));
        assert_eq!(config.output.path, Some(PathBuf::from("out.png")));
        assert_eq!(config.output.threads, Some(3));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let config = Config::from_toml(
            r#"
            [thresholds]
            mode_exclude = 0.2
            row_effective_length = 12

            [output]
            path = "file.png"
            "#,
        )
        .unwrap();

        let cli = CliOverrides {
            mode_exclude: Some(30.0),
            output: Some(PathBuf::from("cli.png")),
            ..CliOverrides::new()
        };
        let run = config.merge_with_cli(&cli);

        assert_eq!(run.thresholds.mode_exclude, 30.0);
        assert_eq!(run.thresholds.row_effective_length, 12.0);
        assert_eq!(
            run.thresholds.column_effective_length,
            crate::border::DEFAULT_COLUMN_EFFECTIVE_LENGTH
        );
        assert_eq!(run.output, Some(PathBuf::from("cli.png")));
        assert_eq!(run.preview, None);
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_toml("[thresholds]\nmode_exclude = \"wide\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = Config::load_from_path(Path::new("/nonexistent/edgecrop.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_path_and_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("edgecrop.toml");

        let mut config = Config::default();
        config.thresholds.row_effective_length = Some(8.0);
        config.output.threads = Some(2);
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_thread_count() {
        let run = RunConfig {
            threads: Some(0),
            ..RunConfig::default()
        };
        assert_eq!(run.thread_count(), 1);
        assert!(RunConfig::default().thread_count() >= 1);
    }
}
