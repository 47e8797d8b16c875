//! TOML configuration
//!
//! Read from `<config dir>/algoscope/config.toml` unless a path is given on
//! the command line. Every field has a default, so an empty file (or no file
//! at the default location) is a valid configuration.
//!
//! ```toml
//! [playback]
//! speed_ms = 800
//!
//! [hanoi]
//! disks = 4
//!
//! [two_sum]
//! numbers = [2, 7, 11, 15]
//! target = 9
//! algorithm = "hash-map"
//!
//! [fibonacci]
//! n = 6
//! method = "memoized"
//! ```

use crate::errors::InputError;
use crate::puzzles::fibonacci::Method;
use crate::puzzles::two_sum::Algorithm;
use crate::session::input::{validate_disks, validate_fibonacci, validate_speed};
use crate::session::SessionSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub hanoi: HanoiConfig,
    pub two_sum: TwoSumConfig,
    pub fibonacci: FibonacciConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Milliseconds between automatic steps (200 to 2000)
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HanoiConfig {
    #[serde(default = "default_disks")]
    pub disks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoSumConfig {
    #[serde(default = "default_numbers")]
    pub numbers: Vec<i32>,
    #[serde(default = "default_target")]
    pub target: i32,
    #[serde(default)]
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciConfig {
    #[serde(default = "default_fibonacci_n")]
    pub n: u32,
    #[serde(default)]
    pub method: Method,
}

fn default_speed_ms() -> u64 {
    1000
}

fn default_disks() -> u32 {
    3
}

fn default_numbers() -> Vec<i32> {
    vec![-5, 7, 0, 1, 9]
}

fn default_target() -> i32 {
    8
}

fn default_fibonacci_n() -> u32 {
    5
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            speed_ms: default_speed_ms(),
        }
    }
}

impl Default for HanoiConfig {
    fn default() -> Self {
        HanoiConfig {
            disks: default_disks(),
        }
    }
}

impl Default for TwoSumConfig {
    fn default() -> Self {
        TwoSumConfig {
            numbers: default_numbers(),
            target: default_target(),
            algorithm: Algorithm::default(),
        }
    }
}

impl Default for FibonacciConfig {
    fn default() -> Self {
        FibonacciConfig {
            n: default_fibonacci_n(),
            method: Method::default(),
        }
    }
}

impl Config {
    /// Returns the path to the default configuration file.
    ///
    /// Falls back to the current directory if there is no config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("algoscope").join("config.toml")
    }

    /// Loads configuration.
    ///
    /// - With an explicit `path`, the file must exist.
    /// - Otherwise the default path is used, and a missing file yields
    ///   `Config::default()`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(Config::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Reads, parses and validates one file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks every value against the same bounds interactive input uses
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |e: InputError| ConfigError::Validation {
            message: e.to_string(),
        };
        validate_speed(self.playback.speed_ms).map_err(invalid)?;
        validate_disks(self.hanoi.disks).map_err(invalid)?;
        validate_fibonacci(self.fibonacci.method, self.fibonacci.n).map_err(invalid)?;
        Ok(())
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.playback.speed_ms)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            speed: self.speed(),
            disks: self.hanoi.disks,
            numbers: self.two_sum.numbers.clone(),
            target: self.two_sum.target,
            algorithm: self.two_sum.algorithm,
            fibonacci_n: self.fibonacci.n,
            method: self.fibonacci.method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.playback.speed_ms, 1000);
        assert_eq!(config.hanoi.disks, 3);
        assert_eq!(config.two_sum.numbers, vec![-5, 7, 0, 1, 9]);
        assert_eq!(config.two_sum.target, 8);
        assert_eq!(config.two_sum.algorithm, Algorithm::BruteForce);
        assert_eq!(config.fibonacci.n, 5);
        assert_eq!(config.fibonacci.method, Method::Recursive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config(
            r#"
[two_sum]
algorithm = "hash-map"
target = 9

[fibonacci]
method = "memoized"
"#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.two_sum.algorithm, Algorithm::HashMap);
        assert_eq!(config.two_sum.target, 9);
        assert_eq!(config.two_sum.numbers, vec![-5, 7, 0, 1, 9]);
        assert_eq!(config.fibonacci.method, Method::Memoized);
        assert_eq!(config.fibonacci.n, 5);
        assert_eq!(config.hanoi.disks, 3);
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_config("");
        assert_eq!(Config::load(Some(file.path())).unwrap(), Config::default());
    }

    #[test]
    fn test_out_of_range_is_validation_error() {
        let file = write_config("[hanoi]\ndisks = 9\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));

        let file = write_config("[fibonacci]\nn = 12\n");
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(ConfigError::Validation { .. })
        ));

        let file = write_config("[playback]\nspeed_ms = 50\n");
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let file = write_config("[two_sum]\nalgorithm = \"bogo\"\n");
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_session_settings() {
        let file = write_config("[playback]\nspeed_ms = 400\n[hanoi]\ndisks = 5\n");
        let settings = Config::load(Some(file.path())).unwrap().session_settings();
        assert_eq!(settings.speed, Duration::from_millis(400));
        assert_eq!(settings.disks, 5);
    }
}
