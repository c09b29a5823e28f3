//! Configuration management for idisk
//!
//! Settings live in a TOML file. Every key is optional; missing keys fall
//! back to the defaults below and command-line flags override both.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// idisk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display options
    #[serde(default)]
    pub general: GeneralConfig,
    /// External command locations
    #[serde(default)]
    pub commands: CommandConfig,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Unit symbol used when `-u` is not given: B, K, M, G or T
    #[serde(default = "default_unit")]
    pub unit: String,
}

/// Program names (or absolute paths) of the platform listing tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default = "default_lsblk")]
    pub lsblk: String,
    #[serde(default = "default_wmic")]
    pub wmic: String,
}

fn default_unit() -> String {
    "G".to_string()
}

fn default_lsblk() -> String {
    "lsblk".to_string()
}

fn default_wmic() -> String {
    "wmic".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            lsblk: default_lsblk(),
            wmic: default_wmic(),
        }
    }
}

impl Config {
    /// Get the default configuration directory
    ///
    /// Returns `~/.config/idisk` on Unix-like systems,
    /// or `%APPDATA%\idisk` on Windows.
    pub fn default_path() -> PathBuf {
        let config_dir = if cfg!(windows) {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        };

        config_dir.join("idisk")
    }

    /// Load configuration from the default path, or defaults if there is none
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::default_path().join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.unit, "G");
        assert_eq!(config.commands.lsblk, "lsblk");
        assert_eq!(config.commands.wmic, "wmic");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("[general]\nunit = \"M\"\n").unwrap();
        assert_eq!(config.general.unit, "M");
        assert_eq!(config.commands.lsblk, "lsblk");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.general.unit, "G");
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.commands.lsblk = "/usr/bin/lsblk".to_string();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized = Config::parse(&toml_str).unwrap();

        assert_eq!(deserialized.commands.lsblk, "/usr/bin/lsblk");
        assert_eq!(deserialized.general.unit, config.general.unit);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[commands]\nlsblk = \"/usr/bin/lsblk\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.commands.lsblk, "/usr/bin/lsblk");
        assert_eq!(config.commands.wmic, "wmic");
        assert_eq!(config.general.unit, "G");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.general.unit, "G");
        assert_eq!(config.commands.lsblk, "lsblk");
    }

    #[test]
    fn test_existing_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nunit = \"T\"\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.general.unit, "T");
        assert_eq!(config.commands.wmic, "wmic");
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            Config::parse("[general\nunit = 3"),
            Err(Error::Config(_))
        ));
    }
}
