//! Configuration management for cardfile.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "cardfile";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "cards.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CARDFILE_";

/// Tesseract language specs look like `eng` or `jpn+eng`.
const LANGUAGES_PATTERN: &str = r"^[A-Za-z_]+(\+[A-Za-z_]+)*$";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CARDFILE_`, nested keys joined by `__`)
/// 2. TOML config file at `~/.config/cardfile/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// OCR configuration.
    pub ocr: OcrConfig,
    /// Field extraction configuration.
    pub extract: ExtractConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/cardfile/cards.db`
    pub database_path: Option<PathBuf>,
}

/// OCR-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable, looked up on `PATH` when not absolute.
    pub program: String,
    /// Tesseract language spec passed to `-l`.
    pub languages: String,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Value used for every field the OCR text does not supply.
    pub placeholder: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            program: crate::ocr::DEFAULT_PROGRAM.to_string(),
            languages: crate::ocr::DEFAULT_LANGUAGES.to_string(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            placeholder: crate::extract::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the configuration file at `path`.
    ///
    /// Unlike [`Config::load_from`], a missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// holds invalid values.
    pub fn validate_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::config_validation(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::load_from(Some(path.to_path_buf()))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.ocr.program.trim().is_empty() {
            return Err(Error::config_validation("ocr.program must not be empty"));
        }

        let languages = Regex::new(LANGUAGES_PATTERN)
            .map_err(|e| Error::config_validation(format!("bad languages pattern: {e}")))?;
        if !languages.is_match(&self.ocr.languages) {
            return Err(Error::config_validation(format!(
                "invalid ocr.languages '{}': expected codes joined by '+', e.g. jpn+eng",
                self.ocr.languages
            )));
        }

        if self.extract.placeholder.trim().is_empty() {
            return Err(Error::config_validation(
                "extract.placeholder must not be empty",
            ));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
