//! Configuration system for jsonquill.
//!
//! This module provides the configuration structure for jsonquill with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file; missing fields fall back to their defaults.
//!
//! # Example
//!
//! ```
//! use jsonquill::config::Config;
//! use jsonquill::document::DuplicateKeys;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.duplicate_keys, DuplicateKeys::Overwrite);
//!
//! // Create custom configuration
//! let strict = Config {
//!     duplicate_keys: DuplicateKeys::Reject,
//! };
//! assert!(strict.parse_document(r#"{"a": 1, "a": 2}"#).is_err());
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::document::{DuplicateKeys, JsonValue, ObjectBuilder};

/// Configuration for jsonquill.
///
/// # Fields
///
/// * `duplicate_keys` - What happens when an object gets the same key twice:
///   `"overwrite"` (last value wins) or `"reject"` (error). Default: `"overwrite"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Duplicate object key policy
    #[serde(default)]
    pub duplicate_keys: DuplicateKeys,
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|error| {
            tracing::warn!(path = %config_path.display(), "{:#}; using defaults", error);
            Self::default()
        })
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to an explicit file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Returns an object builder that applies this configuration's key policy.
    pub fn object_builder(&self) -> ObjectBuilder {
        ObjectBuilder::new(self.duplicate_keys)
    }

    /// Parses JSON text under this configuration's key policy.
    pub fn parse_document(&self, text: &str) -> Result<JsonValue, serde_json::Error> {
        JsonValue::from_json_str(text, self.duplicate_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_default() {
        let config = Config::default();
        assert_eq!(config.duplicate_keys, DuplicateKeys::Overwrite);
    }

    #[test]
    fn test_object_builder_uses_policy() {
        let config = Config {
            duplicate_keys: DuplicateKeys::Reject,
        };
        let mut builder = config.object_builder();
        builder.insert("k", 1).unwrap();
        assert!(builder.insert("k", 2).is_err());
    }

    #[test]
    fn test_config_path_location() {
        if let Some(path) = Config::config_path() {
            assert!(path.ends_with(".config/jsonquill/config.toml"));
        }
    }
}
