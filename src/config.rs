//! # Application Configuration
//!
//! YAML configuration for the `brrthooks` binary:
//!
//! ```yaml
//! http:
//!   addr: 0.0.0.0:8080
//! validation:
//!   coerce_types: false
//!   all_errors: true
//! ```
//!
//! Every section is optional. `BRRTR_ADDR` and the `BRRTR_VALIDATION_*`
//! variables (see [`ValidationSettings`]) override file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::validator::ValidationSettings;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub validation: ValidationSettings,
}

impl AppConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or has wrongly typed values.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("invalid configuration")
    }

    /// Load a configuration file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    /// Defaults plus environment overrides, for running without a file.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = env::var("BRRTR_ADDR") {
            self.http.addr = addr;
        }
        self.validation = self.validation.with_env_overrides();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_full() {
        let config = AppConfig::from_yaml(
            "http:\n  addr: 127.0.0.1:9000\nvalidation:\n  coerce_types: true\n  all_errors: false\n",
        )
        .unwrap();
        assert_eq!(config.http.addr, "127.0.0.1:9000");
        assert!(config.validation.coerce_types);
        assert!(!config.validation.all_errors);
    }

    #[test]
    fn test_from_yaml_partial_uses_defaults() {
        let config = AppConfig::from_yaml("validation:\n  coerce_types: true\n").unwrap();
        assert_eq!(config.http.addr, "0.0.0.0:8080");
        assert!(config.validation.all_errors);
    }

    #[test]
    fn test_from_yaml_rejects_bad_types() {
        assert!(AppConfig::from_yaml("validation:\n  coerce_types: sometimes\n").is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/brrthooks.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "http:\n  addr: 127.0.0.1:7000\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        if env::var("BRRTR_ADDR").is_err() {
            assert_eq!(config.http.addr, "127.0.0.1:7000");
        }
        assert_eq!(config.validation, ValidationSettings::default().with_env_overrides());
    }
}
