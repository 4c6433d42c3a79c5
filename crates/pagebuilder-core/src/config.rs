//! Builder configuration.

use crate::export::ExportOptions;
use crate::snap::GRID_SIZE;
use crate::storage::PROJECT_KEY;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default pointer travel (in pixels) before a press becomes a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 4.0;
/// Default element width used when none is stored.
pub const DEFAULT_ELEMENT_WIDTH: f64 = 100.0;
/// Default element height used when none is stored.
pub const DEFAULT_ELEMENT_HEIGHT: f64 = 40.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables for the builder. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Grid cell size in pixels.
    pub grid_size: f64,
    /// Pointer travel before a press activates a drag.
    pub activation_distance: f64,
    /// Width assumed for elements without a pixel width.
    pub default_width: f64,
    /// Height assumed for elements without a pixel height.
    pub default_height: f64,
    /// Maximum number of history snapshots (`None` = unlimited).
    pub history_limit: Option<usize>,
    /// Storage key the project is saved under.
    pub storage_key: String,
    /// Code export options.
    pub export: ExportOptions,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            default_width: DEFAULT_ELEMENT_WIDTH,
            default_height: DEFAULT_ELEMENT_HEIGHT,
            history_limit: None,
            storage_key: PROJECT_KEY.to_string(),
            export: ExportOptions::default(),
        }
    }
}

impl BuilderConfig {
    /// Size assumed for elements without stored dimensions.
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if !(self.activation_distance.is_finite() && self.activation_distance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "activation_distance must not be negative, got {}",
                self.activation_distance
            )));
        }
        if !(self.default_width > 0.0 && self.default_height > 0.0) {
            return Err(ConfigError::Invalid(
                "default element size must be positive".to_string(),
            ));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.grid_size, 20.0);
        assert_eq!(config.activation_distance, 4.0);
        assert_eq!(config.default_size(), Size::new(100.0, 40.0));
        assert_eq!(config.storage_key, "builder_project");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = BuilderConfig::from_json(r#"{ "grid_size": 10, "history_limit": 50 }"#).unwrap();
        assert_eq!(config.grid_size, 10.0);
        assert_eq!(config.history_limit, Some(50));
        assert_eq!(config.activation_distance, 4.0);
    }

    #[test]
    fn test_invalid_grid() {
        let result = BuilderConfig::from_json(r#"{ "grid_size": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = BuilderConfig::from_json("{ grid_size: }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("builder.json");
        std::fs::write(&path, r#"{ "storage_key": "my_page" }"#).unwrap();

        let config = BuilderConfig::load(&path).unwrap();
        assert_eq!(config.storage_key, "my_page");

        let missing = BuilderConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
