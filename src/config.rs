use std::path::Path;

use log::warn;

use crate::ai::AdaptiveConfig;
use crate::error::ConfigError;
use crate::training::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub adaptive: AdaptiveConfig,
    pub training: TrainerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("Config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let adaptive = &self.adaptive;
        if adaptive.depth == 0 {
            return Err(ConfigError::Validation(
                "adaptive.depth must be >= 1".into(),
            ));
        }
        if !(adaptive.learning_rate > 0.0 && adaptive.learning_rate.is_finite()) {
            return Err(ConfigError::Validation(
                "adaptive.learning_rate must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&adaptive.decay) {
            return Err(ConfigError::Validation(
                "adaptive.decay must be in [0, 1]".into(),
            ));
        }
        if adaptive.critical_window == 0 {
            return Err(ConfigError::Validation(
                "adaptive.critical_window must be >= 1".into(),
            ));
        }

        let training = &self.training;
        if training.training_depth == 0 {
            return Err(ConfigError::Validation(
                "training.training_depth must be >= 1".into(),
            ));
        }
        if training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if training.stages.is_empty() {
            return Err(ConfigError::Validation(
                "training.stages must not be empty".into(),
            ));
        }
        if let Some(i) = training.stages.iter().position(|s| s.games == 0) {
            return Err(ConfigError::Validation(format!(
                "training.stages[{i}].games must be > 0"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
