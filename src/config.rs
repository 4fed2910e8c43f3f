use std::path::Path;

use log::warn;

use crate::ai::{SearchConfig, TdConfig};
use crate::error::ConfigError;
use crate::storage::StorageConfig;
use crate::training::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub learning: TdConfig,
    pub search: SearchConfig,
    pub training: TrainerConfig,
    pub storage: StorageConfig,
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
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let learning = &self.learning;
        if !(learning.alpha > 0.0 && learning.alpha <= 1.0) {
            return Err(ConfigError::Validation(
                "learning.alpha must be in (0, 1]".into(),
            ));
        }
        check_unit("learning.gamma", learning.gamma)?;
        check_unit("learning.epsilon_train", learning.epsilon_train)?;
        check_unit("learning.epsilon_human", learning.epsilon_human)?;
        if learning.save_every == 0 {
            return Err(ConfigError::Validation(
                "learning.save_every must be > 0".into(),
            ));
        }

        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        check_unit("search.semi_error_prob", self.search.semi_error_prob)?;
        check_unit("search.weak_error_prob", self.search.weak_error_prob)?;

        let training = &self.training;
        if training.num_games == 0 {
            return Err(ConfigError::Validation(
                "training.num_games must be > 0".into(),
            ));
        }
        if training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if training.eval_interval > 0 && training.eval_games == 0 {
            return Err(ConfigError::Validation(
                "training.eval_games must be > 0 when evaluation is enabled".into(),
            ));
        }
        if training.opening_reserve > crate::game::ROWS * crate::game::COLS {
            return Err(ConfigError::Validation(format!(
                "training.opening_reserve must be <= {}",
                crate::game::ROWS * crate::game::COLS
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

fn check_unit(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{name} must be in [0, 1]")))
    }
}
