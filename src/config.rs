use std::path::Path;

use crate::ai::BrainConfig;
use crate::error::ConfigError;
use crate::training::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub brain: BrainConfig,
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
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let brain = &self.brain;
        if !(0.0..=1.0).contains(&brain.exploration_rate) {
            return Err(ConfigError::Validation(
                "brain.exploration_rate must be in [0, 1]".into(),
            ));
        }
        if brain.max_memory == 0 {
            return Err(ConfigError::Validation(
                "brain.max_memory must be > 0".into(),
            ));
        }
        if brain.update_after_n_states == 0 {
            return Err(ConfigError::Validation(
                "brain.update_after_n_states must be > 0".into(),
            ));
        }

        let model = &brain.model;
        if model.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "brain.model.learning_rate must be > 0".into(),
            ));
        }
        if model.hidden_size == 0 {
            return Err(ConfigError::Validation(
                "brain.model.hidden_size must be > 0".into(),
            ));
        }
        if model.epochs == 0 {
            return Err(ConfigError::Validation(
                "brain.model.epochs must be > 0".into(),
            ));
        }
        if model.batch_size == 0 {
            return Err(ConfigError::Validation(
                "brain.model.batch_size must be > 0".into(),
            ));
        }

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
        if training.eval_interval == 0 {
            return Err(ConfigError::Validation(
                "training.eval_interval must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
