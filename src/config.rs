use crate::estimate::{EstimateError, Rate, TargetUnit};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Looked up in the working directory when no --config is given
pub const DEFAULT_CONFIG_FILE: &str = "envelope.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid default: {0}")]
    InvalidDefault(#[from] EstimateError),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Initial values of the unit and rate fields
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_rate")]
    pub rate: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            rate: default_rate(),
        }
    }
}

fn default_unit() -> String {
    "auto".to_string()
}

fn default_rate() -> String {
    "none".to_string()
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Use `path` if given, else `envelope.toml` when present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    log::warn!("config file {} does not exist", path.display());
                }
                Self::load_from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                log::debug!("no {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::empty())
            }
        }
    }

    pub fn empty() -> Self {
        Self {
            defaults: Defaults::default(),
        }
    }

    /// Check that the defaults are accepted by `evaluate`
    pub fn validate(&self) -> Result<(), ConfigError> {
        TargetUnit::parse(&self.defaults.unit)?;
        Rate::parse(&self.defaults.rate)?;
        Ok(())
    }
}
