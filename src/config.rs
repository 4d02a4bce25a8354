//! Parser configuration: client-matching thresholds.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const AUTO_THRESHOLD_ENV: &str = "FUZZY_MATCH_THRESHOLD_AUTO";
pub const CONFIRM_THRESHOLD_ENV: &str = "FUZZY_MATCH_THRESHOLD_CONFIRM";

/// Thresholds that decide the shape of a client match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Scores at or above this are applied without asking
    pub auto_threshold: f64,
    /// Scores at or above this (and below `auto_threshold`) need confirmation
    pub confirm_threshold: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            auto_threshold: 0.85,
            confirm_threshold: 0.70,
        }
    }
}

impl ParserConfig {
    pub fn new(auto_threshold: f64, confirm_threshold: f64) -> Result<Self, ConfigError> {
        let config = Self {
            auto_threshold,
            confirm_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read thresholds from the environment, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(AUTO_THRESHOLD_ENV) {
            config.auto_threshold = parse_threshold(AUTO_THRESHOLD_ENV, &value)?;
        }
        if let Some(value) = lookup(CONFIRM_THRESHOLD_ENV) {
            config.confirm_threshold = parse_threshold(CONFIRM_THRESHOLD_ENV, &value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            auto = config.auto_threshold,
            confirm = config.confirm_threshold,
            "Loaded parser config"
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Thresholds must satisfy `0 <= confirm < auto <= 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(self.auto_threshold) || !in_range(self.confirm_threshold) {
            return Err(ConfigError::Invalid(format!(
                "thresholds must lie in [0, 1] (auto={}, confirm={})",
                self.auto_threshold, self.confirm_threshold
            )));
        }
        if self.confirm_threshold >= self.auto_threshold {
            return Err(ConfigError::Invalid(format!(
                "auto threshold {} must exceed confirm threshold {}",
                self.auto_threshold, self.confirm_threshold
            )));
        }
        Ok(())
    }
}

fn parse_threshold(var: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}
