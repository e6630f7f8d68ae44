//! Scenario configuration.
//!
//! Sizes and repetition counts for the benchmark runner, loadable from TOML.
//!
//! # Example
//!
//! ```
//! use deltablue_scenarios::ScenarioConfig;
//! use deltablue_core::Strength;
//!
//! let config = ScenarioConfig::from_toml_str(r#"
//!     chain_length = 50
//!     rounds = 5
//!     edit_strength = "strong_preferred"
//! "#).unwrap();
//!
//! assert_eq!(config.chain_length, 50);
//! assert_eq!(config.projection_size, 100);
//! assert_eq!(config.edit_strength, Strength::StrongPreferred);
//! ```

use std::path::Path;

use deltablue_core::Strength;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Benchmark scenario configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScenarioConfig {
    /// Number of variables in the chain scenario.
    #[serde(default = "default_chain_length")]
    pub chain_length: usize,

    /// Number of source/destination pairs in the projection scenario.
    #[serde(default = "default_projection_size")]
    pub projection_size: usize,

    /// Unmeasured rounds run before timing starts.
    #[serde(default = "default_warmup_rounds")]
    pub warmup_rounds: usize,

    /// Measured rounds.
    #[serde(default = "default_rounds")]
    pub rounds: usize,

    /// How many times each edit plan is replayed.
    #[serde(default = "default_change_repeat")]
    pub change_repeat: usize,

    /// Strength of the edit constraints the scenarios add.
    #[serde(default = "default_edit_strength")]
    pub edit_strength: Strength,
}

fn default_chain_length() -> usize {
    100
}

fn default_projection_size() -> usize {
    100
}

fn default_warmup_rounds() -> usize {
    1
}

fn default_rounds() -> usize {
    3
}

fn default_change_repeat() -> usize {
    10
}

fn default_edit_strength() -> Strength {
    Strength::Preferred
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            chain_length: default_chain_length(),
            projection_size: default_projection_size(),
            warmup_rounds: default_warmup_rounds(),
            rounds: default_rounds(),
            change_repeat: default_change_repeat(),
            edit_strength: default_edit_strength(),
        }
    }
}

impl ScenarioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_chain_length(mut self, n: usize) -> Self {
        self.chain_length = n;
        self
    }

    pub fn with_projection_size(mut self, n: usize) -> Self {
        self.projection_size = n;
        self
    }

    pub fn with_warmup_rounds(mut self, n: usize) -> Self {
        self.warmup_rounds = n;
        self
    }

    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    pub fn with_change_repeat(mut self, n: usize) -> Self {
        self.change_repeat = n;
        self
    }

    pub fn with_edit_strength(mut self, strength: Strength) -> Self {
        self.edit_strength = strength;
        self
    }

    /// Reject sizes the scenarios cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("chain_length", self.chain_length),
            ("projection_size", self.projection_size),
            ("rounds", self.rounds),
            ("change_repeat", self.change_repeat),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
            }
        }
        // A required edit would fight the required constraints it feeds.
        if self.edit_strength.is_required() {
            return Err(ConfigError::Invalid(
                "edit_strength must be weaker than required".to_string(),
            ));
        }
        Ok(())
    }
}
