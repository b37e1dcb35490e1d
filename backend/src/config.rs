//! Game configuration
//!
//! Every tunable constant lives in a plain struct with a `Default` holding
//! the stock values. All of them deserialize from JSON with missing fields
//! falling back to defaults, and are checked with `validate()` before a
//! simulation is built from them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::EngineConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Check that `value` is a probability.
pub(crate) fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(field, format!("{} is not in [0, 1]", value)));
    }
    Ok(())
}

/// Check that `value` is strictly positive (and finite).
pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::invalid(field, format!("{} must be > 0", value)));
    }
    Ok(())
}

/// Whole-game configuration: the engine constants plus the numbers the
/// surrounding game loop owns (gate count, starting reputation and budget).
///
/// # Example
///
/// ```rust
/// use stadium_security_core_rs::GameConfig;
///
/// let config = GameConfig::from_json_str(r#"{ "num_gates": 8, "rng_seed": 7 }"#).unwrap();
/// assert_eq!(config.num_gates, 8);
/// assert_eq!(config.initial_reputation, 100.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_gates: usize,
    pub initial_reputation: f64,
    pub initial_budget: i64,
    /// Paid into the budget after every event that does not end the game.
    pub post_event_income: i64,
    /// Optional cap on how many guests can be queued at once across all
    /// gates. 0 (the default) leaves arrivals uncapped; a nonzero value
    /// stops arrivals while the queues hold that many guests.
    pub guest_pool: usize,
    /// Game minutes that pass per real second when driven in real time.
    pub minutes_per_real_second: f64,
    /// Entries kept in the rolling player log.
    pub log_capacity: usize,
    pub rng_seed: u64,
    pub engine: EngineConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_gates: 12,
            initial_reputation: 100.0,
            initial_budget: 6000,
            post_event_income: 1500,
            guest_pool: 0,
            minutes_per_real_second: 0.2,
            log_capacity: 100,
            rng_seed: 12345,
            engine: EngineConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_gates == 0 {
            return Err(ConfigError::invalid("num_gates", "must have at least one gate"));
        }
        if !(0.0..=100.0).contains(&self.initial_reputation) || self.initial_reputation == 0.0 {
            return Err(ConfigError::invalid(
                "initial_reputation",
                format!("{} is not in (0, 100]", self.initial_reputation),
            ));
        }
        check_positive("minutes_per_real_second", self.minutes_per_real_second)?;
        self.engine.validate()
    }
}
