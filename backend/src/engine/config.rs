//! Engine constants.
//!
//! Nothing in the tick engine is hardcoded: every threshold, probability and
//! reputation delta comes from these structs. Defaults are the stock game
//! balance.

use serde::{Deserialize, Serialize};

use crate::arrivals::ArrivalConfig;
use crate::config::{check_positive, check_probability, ConfigError};
use crate::core::time::EventTimeline;

/// Everything the tick engine needs besides the world state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timeline: EventTimeline,
    pub arrivals: ArrivalConfig,
    pub switching: SwitchingConfig,
    pub screening: ScreeningConfig,
    pub queue_penalty: QueuePenaltyConfig,
    pub fatigue: FatigueConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timeline.validate()?;
        self.arrivals.validate()?;
        self.switching.validate()?;
        self.screening.validate()?;
        self.queue_penalty.validate()?;
        self.fatigue.validate()
    }
}

/// Queue-switching heuristic.
///
/// Willingness to move = `base_willingness + min(max_pressure, len / pressure_divisor)
/// + closed frustration`, capped at `max_willingness`. Candidate gates score
/// `len + distance penalty + closure penalty - jitter`; lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchingConfig {
    pub base_willingness: f64,
    pub pressure_divisor: f64,
    pub max_pressure: f64,
    /// Frustration at a closed gate when some other gate is open.
    pub closed_frustration_with_open_alternative: f64,
    /// Frustration at a closed gate when every gate is closed.
    pub closed_frustration_without_alternative: f64,
    pub max_willingness: f64,
    /// Score added for a closed gate when some gate is open.
    pub closed_penalty_with_open_alternative: f64,
    /// Score added for a closed gate when every gate is closed.
    pub closed_penalty_without_alternative: f64,
    /// Score per gate of index distance.
    pub distance_weight: f64,
    /// Distance beyond which `far_distance_weight` also applies.
    pub far_distance_threshold: usize,
    pub far_distance_weight: f64,
    /// A move needs to beat the current gate's score by more than this.
    pub switch_margin: f64,
}

impl Default for SwitchingConfig {
    fn default() -> Self {
        Self {
            base_willingness: 0.1,
            pressure_divisor: 30.0,
            max_pressure: 0.5,
            closed_frustration_with_open_alternative: 0.6,
            closed_frustration_without_alternative: 0.25,
            max_willingness: 0.9,
            closed_penalty_with_open_alternative: 50.0,
            closed_penalty_without_alternative: 15.0,
            distance_weight: 1.5,
            far_distance_threshold: 2,
            far_distance_weight: 1.5,
            switch_margin: 1.0,
        }
    }
}

impl SwitchingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("switching.pressure_divisor", self.pressure_divisor)?;
        check_probability("switching.max_willingness", self.max_willingness)?;
        if self.switch_margin < 0.0 {
            return Err(ConfigError::invalid(
                "switching.switch_margin",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Screening difficulty and the reputation consequences of each outcome.
///
/// A flag is caught when `random() * divisor < effective observation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Divisor for fake tickets and fake IDs.
    pub document_divisor: f64,
    /// Divisor for major threat entities (harder to spot).
    pub mte_divisor: f64,
    pub document_catch_bonus: f64,
    pub mte_catch_bonus: f64,
    pub document_miss_penalty: f64,
    pub mte_miss_penalty: f64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            document_divisor: 10.0,
            mte_divisor: 15.0,
            document_catch_bonus: 0.5,
            mte_catch_bonus: 5.0,
            document_miss_penalty: 2.0,
            mte_miss_penalty: 10.0,
        }
    }
}

impl ScreeningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("screening.document_divisor", self.document_divisor)?;
        check_positive("screening.mte_divisor", self.mte_divisor)
    }
}

/// Flat reputation loss per gate whose queue is longer than `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueuePenaltyConfig {
    pub threshold: usize,
    pub penalty: f64,
}

impl Default for QueuePenaltyConfig {
    fn default() -> Self {
        Self {
            threshold: 15,
            penalty: 0.1,
        }
    }
}

impl QueuePenaltyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.penalty < 0.0 {
            return Err(ConfigError::invalid("queue_penalty.penalty", "must not be negative"));
        }
        Ok(())
    }
}

/// Staff focus decay.
///
/// Per tick, focus drops by `decay_scale * 60 / event duration in minutes`,
/// multiplied by `2 - focus_sustainability / 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    pub decay_scale: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self { decay_scale: 1.0 }
    }
}

impl FatigueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.decay_scale.is_finite() && self.decay_scale >= 0.0) {
            return Err(ConfigError::invalid("fatigue.decay_scale", "must be >= 0"));
        }
        Ok(())
    }
}
