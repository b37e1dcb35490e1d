//! Arrival generation for guests (tick stage 1).
//!
//! Guests only arrive strictly between the external gates opening and the end
//! of the game. Arrival intensity follows a half-sine over that window: zero
//! at both ends, peaking halfway. Each tick makes one Bernoulli draw at the
//! current intensity; on success a batch of guests is spawned, each sent to a
//! uniformly random gate (closed gates included, so queues build up at
//! closed gates too).
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same inputs → same arrivals
//! 2. **Independent flags**: every risk flag is rolled separately per guest
//!
//! # Example
//!
//! ```
//! use stadium_security_core_rs::arrivals::{ArrivalConfig, ArrivalGenerator};
//! use stadium_security_core_rs::core::time::EventTimeline;
//! use stadium_security_core_rs::rng::RngManager;
//!
//! let timeline = EventTimeline::default();
//! let config = ArrivalConfig::default();
//! let generator = ArrivalGenerator::new(&config, &timeline);
//! let mut rng = RngManager::new(42);
//!
//! // before the gates open nothing arrives
//! assert!(generator.generate(17 * 60, 12, None, &mut rng).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::{check_positive, check_probability, ConfigError};
use crate::core::time::EventTimeline;
use crate::models::Guest;
use crate::rng::RandomSource;

/// Arrival parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    /// Peak per-tick probability of a batch arriving.
    pub amplitude: f64,

    /// Guests per batch (min, max), inclusive.
    pub batch_size: (u32, u32),

    pub fake_id_probability: f64,
    pub fake_ticket_probability: f64,
    pub mte_probability: f64,

    /// Aggression range (min, max), inclusive.
    pub aggression: (u8, u8),
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.8,
            batch_size: (6, 25),
            fake_id_probability: 0.10,
            fake_ticket_probability: 0.15,
            mte_probability: 0.02,
            aggression: (1, 10),
        }
    }
}

impl ArrivalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("arrivals.amplitude", self.amplitude)?;
        check_probability("arrivals.amplitude", self.amplitude)?;
        check_probability("arrivals.fake_id_probability", self.fake_id_probability)?;
        check_probability("arrivals.fake_ticket_probability", self.fake_ticket_probability)?;
        check_probability("arrivals.mte_probability", self.mte_probability)?;

        let (min, max) = self.batch_size;
        if min == 0 || min > max {
            return Err(ConfigError::invalid(
                "arrivals.batch_size",
                format!("({}, {}) is not a non-empty positive range", min, max),
            ));
        }
        let (min, max) = self.aggression;
        if min == 0 || min > max || max > 10 {
            return Err(ConfigError::invalid(
                "arrivals.aggression",
                format!("({}, {}) is not within 1-10", min, max),
            ));
        }
        Ok(())
    }
}

/// Per-tick probability that a batch of guests arrives at `minute`.
pub fn arrival_intensity(minute: u32, timeline: &EventTimeline, amplitude: f64) -> f64 {
    let (open, end) = timeline.arrival_window();
    if minute <= open || minute >= end {
        return 0.0;
    }
    let progress = (minute - open) as f64 / (end - open) as f64;
    (progress * PI).sin() * amplitude
}

/// A spawned guest and the index of the gate queue it joins.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub gate_index: usize,
    pub guest: Guest,
}

/// Stateless generator over borrowed configuration.
pub struct ArrivalGenerator<'a> {
    config: &'a ArrivalConfig,
    timeline: &'a EventTimeline,
}

impl<'a> ArrivalGenerator<'a> {
    pub fn new(config: &'a ArrivalConfig, timeline: &'a EventTimeline) -> Self {
        Self { config, timeline }
    }

    /// Generate this tick's arrivals.
    ///
    /// # Arguments
    ///
    /// * `minute` - Current game time
    /// * `gate_count` - Number of gates guests can be sent to
    /// * `room` - How many more guests may queue (`None` = unlimited)
    /// * `rng` - Random source
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        minute: u32,
        gate_count: usize,
        room: Option<usize>,
        rng: &mut R,
    ) -> Vec<Arrival> {
        let intensity = arrival_intensity(minute, self.timeline, self.config.amplitude);
        if intensity <= 0.0 || gate_count == 0 || room == Some(0) {
            return Vec::new();
        }
        if !rng.chance(intensity) {
            return Vec::new();
        }

        let (min, max) = self.config.batch_size;
        let mut batch = rng.range_inclusive(min as i64, max as i64) as usize;
        if let Some(room) = room {
            batch = batch.min(room);
        }

        (0..batch)
            .map(|_| {
                let guest = self.spawn_guest(rng);
                let gate_index = rng.range(0, gate_count as i64) as usize;
                Arrival { gate_index, guest }
            })
            .collect()
    }

    /// Roll one guest's identity, risk flags and aggression.
    pub fn spawn_guest<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Guest {
        let id = rng.uuid();
        let has_fake_id = rng.chance(self.config.fake_id_probability);
        let has_fake_ticket = rng.chance(self.config.fake_ticket_probability);
        let is_mte = rng.chance(self.config.mte_probability);
        let (min, max) = self.config.aggression;
        let aggression = rng.range_inclusive(min as i64, max as i64) as u8;
        Guest::new(id, has_fake_id, has_fake_ticket, is_mte, aggression)
    }
}
