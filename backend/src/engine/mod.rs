//! Tick engine
//!
//! One call advances the gate world by one game minute. The engine is a
//! total function of its inputs and the injected random source: it keeps no
//! state between calls and never mutates the caller's gates.
//!
//! # Stages
//!
//! 1. **Arrivals**: half-sine arrival curve, batches spread over all gates
//! 2. **Queue switching**: planned against one snapshot, applied as a batch
//! 3. **Screening**: head-of-queue guest at every open, staffed gate
//! 4. **Penalty and fatigue**: long-queue penalty, focus decay for all staff
//!
//! Reputation may leave [0, 100] inside a tick and is clamped once at the end.

pub mod config;
pub mod fatigue;
pub mod screening;
pub mod switching;

pub use config::{
    EngineConfig, FatigueConfig, QueuePenaltyConfig, ScreeningConfig, SwitchingConfig,
};
pub use screening::{ScreeningOutcome, ThreatKind};

use serde::Serialize;
use tracing::debug;

use crate::arrivals::ArrivalGenerator;
use crate::models::{Gate, LogEntry};
use crate::rng::RandomSource;

/// Everything a tick produced, including the new gates.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub gates: Vec<Gate>,
    pub reputation: f64,
    /// Player-facing log lines, oldest first.
    pub log_entries: Vec<LogEntry>,
    pub guests_arrived: usize,
    pub guests_switched: usize,
    /// Guests admitted through screening.
    pub guests_processed: usize,
    /// Guests denied after a detection.
    pub incidents_prevented: usize,
    /// Risk flags that went unnoticed (one guest can miss several).
    pub incidents_missed: usize,
    /// Guests removed from queues by screening, in their final state.
    pub screened: Vec<ScreeningOutcome>,
}

impl TickResult {
    /// Split into the new gates and the counters.
    pub fn into_parts(self) -> (Vec<Gate>, TickSummary) {
        let summary = TickSummary {
            reputation: self.reputation,
            log_entries: self.log_entries,
            guests_arrived: self.guests_arrived,
            guests_switched: self.guests_switched,
            guests_processed: self.guests_processed,
            incidents_prevented: self.incidents_prevented,
            incidents_missed: self.incidents_missed,
            screened: self.screened,
        };
        (self.gates, summary)
    }
}

/// A [`TickResult`] without the gates, returned by [`TickEngine::run_into`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSummary {
    pub reputation: f64,
    pub log_entries: Vec<LogEntry>,
    pub guests_arrived: usize,
    pub guests_switched: usize,
    pub guests_processed: usize,
    pub incidents_prevented: usize,
    pub incidents_missed: usize,
    pub screened: Vec<ScreeningOutcome>,
}

impl TickSummary {
    pub fn with_gates(self, gates: Vec<Gate>) -> TickResult {
        TickResult {
            gates,
            reputation: self.reputation,
            log_entries: self.log_entries,
            guests_arrived: self.guests_arrived,
            guests_switched: self.guests_switched,
            guests_processed: self.guests_processed,
            incidents_prevented: self.incidents_prevented,
            incidents_missed: self.incidents_missed,
            screened: self.screened,
        }
    }

    /// Counter view used by reports and bindings.
    pub fn counters(&self) -> TickCounters {
        TickCounters {
            guests_arrived: self.guests_arrived,
            guests_switched: self.guests_switched,
            guests_processed: self.guests_processed,
            incidents_prevented: self.incidents_prevented,
            incidents_missed: self.incidents_missed,
        }
    }
}

/// Plain per-tick counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickCounters {
    pub guests_arrived: usize,
    pub guests_switched: usize,
    pub guests_processed: usize,
    pub incidents_prevented: usize,
    pub incidents_missed: usize,
}

/// Runs ticks against a borrowed configuration.
pub struct TickEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> TickEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Run one tick and return freshly allocated gates.
    ///
    /// # Arguments
    ///
    /// * `game_time` - Minutes since midnight
    /// * `gates` - Current gates (left untouched)
    /// * `guest_pool_hint` - Upper bound on guests queued at once (0 = unlimited)
    /// * `reputation` - Reputation before the tick
    /// * `rng` - Source for every stochastic decision
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        game_time: u32,
        gates: &[Gate],
        guest_pool_hint: usize,
        reputation: f64,
        rng: &mut R,
    ) -> TickResult {
        let mut out = Vec::with_capacity(gates.len());
        let summary = self.run_into(game_time, gates, guest_pool_hint, reputation, rng, &mut out);
        summary.with_gates(out)
    }

    /// Run one tick writing the new gates into `out`.
    ///
    /// `out` is overwritten; its queue and staff buffers are reused. Callers
    /// alternating two buffers avoid reallocating the world every tick.
    pub fn run_into<R: RandomSource + ?Sized>(
        &self,
        game_time: u32,
        gates: &[Gate],
        guest_pool_hint: usize,
        reputation: f64,
        rng: &mut R,
        out: &mut Vec<Gate>,
    ) -> TickSummary {
        copy_gates(gates, out);

        let mut summary = TickSummary::default();
        let mut reputation = reputation;

        // STAGE 1: ARRIVALS
        let room = match guest_pool_hint {
            0 => None,
            hint => {
                let queued: usize = out.iter().map(Gate::queue_len).sum();
                Some(hint.saturating_sub(queued))
            }
        };
        let generator = ArrivalGenerator::new(&self.config.arrivals, &self.config.timeline);
        for arrival in generator.generate(game_time, out.len(), room, rng) {
            if let Some(gate) = out.get_mut(arrival.gate_index) {
                gate.join_queue(arrival.guest);
                summary.guests_arrived += 1;
            }
        }
        debug!(target: "engine.arrivals", game_time, arrived = summary.guests_arrived, "arrivals");

        // STAGE 2: QUEUE SWITCHING
        let moves = switching::plan_moves(out, &self.config.switching, rng);
        summary.guests_switched = switching::apply_moves(out, moves);
        debug!(target: "engine.switching", game_time, switched = summary.guests_switched, "queue switching");

        // STAGE 3: SCREENING
        for gate in out.iter_mut() {
            let outcome = screening::screen_gate(
                gate,
                &self.config.screening,
                &mut reputation,
                &mut summary.log_entries,
                rng,
            );
            if let Some(outcome) = outcome {
                if outcome.was_denied() {
                    summary.incidents_prevented += 1;
                } else {
                    summary.guests_processed += 1;
                }
                summary.incidents_missed += outcome.missed.len();
                summary.screened.push(outcome);
            }
        }
        debug!(
            target: "engine.screening",
            game_time,
            processed = summary.guests_processed,
            prevented = summary.incidents_prevented,
            missed = summary.incidents_missed,
            "screening"
        );

        // STAGE 4: QUEUE PENALTY AND FATIGUE
        reputation -= fatigue::queue_penalty(out, &self.config.queue_penalty);
        let base = fatigue::base_decay_per_tick(&self.config.timeline, &self.config.fatigue);
        fatigue::apply_focus_decay(out, base);

        summary.reputation = clamp_reputation(reputation);
        summary
    }
}

/// Run one tick with a throwaway engine.
///
/// # Example
/// ```
/// use stadium_security_core_rs::engine::{run_tick, EngineConfig};
/// use stadium_security_core_rs::{Gate, RngManager};
///
/// let config = EngineConfig::default();
/// let gates = Gate::standard_set(12);
/// let mut rng = RngManager::new(7);
///
/// // a minute before the gates open nothing happens
/// let result = run_tick(17 * 60 + 59, &gates, 1500, 80.0, &config, &mut rng);
/// assert_eq!(result.gates, gates);
/// assert_eq!(result.reputation, 80.0);
/// ```
pub fn run_tick<R: RandomSource + ?Sized>(
    game_time: u32,
    gates: &[Gate],
    guest_pool_hint: usize,
    reputation: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> TickResult {
    TickEngine::new(config).run(game_time, gates, guest_pool_hint, reputation, rng)
}

/// Clamp to [0, 100]; NaN becomes 0.
pub fn clamp_reputation(reputation: f64) -> f64 {
    if reputation.is_nan() {
        0.0
    } else {
        reputation.clamp(0.0, 100.0)
    }
}

fn copy_gates(source: &[Gate], out: &mut Vec<Gate>) {
    out.truncate(source.len());
    let reused = out.len();
    for (target, gate) in out.iter_mut().zip(source) {
        target.clone_from(gate);
    }
    out.extend(source[reused..].iter().cloned());
}
