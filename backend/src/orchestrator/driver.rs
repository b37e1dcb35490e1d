//! Event driver
//!
//! Owns the authoritative world state for one event and advances it one game
//! minute per [`EventOrchestrator::tick`]. The tick engine only ever sees a
//! snapshot; the new gates are written into a back buffer and swapped in once
//! the tick has finished, so a half-applied tick is never observable.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::core::time::{EventPhase, GameClock};
use crate::engine::{TickEngine, TickSummary};
use crate::models::{EventLog, Gate, LogEntry, WorldState};
use crate::rng::RngManager;

use super::report::{EventReport, RunningTotals};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Event has already finished")]
    EventFinished,

    #[error("Gate not found: {0}")]
    GateNotFound(u32),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// What one call to [`EventOrchestrator::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Game time the tick ran at.
    pub game_time: u32,
    /// Engine output; `None` when the event ended without running a tick.
    pub summary: Option<TickSummary>,
    /// Set on the call that ends the event.
    pub report: Option<EventReport>,
}

impl TickOutcome {
    pub fn is_final(&self) -> bool {
        self.report.is_some()
    }
}

/// Drives one event from the external gates opening to the final sweep.
///
/// # Example
///
/// ```rust
/// use stadium_security_core_rs::{EventOrchestrator, GameConfig};
///
/// let mut event = EventOrchestrator::new(GameConfig::default()).unwrap();
/// event.set_all_gates(true).unwrap();
/// let report = event.run_to_completion().unwrap();
///
/// // nobody is staffed, so nobody gets through
/// assert_eq!(report.guests_processed, 0);
/// assert!(event.is_finished());
/// ```
pub struct EventOrchestrator {
    config: GameConfig,
    state: WorldState,
    /// Gates from before the last tick; reused as the next tick's output buffer.
    back_buffer: Vec<Gate>,
    clock: GameClock,
    rng: RngManager,
    totals: RunningTotals,
    log: EventLog,
    phase: EventPhase,
    initial_reputation: f64,
    report: Option<EventReport>,
}

impl EventOrchestrator {
    /// Fresh event: `num_gates` closed, unstaffed gates, starting reputation
    /// and budget from the config, seeded from `rng_seed`.
    pub fn new(config: GameConfig) -> Result<Self, SimulationError> {
        let state = WorldState::new(
            Gate::standard_set(config.num_gates),
            config.initial_reputation,
            config.initial_budget,
        );
        let seed = config.rng_seed;
        Self::with_state(config, state, seed)
    }

    /// Event over an existing world (staffed gates, carried-over reputation).
    pub fn with_state(
        config: GameConfig,
        state: WorldState,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let start = config.engine.timeline.external_gates_open;
        let log = EventLog::with_capacity(config.log_capacity);
        let initial_reputation = state.reputation;
        let back_buffer = Vec::with_capacity(state.gates.len());

        info!(
            target: "orchestrator",
            gates = state.gates.len(),
            reputation = initial_reputation,
            seed,
            "event created"
        );

        Ok(Self {
            config,
            state,
            back_buffer,
            clock: GameClock::new(start),
            rng: RngManager::new(seed),
            totals: RunningTotals::new(),
            log,
            phase: EventPhase::PreEvent,
            initial_reputation,
            report: None,
        })
    }

    /// Advance the event by one game minute.
    ///
    /// Once the clock reaches the end of the final sweep the event ends
    /// without running the engine. Otherwise: log a phase change if any, run
    /// the engine, adopt the new state, add the counters to the running totals
    /// and prepend the tick's logs. Reputation at zero ends the event early.
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        if self.report.is_some() {
            return Err(SimulationError::EventFinished);
        }

        let game_time = self.clock.minute();

        if game_time >= self.config.engine.timeline.final_sweep_end {
            let report = EventReport::completed(
                &self.totals,
                self.initial_reputation,
                self.state.reputation,
            );
            self.finish(report.clone());
            return Ok(TickOutcome {
                game_time,
                summary: None,
                report: Some(report),
            });
        }

        let stamp = self.clock.format_hhmm();
        let phase = self.config.engine.timeline.phase_at(game_time);
        if phase != self.phase {
            self.phase = phase;
            self.log
                .push(&stamp, LogEntry::info(format!("Phase changed: {}", phase.label())));
            info!(target: "orchestrator", time = %stamp, phase = phase.label(), "phase changed");
        }

        let engine = TickEngine::new(&self.config.engine);
        let summary = engine.run_into(
            game_time,
            &self.state.gates,
            self.config.guest_pool,
            self.state.reputation,
            &mut self.rng,
            &mut self.back_buffer,
        );
        std::mem::swap(&mut self.state.gates, &mut self.back_buffer);
        self.state.reputation = summary.reputation;
        self.totals.add(&summary);
        self.log.extend(&stamp, summary.log_entries.iter().cloned());

        debug!(
            target: "orchestrator",
            time = %stamp,
            reputation = summary.reputation,
            queued = self.state.total_queue_size(),
            "tick complete"
        );

        let mut report = None;
        if summary.reputation <= 0.0 {
            let exhausted = EventReport::reputation_exhausted(&self.totals, self.initial_reputation);
            self.finish(exhausted.clone());
            report = Some(exhausted);
        }

        self.clock.advance();

        Ok(TickOutcome {
            game_time,
            summary: Some(summary),
            report,
        })
    }

    /// Tick until the event ends and return its report.
    pub fn run_to_completion(&mut self) -> Result<EventReport, SimulationError> {
        loop {
            if let Some(report) = self.tick()?.report {
                return Ok(report);
            }
        }
    }

    /// Open or close one gate; returns the new open state.
    pub fn toggle_gate(&mut self, gate_id: u32) -> Result<bool, SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::EventFinished);
        }
        let gate = self
            .state
            .gate_mut(gate_id)
            .ok_or(SimulationError::GateNotFound(gate_id))?;
        let open = gate.toggle();

        let action = if open { "opened" } else { "closed" };
        let stamp = self.clock.format_hhmm();
        self.log
            .push(&stamp, LogEntry::info(format!("Gate {} manually {}.", gate_id, action)));
        info!(target: "orchestrator", gate = gate_id, open, "gate toggled");
        Ok(open)
    }

    /// Open or close every gate at once.
    pub fn set_all_gates(&mut self, open: bool) -> Result<(), SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::EventFinished);
        }
        for gate in &mut self.state.gates {
            gate.is_open = open;
        }

        let action = if open { "opened" } else { "closed" };
        let stamp = self.clock.format_hhmm();
        self.log
            .push(&stamp, LogEntry::info(format!("All gates manually {}.", action)));
        info!(target: "orchestrator", open, "all gates set");
        Ok(())
    }

    fn finish(&mut self, report: EventReport) {
        info!(
            target: "orchestrator",
            processed = report.guests_processed,
            prevented = report.incidents_prevented,
            missed = report.incidents_missed,
            final_reputation = report.final_reputation,
            ended_early = report.ended_early,
            "event finished"
        );
        self.report = Some(report);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn gates(&self) -> &[Gate] {
        &self.state.gates
    }

    /// Gates as they were before the most recent tick (empty before the first).
    pub fn previous_gates(&self) -> &[Gate] {
        &self.back_buffer
    }

    pub fn reputation(&self) -> f64 {
        self.state.reputation
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    pub fn totals(&self) -> &RunningTotals {
        &self.totals
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn total_queue_size(&self) -> usize {
        self.state.total_queue_size()
    }

    pub fn initial_reputation(&self) -> f64 {
        self.initial_reputation
    }

    pub fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    pub fn report(&self) -> Option<&EventReport> {
        self.report.as_ref()
    }

    /// Hand the world back (staff focus as left by the event).
    pub fn into_state(self) -> WorldState {
        self.state
    }
}
