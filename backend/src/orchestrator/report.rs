//! Running totals and the end-of-event report.

use serde::{Deserialize, Serialize};

use crate::engine::TickSummary;

/// Counters summed over every tick of one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningTotals {
    pub guests_arrived: usize,
    pub guests_switched: usize,
    pub guests_processed: usize,
    pub incidents_prevented: usize,
    pub incidents_missed: usize,
    pub ticks: usize,
}

impl RunningTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one tick's counters.
    pub fn add(&mut self, tick: &TickSummary) {
        self.guests_arrived += tick.guests_arrived;
        self.guests_switched += tick.guests_switched;
        self.guests_processed += tick.guests_processed;
        self.incidents_prevented += tick.incidents_prevented;
        self.incidents_missed += tick.incidents_missed;
        self.ticks += 1;
    }
}

/// What the presentation layer gets once an event stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    pub guests_processed: usize,
    pub incidents_prevented: usize,
    pub incidents_missed: usize,
    /// Final minus starting reputation.
    pub reputation_change: f64,
    pub final_reputation: f64,
    /// True when reputation ran out before the final sweep.
    pub ended_early: bool,
}

impl EventReport {
    /// Report for an event that ran to the end of the final sweep.
    pub fn completed(totals: &RunningTotals, initial_reputation: f64, final_reputation: f64) -> Self {
        Self {
            guests_processed: totals.guests_processed,
            incidents_prevented: totals.incidents_prevented,
            incidents_missed: totals.incidents_missed,
            reputation_change: final_reputation - initial_reputation,
            final_reputation,
            ended_early: false,
        }
    }

    /// Report for an event cut short by reputation reaching zero.
    pub fn reputation_exhausted(totals: &RunningTotals, initial_reputation: f64) -> Self {
        Self {
            guests_processed: totals.guests_processed,
            incidents_prevented: totals.incidents_prevented,
            incidents_missed: totals.incidents_missed,
            reputation_change: -initial_reputation,
            final_reputation: 0.0,
            ended_early: true,
        }
    }
}
