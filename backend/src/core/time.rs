//! Time management for the simulation
//!
//! The event runs in discrete ticks of one game minute. Time is expressed as
//! minutes since midnight; the event timeline is a fixed set of breakpoints
//! (gates open, kick-off, halftime, ...) that drive arrivals and the phase
//! banner shown to the player.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ConfigError;

/// Breakpoints of a single stadium event, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTimeline {
    pub external_gates_open: u32,
    pub security_gates_open: u32,
    pub game_start: u32,
    pub halftime: u32,
    pub game_end: u32,
    pub security_gates_close: u32,
    pub final_sweep_end: u32,
}

impl Default for EventTimeline {
    fn default() -> Self {
        Self {
            external_gates_open: 18 * 60,
            security_gates_open: 18 * 60 + 45,
            game_start: 20 * 60 + 30,
            halftime: 21 * 60 + 15,
            game_end: 22 * 60,
            security_gates_close: 23 * 60,
            final_sweep_end: 24 * 60,
        }
    }
}

impl EventTimeline {
    /// Breakpoints paired with the phase they start, in order.
    pub fn breakpoints(&self) -> [(u32, EventPhase); 7] {
        [
            (self.external_gates_open, EventPhase::GatesOpening),
            (self.security_gates_open, EventPhase::PeakRush),
            (self.game_start, EventPhase::GameStarted),
            (self.halftime, EventPhase::Halftime),
            (self.game_end, EventPhase::GameEndRush),
            (self.security_gates_close, EventPhase::GatesClosed),
            (self.final_sweep_end, EventPhase::FinalSweep),
        ]
    }

    /// Breakpoints must be strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let points = self.breakpoints();
        for pair in points.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(ConfigError::InvalidTimeline(format!(
                    "{} ({}) must come before {} ({})",
                    pair[0].1.label(),
                    format_hhmm(pair[0].0),
                    pair[1].1.label(),
                    format_hhmm(pair[1].0),
                )));
            }
        }
        Ok(())
    }

    /// Whole event length, gates opening to end of the final sweep.
    pub fn duration_minutes(&self) -> u32 {
        self.final_sweep_end.saturating_sub(self.external_gates_open)
    }

    /// Exclusive bounds of the window in which guests arrive.
    pub fn arrival_window(&self) -> (u32, u32) {
        (self.external_gates_open, self.game_end)
    }

    /// Phase in effect at `minute` (latest breakpoint not after it).
    pub fn phase_at(&self, minute: u32) -> EventPhase {
        self.breakpoints()
            .iter()
            .rev()
            .find(|(start, _)| minute >= *start)
            .map(|(_, phase)| *phase)
            .unwrap_or(EventPhase::PreEvent)
    }
}

/// Named stretch of the event timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventPhase {
    PreEvent,
    GatesOpening,
    PeakRush,
    GameStarted,
    Halftime,
    GameEndRush,
    GatesClosed,
    FinalSweep,
}

impl EventPhase {
    pub fn label(&self) -> &'static str {
        match self {
            EventPhase::PreEvent => "Pre-Event",
            EventPhase::GatesOpening => "Gates Opening",
            EventPhase::PeakRush => "Peak Rush",
            EventPhase::GameStarted => "Game Started",
            EventPhase::Halftime => "Halftime",
            EventPhase::GameEndRush => "Game End Rush",
            EventPhase::GatesClosed => "Gates Closed",
            EventPhase::FinalSweep => "Final Sweep",
        }
    }
}

/// Format minutes since midnight as `HH:MM`.
///
/// Hours are not wrapped, so the end of the final sweep reads `24:00`.
pub fn format_hhmm(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Parse `HH:MM` into minutes since midnight.
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 || hours > 24 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Game clock advancing one minute per tick
///
/// # Example
/// ```
/// use stadium_security_core_rs::core::time::GameClock;
///
/// let mut clock = GameClock::new(18 * 60);
/// clock.advance();
/// assert_eq!(clock.minute(), 18 * 60 + 1);
/// assert_eq!(clock.format_hhmm(), "18:01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    minute: u32,
    ticks_elapsed: usize,
}

impl GameClock {
    pub fn new(start_minute: u32) -> Self {
        Self {
            minute: start_minute,
            ticks_elapsed: 0,
        }
    }

    pub fn advance(&mut self) {
        self.minute += 1;
        self.ticks_elapsed += 1;
    }

    /// Current game time, minutes since midnight.
    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn ticks_elapsed(&self) -> usize {
        self.ticks_elapsed
    }

    pub fn format_hhmm(&self) -> String {
        format_hhmm(self.minute)
    }

    /// Wall-clock pause between ticks for a given game-minutes-per-second ratio.
    ///
    /// # Panics
    /// Panics if the ratio is not positive
    pub fn real_tick_interval(minutes_per_real_second: f64) -> Duration {
        assert!(
            minutes_per_real_second > 0.0,
            "minutes_per_real_second must be positive"
        );
        Duration::from_secs_f64(1.0 / minutes_per_real_second)
    }
}
