//! Orchestrator - drives one event tick by tick
//!
//! The tick engine is stateless; everything that accumulates across ticks
//! (running totals, the player log, the clock, the current phase) lives here.

pub mod driver;
pub mod report;

pub use driver::{EventOrchestrator, SimulationError, TickOutcome};
pub use report::{EventReport, RunningTotals};
