//! Stadium Security Core - Rust Engine
//!
//! Tick simulation of stadium gate security with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Game clock and event timeline
//! - **models**: Domain types (StaffMember, Guest, Gate, WorldState, EventLog)
//! - **arrivals**: Guest arrival generator
//! - **engine**: The per-tick state transition (arrivals, switching, screening, fatigue)
//! - **orchestrator**: Event driver, running totals and the final report
//! - **staffing**: Applicant producers and the roster
//! - **campaign**: Phase loop around events
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Reputation leaves every tick within [0, 100]
//! 2. All randomness is deterministic (injected, seeded RNG)
//! 3. The engine never mutates the caller's gates

// Module declarations
pub mod arrivals;
pub mod campaign;
pub mod config;
pub mod core;
pub mod engine;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod staffing;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalGenerator};
pub use campaign::{Campaign, CampaignError, GamePhase};
pub use config::{ConfigError, GameConfig};
pub use crate::core::time::{EventPhase, EventTimeline, GameClock};
pub use engine::{run_tick, EngineConfig, TickEngine, TickResult, TickSummary};
pub use models::{
    event::{EventLog, LogEntry, LogSeverity},
    gate::Gate,
    guest::{Guest, GuestError, GuestState},
    staff::{Gender, StaffMember, StaffStats},
    state::WorldState,
};
pub use orchestrator::{EventOrchestrator, EventReport, RunningTotals, SimulationError, TickOutcome};
pub use rng::{RandomSource, RngManager};
pub use staffing::{
    ApplicantError, ApplicantSource, FallbackApplicantSource, LocalApplicantGenerator, Roster,
    RosterError,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn stadium_security_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyEventOrchestrator>()?;
    Ok(())
}
