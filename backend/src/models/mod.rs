//! Domain models for the gate security simulation

pub mod event;
pub mod gate;
pub mod guest;
pub mod staff;
pub mod state;

// Re-exports
pub use event::{EventLog, LogEntry, LogSeverity, TimedLogEntry};
pub use gate::Gate;
pub use guest::{Guest, GuestError, GuestState};
pub use staff::{Gender, StaffMember, StaffStats};
pub use state::WorldState;
