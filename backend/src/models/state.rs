//! World State
//!
//! The authoritative value the driver holds between ticks: every gate (with
//! its queue and staff), the reputation score and the budget.
//!
//! # Critical Invariants
//!
//! 1. **Reputation Range**: reputation is in [0, 100] after every tick
//! 2. **Value Semantics**: a tick reads a snapshot and produces a new value;
//!    nothing inside the state points back at the reputation or the driver

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::gate::Gate;

/// Complete world state
///
/// # Example
///
/// ```rust
/// use stadium_security_core_rs::{Gate, WorldState};
///
/// let state = WorldState::new(Gate::standard_set(12), 100.0, 6000);
/// assert_eq!(state.gates.len(), 12);
/// assert_eq!(state.total_queue_size(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldState {
    pub gates: Vec<Gate>,
    pub reputation: f64,
    /// Owned by the surrounding game loop; the tick engine never touches it.
    pub budget: i64,
}

impl WorldState {
    pub fn new(gates: Vec<Gate>, reputation: f64, budget: i64) -> Self {
        Self {
            gates,
            reputation: reputation.clamp(0.0, 100.0),
            budget,
        }
    }

    pub fn gate(&self, gate_id: u32) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == gate_id)
    }

    pub fn gate_mut(&mut self, gate_id: u32) -> Option<&mut Gate> {
        self.gates.iter_mut().find(|g| g.id == gate_id)
    }

    /// Guests waiting across all gates.
    pub fn total_queue_size(&self) -> usize {
        self.gates.iter().map(Gate::queue_len).sum()
    }

    pub fn open_gate_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_open).count()
    }

    /// SHA-256 over the canonical JSON of gates and reputation.
    ///
    /// Two states with the same fingerprint are interchangeable for the tick
    /// engine; used to check deterministic replay.
    pub fn fingerprint(&self) -> String {
        fingerprint_gates(&self.gates, self.reputation)
    }
}

/// Fingerprint of a gate set plus reputation (see [`WorldState::fingerprint`]).
pub fn fingerprint_gates(gates: &[Gate], reputation: f64) -> String {
    #[derive(Serialize)]
    struct Canonical<'a> {
        gates: &'a [Gate],
        reputation: f64,
    }

    let mut hasher = Sha256::new();
    match serde_json::to_vec(&Canonical { gates, reputation }) {
        Ok(bytes) => hasher.update(&bytes),
        // plain data never fails to serialize; hash the debug form just in case
        Err(_) => hasher.update(format!("{:?}{:?}", gates, reputation).as_bytes()),
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guest::Guest;
    use uuid::Uuid;

    #[test]
    fn test_reputation_clamped_on_construction() {
        assert_eq!(WorldState::new(vec![], 140.0, 0).reputation, 100.0);
        assert_eq!(WorldState::new(vec![], -5.0, 0).reputation, 0.0);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = WorldState::new(Gate::standard_set(3), 80.0, 0);
        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut c = a.clone();
        c.gates[1].join_queue(Guest::new(Uuid::nil(), false, false, false, 2));
        assert_ne!(a.fingerprint(), c.fingerprint());

        let mut d = a.clone();
        d.reputation = 79.5;
        assert_ne!(a.fingerprint(), d.fingerprint());
    }

    #[test]
    fn test_budget_not_part_of_fingerprint() {
        let a = WorldState::new(Gate::standard_set(2), 50.0, 100);
        let b = WorldState::new(Gate::standard_set(2), 50.0, 9999);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_gate_lookup_by_id() {
        let mut state = WorldState::new(Gate::standard_set(4), 100.0, 0);
        assert!(state.gate(4).is_some());
        assert!(state.gate(5).is_none());
        state.gate_mut(2).unwrap().is_open = true;
        assert_eq!(state.open_gate_count(), 1);
    }
}
