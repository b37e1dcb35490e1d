//! Gate model
//!
//! A security gate with a FIFO queue and a list of assigned staff. Only the
//! first assigned staff member screens guests; anyone after them is a reserve
//! with no effect on throughput yet.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use super::guest::Guest;
use super::staff::StaffMember;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u32,
    pub is_open: bool,
    pub is_security_gate: bool,
    /// Front of the queue is the next guest screened.
    pub queue: VecDeque<Guest>,
    pub assigned_staff: Vec<StaffMember>,
}

impl Clone for Gate {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            is_open: self.is_open,
            is_security_gate: self.is_security_gate,
            queue: self.queue.clone(),
            assigned_staff: self.assigned_staff.clone(),
        }
    }

    // reuses the queue and staff buffers
    fn clone_from(&mut self, source: &Self) {
        self.id = source.id;
        self.is_open = source.is_open;
        self.is_security_gate = source.is_security_gate;
        self.queue.clone_from(&source.queue);
        self.assigned_staff.clone_from(&source.assigned_staff);
    }
}

impl Gate {
    /// Closed security gate with no queue and no staff.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            is_open: false,
            is_security_gate: true,
            queue: VecDeque::new(),
            assigned_staff: Vec::new(),
        }
    }

    /// Gates numbered 1..=count, all closed.
    ///
    /// # Example
    /// ```
    /// use stadium_security_core_rs::Gate;
    ///
    /// let gates = Gate::standard_set(12);
    /// assert_eq!(gates.len(), 12);
    /// assert_eq!(gates[0].id, 1);
    /// assert!(gates.iter().all(|g| !g.is_open));
    /// ```
    pub fn standard_set(count: usize) -> Vec<Gate> {
        (1..=count as u32).map(Gate::new).collect()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Append a guest to the back of the queue.
    ///
    /// Guests arriving from outside move to `InQueue`; guests already queued
    /// elsewhere keep their state.
    pub fn join_queue(&mut self, mut guest: Guest) {
        if let Err(error) = guest.enqueue() {
            tracing::trace!(target: "models.gate", gate = self.id, %error, "guest joined without state change");
        }
        self.queue.push_back(guest);
    }

    /// The staff member who screens at this gate.
    pub fn active_screener(&self) -> Option<&StaffMember> {
        self.assigned_staff.first()
    }

    /// Assigned staff beyond the active screener.
    pub fn reserves(&self) -> &[StaffMember] {
        self.assigned_staff.get(1..).unwrap_or(&[])
    }

    pub fn is_staffed(&self) -> bool {
        !self.assigned_staff.is_empty()
    }

    pub fn has_staff(&self, staff_id: Uuid) -> bool {
        self.assigned_staff.iter().any(|s| s.id() == staff_id)
    }

    /// Flip open/closed; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }
}
