//! Hired staff and their gate assignments.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Gate, StaffMember};

#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("Staff member not found: {0}")]
    StaffNotFound(Uuid),

    #[error("Staff member already hired: {0}")]
    AlreadyHired(Uuid),

    #[error("Gate not found: {0}")]
    GateNotFound(u32),

    #[error("Staff member {staff} is already assigned to gate {gate}")]
    AlreadyAssigned { staff: Uuid, gate: u32 },

    #[error("Staff member is not assigned to any gate: {0}")]
    NotAssigned(Uuid),
}

/// Everyone currently employed, in hiring order.
///
/// Gates hold their own copies of assigned staff (so the engine can decay
/// their focus); the roster keeps the rested originals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    staff: Vec<StaffMember>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hire(&mut self, staff: StaffMember) -> Result<(), RosterError> {
        if self.contains(staff.id()) {
            return Err(RosterError::AlreadyHired(staff.id()));
        }
        self.staff.push(staff);
        Ok(())
    }

    /// Fire a staff member, pulling them off any gate first.
    pub fn dismiss(
        &mut self,
        staff_id: Uuid,
        gates: &mut [Gate],
    ) -> Result<StaffMember, RosterError> {
        let index = self
            .staff
            .iter()
            .position(|s| s.id() == staff_id)
            .ok_or(RosterError::StaffNotFound(staff_id))?;
        for gate in gates.iter_mut() {
            gate.assigned_staff.retain(|s| s.id() != staff_id);
        }
        Ok(self.staff.remove(index))
    }

    pub fn get(&self, staff_id: Uuid) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id() == staff_id)
    }

    pub fn contains(&self, staff_id: Uuid) -> bool {
        self.get(staff_id).is_some()
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn len(&self) -> usize {
        self.staff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }

    /// Sum of all salaries.
    pub fn payroll(&self) -> i64 {
        self.staff.iter().map(StaffMember::salary).sum()
    }

    /// Put a copy of a hired staff member on a gate.
    pub fn assign(
        &self,
        staff_id: Uuid,
        gate_id: u32,
        gates: &mut [Gate],
    ) -> Result<(), RosterError> {
        let staff = self.get(staff_id).ok_or(RosterError::StaffNotFound(staff_id))?;
        if let Some(current) = gates.iter().find(|g| g.has_staff(staff_id)) {
            return Err(RosterError::AlreadyAssigned {
                staff: staff_id,
                gate: current.id,
            });
        }
        let gate = gates
            .iter_mut()
            .find(|g| g.id == gate_id)
            .ok_or(RosterError::GateNotFound(gate_id))?;
        gate.assigned_staff.push(staff.clone());
        Ok(())
    }

    /// Take a staff member off their gate; returns the gate id.
    pub fn unassign(&self, staff_id: Uuid, gates: &mut [Gate]) -> Result<u32, RosterError> {
        if !self.contains(staff_id) {
            return Err(RosterError::StaffNotFound(staff_id));
        }
        let gate = gates
            .iter_mut()
            .find(|g| g.has_staff(staff_id))
            .ok_or(RosterError::NotAssigned(staff_id))?;
        gate.assigned_staff.retain(|s| s.id() != staff_id);
        Ok(gate.id)
    }

    /// Hired staff not working any gate, in hiring order.
    pub fn unassigned<'a>(&'a self, gates: &[Gate]) -> Vec<&'a StaffMember> {
        self.staff
            .iter()
            .filter(|s| !gates.iter().any(|g| g.has_staff(s.id())))
            .collect()
    }

    /// Give every unstaffed gate one unassigned staff member, sharpest
    /// observers first. Returns how many were placed.
    pub fn auto_assign(&self, gates: &mut [Gate]) -> usize {
        let mut pool: Vec<StaffMember> = self.unassigned(gates).into_iter().cloned().collect();
        // stable: ties keep hiring order
        pool.sort_by(|a, b| b.stats().observation().cmp(&a.stats().observation()));

        let mut pool = pool.into_iter();
        let mut placed = 0;
        for gate in gates.iter_mut().filter(|g| !g.is_staffed()) {
            match pool.next() {
                Some(staff) => {
                    gate.assigned_staff.push(staff);
                    placed += 1;
                }
                None => break,
            }
        }
        placed
    }
}
