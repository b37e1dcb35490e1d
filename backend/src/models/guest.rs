//! Guest model
//!
//! A guest is created outside the stadium when they arrive, joins a gate
//! queue, and leaves the simulation once screened. The lifecycle is explicit:
//!
//! ```text
//! WaitingOutside --enqueue--> InQueue --begin_processing--> Processing
//!     Processing --admit--> Inside --eject--> Ejected
//!     Processing --deny---> Rejected
//! ```
//!
//! Risk flags are rolled once at arrival and never change.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Where a guest is in the entry process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestState {
    WaitingOutside,
    InQueue,
    Processing,
    Inside,
    Rejected,
    Ejected,
}

#[derive(Debug, Error, PartialEq)]
pub enum GuestError {
    #[error("Guest cannot {action} while {from:?}")]
    InvalidTransition {
        from: GuestState,
        action: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    id: Uuid,
    state: GuestState,
    has_fake_id: bool,
    has_fake_ticket: bool,
    is_mte: bool,
    /// 1-10, carried on the record but not used by screening.
    aggression: u8,
}

impl Guest {
    /// New guest waiting outside.
    ///
    /// # Example
    /// ```
    /// use stadium_security_core_rs::{Guest, GuestState};
    /// use uuid::Uuid;
    ///
    /// let guest = Guest::new(Uuid::nil(), false, true, false, 4);
    /// assert_eq!(guest.state(), GuestState::WaitingOutside);
    /// assert!(guest.has_fake_ticket());
    /// assert!(guest.has_any_risk());
    /// ```
    pub fn new(id: Uuid, has_fake_id: bool, has_fake_ticket: bool, is_mte: bool, aggression: u8) -> Self {
        Self {
            id,
            state: GuestState::WaitingOutside,
            has_fake_id,
            has_fake_ticket,
            is_mte,
            aggression: aggression.clamp(1, 10),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> GuestState {
        self.state
    }

    pub fn has_fake_id(&self) -> bool {
        self.has_fake_id
    }

    pub fn has_fake_ticket(&self) -> bool {
        self.has_fake_ticket
    }

    pub fn is_mte(&self) -> bool {
        self.is_mte
    }

    pub fn aggression(&self) -> u8 {
        self.aggression
    }

    pub fn has_any_risk(&self) -> bool {
        self.has_fake_id || self.has_fake_ticket || self.is_mte
    }

    pub fn enqueue(&mut self) -> Result<(), GuestError> {
        self.transition(GuestState::WaitingOutside, GuestState::InQueue, "enqueue")
    }

    pub fn begin_processing(&mut self) -> Result<(), GuestError> {
        self.transition(GuestState::InQueue, GuestState::Processing, "begin processing")
    }

    pub fn admit(&mut self) -> Result<(), GuestError> {
        self.transition(GuestState::Processing, GuestState::Inside, "be admitted")
    }

    pub fn deny(&mut self) -> Result<(), GuestError> {
        self.transition(GuestState::Processing, GuestState::Rejected, "be denied")
    }

    pub fn eject(&mut self) -> Result<(), GuestError> {
        self.transition(GuestState::Inside, GuestState::Ejected, "be ejected")
    }

    fn transition(
        &mut self,
        from: GuestState,
        to: GuestState,
        action: &'static str,
    ) -> Result<(), GuestError> {
        if self.state != from {
            return Err(GuestError::InvalidTransition {
                from: self.state,
                action,
            });
        }
        self.state = to;
        Ok(())
    }
}
