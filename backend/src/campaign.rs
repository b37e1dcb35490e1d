//! Campaign - the phase loop around events
//!
//! Hiring, assignment and briefing happen between events; the event itself
//! runs in an [`EventOrchestrator`] handed out by [`Campaign::start_event`]
//! and its report is fed back through [`Campaign::complete_event`].
//! Reputation carries over from event to event, and so does the roster.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::{ConfigError, GameConfig};
use crate::models::{Gate, StaffMember, WorldState};
use crate::orchestrator::{EventOrchestrator, EventReport, SimulationError};
use crate::staffing::{Roster, RosterError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Hiring,
    Assignment,
    EventBriefing,
    Event,
    PostEvent,
    GameOver,
}

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("Expected phase {expected:?}, but campaign is in {actual:?}")]
    WrongPhase { expected: GamePhase, actual: GamePhase },

    #[error("Hire at least {required} staff members (have {hired})")]
    NotEnoughStaff { hired: usize, required: usize },

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Game state that outlives a single event.
#[derive(Debug, Clone)]
pub struct Campaign {
    config: GameConfig,
    phase: GamePhase,
    day: u32,
    reputation: f64,
    budget: i64,
    roster: Roster,
    gates: Vec<Gate>,
    last_report: Option<EventReport>,
}

impl Campaign {
    /// Day one, hiring phase, starting reputation and budget.
    pub fn new(config: GameConfig) -> Result<Self, CampaignError> {
        config.validate()?;
        Ok(Self {
            phase: GamePhase::Hiring,
            day: 1,
            reputation: config.initial_reputation,
            budget: config.initial_budget,
            roster: Roster::new(),
            gates: Gate::standard_set(config.num_gates),
            last_report: None,
            config,
        })
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), CampaignError> {
        if self.phase != expected {
            return Err(CampaignError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Hiring
    // ========================================================================

    pub fn hire(&mut self, staff: StaffMember) -> Result<(), CampaignError> {
        self.expect_phase(GamePhase::Hiring)?;
        let (name, salary) = (staff.full_name(), staff.salary());
        self.roster.hire(staff)?;
        info!(target: "campaign", staff = %name, salary, "hired");
        Ok(())
    }

    pub fn dismiss(&mut self, staff_id: Uuid) -> Result<StaffMember, CampaignError> {
        self.expect_phase(GamePhase::Hiring)?;
        Ok(self.roster.dismiss(staff_id, &mut self.gates)?)
    }

    /// Move on to assignment once every gate can be covered.
    pub fn finish_hiring(&mut self) -> Result<(), CampaignError> {
        self.expect_phase(GamePhase::Hiring)?;
        let required = self.config.num_gates;
        if self.roster.len() < required {
            return Err(CampaignError::NotEnoughStaff {
                hired: self.roster.len(),
                required,
            });
        }
        self.phase = GamePhase::Assignment;
        Ok(())
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    pub fn assign(&mut self, staff_id: Uuid, gate_id: u32) -> Result<(), CampaignError> {
        self.expect_phase(GamePhase::Assignment)?;
        self.roster.assign(staff_id, gate_id, &mut self.gates)?;
        Ok(())
    }

    pub fn unassign(&mut self, staff_id: Uuid) -> Result<u32, CampaignError> {
        self.expect_phase(GamePhase::Assignment)?;
        Ok(self.roster.unassign(staff_id, &mut self.gates)?)
    }

    /// Fill every unstaffed gate from the unassigned pool.
    pub fn auto_assign(&mut self) -> Result<usize, CampaignError> {
        self.expect_phase(GamePhase::Assignment)?;
        Ok(self.roster.auto_assign(&mut self.gates))
    }

    pub fn finish_assignment(&mut self) -> Result<(), CampaignError> {
        self.expect_phase(GamePhase::Assignment)?;
        self.phase = GamePhase::EventBriefing;
        Ok(())
    }

    // ========================================================================
    // Event
    // ========================================================================

    /// Build the event driver from the current gates and reputation.
    pub fn start_event(&mut self, seed: u64) -> Result<EventOrchestrator, CampaignError> {
        self.expect_phase(GamePhase::EventBriefing)?;
        let state = WorldState::new(self.gates.clone(), self.reputation, self.budget);
        let event = EventOrchestrator::with_state(self.config.clone(), state, seed)?;
        info!(target: "campaign", day = self.day, reputation = self.reputation, "event started");
        self.phase = GamePhase::Event;
        Ok(event)
    }

    /// Take the event's outcome on board.
    pub fn complete_event(&mut self, report: EventReport) -> Result<GamePhase, CampaignError> {
        self.expect_phase(GamePhase::Event)?;
        self.reputation = report.final_reputation;
        if report.final_reputation <= 0.0 {
            self.phase = GamePhase::GameOver;
        } else {
            self.budget += self.config.post_event_income;
            self.phase = GamePhase::PostEvent;
        }
        info!(
            target: "campaign",
            day = self.day,
            reputation = self.reputation,
            budget = self.budget,
            phase = ?self.phase,
            "event completed"
        );
        self.last_report = Some(report);
        Ok(self.phase)
    }

    /// Next day: fresh unstaffed gates, same roster, back to hiring.
    pub fn next_event(&mut self) -> Result<(), CampaignError> {
        self.expect_phase(GamePhase::PostEvent)?;
        self.day += 1;
        self.gates = Gate::standard_set(self.config.num_gates);
        self.phase = GamePhase::Hiring;
        Ok(())
    }

    /// Start over from day one with nobody hired.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Hiring;
        self.day = 1;
        self.reputation = self.config.initial_reputation;
        self.budget = self.config.initial_budget;
        self.roster = Roster::new();
        self.gates = Gate::standard_set(self.config.num_gates);
        self.last_report = None;
        info!(target: "campaign", "campaign restarted");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn reputation(&self) -> f64 {
        self.reputation
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn last_report(&self) -> Option<&EventReport> {
        self.last_report.as_ref()
    }
}
