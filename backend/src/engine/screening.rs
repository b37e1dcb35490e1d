//! Screening (tick stage 3).
//!
//! Each open gate with a queue and at least one assigned staff member screens
//! exactly its head-of-queue guest, using the first staff member's effective
//! observation. Flags are checked in a fixed order (fake ticket, fake ID,
//! MTE). The first detection denies the guest and skips the remaining
//! checks; every flag that is present but not detected counts as a miss and
//! costs reputation.

use serde::{Deserialize, Serialize};

use crate::models::{Gate, Guest, LogEntry};
use crate::rng::RandomSource;

use super::config::ScreeningConfig;

/// A risk a guest can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatKind {
    FakeTicket,
    FakeId,
    Mte,
}

impl ThreatKind {
    /// Check order used at every gate.
    pub const SCREENING_ORDER: [ThreatKind; 3] =
        [ThreatKind::FakeTicket, ThreatKind::FakeId, ThreatKind::Mte];

    pub fn is_present(&self, guest: &Guest) -> bool {
        match self {
            ThreatKind::FakeTicket => guest.has_fake_ticket(),
            ThreatKind::FakeId => guest.has_fake_id(),
            ThreatKind::Mte => guest.is_mte(),
        }
    }

    pub fn divisor(&self, config: &ScreeningConfig) -> f64 {
        match self {
            ThreatKind::Mte => config.mte_divisor,
            _ => config.document_divisor,
        }
    }

    pub fn catch_bonus(&self, config: &ScreeningConfig) -> f64 {
        match self {
            ThreatKind::Mte => config.mte_catch_bonus,
            _ => config.document_catch_bonus,
        }
    }

    pub fn miss_penalty(&self, config: &ScreeningConfig) -> f64 {
        match self {
            ThreatKind::Mte => config.mte_miss_penalty,
            _ => config.document_miss_penalty,
        }
    }

    fn caught_entry(&self, gate_id: u32) -> LogEntry {
        match self {
            ThreatKind::FakeTicket => {
                LogEntry::info(format!("Gate {}: Fake ticket detected. Guest denied.", gate_id))
            }
            ThreatKind::FakeId => {
                LogEntry::info(format!("Gate {}: Fake ID detected. Guest denied.", gate_id))
            }
            ThreatKind::Mte => {
                LogEntry::critical(format!("Gate {}: MTE detected and apprehended!", gate_id))
            }
        }
    }

    fn missed_entry(&self, gate_id: u32) -> LogEntry {
        match self {
            ThreatKind::FakeTicket => LogEntry::warning(format!("Gate {}: Fake ticket missed!", gate_id)),
            ThreatKind::FakeId => LogEntry::warning(format!("Gate {}: Fake ID missed!", gate_id)),
            ThreatKind::Mte => {
                LogEntry::critical(format!("Gate {}: MTE slipped through security!", gate_id))
            }
        }
    }
}

/// What happened to one screened guest.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningOutcome {
    pub gate_id: u32,
    /// The flag that got the guest denied, if any.
    pub detected: Option<ThreatKind>,
    /// Flags that were present but not spotted.
    pub missed: Vec<ThreatKind>,
    /// Guest in its final state (`Inside` or `Rejected`).
    pub guest: Guest,
}

impl ScreeningOutcome {
    pub fn was_denied(&self) -> bool {
        self.detected.is_some()
    }
}

/// Screen the head-of-queue guest at `gate`, if the gate can screen.
///
/// Reputation is adjusted in place: a catch adds its bonus capped at 100, a
/// miss subtracts its penalty with no floor (the caller clamps at the end of
/// the tick). Draws one random value per flag the guest actually carries, up
/// to and including the first detection.
pub fn screen_gate<R: RandomSource + ?Sized>(
    gate: &mut Gate,
    config: &ScreeningConfig,
    reputation: &mut f64,
    logs: &mut Vec<LogEntry>,
    rng: &mut R,
) -> Option<ScreeningOutcome> {
    if !gate.is_open || gate.queue.is_empty() {
        return None;
    }
    let observation = gate.active_screener()?.effective_observation();
    let mut guest = gate.queue.pop_front()?;

    let mut detected = None;
    let mut missed = Vec::new();

    for kind in ThreatKind::SCREENING_ORDER {
        if detected.is_some() || !kind.is_present(&guest) {
            continue;
        }
        if rng.next_f64() * kind.divisor(config) < observation {
            detected = Some(kind);
            logs.push(kind.caught_entry(gate.id));
            *reputation = (*reputation + kind.catch_bonus(config)).min(100.0);
        } else {
            missed.push(kind);
            logs.push(kind.missed_entry(gate.id));
            *reputation -= kind.miss_penalty(config);
        }
    }

    let transition = guest.begin_processing().and_then(|()| {
        if detected.is_some() {
            guest.deny()
        } else {
            guest.admit()
        }
    });
    if let Err(error) = transition {
        tracing::debug!(target: "engine.screening", gate = gate.id, %error, "guest screened from unexpected state");
    }

    Some(ScreeningOutcome {
        gate_id: gate.id,
        detected,
        missed,
        guest,
    })
}
