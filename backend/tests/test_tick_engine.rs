//! Tick engine scenarios
//!
//! End-to-end checks of one or a few ticks against hand-built gate layouts:
//! no-op ticks, queue switching, screening certainty and the exact
//! reputation cost of missed threats.

use stadium_security_core_rs::engine::{run_tick, EngineConfig, ThreatKind, TickEngine};
use stadium_security_core_rs::models::state::fingerprint_gates;
use stadium_security_core_rs::{
    GameConfig, Gate, Gender, Guest, GuestState, LogSeverity, RandomSource, RngManager,
    StaffMember, StaffStats,
};
use uuid::Uuid;

// ============================================================================
// Test Helpers
// ============================================================================

/// 17:00, before the external gates open: no arrivals.
const BEFORE_OPENING: u32 = 17 * 60;

/// Random source that always returns the same float.
struct Constant(f64);

impl RandomSource for Constant {
    fn next_u64(&mut self) -> u64 {
        0
    }

    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

fn screener(id: u128, observation: i64) -> StaffMember {
    StaffMember::new(
        Uuid::from_u128(id),
        "Sarah".to_string(),
        "Johnson".to_string(),
        29,
        Gender::Female,
        StaffStats::new(5, 5, observation, 85, 75, 4),
    )
}

fn guest(n: u128, fake_id: bool, fake_ticket: bool, mte: bool) -> Guest {
    Guest::new(Uuid::from_u128(n), fake_id, fake_ticket, mte, 5)
}

fn open_gate(id: u32, observation: i64, guests: Vec<Guest>) -> Gate {
    let mut gate = Gate::new(id);
    gate.is_open = true;
    gate.assigned_staff.push(screener(id as u128, observation));
    for g in guests {
        gate.join_queue(g);
    }
    gate
}

// ============================================================================
// No-op ticks
// ============================================================================

#[test]
fn test_closed_empty_gates_before_opening_unchanged() {
    let config = EngineConfig::default();
    let gates = Gate::standard_set(12);
    let before = fingerprint_gates(&gates, 75.0);

    let mut rng = RngManager::new(12345);
    let time = config.timeline.external_gates_open - 1;
    let result = run_tick(time, &gates, 1500, 75.0, &config, &mut rng);

    assert_eq!(result.gates, gates);
    assert_eq!(result.reputation, 75.0);
    assert_eq!(fingerprint_gates(&result.gates, result.reputation), before);
    assert!(result.log_entries.is_empty());
    assert_eq!(result.guests_arrived, 0);
}

#[test]
fn test_no_op_tick_only_lowers_focus() {
    let config = EngineConfig::default();
    let mut gates = Gate::standard_set(4);
    gates[2].assigned_staff.push(screener(1, 6));

    let result = run_tick(BEFORE_OPENING, &gates, 0, 60.0, &config, &mut RngManager::new(1));

    for (after, before) in result.gates.iter().zip(&gates) {
        assert_eq!(after.queue_len(), 0);
        assert_eq!(after.is_open, before.is_open);
        for (a, b) in after.assigned_staff.iter().zip(&before.assigned_staff) {
            assert!(a.current_focus() < b.current_focus());
        }
    }
    assert_eq!(result.reputation, 60.0);
}

// ============================================================================
// Queue switching
// ============================================================================

#[test]
fn test_guests_drain_from_closed_gate_to_open_gate() {
    let config = EngineConfig::default();
    let mut closed = Gate::new(1);
    for n in 0..20 {
        closed.join_queue(guest(n, false, false, false));
    }
    let mut open = Gate::new(2);
    open.is_open = true;

    let mut gates = vec![closed, open];
    let mut rng = RngManager::new(99);
    let mut moved = 0;
    for _ in 0..10 {
        let result = run_tick(BEFORE_OPENING, &gates, 0, 100.0, &config, &mut rng);
        moved += result.guests_switched;
        gates = result.gates;
        if gates[1].queue_len() > 0 {
            break;
        }
    }

    assert!(moved > 0);
    assert!(gates[1].queue_len() > 0);
    // nobody screens at either gate, so nobody is lost
    assert_eq!(gates[0].queue_len() + gates[1].queue_len(), 20);
    assert!(gates
        .iter()
        .flat_map(|g| g.queue.iter())
        .all(|g| g.state() == GuestState::InQueue));
}

// ============================================================================
// Screening
// ============================================================================

#[test]
fn test_perfect_screener_always_catches_fake_ticket() {
    let config = EngineConfig::default();
    for seed in 0..500 {
        let gates = vec![open_gate(1, 10, vec![guest(1, false, true, false)])];
        let result = run_tick(BEFORE_OPENING, &gates, 0, 50.0, &config, &mut RngManager::new(seed));

        assert_eq!(result.incidents_prevented, 1, "seed {}", seed);
        assert_eq!(result.incidents_missed, 0, "seed {}", seed);
        assert_eq!(result.screened[0].guest.state(), GuestState::Rejected);
    }
}

#[test]
fn test_missed_mte_costs_exactly_ten() {
    let config = EngineConfig::default();
    let gates = vec![open_gate(1, 1, vec![guest(1, false, false, true)])];

    let result = run_tick(BEFORE_OPENING, &gates, 0, 50.0, &config, &mut Constant(0.99));

    assert_eq!(result.incidents_missed, 1);
    assert_eq!(result.guests_processed, 1);
    assert_eq!(result.reputation, 40.0);
    assert_eq!(
        result.log_entries[0].message,
        "Gate 1: MTE slipped through security!"
    );
    assert_eq!(result.log_entries[0].severity, LogSeverity::Critical);
}

#[test]
fn test_missed_document_costs_exactly_two() {
    let config = EngineConfig::default();
    let ticket = vec![open_gate(1, 1, vec![guest(1, false, true, false)])];
    let id = vec![open_gate(1, 1, vec![guest(1, true, false, false)])];

    let ticket_result = run_tick(BEFORE_OPENING, &ticket, 0, 50.0, &config, &mut Constant(0.99));
    let id_result = run_tick(BEFORE_OPENING, &id, 0, 50.0, &config, &mut Constant(0.99));

    assert_eq!(ticket_result.reputation, 48.0);
    assert_eq!(ticket_result.log_entries[0].message, "Gate 1: Fake ticket missed!");
    assert_eq!(id_result.reputation, 48.0);
    assert_eq!(id_result.log_entries[0].message, "Gate 1: Fake ID missed!");
    assert_eq!(id_result.log_entries[0].severity, LogSeverity::Warning);
}

#[test]
fn test_three_missed_fake_ids_clamp_reputation_to_zero() {
    let config = EngineConfig::default();
    let gates: Vec<Gate> = (1..=3)
        .map(|id| open_gate(id, 1, vec![guest(id as u128, true, false, false)]))
        .collect();

    let result = run_tick(BEFORE_OPENING, &gates, 0, 3.0, &config, &mut Constant(0.99));

    assert_eq!(result.incidents_missed, 3);
    assert_eq!(result.reputation, 0.0);
}

#[test]
fn test_detection_logged_and_guest_denied() {
    let config = EngineConfig::default();
    let gates = vec![open_gate(5, 8, vec![guest(1, false, false, true)])];

    // 0.0 * 15 < 8
    let result = run_tick(BEFORE_OPENING, &gates, 0, 90.0, &config, &mut Constant(0.0));

    assert_eq!(result.incidents_prevented, 1);
    assert_eq!(result.guests_processed, 0);
    assert_eq!(result.reputation, 95.0);
    assert_eq!(
        result.log_entries[0].message,
        "Gate 5: MTE detected and apprehended!"
    );
}

#[test]
fn test_each_open_staffed_gate_screens_one_guest() {
    let config = EngineConfig::default();
    let crowd = |base: u128| -> Vec<Guest> {
        (0..5).map(|n| guest(base + n, false, false, false)).collect()
    };
    let mut unstaffed = Gate::new(3);
    unstaffed.is_open = true;
    let gates = vec![open_gate(1, 5, crowd(0)), open_gate(2, 5, crowd(10)), unstaffed];

    // 0.99 keeps every guest where they are
    let result = run_tick(BEFORE_OPENING, &gates, 0, 80.0, &config, &mut Constant(0.99));

    assert_eq!(result.guests_processed, 2);
    assert_eq!(result.gates[0].queue_len(), 4);
    assert_eq!(result.gates[1].queue_len(), 4);
    assert!(result
        .screened
        .iter()
        .all(|s| s.guest.state() == GuestState::Inside));
}

#[test]
fn test_only_first_assigned_staff_screens() {
    let config = EngineConfig::default();
    let fakes: Vec<Guest> = (0..5).map(|n| guest(n, false, true, false)).collect();
    let mut gate = open_gate(1, 1, fakes);
    gate.assigned_staff.push(screener(2, 10));
    gate.assigned_staff.push(screener(3, 10));
    let gates = vec![gate];

    // 0.5 * 10 = 5: caught by either reserve, missed by the first screener
    let result = run_tick(BEFORE_OPENING, &gates, 0, 50.0, &config, &mut Constant(0.5));

    assert_eq!(result.screened.len(), 1);
    assert_eq!(result.screened[0].detected, None);
    assert_eq!(result.screened[0].missed, vec![ThreatKind::FakeTicket]);
    assert_eq!(result.incidents_missed, 1);
    assert_eq!(result.incidents_prevented, 0);
    assert_eq!(result.reputation, 48.0);
    assert_eq!(result.gates[0].queue_len(), 4);

    // reserves tire like the screener does
    let after = &result.gates[0].assigned_staff;
    assert_eq!(after.len(), 3);
    for (a, b) in after.iter().zip(&gates[0].assigned_staff) {
        assert!(a.current_focus() < b.current_focus());
    }
}

// ============================================================================
// Arrivals
// ============================================================================

#[test]
fn test_default_guest_pool_leaves_arrivals_uncapped() {
    let config = EngineConfig::default();
    let mut crowded = Gate::new(1);
    for n in 0..1600 {
        crowded.join_queue(guest(n, false, false, false));
    }
    let gates = vec![crowded, Gate::new(2)];
    let hint = GameConfig::default().guest_pool;

    // 0.0 passes the arrival draw and picks the smallest batch
    let result = run_tick(20 * 60, &gates, hint, 100.0, &config, &mut Constant(0.0));

    assert_eq!(hint, 0);
    assert_eq!(result.guests_arrived, config.arrivals.batch_size.0 as usize);
    let queued: usize = result.gates.iter().map(Gate::queue_len).sum();
    assert_eq!(queued, 1600 + result.guests_arrived);
}

// ============================================================================
// Double buffering
// ============================================================================

#[test]
fn test_alternating_buffers_match_fresh_runs() {
    let config = EngineConfig::default();
    let engine = TickEngine::new(&config);
    let peak = 20 * 60;

    let mut gates: Vec<Gate> = (1..=4).map(|id| open_gate(id, 6, Vec::new())).collect();
    let mut back = Vec::new();
    let mut reference = gates.clone();

    let mut rng_a = RngManager::new(31);
    let mut rng_b = RngManager::new(31);
    let mut rep_a = 100.0;
    let mut rep_b = 100.0;

    for minute in 0..30 {
        let summary = engine.run_into(peak + minute, &gates, 0, rep_a, &mut rng_a, &mut back);
        std::mem::swap(&mut gates, &mut back);
        rep_a = summary.reputation;

        let fresh = engine.run(peak + minute, &reference, 0, rep_b, &mut rng_b);
        reference = fresh.gates;
        rep_b = fresh.reputation;

        assert_eq!(gates, reference);
        assert_eq!(rep_a, rep_b);
    }
}
