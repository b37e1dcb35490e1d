//! Event driver integration tests
//!
//! Full events run through `EventOrchestrator`: termination at the final
//! sweep, early termination on exhausted reputation, running totals,
//! the rolling log and deterministic replay.

use stadium_security_core_rs::{
    EventOrchestrator, EventPhase, GameConfig, Gate, Gender, LogSeverity, SimulationError,
    StaffMember, StaffStats, WorldState,
};
use uuid::Uuid;

// ============================================================================
// Test Helpers
// ============================================================================

/// Config where guests never carry risk flags.
fn harmless_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.engine.arrivals.fake_id_probability = 0.0;
    config.engine.arrivals.fake_ticket_probability = 0.0;
    config.engine.arrivals.mte_probability = 0.0;
    config
}

fn staffed_state(config: &GameConfig, reputation: f64) -> WorldState {
    let mut gates = Gate::standard_set(config.num_gates);
    for gate in &mut gates {
        gate.assigned_staff.push(StaffMember::new(
            Uuid::from_u128(gate.id as u128),
            "Jane".to_string(),
            "Miller".to_string(),
            31,
            Gender::Female,
            StaffStats::new(6, 6, 7, 85, 80, 5),
        ));
    }
    WorldState::new(gates, reputation, config.initial_budget)
}

// ============================================================================
// Termination
// ============================================================================

#[test]
fn test_staffed_event_runs_to_final_sweep() {
    let mut config = harmless_config();
    config.engine.queue_penalty.penalty = 0.0;
    let state = staffed_state(&config, 100.0);
    let mut event = EventOrchestrator::with_state(config, state, 42).unwrap();
    event.set_all_gates(true).unwrap();

    let report = event.run_to_completion().unwrap();

    assert!(!report.ended_early);
    assert_eq!(event.clock().format_hhmm(), "24:00");
    assert_eq!(event.totals().ticks, 360);
    assert_eq!(report.guests_processed, event.totals().guests_processed);
    assert_eq!(report.incidents_missed, 0);
    assert!(report.guests_processed > 0);
    assert!((report.reputation_change - (report.final_reputation - 100.0)).abs() < 1e-9);
    assert!(event.report().is_some());
}

#[test]
fn test_final_call_runs_no_tick() {
    let mut config = harmless_config();
    config.engine.queue_penalty.penalty = 0.0;
    let mut event = EventOrchestrator::new(config).unwrap();

    let mut last = None;
    while !event.is_finished() {
        last = Some(event.tick().unwrap());
    }
    let last = last.unwrap();

    assert!(last.is_final());
    assert!(last.summary.is_none());
    assert_eq!(last.game_time, 24 * 60);
}

#[test]
fn test_exhausted_reputation_ends_event_early() {
    let mut config = GameConfig::default();
    config.initial_reputation = 1.0;
    config.engine.queue_penalty.threshold = 0;
    config.engine.queue_penalty.penalty = 0.5;
    let mut event = EventOrchestrator::new(config).unwrap();

    let report = event.run_to_completion().unwrap();

    assert!(report.ended_early);
    assert_eq!(report.final_reputation, 0.0);
    assert_eq!(report.reputation_change, -1.0);
    assert_eq!(event.reputation(), 0.0);
    assert!(event.clock().minute() < 24 * 60);
    assert!(matches!(event.tick(), Err(SimulationError::EventFinished)));
}

// ============================================================================
// Logging and phases
// ============================================================================

#[test]
fn test_phase_changes_logged_once_each() {
    let mut config = harmless_config();
    config.engine.queue_penalty.penalty = 0.0;
    config.log_capacity = 1000;
    let mut event = EventOrchestrator::new(config).unwrap();
    event.run_to_completion().unwrap();

    let phases: Vec<&str> = event
        .log()
        .iter()
        .rev()
        .filter(|e| e.message.starts_with("Phase changed"))
        .map(|e| e.message.as_str())
        .collect();

    assert_eq!(
        phases,
        vec![
            "Phase changed: Gates Opening",
            "Phase changed: Peak Rush",
            "Phase changed: Game Started",
            "Phase changed: Halftime",
            "Phase changed: Game End Rush",
            "Phase changed: Gates Closed",
        ]
    );
    assert_eq!(event.phase(), EventPhase::GatesClosed);
}

#[test]
fn test_log_is_bounded_and_newest_first() {
    let mut config = GameConfig::default();
    config.log_capacity = 10;
    let state = staffed_state(&config, 100.0);
    let mut event = EventOrchestrator::with_state(config, state, 7).unwrap();
    event.set_all_gates(true).unwrap();

    for _ in 0..200 {
        if event.tick().unwrap().is_final() {
            break;
        }
    }

    let log = event.log();
    assert!(log.len() <= 10);
    let seqs: Vec<u64> = log.iter().map(|e| e.seq).collect();
    assert!(seqs.windows(2).all(|w| w[0] > w[1]));
    assert!(log.count_severity(LogSeverity::Info) <= log.len());
}

// ============================================================================
// Determinism and snapshots
// ============================================================================

#[test]
fn test_same_seed_replays_identically() {
    let config = GameConfig::default();
    let mut a = EventOrchestrator::with_state(config.clone(), staffed_state(&config, 100.0), 2024).unwrap();
    let mut b = EventOrchestrator::with_state(config.clone(), staffed_state(&config, 100.0), 2024).unwrap();
    a.set_all_gates(true).unwrap();
    b.set_all_gates(true).unwrap();

    for _ in 0..120 {
        let left = a.tick().unwrap();
        let right = b.tick().unwrap();
        assert_eq!(left, right);
        assert_eq!(a.state().fingerprint(), b.state().fingerprint());
        if left.is_final() {
            break;
        }
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut config = harmless_config();
    config.engine.queue_penalty.penalty = 0.0;
    let mut a = EventOrchestrator::with_state(config.clone(), staffed_state(&config, 100.0), 1).unwrap();
    let mut b = EventOrchestrator::with_state(config.clone(), staffed_state(&config, 100.0), 2).unwrap();

    // run until well into the arrival window
    for _ in 0..120 {
        a.tick().unwrap();
        b.tick().unwrap();
    }
    assert_ne!(a.state().fingerprint(), b.state().fingerprint());
}

#[test]
fn test_previous_gates_survive_the_next_tick() {
    let mut config = harmless_config();
    config.engine.queue_penalty.penalty = 0.0;
    let mut event = EventOrchestrator::with_state(config.clone(), staffed_state(&config, 100.0), 5).unwrap();
    event.set_all_gates(true).unwrap();

    for _ in 0..90 {
        event.tick().unwrap();
    }
    let snapshot = event.gates().to_vec();
    event.tick().unwrap();

    assert_eq!(event.previous_gates(), snapshot.as_slice());
    // staff focus only goes down between the two
    for (now, before) in event.gates().iter().zip(&snapshot) {
        assert!(now.assigned_staff[0].current_focus() < before.assigned_staff[0].current_focus());
    }
}

#[test]
fn test_guest_pool_caps_queued_guests() {
    let mut config = harmless_config();
    config.guest_pool = 40;
    config.engine.queue_penalty.penalty = 0.0;
    let mut event = EventOrchestrator::new(config).unwrap();

    for _ in 0..240 {
        event.tick().unwrap();
        assert!(event.total_queue_size() <= 40);
    }
}
