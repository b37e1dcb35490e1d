//! Queue switching (tick stage 2).
//!
//! Every queued guest may abandon their line. Decisions are made against a
//! single snapshot of queue lengths and open flags, collected as
//! [`PlannedMove`]s, and only then applied as one batch.

use crate::models::Gate;
use crate::rng::RandomSource;

use super::config::SwitchingConfig;

/// One guest leaving `from_gate` (at `guest_index` in the snapshot) for the
/// back of `to_gate`'s queue. Gate fields are indices into the gate slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub from_gate: usize,
    pub guest_index: usize,
    pub to_gate: usize,
}

/// Score penalty for a gate's open state.
fn closure_penalty(gate: &Gate, any_open: bool, config: &SwitchingConfig) -> f64 {
    if gate.is_open {
        0.0
    } else if any_open {
        config.closed_penalty_with_open_alternative
    } else {
        config.closed_penalty_without_alternative
    }
}

/// Score penalty for walking `distance` gates over; grows faster past the
/// near threshold.
pub fn distance_penalty(distance: usize, config: &SwitchingConfig) -> f64 {
    let far = distance.saturating_sub(config.far_distance_threshold);
    distance as f64 * config.distance_weight + far as f64 * config.far_distance_weight
}

/// Probability-like propensity of a guest at `gate` to consider moving.
pub fn willingness(gate: &Gate, any_open: bool, config: &SwitchingConfig) -> f64 {
    let pressure = (gate.queue_len() as f64 / config.pressure_divisor).min(config.max_pressure);
    let frustration = match (gate.is_open, any_open) {
        (true, _) => 0.0,
        (false, true) => config.closed_frustration_with_open_alternative,
        (false, false) => config.closed_frustration_without_alternative,
    };
    config.base_willingness + pressure + frustration
}

/// Decide every guest's move against the current snapshot.
///
/// Draw order per guest: one draw for the laziness check, then (if the guest
/// considers moving) one jitter draw per other gate, in gate order.
pub fn plan_moves<R: RandomSource + ?Sized>(
    gates: &[Gate],
    config: &SwitchingConfig,
    rng: &mut R,
) -> Vec<PlannedMove> {
    let any_open = gates.iter().any(|g| g.is_open);
    let mut moves = Vec::new();

    for (gate_index, gate) in gates.iter().enumerate() {
        let threshold = willingness(gate, any_open, config).min(config.max_willingness);
        let current_score = gate.queue_len() as f64 + closure_penalty(gate, any_open, config);

        for guest_index in 0..gate.queue_len() {
            // lazy or irrational guests stay put
            if rng.next_f64() > threshold {
                continue;
            }

            let mut best: Option<usize> = None;
            let mut best_score = current_score;

            for (other_index, other) in gates.iter().enumerate() {
                if other_index == gate_index {
                    continue;
                }
                let distance = other_index.abs_diff(gate_index);
                let score = other.queue_len() as f64
                    + distance_penalty(distance, config)
                    + closure_penalty(other, any_open, config)
                    - rng.next_f64();

                if score + config.switch_margin < best_score {
                    best_score = score;
                    best = Some(other_index);
                }
            }

            if let Some(to_gate) = best {
                moves.push(PlannedMove {
                    from_gate: gate_index,
                    guest_index,
                    to_gate,
                });
            }
        }
    }

    moves
}

/// Apply planned moves; returns how many guests actually moved.
///
/// Removals run in descending (source gate, guest index) order so that no
/// removal shifts the index of one still pending. Guests appended to a
/// destination land behind every snapshot index, so they never disturb a
/// pending removal either.
pub fn apply_moves(gates: &mut [Gate], mut moves: Vec<PlannedMove>) -> usize {
    moves.sort_by(|a, b| {
        b.from_gate
            .cmp(&a.from_gate)
            .then(b.guest_index.cmp(&a.guest_index))
    });

    let mut moved = 0;
    for planned in moves {
        let Some(source) = gates.get_mut(planned.from_gate) else {
            continue;
        };
        let Some(guest) = source.queue.remove(planned.guest_index) else {
            continue;
        };
        match gates.get_mut(planned.to_gate) {
            Some(destination) => {
                destination.queue.push_back(guest);
                moved += 1;
            }
            // bad destination: put the guest back where they were
            None => gates[planned.from_gate].queue.insert(planned.guest_index, guest),
        }
    }
    moved
}
