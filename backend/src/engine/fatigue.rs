//! Queue penalty and staff fatigue (tick stage 4).

use crate::core::time::EventTimeline;
use crate::models::{Gate, StaffMember};

use super::config::{FatigueConfig, QueuePenaltyConfig};

/// Total reputation lost to long queues this tick.
///
/// Every gate whose queue is strictly longer than the threshold costs the
/// flat penalty, open or closed.
pub fn queue_penalty(gates: &[Gate], config: &QueuePenaltyConfig) -> f64 {
    let long_queues = gates
        .iter()
        .filter(|g| g.queue_len() > config.threshold)
        .count();
    long_queues as f64 * config.penalty
}

/// Base focus lost per tick, before the sustainability factor.
///
/// Scaled so that at `decay_scale = 1.0` a staff member with 50%
/// sustainability loses 90 focus points over a full default event.
pub fn base_decay_per_tick(timeline: &EventTimeline, config: &FatigueConfig) -> f64 {
    let duration = timeline.duration_minutes().max(1);
    config.decay_scale * 60.0 / duration as f64
}

/// Focus lost this tick by one staff member.
pub fn focus_decay_per_tick(staff: &StaffMember, base: f64) -> f64 {
    let sustainability = f64::from(staff.stats().focus_sustainability()) / 100.0;
    base * (2.0 - sustainability)
}

/// Decay every assigned staff member's focus; returns how many were touched.
pub fn apply_focus_decay(gates: &mut [Gate], base: f64) -> usize {
    let mut touched = 0;
    for staff in gates.iter_mut().flat_map(|g| g.assigned_staff.iter_mut()) {
        let amount = focus_decay_per_tick(staff, base);
        staff.apply_focus_decay(amount);
        touched += 1;
    }
    touched
}
