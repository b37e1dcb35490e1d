//! Local mock CV generator.
//!
//! Produces plausible mid-range applicants from fixed name lists. Every draw
//! comes from the injected random source, so a seeded generator always
//! yields the same applicant pool.

use crate::models::{Gender, StaffMember, StaffStats};
use crate::rng::RandomSource;

use super::{ApplicantError, ApplicantSource};

const FIRST_NAMES: [&str; 9] = [
    "John", "Jane", "Alex", "Emily", "Chris", "Michael", "Sarah", "David", "Laura",
];
const LAST_NAMES: [&str; 8] = [
    "Smith", "Doe", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
];

pub struct LocalApplicantGenerator<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> LocalApplicantGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Roll one applicant. Never fails.
    pub fn generate(&mut self) -> StaffMember {
        let rng = &mut self.rng;
        let id = rng.uuid();
        let gender = if rng.chance(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };
        let first_name = FIRST_NAMES[rng.range(0, FIRST_NAMES.len() as i64) as usize];
        let last_name = LAST_NAMES[rng.range(0, LAST_NAMES.len() as i64) as usize];
        let age = rng.range_inclusive(21, 55) as u8;

        let stats = StaffStats::new(
            rng.range_inclusive(2, 8),
            rng.range_inclusive(2, 8),
            rng.range_inclusive(2, 8),
            rng.range_inclusive(60, 99),
            rng.range_inclusive(50, 95),
            rng.range_inclusive(1, 20),
        );

        StaffMember::new(
            id,
            first_name.to_string(),
            last_name.to_string(),
            age,
            gender,
            stats,
        )
    }
}

impl<R: RandomSource> ApplicantSource for LocalApplicantGenerator<R> {
    fn next_applicant(&mut self) -> Result<StaffMember, ApplicantError> {
        Ok(self.generate())
    }
}
