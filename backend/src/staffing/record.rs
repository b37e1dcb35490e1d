//! Applicant records as produced by an external CV generator.
//!
//! Remote producers are loosely constrained, so every numeric field is
//! clamped into the range the game expects before a staff member is built.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use uuid::Uuid;

use crate::models::{Gender, StaffMember, StaffStats};
use crate::rng::RandomSource;

use super::{ApplicantError, ApplicantSource};

/// One CV in the external JSON shape (camelCase, flat stats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
    pub physical_strength: i64,
    pub communication: i64,
    pub observation: i64,
    pub reliability: i64,
    pub focus_sustainability: i64,
    pub quit_risk: i64,
    #[serde(default)]
    pub salary: Option<i64>,
}

impl ApplicantRecord {
    /// Validate and clamp into a staff member.
    ///
    /// Age 18-65, skills 1-10, reliability 50-100, focus sustainability
    /// 40-100, quit risk 1-25. An unknown gender is rejected.
    pub fn into_staff(self, id: Uuid) -> Result<StaffMember, ApplicantError> {
        let gender: Gender = self.gender.parse().map_err(ApplicantError::InvalidRecord)?;
        let stats = StaffStats::new(
            self.physical_strength.clamp(1, 10),
            self.communication.clamp(1, 10),
            self.observation.clamp(1, 10),
            self.reliability.clamp(50, 100),
            self.focus_sustainability.clamp(40, 100),
            self.quit_risk.clamp(1, 25),
        );
        let staff = StaffMember::new(
            id,
            self.first_name,
            self.last_name,
            self.age.clamp(18, 65) as u8,
            gender,
            stats,
        );
        Ok(match self.salary {
            Some(salary) => staff.with_salary(salary),
            None => staff,
        })
    }
}

/// Applicant source over a queue of raw JSON records.
///
/// Records are parsed one at a time, so a malformed entry only fails the
/// applicant it belongs to.
pub struct RecordFeed<R: RandomSource> {
    records: VecDeque<serde_json::Value>,
    rng: R,
}

impl<R: RandomSource> RecordFeed<R> {
    /// `rng` supplies the ids of the built staff members.
    pub fn new(records: impl IntoIterator<Item = serde_json::Value>, rng: R) -> Self {
        Self {
            records: records.into_iter().collect(),
            rng,
        }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str, rng: R) -> Result<Self, ApplicantError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::new(records, rng))
    }

    pub fn from_json_file(path: impl AsRef<Path>, rng: R) -> Result<Self, ApplicantError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text, rng)
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl<R: RandomSource> ApplicantSource for RecordFeed<R> {
    fn next_applicant(&mut self) -> Result<StaffMember, ApplicantError> {
        let value = self.records.pop_front().ok_or(ApplicantError::Exhausted)?;
        let record: ApplicantRecord = serde_json::from_value(value)?;
        record.into_staff(self.rng.uuid())
    }
}
