//! Staff model
//!
//! A hired security worker. Stats are fixed once hired; only
//! `current_focus` changes, and only downwards, while an event runs.
//!
//! Stat ranges:
//! - physical strength, communication, observation: 1-10
//! - reliability, focus sustainability, quit risk: 0-100 (%)
//! - current focus: 0-100 (%), starts at 100

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Focus every staff member starts an event with.
pub const FULL_FOCUS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Immutable skill bundle of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffStats {
    physical_strength: u8,
    communication: u8,
    observation: u8,
    reliability: u8,
    focus_sustainability: u8,
    quit_risk: u8,
}

impl StaffStats {
    /// Build a stats bundle, clamping every value into its documented range.
    ///
    /// # Example
    /// ```
    /// use stadium_security_core_rs::StaffStats;
    ///
    /// let stats = StaffStats::new(0, 12, 7, 150, 80, 5);
    /// assert_eq!(stats.physical_strength(), 1);
    /// assert_eq!(stats.communication(), 10);
    /// assert_eq!(stats.reliability(), 100);
    /// ```
    pub fn new(
        physical_strength: i64,
        communication: i64,
        observation: i64,
        reliability: i64,
        focus_sustainability: i64,
        quit_risk: i64,
    ) -> Self {
        Self {
            physical_strength: clamp_u8(physical_strength, 1, 10),
            communication: clamp_u8(communication, 1, 10),
            observation: clamp_u8(observation, 1, 10),
            reliability: clamp_u8(reliability, 0, 100),
            focus_sustainability: clamp_u8(focus_sustainability, 0, 100),
            quit_risk: clamp_u8(quit_risk, 0, 100),
        }
    }

    pub fn physical_strength(&self) -> u8 {
        self.physical_strength
    }

    pub fn communication(&self) -> u8 {
        self.communication
    }

    pub fn observation(&self) -> u8 {
        self.observation
    }

    pub fn reliability(&self) -> u8 {
        self.reliability
    }

    pub fn focus_sustainability(&self) -> u8 {
        self.focus_sustainability
    }

    pub fn quit_risk(&self) -> u8 {
        self.quit_risk
    }

    /// Asking salary for an applicant with these stats.
    ///
    /// Observation is weighted highest since it is what screening uses;
    /// a high quit risk lowers the asking price.
    pub fn market_salary(&self) -> i64 {
        let skills = self.observation as i64 * 40
            + self.communication as i64 * 15
            + self.physical_strength as i64 * 15;
        let dependability = self.reliability as i64 * 2 + self.focus_sustainability as i64 * 2;
        (150 + skills + dependability - self.quit_risk as i64 * 3).max(100)
    }
}

fn clamp_u8(value: i64, min: u8, max: u8) -> u8 {
    value.clamp(min as i64, max as i64) as u8
}

/// A hired (or applying) security worker
///
/// # Example
/// ```
/// use stadium_security_core_rs::{Gender, StaffMember, StaffStats};
/// use uuid::Uuid;
///
/// let staff = StaffMember::new(
///     Uuid::nil(),
///     "Jane".to_string(),
///     "Doe".to_string(),
///     30,
///     Gender::Female,
///     StaffStats::new(5, 5, 8, 90, 80, 5),
/// );
/// assert_eq!(staff.current_focus(), 100.0);
/// assert_eq!(staff.effective_observation(), 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    id: Uuid,
    first_name: String,
    last_name: String,
    age: u8,
    gender: Gender,
    salary: i64,
    stats: StaffStats,
    current_focus: f64,
}

impl StaffMember {
    /// New staff member at full focus, salary derived from stats.
    pub fn new(
        id: Uuid,
        first_name: String,
        last_name: String,
        age: u8,
        gender: Gender,
        stats: StaffStats,
    ) -> Self {
        let salary = stats.market_salary();
        Self {
            id,
            first_name,
            last_name,
            age,
            gender,
            salary,
            stats,
            current_focus: FULL_FOCUS,
        }
    }

    /// Override the derived salary (producer-supplied figure).
    pub fn with_salary(mut self, salary: i64) -> Self {
        self.salary = salary.max(0);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn salary(&self) -> i64 {
        self.salary
    }

    pub fn stats(&self) -> &StaffStats {
        &self.stats
    }

    pub fn current_focus(&self) -> f64 {
        self.current_focus
    }

    /// Screening acuity right now: observation scaled by remaining focus.
    pub fn effective_observation(&self) -> f64 {
        self.stats.observation as f64 * (self.current_focus / 100.0)
    }

    /// Lower focus by `amount`, never below zero. Negative amounts are ignored.
    pub fn apply_focus_decay(&mut self, amount: f64) {
        if amount > 0.0 {
            self.current_focus = (self.current_focus - amount).max(0.0);
        }
    }
}
