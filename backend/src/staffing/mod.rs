//! Staffing - where staff members come from and where they work
//!
//! Applicant producers sit outside the simulation proper: the engine only
//! ever sees finished [`StaffMember`] records. A remote or file-backed
//! producer can fail; wrapping it in a [`FallbackApplicantSource`] degrades to
//! the local generator so callers never see that failure.

pub mod local;
pub mod record;
pub mod roster;

pub use local::LocalApplicantGenerator;
pub use record::{ApplicantRecord, RecordFeed};
pub use roster::{Roster, RosterError};

use thiserror::Error;
use tracing::warn;

use crate::models::StaffMember;

#[derive(Debug, Error)]
pub enum ApplicantError {
    #[error("No applicants left")]
    Exhausted,

    #[error("Malformed applicant record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid applicant record: {0}")]
    InvalidRecord(String),

    #[error("Failed to read applicants: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that produces hireable staff members.
pub trait ApplicantSource {
    fn next_applicant(&mut self) -> Result<StaffMember, ApplicantError>;

    /// Draw `count` applicants, stopping at the first error.
    fn applicants(&mut self, count: usize) -> Result<Vec<StaffMember>, ApplicantError> {
        (0..count).map(|_| self.next_applicant()).collect()
    }
}

impl<S: ApplicantSource + ?Sized> ApplicantSource for Box<S> {
    fn next_applicant(&mut self) -> Result<StaffMember, ApplicantError> {
        (**self).next_applicant()
    }
}

/// Try `primary`; on any error log it and use `fallback` instead.
pub struct FallbackApplicantSource<P, F> {
    primary: P,
    fallback: F,
    fallbacks_used: usize,
}

impl<P: ApplicantSource, F: ApplicantSource> FallbackApplicantSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            fallbacks_used: 0,
        }
    }

    /// How many applicants came from the fallback so far.
    pub fn fallbacks_used(&self) -> usize {
        self.fallbacks_used
    }
}

impl<P: ApplicantSource, F: ApplicantSource> ApplicantSource for FallbackApplicantSource<P, F> {
    fn next_applicant(&mut self) -> Result<StaffMember, ApplicantError> {
        match self.primary.next_applicant() {
            Ok(staff) => Ok(staff),
            Err(error) => {
                warn!(target: "staffing", %error, "applicant source failed, using fallback");
                self.fallbacks_used += 1;
                self.fallback.next_applicant()
            }
        }
    }
}
