//! Enrollment request state machine.
//!
//! An enrollment starts PENDING and is moved exactly once, by an admin, to
//! VALIDATED or REJECTED. Both outcomes are terminal. A seat in a program is
//! occupied by PENDING and VALIDATED enrollments alike; rejected requests
//! free their seat.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Maximum number of simultaneously PENDING requests a student may hold,
/// across all programs and academic years.
pub const MAX_PENDING_PER_STUDENT: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "enrollment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    Pending,
    Validated,
    Rejected,
}

impl EnrollmentStatus {
    /// PENDING and VALIDATED enrollments both occupy a seat; REJECTED never
    /// counts against capacity.
    pub fn occupies_seat(self) -> bool {
        matches!(self, Self::Pending | Self::Validated)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Validated | Self::Rejected)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Validated => write!(f, "VALIDATED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// The admin's ruling on a pending enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentDecision {
    Validated,
    Rejected,
}

impl EnrollmentDecision {
    pub fn as_status(self) -> EnrollmentStatus {
        match self {
            Self::Validated => EnrollmentStatus::Validated,
            Self::Rejected => EnrollmentStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentError {
    #[error("academic year must be \"YYYY-YYYY\" with consecutive years, got \"{0}\"")]
    InvalidYear(String),
    #[error("an enrollment for this student, program and academic year already exists")]
    Duplicate,
    #[error("program is full: all {capacity} seats are taken")]
    CapacityFull { capacity: i32 },
    #[error(
        "student already has {MAX_PENDING_PER_STUDENT} pending enrollment requests; \
         wait for a decision before submitting another"
    )]
    TooManyPending,
    #[error("enrollment has already been processed (status {0})")]
    NotPending(EnrollmentStatus),
    #[error("a rejection reason is required when rejecting an enrollment")]
    MissingReason,
}

impl EnrollmentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidYear(_) | Self::MissingReason => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Duplicate
            | Self::CapacityFull { .. }
            | Self::TooManyPending
            | Self::NotPending(_) => StatusCode::CONFLICT,
        }
    }
}

/// A validated academic year such as `2024-2025`.
///
/// The wire format is `YYYY-YYYY` where the second year is exactly the first
/// plus one. Parsing is the only way to construct one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "2024-2025")]
pub struct AcademicYear(String);

impl AcademicYear {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for AcademicYear {
    type Err = EnrollmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EnrollmentError::InvalidYear(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 4 {
            return Err(invalid());
        }
        let start: u32 = start.parse().map_err(|_| invalid())?;
        let end: u32 = end.parse().map_err(|_| invalid())?;
        if end != start + 1 {
            return Err(invalid());
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Preconditions for creating a new PENDING enrollment.
///
/// `active_count` is the program's current number of seat-occupying
/// enrollments (see [`EnrollmentStatus::occupies_seat`]) and
/// `student_pending` the student's open request count, both read inside the
/// same transaction as the insert. Uniqueness of (student, program, year) is
/// enforced by the database constraint, not here.
pub fn check_submit(
    active_count: i64,
    capacity: i32,
    student_pending: i64,
) -> Result<(), EnrollmentError> {
    if student_pending >= MAX_PENDING_PER_STUDENT {
        return Err(EnrollmentError::TooManyPending);
    }
    if active_count >= i64::from(capacity) {
        return Err(EnrollmentError::CapacityFull { capacity });
    }
    Ok(())
}

/// Only PENDING requests may still be decided; VALIDATED and REJECTED are
/// terminal.
pub fn check_decidable(current: EnrollmentStatus) -> Result<(), EnrollmentError> {
    if current != EnrollmentStatus::Pending {
        return Err(EnrollmentError::NotPending(current));
    }
    Ok(())
}

/// Preconditions for deciding an enrollment: the request must still be
/// PENDING and a rejection must carry a non-empty reason. Authorization is
/// checked separately by [`crate::domain::access`].
pub fn check_decision(
    current: EnrollmentStatus,
    decision: EnrollmentDecision,
    reason: Option<&str>,
) -> Result<(), EnrollmentError> {
    check_decidable(current)?;
    if decision == EnrollmentDecision::Rejected && reason.is_none_or(|r| r.trim().is_empty()) {
        return Err(EnrollmentError::MissingReason);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn academic_year_accepts_consecutive_years() {
        assert!("2024-2025".parse::<AcademicYear>().is_ok());
        assert!("1999-2000".parse::<AcademicYear>().is_ok());
    }

    #[test]
    fn academic_year_rejects_bad_shapes() {
        for s in ["2024", "2024-2026", "2025-2024", "24-25", "2024/2025", "abcd-efgh", ""] {
            assert!(s.parse::<AcademicYear>().is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn rejected_does_not_occupy_a_seat() {
        assert!(EnrollmentStatus::Pending.occupies_seat());
        assert!(EnrollmentStatus::Validated.occupies_seat());
        assert!(!EnrollmentStatus::Rejected.occupies_seat());
    }
}
