//! Grade validation and final-score computation.
//!
//! A grade combines a continuous-assessment score and an exam score, both on
//! the French 0–20 scale. The final score is always derived from the two
//! inputs by [`compute_final`] and is never accepted from a client.

use axum::http::StatusCode;

/// Weight of the continuous-assessment score in the final grade.
pub const CONTINUOUS_WEIGHT: f64 = 0.4;
/// Weight of the exam score in the final grade.
pub const EXAM_WEIGHT: f64 = 0.6;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error("{field} score {value} is out of range (expected {MIN_SCORE} to {MAX_SCORE})")]
    OutOfRange { field: &'static str, value: f64 },
}

impl GradeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::OutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Check that a score is a finite value on the 0–20 scale.
pub fn validate_score(field: &'static str, value: f64) -> Result<(), GradeError> {
    if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return Err(GradeError::OutOfRange { field, value });
    }
    Ok(())
}

/// Weighted average of the two input scores, rounded to two decimals.
///
/// Callers must validate both inputs with [`validate_score`] first; this
/// function assumes they are in range.
pub fn compute_final(continuous: f64, exam: f64) -> f64 {
    let raw = continuous * CONTINUOUS_WEIGHT + exam * EXAM_WEIGHT;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((CONTINUOUS_WEIGHT + EXAM_WEIGHT - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn final_score_is_rounded_to_two_decimals() {
        // 12.345 * 0.4 + 9.87 * 0.6 = 10.86
        assert_eq!(compute_final(12.345, 9.87), 10.86);
    }
}
