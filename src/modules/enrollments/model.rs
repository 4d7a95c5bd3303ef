use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub use crate::domain::enrollment::{AcademicYear, EnrollmentDecision, EnrollmentStatus};

/// A student's enrollment request (inscription) for a program and academic
/// year. Created PENDING; decided exactly once by the managing admin.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub program_id: Uuid,
    pub academic_year: String,
    pub status: EnrollmentStatus,
    pub validated_by: Option<Uuid>,
    pub validation_date: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitEnrollmentDto {
    pub program_id: Uuid,
    /// Academic year in `YYYY-YYYY` form, e.g. "2024-2025".
    #[validate(length(min = 1))]
    pub academic_year: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecideEnrollmentDto {
    pub decision: EnrollmentDecision,
    /// Required when rejecting.
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EnrollmentFilterParams {
    /// Restrict to one status.
    pub status: Option<EnrollmentStatus>,
    /// Restrict to one academic year.
    pub academic_year: Option<String>,
}
