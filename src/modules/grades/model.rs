use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A grade (note) for one student in one module and academic year.
/// `final_score` is always derived from the two input scores; it is never
/// accepted from a client.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub student_id: Uuid,
    pub module_id: Uuid,
    pub academic_year: String,
    pub continuous_score: f64,
    pub exam_score: f64,
    pub final_score: f64,
    pub entered_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordGradeDto {
    pub student_id: Uuid,
    pub module_id: Uuid,
    /// Academic year in `YYYY-YYYY` form.
    #[validate(length(min = 1))]
    pub academic_year: String,
    /// Continuous-assessment score, 0–20.
    pub continuous_score: f64,
    /// Exam score, 0–20.
    pub exam_score: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkGradeItem {
    pub student_id: Uuid,
    pub continuous_score: f64,
    pub exam_score: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkRecordGradesDto {
    pub module_id: Uuid,
    #[validate(length(min = 1))]
    pub academic_year: String,
    #[validate(length(min = 1, message = "grades must not be empty"))]
    pub grades: Vec<BulkGradeItem>,
}

/// Outcome of one item in a bulk grade upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkGradeFailure {
    pub student_id: Uuid,
    pub error: String,
}

/// Aggregate result of a bulk grade upload: one item's failure never aborts
/// the rest of the batch.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkRecordResult {
    pub succeeded: usize,
    pub failures: Vec<BulkGradeFailure>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GradeFilterParams {
    /// Restrict to one academic year.
    pub academic_year: Option<String>,
}
