use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A taught module (matière) within a program. Named `CourseModule` to keep
/// it distinct from Rust modules.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CourseModule {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub program_id: Uuid,
    pub instructor_id: Option<Uuid>,
    pub semester: i32,
    pub coefficient: f64,
    pub lecture_hours: i32,
    pub tutorial_hours: i32,
    pub lab_hours: i32,
    /// Sum of lecture, tutorial and lab hours, computed by the query.
    pub total_hours: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseModuleDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    pub program_id: Uuid,
    /// Assigned instructor; must hold the TEACHER role.
    pub instructor_id: Option<Uuid>,
    #[validate(range(min = 1, max = 6, message = "semester must be between 1 and 6"))]
    pub semester: i32,
    #[validate(range(exclusive_min = 0.0, message = "coefficient must be positive"))]
    pub coefficient: f64,
    #[validate(range(min = 0))]
    pub lecture_hours: i32,
    #[validate(range(min = 0))]
    pub tutorial_hours: i32,
    #[validate(range(min = 0))]
    pub lab_hours: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseModuleDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub code: Option<String>,
    pub instructor_id: Option<Uuid>,
    #[validate(range(min = 1, max = 6, message = "semester must be between 1 and 6"))]
    pub semester: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "coefficient must be positive"))]
    pub coefficient: Option<f64>,
    #[validate(range(min = 0))]
    pub lecture_hours: Option<i32>,
    #[validate(range(min = 0))]
    pub tutorial_hours: Option<i32>,
    #[validate(range(min = 0))]
    pub lab_hours: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseModuleFilterParams {
    /// Restrict to one program.
    pub program: Option<Uuid>,
    /// Restrict to one semester (1–6).
    pub semester: Option<i32>,
}
