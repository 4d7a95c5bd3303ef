use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Academic level of a program (filière).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "program_level", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProgramLevel {
    License,
    Master,
    Doctorate,
}

/// A program (filière) with a fixed admission capacity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub department_id: Uuid,
    pub level: ProgramLevel,
    pub capacity: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Program with seat usage. Pending and validated enrollments both hold a
/// seat.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProgramDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub program: Program,
    pub modules_count: i64,
    pub seats_taken: i64,
    pub seats_remaining: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProgramDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Short code, unique within the department, e.g. "GI" or "RT".
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    pub department_id: Uuid,
    pub level: ProgramLevel,
    #[validate(range(min = 1, message = "capacity must be a positive integer"))]
    pub capacity: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProgramDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub code: Option<String>,
    pub level: Option<ProgramLevel>,
    #[validate(range(min = 1, message = "capacity must be a positive integer"))]
    pub capacity: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProgramFilterParams {
    /// Restrict to one department.
    pub department: Option<Uuid>,
    /// Restrict to one academic level.
    pub level: Option<ProgramLevel>,
}
