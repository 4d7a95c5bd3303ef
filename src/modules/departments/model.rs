use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A department (département). The managing admin, when set, is the only
/// admin who may decide enrollments for the department's programs.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Short unique code, e.g. "INFO" or "GC".
    #[validate(length(min = 1, max = 10))]
    pub code: String,
    pub description: Option<String>,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub code: Option<String>,
    pub description: Option<String>,
    pub manager_id: Option<Uuid>,
}
