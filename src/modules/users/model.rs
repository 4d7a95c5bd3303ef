use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub use crate::domain::access::UserRole;

/// A user account. `cne` is the national student identifier (students only,
/// opaque to the backend); `matricule` is the staff registration number.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub cne: Option<String>,
    pub matricule: Option<String>,
    pub created_at: DateTime<Utc>,
}
