//! Role-based authorization gate.
//!
//! All role and scope checks are consolidated here rather than scattered
//! across handlers. The gate is deliberately dumb: scope facts (does this
//! admin manage that department, is this teacher assigned to that module)
//! are resolved by the caller and passed in as booleans, so the rules stay
//! pure and testable without transport or storage.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// System roles. In the original French system: étudiant, enseignant,
/// administrateur (chef de département), direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
    Direction,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
            Self::Admin => "ADMIN",
            Self::Direction => "DIRECTION",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "STUDENT" => Some(Self::Student),
            "TEACHER" => Some(Self::Teacher),
            "ADMIN" => Some(Self::Admin),
            "DIRECTION" => Some(Self::Direction),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("only students can submit enrollment requests")]
    NotStudent,
    #[error("only the admin managing this department can decide enrollments")]
    NotDepartmentManager,
    #[error("only the module's assigned instructor can enter grades for it")]
    NotModuleInstructor,
    #[error("administrator or direction privileges required")]
    NotCatalogManager,
}

impl AccessError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }
}

/// Only students open enrollment requests.
pub fn ensure_can_submit_enrollment(role: UserRole) -> Result<(), AccessError> {
    match role {
        UserRole::Student => Ok(()),
        _ => Err(AccessError::NotStudent),
    }
}

/// Only an admin who manages the enrollment's department may validate or
/// reject it. DIRECTION reads everything but does not decide.
pub fn ensure_can_decide_enrollment(
    role: UserRole,
    manages_department: bool,
) -> Result<(), AccessError> {
    match role {
        UserRole::Admin if manages_department => Ok(()),
        _ => Err(AccessError::NotDepartmentManager),
    }
}

/// Teachers grade only their own modules; ADMIN and DIRECTION may always
/// enter grades.
pub fn ensure_can_record_grade(
    role: UserRole,
    is_assigned_instructor: bool,
) -> Result<(), AccessError> {
    match role {
        UserRole::Teacher if is_assigned_instructor => Ok(()),
        UserRole::Admin | UserRole::Direction => Ok(()),
        _ => Err(AccessError::NotModuleInstructor),
    }
}

/// Departments, programs and modules are writable by ADMIN and DIRECTION;
/// any authenticated user may read them.
pub fn ensure_can_manage_catalog(role: UserRole) -> Result<(), AccessError> {
    match role {
        UserRole::Admin | UserRole::Direction => Ok(()),
        _ => Err(AccessError::NotCatalogManager),
    }
}
