use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::UserRole;
use crate::modules::departments::model::{CreateDepartmentDto, Department, UpdateDepartmentDto};
use crate::utils::errors::AppError;

const DEPARTMENT_COLUMNS: &str =
    "id, name, code, description, manager_id, created_at, updated_at";

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip(db, dto))]
    pub async fn create_department(
        db: &PgPool,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        if let Some(manager_id) = dto.manager_id {
            Self::ensure_admin_manager(db, manager_id).await?;
        }

        let department = sqlx::query_as::<_, Department>(&format!(
            "INSERT INTO departments (name, code, description, manager_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(&dto.description)
        .bind(dto.manager_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A department named {} or coded {} already exists",
                        dto.name, dto.code
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(department)
    }

    /// List departments. Admins see only the departments they manage;
    /// everyone else sees all of them.
    #[instrument(skip(db))]
    pub async fn get_departments(
        db: &PgPool,
        role: UserRole,
        user_id: Uuid,
    ) -> Result<Vec<Department>, AppError> {
        let departments = if role == UserRole::Admin {
            sqlx::query_as::<_, Department>(&format!(
                "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE manager_id = $1 ORDER BY name"
            ))
            .bind(user_id)
            .fetch_all(db)
            .await?
        } else {
            sqlx::query_as::<_, Department>(&format!(
                "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY name"
            ))
            .fetch_all(db)
            .await?
        };

        Ok(departments)
    }

    #[instrument(skip(db))]
    pub async fn get_department(db: &PgPool, id: Uuid) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Department not found"))?;

        Ok(department)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_department(
        db: &PgPool,
        id: Uuid,
        dto: UpdateDepartmentDto,
    ) -> Result<Department, AppError> {
        let existing = Self::get_department(db, id).await?;

        if let Some(manager_id) = dto.manager_id {
            Self::ensure_admin_manager(db, manager_id).await?;
        }

        let name = dto.name.unwrap_or(existing.name);
        let code = dto.code.unwrap_or(existing.code);
        let description = dto.description.or(existing.description);
        let manager_id = dto.manager_id.or(existing.manager_id);

        let department = sqlx::query_as::<_, Department>(&format!(
            "UPDATE departments
             SET name = $1, code = $2, description = $3, manager_id = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(&name)
        .bind(&code)
        .bind(&description)
        .bind(manager_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A department named {} or coded {} already exists",
                        name, code
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(department)
    }

    #[instrument(skip(db))]
    pub async fn delete_department(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Department not found"));
        }

        Ok(())
    }

    /// Department managers must hold the ADMIN role.
    async fn ensure_admin_manager(db: &PgPool, manager_id: Uuid) -> Result<(), AppError> {
        let role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(manager_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Manager user not found"))?;

        if role != UserRole::Admin {
            return Err(AppError::unprocessable(
                "Department manager must be an ADMIN user",
            ));
        }

        Ok(())
    }
}
