use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::UserRole;
use crate::modules::programs::model::{
    CreateProgramDto, Program, ProgramDetails, ProgramFilterParams, UpdateProgramDto,
};
use crate::utils::errors::AppError;

const PROGRAM_COLUMNS: &str =
    "id, name, code, department_id, level, capacity, description, created_at, updated_at";

pub struct ProgramService;

impl ProgramService {
    #[instrument(skip(db, dto))]
    pub async fn create_program(db: &PgPool, dto: CreateProgramDto) -> Result<Program, AppError> {
        // Surface a clean 404 instead of a foreign key violation.
        crate::modules::departments::service::DepartmentService::get_department(
            db,
            dto.department_id,
        )
        .await?;

        let program = sqlx::query_as::<_, Program>(&format!(
            "INSERT INTO programs (name, code, department_id, level, capacity, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(dto.department_id)
        .bind(dto.level)
        .bind(dto.capacity)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A program coded {} already exists in this department",
                        dto.code
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(program)
    }

    /// List programs. Admins are restricted to their managed departments;
    /// optional department and level filters apply on top.
    #[instrument(skip(db))]
    pub async fn get_programs(
        db: &PgPool,
        role: UserRole,
        user_id: Uuid,
        params: &ProgramFilterParams,
    ) -> Result<Vec<Program>, AppError> {
        let manager_scope = if role == UserRole::Admin {
            Some(user_id)
        } else {
            None
        };

        let programs = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs
             WHERE ($1::uuid IS NULL
                    OR department_id IN (SELECT id FROM departments WHERE manager_id = $1))
               AND ($2::uuid IS NULL OR department_id = $2)
               AND ($3::program_level IS NULL OR level = $3)
             ORDER BY name"
        ))
        .bind(manager_scope)
        .bind(params.department)
        .bind(params.level)
        .fetch_all(db)
        .await?;

        Ok(programs)
    }

    /// Program detail with module count and seat usage. Seats taken counts
    /// PENDING and VALIDATED enrollments; rejected requests never occupy a
    /// seat.
    #[instrument(skip(db))]
    pub async fn get_program_details(db: &PgPool, id: Uuid) -> Result<ProgramDetails, AppError> {
        let details = sqlx::query_as::<_, ProgramDetails>(&format!(
            "SELECT {PROGRAM_COLUMNS},
                    (SELECT COUNT(*) FROM course_modules m WHERE m.program_id = p.id)
                        AS modules_count,
                    (SELECT COUNT(*) FROM enrollments e
                      WHERE e.program_id = p.id AND e.status IN ('PENDING', 'VALIDATED'))
                        AS seats_taken,
                    GREATEST(
                        p.capacity - (SELECT COUNT(*) FROM enrollments e
                                       WHERE e.program_id = p.id
                                         AND e.status IN ('PENDING', 'VALIDATED')),
                        0
                    ) AS seats_remaining
             FROM programs p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Program not found"))?;

        Ok(details)
    }

    #[instrument(skip(db))]
    pub async fn get_program(db: &PgPool, id: Uuid) -> Result<Program, AppError> {
        let program = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Program not found"))?;

        Ok(program)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_program(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProgramDto,
    ) -> Result<Program, AppError> {
        let existing = Self::get_program(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let code = dto.code.unwrap_or(existing.code);
        let level = dto.level.unwrap_or(existing.level);
        let capacity = dto.capacity.unwrap_or(existing.capacity);
        let description = dto.description.or(existing.description);

        let program = sqlx::query_as::<_, Program>(&format!(
            "UPDATE programs
             SET name = $1, code = $2, level = $3, capacity = $4, description = $5,
                 updated_at = NOW()
             WHERE id = $6
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(&name)
        .bind(&code)
        .bind(level)
        .bind(capacity)
        .bind(&description)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A program coded {} already exists in this department",
                        code
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(program)
    }

    #[instrument(skip(db))]
    pub async fn delete_program(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Program not found"));
        }

        Ok(())
    }
}
