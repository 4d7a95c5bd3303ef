use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::UserRole;
use crate::modules::course_modules::model::{
    CourseModule, CourseModuleFilterParams, CreateCourseModuleDto, UpdateCourseModuleDto,
};
use crate::utils::errors::AppError;

const MODULE_COLUMNS: &str = "id, name, code, program_id, instructor_id, semester, coefficient, \
                              lecture_hours, tutorial_hours, lab_hours, \
                              lecture_hours + tutorial_hours + lab_hours AS total_hours, \
                              description, created_at, updated_at";

pub struct CourseModuleService;

impl CourseModuleService {
    #[instrument(skip(db, dto))]
    pub async fn create_module(
        db: &PgPool,
        dto: CreateCourseModuleDto,
    ) -> Result<CourseModule, AppError> {
        crate::modules::programs::service::ProgramService::get_program(db, dto.program_id).await?;

        if let Some(instructor_id) = dto.instructor_id {
            Self::ensure_teacher_instructor(db, instructor_id).await?;
        }

        let module = sqlx::query_as::<_, CourseModule>(&format!(
            "INSERT INTO course_modules
                 (name, code, program_id, instructor_id, semester, coefficient,
                  lecture_hours, tutorial_hours, lab_hours, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {MODULE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(dto.program_id)
        .bind(dto.instructor_id)
        .bind(dto.semester)
        .bind(dto.coefficient)
        .bind(dto.lecture_hours)
        .bind(dto.tutorial_hours)
        .bind(dto.lab_hours)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A module coded {} already exists in this program",
                        dto.code
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(module)
    }

    /// List modules. Teachers see only the modules assigned to them, admins
    /// the modules of their managed departments; optional program and
    /// semester filters apply on top.
    #[instrument(skip(db))]
    pub async fn get_modules(
        db: &PgPool,
        role: UserRole,
        user_id: Uuid,
        params: &CourseModuleFilterParams,
    ) -> Result<Vec<CourseModule>, AppError> {
        let instructor_scope = if role == UserRole::Teacher {
            Some(user_id)
        } else {
            None
        };
        let manager_scope = if role == UserRole::Admin {
            Some(user_id)
        } else {
            None
        };

        let modules = sqlx::query_as::<_, CourseModule>(&format!(
            "SELECT {MODULE_COLUMNS} FROM course_modules
             WHERE ($1::uuid IS NULL OR instructor_id = $1)
               AND ($2::uuid IS NULL
                    OR program_id IN (
                        SELECT p.id FROM programs p
                        JOIN departments d ON d.id = p.department_id
                        WHERE d.manager_id = $2))
               AND ($3::uuid IS NULL OR program_id = $3)
               AND ($4::int IS NULL OR semester = $4)
             ORDER BY semester, name"
        ))
        .bind(instructor_scope)
        .bind(manager_scope)
        .bind(params.program)
        .bind(params.semester)
        .fetch_all(db)
        .await?;

        Ok(modules)
    }

    #[instrument(skip(db))]
    pub async fn get_module(db: &PgPool, id: Uuid) -> Result<CourseModule, AppError> {
        let module = sqlx::query_as::<_, CourseModule>(&format!(
            "SELECT {MODULE_COLUMNS} FROM course_modules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Module not found"))?;

        Ok(module)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_module(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseModuleDto,
    ) -> Result<CourseModule, AppError> {
        let existing = Self::get_module(db, id).await?;

        if let Some(instructor_id) = dto.instructor_id {
            Self::ensure_teacher_instructor(db, instructor_id).await?;
        }

        let name = dto.name.unwrap_or(existing.name);
        let code = dto.code.unwrap_or(existing.code);
        let instructor_id = dto.instructor_id.or(existing.instructor_id);
        let semester = dto.semester.unwrap_or(existing.semester);
        let coefficient = dto.coefficient.unwrap_or(existing.coefficient);
        let lecture_hours = dto.lecture_hours.unwrap_or(existing.lecture_hours);
        let tutorial_hours = dto.tutorial_hours.unwrap_or(existing.tutorial_hours);
        let lab_hours = dto.lab_hours.unwrap_or(existing.lab_hours);
        let description = dto.description.or(existing.description);

        let module = sqlx::query_as::<_, CourseModule>(&format!(
            "UPDATE course_modules
             SET name = $1, code = $2, instructor_id = $3, semester = $4, coefficient = $5,
                 lecture_hours = $6, tutorial_hours = $7, lab_hours = $8, description = $9,
                 updated_at = NOW()
             WHERE id = $10
             RETURNING {MODULE_COLUMNS}"
        ))
        .bind(&name)
        .bind(&code)
        .bind(instructor_id)
        .bind(semester)
        .bind(coefficient)
        .bind(lecture_hours)
        .bind(tutorial_hours)
        .bind(lab_hours)
        .bind(&description)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A module coded {} already exists in this program",
                        code
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(module)
    }

    #[instrument(skip(db))]
    pub async fn delete_module(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM course_modules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Module not found"));
        }

        Ok(())
    }

    /// Module instructors must hold the TEACHER role.
    async fn ensure_teacher_instructor(db: &PgPool, instructor_id: Uuid) -> Result<(), AppError> {
        let role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(instructor_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Instructor user not found"))?;

        if role != UserRole::Teacher {
            return Err(AppError::unprocessable(
                "Module instructor must be a TEACHER user",
            ));
        }

        Ok(())
    }
}
