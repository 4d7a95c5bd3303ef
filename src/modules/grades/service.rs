use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::{self, UserRole};
use crate::domain::enrollment::AcademicYear;
use crate::domain::grading;
use crate::modules::grades::model::{
    BulkGradeFailure, BulkRecordGradesDto, BulkRecordResult, Grade, GradeFilterParams,
    RecordGradeDto,
};
use crate::utils::errors::AppError;

const GRADE_COLUMNS: &str = "id, student_id, module_id, academic_year, continuous_score, \
                             exam_score, final_score, entered_by, created_at, updated_at";

pub struct GradeService;

impl GradeService {
    /// Record (or re-record) a student's grade for a module.
    ///
    /// Upsert keyed by (student, module, year): re-submitting identical
    /// inputs leaves identical stored state. The final score is recomputed
    /// from the inputs on every write.
    #[instrument(skip(db, dto))]
    pub async fn record_grade(
        db: &PgPool,
        actor_id: Uuid,
        actor_role: UserRole,
        dto: RecordGradeDto,
    ) -> Result<Grade, AppError> {
        let instructor_id = Self::module_instructor(db, dto.module_id).await?;
        access::ensure_can_record_grade(actor_role, instructor_id == Some(actor_id))?;

        let year: AcademicYear = dto.academic_year.parse()?;
        grading::validate_score("continuous-assessment", dto.continuous_score)?;
        grading::validate_score("exam", dto.exam_score)?;

        Self::upsert(
            db,
            dto.student_id,
            dto.module_id,
            year.as_str(),
            dto.continuous_score,
            dto.exam_score,
            actor_id,
        )
        .await
    }

    /// Record a batch of grades for one module. Authorization is checked
    /// once for the module; each item then succeeds or fails on its own.
    #[instrument(skip(db, dto))]
    pub async fn bulk_record_grades(
        db: &PgPool,
        actor_id: Uuid,
        actor_role: UserRole,
        dto: BulkRecordGradesDto,
    ) -> Result<BulkRecordResult, AppError> {
        let instructor_id = Self::module_instructor(db, dto.module_id).await?;
        access::ensure_can_record_grade(actor_role, instructor_id == Some(actor_id))?;

        let year: AcademicYear = dto.academic_year.parse()?;

        let mut succeeded = 0usize;
        let mut failures = Vec::new();

        for item in &dto.grades {
            let result = async {
                grading::validate_score("continuous-assessment", item.continuous_score)
                    .map_err(AppError::from)?;
                grading::validate_score("exam", item.exam_score).map_err(AppError::from)?;
                Self::upsert(
                    db,
                    item.student_id,
                    dto.module_id,
                    year.as_str(),
                    item.continuous_score,
                    item.exam_score,
                    actor_id,
                )
                .await
            }
            .await;

            match result {
                Ok(_) => succeeded += 1,
                Err(e) => failures.push(BulkGradeFailure {
                    student_id: item.student_id,
                    error: e.error.to_string(),
                }),
            }
        }

        Ok(BulkRecordResult { succeeded, failures })
    }

    /// Grades entered for a module, optionally restricted to one academic
    /// year. Teachers may only read their own modules.
    #[instrument(skip(db))]
    pub async fn get_module_grades(
        db: &PgPool,
        actor_id: Uuid,
        actor_role: UserRole,
        module_id: Uuid,
        params: &GradeFilterParams,
    ) -> Result<Vec<Grade>, AppError> {
        let instructor_id = Self::module_instructor(db, module_id).await?;
        access::ensure_can_record_grade(actor_role, instructor_id == Some(actor_id))?;

        let grades = sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades
             WHERE module_id = $1
               AND ($2::text IS NULL OR academic_year = $2)
             ORDER BY academic_year DESC, created_at"
        ))
        .bind(module_id)
        .bind(&params.academic_year)
        .fetch_all(db)
        .await?;

        Ok(grades)
    }

    /// A student's own grades, newest academic year first.
    #[instrument(skip(db))]
    pub async fn get_student_grades(
        db: &PgPool,
        student_id: Uuid,
        params: &GradeFilterParams,
    ) -> Result<Vec<Grade>, AppError> {
        let grades = sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades
             WHERE student_id = $1
               AND ($2::text IS NULL OR academic_year = $2)
             ORDER BY academic_year DESC, created_at"
        ))
        .bind(student_id)
        .bind(&params.academic_year)
        .fetch_all(db)
        .await?;

        Ok(grades)
    }

    async fn module_instructor(db: &PgPool, module_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let instructor_id = sqlx::query_scalar::<_, Option<Uuid>>(
            "SELECT instructor_id FROM course_modules WHERE id = $1",
        )
        .bind(module_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Module not found"))?;

        Ok(instructor_id)
    }

    async fn upsert(
        db: &PgPool,
        student_id: Uuid,
        module_id: Uuid,
        academic_year: &str,
        continuous: f64,
        exam: f64,
        entered_by: Uuid,
    ) -> Result<Grade, AppError> {
        let final_score = grading::compute_final(continuous, exam);

        let grade = sqlx::query_as::<_, Grade>(&format!(
            "INSERT INTO grades
                 (student_id, module_id, academic_year, continuous_score, exam_score,
                  final_score, entered_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (student_id, module_id, academic_year) DO UPDATE
             SET continuous_score = EXCLUDED.continuous_score,
                 exam_score = EXCLUDED.exam_score,
                 final_score = EXCLUDED.final_score,
                 entered_by = EXCLUDED.entered_by,
                 updated_at = NOW()
             RETURNING {GRADE_COLUMNS}"
        ))
        .bind(student_id)
        .bind(module_id)
        .bind(academic_year)
        .bind(continuous)
        .bind(exam)
        .bind(final_score)
        .bind(entered_by)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found("Student not found");
                }
            }
            AppError::database(e)
        })?;

        Ok(grade)
    }
}
