use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::{self, UserRole};
use crate::domain::enrollment::{self, AcademicYear, EnrollmentDecision, EnrollmentError, EnrollmentStatus};
use crate::modules::enrollments::model::{
    DecideEnrollmentDto, Enrollment, EnrollmentFilterParams, SubmitEnrollmentDto,
};
use crate::utils::errors::AppError;

const ENROLLMENT_COLUMNS: &str = "id, student_id, program_id, academic_year, status, \
                                  validated_by, validation_date, rejection_reason, \
                                  created_at, updated_at";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Create a PENDING enrollment request.
    ///
    /// The capacity check and the insert run in one transaction with the
    /// program row locked, so two concurrent submissions cannot both take
    /// the last seat. Duplicates are checked before the capacity and quota
    /// rules; the (student, program, year) unique constraint still catches
    /// a concurrent duplicate at insert time.
    #[instrument(skip(db, dto))]
    pub async fn submit(
        db: &PgPool,
        student_id: Uuid,
        dto: SubmitEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        let year: AcademicYear = dto.academic_year.parse()?;

        let mut tx = db.begin().await?;

        // Locks the program row; concurrent submissions for the same
        // program serialize here.
        let capacity = sqlx::query_scalar::<_, i32>(
            "SELECT capacity FROM programs WHERE id = $1 FOR UPDATE",
        )
        .bind(dto.program_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Program not found"))?;

        // A resubmission of an existing request is a duplicate even when the
        // program is full or the student is at the pending quota.
        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM enrollments
                 WHERE student_id = $1 AND program_id = $2 AND academic_year = $3
             )",
        )
        .bind(student_id)
        .bind(dto.program_id)
        .bind(year.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if duplicate {
            return Err(EnrollmentError::Duplicate.into());
        }

        let active = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments
             WHERE program_id = $1 AND status IN ('PENDING', 'VALIDATED')",
        )
        .bind(dto.program_id)
        .fetch_one(&mut *tx)
        .await?;

        let student_pending = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = $1 AND status = 'PENDING'",
        )
        .bind(student_id)
        .fetch_one(&mut *tx)
        .await?;

        enrollment::check_submit(active, capacity, student_pending)?;

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, program_id, academic_year)
             VALUES ($1, $2, $3)
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(dto.program_id)
        .bind(year.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::from(EnrollmentError::Duplicate);
                }
            }
            AppError::database(e)
        })?;

        tx.commit().await?;

        Ok(enrollment)
    }

    /// Validate or reject a PENDING enrollment.
    ///
    /// The actor must be the admin managing the program's department, and a
    /// rejection needs a reason. The update is a compare-and-set on
    /// `status = 'PENDING'` so two concurrent decisions cannot both win.
    #[instrument(skip(db, dto))]
    pub async fn decide(
        db: &PgPool,
        enrollment_id: Uuid,
        actor_id: Uuid,
        actor_role: UserRole,
        dto: DecideEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        #[derive(sqlx::FromRow)]
        struct Snapshot {
            status: EnrollmentStatus,
            manager_id: Option<Uuid>,
        }

        let snapshot = sqlx::query_as::<_, Snapshot>(
            "SELECT e.status, d.manager_id
             FROM enrollments e
             JOIN programs p ON p.id = e.program_id
             JOIN departments d ON d.id = p.department_id
             WHERE e.id = $1",
        )
        .bind(enrollment_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Enrollment not found"))?;

        enrollment::check_decidable(snapshot.status)?;
        access::ensure_can_decide_enrollment(
            actor_role,
            snapshot.manager_id == Some(actor_id),
        )?;

        let reason = dto.rejection_reason.as_deref().map(str::trim);
        enrollment::check_decision(snapshot.status, dto.decision, reason)?;

        let stored_reason = match dto.decision {
            EnrollmentDecision::Rejected => reason,
            EnrollmentDecision::Validated => None,
        };

        let updated = sqlx::query_as::<_, Enrollment>(&format!(
            "UPDATE enrollments
             SET status = $2, validated_by = $3, validation_date = NOW(),
                 rejection_reason = $4, updated_at = NOW()
             WHERE id = $1 AND status = 'PENDING'
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(enrollment_id)
        .bind(dto.decision.as_status())
        .bind(actor_id)
        .bind(stored_reason)
        .fetch_optional(db)
        .await?;

        match updated {
            Some(enrollment) => Ok(enrollment),
            // Lost a race with another decision: report the state that won.
            None => {
                let status = sqlx::query_scalar::<_, EnrollmentStatus>(
                    "SELECT status FROM enrollments WHERE id = $1",
                )
                .bind(enrollment_id)
                .fetch_one(db)
                .await?;
                Err(EnrollmentError::NotPending(status).into())
            }
        }
    }

    /// List enrollments. Students see their own, admins their managed
    /// departments', DIRECTION all; optional status and year filters.
    #[instrument(skip(db))]
    pub async fn get_enrollments(
        db: &PgPool,
        role: UserRole,
        user_id: Uuid,
        params: &EnrollmentFilterParams,
    ) -> Result<Vec<Enrollment>, AppError> {
        let student_scope = if role == UserRole::Student {
            Some(user_id)
        } else {
            None
        };
        let manager_scope = if role == UserRole::Admin {
            Some(user_id)
        } else {
            None
        };

        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE ($1::uuid IS NULL OR student_id = $1)
               AND ($2::uuid IS NULL
                    OR program_id IN (
                        SELECT p.id FROM programs p
                        JOIN departments d ON d.id = p.department_id
                        WHERE d.manager_id = $2))
               AND ($3::enrollment_status IS NULL OR status = $3)
               AND ($4::text IS NULL OR academic_year = $4)
             ORDER BY created_at DESC"
        ))
        .bind(student_scope)
        .bind(manager_scope)
        .bind(params.status)
        .bind(&params.academic_year)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }

    /// A student's own enrollment requests, newest first.
    #[instrument(skip(db))]
    pub async fn get_student_enrollments(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE student_id = $1 ORDER BY created_at DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }

    /// PENDING requests awaiting a decision in the admin's managed
    /// departments, oldest first.
    #[instrument(skip(db))]
    pub async fn get_pending_for_manager(
        db: &PgPool,
        manager_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE status = 'PENDING'
               AND program_id IN (
                   SELECT p.id FROM programs p
                   JOIN departments d ON d.id = p.department_id
                   WHERE d.manager_id = $1)
             ORDER BY created_at"
        ))
        .bind(manager_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }
}
