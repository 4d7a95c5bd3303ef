mod common;

use axum::http::StatusCode;
use common::{
    create_test_department, create_test_enrollment, create_test_program, create_test_user,
};
use scolarite::domain::access::{AccessError, UserRole};
use scolarite::domain::enrollment::{EnrollmentDecision, EnrollmentError, EnrollmentStatus};
use scolarite::modules::enrollments::model::{DecideEnrollmentDto, SubmitEnrollmentDto};
use scolarite::modules::enrollments::service::EnrollmentService;
use sqlx::PgPool;

const YEAR: &str = "2024-2025";

fn submit_dto(program_id: uuid::Uuid) -> SubmitEnrollmentDto {
    SubmitEnrollmentDto {
        program_id,
        academic_year: YEAR.to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_creates_pending_enrollment(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 30).await;

    let enrollment = EnrollmentService::submit(&pool, student, submit_dto(program))
        .await
        .unwrap();

    assert_eq!(enrollment.status, EnrollmentStatus::Pending);
    assert_eq!(enrollment.student_id, student);
    assert_eq!(enrollment.academic_year, YEAR);
    assert!(enrollment.validated_by.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_full_program_rejects_new_student(pool: PgPool) {
    let seated = create_test_user(&pool, UserRole::Student).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 1).await;
    create_test_enrollment(&pool, seated, program, YEAR, EnrollmentStatus::Validated).await;

    let err = EnrollmentService::submit(&pool, student, submit_dto(program))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(
        err.error.downcast_ref::<EnrollmentError>(),
        Some(&EnrollmentError::CapacityFull { capacity: 1 })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resubmission_into_full_program_reports_duplicate(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 1).await;

    // The student's own request takes the last seat.
    EnrollmentService::submit(&pool, student, submit_dto(program))
        .await
        .unwrap();

    let err = EnrollmentService::submit(&pool, student, submit_dto(program))
        .await
        .unwrap_err();

    assert_eq!(
        err.error.downcast_ref::<EnrollmentError>(),
        Some(&EnrollmentError::Duplicate)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resubmission_at_pending_quota_reports_duplicate(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let target = create_test_program(&pool, department, 30).await;
    create_test_enrollment(&pool, student, target, YEAR, EnrollmentStatus::Pending).await;
    for _ in 0..2 {
        let other = create_test_program(&pool, department, 30).await;
        create_test_enrollment(&pool, student, other, YEAR, EnrollmentStatus::Pending).await;
    }

    // Three PENDING requests held, one of them for the target program.
    let err = EnrollmentService::submit(&pool, student, submit_dto(target))
        .await
        .unwrap_err();

    assert_eq!(
        err.error.downcast_ref::<EnrollmentError>(),
        Some(&EnrollmentError::Duplicate)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pending_quota_blocks_fourth_request(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    for _ in 0..3 {
        let program = create_test_program(&pool, department, 30).await;
        create_test_enrollment(&pool, student, program, YEAR, EnrollmentStatus::Pending).await;
    }
    let fourth = create_test_program(&pool, department, 30).await;

    let err = EnrollmentService::submit(&pool, student, submit_dto(fourth))
        .await
        .unwrap_err();

    assert_eq!(
        err.error.downcast_ref::<EnrollmentError>(),
        Some(&EnrollmentError::TooManyPending)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rejection_frees_the_seat(pool: PgPool) {
    let rejected = create_test_user(&pool, UserRole::Student).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 1).await;
    create_test_enrollment(&pool, rejected, program, YEAR, EnrollmentStatus::Rejected).await;

    let enrollment = EnrollmentService::submit(&pool, student, submit_dto(program))
        .await
        .unwrap();

    assert_eq!(enrollment.status, EnrollmentStatus::Pending);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_decide_validates_pending_enrollment(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, Some(admin)).await;
    let program = create_test_program(&pool, department, 30).await;
    let id = create_test_enrollment(&pool, student, program, YEAR, EnrollmentStatus::Pending).await;

    let decided = EnrollmentService::decide(
        &pool,
        id,
        admin,
        UserRole::Admin,
        DecideEnrollmentDto {
            decision: EnrollmentDecision::Validated,
            rejection_reason: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(decided.status, EnrollmentStatus::Validated);
    assert_eq!(decided.validated_by, Some(admin));
    assert!(decided.validation_date.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_decision_reports_winning_status(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, Some(admin)).await;
    let program = create_test_program(&pool, department, 30).await;
    let id = create_test_enrollment(&pool, student, program, YEAR, EnrollmentStatus::Pending).await;

    EnrollmentService::decide(
        &pool,
        id,
        admin,
        UserRole::Admin,
        DecideEnrollmentDto {
            decision: EnrollmentDecision::Validated,
            rejection_reason: None,
        },
    )
    .await
    .unwrap();

    let err = EnrollmentService::decide(
        &pool,
        id,
        admin,
        UserRole::Admin,
        DecideEnrollmentDto {
            decision: EnrollmentDecision::Rejected,
            rejection_reason: Some("Changed my mind".to_string()),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(
        err.error.downcast_ref::<EnrollmentError>(),
        Some(&EnrollmentError::NotPending(EnrollmentStatus::Validated))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_decide_requires_the_managing_admin(pool: PgPool) {
    let manager = create_test_user(&pool, UserRole::Admin).await;
    let other_admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, Some(manager)).await;
    let program = create_test_program(&pool, department, 30).await;
    let id = create_test_enrollment(&pool, student, program, YEAR, EnrollmentStatus::Pending).await;

    let err = EnrollmentService::decide(
        &pool,
        id,
        other_admin,
        UserRole::Admin,
        DecideEnrollmentDto {
            decision: EnrollmentDecision::Validated,
            rejection_reason: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(
        err.error.downcast_ref::<AccessError>(),
        Some(&AccessError::NotDepartmentManager)
    );

    let status = sqlx::query_scalar::<_, EnrollmentStatus>(
        "SELECT status FROM enrollments WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, EnrollmentStatus::Pending);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reject_stores_the_reason(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, Some(admin)).await;
    let program = create_test_program(&pool, department, 30).await;
    let id = create_test_enrollment(&pool, student, program, YEAR, EnrollmentStatus::Pending).await;

    let decided = EnrollmentService::decide(
        &pool,
        id,
        admin,
        UserRole::Admin,
        DecideEnrollmentDto {
            decision: EnrollmentDecision::Rejected,
            rejection_reason: Some("Incomplete transcript".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(decided.status, EnrollmentStatus::Rejected);
    assert_eq!(
        decided.rejection_reason.as_deref(),
        Some("Incomplete transcript")
    );
}
