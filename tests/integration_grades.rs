mod common;

use axum::http::StatusCode;
use common::{create_test_department, create_test_module, create_test_program, create_test_user};
use scolarite::domain::access::{AccessError, UserRole};
use scolarite::modules::grades::model::{BulkGradeItem, BulkRecordGradesDto, RecordGradeDto};
use scolarite::modules::grades::service::GradeService;
use sqlx::PgPool;
use uuid::Uuid;

const YEAR: &str = "2024-2025";

fn grade_dto(student_id: Uuid, module_id: Uuid, continuous: f64, exam: f64) -> RecordGradeDto {
    RecordGradeDto {
        student_id,
        module_id,
        academic_year: YEAR.to_string(),
        continuous_score: continuous,
        exam_score: exam,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_final_score_is_computed_server_side(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 30).await;
    let module = create_test_module(&pool, program, Some(teacher)).await;

    let grade = GradeService::record_grade(
        &pool,
        teacher,
        UserRole::Teacher,
        grade_dto(student, module, 10.0, 16.0),
    )
    .await
    .unwrap();

    // 0.4 * 10 + 0.6 * 16
    assert_eq!(grade.final_score, 13.6);
    assert_eq!(grade.entered_by, Some(teacher));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rerecording_identical_scores_is_idempotent(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 30).await;
    let module = create_test_module(&pool, program, Some(teacher)).await;

    let first = GradeService::record_grade(
        &pool,
        teacher,
        UserRole::Teacher,
        grade_dto(student, module, 12.0, 14.0),
    )
    .await
    .unwrap();

    let second = GradeService::record_grade(
        &pool,
        teacher,
        UserRole::Teacher,
        grade_dto(student, module, 12.0, 14.0),
    )
    .await
    .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.continuous_score, first.continuous_score);
    assert_eq!(second.exam_score, first.exam_score);
    assert_eq!(second.final_score, first.final_score);

    let rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM grades
         WHERE student_id = $1 AND module_id = $2 AND academic_year = $3",
    )
    .bind(student)
    .bind(module)
    .bind(YEAR)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rerecording_updates_scores_and_recomputes_final(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 30).await;
    let module = create_test_module(&pool, program, Some(teacher)).await;

    let first = GradeService::record_grade(
        &pool,
        teacher,
        UserRole::Teacher,
        grade_dto(student, module, 8.0, 9.0),
    )
    .await
    .unwrap();

    let corrected = GradeService::record_grade(
        &pool,
        teacher,
        UserRole::Teacher,
        grade_dto(student, module, 14.0, 15.0),
    )
    .await
    .unwrap();

    assert_eq!(corrected.id, first.id);
    assert_eq!(corrected.continuous_score, 14.0);
    assert_eq!(corrected.exam_score, 15.0);
    // 0.4 * 14 + 0.6 * 15
    assert_eq!(corrected.final_score, 14.6);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unassigned_teacher_cannot_record(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Teacher).await;
    let outsider = create_test_user(&pool, UserRole::Teacher).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 30).await;
    let module = create_test_module(&pool, program, Some(instructor)).await;

    let err = GradeService::record_grade(
        &pool,
        outsider,
        UserRole::Teacher,
        grade_dto(student, module, 10.0, 10.0),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(
        err.error.downcast_ref::<AccessError>(),
        Some(&AccessError::NotModuleInstructor)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_record_isolates_item_failures(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher).await;
    let good = create_test_user(&pool, UserRole::Student).await;
    let out_of_range = create_test_user(&pool, UserRole::Student).await;
    let department = create_test_department(&pool, None).await;
    let program = create_test_program(&pool, department, 30).await;
    let module = create_test_module(&pool, program, Some(teacher)).await;
    let unknown_student = Uuid::new_v4();

    let result = GradeService::bulk_record_grades(
        &pool,
        teacher,
        UserRole::Teacher,
        BulkRecordGradesDto {
            module_id: module,
            academic_year: YEAR.to_string(),
            grades: vec![
                BulkGradeItem {
                    student_id: good,
                    continuous_score: 12.0,
                    exam_score: 13.0,
                },
                BulkGradeItem {
                    student_id: out_of_range,
                    continuous_score: 25.0,
                    exam_score: 13.0,
                },
                BulkGradeItem {
                    student_id: unknown_student,
                    continuous_score: 10.0,
                    exam_score: 10.0,
                },
            ],
        },
    )
    .await
    .unwrap();

    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failures.len(), 2);
    assert!(
        result
            .failures
            .iter()
            .any(|f| f.student_id == out_of_range)
    );
    assert!(
        result
            .failures
            .iter()
            .any(|f| f.student_id == unknown_student)
    );

    let stored = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM grades WHERE module_id = $1",
    )
    .bind(module)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(stored, 1);
}
