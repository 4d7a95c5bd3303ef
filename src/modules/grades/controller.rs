use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::UserRole;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::grades::model::{
    BulkRecordGradesDto, BulkRecordResult, Grade, GradeFilterParams, RecordGradeDto,
};
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = RecordGradeDto,
    responses(
        (status = 200, description = "Grade recorded", body = Grade),
        (status = 403, description = "Not the module's instructor", body = ErrorResponse),
        (status = 404, description = "Module or student not found", body = ErrorResponse),
        (status = 422, description = "Score out of range or invalid year", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn record_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RecordGradeDto>,
) -> Result<Json<Grade>, AppError> {
    let grade =
        GradeService::record_grade(&state.db, auth_user.user_id()?, auth_user.role()?, dto).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    post,
    path = "/api/grades/bulk",
    request_body = BulkRecordGradesDto,
    responses(
        (status = 200, description = "Batch processed; per-item failures listed", body = BulkRecordResult),
        (status = 403, description = "Not the module's instructor", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn bulk_record_grades(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<BulkRecordGradesDto>,
) -> Result<Json<BulkRecordResult>, AppError> {
    let result =
        GradeService::bulk_record_grades(&state.db, auth_user.user_id()?, auth_user.role()?, dto)
            .await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/grades/module/{id}",
    params(("id" = Uuid, Path, description = "Module ID"), GradeFilterParams),
    responses(
        (status = 200, description = "Grades recorded for the module", body = [Grade]),
        (status = 403, description = "Not the module's instructor", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_module_grades(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<GradeFilterParams>,
) -> Result<Json<Vec<Grade>>, AppError> {
    let grades = GradeService::get_module_grades(
        &state.db,
        auth_user.user_id()?,
        auth_user.role()?,
        id,
        &params,
    )
    .await?;
    Ok(Json(grades))
}

#[utoipa::path(
    get,
    path = "/api/grades/mine",
    params(GradeFilterParams),
    responses(
        (status = 200, description = "The student's own grades", body = [Grade]),
        (status = 403, description = "Students only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn my_grades(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<GradeFilterParams>,
) -> Result<Json<Vec<Grade>>, AppError> {
    if auth_user.role()? != UserRole::Student {
        return Err(AppError::forbidden("Endpoint reserved for students"));
    }

    let grades = GradeService::get_student_grades(&state.db, auth_user.user_id()?, &params).await?;
    Ok(Json(grades))
}
