use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access::{self, UserRole};
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::enrollments::model::{
    DecideEnrollmentDto, Enrollment, EnrollmentFilterParams, SubmitEnrollmentDto,
};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = SubmitEnrollmentDto,
    responses(
        (status = 200, description = "Enrollment request created (PENDING)", body = Enrollment),
        (status = 403, description = "Not a student", body = ErrorResponse),
        (status = 409, description = "Duplicate, program full or too many pending requests", body = ErrorResponse),
        (status = 422, description = "Invalid academic year", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn submit_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SubmitEnrollmentDto>,
) -> Result<Json<Enrollment>, AppError> {
    access::ensure_can_submit_enrollment(auth_user.role()?)?;

    let enrollment = EnrollmentService::submit(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/{id}/decide",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    request_body = DecideEnrollmentDto,
    responses(
        (status = 200, description = "Enrollment decided", body = Enrollment),
        (status = 403, description = "Not the managing admin", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 409, description = "Already processed", body = ErrorResponse),
        (status = 422, description = "Rejection without reason", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn decide_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<DecideEnrollmentDto>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::decide(
        &state.db,
        id,
        auth_user.user_id()?,
        auth_user.role()?,
        dto,
    )
    .await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(EnrollmentFilterParams),
    responses(
        (status = 200, description = "Enrollments visible to the caller", body = [Enrollment]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<EnrollmentFilterParams>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let enrollments = EnrollmentService::get_enrollments(
        &state.db,
        auth_user.role()?,
        auth_user.user_id()?,
        &params,
    )
    .await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/mine",
    responses(
        (status = 200, description = "The student's own enrollment requests", body = [Enrollment]),
        (status = 403, description = "Students only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn my_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    if auth_user.role()? != UserRole::Student {
        return Err(AppError::forbidden("Endpoint reserved for students"));
    }

    let enrollments =
        EnrollmentService::get_student_enrollments(&state.db, auth_user.user_id()?).await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/pending",
    responses(
        (status = 200, description = "Pending requests in the admin's departments", body = [Enrollment]),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn pending_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    if auth_user.role()? != UserRole::Admin {
        return Err(AppError::forbidden("Endpoint reserved for department admins"));
    }

    let enrollments =
        EnrollmentService::get_pending_for_manager(&state.db, auth_user.user_id()?).await?;
    Ok(Json(enrollments))
}
