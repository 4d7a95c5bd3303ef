use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::course_modules::model::{
    CourseModule, CourseModuleFilterParams, CreateCourseModuleDto, UpdateCourseModuleDto,
};
use crate::modules::course_modules::service::CourseModuleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/modules",
    request_body = CreateCourseModuleDto,
    responses(
        (status = 200, description = "Module created", body = CourseModule),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Code already taken in program", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
#[instrument(skip(state, dto))]
pub async fn create_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    let module = CourseModuleService::create_module(&state.db, dto).await?;
    Ok(Json(module))
}

#[utoipa::path(
    get,
    path = "/api/modules",
    params(CourseModuleFilterParams),
    responses(
        (status = 200, description = "Modules visible to the caller", body = [CourseModule]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_modules(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CourseModuleFilterParams>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    let modules = CourseModuleService::get_modules(
        &state.db,
        auth_user.role()?,
        auth_user.user_id()?,
        &params,
    )
    .await?;
    Ok(Json(modules))
}

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module details", body = CourseModule),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_module(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseModule>, AppError> {
    let module = CourseModuleService::get_module(&state.db, id).await?;
    Ok(Json(module))
}

#[utoipa::path(
    put,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = UpdateCourseModuleDto,
    responses(
        (status = 200, description = "Module updated", body = CourseModule),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
#[instrument(skip(state, dto))]
pub async fn update_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    let module = CourseModuleService::update_module(&state.db, id, dto).await?;
    Ok(Json(module))
}

#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module deleted"),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn delete_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    CourseModuleService::delete_module(&state.db, id).await?;
    Ok(Json(json!({"message": "Module deleted successfully"})))
}
