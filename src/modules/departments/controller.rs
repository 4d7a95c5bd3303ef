use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::access;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::departments::model::{CreateDepartmentDto, Department, UpdateDepartmentDto};
use crate::modules::departments::service::DepartmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 200, description = "Department created", body = Department),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Name or code already taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, dto))]
pub async fn create_department(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<Json<Department>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    let department = DepartmentService::create_department(&state.db, dto).await?;
    Ok(Json(department))
}

#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Departments visible to the caller", body = [Department]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn get_departments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Department>>, AppError> {
    let departments =
        DepartmentService::get_departments(&state.db, auth_user.role()?, auth_user.user_id()?)
            .await?;
    Ok(Json(departments))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn get_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::get_department(&state.db, id).await?;
    Ok(Json(department))
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state, dto))]
pub async fn update_department(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateDepartmentDto>,
) -> Result<Json<Department>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    let department = DepartmentService::update_department(&state.db, id, dto).await?;
    Ok(Json(department))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn delete_department(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    DepartmentService::delete_department(&state.db, id).await?;
    Ok(Json(json!({"message": "Department deleted successfully"})))
}
