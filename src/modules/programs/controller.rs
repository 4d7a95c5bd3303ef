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
use crate::modules::programs::model::{
    CreateProgramDto, Program, ProgramDetails, ProgramFilterParams, UpdateProgramDto,
};
use crate::modules::programs::service::ProgramService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/programs",
    request_body = CreateProgramDto,
    responses(
        (status = 200, description = "Program created", body = Program),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Code already taken in department", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, dto))]
pub async fn create_program(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateProgramDto>,
) -> Result<Json<Program>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    let program = ProgramService::create_program(&state.db, dto).await?;
    Ok(Json(program))
}

#[utoipa::path(
    get,
    path = "/api/programs",
    params(ProgramFilterParams),
    responses(
        (status = 200, description = "Programs visible to the caller", body = [Program]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state))]
pub async fn get_programs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ProgramFilterParams>,
) -> Result<Json<Vec<Program>>, AppError> {
    let programs = ProgramService::get_programs(
        &state.db,
        auth_user.role()?,
        auth_user.user_id()?,
        &params,
    )
    .await?;
    Ok(Json(programs))
}

#[utoipa::path(
    get,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program with seat usage", body = ProgramDetails),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state))]
pub async fn get_program(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgramDetails>, AppError> {
    let details = ProgramService::get_program_details(&state.db, id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    put,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = UpdateProgramDto,
    responses(
        (status = 200, description = "Program updated", body = Program),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, dto))]
pub async fn update_program(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProgramDto>,
) -> Result<Json<Program>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    let program = ProgramService::update_program(&state.db, id, dto).await?;
    Ok(Json(program))
}

#[utoipa::path(
    delete,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program deleted"),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state))]
pub async fn delete_program(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    access::ensure_can_manage_catalog(auth_user.role()?)?;

    ProgramService::delete_program(&state.db, id).await?;
    Ok(Json(json!({"message": "Program deleted successfully"})))
}
