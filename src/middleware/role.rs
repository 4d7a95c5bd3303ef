//! Role-based route guards.
//!
//! Coarse role checks applied as route layers. Fine-grained scope checks
//! (department management, module assignment) live in
//! [`crate::domain::access`] and run inside the services, where the scope
//! facts can be read from the database.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::access::UserRole;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware that checks the authenticated user holds one of the allowed
/// roles before the handler runs.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = auth_user.role()?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {}",
            allowed_roles, user_role
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Route layer allowing ADMIN and DIRECTION only.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        &[UserRole::Admin, UserRole::Direction],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Route layer allowing teaching staff and above (TEACHER, ADMIN, DIRECTION).
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        &[UserRole::Teacher, UserRole::Admin, UserRole::Direction],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
