use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::access::AccessError;
use crate::domain::enrollment::EnrollmentError;
use crate::domain::grading::GradeError;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn msg(status: StatusCode, msg: impl Into<String>) -> Self {
        Self::new(status, anyhow::anyhow!(msg.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::msg(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::msg(StatusCode::UNPROCESSABLE_ENTITY, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::msg(StatusCode::NOT_FOUND, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::msg(StatusCode::CONFLICT, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::msg(StatusCode::FORBIDDEN, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::msg(StatusCode::UNAUTHORIZED, msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::database(err)
    }
}

// Domain errors carry their own HTTP status so validation, conflict and
// authorization failures map to distinct response codes.

impl From<EnrollmentError> for AppError {
    fn from(err: EnrollmentError) -> Self {
        AppError::new(err.status_code(), err)
    }
}

impl From<GradeError> for AppError {
    fn from(err: GradeError) -> Self {
        AppError::new(err.status_code(), err)
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        AppError::new(err.status_code(), err)
    }
}
