use crate::modules::enrollments::controller::{
    decide_enrollment, get_enrollments, my_enrollments, pending_enrollments, submit_enrollment,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_enrollment).get(get_enrollments))
        .route("/mine", get(my_enrollments))
}

/// Review routes for department admins, mounted behind the admin guard.
pub fn init_enrollment_review_router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(pending_enrollments))
        .route("/{id}/decide", post(decide_enrollment))
}
