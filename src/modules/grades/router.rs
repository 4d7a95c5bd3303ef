use crate::modules::grades::controller::{
    bulk_record_grades, get_module_grades, my_grades, record_grade,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Grade entry and consultation routes for teaching staff.
pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_grade))
        .route("/bulk", post(bulk_record_grades))
        .route("/module/{id}", get(get_module_grades))
}

/// The student-facing grade routes, mounted without the teaching-staff
/// guard.
pub fn init_student_grades_router() -> Router<AppState> {
    Router::new().route("/mine", get(my_grades))
}
