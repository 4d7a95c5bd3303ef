use crate::modules::course_modules::controller::{
    create_module, delete_module, get_module, get_modules, update_module,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_course_modules_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_module).get(get_modules))
        .route(
            "/{id}",
            get(get_module).put(update_module).delete(delete_module),
        )
}
