use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_teacher};
use crate::modules::auth::router::init_auth_router;
use crate::modules::course_modules::router::init_course_modules_router;
use crate::modules::departments::router::init_departments_router;
use crate::modules::enrollments::router::{init_enrollment_review_router, init_enrollments_router};
use crate::modules::grades::router::{init_grades_router, init_student_grades_router};
use crate::modules::programs::router::init_programs_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router())
                .nest("/departments", init_departments_router())
                .nest("/programs", init_programs_router())
                .nest("/modules", init_course_modules_router())
                .nest(
                    "/enrollments",
                    init_enrollments_router().merge(
                        init_enrollment_review_router().route_layer(
                            middleware::from_fn_with_state(state.clone(), require_admin),
                        ),
                    ),
                )
                .nest(
                    "/grades",
                    init_student_grades_router().merge(
                        init_grades_router().route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            require_teacher,
                        )),
                    ),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
