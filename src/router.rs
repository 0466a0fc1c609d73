use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::announcements::init_announcements_router;
use crate::modules::auth::init_auth_router;
use crate::modules::classes::init_classes_router;
use crate::modules::dashboard::init_dashboard_router;
use crate::modules::events::init_events_router;
use crate::modules::grades::init_grades_router;
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::teachers::init_teachers_router;
use crate::modules::timetable::init_timetable_router;
use crate::state::AppState;
use crate::utils::response::ApiResponse;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
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
                .route("/health", get(health_check))
                .nest("/auth", init_auth_router())
                .nest("/teachers", init_teachers_router())
                .nest("/students", init_students_router())
                .nest("/classes", init_classes_router())
                .nest("/subjects", init_subjects_router())
                .nest("/grades", init_grades_router())
                .nest("/timetable", init_timetable_router())
                .nest("/calendar", init_events_router())
                .nest("/announcements", init_announcements_router())
                .nest("/dashboard", init_dashboard_router()),
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

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Learnroot API is running"))
}
