use crate::{
    error::AppError,
    middleware::preflight_middleware,
    notification::{notification_handlers, routes::notification_routes, NotifyRequest},
    pages,
    schedule::{
        routes::schedule_routes, schedule_handlers, CreateScheduleRequest, MessageResponse,
        Priority, Schedule, UpdateScheduleRequest,
    },
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        schedule_handlers::get_schedules,
        schedule_handlers::create_schedule,
        schedule_handlers::update_schedule,
        schedule_handlers::delete_schedule,
        notification_handlers::send_notification,
    ),
    components(
        schemas(
            Schedule,
            Priority,
            CreateScheduleRequest,
            UpdateScheduleRequest,
            MessageResponse,
            NotifyRequest,
        )
    ),
    tags(
        (name = "schedules", description = "Schedule management endpoints"),
        (name = "notifications", description = "Push notification endpoints")
    )
)]
struct ApiDoc;

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let page_routes = Router::new()
        .route("/", get(pages::index).fallback(method_not_allowed))
        .route("/index.html", get(pages::index).fallback(method_not_allowed));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(page_routes)
        .merge(schedule_routes())
        .merge(notification_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(preflight_middleware))
        .with_state(state)
}
