use axum::{
    routing::{get, put},
    Router,
};

use super::schedule_handlers::{create_schedule, delete_schedule, get_schedules, update_schedule};
use crate::{routes::method_not_allowed, state::AppState};

pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/schedules",
            get(get_schedules)
                .post(create_schedule)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/schedules/:id",
            put(update_schedule)
                .delete(delete_schedule)
                .fallback(method_not_allowed),
        )
}
