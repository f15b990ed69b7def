use axum::{routing::post, Router};

use super::notification_handlers::send_notification;
use crate::{routes::method_not_allowed, state::AppState};

pub fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/api/notify",
        post(send_notification).fallback(method_not_allowed),
    )
}
