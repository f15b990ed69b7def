use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::notification_dto::NotifyRequest;
use crate::{error::Result, schedule::MessageResponse, state::AppState};

/// Push a reminder for one schedule and mark it notified
#[utoipa::path(
    post,
    path = "/api/notify",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Notification sent", body = MessageResponse),
        (status = 400, description = "apiKey or scheduleId missing"),
        (status = 404, description = "Schedule not found"),
        (status = 500, description = "Push endpoint rejected the notification")
    ),
    tag = "notifications"
)]
pub async fn send_notification(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(payload) = payload?;

    state
        .notification_service
        .notify(
            payload.api_key.as_deref().unwrap_or_default(),
            payload.schedule_id.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(MessageResponse::new("Notification sent")))
}
