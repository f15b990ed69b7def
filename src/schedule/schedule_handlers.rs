use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{
    schedule_dto::{CreateScheduleRequest, MessageResponse, UpdateScheduleRequest},
    schedule_models::Schedule,
};
use crate::{error::Result, state::AppState};

/// List every schedule, ordered by date and time
#[utoipa::path(
    get,
    path = "/api/schedules",
    responses(
        (status = 200, description = "All schedules", body = Vec<Schedule>)
    ),
    tag = "schedules"
)]
pub async fn get_schedules(State(state): State<AppState>) -> Result<Json<Vec<Schedule>>> {
    let schedules = state.schedule_service.list_schedules().await?;
    Ok(Json(schedules))
}

/// Create a schedule
#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Missing or invalid field")
    ),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let schedule = state.schedule_service.create_schedule(payload).await?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Merge the supplied fields into a schedule
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(
        ("id" = String, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
    payload: std::result::Result<Json<UpdateScheduleRequest>, JsonRejection>,
) -> Result<Json<Schedule>> {
    let Json(payload) = payload?;
    let schedule = state
        .schedule_service
        .update_schedule(&schedule_id, payload)
        .await?;

    Ok(Json(schedule))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(
        ("id" = String, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule deleted", body = MessageResponse),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.schedule_service.delete_schedule(&schedule_id).await?;
    Ok(Json(MessageResponse::new("Schedule deleted")))
}
