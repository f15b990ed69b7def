use validator::Validate;

use super::{
    schedule_dto::{CreateScheduleRequest, UpdateScheduleRequest},
    schedule_models::{normalize_date, normalize_time, Schedule},
    schedule_repository::{NewSchedule, ScheduleRepository},
};
use crate::error::{AppError, Result};

/// Service layer for schedule business rules.
#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
}

impl ScheduleService {
    pub fn new(repo: ScheduleRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &ScheduleRepository {
        &self.repo
    }

    pub async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.repo.find_all().await
    }

    pub async fn create_schedule(&self, payload: CreateScheduleRequest) -> Result<Schedule> {
        let (title, date, time) = match (
            non_empty(payload.title.as_deref()),
            non_empty(payload.date.as_deref()),
            non_empty(payload.time.as_deref()),
        ) {
            (Some(title), Some(date), Some(time)) => (title, date, time),
            _ => {
                return Err(AppError::Validation(
                    "title, date and time are required".into(),
                ))
            }
        };
        payload.validate()?;
        let date = canonical_date(date)?;
        let time = canonical_time(time)?;

        let schedule = self
            .repo
            .create(NewSchedule {
                title: title.to_string(),
                description: payload.description.clone().unwrap_or_default(),
                date,
                time,
                priority: payload.priority.unwrap_or_default(),
                enable_notification: payload.enable_notification.unwrap_or(false),
            })
            .await?;

        tracing::debug!("Created schedule {} ({})", schedule.id, schedule.title);
        Ok(schedule)
    }

    pub async fn update_schedule(
        &self,
        schedule_id: &str,
        mut payload: UpdateScheduleRequest,
    ) -> Result<Schedule> {
        payload.validate()?;
        if let Some(title) = payload.title.take() {
            let title = non_empty(Some(&title))
                .ok_or_else(|| AppError::Validation("title must not be empty".into()))?
                .to_string();
            payload.title = Some(title);
        }
        if let Some(date) = payload.date.take() {
            payload.date = Some(canonical_date(&date)?);
        }
        if let Some(time) = payload.time.take() {
            payload.time = Some(canonical_time(&time)?);
        }

        let schedule = self.repo.update(schedule_id, payload).await?;
        tracing::debug!("Updated schedule {}", schedule.id);
        Ok(schedule)
    }

    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<()> {
        self.repo.delete(schedule_id).await?;
        tracing::debug!("Deleted schedule {}", schedule_id);
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn canonical_date(value: &str) -> Result<String> {
    normalize_date(value)
        .ok_or_else(|| AppError::Validation(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

fn canonical_time(value: &str) -> Result<String> {
    normalize_time(value)
        .ok_or_else(|| AppError::Validation(format!("invalid time '{value}', expected HH:MM")))
}
