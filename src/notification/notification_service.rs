use std::sync::Arc;

use chrono::{Duration, Local, NaiveDateTime};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use super::{notification_dto::NotificationMessage, notification_sender::NotificationSender};
use crate::{
    error::{AppError, Result},
    schedule::{Schedule, ScheduleRepository, UpdateScheduleRequest},
};

/// Forwards reminders for single schedules and records that they were sent.
#[derive(Clone)]
pub struct NotificationService {
    repo: ScheduleRepository,
    sender: Arc<dyn NotificationSender>,
}

impl NotificationService {
    pub fn new(repo: ScheduleRepository, sender: Arc<dyn NotificationSender>) -> Self {
        Self { repo, sender }
    }

    pub async fn notify(&self, api_key: &str, schedule_id: &str) -> Result<()> {
        if api_key.trim().is_empty() || schedule_id.trim().is_empty() {
            return Err(AppError::Validation(
                "apiKey and scheduleId are required".into(),
            ));
        }

        let schedule = self
            .repo
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found".into()))?;

        self.sender.send(api_key, &build_message(&schedule)).await?;

        match self
            .repo
            .update(&schedule.id, UpdateScheduleRequest::mark_notified())
            .await
        {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                warn!(
                    "Schedule {} was deleted before it could be marked notified",
                    schedule.id
                );
            }
            Err(e) => return Err(e),
        }

        info!("Sent notification for schedule: {}", schedule.title);
        Ok(())
    }

    /// Dispatches every schedule that fell due within `window` before `now`.
    /// Returns how many reminders were delivered.
    pub async fn send_due_reminders(
        &self,
        api_key: &str,
        now: NaiveDateTime,
        window: Duration,
    ) -> Result<usize> {
        let due: Vec<Schedule> = self
            .repo
            .find_all()
            .await?
            .into_iter()
            .filter(|s| is_due(s, now, window))
            .collect();

        let mut sent = 0;
        for schedule in due {
            match self.notify(api_key, &schedule.id).await {
                Ok(()) => sent += 1,
                Err(e) => error!("Reminder for schedule {} failed: {}", schedule.id, e),
            }
        }

        Ok(sent)
    }
}

pub fn build_message(schedule: &Schedule) -> NotificationMessage {
    let content = if schedule.description.trim().is_empty() {
        "Your scheduled time has arrived".to_string()
    } else {
        schedule.description.clone()
    };

    NotificationMessage {
        title: format!("Schedule reminder: {}", schedule.title),
        content,
        description: format!(
            "Time: {} {}, priority: {}",
            schedule.date,
            schedule.time,
            schedule.priority.label()
        ),
    }
}

/// Open schedule with reminders enabled whose due time lies in `[now - window, now]`
/// on the same calendar day.
pub fn is_due(schedule: &Schedule, now: NaiveDateTime, window: Duration) -> bool {
    if !schedule.enable_notification || schedule.completed || schedule.notified {
        return false;
    }

    match schedule.due_at() {
        Some(due) => {
            let late_by = now - due;
            due.date() == now.date() && late_by >= Duration::zero() && late_by <= window
        }
        None => false,
    }
}

pub async fn start_reminder_service(
    service: NotificationService,
    api_key: String,
    window: Duration,
) -> std::result::Result<JobScheduler, Box<dyn std::error::Error + Send + Sync>> {
    let scheduler = JobScheduler::new().await?;

    // Run every minute to pick up schedules that just fell due
    let job = Job::new_async("0 * * * * *", move |_uuid, _l| {
        let service = service.clone();
        let api_key = api_key.clone();

        Box::pin(async move {
            let now = Local::now().naive_local();
            match service.send_due_reminders(&api_key, now, window).await {
                Ok(0) => {}
                Ok(sent) => info!("Reminder sweep delivered {} notification(s)", sent),
                Err(e) => warn!("Reminder sweep failed: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Reminder service started");
    Ok(scheduler)
}
