use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    schedule_dto::UpdateScheduleRequest,
    schedule_models::{sort_chronologically, Priority, Schedule},
};
use crate::{
    error::{AppError, Result},
    store::KvStore,
};

/// Validated input for a new schedule.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub priority: Priority,
    pub enable_notification: bool,
}

/// Persists the whole collection as one JSON array under a single key.
///
/// Writes hold `write_lock` across get, mutate and put so concurrent requests
/// in this process never overwrite each other's changes.
#[derive(Clone)]
pub struct ScheduleRepository {
    store: Arc<dyn KvStore>,
    key: Arc<str>,
    write_lock: Arc<Mutex<()>>,
}

impl ScheduleRepository {
    pub fn new(store: Arc<dyn KvStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<Vec<Schedule>> {
        match self.store.get(&self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, schedules: &[Schedule]) -> Result<()> {
        let raw = serde_json::to_string(schedules)?;
        self.store.put(&self.key, raw).await
    }

    /// Runs `f` against the loaded collection, then sorts and writes it back.
    /// Nothing is written when `f` fails.
    async fn modify<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Schedule>) -> Result<T>,
    {
        let _guard = self.write_lock.lock().await;
        let mut schedules = self.load().await?;
        let output = f(&mut schedules)?;
        sort_chronologically(&mut schedules);
        self.save(&schedules).await?;
        Ok(output)
    }

    pub async fn find_all(&self) -> Result<Vec<Schedule>> {
        self.load().await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Schedule>> {
        let schedules = self.load().await?;
        Ok(schedules.into_iter().find(|s| s.id == id))
    }

    pub async fn create(&self, new: NewSchedule) -> Result<Schedule> {
        let now = Utc::now();
        let schedule = Schedule {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            date: new.date,
            time: new.time,
            priority: new.priority,
            completed: false,
            notified: false,
            enable_notification: new.enable_notification,
            created_at: now,
            updated_at: now,
        };

        let created = schedule.clone();
        self.modify(move |schedules| {
            schedules.push(schedule);
            Ok(())
        })
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: UpdateScheduleRequest) -> Result<Schedule> {
        self.modify(|schedules| {
            let schedule = schedules
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| AppError::NotFound("Schedule not found".into()))?;

            apply_patch(schedule, patch);
            schedule.updated_at = Utc::now();
            Ok(schedule.clone())
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.modify(|schedules| {
            let before = schedules.len();
            schedules.retain(|s| s.id != id);

            if schedules.len() == before {
                return Err(AppError::NotFound("Schedule not found".into()));
            }
            Ok(())
        })
        .await
    }
}

fn apply_patch(schedule: &mut Schedule, patch: UpdateScheduleRequest) {
    if let Some(title) = patch.title {
        schedule.title = title;
    }
    if let Some(description) = patch.description {
        schedule.description = description;
    }
    if let Some(date) = patch.date {
        schedule.date = date;
    }
    if let Some(time) = patch.time {
        schedule.time = time;
    }
    if let Some(priority) = patch.priority {
        schedule.priority = priority;
    }
    if let Some(completed) = patch.completed {
        schedule.completed = completed;
    }
    if let Some(notified) = patch.notified {
        schedule.notified = notified;
    }
    if let Some(enable_notification) = patch.enable_notification {
        schedule.enable_notification = enable_notification;
    }
}
