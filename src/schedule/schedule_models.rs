use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Human-readable label used in reminder messages.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notified: bool,
    #[serde(default)]
    pub enable_notification: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Local wall-clock moment the schedule is due, if `date` and `time` parse.
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;
        Some(date.and_time(time))
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Accepts `HH:MM` as sent by the form, and `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Canonical `YYYY-MM-DD` form of a parseable date.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_date(value).map(|date| date.format(DATE_FORMAT).to_string())
}

/// Canonical zero-padded time; seconds are kept only when they were given.
pub fn normalize_time(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M") {
        return Some(time.format("%H:%M").to_string());
    }
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .ok()
        .map(|time| time.format("%H:%M:%S").to_string())
}

/// Stable chronological ordering. Rows whose date or time do not parse go
/// last, in their existing relative order.
pub fn sort_chronologically(schedules: &mut [Schedule]) {
    schedules.sort_by_key(|s| {
        let due = s.due_at();
        (due.is_none(), due)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(id: &str, date: &str, time: &str) -> Schedule {
        let now = Utc::now();
        Schedule {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            date: date.to_string(),
            time: time.to_string(),
            priority: Priority::Medium,
            completed: false,
            notified: false,
            enable_notification: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(schedules: &[Schedule]) -> Vec<&str> {
        schedules.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::Low.to_string(), "low");
        assert_eq!(Priority::Medium.to_string(), "medium");
        assert_eq!(Priority::High.to_string(), "high");
    }

    #[test]
    fn test_priority_label() {
        assert_eq!(Priority::High.label(), "High");
        assert_eq!(Priority::default().label(), "Medium");
    }

    #[test]
    fn test_time_formats() {
        assert!(parse_time("09:00").is_some());
        assert!(parse_time("23:59:30").is_some());
        assert!(parse_time("9am").is_none());
        assert!(parse_date("2024-02-30").is_none());
    }

    #[test]
    fn test_normalize_pads_and_trims() {
        assert_eq!(normalize_date(" 2024-1-5 ").as_deref(), Some("2024-01-05"));
        assert_eq!(normalize_time("9:5").as_deref(), Some("09:05"));
        assert_eq!(normalize_time(" 07:30:15 ").as_deref(), Some("07:30:15"));
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_date("2024/01/05"), None);
    }

    #[test]
    fn test_sort_by_date_then_time() {
        let mut schedules = vec![
            schedule("c", "2024-01-02", "09:00"),
            schedule("b", "2024-01-01", "18:30"),
            schedule("a", "2024-01-01", "08:00"),
        ];
        sort_chronologically(&mut schedules);
        assert_eq!(ids(&schedules), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_and_malformed_last() {
        let mut schedules = vec![
            schedule("bad1", "tomorrow", "09:00"),
            schedule("x", "2024-01-01", "08:00"),
            schedule("bad2", "2024-01-01", "noon"),
            schedule("y", "2024-01-01", "08:00"),
        ];
        sort_chronologically(&mut schedules);
        assert_eq!(ids(&schedules), vec!["x", "y", "bad1", "bad2"]);
    }

    #[test]
    fn test_deserialize_legacy_record_defaults() {
        let json = r#"{
            "id": "1",
            "title": "Dentist",
            "date": "2024-01-01",
            "time": "09:00",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.priority, Priority::Medium);
        assert!(!schedule.notified);
        assert!(!schedule.enable_notification);
        assert_eq!(schedule.description, "");
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(schedule("1", "2024-01-01", "09:00")).unwrap();
        assert!(value.get("enableNotification").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["priority"], "medium");
    }
}
