use anyhow::Context;

use crate::{
    notification::{NotificationService, DEFAULT_NOTIFY_BASE_URL},
    schedule::ScheduleService,
};

#[derive(Clone)]
pub struct AppState {
    pub schedule_service: ScheduleService,
    pub notification_service: NotificationService,
}

/// One day.
const MAX_REMINDER_WINDOW_MINUTES: i64 = 24 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub schedule_key: String,
    pub notify_base_url: String,
    pub reminder_api_key: Option<String>,
    pub reminder_window_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: None,
            schedule_key: "schedules".to_string(),
            notify_base_url: DEFAULT_NOTIFY_BASE_URL.to_string(),
            reminder_api_key: None,
            reminder_window_minutes: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => defaults.port,
        };
        let reminder_window_minutes = match var("REMINDER_WINDOW_MINUTES") {
            Some(minutes) => minutes
                .parse()
                .context("REMINDER_WINDOW_MINUTES must be a number")?,
            None => defaults.reminder_window_minutes,
        };
        anyhow::ensure!(
            (0..=MAX_REMINDER_WINDOW_MINUTES).contains(&reminder_window_minutes),
            "REMINDER_WINDOW_MINUTES must be between 0 and {MAX_REMINDER_WINDOW_MINUTES}"
        );

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            database_url: var("DATABASE_URL"),
            schedule_key: var("SCHEDULE_KEY").unwrap_or(defaults.schedule_key),
            notify_base_url: var("NOTIFY_BASE_URL").unwrap_or(defaults.notify_base_url),
            reminder_api_key: var("REMINDER_API_KEY"),
            reminder_window_minutes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn reminder_window(&self) -> anyhow::Result<chrono::Duration> {
        chrono::Duration::try_minutes(self.reminder_window_minutes)
            .context("REMINDER_WINDOW_MINUTES is out of range")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.schedule_key, "schedules");
        assert_eq!(config.notify_base_url, DEFAULT_NOTIFY_BASE_URL);
        assert!(config.database_url.is_none());
        assert!(config.reminder_api_key.is_none());
        assert_eq!(config.reminder_window_minutes, 5);
        assert_eq!(config.reminder_window().unwrap(), chrono::Duration::minutes(5));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("SCHEDULE_KEY", "agenda"),
            ("REMINDER_API_KEY", "secret"),
            ("DATABASE_URL", ""),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.schedule_key, "agenda");
        assert_eq!(config.reminder_api_key.as_deref(), Some("secret"));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_reminder_window_range() {
        let config = config_from(&[("REMINDER_WINDOW_MINUTES", "1440")]).unwrap();
        assert_eq!(config.reminder_window().unwrap(), chrono::Duration::days(1));

        assert!(config_from(&[("REMINDER_WINDOW_MINUTES", "-1")]).is_err());
        assert!(config_from(&[("REMINDER_WINDOW_MINUTES", "1441")]).is_err());
        assert!(config_from(&[("REMINDER_WINDOW_MINUTES", "9223372036854775807")]).is_err());
    }
}
