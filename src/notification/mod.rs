pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_sender;
pub mod notification_service;
pub mod routes;

pub use notification_dto::NotifyRequest;
pub use notification_sender::{NotificationSender, NotifyXSender, DEFAULT_NOTIFY_BASE_URL};
pub use notification_service::{start_reminder_service, NotificationService};
