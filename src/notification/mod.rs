pub mod notification_models;
pub mod notification_repository;
pub mod notification_handlers;
pub mod notification_service;
pub mod reminder_job;

pub use notification_models::Notification;
pub use notification_repository::{NotificationRepository, PgNotificationRepository};
pub use notification_handlers::{list_notifications, mark_notification_read};
pub use notification_service::NotificationService;
pub use reminder_job::{start_reminder_job, ReminderJob};
