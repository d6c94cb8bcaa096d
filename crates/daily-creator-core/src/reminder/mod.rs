mod notifier;
mod scheduler;
mod time;

pub use notifier::{Notification, NotificationTemplate, Notifier, Permission};
pub use scheduler::{send_notification, ReminderContext, ReminderScheduler};
pub use time::ReminderTime;
