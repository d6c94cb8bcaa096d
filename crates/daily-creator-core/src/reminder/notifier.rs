use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    /// Never asked, or the prompt was dismissed.
    #[default]
    Default,
}

/// Title, icon and display flags shared by every reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub title: String,
    pub icon: String,
    /// Notifications with the same tag replace each other instead of stacking.
    pub tag: String,
    /// Keep the notification on screen until the user dismisses it.
    pub require_interaction: bool,
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        Self {
            title: "🎨 C'est l'heure de créer !".to_string(),
            icon: concat!(
                "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">",
                "<text y=\"75\" font-size=\"75\">🎨</text></svg>"
            )
            .to_string(),
            tag: "daily-creator".to_string(),
            require_interaction: true,
        }
    }
}

impl NotificationTemplate {
    pub fn with_body(&self, body: impl Into<String>) -> Notification {
        Notification {
            title: self.title.clone(),
            body: body.into(),
            icon: self.icon.clone(),
            tag: self.tag.clone(),
            require_interaction: self.require_interaction,
        }
    }
}

/// A single notification ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub tag: String,
    pub require_interaction: bool,
}

/// Platform notification permission and display service.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether the platform can show notifications at all.
    fn is_supported(&self) -> bool;

    fn permission(&self) -> Permission;

    /// Ask the user for permission. Suspends until they answer.
    async fn request_permission(&self) -> Permission;

    fn show(&self, notification: &Notification) -> Result<(), SchedulerError>;
}
