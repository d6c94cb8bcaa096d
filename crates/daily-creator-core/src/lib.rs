//! # Daily Creator Core Library
//!
//! This library tracks a daily "creation streak" and sends a motivational
//! reminder once a day. The CLI binary is a thin shell over the same API.
//!
//! ## Architecture
//!
//! - **Streak Tracker**: loads a few scalars from a key-value store, applies
//!   calendar-day streak rules, writes them back after every change
//! - **Storage**: SQLite-backed key-value store and TOML-based configuration
//! - **Reminders**: a notifier trait for the platform plus a tokio task that
//!   re-arms itself for the next day after each notification
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: marks, streak checks, reminders
//! - [`KeyValueStore`]: persistence seam ([`Database`], [`MemoryStore`])
//! - [`Notifier`]: notification permission and display seam
//! - [`Clock`]: wall-clock seam ([`SystemClock`], [`FixedClock`])
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod phrases;
pub mod reminder;
pub mod storage;
pub mod streak;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, SchedulerError, StorageError, ValidationError};
pub use phrases::{PhrasePicker, MOTIVATION_PHRASES};
pub use reminder::{
    Notification, NotificationTemplate, Notifier, Permission, ReminderScheduler, ReminderTime,
};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use streak::{
    MotivationResult, StreakCheck, StreakSnapshot, StreakState, StreakTracker, TrackerOptions,
};
