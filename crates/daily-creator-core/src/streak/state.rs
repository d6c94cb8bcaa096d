//! Persisted tracker state and calendar-day arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StorageError;
use crate::reminder::ReminderTime;
use crate::storage::KeyValueStore;

pub const LAST_CREATED_KEY: &str = "lastCreatedDate";
pub const STREAK_KEY: &str = "creatorStreak";
pub const NOTIFICATION_TIME_KEY: &str = "notificationTime";

const DAY_FORMAT: &str = "%Y-%m-%d";
/// `Date.toDateString()` rendering, e.g. `Wed Oct 14 2026`.
const LEGACY_DAY_FORMAT: &str = "%a %b %d %Y";

/// Parse a stored calendar-day marker.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, LEGACY_DAY_FORMAT))
        .ok()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Where today falls relative to the last creation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayGap {
    SameDay,
    /// The clock is earlier than the stored marker by this many days.
    BackInTime(i64),
    NextDay,
    /// More than one day has passed.
    Missed(i64),
}

impl DayGap {
    pub fn between(last: NaiveDate, today: NaiveDate) -> Self {
        match (today - last).num_days() {
            0 => DayGap::SameDay,
            1 => DayGap::NextDay,
            d if d < 0 => DayGap::BackInTime(-d),
            d => DayGap::Missed(d),
        }
    }

    /// Whether a creation on `last` already counts for today.
    pub fn counts_as_today(&self) -> bool {
        matches!(self, DayGap::SameDay | DayGap::BackInTime(_))
    }
}

/// The tracker's persisted scalars.
///
/// `streak_count` is always 0 while `last_created` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub streak_count: u32,
    pub last_created: Option<NaiveDate>,
    pub notification_time: ReminderTime,
}

impl StreakState {
    pub fn new(notification_time: ReminderTime) -> Self {
        Self {
            streak_count: 0,
            last_created: None,
            notification_time,
        }
    }

    /// Read the state from `store`, falling back to defaults for missing or
    /// unreadable values.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        default_time: ReminderTime,
    ) -> Result<Self, StorageError> {
        let last_created = match store.get(LAST_CREATED_KEY)? {
            Some(raw) => {
                let parsed = parse_day(&raw);
                if parsed.is_none() {
                    warn!(key = LAST_CREATED_KEY, value = %raw, "ignoring unreadable stored date");
                }
                parsed
            }
            None => None,
        };

        let mut streak_count = match store.get(STREAK_KEY)? {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!(key = STREAK_KEY, value = %raw, "ignoring unreadable stored streak");
                0
            }),
            None => 0,
        };
        if last_created.is_none() && streak_count > 0 {
            warn!(streak_count, "stored streak has no creation date, resetting to 0");
            streak_count = 0;
        }

        let notification_time = match store.get(NOTIFICATION_TIME_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(key = NOTIFICATION_TIME_KEY, error = %e, "ignoring unreadable stored time");
                default_time
            }),
            None => default_time,
        };

        Ok(Self {
            streak_count,
            last_created,
            notification_time,
        })
    }

    /// Write the creation marker and streak count.
    pub(crate) fn save_progress<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<(), StorageError> {
        if let Some(day) = self.last_created {
            store.set(LAST_CREATED_KEY, &format_day(day))?;
        }
        self.save_streak(store)
    }

    pub(crate) fn save_streak<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<(), StorageError> {
        store.set(STREAK_KEY, &self.streak_count.to_string())
    }

    pub(crate) fn save_notification_time<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<(), StorageError> {
        store.set(NOTIFICATION_TIME_KEY, &self.notification_time.to_string())
    }
}
