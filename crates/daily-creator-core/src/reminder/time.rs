use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Local time-of-day a daily reminder fires at, `HH:MM` on a 24h clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    pub const DEFAULT: ReminderTime = ReminderTime { hour: 9, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        let invalid = |message: &str| ValidationError::InvalidTime {
            value: format!("{hour}:{minute:02}"),
            message: message.to_string(),
        };
        if hour > 23 {
            return Err(invalid("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(invalid("minute must be between 0 and 59"));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }

    /// The first instant at this time-of-day strictly after `now`.
    ///
    /// When today's instance is `now` or already past, tomorrow's is returned.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.as_naive_time());
        if today <= now {
            today + Duration::days(1)
        } else {
            today
        }
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = ValidationError;

    /// Parses `H:MM` / `HH:MM`. A bare hour (`"7"`) means `07:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ValidationError::InvalidTime {
            value: s.to_string(),
            message: message.to_string(),
        };

        let trimmed = s.trim();
        let (hours, minutes) = match trimmed.split_once(':') {
            Some((h, m)) => (h, m),
            None => (trimmed, "0"),
        };

        let parse_part = |part: &str, what: &str| -> Result<u32, ValidationError> {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(&format!("{what} must be one or two digits")));
            }
            part.parse::<u32>()
                .map_err(|_| invalid(&format!("{what} must be a number")))
        };

        let hour = parse_part(hours, "hour")?;
        let minute = parse_part(minutes, "minute")?;
        Self::new(hour, minute).map_err(|e| match e {
            ValidationError::InvalidTime { message, .. } => invalid(&message),
        })
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}
