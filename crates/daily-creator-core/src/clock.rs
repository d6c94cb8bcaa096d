//! Wall-clock source for the tracker.
//!
//! Streak math compares calendar days on local naive time. Reminder sleeps
//! are measured between absolute instants so DST shifts land on the local
//! time-of-day.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// The instant a local wall-clock reading refers to.
    ///
    /// Defaults to a zone without offset changes.
    fn instant(&self, local: NaiveDateTime) -> DateTime<Utc> {
        Utc.from_utc_datetime(&local)
    }

    fn now_instant(&self) -> DateTime<Utc> {
        self.instant(self.now())
    }
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Ambiguous readings take the earlier instant. A reading inside a
    /// spring-forward gap is pushed past it.
    fn instant(&self, local: NaiveDateTime) -> DateTime<Utc> {
        Local
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| Local.from_local_datetime(&(local + Duration::hours(1))).earliest())
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&local))
    }

    fn now_instant(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// A clock set to noon on `date`.
    pub fn at_noon(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
