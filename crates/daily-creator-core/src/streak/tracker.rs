//! The streak tracker: daily creation marks, streak breaks, reminders.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::state::{DayGap, StreakState};
use crate::clock::Clock;
use crate::error::Result;
use crate::phrases::PhrasePicker;
use crate::reminder::{
    send_notification, NotificationTemplate, Notifier, Permission, ReminderContext,
    ReminderScheduler, ReminderTime,
};
use crate::storage::{Config, KeyValueStore};

const ALREADY_MARKED: &str = "Tu as déjà marqué ta création aujourd'hui ! 🎉";
const STREAK_BROKEN: &str = "⚠️ Ta streak a été cassée. Recommence aujourd'hui !";
const CREATED_TODAY: &str = "✅ Tu as déjà créé aujourd'hui ! Génial !";
const NOTIFICATIONS_UNSUPPORTED: &str =
    "Les notifications ne sont pas supportées par ton navigateur";
const NOTIFICATIONS_ENABLED: &str = "Notifications activées !";
const NOTIFICATIONS_BLOCKED: &str =
    "Notifications bloquées. Active-les dans les paramètres de ton navigateur.";
const NOTIFICATIONS_REFUSED: &str = "Notifications refusées.";

/// Outcome of a user action, shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

impl MotivationResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            streak: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            streak: None,
        }
    }
}

/// Outcome of [`StreakTracker::check_streak`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakCheck {
    pub broken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Everything a UI shows about the tracker at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    pub streak: u32,
    pub last_created: Option<NaiveDate>,
    pub notification_time: ReminderTime,
    pub created_today: bool,
    pub last_created_display: Option<String>,
    pub current_phrase: String,
    pub reminder_armed: bool,
}

/// Construction options for [`StreakTracker`].
#[derive(Debug, Clone, Default)]
pub struct TrackerOptions {
    /// Reminder time used until one has been persisted.
    pub default_time: ReminderTime,
    pub template: NotificationTemplate,
    /// Fixed phrase seed; entropy when `None`.
    pub seed: Option<u64>,
}

impl TrackerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_time: config.reminder.default_time,
            template: config.notifications.template(),
            seed: None,
        }
    }
}

/// Tracks the daily creation streak over an injected key-value store.
///
/// State is loaded once in [`StreakTracker::new`] and written back after
/// every mutation, so a later tracker over the same store picks it up.
pub struct StreakTracker<S: KeyValueStore> {
    store: S,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    template: NotificationTemplate,
    state: StreakState,
    picker: PhrasePicker,
    current_phrase: &'static str,
    scheduler: ReminderScheduler,
}

impl<S: KeyValueStore> StreakTracker<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::with_options(store, clock, notifier, TrackerOptions::default())
    }

    pub fn with_options(
        store: S,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        options: TrackerOptions,
    ) -> Result<Self> {
        let state = StreakState::load(&store, options.default_time)?;
        let mut picker = match options.seed {
            Some(seed) => PhrasePicker::seeded(seed),
            None => PhrasePicker::new(),
        };
        let current_phrase = picker.pick();
        debug!(
            streak = state.streak_count,
            last_created = ?state.last_created,
            "streak state loaded"
        );
        Ok(Self {
            store,
            clock,
            notifier,
            template: options.template,
            state,
            picker,
            current_phrase,
            scheduler: ReminderScheduler::new(),
        })
    }

    pub fn state(&self) -> &StreakState {
        &self.state
    }

    pub fn streak(&self) -> u32 {
        self.state.streak_count
    }

    pub fn last_created(&self) -> Option<NaiveDate> {
        self.state.last_created
    }

    pub fn notification_time(&self) -> ReminderTime {
        self.state.notification_time
    }

    pub fn current_phrase(&self) -> &'static str {
        self.current_phrase
    }

    /// A random phrase, leaving the displayed one alone.
    pub fn random_phrase(&mut self) -> &'static str {
        self.picker.pick()
    }

    /// Replace the displayed phrase with a new random one.
    pub fn refresh_phrase(&mut self) -> &'static str {
        self.current_phrase = self.picker.pick();
        self.current_phrase
    }

    fn gap_to_today(&self) -> Option<DayGap> {
        let today = self.clock.today();
        self.state
            .last_created
            .map(|last| DayGap::between(last, today))
    }

    /// Record today's creation and advance the streak.
    pub fn mark_created(&mut self) -> Result<MotivationResult> {
        let today = self.clock.today();
        let gap = self
            .state
            .last_created
            .map(|last| DayGap::between(last, today));

        let mut next = self.state.clone();
        match gap {
            Some(DayGap::SameDay) => return Ok(MotivationResult::fail(ALREADY_MARKED)),
            Some(DayGap::BackInTime(days)) => {
                warn!(days, "clock is behind the last creation day, treating as same day");
                return Ok(MotivationResult::fail(ALREADY_MARKED));
            }
            Some(DayGap::NextDay) => {
                next.streak_count = next.streak_count.saturating_add(1);
            }
            Some(DayGap::Missed(days)) => {
                debug!(days, previous = next.streak_count, "streak restarted");
                next.streak_count = 1;
            }
            None => next.streak_count = 1,
        }
        next.last_created = Some(today);

        // Memory follows the store only once the write went through.
        next.save_progress(&self.store)?;
        self.state = next;
        self.refresh_phrase();

        let streak = self.state.streak_count;
        info!(streak, %today, "creation marked");
        Ok(MotivationResult {
            success: true,
            message: format!(
                "🎉 Bravo ! Streak de {} jour{} !",
                streak,
                if streak > 1 { "s" } else { "" }
            ),
            streak: Some(streak),
        })
    }

    /// Reset the streak to 0 if more than one day has passed since the last
    /// creation. Meant to run on load/focus.
    pub fn check_streak(&mut self) -> Result<StreakCheck> {
        if let Some(DayGap::Missed(days)) = self.gap_to_today() {
            if self.state.streak_count > 0 {
                info!(days, previous = self.state.streak_count, "streak broken");
                let next = StreakState {
                    streak_count: 0,
                    ..self.state.clone()
                };
                next.save_streak(&self.store)?;
                self.state = next;
                return Ok(StreakCheck {
                    broken: true,
                    message: Some(STREAK_BROKEN.to_string()),
                });
            }
        }
        Ok(StreakCheck {
            broken: false,
            message: None,
        })
    }

    pub fn has_created_today(&self) -> bool {
        self.gap_to_today().is_some_and(|gap| gap.counts_as_today())
    }

    pub fn last_created_display(&self) -> Option<String> {
        let last = self.state.last_created?;
        if self.has_created_today() {
            return Some(CREATED_TODAY.to_string());
        }
        Some(format!("Dernière création : {}", last.format("%d/%m/%Y")))
    }

    /// Change the reminder time. An armed reminder is re-armed for it.
    pub fn set_notification_time(&mut self, time: ReminderTime) -> Result<()> {
        let next = StreakState {
            notification_time: time,
            ..self.state.clone()
        };
        next.save_notification_time(&self.store)?;
        self.state = next;
        if self.scheduler.is_armed() {
            self.schedule_notification()?;
        }
        Ok(())
    }

    /// Ask for notification permission and arm the daily reminder when it
    /// is granted.
    pub async fn request_notification_permission(&mut self) -> Result<MotivationResult> {
        if !self.notifier.is_supported() {
            return Ok(MotivationResult::fail(NOTIFICATIONS_UNSUPPORTED));
        }

        match self.notifier.permission() {
            Permission::Granted => {
                self.schedule_notification()?;
                return Ok(MotivationResult::ok(NOTIFICATIONS_ENABLED));
            }
            Permission::Denied => return Ok(MotivationResult::fail(NOTIFICATIONS_BLOCKED)),
            Permission::Default => {}
        }

        let answer = self.notifier.request_permission().await;
        debug!(?answer, "notification permission answered");
        if answer == Permission::Granted {
            self.schedule_notification()?;
            Ok(MotivationResult::ok(NOTIFICATIONS_ENABLED))
        } else {
            Ok(MotivationResult::fail(NOTIFICATIONS_REFUSED))
        }
    }

    /// Persist the reminder time and arm the daily loop, replacing any loop
    /// armed earlier.
    pub fn schedule_notification(&mut self) -> Result<()> {
        let time = self.state.notification_time;
        self.state.save_notification_time(&self.store)?;
        let ctx = ReminderContext {
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            template: self.template.clone(),
            picker: self.picker.fork(),
        };
        self.scheduler.arm(time, ctx)?;
        Ok(())
    }

    /// Show one reminder now. Returns whether anything was shown.
    pub fn send_notification(&mut self) -> Result<bool> {
        Ok(send_notification(
            self.notifier.as_ref(),
            &self.template,
            &mut self.picker,
        )?)
    }

    /// Stop the daily reminder. Returns whether one was armed.
    pub fn cancel_reminders(&mut self) -> bool {
        self.scheduler.cancel()
    }

    pub fn reminder_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    pub fn snapshot(&self) -> StreakSnapshot {
        StreakSnapshot {
            streak: self.state.streak_count,
            last_created: self.state.last_created,
            notification_time: self.state.notification_time,
            created_today: self.has_created_today(),
            last_created_display: self.last_created_display(),
            current_phrase: self.current_phrase.to_string(),
            reminder_armed: self.scheduler.is_armed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::phrases::MOTIVATION_PHRASES;
    use crate::reminder::Notification;
    use crate::storage::MemoryStore;
    use crate::streak::state::{format_day, LAST_CREATED_KEY, NOTIFICATION_TIME_KEY, STREAK_KEY};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubNotifier {
        supported: bool,
        permission: Mutex<Permission>,
        answer: Permission,
        shown: Mutex<Vec<Notification>>,
    }

    impl StubNotifier {
        fn new(permission: Permission, answer: Permission) -> Arc<Self> {
            Arc::new(Self {
                supported: true,
                permission: Mutex::new(permission),
                answer,
                shown: Mutex::new(Vec::new()),
            })
        }

        fn unsupported() -> Arc<Self> {
            Arc::new(Self {
                supported: false,
                permission: Mutex::new(Permission::Default),
                answer: Permission::Granted,
                shown: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn permission(&self) -> Permission {
            *self.permission.lock().unwrap()
        }

        async fn request_permission(&self) -> Permission {
            *self.permission.lock().unwrap() = self.answer;
            self.answer
        }

        fn show(&self, notification: &Notification) -> std::result::Result<(), crate::error::SchedulerError> {
            self.shown.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn d0() -> NaiveDate {
        day(2026, 10, 14)
    }

    fn tracker_on<'a>(
        store: &'a MemoryStore,
        clock: &Arc<FixedClock>,
    ) -> StreakTracker<&'a MemoryStore> {
        let options = TrackerOptions {
            seed: Some(1),
            ..TrackerOptions::default()
        };
        StreakTracker::with_options(
            store,
            clock.clone(),
            StubNotifier::new(Permission::Granted, Permission::Granted),
            options,
        )
        .unwrap()
    }

    fn store_with(last: NaiveDate, streak: u32) -> MemoryStore {
        let store = MemoryStore::new();
        store.set(LAST_CREATED_KEY, &format_day(last)).unwrap();
        store.set(STREAK_KEY, &streak.to_string()).unwrap();
        store
    }

    #[test]
    fn first_mark_starts_streak() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);

        let result = tracker.mark_created().unwrap();
        assert!(result.success);
        assert_eq!(result.streak, Some(1));
        assert_eq!(result.message, "🎉 Bravo ! Streak de 1 jour !");
        assert_eq!(tracker.streak(), 1);
        assert_eq!(tracker.last_created(), Some(d0()));
        assert!(tracker.has_created_today());
        assert_eq!(store.get(STREAK_KEY).unwrap().as_deref(), Some("1"));
        assert_eq!(store.get(LAST_CREATED_KEY).unwrap().as_deref(), Some("2026-10-14"));
    }

    #[test]
    fn second_mark_same_day_is_refused() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);

        assert!(tracker.mark_created().unwrap().success);
        let again = tracker.mark_created().unwrap();
        assert!(!again.success);
        assert_eq!(again.message, ALREADY_MARKED);
        assert_eq!(again.streak, None);
        assert_eq!(tracker.streak(), 1);
    }

    #[test]
    fn consecutive_day_increments() {
        let store = store_with(d0(), 3);
        let clock = Arc::new(FixedClock::at_noon(d0()));
        clock.advance_days(1);
        let mut tracker = tracker_on(&store, &clock);

        let result = tracker.mark_created().unwrap();
        assert_eq!(result.streak, Some(4));
        assert_eq!(result.message, "🎉 Bravo ! Streak de 4 jours !");
        assert_eq!(tracker.last_created(), Some(day(2026, 10, 15)));
    }

    #[test]
    fn gap_restarts_at_one() {
        let store = store_with(d0(), 3);
        let clock = Arc::new(FixedClock::at_noon(d0()));
        clock.advance_days(3);
        let mut tracker = tracker_on(&store, &clock);

        let result = tracker.mark_created().unwrap();
        assert!(result.success);
        assert_eq!(result.streak, Some(1));
    }

    #[test]
    fn late_night_then_early_morning_counts_as_consecutive() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::new(d0().and_hms_opt(23, 59, 0).unwrap()));
        let mut tracker = tracker_on(&store, &clock);
        tracker.mark_created().unwrap();

        clock.advance(chrono::Duration::minutes(2));
        assert_eq!(tracker.mark_created().unwrap().streak, Some(2));
    }

    #[test]
    fn check_detects_break_and_keeps_marker() {
        let store = store_with(d0(), 3);
        let clock = Arc::new(FixedClock::at_noon(d0()));
        clock.advance_days(3);
        let mut tracker = tracker_on(&store, &clock);

        let check = tracker.check_streak().unwrap();
        assert!(check.broken);
        assert_eq!(check.message.as_deref(), Some(STREAK_BROKEN));
        assert_eq!(tracker.streak(), 0);
        assert_eq!(tracker.last_created(), Some(d0()));
        assert_eq!(store.get(STREAK_KEY).unwrap().as_deref(), Some("0"));

        // Already reset: a second probe reports nothing.
        assert!(!tracker.check_streak().unwrap().broken);
    }

    #[test]
    fn check_same_day_or_next_day_is_quiet() {
        for offset in [0, 1] {
            let store = store_with(d0(), 3);
            let clock = Arc::new(FixedClock::at_noon(d0()));
            clock.advance_days(offset);
            let mut tracker = tracker_on(&store, &clock);

            let check = tracker.check_streak().unwrap();
            assert_eq!(
                check,
                StreakCheck {
                    broken: false,
                    message: None
                }
            );
            assert_eq!(tracker.streak(), 3);
            assert_eq!(store.get(STREAK_KEY).unwrap().as_deref(), Some("3"));
        }
    }

    #[test]
    fn check_without_marker_is_quiet() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);
        assert!(!tracker.check_streak().unwrap().broken);
        assert_eq!(tracker.streak(), 0);
    }

    #[test]
    fn clock_moving_backward_counts_as_same_day() {
        let store = store_with(d0(), 3);
        let clock = Arc::new(FixedClock::at_noon(d0()));
        clock.advance_days(-2);
        let mut tracker = tracker_on(&store, &clock);

        assert!(tracker.has_created_today());
        assert!(!tracker.mark_created().unwrap().success);
        assert!(!tracker.check_streak().unwrap().broken);
        assert_eq!(tracker.streak(), 3);
        assert_eq!(tracker.last_created(), Some(d0()));
    }

    #[test]
    fn last_created_display_variants() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);
        assert_eq!(tracker.last_created_display(), None);

        tracker.mark_created().unwrap();
        assert_eq!(tracker.last_created_display().as_deref(), Some(CREATED_TODAY));

        clock.advance_days(2);
        assert!(!tracker.has_created_today());
        assert_eq!(
            tracker.last_created_display().as_deref(),
            Some("Dernière création : 14/10/2026")
        );
    }

    #[test]
    fn state_survives_tracker_restart() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        {
            let mut tracker = tracker_on(&store, &clock);
            tracker.mark_created().unwrap();
            tracker
                .set_notification_time(ReminderTime::new(7, 45).unwrap())
                .unwrap();
        }
        clock.advance_days(1);
        let mut tracker = tracker_on(&store, &clock);
        assert_eq!(tracker.streak(), 1);
        assert_eq!(tracker.notification_time().to_string(), "07:45");
        assert_eq!(tracker.mark_created().unwrap().streak, Some(2));
    }

    #[test]
    fn mark_refreshes_displayed_phrase_from_catalog() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);
        assert!(MOTIVATION_PHRASES.contains(&tracker.current_phrase()));
        tracker.mark_created().unwrap();
        assert!(MOTIVATION_PHRASES.contains(&tracker.current_phrase()));
        assert!(MOTIVATION_PHRASES.contains(&tracker.random_phrase()));
    }

    #[test]
    fn send_notification_requires_permission() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));

        let denied = StubNotifier::new(Permission::Denied, Permission::Denied);
        let mut tracker =
            StreakTracker::new(&store, clock.clone(), denied.clone()).unwrap();
        assert!(!tracker.send_notification().unwrap());
        assert!(denied.shown.lock().unwrap().is_empty());

        let granted = StubNotifier::new(Permission::Granted, Permission::Granted);
        let mut tracker = StreakTracker::new(&store, clock, granted.clone()).unwrap();
        assert!(tracker.send_notification().unwrap());
        let shown = granted.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].tag, "daily-creator");
        assert_eq!(shown[0].title, "🎨 C'est l'heure de créer !");
        assert!(shown[0].require_interaction);
        assert!(MOTIVATION_PHRASES.contains(&shown[0].body.as_str()));
    }

    #[tokio::test]
    async fn permission_unsupported() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = StreakTracker::new(&store, clock, StubNotifier::unsupported()).unwrap();
        let result = tracker.request_notification_permission().await.unwrap();
        assert_eq!(result, MotivationResult::fail(NOTIFICATIONS_UNSUPPORTED));
        assert!(!tracker.reminder_armed());
    }

    #[tokio::test]
    async fn permission_denied_is_blocked() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let notifier = StubNotifier::new(Permission::Denied, Permission::Granted);
        let mut tracker = StreakTracker::new(&store, clock, notifier).unwrap();
        let result = tracker.request_notification_permission().await.unwrap();
        assert_eq!(result, MotivationResult::fail(NOTIFICATIONS_BLOCKED));
        assert!(!tracker.reminder_armed());
    }

    #[tokio::test]
    async fn permission_granted_arms_reminder() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let notifier = StubNotifier::new(Permission::Granted, Permission::Granted);
        let mut tracker = StreakTracker::new(&store, clock, notifier).unwrap();
        let result = tracker.request_notification_permission().await.unwrap();
        assert_eq!(result, MotivationResult::ok(NOTIFICATIONS_ENABLED));
        assert!(tracker.reminder_armed());
        assert_eq!(
            store.get(NOTIFICATION_TIME_KEY).unwrap().as_deref(),
            Some("09:00")
        );
        assert!(tracker.cancel_reminders());
        assert!(!tracker.reminder_armed());
    }

    #[tokio::test]
    async fn prompt_answer_decides() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));

        let refusing = StubNotifier::new(Permission::Default, Permission::Denied);
        let mut tracker = StreakTracker::new(&store, clock.clone(), refusing).unwrap();
        let result = tracker.request_notification_permission().await.unwrap();
        assert_eq!(result, MotivationResult::fail(NOTIFICATIONS_REFUSED));
        assert!(!tracker.reminder_armed());

        let dismissing = StubNotifier::new(Permission::Default, Permission::Default);
        let mut tracker = StreakTracker::new(&store, clock.clone(), dismissing).unwrap();
        assert!(!tracker.request_notification_permission().await.unwrap().success);

        let accepting = StubNotifier::new(Permission::Default, Permission::Granted);
        let mut tracker = StreakTracker::new(&store, clock, accepting).unwrap();
        let result = tracker.request_notification_permission().await.unwrap();
        assert!(result.success);
        assert!(tracker.reminder_armed());
    }

    #[test]
    fn scheduling_outside_runtime_fails() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);
        assert!(matches!(
            tracker.schedule_notification(),
            Err(crate::error::CoreError::Scheduler(
                crate::error::SchedulerError::NoRuntime
            ))
        ));
    }

    #[test]
    fn snapshot_serializes() {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        let mut tracker = tracker_on(&store, &clock);
        tracker.mark_created().unwrap();
        let json = serde_json::to_value(tracker.snapshot()).unwrap();
        assert_eq!(json["streak"], 1);
        assert_eq!(json["last_created"], "2026-10-14");
        assert_eq!(json["notification_time"], "09:00");
        assert_eq!(json["created_today"], true);
        assert_eq!(json["reminder_armed"], false);
    }

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        refuse_writes: std::sync::atomic::AtomicBool,
    }

    impl FlakyStore {
        fn refuse_writes(&self, refuse: bool) {
            self.refuse_writes
                .store(refuse, std::sync::atomic::Ordering::SeqCst);
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, crate::error::StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> std::result::Result<(), crate::error::StorageError> {
            if self.refuse_writes.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(crate::error::StorageError::Locked);
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let store = FlakyStore::default();
        store.inner.set(LAST_CREATED_KEY, &format_day(d0())).unwrap();
        store.inner.set(STREAK_KEY, "2").unwrap();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        clock.advance_days(1);
        let mut tracker = StreakTracker::new(
            &store,
            clock.clone(),
            StubNotifier::new(Permission::Default, Permission::Default),
        )
        .unwrap();

        store.refuse_writes(true);
        assert!(tracker.mark_created().is_err());
        assert_eq!(tracker.streak(), 2);
        assert_eq!(tracker.last_created(), Some(d0()));
        assert!(!tracker.has_created_today());
        assert!(tracker
            .set_notification_time(ReminderTime::new(7, 0).unwrap())
            .is_err());
        assert_eq!(tracker.notification_time(), ReminderTime::DEFAULT);

        store.refuse_writes(false);
        let retry = tracker.mark_created().unwrap();
        assert!(retry.success);
        assert_eq!(retry.streak, Some(3));
    }

    #[test]
    fn failed_streak_reset_is_retried() {
        let store = FlakyStore::default();
        store.inner.set(LAST_CREATED_KEY, &format_day(d0())).unwrap();
        store.inner.set(STREAK_KEY, "5").unwrap();
        let clock = Arc::new(FixedClock::at_noon(d0()));
        clock.advance_days(3);
        let mut tracker = StreakTracker::new(
            &store,
            clock.clone(),
            StubNotifier::new(Permission::Default, Permission::Default),
        )
        .unwrap();

        store.refuse_writes(true);
        assert!(tracker.check_streak().is_err());
        assert_eq!(tracker.streak(), 5);

        store.refuse_writes(false);
        assert!(tracker.check_streak().unwrap().broken);
        assert_eq!(store.inner.get(STREAK_KEY).unwrap().as_deref(), Some("0"));
    }
}
