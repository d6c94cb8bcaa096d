//! Daily reminder loop.
//!
//! One spawned task per scheduler: sleep until the next occurrence of the
//! reminder time, show a notification, compute the next occurrence, repeat.
//! The task handle is kept so re-arming replaces the previous loop.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::notifier::{NotificationTemplate, Notifier, Permission};
use super::time::ReminderTime;
use crate::clock::Clock;
use crate::error::SchedulerError;
use crate::phrases::PhrasePicker;

/// Everything the reminder task owns once spawned.
pub struct ReminderContext {
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub template: NotificationTemplate,
    pub picker: PhrasePicker,
}

/// Show one reminder with a fresh phrase if permission is granted.
///
/// Returns `Ok(false)` without showing anything when it is not.
pub fn send_notification(
    notifier: &dyn Notifier,
    template: &NotificationTemplate,
    picker: &mut PhrasePicker,
) -> Result<bool, SchedulerError> {
    if notifier.permission() != Permission::Granted {
        return Ok(false);
    }
    let notification = template.with_body(picker.pick());
    notifier.show(&notification)?;
    Ok(true)
}

/// Holds at most one armed reminder loop.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the daily loop for `time`, aborting any loop armed before.
    ///
    /// # Errors
    /// [`SchedulerError::NoRuntime`] when called outside a tokio runtime.
    pub fn arm(&mut self, time: ReminderTime, ctx: ReminderContext) -> Result<(), SchedulerError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        if self.cancel() {
            debug!("replaced previously armed reminder");
        }
        self.handle = Some(runtime.spawn(run_reminders(time, ctx)));
        Ok(())
    }

    /// Abort the armed loop. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_reminders(time: ReminderTime, ctx: ReminderContext) {
    let ReminderContext {
        notifier,
        clock,
        template,
        mut picker,
    } = ctx;

    // A wall clock that lags the timer must not fire the same slot twice.
    let mut last_fired: Option<NaiveDateTime> = None;

    loop {
        let now = match last_fired {
            Some(fired) => clock.now().max(fired),
            None => clock.now(),
        };
        let target = time.next_occurrence(now);
        let delay = (clock.instant(target) - clock.now_instant())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        info!(%target, delay_secs = delay.as_secs(), "reminder armed");

        tokio::time::sleep(delay).await;
        last_fired = Some(target);

        match send_notification(notifier.as_ref(), &template, &mut picker) {
            Ok(true) => info!(%target, "reminder shown"),
            Ok(false) => debug!("notification permission not granted, reminder skipped"),
            Err(e) => warn!(error = %e, "failed to show reminder"),
        }
    }
}
