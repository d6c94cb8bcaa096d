pub mod config;
pub mod remind;
pub mod streak;

use std::sync::Arc;

use daily_creator_core::{Config, Database, StreakTracker, SystemClock, TrackerOptions};

use crate::notifier::ConsoleNotifier;

/// Open the tracker over the on-disk store, configured from `config.toml`.
pub fn open_tracker(
    config: &Config,
) -> Result<(StreakTracker<Database>, Arc<ConsoleNotifier>), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let notifier = Arc::new(ConsoleNotifier::new(config.notifications.permission));
    let tracker = StreakTracker::with_options(
        db,
        Arc::new(SystemClock),
        notifier.clone(),
        TrackerOptions::from_config(config),
    )?;
    Ok((tracker, notifier))
}
