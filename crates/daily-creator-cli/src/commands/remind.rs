use daily_creator_core::{Config, Notifier, ReminderTime};
use tracing::info;

use super::open_tracker;

pub fn notify() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut tracker, _) = open_tracker(&config)?;

    if !tracker.send_notification()? {
        eprintln!(
            "notifications not allowed (run `daily-creator remind` or set notifications.permission)"
        );
        std::process::exit(1);
    }
    Ok(())
}

pub fn remind(time: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let time = time.map(|raw| raw.parse::<ReminderTime>()).transpose()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut config = Config::load()?;
        let (mut tracker, notifier) = open_tracker(&config)?;
        if let Some(time) = time {
            tracker.set_notification_time(time)?;
        }

        let result = tracker.request_notification_permission().await?;
        let answered = notifier.permission();
        if answered != config.notifications.permission {
            config.notifications.permission = answered;
            config.save()?;
        }

        println!("{}", result.message);
        if !result.success {
            std::process::exit(1);
        }

        println!(
            "Rappel quotidien à {} (Ctrl-C pour arrêter)",
            tracker.notification_time()
        );
        tokio::signal::ctrl_c().await?;
        tracker.cancel_reminders();
        info!("reminder stopped");
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
