use daily_creator_core::{Config, PhrasePicker, ReminderTime};
use serde_json::json;

use super::open_tracker;

pub fn status(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut tracker, _) = open_tracker(&config)?;
    let check = tracker.check_streak()?;
    let snapshot = tracker.snapshot();

    if json {
        let out = json!({ "check": check, "snapshot": snapshot });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(message) = &check.message {
        println!("{message}");
    }
    let days = if snapshot.streak > 1 { "jours" } else { "jour" };
    println!("Streak : {} {days}", snapshot.streak);
    if let Some(display) = &snapshot.last_created_display {
        println!("{display}");
    }
    println!("Rappel : {}", snapshot.notification_time);
    println!("{}", snapshot.current_phrase);
    Ok(())
}

pub fn mark(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut tracker, _) = open_tracker(&config)?;
    let result = tracker.mark_created()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.message);
        if result.success {
            println!("{}", tracker.current_phrase());
        }
    }

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

pub fn phrase() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", PhrasePicker::new().pick());
    Ok(())
}

pub fn time(new_time: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut tracker, _) = open_tracker(&config)?;

    match new_time {
        Some(raw) => {
            let time: ReminderTime = raw.parse()?;
            tracker.set_notification_time(time)?;
            println!("{time}");
        }
        None => println!("{}", tracker.notification_time()),
    }
    Ok(())
}
