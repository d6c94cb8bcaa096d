//! Terminal stand-in for a desktop notification service.

use std::io::{BufRead, IsTerminal, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use daily_creator_core::{Notification, Notifier, Permission, SchedulerError};
use tracing::warn;

/// Prompts for permission on the terminal and prints notifications to stdout.
pub struct ConsoleNotifier {
    permission: Mutex<Permission>,
    interactive: bool,
}

impl ConsoleNotifier {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
            interactive: std::io::stdin().is_terminal(),
        }
    }

    fn set_permission(&self, permission: Permission) {
        match self.permission.lock() {
            Ok(mut guard) => *guard = permission,
            Err(poisoned) => *poisoned.into_inner() = permission,
        }
    }
}

fn parse_answer(line: &str) -> Permission {
    match line.trim().to_lowercase().as_str() {
        "o" | "oui" | "y" | "yes" => Permission::Granted,
        "n" | "non" | "no" => Permission::Denied,
        _ => Permission::Default,
    }
}

fn prompt() -> Permission {
    let mut stderr = std::io::stderr();
    if let Err(e) = write!(stderr, "Autoriser les rappels quotidiens ? [o/n] ")
        .and_then(|()| stderr.flush())
    {
        warn!(error = %e, "could not write permission prompt");
    }

    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(_) => parse_answer(&line),
        Err(e) => {
            warn!(error = %e, "could not read permission answer");
            Permission::Default
        }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn is_supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        match self.permission.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    async fn request_permission(&self) -> Permission {
        if !self.interactive {
            return Permission::Default;
        }
        let answer = tokio::task::spawn_blocking(prompt)
            .await
            .unwrap_or(Permission::Default);
        self.set_permission(answer);
        answer
    }

    fn show(&self, notification: &Notification) -> Result<(), SchedulerError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", notification.title)
            .and_then(|_| writeln!(stdout, "  {}", notification.body))
            .and_then(|_| stdout.flush())
            .map_err(|e| SchedulerError::Notify(e.to_string()))
    }
}
