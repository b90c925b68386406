use shared_types::{Notification, NotificationKind};
use std::sync::Mutex;

/// Shows the blocking notice once a submission settles
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notices to stdout
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!("Notifying success: {}", notification.message);
                println!("[success] {}", notification.message);
            }
            NotificationKind::Error => {
                tracing::warn!("Notifying error: {}", notification.message);
                println!("[error] {}", notification.message);
            }
        }
    }
}

/// Keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(notification);
        }
    }
}
