//! Notification System
//!
//! Keeps the info/error messages produced by controller operations, shows
//! the newest one as a toast and retains a bounded history.

use crate::controller::{Message, Severity};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
    pub created_at: Instant,
    pub timestamp: DateTime<Local>,
}

impl Notification {
    pub fn new(message: Message) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity: message.severity,
            summary: message.summary,
            detail: message.detail,
            created_at: Instant::now(),
            timestamp: Local::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn icon(&self) -> &'static str {
        match self.severity {
            Severity::Info => "✓",
            Severity::Error => "✗",
        }
    }

    /// Short form for the status line
    pub fn toast_message(&self) -> String {
        format!("{} {}", self.icon(), self.summary)
    }

    pub fn time_display(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Notification manager
pub struct NotificationManager {
    /// All notifications (recent first)
    pub notifications: VecDeque<Notification>,
    /// Maximum notifications to keep in history
    pub max_history: usize,
    /// Toast display duration
    pub toast_duration: Duration,
    last_toast_time: Option<Instant>,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_history: 50,
            toast_duration: Duration::from_secs(5),
            last_toast_time: None,
        }
    }

    /// Record a message and make it the current toast
    pub fn push(&mut self, message: Message) -> Uuid {
        match message.severity {
            Severity::Info => tracing::info!("{}", message.summary),
            Severity::Error => tracing::warn!("{}", message.summary),
        }
        let notification = Notification::new(message);
        let id = notification.id;
        self.notifications.push_front(notification);
        self.last_toast_time = Some(Instant::now());
        self.trim_history();
        id
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        for message in messages {
            self.push(message);
        }
    }

    /// Get notification by ID
    pub fn get(&self, id: Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Get the most recent notification while its toast is still visible
    pub fn current_toast(&self) -> Option<&Notification> {
        let last_time = self.last_toast_time?;
        if last_time.elapsed() > self.toast_duration {
            return None;
        }
        self.notifications.front()
    }

    pub fn dismiss_toast(&mut self) {
        self.last_toast_time = None;
    }

    pub fn error_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_error()).count()
    }

    /// Clear all notifications
    pub fn clear(&mut self) {
        self.notifications.clear();
        self.last_toast_time = None;
    }

    fn trim_history(&mut self) {
        self.notifications.truncate(self.max_history.max(1));
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_is_newest_first() {
        let mut manager = NotificationManager::new();
        manager.push(Message::info("first"));
        let id = manager.push(Message::error("second"));

        assert_eq!(manager.notifications.len(), 2);
        assert_eq!(manager.notifications[0].summary, "second");
        assert!(manager.get(id).unwrap().is_error());
        assert_eq!(manager.current_toast().unwrap().summary, "second");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut manager = NotificationManager::new();
        manager.max_history = 3;
        for i in 0..10 {
            manager.push(Message::info(format!("msg {}", i)));
        }
        assert_eq!(manager.notifications.len(), 3);
        assert_eq!(manager.notifications[0].summary, "msg 9");
        assert_eq!(manager.notifications[2].summary, "msg 7");
    }

    #[test]
    fn test_toast_expires() {
        let mut manager = NotificationManager::new();
        manager.toast_duration = Duration::ZERO;
        manager.push(Message::info("gone"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(manager.current_toast().is_none());
        assert!(manager.has_notifications());
    }

    #[test]
    fn test_toast_message_format() {
        let notif = Notification::new(Message::error("Delete not successful."));
        assert_eq!(notif.toast_message(), "✗ Delete not successful.");

        let notif = Notification::new(Message::info("Update was successful"));
        assert!(notif.toast_message().starts_with("✓"));
    }

    #[test]
    fn test_detail_is_kept() {
        let mut manager = NotificationManager::new();
        let id = manager.push(
            Message::error("Save not successful.").with_detail("boom    Caused by: io".into()),
        );
        assert_eq!(
            manager.get(id).unwrap().detail.as_deref(),
            Some("boom    Caused by: io")
        );
        assert_eq!(manager.error_count(), 1);

        manager.clear();
        assert!(manager.current_toast().is_none());
    }
}
