use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handle identifying one emitted notification.
pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub emitted_at: DateTime<Utc>,
}

/// Outstanding notifications, newest first.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Notification {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.into(),
            emitted_at: now,
        };
        self.items.insert(0, notification.clone());
        notification
    }

    /// Removes only the entry with this handle, even if others share its text.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn outstanding(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

pub mod messages {
    pub const CREATED: &str = "Note created successfully";
    pub const UPDATED: &str = "Note updated successfully";
    pub const DELETED: &str = "Note deleted";
    pub const SAVE_TOGGLED: &str = "Note saved status updated";

    pub fn expired(count: usize) -> String {
        format!("{count} note(s) expired")
    }

    pub fn welcome(name: &str) -> String {
        format!("Welcome back, {name}!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut center = NotificationCenter::new();
        let now = Utc::now();
        center.push("one", now);
        center.push("two", now);
        let messages: Vec<_> = center.outstanding().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["two", "one"]);
    }

    #[test]
    fn test_dismiss_removes_exactly_one_of_duplicates() {
        let mut center = NotificationCenter::new();
        let now = Utc::now();
        let first = center.push(messages::DELETED, now);
        let second = center.push(messages::DELETED, now);
        assert_ne!(first.id, second.id);

        assert!(center.dismiss(first.id));
        assert_eq!(center.len(), 1);
        assert_eq!(center.outstanding()[0].id, second.id);

        assert!(!center.dismiss(first.id));
        assert_eq!(center.len(), 1);
    }

    #[test]
    fn test_message_text() {
        assert_eq!(messages::expired(3), "3 note(s) expired");
        assert_eq!(messages::welcome("Ada"), "Welcome back, Ada!");
    }
}
