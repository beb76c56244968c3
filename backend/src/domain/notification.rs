//! Provider notification entity.
//!
//! Notifications form an append-only feed per provider. The only mutation
//! after insert is the read transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// A single feed entry addressed to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: Uuid,
    provider_user_id: UserId,
    content: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification for a provider.
    pub fn new(provider_user_id: UserId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_user_id,
            content: content.into(),
            read: false,
            created_at,
        }
    }

    /// Rehydrate a notification from stored fields.
    pub fn from_parts(
        id: Uuid,
        provider_user_id: UserId,
        content: String,
        read: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            provider_user_id,
            content,
            read,
            created_at,
        }
    }

    /// Returns the notification id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the recipient provider's id.
    pub fn provider_user_id(&self) -> &UserId {
        &self.provider_user_id
    }

    /// Returns the free-text content.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Returns true once the provider has seen the entry.
    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp used for feed ordering.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The read transition. Idempotent.
    pub fn mark_read(mut self) -> Self {
        self.read = true;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the read transition.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn new_notifications_start_unread() {
        let note = Notification::new(UserId::random(), "New booking", Utc::now());
        assert!(!note.is_read());
    }

    #[rstest]
    fn mark_read_is_idempotent() {
        let note = Notification::new(UserId::random(), "New booking", Utc::now());
        let read = note.mark_read().mark_read();
        assert!(read.is_read());
    }

    #[rstest]
    fn from_parts_preserves_stored_fields() {
        let id = uuid::Uuid::new_v4();
        let provider = UserId::random();
        let created_at = Utc::now();

        let note = Notification::from_parts(id, provider.clone(), "hello".to_owned(), true, created_at);

        assert_eq!(note.id(), id);
        assert_eq!(note.provider_user_id(), &provider);
        assert_eq!(note.content(), "hello");
        assert!(note.is_read());
        assert_eq!(note.created_at(), created_at);
    }
}
