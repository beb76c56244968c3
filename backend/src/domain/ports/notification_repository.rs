//! Port for the provider notification feed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Notification, UserId};

/// Persistence errors raised by notification repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationRepositoryError {
    /// Repository connection could not be established.
    #[error("notification repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("notification repository query failed: {message}")]
    Query { message: String },
}

impl NotificationRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for appending to and reading the notification feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification to the feed.
    async fn insert(&self, notification: &Notification)
    -> Result<(), NotificationRepositoryError>;

    /// Read a provider's newest notifications, newest first, capped at
    /// `limit`.
    async fn list_recent_for_provider(
        &self,
        provider_id: &UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Apply the read transition, returning the updated record or `None`
    /// for unknown ids.
    async fn mark_read(
        &self,
        notification_id: &Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationRepository;

#[async_trait]
impl NotificationRepository for FixtureNotificationRepository {
    async fn insert(
        &self,
        _notification: &Notification,
    ) -> Result<(), NotificationRepositoryError> {
        Ok(())
    }

    async fn list_recent_for_provider(
        &self,
        _provider_id: &UserId,
        _limit: i64,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        Ok(Vec::new())
    }

    async fn mark_read(
        &self,
        _notification_id: &Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_mark_read_returns_none() {
        let repo = FixtureNotificationRepository;
        let updated = repo
            .mark_read(&Uuid::new_v4())
            .await
            .expect("fixture mark read succeeds");
        assert!(updated.is_none());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = NotificationRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
