//! Notification feed domain service.
//!
//! Implements both feed driving ports: the provider-gated newest-first
//! listing and the mark-read transition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::booking_service::map_identity_error;
use crate::domain::ports::{
    IdentityOracle, ListNotificationsRequest, ListNotificationsResponse,
    MarkNotificationReadRequest, MarkNotificationReadResponse, NotificationCommand,
    NotificationQuery, NotificationRepository, NotificationRepositoryError,
};

/// Default cap of the notification feed listing.
pub const DEFAULT_FEED_LIMIT: i64 = 20;

fn map_notification_repository_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

/// Notification service implementing the feed driving ports.
#[derive(Clone)]
pub struct NotificationService<N, I> {
    notification_repo: Arc<N>,
    identity: Arc<I>,
    feed_limit: i64,
}

impl<N, I> NotificationService<N, I> {
    /// Create a new notification service with the default feed cap.
    pub fn new(notification_repo: Arc<N>, identity: Arc<I>) -> Self {
        Self {
            notification_repo,
            identity,
            feed_limit: DEFAULT_FEED_LIMIT,
        }
    }

    /// Override the default feed cap.
    pub fn with_feed_limit(mut self, feed_limit: i64) -> Self {
        self.feed_limit = feed_limit;
        self
    }
}

#[async_trait]
impl<N, I> NotificationQuery for NotificationService<N, I>
where
    N: NotificationRepository,
    I: IdentityOracle,
{
    async fn list_notifications(
        &self,
        request: ListNotificationsRequest,
    ) -> Result<ListNotificationsResponse, Error> {
        let caller_is_provider = self
            .identity
            .is_provider(&request.provider_id)
            .await
            .map_err(map_identity_error)?;
        if !caller_is_provider {
            return Err(Error::not_authorized(
                "only providers can load notifications",
            ));
        }

        let limit = request.limit.unwrap_or(self.feed_limit).max(1);
        let notifications = self
            .notification_repo
            .list_recent_for_provider(&request.provider_id, limit)
            .await
            .map_err(map_notification_repository_error)?;

        Ok(ListNotificationsResponse {
            notifications: notifications.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl<N, I> NotificationCommand for NotificationService<N, I>
where
    N: NotificationRepository,
    I: IdentityOracle,
{
    async fn mark_read(
        &self,
        request: MarkNotificationReadRequest,
    ) -> Result<MarkNotificationReadResponse, Error> {
        let updated = self
            .notification_repo
            .mark_read(&request.notification_id)
            .await
            .map_err(map_notification_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "notification {} not found",
                    request.notification_id
                ))
            })?;

        Ok(MarkNotificationReadResponse {
            notification: updated.into(),
        })
    }
}

#[cfg(test)]
#[path = "notification_service_tests.rs"]
mod tests;
