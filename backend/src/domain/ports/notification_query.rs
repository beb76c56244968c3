//! Driving port for reading a provider's notification feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Notification, UserId};

/// Serializable notification payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub id: Uuid,
    pub provider_user_id: UserId,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationPayload {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id(),
            provider_user_id: value.provider_user_id().clone(),
            content: value.content().to_owned(),
            read: value.is_read(),
            created_at: value.created_at(),
        }
    }
}

/// Request for the newest entries of a provider's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsRequest {
    /// Authenticated caller; must be a provider.
    pub provider_id: UserId,
    /// Optional cap override; the service default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Response carrying feed entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsResponse {
    pub notifications: Vec<NotificationPayload>,
}

/// Driving port for the notification feed read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQuery: Send + Sync {
    async fn list_notifications(
        &self,
        request: ListNotificationsRequest,
    ) -> Result<ListNotificationsResponse, Error>;
}
