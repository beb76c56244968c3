//! Driving port for the notification read transition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

use super::NotificationPayload;

/// Request to mark one feed entry as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkNotificationReadRequest {
    pub notification_id: Uuid,
}

/// Response carrying the updated feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkNotificationReadResponse {
    pub notification: NotificationPayload,
}

/// Driving port for the mark-read operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    async fn mark_read(
        &self,
        request: MarkNotificationReadRequest,
    ) -> Result<MarkNotificationReadResponse, Error>;
}
