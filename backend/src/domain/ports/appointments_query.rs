//! Driving port for a client's own appointment listing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Fixed page size of the client appointment listing.
pub const APPOINTMENTS_PAGE_SIZE: i64 = 20;

/// Request for one page of the caller's upcoming and past bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsRequest {
    /// Authenticated caller; the appointments' client.
    pub client_id: UserId,
    /// 1-based page number. Values below 1 are treated as 1.
    pub page: u32,
}

/// Provider display fields embedded in a listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummaryPayload {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// One listing entry with its display-oriented derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// The slot start is not after "now" as sampled by the service.
    pub past: bool,
    /// Cancellation is still permitted at "now" as sampled by the service.
    pub cancelable: bool,
    pub provider: ProviderSummaryPayload,
}

/// Response carrying one page of listing entries, date ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsResponse {
    pub appointments: Vec<AppointmentSummary>,
}

/// Driving port for the client appointment listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentsQuery: Send + Sync {
    async fn list_appointments(
        &self,
        request: ListAppointmentsRequest,
    ) -> Result<ListAppointmentsResponse, Error>;
}
