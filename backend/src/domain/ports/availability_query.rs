//! Driving port for reading a provider's daily availability grid.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Slot, UserId};

/// Request for one provider-day of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailabilityRequest {
    /// Provider whose grid is being read. Existence is the caller's concern.
    pub provider_id: UserId,
    /// Any instant within the requested day; the time of day is ignored.
    pub day: DateTime<Utc>,
}

/// Response carrying one slot per grid label, in grid order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailabilityResponse {
    pub slots: Vec<Slot>,
}

/// Driving port for the availability read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    async fn day_availability(
        &self,
        request: DayAvailabilityRequest,
    ) -> Result<DayAvailabilityResponse, Error>;
}
