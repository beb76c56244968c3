//! Appointment entity and its lifecycle transitions.

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::domain::UserId;

use super::{SchedulingValidationError, hour_start, slot_label};

/// Minimum lead time before an appointment's start during which cancellation
/// is still permitted.
pub const CANCELLATION_LEAD_HOURS: i64 = 2;

/// The cancellation window as a duration.
pub fn cancellation_window() -> TimeDelta {
    TimeDelta::hours(CANCELLATION_LEAD_HOURS)
}

/// Input payload for [`Appointment::new`].
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    pub id: Uuid,
    pub client_id: UserId,
    pub provider_id: UserId,
    pub date: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A booked (possibly canceled) time slot between a client and a provider.
///
/// ## Invariants
/// - `date` is always the start of an hour; it is the slot-exclusivity key.
/// - `client_id != provider_id`.
/// - Appointments are never deleted; cancellation stamps `canceled_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub(super) id: Uuid,
    pub(super) client_id: UserId,
    pub(super) provider_id: UserId,
    pub(super) date: DateTime<Utc>,
    pub(super) canceled_at: Option<DateTime<Utc>>,
    pub(super) created_at: DateTime<Utc>,
}

impl Appointment {
    /// Creates a validated appointment.
    pub fn new(draft: AppointmentDraft) -> Result<Self, SchedulingValidationError> {
        Self::try_from(draft)
    }

    /// Returns the appointment id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the booking client's id.
    pub fn client_id(&self) -> &UserId {
        &self.client_id
    }

    /// Returns the provider's id.
    pub fn provider_id(&self) -> &UserId {
        &self.provider_id
    }

    /// Returns the slot start instant.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns the cancellation timestamp, if canceled.
    pub fn canceled_at(&self) -> Option<DateTime<Utc>> {
        self.canceled_at
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true once `canceled_at` is stamped.
    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }

    /// Returns true when the slot start is not after `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date <= now
    }

    /// Latest instant at which the booking client may still cancel.
    pub fn cancelable_until(&self) -> DateTime<Utc> {
        self.date - cancellation_window()
    }

    /// Returns true while cancellation is still permitted at `now`.
    ///
    /// A canceled appointment is never cancelable again.
    pub fn is_cancelable(&self, now: DateTime<Utc>) -> bool {
        !self.is_canceled() && now < self.cancelable_until()
    }

    /// Stamp the cancellation timestamp, consuming the active appointment.
    pub fn mark_canceled(mut self, now: DateTime<Utc>) -> Self {
        self.canceled_at = Some(now);
        self
    }

    /// The slot grid label occupied by this appointment (HH:MM, UTC).
    pub fn slot_label(&self) -> String {
        slot_label(self.date)
    }
}

impl TryFrom<AppointmentDraft> for Appointment {
    type Error = SchedulingValidationError;

    fn try_from(value: AppointmentDraft) -> Result<Self, Self::Error> {
        if value.date != hour_start(value.date) {
            return Err(SchedulingValidationError::DateNotHourAligned { date: value.date });
        }
        if value.client_id == value.provider_id {
            return Err(SchedulingValidationError::SameParticipants);
        }

        Ok(Self {
            id: value.id,
            client_id: value.client_id,
            provider_id: value.provider_id,
            date: value.date,
            canceled_at: value.canceled_at,
            created_at: value.created_at,
        })
    }
}
