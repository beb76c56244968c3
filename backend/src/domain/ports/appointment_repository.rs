//! Port for appointment persistence.
//!
//! The store is the single source of truth for slot exclusivity: `insert`
//! must surface a dedicated conflict error when another non-canceled
//! appointment already holds the `(provider, date)` slot, so a losing
//! concurrent booking fails instead of double-booking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Appointment, DisplayName, EmailAddress, UserId};

/// Persistence errors raised by appointment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentRepositoryError {
    /// Repository connection could not be established.
    #[error("appointment repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("appointment repository query failed: {message}")]
    Query { message: String },

    /// Another non-canceled appointment already occupies the slot.
    #[error("slot {date} is already booked for provider {provider_id}")]
    SlotTaken {
        provider_id: String,
        date: DateTime<Utc>,
    },
}

impl AppointmentRepositoryError {
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

    /// Create a slot-conflict error for the given slot key.
    pub fn slot_taken(provider_id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::SlotTaken {
            provider_id: provider_id.into(),
            date,
        }
    }
}

/// Provider display fields needed by appointment listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSummary {
    pub id: UserId,
    pub name: DisplayName,
    pub avatar_url: Option<String>,
}

/// An appointment joined with the provider's display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentWithProvider {
    pub appointment: Appointment,
    pub provider: ProviderSummary,
}

/// An appointment joined with both participants' display fields, as needed
/// by the cancellation mail payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentWithParticipants {
    pub appointment: Appointment,
    pub provider_name: DisplayName,
    pub provider_email: EmailAddress,
    pub client_name: DisplayName,
}

/// Port for appointment writes and the read shapes the services need.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persist a new appointment, enforcing slot exclusivity.
    async fn insert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError>;

    /// Load an appointment together with participant display fields.
    async fn find_by_id_with_participants(
        &self,
        appointment_id: &Uuid,
    ) -> Result<Option<AppointmentWithParticipants>, AppointmentRepositoryError>;

    /// Find the non-canceled appointment occupying a provider's slot.
    async fn find_active_for_slot(
        &self,
        provider_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// List a provider's non-canceled appointments within an inclusive range.
    async fn list_active_for_provider_between(
        &self,
        provider_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// List a page of a client's non-canceled appointments, date ascending,
    /// joined with provider display fields.
    async fn list_active_page_for_client(
        &self,
        client_id: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AppointmentWithProvider>, AppointmentRepositoryError>;

    /// Persist the cancellation stamp of an already-loaded appointment.
    async fn record_cancellation(
        &self,
        appointment: &Appointment,
    ) -> Result<(), AppointmentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise appointments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAppointmentRepository;

#[async_trait]
impl AppointmentRepository for FixtureAppointmentRepository {
    async fn insert(&self, _appointment: &Appointment) -> Result<(), AppointmentRepositoryError> {
        Ok(())
    }

    async fn find_by_id_with_participants(
        &self,
        _appointment_id: &Uuid,
    ) -> Result<Option<AppointmentWithParticipants>, AppointmentRepositoryError> {
        Ok(None)
    }

    async fn find_active_for_slot(
        &self,
        _provider_id: &UserId,
        _date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        Ok(None)
    }

    async fn list_active_for_provider_between(
        &self,
        _provider_id: &UserId,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_active_page_for_client(
        &self,
        _client_id: &UserId,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<AppointmentWithProvider>, AppointmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn record_cancellation(
        &self,
        _appointment: &Appointment,
    ) -> Result<(), AppointmentRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_slot_lookup_returns_none() {
        let repo = FixtureAppointmentRepository;
        let found = repo
            .find_active_for_slot(&UserId::random(), Utc::now())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    fn slot_taken_error_formats_slot_key() {
        let provider = UserId::random();
        let date = Utc::now();
        let err = AppointmentRepositoryError::slot_taken(provider.as_ref(), date);

        let msg = err.to_string();
        assert!(msg.contains(provider.as_ref()));
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = AppointmentRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
