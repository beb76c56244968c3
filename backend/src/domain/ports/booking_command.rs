//! Driving port for creating appointments.
//!
//! The request carries raw transport values (string ids, RFC 3339 date);
//! [`BookAppointmentRequest::validate`] turns them into typed values or a
//! structured violation list, keeping shape checking separate from the
//! booking rules.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Appointment, Error, UserId};

/// Serializable appointment payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub id: Uuid,
    pub client_id: UserId,
    pub provider_id: UserId,
    pub date: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentPayload {
    fn from(value: Appointment) -> Self {
        Self {
            id: value.id(),
            client_id: value.client_id().clone(),
            provider_id: value.provider_id().clone(),
            date: value.date(),
            canceled_at: value.canceled_at(),
            created_at: value.created_at(),
        }
    }
}

/// One failed field check from request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// Raw booking request as received from the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    /// Authenticated caller; the appointment's client.
    pub client_id: String,
    /// Targeted provider.
    pub provider_id: String,
    /// Requested instant, RFC 3339.
    pub date: String,
}

/// Typed values extracted from a request that passed shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub client_id: UserId,
    pub provider_id: UserId,
    pub date: DateTime<Utc>,
}

impl BookAppointmentRequest {
    /// Check the request shape, returning typed values or every violation.
    pub fn validate(&self) -> Result<ValidatedBooking, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let client_id = UserId::new(&self.client_id)
            .map_err(|err| violations.push(FieldViolation::new("clientId", err.to_string())))
            .ok();
        let provider_id = UserId::new(&self.provider_id)
            .map_err(|err| violations.push(FieldViolation::new("providerId", err.to_string())))
            .ok();
        let date = DateTime::parse_from_rfc3339(&self.date)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| {
                violations.push(FieldViolation::new(
                    "date",
                    "date must be a valid RFC 3339 instant",
                ));
            })
            .ok();

        match (client_id, provider_id, date) {
            (Some(client_id), Some(provider_id), Some(date)) => Ok(ValidatedBooking {
                client_id,
                provider_id,
                date,
            }),
            _ => Err(violations),
        }
    }
}

/// Response from creating an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentResponse {
    pub appointment: AppointmentPayload,
}

/// Driving port for the booking operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<BookAppointmentResponse, Error>;
}
