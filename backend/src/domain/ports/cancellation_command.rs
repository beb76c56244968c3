//! Driving port for the cancellation workflow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, UserId};

use super::{AppointmentPayload, AppointmentWithParticipants};

/// Request to cancel an appointment on behalf of its booking client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    /// Authenticated caller; must be the appointment's client.
    pub requester_id: UserId,
    pub appointment_id: Uuid,
}

/// Response carrying the canceled appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentResponse {
    pub appointment: AppointmentPayload,
}

/// Mail recipient fields for the cancellation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailContact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Job data handed to the mail worker after a cancellation commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationMailData {
    pub appointment: AppointmentPayload,
    pub provider: MailContact,
    pub client: MailContact,
}

impl From<AppointmentWithParticipants> for CancellationMailData {
    fn from(value: AppointmentWithParticipants) -> Self {
        Self {
            appointment: value.appointment.into(),
            provider: MailContact {
                name: value.provider_name.to_string(),
                email: Some(value.provider_email.to_string()),
            },
            client: MailContact {
                name: value.client_name.to_string(),
                email: None,
            },
        }
    }
}

/// Driving port for the cancellation operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CancellationCommand: Send + Sync {
    async fn cancel_appointment(
        &self,
        request: CancelAppointmentRequest,
    ) -> Result<CancelAppointmentResponse, Error>;
}
