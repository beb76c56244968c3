//! Booking domain service.
//!
//! Implements the booking driving port: validates a request against the
//! provider, self-booking, past-date, and slot-conflict rules in that order,
//! persists the appointment, then notifies the provider. The notification is
//! a side effect of an already-committed booking, so its failure is logged
//! and never propagated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, BookAppointmentRequest,
    BookAppointmentResponse, BookingCommand, BookingDateFormatter, IdentityOracle,
    IdentityOracleError, NotificationRepository, ValidatedBooking,
};
use crate::domain::scheduling::{Appointment, AppointmentDraft, hour_start};
use crate::domain::{Error, Notification};

pub(crate) fn map_appointment_repository_error(error: AppointmentRepositoryError) -> Error {
    match error {
        AppointmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("appointment repository unavailable: {message}"))
        }
        AppointmentRepositoryError::Query { message } => {
            Error::internal(format!("appointment repository error: {message}"))
        }
        AppointmentRepositoryError::SlotTaken { .. } => {
            Error::slot_unavailable("appointment date is not available")
        }
    }
}

pub(crate) fn map_identity_error(error: IdentityOracleError) -> Error {
    match error {
        IdentityOracleError::Unavailable { message } => {
            Error::service_unavailable(format!("identity oracle unavailable: {message}"))
        }
        IdentityOracleError::Lookup { message } => {
            Error::internal(format!("identity lookup error: {message}"))
        }
    }
}

/// Booking service implementing the booking driving port.
#[derive(Clone)]
pub struct BookingService<A, N, I> {
    appointment_repo: Arc<A>,
    notification_repo: Arc<N>,
    identity: Arc<I>,
    formatter: Arc<dyn BookingDateFormatter>,
    clock: Arc<dyn Clock>,
}

impl<A, N, I> BookingService<A, N, I> {
    /// Create a new booking service with its collaborators.
    pub fn new(
        appointment_repo: Arc<A>,
        notification_repo: Arc<N>,
        identity: Arc<I>,
        formatter: Arc<dyn BookingDateFormatter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointment_repo,
            notification_repo,
            identity,
            formatter,
            clock,
        }
    }
}

impl<A, N, I> BookingService<A, N, I>
where
    A: AppointmentRepository,
    N: NotificationRepository,
    I: IdentityOracle,
{
    async fn notify_provider(&self, booking: &ValidatedBooking, appointment: &Appointment) {
        let client = match self.identity.get_user(&booking.client_id).await {
            Ok(Some(client)) => client,
            Ok(None) => {
                warn!(
                    client_id = %booking.client_id,
                    "booking client missing from identity oracle; notification skipped"
                );
                return;
            }
            Err(error) => {
                warn!(%error, "identity lookup failed after booking commit; notification skipped");
                return;
            }
        };

        let formatted = self.formatter.format_booking_time(appointment.date());
        let content = format!(
            "New booking from {} for {formatted}",
            client.display_name()
        );
        let notification = Notification::new(
            booking.provider_id.clone(),
            content,
            appointment.created_at(),
        );

        if let Err(error) = self.notification_repo.insert(&notification).await {
            warn!(%error, "provider notification insert failed after booking commit");
        }
    }
}

#[async_trait]
impl<A, N, I> BookingCommand for BookingService<A, N, I>
where
    A: AppointmentRepository,
    N: NotificationRepository,
    I: IdentityOracle,
{
    async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<BookAppointmentResponse, Error> {
        let booking = request.validate().map_err(|violations| {
            Error::invalid_request("booking request failed validation")
                .with_details(json!({ "violations": violations }))
        })?;

        let provider_ok = self
            .identity
            .is_provider(&booking.provider_id)
            .await
            .map_err(map_identity_error)?;
        if !provider_ok {
            return Err(Error::invalid_provider(
                "appointments can only be created with provider users",
            ));
        }

        if booking.provider_id == booking.client_id {
            return Err(Error::self_booking_not_allowed(
                "providers cannot book appointments with themselves",
            ));
        }

        let slot_start = hour_start(booking.date);
        let now = self.clock.utc();
        if slot_start <= now {
            return Err(Error::past_date_not_allowed("past dates are not permitted"));
        }

        let occupied = self
            .appointment_repo
            .find_active_for_slot(&booking.provider_id, slot_start)
            .await
            .map_err(map_appointment_repository_error)?;
        if occupied.is_some() {
            return Err(Error::slot_unavailable("appointment date is not available"));
        }

        let appointment = Appointment::new(AppointmentDraft {
            id: Uuid::new_v4(),
            client_id: booking.client_id.clone(),
            provider_id: booking.provider_id.clone(),
            date: slot_start,
            canceled_at: None,
            created_at: now,
        })
        .map_err(|err| Error::internal(format!("appointment failed validation: {err}")))?;

        // A concurrent booking may have won the slot between the check and
        // this insert; the store's uniqueness constraint is authoritative.
        self.appointment_repo
            .insert(&appointment)
            .await
            .map_err(map_appointment_repository_error)?;

        self.notify_provider(&booking, &appointment).await;

        Ok(BookAppointmentResponse {
            appointment: appointment.into(),
        })
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
