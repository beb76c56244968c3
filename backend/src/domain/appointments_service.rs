//! Client appointment listing service.
//!
//! Implements the listing driving port: one page of the caller's
//! non-canceled bookings, date ascending, each joined with the provider's
//! display fields and annotated with the `past`/`cancelable` flags derived
//! against a single "now" sample.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::booking_service::map_appointment_repository_error;
use crate::domain::ports::{
    APPOINTMENTS_PAGE_SIZE, AppointmentRepository, AppointmentSummary, AppointmentsQuery,
    ListAppointmentsRequest, ListAppointmentsResponse, ProviderSummaryPayload,
};

/// Appointment listing service implementing the listing driving port.
#[derive(Clone)]
pub struct AppointmentsQueryService<A> {
    appointment_repo: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<A> AppointmentsQueryService<A> {
    /// Create a new listing service with its collaborators.
    pub fn new(appointment_repo: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            appointment_repo,
            clock,
        }
    }
}

#[async_trait]
impl<A> AppointmentsQuery for AppointmentsQueryService<A>
where
    A: AppointmentRepository,
{
    async fn list_appointments(
        &self,
        request: ListAppointmentsRequest,
    ) -> Result<ListAppointmentsResponse, Error> {
        let page = i64::from(request.page.max(1));
        let offset = (page - 1) * APPOINTMENTS_PAGE_SIZE;

        let rows = self
            .appointment_repo
            .list_active_page_for_client(&request.client_id, offset, APPOINTMENTS_PAGE_SIZE)
            .await
            .map_err(map_appointment_repository_error)?;

        let now = self.clock.utc();
        let appointments = rows
            .into_iter()
            .map(|row| AppointmentSummary {
                id: row.appointment.id(),
                date: row.appointment.date(),
                past: row.appointment.is_past(now),
                cancelable: row.appointment.is_cancelable(now),
                provider: ProviderSummaryPayload {
                    id: row.provider.id,
                    name: row.provider.name.to_string(),
                    avatar_url: row.provider.avatar_url,
                },
            })
            .collect();

        Ok(ListAppointmentsResponse { appointments })
    }
}

#[cfg(test)]
#[path = "appointments_service_tests.rs"]
mod tests;
