//! Availability domain service.
//!
//! Projects the configured slot grid onto one provider-day: every grid label
//! becomes a candidate instant, and a slot stays available only while its
//! instant is strictly in the future and no non-canceled appointment holds
//! its label.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::booking_service::map_appointment_repository_error;
use crate::domain::ports::{
    AppointmentRepository, AvailabilityQuery, DayAvailabilityRequest, DayAvailabilityResponse,
};
use crate::domain::scheduling::{ScheduleTemplate, Slot, day_bounds};

/// Availability service implementing the availability driving port.
#[derive(Clone)]
pub struct AvailabilityService<A> {
    appointment_repo: Arc<A>,
    clock: Arc<dyn Clock>,
    template: ScheduleTemplate,
}

impl<A> AvailabilityService<A> {
    /// Create a new availability service over a slot grid.
    pub fn new(appointment_repo: Arc<A>, clock: Arc<dyn Clock>, template: ScheduleTemplate) -> Self {
        Self {
            appointment_repo,
            clock,
            template,
        }
    }
}

#[async_trait]
impl<A> AvailabilityQuery for AvailabilityService<A>
where
    A: AppointmentRepository,
{
    async fn day_availability(
        &self,
        request: DayAvailabilityRequest,
    ) -> Result<DayAvailabilityResponse, Error> {
        let now = self.clock.utc();
        let (start, end) = day_bounds(request.day);

        let appointments = self
            .appointment_repo
            .list_active_for_provider_between(&request.provider_id, start, end)
            .await
            .map_err(map_appointment_repository_error)?;

        // Booked-ness compares grid labels rather than instants, so an
        // appointment stored with sub-hour noise still blocks its slot. The
        // day-range query keeps candidates and appointments on the same day.
        let slots = self
            .template
            .labels()
            .iter()
            .map(|label| {
                let candidate = label.combine(request.day);
                let booked = appointments
                    .iter()
                    .any(|appointment| appointment.slot_label() == label.to_string());
                let available = candidate > now && !booked;
                Slot::new(*label, candidate, available)
            })
            .collect();

        Ok(DayAvailabilityResponse { slots })
    }
}

#[cfg(test)]
#[path = "availability_service_tests.rs"]
mod tests;
