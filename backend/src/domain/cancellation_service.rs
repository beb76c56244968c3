//! Cancellation domain service.
//!
//! Implements the cancellation driving port: only the booking client may
//! cancel, and only while "now" is still before the two-hour cutoff. The
//! cancellation mail job is submitted after the cancellation commits;
//! a queue failure is logged and swallowed because the committed record is
//! the source of truth.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::warn;

use crate::domain::Error;
use crate::domain::booking_service::map_appointment_repository_error;
use crate::domain::ports::{
    AppointmentRepository, CANCELLATION_MAIL_JOB, CancelAppointmentRequest,
    CancelAppointmentResponse, CancellationCommand, CancellationMailData, JobQueue, QueuedJob,
};
use crate::domain::scheduling::CANCELLATION_LEAD_HOURS;

/// Cancellation service implementing the cancellation driving port.
#[derive(Clone)]
pub struct CancellationService<A, Q> {
    appointment_repo: Arc<A>,
    job_queue: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<A, Q> CancellationService<A, Q> {
    /// Create a new cancellation service with its collaborators.
    pub fn new(appointment_repo: Arc<A>, job_queue: Arc<Q>, clock: Arc<dyn Clock>) -> Self {
        Self {
            appointment_repo,
            job_queue,
            clock,
        }
    }
}

impl<A, Q> CancellationService<A, Q>
where
    Q: JobQueue,
{
    async fn submit_cancellation_mail(&self, mail: CancellationMailData) {
        let data = match serde_json::to_value(&mail) {
            Ok(data) => data,
            Err(error) => {
                warn!(%error, "cancellation mail payload failed to serialize; job skipped");
                return;
            }
        };

        let job = QueuedJob::new(CANCELLATION_MAIL_JOB, data);
        if let Err(error) = self.job_queue.submit(&job).await {
            warn!(
                %error,
                appointment_id = %mail.appointment.id,
                "cancellation mail submission failed; cancellation already committed"
            );
        }
    }
}

#[async_trait]
impl<A, Q> CancellationCommand for CancellationService<A, Q>
where
    A: AppointmentRepository,
    Q: JobQueue,
{
    async fn cancel_appointment(
        &self,
        request: CancelAppointmentRequest,
    ) -> Result<CancelAppointmentResponse, Error> {
        let mut record = self
            .appointment_repo
            .find_by_id_with_participants(&request.appointment_id)
            .await
            .map_err(map_appointment_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("appointment {} not found", request.appointment_id))
            })?;

        if record.appointment.client_id() != &request.requester_id {
            return Err(Error::not_authorized(
                "only the booking client may cancel this appointment",
            ));
        }

        // A second cancel of the same appointment is a no-op: the original
        // stamp stays authoritative and no second mail is submitted.
        if record.appointment.is_canceled() {
            return Ok(CancelAppointmentResponse {
                appointment: record.appointment.into(),
            });
        }

        let now = self.clock.utc();
        if !record.appointment.is_cancelable(now) {
            return Err(Error::cancellation_window_expired(format!(
                "appointments can only be canceled up to {CANCELLATION_LEAD_HOURS} hours before their start"
            )));
        }

        let canceled = record.appointment.mark_canceled(now);
        self.appointment_repo
            .record_cancellation(&canceled)
            .await
            .map_err(map_appointment_repository_error)?;

        record.appointment = canceled.clone();
        self.submit_cancellation_mail(record.into()).await;

        Ok(CancelAppointmentResponse {
            appointment: canceled.into(),
        })
    }
}

#[cfg(test)]
#[path = "cancellation_service_tests.rs"]
mod tests;
