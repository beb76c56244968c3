//! Domain ports and supporting types for the hexagonal boundary.

mod appointment_repository;
mod appointments_query;
mod availability_query;
mod booking_command;
mod cancellation_command;
mod date_formatter;
mod identity_oracle;
mod job_queue;
mod notification_command;
mod notification_query;
mod notification_repository;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{
    AppointmentRepository, AppointmentRepositoryError, AppointmentWithParticipants,
    AppointmentWithProvider, FixtureAppointmentRepository, ProviderSummary,
};
#[cfg(test)]
pub use appointments_query::MockAppointmentsQuery;
pub use appointments_query::{
    APPOINTMENTS_PAGE_SIZE, AppointmentSummary, AppointmentsQuery, ListAppointmentsRequest,
    ListAppointmentsResponse, ProviderSummaryPayload,
};
#[cfg(test)]
pub use availability_query::MockAvailabilityQuery;
pub use availability_query::{AvailabilityQuery, DayAvailabilityRequest, DayAvailabilityResponse};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{
    AppointmentPayload, BookAppointmentRequest, BookAppointmentResponse, BookingCommand,
    FieldViolation, ValidatedBooking,
};
#[cfg(test)]
pub use cancellation_command::MockCancellationCommand;
pub use cancellation_command::{
    CancelAppointmentRequest, CancelAppointmentResponse, CancellationCommand,
    CancellationMailData, MailContact,
};
#[cfg(test)]
pub use date_formatter::MockBookingDateFormatter;
pub use date_formatter::{BookingDateFormatter, FixtureDateFormatter};
#[cfg(test)]
pub use identity_oracle::MockIdentityOracle;
pub use identity_oracle::{FixtureIdentityOracle, IdentityOracle, IdentityOracleError};
#[cfg(test)]
pub use job_queue::MockJobQueue;
pub use job_queue::{CANCELLATION_MAIL_JOB, JobDispatchError, JobQueue, QueuedJob};
#[cfg(test)]
pub use notification_command::MockNotificationCommand;
pub use notification_command::{
    MarkNotificationReadRequest, MarkNotificationReadResponse, NotificationCommand,
};
#[cfg(test)]
pub use notification_query::MockNotificationQuery;
pub use notification_query::{
    ListNotificationsRequest, ListNotificationsResponse, NotificationPayload, NotificationQuery,
};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{
    FixtureNotificationRepository, NotificationRepository, NotificationRepositoryError,
};
