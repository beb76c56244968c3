//! Domain primitives, ports, and services of the scheduling core.
//!
//! Purpose: strongly typed scheduling entities with their invariants, the
//! hexagonal port traits, and the stateless services that implement the
//! driving ports. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`]/[`ErrorCode`] — transport-agnostic failure taxonomy.
//! - [`User`], [`UserId`] — identity records supplied by the oracle.
//! - [`scheduling`] — appointment entity, slot grid, hour arithmetic.
//! - [`Notification`] — provider feed entry.
//! - [`ports`] — outbound and driving port traits with payload types.
//! - The `*Service` structs — driving-port implementations.

pub mod error;
pub mod notification;
pub mod ports;
pub mod scheduling;
pub mod user;

mod appointments_service;
mod availability_service;
mod booking_service;
mod cancellation_service;
mod notification_service;

pub use self::appointments_service::AppointmentsQueryService;
pub use self::availability_service::AvailabilityService;
pub use self::booking_service::BookingService;
pub use self::cancellation_service::CancellationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::Notification;
pub use self::notification_service::{DEFAULT_FEED_LIMIT, NotificationService};
pub use self::scheduling::{
    Appointment, AppointmentDraft, CANCELLATION_LEAD_HOURS, ScheduleTemplate,
    SchedulingValidationError, Slot, SlotLabel, cancellation_window, day_bounds, hour_start,
    slot_label,
};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EmailAddress, User, UserId, UserValidationError,
};
