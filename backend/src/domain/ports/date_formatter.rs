//! Port for locale-aware display formatting of booking times.
//!
//! Notification copy embeds a human-readable rendering of the slot start.
//! Locale and pattern live in the adapter so the services stay
//! locale-agnostic and testable with fixed clocks.

use chrono::{DateTime, Utc};

/// Port turning a slot instant into display copy.
#[cfg_attr(test, mockall::automock)]
pub trait BookingDateFormatter: Send + Sync {
    /// Render the slot start for notification copy.
    fn format_booking_time(&self, instant: DateTime<Utc>) -> String;
}

/// Fixture formatter that renders the RFC 3339 form.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDateFormatter;

impl BookingDateFormatter for FixtureDateFormatter {
    fn format_booking_time(&self, instant: DateTime<Utc>) -> String {
        instant.to_rfc3339()
    }
}
