//! Locale-aware rendering of booking times.
//!
//! Notification copy embeds a human-readable slot start. The pattern and
//! locale live here, behind the formatter port, so the booking service stays
//! locale-agnostic.

use chrono::{DateTime, Locale, Utc};

use crate::domain::ports::BookingDateFormatter;

/// Brazilian Portuguese rendering of a slot start, e.g.
/// `dia 10 de janeiro, às 10:00h`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PtBrDateFormatter;

impl PtBrDateFormatter {
    /// Create a new pt-BR formatter.
    pub fn new() -> Self {
        Self
    }
}

impl BookingDateFormatter for PtBrDateFormatter {
    fn format_booking_time(&self, instant: DateTime<Utc>) -> String {
        instant
            .format_localized("dia %d de %B, às %-H:%Mh", Locale::pt_BR)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pt-BR pattern.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2024, 1, 10, 10, "dia 10 de janeiro, às 10:00h")]
    #[case(2024, 9, 1, 8, "dia 01 de setembro, às 8:00h")]
    fn renders_booking_times_in_pt_br(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] expected: &str,
    ) {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid instant");

        assert_eq!(PtBrDateFormatter::new().format_booking_time(instant), expected);
    }
}
