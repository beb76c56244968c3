//! Slot grid primitives and hour arithmetic.
//!
//! A provider's day is a fixed grid of candidate hours. The grid itself is
//! configuration data ([`ScheduleTemplate`]); everything derived from it
//! (candidate instants, availability flags) is computed per request and never
//! persisted.

use std::fmt;

use chrono::{DateTime, DurationRound, NaiveTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::SchedulingValidationError;

/// First hour of the default daily grid.
pub const DEFAULT_FIRST_HOUR: u32 = 8;
/// Last hour of the default daily grid (inclusive).
pub const DEFAULT_LAST_HOUR: u32 = 19;

/// Truncate an instant to the start of its hour.
///
/// This is the slot-exclusivity key: two booking requests collide exactly
/// when their hour starts are equal.
///
/// # Examples
/// ```
/// use backend::domain::scheduling::hour_start;
/// use chrono::{TimeZone, Utc};
///
/// let raw = Utc.with_ymd_and_hms(2024, 1, 10, 10, 42, 7).unwrap();
/// let start = hour_start(raw);
/// assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap());
/// ```
pub fn hour_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.duration_trunc(TimeDelta::hours(1)).unwrap_or(instant)
}

/// Inclusive bounds of the calendar day containing `day`.
///
/// The end bound is the last representable instant before the next midnight,
/// so a between-style range query covers the whole day.
pub fn day_bounds(day: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + TimeDelta::days(1) - TimeDelta::nanoseconds(1);
    (start, end)
}

/// Format an instant as its grid label (HH:MM, UTC).
pub fn slot_label(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}

/// One entry of the daily schedule grid, e.g. `09:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotLabel {
    hour: u32,
    minute: u32,
}

impl SlotLabel {
    /// Validate and construct a label from hour/minute components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, SchedulingValidationError> {
        if hour > 23 || minute > 59 {
            return Err(SchedulingValidationError::InvalidSlotLabel {
                label: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Parse a label from its `HH:MM` text form.
    pub fn parse(label: &str) -> Result<Self, SchedulingValidationError> {
        let invalid = || SchedulingValidationError::InvalidSlotLabel {
            label: label.to_owned(),
        };

        let mut parts = label.splitn(2, ':');
        let hour = parts
            .next()
            .and_then(|part| part.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let minute = parts
            .next()
            .filter(|part| part.len() == 2)
            .and_then(|part| part.parse::<u32>().ok())
            .ok_or_else(invalid)?;

        Self::new(hour, minute).map_err(|_| invalid())
    }

    /// Combine this label with the date portion of `day`, seconds zeroed.
    pub fn combine(&self, day: DateTime<Utc>) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        day.date_naive().and_time(time).and_utc()
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<SlotLabel> for String {
    fn from(value: SlotLabel) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SlotLabel {
    type Error = SchedulingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Ordered, duplicate-free list of slot labels making up a provider's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleTemplate(Vec<SlotLabel>);

impl ScheduleTemplate {
    /// Validate and construct a template from labels, preserving order.
    pub fn new(labels: Vec<SlotLabel>) -> Result<Self, SchedulingValidationError> {
        if labels.is_empty() {
            return Err(SchedulingValidationError::EmptySchedule);
        }

        let mut seen = std::collections::HashSet::new();
        for label in &labels {
            if !seen.insert(*label) {
                return Err(SchedulingValidationError::DuplicateSlotLabel {
                    label: label.to_string(),
                });
            }
        }

        Ok(Self(labels))
    }

    /// Parse a template from `HH:MM` strings.
    pub fn parse(labels: &[String]) -> Result<Self, SchedulingValidationError> {
        let parsed = labels
            .iter()
            .map(|label| SlotLabel::parse(label))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// The default hourly grid, 08:00 through 19:00.
    pub fn default_grid() -> Self {
        let labels = (DEFAULT_FIRST_HOUR..=DEFAULT_LAST_HOUR)
            .filter_map(|hour| SlotLabel::new(hour, 0).ok())
            .collect();
        Self(labels)
    }

    /// Labels in grid order.
    pub fn labels(&self) -> &[SlotLabel] {
        self.0.as_slice()
    }
}

/// One availability answer for a grid slot. Derived per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Grid label, e.g. `09:00`.
    pub time: String,
    /// Candidate instant as an ISO-8601 string with offset, for display.
    pub instant: String,
    /// Whether the slot can still be booked.
    pub available: bool,
}

impl Slot {
    /// Build a slot answer for a candidate instant.
    pub fn new(label: SlotLabel, instant: DateTime<Utc>, available: bool) -> Self {
        Self {
            time: label.to_string(),
            instant: instant.to_rfc3339_opts(SecondsFormat::Secs, false),
            available,
        }
    }
}
