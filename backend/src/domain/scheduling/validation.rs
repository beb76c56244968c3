//! Validation errors for scheduling entities and the slot grid.

use std::fmt;

use chrono::{DateTime, Utc};

/// Validation errors returned by scheduling constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingValidationError {
    /// The appointment date is not aligned to the start of an hour.
    DateNotHourAligned { date: DateTime<Utc> },
    /// Client and provider must be different users.
    SameParticipants,
    /// A slot label was not a valid `HH:MM` value.
    InvalidSlotLabel { label: String },
    /// The schedule grid listed the same label twice.
    DuplicateSlotLabel { label: String },
    /// The schedule grid must contain at least one label.
    EmptySchedule,
}

impl fmt::Display for SchedulingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateNotHourAligned { date } => {
                write!(f, "appointment date {date} must start on the hour")
            }
            Self::SameParticipants => {
                write!(f, "client and provider must be different users")
            }
            Self::InvalidSlotLabel { label } => {
                write!(f, "slot label '{label}' must be HH:MM")
            }
            Self::DuplicateSlotLabel { label } => {
                write!(f, "slot label '{label}' appears more than once")
            }
            Self::EmptySchedule => {
                write!(f, "schedule grid must contain at least one slot label")
            }
        }
    }
}

impl std::error::Error for SchedulingValidationError {}
