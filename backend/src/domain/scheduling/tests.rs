//! Tests for slot arithmetic, grid validation, and appointment invariants.

use chrono::{TimeDelta, TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

use crate::domain::UserId;

use super::*;

fn ten_am() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).single().expect("valid instant")
}

fn draft_at(date: chrono::DateTime<Utc>) -> AppointmentDraft {
    AppointmentDraft {
        id: Uuid::new_v4(),
        client_id: UserId::random(),
        provider_id: UserId::random(),
        date,
        canceled_at: None,
        created_at: date - TimeDelta::days(1),
    }
}

#[rstest]
fn hour_start_truncates_minutes_and_seconds() {
    let raw = ten_am() + TimeDelta::minutes(42) + TimeDelta::seconds(7);
    assert_eq!(hour_start(raw), ten_am());
}

#[rstest]
fn hour_start_is_idempotent() {
    assert_eq!(hour_start(ten_am()), ten_am());
}

#[rstest]
fn day_bounds_cover_the_whole_day() {
    let (start, end) = day_bounds(ten_am());

    assert_eq!(
        start,
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).single().expect("valid instant")
    );
    assert!(end > Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).single().expect("valid instant"));
    assert!(end < Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).single().expect("valid instant"));
}

#[rstest]
#[case("08:00", 8, 0)]
#[case("19:30", 19, 30)]
#[case("00:00", 0, 0)]
fn slot_label_parses_valid_input(#[case] raw: &str, #[case] hour: u32, #[case] minute: u32) {
    let label = SlotLabel::parse(raw).expect("valid label");
    assert_eq!(label, SlotLabel::new(hour, minute).expect("valid label"));
    assert_eq!(label.to_string(), raw);
}

#[rstest]
#[case("24:00")]
#[case("08:60")]
#[case("8am")]
#[case("08")]
#[case("08:0")]
#[case("")]
fn slot_label_rejects_invalid_input(#[case] raw: &str) {
    assert!(matches!(
        SlotLabel::parse(raw),
        Err(SchedulingValidationError::InvalidSlotLabel { .. })
    ));
}

#[rstest]
fn slot_label_combine_uses_day_date_and_zeroes_seconds() {
    let label = SlotLabel::parse("13:30").expect("valid label");
    let midday_with_noise = ten_am() + TimeDelta::minutes(17) + TimeDelta::seconds(3);

    let combined = label.combine(midday_with_noise);

    assert_eq!(
        combined,
        Utc.with_ymd_and_hms(2024, 1, 10, 13, 30, 0).single().expect("valid instant")
    );
}

#[rstest]
fn default_grid_runs_hourly_from_eight_to_nineteen() {
    let grid = ScheduleTemplate::default_grid();
    let labels: Vec<String> = grid.labels().iter().map(ToString::to_string).collect();

    assert_eq!(labels.first().map(String::as_str), Some("08:00"));
    assert_eq!(labels.last().map(String::as_str), Some("19:00"));
    assert_eq!(labels.len(), 12);
}

#[rstest]
fn schedule_template_rejects_duplicates() {
    let labels = vec![
        SlotLabel::parse("08:00").expect("valid label"),
        SlotLabel::parse("08:00").expect("valid label"),
    ];

    assert!(matches!(
        ScheduleTemplate::new(labels),
        Err(SchedulingValidationError::DuplicateSlotLabel { .. })
    ));
}

#[rstest]
fn schedule_template_rejects_empty_grid() {
    assert!(matches!(
        ScheduleTemplate::new(Vec::new()),
        Err(SchedulingValidationError::EmptySchedule)
    ));
}

#[rstest]
fn appointment_rejects_unaligned_date() {
    let result = Appointment::new(draft_at(ten_am() + TimeDelta::minutes(30)));

    assert!(matches!(
        result,
        Err(SchedulingValidationError::DateNotHourAligned { .. })
    ));
}

#[rstest]
fn appointment_rejects_self_booking() {
    let mut draft = draft_at(ten_am());
    draft.provider_id = draft.client_id.clone();

    assert!(matches!(
        Appointment::new(draft),
        Err(SchedulingValidationError::SameParticipants)
    ));
}

#[rstest]
fn cancelable_until_is_two_hours_before_start() {
    let appointment = Appointment::new(draft_at(ten_am())).expect("valid appointment");
    assert_eq!(
        appointment.cancelable_until(),
        ten_am() - TimeDelta::hours(2)
    );
}

#[rstest]
fn cancelable_boundary_is_strict() {
    let appointment = Appointment::new(draft_at(ten_am())).expect("valid appointment");
    let cutoff = appointment.cancelable_until();

    assert!(appointment.is_cancelable(cutoff - TimeDelta::seconds(1)));
    assert!(!appointment.is_cancelable(cutoff));
    assert!(!appointment.is_cancelable(cutoff + TimeDelta::seconds(1)));
}

#[rstest]
fn canceled_appointment_is_not_cancelable() {
    let now = ten_am() - TimeDelta::hours(5);
    let appointment = Appointment::new(draft_at(ten_am()))
        .expect("valid appointment")
        .mark_canceled(now);

    assert!(appointment.is_canceled());
    assert_eq!(appointment.canceled_at(), Some(now));
    assert!(!appointment.is_cancelable(now));
}

#[rstest]
fn past_predicate_includes_the_exact_start() {
    let appointment = Appointment::new(draft_at(ten_am())).expect("valid appointment");

    assert!(appointment.is_past(ten_am()));
    assert!(appointment.is_past(ten_am() + TimeDelta::seconds(1)));
    assert!(!appointment.is_past(ten_am() - TimeDelta::seconds(1)));
}

#[rstest]
fn slot_label_of_appointment_matches_grid_format() {
    let appointment = Appointment::new(draft_at(ten_am())).expect("valid appointment");
    assert_eq!(appointment.slot_label(), "10:00");
}

#[rstest]
fn slot_serializes_with_display_instant() {
    let label = SlotLabel::parse("10:00").expect("valid label");
    let slot = Slot::new(label, ten_am(), true);

    assert_eq!(slot.time, "10:00");
    assert_eq!(slot.instant, "2024-01-10T10:00:00+00:00");
    assert!(slot.available);
}
