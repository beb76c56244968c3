//! Tests for the client appointment listing service.

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{AppointmentWithProvider, MockAppointmentRepository, ProviderSummary};
use crate::domain::scheduling::{Appointment, AppointmentDraft};
use crate::domain::{DisplayName, UserId};
use crate::test_support::clock::ManualClock;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn row_starting_in(hours: i64, client_id: &UserId) -> AppointmentWithProvider {
    let provider_id = UserId::random();
    let appointment = Appointment::new(AppointmentDraft {
        id: Uuid::new_v4(),
        client_id: client_id.clone(),
        provider_id: provider_id.clone(),
        date: now() + TimeDelta::hours(hours),
        canceled_at: None,
        created_at: now() - TimeDelta::days(1),
    })
    .expect("valid appointment");

    AppointmentWithProvider {
        appointment,
        provider: ProviderSummary {
            id: provider_id,
            name: DisplayName::new("Alice Provider").expect("valid name"),
            avatar_url: Some("https://cdn.example.com/alice.png".to_owned()),
        },
    }
}

fn service_with(repo: MockAppointmentRepository) -> AppointmentsQueryService<MockAppointmentRepository> {
    AppointmentsQueryService::new(Arc::new(repo), Arc::new(ManualClock::new(now())))
}

#[tokio::test]
async fn listing_derives_past_and_cancelable_flags() {
    let client_id = UserId::random();
    let rows = vec![
        row_starting_in(-2, &client_id),
        row_starting_in(1, &client_id),
        row_starting_in(5, &client_id),
    ];

    let mut repo = MockAppointmentRepository::new();
    repo.expect_list_active_page_for_client()
        .times(1)
        .return_once(move |_, _, _| Ok(rows));

    let response = service_with(repo)
        .list_appointments(ListAppointmentsRequest { client_id, page: 1 })
        .await
        .expect("listing succeeds");

    let flags: Vec<(bool, bool)> = response
        .appointments
        .iter()
        .map(|summary| (summary.past, summary.cancelable))
        .collect();
    // Started two hours ago; starts too soon to cancel; comfortably cancelable.
    assert_eq!(flags, vec![(true, false), (false, false), (false, true)]);
    assert!(
        response
            .appointments
            .iter()
            .all(|summary| summary.provider.name == "Alice Provider")
    );
}

#[tokio::test]
async fn page_numbers_translate_to_fixed_size_offsets() {
    let client_id = UserId::random();
    let mut repo = MockAppointmentRepository::new();
    repo.expect_list_active_page_for_client()
        .withf(|_, offset, limit| *offset == 40 && *limit == APPOINTMENTS_PAGE_SIZE)
        .times(1)
        .return_once(|_, _, _| Ok(Vec::new()));

    service_with(repo)
        .list_appointments(ListAppointmentsRequest { client_id, page: 3 })
        .await
        .expect("listing succeeds");
}

#[tokio::test]
async fn page_zero_is_clamped_to_the_first_page() {
    let client_id = UserId::random();
    let mut repo = MockAppointmentRepository::new();
    repo.expect_list_active_page_for_client()
        .withf(|_, offset, _| *offset == 0)
        .times(1)
        .return_once(|_, _, _| Ok(Vec::new()));

    service_with(repo)
        .list_appointments(ListAppointmentsRequest { client_id, page: 0 })
        .await
        .expect("listing succeeds");
}
