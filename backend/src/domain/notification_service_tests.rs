//! Tests for the notification feed service.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockIdentityOracle, MockNotificationRepository};
use crate::domain::{ErrorCode, Notification, UserId};

fn feed_entry(provider_id: &UserId, minutes_ago: i64) -> Notification {
    Notification::new(
        provider_id.clone(),
        format!("entry from {minutes_ago} minutes ago"),
        Utc::now() - TimeDelta::minutes(minutes_ago),
    )
}

fn service_with(
    repo: MockNotificationRepository,
    identity: MockIdentityOracle,
) -> NotificationService<MockNotificationRepository, MockIdentityOracle> {
    NotificationService::new(Arc::new(repo), Arc::new(identity))
}

#[tokio::test]
async fn listing_requires_a_provider_caller() {
    let mut identity = MockIdentityOracle::new();
    identity
        .expect_is_provider()
        .times(1)
        .return_once(|_| Ok(false));
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_recent_for_provider().times(0);

    let error = service_with(repo, identity)
        .list_notifications(ListNotificationsRequest {
            provider_id: UserId::random(),
            limit: None,
        })
        .await
        .expect_err("caller is not a provider");

    assert_eq!(error.code(), ErrorCode::NotAuthorized);
}

#[tokio::test]
async fn listing_uses_the_default_cap() {
    let provider_id = UserId::random();
    let entries = vec![feed_entry(&provider_id, 1), feed_entry(&provider_id, 2)];

    let mut identity = MockIdentityOracle::new();
    identity
        .expect_is_provider()
        .times(1)
        .return_once(|_| Ok(true));
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_recent_for_provider()
        .withf(|_, limit| *limit == DEFAULT_FEED_LIMIT)
        .times(1)
        .return_once(move |_, _| Ok(entries));

    let response = service_with(repo, identity)
        .list_notifications(ListNotificationsRequest {
            provider_id,
            limit: None,
        })
        .await
        .expect("listing succeeds");

    assert_eq!(response.notifications.len(), 2);
}

#[tokio::test]
async fn listing_honours_an_explicit_cap() {
    let provider_id = UserId::random();

    let mut identity = MockIdentityOracle::new();
    identity
        .expect_is_provider()
        .times(1)
        .return_once(|_| Ok(true));
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_recent_for_provider()
        .withf(|_, limit| *limit == 5)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    service_with(repo, identity)
        .list_notifications(ListNotificationsRequest {
            provider_id,
            limit: Some(5),
        })
        .await
        .expect("listing succeeds");
}

#[tokio::test]
async fn mark_read_returns_the_updated_record() {
    let provider_id = UserId::random();
    let entry = feed_entry(&provider_id, 1);
    let entry_id = entry.id();

    let identity = MockIdentityOracle::new();
    let mut repo = MockNotificationRepository::new();
    repo.expect_mark_read()
        .times(1)
        .return_once(move |_| Ok(Some(entry.mark_read())));

    let response = service_with(repo, identity)
        .mark_read(MarkNotificationReadRequest {
            notification_id: entry_id,
        })
        .await
        .expect("mark read succeeds");

    assert!(response.notification.read);
    assert_eq!(response.notification.id, entry_id);
}

#[tokio::test]
async fn mark_read_of_unknown_id_is_not_found() {
    let identity = MockIdentityOracle::new();
    let mut repo = MockNotificationRepository::new();
    repo.expect_mark_read().times(1).return_once(|_| Ok(None));

    let error = service_with(repo, identity)
        .mark_read(MarkNotificationReadRequest {
            notification_id: Uuid::new_v4(),
        })
        .await
        .expect_err("unknown notification");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
