//! PostgreSQL-backed `NotificationRepository` implementation using Diesel ORM.
//!
//! The feed is append-only: inserts never update, and the only mutation is
//! the read transition, applied with a `RETURNING` clause so the updated
//! record comes back in one round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the notification repository port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to notification repository errors.
fn map_pool_error(error: PoolError) -> NotificationRepositoryError {
    map_basic_pool_error(error, |message| {
        NotificationRepositoryError::connection(message)
    })
}

/// Map Diesel errors to notification repository errors.
fn map_diesel_error(error: diesel::result::Error) -> NotificationRepositoryError {
    map_basic_diesel_error(
        error,
        NotificationRepositoryError::query,
        NotificationRepositoryError::connection,
    )
}

/// Convert a database row into a domain notification.
fn row_to_notification(row: NotificationRow) -> Notification {
    Notification::from_parts(
        row.id,
        UserId::from_uuid(row.provider_user_id),
        row.content,
        row.read,
        row.created_at,
    )
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewNotificationRow {
            id: notification.id(),
            provider_user_id: *notification.provider_user_id().as_uuid(),
            content: notification.content(),
            read: notification.is_read(),
            created_at: notification.created_at(),
        };

        diesel::insert_into(notifications::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_recent_for_provider(
        &self,
        provider_id: &UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::provider_user_id.eq(provider_id.as_uuid()))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .limit(limit)
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_notification).collect())
    }

    async fn mark_read(
        &self,
        notification_id: &Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(notifications::table.find(notification_id))
            .set(notifications::read.eq(true))
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_notification))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("pool exhausted"));

        assert!(matches!(
            repo_err,
            NotificationRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("pool exhausted"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(
            repo_err,
            NotificationRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn row_conversion_preserves_feed_fields() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            provider_user_id: Uuid::new_v4(),
            content: "New booking from Bob".to_owned(),
            read: true,
            created_at: Utc::now(),
        };
        let expected_id = row.id;

        let notification = row_to_notification(row);

        assert_eq!(notification.id(), expected_id);
        assert_eq!(notification.content(), "New booking from Bob");
        assert!(notification.is_read());
    }
}
