//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.
//!
//! This adapter persists appointments and loads the joined read shapes the
//! services need, rebuilding domain entities through validated constructors.
//! The insert path translates the partial unique index on
//! `(provider_id, date) WHERE canceled_at IS NULL` into the port's
//! `SlotTaken` variant, so a losing concurrent booking surfaces as a slot
//! conflict instead of a double-booking.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, AppointmentWithParticipants,
    AppointmentWithProvider, ProviderSummary,
};
use crate::domain::{Appointment, AppointmentDraft, DisplayName, EmailAddress, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{AppointmentRow, NewAppointmentRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{appointments, users};

/// Diesel-backed implementation of the appointment repository port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to appointment repository errors.
fn map_pool_error(error: PoolError) -> AppointmentRepositoryError {
    map_basic_pool_error(error, |message| {
        AppointmentRepositoryError::connection(message)
    })
}

/// Map Diesel errors to appointment repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AppointmentRepositoryError {
    map_basic_diesel_error(
        error,
        AppointmentRepositoryError::query,
        AppointmentRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain appointment.
fn row_to_appointment(row: AppointmentRow) -> Result<Appointment, AppointmentRepositoryError> {
    Appointment::new(AppointmentDraft {
        id: row.id,
        client_id: UserId::from_uuid(row.client_id),
        provider_id: UserId::from_uuid(row.provider_id),
        date: row.date,
        canceled_at: row.canceled_at,
        created_at: row.created_at,
    })
    .map_err(|err| AppointmentRepositoryError::query(err.to_string()))
}

fn row_to_display_name(row: &UserRow) -> Result<DisplayName, AppointmentRepositoryError> {
    DisplayName::new(row.display_name.clone())
        .map_err(|err| AppointmentRepositoryError::query(err.to_string()))
}

fn row_to_email(row: &UserRow) -> Result<EmailAddress, AppointmentRepositoryError> {
    EmailAddress::new(row.email.clone())
        .map_err(|err| AppointmentRepositoryError::query(err.to_string()))
}

impl DieselAppointmentRepository {
    /// Load the user rows for a set of participant ids, keyed by id.
    async fn load_participants(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, UserRow>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(ids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(|row| (row.id, row)).collect())
    }
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAppointmentRow {
            id: appointment.id(),
            client_id: *appointment.client_id().as_uuid(),
            provider_id: *appointment.provider_id().as_uuid(),
            date: appointment.date(),
            canceled_at: appointment.canceled_at(),
            created_at: appointment.created_at(),
        };

        diesel::insert_into(appointments::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AppointmentRepositoryError::slot_taken(
                        appointment.provider_id().as_ref(),
                        appointment.date(),
                    )
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id_with_participants(
        &self,
        appointment_id: &Uuid,
    ) -> Result<Option<AppointmentWithParticipants>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = appointments::table
            .filter(appointments::id.eq(appointment_id))
            .select(AppointmentRow::as_select())
            .first::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        drop(conn);

        let Some(row) = row else {
            return Ok(None);
        };

        let participants = self.load_participants(&[row.provider_id, row.client_id]).await?;
        let provider = participants.get(&row.provider_id).ok_or_else(|| {
            AppointmentRepositoryError::query(format!("provider {} missing", row.provider_id))
        })?;
        let client = participants.get(&row.client_id).ok_or_else(|| {
            AppointmentRepositoryError::query(format!("client {} missing", row.client_id))
        })?;

        let provider_name = row_to_display_name(provider)?;
        let provider_email = row_to_email(provider)?;
        let client_name = row_to_display_name(client)?;

        Ok(Some(AppointmentWithParticipants {
            appointment: row_to_appointment(row)?,
            provider_name,
            provider_email,
            client_name,
        }))
    }

    async fn find_active_for_slot(
        &self,
        provider_id: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = appointments::table
            .filter(
                appointments::provider_id
                    .eq(provider_id.as_uuid())
                    .and(appointments::date.eq(date))
                    .and(appointments::canceled_at.is_null()),
            )
            .select(AppointmentRow::as_select())
            .first::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_appointment).transpose()
    }

    async fn list_active_for_provider_between(
        &self,
        provider_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AppointmentRow> = appointments::table
            .filter(
                appointments::provider_id
                    .eq(provider_id.as_uuid())
                    .and(appointments::canceled_at.is_null())
                    .and(appointments::date.ge(start))
                    .and(appointments::date.le(end)),
            )
            .order(appointments::date.asc())
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_appointment).collect()
    }

    async fn list_active_page_for_client(
        &self,
        client_id: &UserId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AppointmentWithProvider>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AppointmentRow> = appointments::table
            .filter(
                appointments::client_id
                    .eq(client_id.as_uuid())
                    .and(appointments::canceled_at.is_null()),
            )
            .order(appointments::date.asc())
            .offset(offset)
            .limit(limit)
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        drop(conn);

        let provider_ids: Vec<Uuid> = rows.iter().map(|row| row.provider_id).collect();
        let providers = self.load_participants(&provider_ids).await?;

        rows.into_iter()
            .map(|row| {
                let provider = providers.get(&row.provider_id).ok_or_else(|| {
                    AppointmentRepositoryError::query(format!(
                        "provider {} missing",
                        row.provider_id
                    ))
                })?;
                let summary = ProviderSummary {
                    id: UserId::from_uuid(provider.id),
                    name: row_to_display_name(provider)?,
                    avatar_url: provider.avatar_url.clone(),
                };
                Ok(AppointmentWithProvider {
                    appointment: row_to_appointment(row)?,
                    provider: summary,
                })
            })
            .collect()
    }

    async fn record_cancellation(
        &self,
        appointment: &Appointment,
    ) -> Result<(), AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(appointments::table.find(appointment.id()))
            .set(appointments::canceled_at.eq(appointment.canceled_at()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(AppointmentRepositoryError::query("record not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> AppointmentRow {
        let date = Utc
            .with_ymd_and_hms(2024, 1, 10, 10, 0, 0)
            .single()
            .expect("valid instant");
        AppointmentRow {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            date,
            canceled_at: None,
            created_at: date - chrono::TimeDelta::days(1),
            updated_at: date - chrono::TimeDelta::days(1),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            AppointmentRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, AppointmentRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_preserves_slot_fields(valid_row: AppointmentRow) {
        let expected_date = valid_row.date;
        let appointment = row_to_appointment(valid_row).expect("row is valid");

        assert_eq!(appointment.date(), expected_date);
        assert!(!appointment.is_canceled());
    }

    #[rstest]
    fn row_conversion_rejects_misaligned_dates(mut valid_row: AppointmentRow) {
        valid_row.date += chrono::TimeDelta::minutes(30);

        let error = row_to_appointment(valid_row).expect_err("misaligned date should fail");
        assert!(matches!(error, AppointmentRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_rejects_same_participants(mut valid_row: AppointmentRow) {
        valid_row.client_id = valid_row.provider_id;

        let error = row_to_appointment(valid_row).expect_err("same participants should fail");
        assert!(matches!(error, AppointmentRepositoryError::Query { .. }));
    }
}
