//! PostgreSQL-backed `IdentityOracle` implementation using Diesel ORM.
//!
//! The authoritative identity store lives with the auth collaborator; this
//! adapter reads the mirrored `users` table and answers the two questions
//! the scheduling services ask of it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IdentityOracle, IdentityOracleError};
use crate::domain::{User, UserId};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the identity oracle port.
#[derive(Clone)]
pub struct DieselIdentityOracle {
    pool: DbPool,
}

impl DieselIdentityOracle {
    /// Create a new oracle with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to oracle errors.
fn map_pool_error(error: PoolError) -> IdentityOracleError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    IdentityOracleError::unavailable(message)
}

/// Map Diesel errors to oracle errors.
fn map_diesel_error(error: diesel::result::Error) -> IdentityOracleError {
    IdentityOracleError::lookup(error.to_string())
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, IdentityOracleError> {
    let user = User::try_from_strings(
        row.id.to_string(),
        row.display_name,
        row.email,
        row.is_provider,
    )
    .map_err(|err| IdentityOracleError::lookup(err.to_string()))?;
    Ok(user.with_avatar_url(row.avatar_url))
}

#[async_trait]
impl IdentityOracle for DieselIdentityOracle {
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, IdentityOracleError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn is_provider(&self, user_id: &UserId) -> Result<bool, IdentityOracleError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let flag = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(users::is_provider)
            .first::<bool>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(flag.unwrap_or(false))
    }
}
