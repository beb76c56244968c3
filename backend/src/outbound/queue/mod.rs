//! Job submission adapters for the external worker.
//!
//! The scheduling core only guarantees at-least-once submission; delivery,
//! retry, and backoff belong to the worker draining the channel. The
//! Postgres adapter writes each job into the `queued_jobs` outbox table, so
//! a committed row is a completed submission.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{JobDispatchError, JobQueue, QueuedJob};
use crate::outbound::persistence::schema::queued_jobs;
use crate::outbound::persistence::{DbPool, PoolError};

/// Insertable outbox row for one job submission.
#[derive(Debug, Insertable)]
#[diesel(table_name = queued_jobs)]
struct NewQueuedJobRow<'a> {
    id: Uuid,
    key: &'a str,
    data: &'a serde_json::Value,
    created_at: DateTime<Utc>,
}

/// Postgres-backed implementation of the job queue port.
#[derive(Clone)]
pub struct PostgresJobQueue {
    pool: DbPool,
}

impl PostgresJobQueue {
    /// Create a new queue adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to dispatch errors.
fn map_pool_error(error: PoolError) -> JobDispatchError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    JobDispatchError::unavailable(message)
}

/// Map Diesel errors to dispatch errors.
fn map_diesel_error(error: diesel::result::Error) -> JobDispatchError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            JobDispatchError::unavailable("database connection error")
        }
        other => JobDispatchError::rejected(other.to_string()),
    }
}

#[async_trait]
impl JobQueue for PostgresJobQueue {
    async fn submit(&self, job: &QueuedJob) -> Result<(), JobDispatchError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewQueuedJobRow {
            id: Uuid::new_v4(),
            key: &job.key,
            data: &job.data,
            created_at: Utc::now(),
        };

        diesel::insert_into(queued_jobs::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

/// Stub queue implementation that discards all jobs.
///
/// This placeholder implements the `JobQueue` port with no-op behaviour,
/// allowing the application to compile and run without an outbox table.
/// All `submit` operations succeed but the job is not persisted.
#[derive(Debug, Clone, Default)]
pub struct StubJobQueue;

impl StubJobQueue {
    /// Create a new stub queue instance.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobQueue for StubJobQueue {
    async fn submit(&self, job: &QueuedJob) -> Result<(), JobDispatchError> {
        // Log a warning so developers notice if this stub is used unintentionally.
        tracing::warn!(key = %job.key, "StubJobQueue: job discarded (queue adapter not wired)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::CANCELLATION_MAIL_JOB;

    #[rstest]
    #[tokio::test]
    async fn stub_queue_submit_succeeds() {
        let queue = StubJobQueue::new();
        let job = QueuedJob::new(CANCELLATION_MAIL_JOB, json!({ "appointment": {} }));

        let result = queue.submit(&job).await;
        assert!(result.is_ok(), "stub queue submit should succeed");
    }

    #[rstest]
    fn pool_error_maps_to_unavailable() {
        let err = map_pool_error(PoolError::checkout("broker offline"));

        assert!(matches!(err, JobDispatchError::Unavailable { .. }));
        assert!(err.to_string().contains("broker offline"));
    }

    #[rstest]
    fn diesel_error_maps_to_rejection() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, JobDispatchError::Rejected { .. }));
    }
}
