//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`): a manually advanced clock and in-memory
//! adapters that honour the real port semantics, including slot exclusivity.

pub mod clock {
    //! A clock that only moves when a test says so.

    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    /// Clock returning a preset instant, advanced explicitly by tests.
    pub struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        /// Create a clock frozen at `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Move the clock forward (or backward with a negative delta).
        pub fn advance(&self, delta: TimeDelta) {
            *self.lock_clock() += delta;
        }

        /// Jump the clock to an absolute instant.
        pub fn set(&self, now: DateTime<Utc>) {
            *self.lock_clock() = now;
        }

        fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    impl Clock for ManualClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod memory {
    //! In-memory adapters honouring the real port contracts.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::domain::ports::{
        AppointmentRepository, AppointmentRepositoryError, AppointmentWithParticipants,
        AppointmentWithProvider, IdentityOracle, IdentityOracleError, JobDispatchError, JobQueue,
        NotificationRepository, NotificationRepositoryError, ProviderSummary, QueuedJob,
    };
    use crate::domain::{Appointment, Notification, User, UserId};

    fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        match mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Identity oracle backed by a fixed user directory.
    #[derive(Debug, Default)]
    pub struct StaticIdentityOracle {
        users: Mutex<HashMap<Uuid, User>>,
    }

    impl StaticIdentityOracle {
        /// Create an empty directory.
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a user, replacing any previous entry with the same id.
        pub fn insert_user(&self, user: User) {
            lock(&self.users).insert(*user.id().as_uuid(), user);
        }

        /// Builder-style registration for test setup.
        pub fn with_user(self, user: User) -> Self {
            self.insert_user(user);
            self
        }

        fn find(&self, user_id: &UserId) -> Option<User> {
            lock(&self.users).get(user_id.as_uuid()).cloned()
        }
    }

    #[async_trait]
    impl IdentityOracle for StaticIdentityOracle {
        async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, IdentityOracleError> {
            Ok(self.find(user_id))
        }

        async fn is_provider(&self, user_id: &UserId) -> Result<bool, IdentityOracleError> {
            Ok(self.find(user_id).is_some_and(|user| user.is_provider()))
        }
    }

    /// Appointment store guarding slot exclusivity behind one lock, so two
    /// concurrent inserts for the same slot resolve to exactly one winner.
    #[derive(Debug, Default)]
    pub struct InMemoryAppointmentRepository {
        rows: Mutex<Vec<Appointment>>,
        directory: Mutex<HashMap<Uuid, User>>,
    }

    impl InMemoryAppointmentRepository {
        /// Create an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a participant for the join-style reads.
        pub fn register_participant(&self, user: User) {
            lock(&self.directory).insert(*user.id().as_uuid(), user);
        }

        /// Snapshot of every stored appointment.
        pub fn all(&self) -> Vec<Appointment> {
            lock(&self.rows).clone()
        }

        fn participant(&self, user_id: &UserId) -> Result<User, AppointmentRepositoryError> {
            lock(&self.directory)
                .get(user_id.as_uuid())
                .cloned()
                .ok_or_else(|| {
                    AppointmentRepositoryError::query(format!(
                        "participant {user_id} missing from directory"
                    ))
                })
        }
    }

    #[async_trait]
    impl AppointmentRepository for InMemoryAppointmentRepository {
        async fn insert(
            &self,
            appointment: &Appointment,
        ) -> Result<(), AppointmentRepositoryError> {
            let mut rows = lock(&self.rows);
            let conflict = rows.iter().any(|row| {
                row.provider_id() == appointment.provider_id()
                    && row.date() == appointment.date()
                    && !row.is_canceled()
            });
            if conflict {
                return Err(AppointmentRepositoryError::slot_taken(
                    appointment.provider_id().as_ref(),
                    appointment.date(),
                ));
            }
            rows.push(appointment.clone());
            Ok(())
        }

        async fn find_by_id_with_participants(
            &self,
            appointment_id: &Uuid,
        ) -> Result<Option<AppointmentWithParticipants>, AppointmentRepositoryError> {
            let appointment = lock(&self.rows)
                .iter()
                .find(|row| row.id() == *appointment_id)
                .cloned();
            let Some(appointment) = appointment else {
                return Ok(None);
            };

            let provider = self.participant(appointment.provider_id())?;
            let client = self.participant(appointment.client_id())?;

            Ok(Some(AppointmentWithParticipants {
                appointment,
                provider_name: provider.display_name().clone(),
                provider_email: provider.email().clone(),
                client_name: client.display_name().clone(),
            }))
        }

        async fn find_active_for_slot(
            &self,
            provider_id: &UserId,
            date: DateTime<Utc>,
        ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
            Ok(lock(&self.rows)
                .iter()
                .find(|row| {
                    row.provider_id() == provider_id && row.date() == date && !row.is_canceled()
                })
                .cloned())
        }

        async fn list_active_for_provider_between(
            &self,
            provider_id: &UserId,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
            Ok(lock(&self.rows)
                .iter()
                .filter(|row| {
                    row.provider_id() == provider_id
                        && !row.is_canceled()
                        && row.date() >= start
                        && row.date() <= end
                })
                .cloned()
                .collect())
        }

        async fn list_active_page_for_client(
            &self,
            client_id: &UserId,
            offset: i64,
            limit: i64,
        ) -> Result<Vec<AppointmentWithProvider>, AppointmentRepositoryError> {
            let mut rows: Vec<Appointment> = lock(&self.rows)
                .iter()
                .filter(|row| row.client_id() == client_id && !row.is_canceled())
                .cloned()
                .collect();
            rows.sort_by_key(Appointment::date);

            let offset = usize::try_from(offset.max(0)).unwrap_or(0);
            let limit = usize::try_from(limit.max(0)).unwrap_or(0);

            rows.into_iter()
                .skip(offset)
                .take(limit)
                .map(|appointment| {
                    let provider = self.participant(appointment.provider_id())?;
                    Ok(AppointmentWithProvider {
                        appointment,
                        provider: ProviderSummary {
                            id: provider.id().clone(),
                            name: provider.display_name().clone(),
                            avatar_url: provider.avatar_url().map(str::to_owned),
                        },
                    })
                })
                .collect()
        }

        async fn record_cancellation(
            &self,
            appointment: &Appointment,
        ) -> Result<(), AppointmentRepositoryError> {
            let mut rows = lock(&self.rows);
            let stored = rows
                .iter_mut()
                .find(|row| row.id() == appointment.id())
                .ok_or_else(|| AppointmentRepositoryError::query("record not found"))?;
            *stored = appointment.clone();
            Ok(())
        }
    }

    /// Notification store with feed-order reads.
    #[derive(Debug, Default)]
    pub struct InMemoryNotificationRepository {
        rows: Mutex<Vec<Notification>>,
    }

    impl InMemoryNotificationRepository {
        /// Create an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Snapshot of every stored notification, insertion order.
        pub fn all(&self) -> Vec<Notification> {
            lock(&self.rows).clone()
        }
    }

    #[async_trait]
    impl NotificationRepository for InMemoryNotificationRepository {
        async fn insert(
            &self,
            notification: &Notification,
        ) -> Result<(), NotificationRepositoryError> {
            lock(&self.rows).push(notification.clone());
            Ok(())
        }

        async fn list_recent_for_provider(
            &self,
            provider_id: &UserId,
            limit: i64,
        ) -> Result<Vec<Notification>, NotificationRepositoryError> {
            let mut rows: Vec<Notification> = lock(&self.rows)
                .iter()
                .filter(|row| row.provider_user_id() == provider_id)
                .cloned()
                .collect();
            // Newest first; later insertions win ties.
            rows.reverse();
            rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

            let limit = usize::try_from(limit.max(0)).unwrap_or(0);
            rows.truncate(limit);
            Ok(rows)
        }

        async fn mark_read(
            &self,
            notification_id: &Uuid,
        ) -> Result<Option<Notification>, NotificationRepositoryError> {
            let mut rows = lock(&self.rows);
            let Some(stored) = rows.iter_mut().find(|row| row.id() == *notification_id) else {
                return Ok(None);
            };
            *stored = stored.clone().mark_read();
            Ok(Some(stored.clone()))
        }
    }

    /// Queue that records submissions for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingJobQueue {
        jobs: Mutex<Vec<QueuedJob>>,
    }

    impl RecordingJobQueue {
        /// Create an empty recording queue.
        pub fn new() -> Self {
            Self::default()
        }

        /// Jobs submitted so far, in order.
        pub fn submitted(&self) -> Vec<QueuedJob> {
            lock(&self.jobs).clone()
        }
    }

    #[async_trait]
    impl JobQueue for RecordingJobQueue {
        async fn submit(&self, job: &QueuedJob) -> Result<(), JobDispatchError> {
            lock(&self.jobs).push(job.clone());
            Ok(())
        }
    }

    /// Queue whose submissions always fail, for swallow-and-log coverage.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FailingJobQueue;

    #[async_trait]
    impl JobQueue for FailingJobQueue {
        async fn submit(&self, _job: &QueuedJob) -> Result<(), JobDispatchError> {
            Err(JobDispatchError::unavailable("broker offline"))
        }
    }
}
