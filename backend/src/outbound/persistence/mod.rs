//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Async-safe pooling**: Connections are managed via `bb8` pools with
//!   proper async integration through `diesel-async`.
//! - **Strongly typed errors**: All database errors are mapped to the
//!   repository port error types; the unique-violation branch carries the
//!   slot exclusivity invariant across the process boundary.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, PoolConfig, DieselAppointmentRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/bookings");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselAppointmentRepository::new(pool);
//! ```

mod diesel_appointment_repository;
mod diesel_error_mapping;
mod diesel_identity_oracle;
mod diesel_notification_repository;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_identity_oracle::DieselIdentityOracle;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
