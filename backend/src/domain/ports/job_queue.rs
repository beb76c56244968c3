//! Domain port describing queue dispatch semantics for background jobs.
//!
//! The queue is an external at-least-once channel: the core guarantees
//! submission, never delivery. Consumers own retry and backoff.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job key for the cancellation mail sent to the provider.
pub const CANCELLATION_MAIL_JOB: &str = "CancellationMail";

/// Errors surfaced by the queue/dispatcher adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobDispatchError {
    /// Queue infrastructure is unavailable.
    #[error("job queue is unavailable: {message}")]
    Unavailable { message: String },

    /// The job could not be acknowledged or persisted.
    #[error("job was rejected: {message}")]
    Rejected { message: String },
}

impl JobDispatchError {
    /// Create an unavailable error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a rejection error with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// A named job payload handed to the external worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedJob {
    /// Worker routing key, e.g. [`CANCELLATION_MAIL_JOB`].
    pub key: String,
    /// Job arguments as free-form JSON.
    pub data: Value,
}

impl QueuedJob {
    /// Build a job envelope for the given key.
    pub fn new(key: impl Into<String>, data: Value) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}

/// Port for submitting jobs to the external worker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job for downstream processing. Fire-and-forget: success
    /// means the submission was accepted, nothing more.
    async fn submit(&self, job: &QueuedJob) -> Result<(), JobDispatchError>;
}
