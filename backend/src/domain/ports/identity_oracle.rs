//! Port for the external identity collaborator.
//!
//! Authentication and session handling live outside this core; the services
//! only ask two questions of whoever vouches for the caller: who is this
//! user, and do they offer bookable slots. The oracle's answers are trusted.

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// Errors raised when the identity collaborator cannot answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityOracleError {
    /// The identity collaborator could not be reached.
    #[error("identity oracle is unavailable: {message}")]
    Unavailable { message: String },

    /// The lookup itself failed.
    #[error("identity lookup failed: {message}")]
    Lookup { message: String },
}

impl IdentityOracleError {
    /// Create an unavailable error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a lookup error with the given message.
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}

/// Port answering identity questions for the scheduling services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityOracle: Send + Sync {
    /// Resolve a user by id.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, IdentityOracleError>;

    /// Answer whether the user offers bookable slots.
    async fn is_provider(&self, user_id: &UserId) -> Result<bool, IdentityOracleError>;
}

/// Fixture oracle that knows nobody.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityOracle;

#[async_trait]
impl IdentityOracle for FixtureIdentityOracle {
    async fn get_user(&self, _user_id: &UserId) -> Result<Option<User>, IdentityOracleError> {
        Ok(None)
    }

    async fn is_provider(&self, _user_id: &UserId) -> Result<bool, IdentityOracleError> {
        Ok(false)
    }
}
