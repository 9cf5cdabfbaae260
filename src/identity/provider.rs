//! Identity provider seam
//!
//! The remote identity backend is reached through the [`IdentityProvider`]
//! trait so the session logic can be exercised against a mock. Error
//! discrimination happens here, once, as a closed enum; downstream code
//! branches on kinds, never on string prefixes.

use async_trait::async_trait;
use thiserror::Error;

use crate::data::Identity;

/// Errors surfaced by the remote identity provider
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The backend has no identity configuration at all
    #[error("identity backend is not configured")]
    ConfigurationMissing,

    /// The backend exists but this sign-in method is disabled
    #[error("sign-in method is not enabled")]
    OperationNotAllowed,

    /// Email/password pair rejected
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given email
    #[error("no account found for this email")]
    UserNotFound,

    /// Password mismatch for an existing account
    #[error("wrong password")]
    WrongPassword,

    /// Registration rejected for password strength
    #[error("password is too weak")]
    WeakPassword,

    /// Registration rejected because the email is taken
    #[error("email is already registered")]
    EmailInUse,

    /// Transport-level failure reaching the backend
    #[error("identity provider unreachable: {0}")]
    Network(String),

    /// Anything the adapter could not classify
    #[error("unexpected identity error: {0}")]
    Unexpected(String),
}

impl IdentityError {
    /// Failure modes that trigger offline identity synthesis instead of
    /// propagating to the caller
    pub fn triggers_offline_fallback(&self) -> bool {
        matches!(
            self,
            IdentityError::ConfigurationMissing | IdentityError::OperationNotAllowed
        )
    }

    /// User-caused failures that are surfaced to the UI without error logging
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            IdentityError::InvalidCredentials
                | IdentityError::UserNotFound
                | IdentityError::WrongPassword
                | IdentityError::WeakPassword
                | IdentityError::EmailInUse
        )
    }
}

/// Remote identity backend operations
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current remote session, if any
    async fn current(&self) -> Option<Identity>;

    /// Email/password login
    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError>;

    /// Email/password registration with a display name
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError>;

    /// Provider-federated (Google) login
    async fn sign_in_with_google(&self) -> Result<Identity, IdentityError>;

    /// Anonymous/guest login
    async fn sign_in_as_guest(&self) -> Result<Identity, IdentityError>;

    /// End the remote session
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
