//! Mock identity provider for deterministic testing
//!
//! Implements [`IdentityProvider`] with scriptable outcomes so session logic
//! can be exercised without a real backend.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::data::Identity;
use crate::identity::provider::{IdentityError, IdentityProvider};

/// Outcome the mock returns for every sign-in style call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Return an authenticated identity derived from the request
    Succeed,
    /// Fail with [`IdentityError::ConfigurationMissing`]
    ConfigurationMissing,
    /// Fail with [`IdentityError::OperationNotAllowed`]
    OperationNotAllowed,
    /// Fail with [`IdentityError::InvalidCredentials`]
    InvalidCredentials,
    /// Fail with [`IdentityError::Network`]
    NetworkFailure,
}

/// Scriptable in-memory identity provider
pub struct MockIdentityProvider {
    behavior: Mutex<MockBehavior>,
    session: Mutex<Option<Identity>>,
    calls: Mutex<usize>,
}

impl MockIdentityProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            session: Mutex::new(None),
            calls: Mutex::new(0),
        }
    }

    /// Swap the scripted outcome mid-test
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Number of sign-in calls the mock has received
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }

    fn respond(&self, identity: Identity) -> Result<Identity, IdentityError> {
        *self.calls.lock() += 1;
        match *self.behavior.lock() {
            MockBehavior::Succeed => {
                *self.session.lock() = Some(identity.clone());
                Ok(identity)
            }
            MockBehavior::ConfigurationMissing => Err(IdentityError::ConfigurationMissing),
            MockBehavior::OperationNotAllowed => Err(IdentityError::OperationNotAllowed),
            MockBehavior::InvalidCredentials => Err(IdentityError::InvalidCredentials),
            MockBehavior::NetworkFailure => {
                Err(IdentityError::Network("mock network failure".to_string()))
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current(&self) -> Option<Identity> {
        self.session.lock().clone()
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<Identity, IdentityError> {
        let name = email.split('@').next().unwrap_or("user").to_string();
        self.respond(Identity::Authenticated {
            uid: format!("mock-{}", name),
            email: email.to_string(),
            display_name: name,
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<Identity, IdentityError> {
        self.respond(Identity::Authenticated {
            uid: format!("mock-{}", name),
            email: email.to_string(),
            display_name: name.to_string(),
        })
    }

    async fn sign_in_with_google(&self) -> Result<Identity, IdentityError> {
        self.respond(Identity::Authenticated {
            uid: "mock-google".to_string(),
            email: "google@example.com".to_string(),
            display_name: "Google User".to_string(),
        })
    }

    async fn sign_in_as_guest(&self) -> Result<Identity, IdentityError> {
        self.respond(Identity::Guest {
            uid: "mock-guest".to_string(),
        })
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        *self.session.lock() = None;
        Ok(())
    }
}
