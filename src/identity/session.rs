//! Identity session
//!
//! Owns the sticky offline override and the subscriber set. Constructed once
//! per process and passed explicitly to the persistence layer; there is no
//! ambient singleton. When the remote provider reports that its backend is
//! unconfigured or the operation is disabled, sign-in synthesizes a local
//! offline identity and reports success — that failure mode never reaches the
//! caller as an error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::data::Identity;
use crate::identity::provider::{IdentityError, IdentityProvider};

type Listener = Arc<dyn Fn(Option<Identity>) + Send + Sync>;

struct SessionInner {
    provider: Arc<dyn IdentityProvider>,
    /// Sticky offline override; persists until explicit sign-out
    sticky: Mutex<Option<Identity>>,
    listeners: Mutex<HashMap<u64, Listener>>,
    next_listener_id: AtomicU64,
}

/// Handle returned by [`IdentitySession::subscribe`]; unsubscribing one
/// handle leaves other subscribers intact.
pub struct SubscriptionHandle {
    inner: Arc<SessionInner>,
    id: u64,
}

impl SubscriptionHandle {
    pub fn unsubscribe(self) {
        self.inner.listeners.lock().remove(&self.id);
    }
}

/// Per-process identity session
#[derive(Clone)]
pub struct IdentitySession {
    inner: Arc<SessionInner>,
}

impl IdentitySession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                provider,
                sticky: Mutex::new(None),
                listeners: Mutex::new(HashMap::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Resolve the current actor: sticky override if present, else the
    /// provider's session, else `None`.
    pub async fn current(&self) -> Option<Identity> {
        if let Some(identity) = self.inner.sticky.lock().clone() {
            return Some(identity);
        }
        self.inner.provider.current().await
    }

    /// Register a listener. It is invoked immediately with the current value
    /// and again on every subsequent change.
    pub async fn subscribe(
        &self,
        listener: impl Fn(Option<Identity>) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let listener: Listener = Arc::new(listener);
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().insert(id, listener.clone());

        listener(self.current().await);

        SubscriptionHandle {
            inner: self.inner.clone(),
            id,
        }
    }

    /// Email/password login
    pub async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        let result = self
            .inner
            .provider
            .sign_in_with_credentials(email, password)
            .await;
        // Construct a display name from the email when falling back offline
        let display_name = email.split('@').next().unwrap_or("user").to_string();
        self.resolve_sign_in(result, || Identity::offline(email, display_name, false))
    }

    /// Email/password registration
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        let result = self.inner.provider.register(name, email, password).await;
        self.resolve_sign_in(result, || Identity::offline(email, name, false))
    }

    /// Provider-federated (Google) login
    pub async fn sign_in_with_google(&self) -> Result<Identity, IdentityError> {
        let result = self.inner.provider.sign_in_with_google().await;
        self.resolve_sign_in(result, || {
            Identity::offline("google@offline.local", "Google User (Offline)", false)
        })
    }

    /// Anonymous/guest login
    pub async fn sign_in_as_guest(&self) -> Result<Identity, IdentityError> {
        let result = self.inner.provider.sign_in_as_guest().await;
        self.resolve_sign_in(result, || {
            Identity::offline("guest@offline.local", "Guest (Offline)", true)
        })
    }

    /// Clear both the sticky override and the remote session, then notify
    /// subscribers with `None`.
    pub async fn sign_out(&self) {
        if let Err(err) = self.inner.provider.sign_out().await {
            tracing::warn!(error = %err, "Remote sign-out failed");
        }
        *self.inner.sticky.lock() = None;
        self.notify(None);
    }

    fn resolve_sign_in(
        &self,
        result: Result<Identity, IdentityError>,
        make_offline: impl FnOnce() -> Identity,
    ) -> Result<Identity, IdentityError> {
        match result {
            Ok(identity) => {
                // Real login supersedes any prior offline override
                *self.inner.sticky.lock() = None;
                self.notify(Some(identity.clone()));
                Ok(identity)
            }
            Err(err) if err.triggers_offline_fallback() => {
                tracing::warn!(error = %err, "Identity backend unavailable; entering offline mode");
                let identity = make_offline();
                *self.inner.sticky.lock() = Some(identity.clone());
                self.notify(Some(identity.clone()));
                Ok(identity)
            }
            Err(err) => {
                if !err.is_credential_error() {
                    tracing::error!(error = %err, "Sign-in failed");
                }
                Err(err)
            }
        }
    }

    fn notify(&self, identity: Option<Identity>) {
        let listeners: Vec<Listener> = self.inner.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(identity.clone());
        }
    }
}
