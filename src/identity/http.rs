//! HTTP adapter for the remote identity provider

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::data::Identity;
use crate::identity::provider::{IdentityError, IdentityProvider};

/// Identity provider reached over HTTP
///
/// Keeps the most recent remote session cached in-process; the session layer
/// adds the sticky offline override on top.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    session: Mutex<Option<Identity>>,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    uid: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
    #[serde(default)]
    anonymous: bool,
}

impl SessionResponse {
    fn into_identity(self) -> Identity {
        if self.anonymous {
            Identity::Guest { uid: self.uid }
        } else {
            Identity::Authenticated {
                uid: self.uid,
                email: self.email.unwrap_or_default(),
                display_name: self.display_name.unwrap_or_default(),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
}

impl HttpIdentityProvider {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Mutex::new(None),
        }
    }

    fn endpoint(&self, op: &str) -> String {
        format!("{}/v1/auth/{}", self.base_url, op)
    }

    async fn sign_in_request<B: Serialize>(
        &self,
        op: &str,
        body: &B,
    ) -> Result<Identity, IdentityError> {
        if self.base_url.is_empty() {
            return Err(IdentityError::ConfigurationMissing);
        }

        let response = self
            .http
            .post(self.endpoint(op))
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if response.status().is_success() {
            let session: SessionResponse = response
                .json()
                .await
                .map_err(|e| IdentityError::Unexpected(e.to_string()))?;
            let identity = session.into_identity();
            *self.session.lock() = Some(identity.clone());
            return Ok(identity);
        }

        Err(classify_error(response).await)
    }
}

/// Map an error response onto the closed error enum. Code strings follow the
/// backend's stable error catalogue; unknown codes land in `Unexpected`.
async fn classify_error(response: reqwest::Response) -> IdentityError {
    let status = response.status();
    let code = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error.code)
        .unwrap_or_default();

    match code.as_str() {
        "configuration-not-found" => IdentityError::ConfigurationMissing,
        "operation-not-allowed" => IdentityError::OperationNotAllowed,
        "invalid-credential" => IdentityError::InvalidCredentials,
        "user-not-found" => IdentityError::UserNotFound,
        "wrong-password" => IdentityError::WrongPassword,
        "weak-password" => IdentityError::WeakPassword,
        "email-already-in-use" => IdentityError::EmailInUse,
        "" => IdentityError::Unexpected(format!("HTTP {}", status)),
        other => IdentityError::Unexpected(format!("{} (HTTP {})", other, status)),
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn current(&self) -> Option<Identity> {
        self.session.lock().clone()
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        self.sign_in_request("login", &CredentialsRequest { email, password })
            .await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        self.sign_in_request(
            "register",
            &RegisterRequest {
                name,
                email,
                password,
            },
        )
        .await
    }

    async fn sign_in_with_google(&self) -> Result<Identity, IdentityError> {
        self.sign_in_request("google", &serde_json::json!({})).await
    }

    async fn sign_in_as_guest(&self) -> Result<Identity, IdentityError> {
        self.sign_in_request("guest", &serde_json::json!({})).await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        *self.session.lock() = None;

        if self.base_url.is_empty() {
            return Err(IdentityError::ConfigurationMissing);
        }

        let response = self
            .http
            .post(self.endpoint("signout"))
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify_error(response).await)
        }
    }
}
