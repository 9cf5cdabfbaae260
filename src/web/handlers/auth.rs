//! Authentication handlers for the Pageforge web API.
//!
//! Sign-in failures that indicate a missing or restricted backend never
//! surface here; the session layer already resolved them into offline
//! identities. Only genuine credential problems reach the client as errors.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::data::Identity;
use crate::web::error::WebError;
use crate::web::state::WebAppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response for a successful sign-in.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub identity: Identity,
    /// True when the identity was synthesized locally instead of issued by
    /// the remote service
    pub offline: bool,
}

impl IdentityResponse {
    fn from_identity(identity: Identity) -> Self {
        Self {
            offline: identity.is_offline(),
            identity,
        }
    }
}

/// Response describing the current session, signed in or not.
#[derive(Debug, Serialize)]
pub struct SessionStateResponse {
    pub identity: Option<Identity>,
    pub offline: bool,
}

/// Sign in with email and password.
pub async fn login(
    State(state): State<WebAppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<IdentityResponse>, WebError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(WebError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let identity = state
        .session()
        .sign_in_with_credentials(&req.email, &req.password)
        .await?;
    Ok(Json(IdentityResponse::from_identity(identity)))
}

/// Register a new account.
pub async fn register(
    State(state): State<WebAppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<IdentityResponse>), WebError> {
    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(WebError::BadRequest(
            "Name, email and password are required".to_string(),
        ));
    }

    let identity = state
        .session()
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(IdentityResponse::from_identity(identity)),
    ))
}

/// Sign in via the Google federated flow.
pub async fn google(
    State(state): State<WebAppState>,
) -> Result<Json<IdentityResponse>, WebError> {
    let identity = state.session().sign_in_with_google().await?;
    Ok(Json(IdentityResponse::from_identity(identity)))
}

/// Sign in anonymously as a guest.
pub async fn guest(State(state): State<WebAppState>) -> Result<Json<IdentityResponse>, WebError> {
    let identity = state.session().sign_in_as_guest().await?;
    Ok(Json(IdentityResponse::from_identity(identity)))
}

/// Sign out of the current session.
pub async fn signout(State(state): State<WebAppState>) -> StatusCode {
    state.session().sign_out().await;
    StatusCode::NO_CONTENT
}

/// Report the current session state.
pub async fn get_session(State(state): State<WebAppState>) -> Json<SessionStateResponse> {
    let identity = state.session().current().await;
    Json(SessionStateResponse {
        offline: identity.as_ref().map(Identity::is_offline).unwrap_or(false),
        identity,
    })
}
