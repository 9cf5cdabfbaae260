//! Page generation handler for the Pageforge web API.
//!
//! Generation and persistence are one flow: a successful generation is
//! immediately saved remote-first with the local fallback, so a network
//! hiccup never loses a page the user just paid a generation for.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::data::{FormSpec, HistoryRecord};
use crate::web::error::WebError;
use crate::web::handlers::pages::disposition_str;
use crate::web::state::WebAppState;

/// Response carrying the generated document and where it was saved.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub html: String,
    pub record: HistoryRecord,
    pub disposition: &'static str,
    pub warning: bool,
}

/// Generate a landing page from a structured brief and save it.
pub async fn generate_page(
    State(state): State<WebAppState>,
    Json(spec): Json<FormSpec>,
) -> Result<Json<GenerateResponse>, WebError> {
    if spec.page_name.trim().is_empty() {
        return Err(WebError::BadRequest("Page name is required".to_string()));
    }
    if spec.description.trim().is_empty() {
        return Err(WebError::BadRequest("Description is required".to_string()));
    }

    let html = state.generator().generate_page(&spec).await?;
    let outcome = state.history().save_with_fallback(spec, html.clone()).await;

    Ok(Json(GenerateResponse {
        html,
        warning: outcome.disposition.is_warning(),
        disposition: disposition_str(outcome.disposition),
        record: outcome.record,
    }))
}
