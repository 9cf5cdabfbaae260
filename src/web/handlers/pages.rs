//! Page persistence handlers for the Pageforge web API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::data::{FormSpec, HistoryRecord};
use crate::history::SaveDisposition;
use crate::web::error::WebError;
use crate::web::state::WebAppState;

/// Request to save a generated page.
#[derive(Debug, Deserialize)]
pub struct SavePageRequest {
    pub data: FormSpec,
    pub html: String,
}

/// Response for a save. The disposition tells the client where the page
/// actually landed; saving never fails outright.
#[derive(Debug, Serialize)]
pub struct SavePageResponse {
    pub record: HistoryRecord,
    pub disposition: &'static str,
    pub warning: bool,
}

/// Response for listing saved pages.
#[derive(Debug, Serialize)]
pub struct ListPagesResponse {
    pub pages: Vec<HistoryRecord>,
}

pub(crate) fn disposition_str(disposition: SaveDisposition) -> &'static str {
    match disposition {
        SaveDisposition::Remote => "remote",
        SaveDisposition::OfflineFallback => "offline-fallback",
        SaveDisposition::PermissionFallback => "permission-fallback",
        SaveDisposition::RemoteErrorFallback => "remote-error-fallback",
    }
}

/// Save a generated page, remote-first with local fallback.
pub async fn save_page(
    State(state): State<WebAppState>,
    Json(req): Json<SavePageRequest>,
) -> Result<(StatusCode, Json<SavePageResponse>), WebError> {
    if req.html.is_empty() {
        return Err(WebError::BadRequest(
            "Cannot save a page with no content".to_string(),
        ));
    }

    let outcome = state.history().save_with_fallback(req.data, req.html).await;
    Ok((
        StatusCode::CREATED,
        Json(SavePageResponse {
            warning: outcome.disposition.is_warning(),
            disposition: disposition_str(outcome.disposition),
            record: outcome.record,
        }),
    ))
}

/// List saved pages for the current identity, newest first.
pub async fn list_pages(State(state): State<WebAppState>) -> Json<ListPagesResponse> {
    Json(ListPagesResponse {
        pages: state.history().current_history().await,
    })
}
