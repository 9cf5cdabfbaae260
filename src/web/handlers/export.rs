//! Project export handler for the Pageforge web API.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::export::{decompose, write_project_zip, zip_filename};
use crate::web::error::WebError;
use crate::web::state::WebAppState;

/// Request to export a generated page as a project archive.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub html: String,
    pub project_name: String,
}

/// Decompose the page and stream back a zip archive.
pub async fn export_project(
    State(_state): State<WebAppState>,
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, WebError> {
    if req.html.is_empty() {
        return Err(WebError::BadRequest(
            "Cannot export a page with no content".to_string(),
        ));
    }

    let bundle = decompose(&req.html, &req.project_name);
    let bytes = write_project_zip(&bundle)?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", zip_filename(&bundle.slug)),
        ),
    ];
    Ok((headers, bytes))
}
