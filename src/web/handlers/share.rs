//! Public shared-page view.
//!
//! Serves saved pages to anonymous third parties. Responses are full HTML
//! documents, not JSON, and carry a sandboxing CSP so the untrusted
//! generated markup cannot reach beyond itself.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::store::StoreError;
use crate::web::state::WebAppState;

const SANDBOX_CSP: &str = "sandbox allow-scripts";

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Page not found</title></head>
<body style="font-family: sans-serif; text-align: center; padding: 4rem;">
<h1>Page not found</h1>
<p>This shared page does not exist or is no longer available.</p>
</body>
</html>"#;

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// Serve a shared page at `/share/{owner}/{page_id}.html`.
pub async fn view_shared_page(
    State(state): State<WebAppState>,
    Path((owner_uid, page)): Path<(String, String)>,
) -> Response {
    // Only the .html form of the link is valid
    let Some(page_id) = page.strip_suffix(".html") else {
        return not_found();
    };
    if page_id.is_empty() {
        return not_found();
    }

    match state.history().fetch_shared(&owner_uid, page_id).await {
        Ok(html) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CONTENT_SECURITY_POLICY, SANDBOX_CSP),
            ],
            html,
        )
            .into_response(),
        Err(StoreError::NotFound) => not_found(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to fetch shared page");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html("<!DOCTYPE html><html><body><h1>Temporarily unavailable</h1></body></html>"),
            )
                .into_response()
        }
    }
}
