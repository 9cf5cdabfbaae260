//! REST API route definitions.

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::handlers::{auth, export, generate, pages};
use crate::web::state::WebAppState;

/// Build the API router with all REST endpoints.
pub fn api_routes() -> Router<WebAppState> {
    Router::new()
        // Auth routes
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/google", post(auth::google))
        .route("/auth/guest", post(auth::guest))
        .route("/auth/signout", post(auth::signout))
        .route("/auth/session", get(auth::get_session))
        // Generation
        .route("/generate", post(generate::generate_page))
        // Saved pages
        .route("/pages", get(pages::list_pages))
        .route("/pages", post(pages::save_page))
        // Export
        .route("/export", post(export::export_project))
}
