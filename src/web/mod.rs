//! Web server for the Pageforge HTTP API.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::WebError;
pub use server::{build_router, run_server, ServerConfig};
pub use state::WebAppState;
