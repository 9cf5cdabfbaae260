pub mod config;
pub mod data;
pub mod export;
pub mod generator;
pub mod history;
pub mod identity;
pub mod store;
pub mod util;
pub mod web;

pub use config::Config;
pub use data::{ColorTheme, FormSpec, HeroLayout, HistoryRecord, HistorySnapshot, Identity};
pub use export::{decompose, write_project_zip, ProjectBundle};
pub use generator::{ContentGenerator, HttpContentGenerator};
pub use history::{HistoryService, SaveDisposition, SaveOutcome};
pub use identity::{HttpIdentityProvider, IdentityProvider, IdentitySession};
pub use store::{DocumentStore, HttpDocumentStore};
pub use web::{run_server, ServerConfig, WebAppState};
