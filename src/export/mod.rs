//! Project export: artifact decomposition and zip packaging

pub mod bundle;
pub mod decompose;

pub use bundle::{write_project_zip, zip_filename};
pub use decompose::{decompose, ProjectBundle, SCRIPT_PATH, STYLESHEET_PATH};
