//! Content generator seam
//!
//! The generative provider turns a structured brief into a single HTML
//! document. Generation failures are blocking for the caller; there is no
//! retry automation.

pub mod http;
pub mod mock;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::data::FormSpec;

pub use http::HttpContentGenerator;
pub use mock::MockContentGenerator;
pub use prompt::{build_prompt, strip_code_fences};

/// Errors surfaced by the content generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Transport-level failure reaching the provider
    #[error("content generator unreachable: {0}")]
    Network(String),

    /// The provider rejected or failed the request
    #[error("content generator error: {0}")]
    Api(String),

    /// The provider answered with no usable document
    #[error("content generator returned an empty document")]
    EmptyResponse,
}

/// Generative content provider operations
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a complete HTML landing page for the given brief
    async fn generate_page(&self, spec: &FormSpec) -> Result<String, GeneratorError>;
}
