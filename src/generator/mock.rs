//! Mock content generator for deterministic testing

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::data::FormSpec;
use crate::generator::{ContentGenerator, GeneratorError};

/// Scriptable in-memory generator returning a fixed document
pub struct MockContentGenerator {
    html: String,
    fail: Mutex<bool>,
}

impl MockContentGenerator {
    pub fn returning(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            fail: Mutex::new(false),
        }
    }

    /// Make subsequent calls fail with an API error
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_page(&self, spec: &FormSpec) -> Result<String, GeneratorError> {
        if *self.fail.lock() {
            return Err(GeneratorError::Api("mock generator failure".to_string()));
        }
        // Substitute the page name so tests can assert the brief flowed through
        Ok(self.html.replace("{page_name}", &spec.page_name))
    }
}
