//! Shared state for the web server.

use std::sync::Arc;

use crate::generator::ContentGenerator;
use crate::history::HistoryService;
use crate::identity::IdentitySession;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct WebAppState {
    session: IdentitySession,
    history: Arc<HistoryService>,
    generator: Arc<dyn ContentGenerator>,
}

impl WebAppState {
    pub fn new(
        session: IdentitySession,
        history: Arc<HistoryService>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            session,
            history,
            generator,
        }
    }

    pub fn session(&self) -> &IdentitySession {
        &self.session
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    pub fn generator(&self) -> &dyn ContentGenerator {
        self.generator.as_ref()
    }
}
