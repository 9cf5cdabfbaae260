//! History persistence orchestration

pub mod service;

pub use service::{HistoryService, SaveDisposition, SaveError, SaveOutcome};
