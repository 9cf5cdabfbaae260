//! Remote document store seam
//!
//! Pages live in a per-owner subcollection keyed by generated page id.
//! Earlier releases stored timestamps and HTML under different field names;
//! the wire type tolerates both on the read side only.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{FormSpec, HistoryRecord};

pub use http::HttpDocumentStore;
pub use mock::MockDocumentStore;

/// Errors surfaced by the remote document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the caller's access
    #[error("permission denied by document store")]
    PermissionDenied,

    /// The store could not be reached or is down
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// No document exists under the requested key
    #[error("document not found")]
    NotFound,

    /// Anything else
    #[error("document store error: {0}")]
    Other(String),
}

/// Wire representation of a stored page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageDocument {
    pub page_id: String,
    /// Creation time; legacy documents used `createdAt`
    #[serde(alias = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Generated HTML; legacy documents used `html`
    #[serde(alias = "html", default)]
    pub html_content: String,
    #[serde(rename = "live-url", default)]
    pub live_url: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "userId")]
    pub owner_uid: String,
    pub data: FormSpec,
}

impl PageDocument {
    /// Project the stored document into a display record
    pub fn into_record(self) -> HistoryRecord {
        let live_url = if self.live_url.is_empty() {
            None
        } else {
            Some(self.live_url)
        };
        HistoryRecord {
            id: self.page_id,
            timestamp: self.created_at,
            data: self.data,
            html: self.html_content,
            live_url,
            owner_uid: Some(self.owner_uid),
        }
    }
}

/// Remote document store operations
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a page document under (owner, page id)
    async fn put_page(&self, owner_uid: &str, doc: &PageDocument) -> Result<(), StoreError>;

    /// List every page document owned by `owner_uid`
    async fn list_pages(&self, owner_uid: &str) -> Result<Vec<PageDocument>, StoreError>;

    /// Fetch a single page document; public read, no identity required
    async fn get_page(&self, owner_uid: &str, page_id: &str) -> Result<PageDocument, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FormSpec;

    #[test]
    fn test_reads_current_field_names() {
        let json = serde_json::json!({
            "page_id": "my-app-a1b2c",
            "created_at": "2024-06-01T12:00:00Z",
            "html_content": "<html></html>",
            "live-url": "https://pages.example/share/u1/my-app-a1b2c.html",
            "status": "pending",
            "userId": "u1",
            "data": serde_json::to_value(FormSpec::initial()).unwrap(),
        });
        let doc: PageDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.html_content, "<html></html>");
        let record = doc.into_record();
        assert_eq!(record.owner_uid.as_deref(), Some("u1"));
        assert!(record.live_url.is_some());
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = serde_json::json!({
            "page_id": "old-page",
            "createdAt": "2023-01-15T08:30:00Z",
            "html": "<html>old</html>",
            "userId": "u2",
            "data": serde_json::to_value(FormSpec::initial()).unwrap(),
        });
        let doc: PageDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.html_content, "<html>old</html>");
        assert_eq!(doc.created_at.to_rfc3339(), "2023-01-15T08:30:00+00:00");
        assert!(doc.live_url.is_empty());
        assert!(doc.into_record().live_url.is_none());
    }
}
