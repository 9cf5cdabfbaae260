//! HTTP adapter for the remote document store

use async_trait::async_trait;
use serde::Deserialize;

use crate::store::{DocumentStore, PageDocument, StoreError};

/// Document store reached over HTTP
///
/// Layout: `/v1/owners/{owner}/pages[/{page_id}]`.
pub struct HttpDocumentStore {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ListPagesResponse {
    pages: Vec<PageDocument>,
}

impl HttpDocumentStore {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn check_configured(&self) -> Result<(), StoreError> {
        if self.base_url.is_empty() {
            return Err(StoreError::Unavailable("store not configured".to_string()));
        }
        Ok(())
    }

    fn pages_url(&self, owner_uid: &str) -> String {
        format!("{}/v1/owners/{}/pages", self.base_url, owner_uid)
    }

    fn page_url(&self, owner_uid: &str, page_id: &str) -> String {
        format!("{}/{}", self.pages_url(owner_uid), page_id)
    }
}

fn map_status(status: reqwest::StatusCode) -> StoreError {
    use reqwest::StatusCode;
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::PermissionDenied,
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            StoreError::Unavailable(format!("HTTP {}", status))
        }
        other => StoreError::Other(format!("HTTP {}", other)),
    }
}

fn map_transport(err: reqwest::Error) -> StoreError {
    // A store we cannot reach at all is the "unavailable" failure mode
    if err.is_connect() || err.is_timeout() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Other(err.to_string())
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn put_page(&self, owner_uid: &str, doc: &PageDocument) -> Result<(), StoreError> {
        self.check_configured()?;
        let response = self
            .http
            .put(self.page_url(owner_uid, &doc.page_id))
            .json(doc)
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(map_status(response.status()))
        }
    }

    async fn list_pages(&self, owner_uid: &str) -> Result<Vec<PageDocument>, StoreError> {
        self.check_configured()?;
        let response = self
            .http
            .get(self.pages_url(owner_uid))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        let body: ListPagesResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(body.pages)
    }

    async fn get_page(&self, owner_uid: &str, page_id: &str) -> Result<PageDocument, StoreError> {
        self.check_configured()?;
        let response = self
            .http
            .get(self.page_url(owner_uid, page_id))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(map_status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Other(e.to_string()))
    }
}
