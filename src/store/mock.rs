//! Mock document store for deterministic testing
//!
//! In-memory [`DocumentStore`] with scriptable failures and a request
//! counter, so tests can assert that offline paths issue zero store calls.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::store::{DocumentStore, PageDocument, StoreError};

/// Outcome the mock returns for store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockStoreBehavior {
    Succeed,
    PermissionDenied,
    Unavailable,
    Fail,
}

/// Scriptable in-memory document store
pub struct MockDocumentStore {
    behavior: Mutex<MockStoreBehavior>,
    pages: Mutex<HashMap<(String, String), PageDocument>>,
    calls: Mutex<usize>,
}

impl MockDocumentStore {
    pub fn new(behavior: MockStoreBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            pages: Mutex::new(HashMap::new()),
            calls: Mutex::new(0),
        }
    }

    pub fn set_behavior(&self, behavior: MockStoreBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Total number of store operations attempted against the mock
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }

    /// Seed a page directly, bypassing behavior and counters
    pub fn seed(&self, owner_uid: &str, doc: PageDocument) {
        self.pages
            .lock()
            .insert((owner_uid.to_string(), doc.page_id.clone()), doc);
    }

    fn check(&self) -> Result<(), StoreError> {
        *self.calls.lock() += 1;
        match *self.behavior.lock() {
            MockStoreBehavior::Succeed => Ok(()),
            MockStoreBehavior::PermissionDenied => Err(StoreError::PermissionDenied),
            MockStoreBehavior::Unavailable => {
                Err(StoreError::Unavailable("mock store down".to_string()))
            }
            MockStoreBehavior::Fail => Err(StoreError::Other("mock store failure".to_string())),
        }
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn put_page(&self, owner_uid: &str, doc: &PageDocument) -> Result<(), StoreError> {
        self.check()?;
        self.pages
            .lock()
            .insert((owner_uid.to_string(), doc.page_id.clone()), doc.clone());
        Ok(())
    }

    async fn list_pages(&self, owner_uid: &str) -> Result<Vec<PageDocument>, StoreError> {
        self.check()?;
        Ok(self
            .pages
            .lock()
            .iter()
            .filter(|((owner, _), _)| owner == owner_uid)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn get_page(&self, owner_uid: &str, page_id: &str) -> Result<PageDocument, StoreError> {
        self.check()?;
        self.pages
            .lock()
            .get(&(owner_uid.to_string(), page_id.to_string()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
