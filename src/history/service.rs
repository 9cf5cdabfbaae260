//! Persistence orchestrator
//!
//! Saves artifacts remote-first and falls back to the local snapshot on any
//! failure. Offline-synthesized identities short-circuit straight to the
//! fallback without touching the network. The in-memory history list is the
//! display source of truth; the snapshot mirrors its 20 newest entries after
//! every save attempt regardless of remote outcome.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;

use crate::data::{FormSpec, HistoryRecord, HistorySnapshot};
use crate::identity::IdentitySession;
use crate::store::{DocumentStore, PageDocument, StoreError};
use crate::util::generate_page_id;

/// Status stamped on freshly written remote documents
const STATUS_PENDING: &str = "pending";

/// Failure modes of a remote save, distinguished so the caller can pick a
/// non-alarming message for the expected ones
#[derive(Debug, Error)]
pub enum SaveError {
    /// No identity, or an offline-synthesized one; no network call was made
    #[error("offline - local fallback required")]
    Offline,

    /// The store rejected the write
    #[error("permission denied")]
    PermissionDenied,

    /// Any other remote failure
    #[error("remote save failed: {0}")]
    Remote(StoreError),
}

/// Where a save attempt ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDisposition {
    /// Written to the remote store
    Remote,
    /// Local fallback after the expected offline condition
    OfflineFallback,
    /// Local fallback after a permission-denied rejection
    PermissionFallback,
    /// Local fallback after an unexpected remote failure
    RemoteErrorFallback,
}

impl SaveDisposition {
    /// Whether the user-facing notification should carry a warning tone.
    /// Offline and permission-denied are expected degraded modes and stay
    /// neutral.
    pub fn is_warning(&self) -> bool {
        matches!(self, SaveDisposition::RemoteErrorFallback)
    }
}

/// Result of a save with the application-level fallback applied
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub record: HistoryRecord,
    pub disposition: SaveDisposition,
}

/// Orchestrates remote persistence, local mirroring, and history loading
pub struct HistoryService {
    session: IdentitySession,
    store: Arc<dyn DocumentStore>,
    snapshot: HistorySnapshot,
    history: Mutex<Vec<HistoryRecord>>,
    share_base_url: Option<String>,
}

impl HistoryService {
    pub fn new(
        session: IdentitySession,
        store: Arc<dyn DocumentStore>,
        snapshot: HistorySnapshot,
        share_base_url: Option<String>,
    ) -> Self {
        // Recover the snapshot up front so a save issued before any history
        // load prepends to prior records instead of clobbering them
        let history = Mutex::new(snapshot.load());
        Self {
            session,
            store,
            snapshot,
            history,
            share_base_url,
        }
    }

    /// Attempt to persist an artifact to the remote store under the current
    /// identity. Fails with a distinguishable condition instead of falling
    /// back itself; the documented failure path is "this call fails, caller
    /// falls back" (see [`HistoryService::save_with_fallback`]).
    pub async fn save_artifact(
        &self,
        spec: FormSpec,
        html: String,
    ) -> Result<HistoryRecord, SaveError> {
        let identity = match self.session.current().await {
            Some(identity) if !identity.is_offline() => identity,
            // Offline-synthesized identities never round-trip to the store
            _ => return Err(SaveError::Offline),
        };

        let owner_uid = identity.uid().to_string();
        let page_id = generate_page_id(&spec.page_name);
        let live_url = self
            .share_base_url
            .as_ref()
            .map(|base| {
                format!(
                    "{}/share/{}/{}.html",
                    base.trim_end_matches('/'),
                    owner_uid,
                    page_id
                )
            })
            .unwrap_or_default();

        let doc = PageDocument {
            page_id,
            created_at: Utc::now(),
            html_content: html,
            live_url,
            status: STATUS_PENDING.to_string(),
            owner_uid: owner_uid.clone(),
            data: spec,
        };

        self.store
            .put_page(&owner_uid, &doc)
            .await
            .map_err(|err| match err {
                StoreError::PermissionDenied => SaveError::PermissionDenied,
                other => SaveError::Remote(other),
            })?;

        Ok(doc.into_record())
    }

    /// Application-level save: remote first, local record on any failure.
    /// Always prepends the resulting record to the in-memory history and
    /// rewrites the local snapshot with the most recent 20 entries.
    pub async fn save_with_fallback(&self, spec: FormSpec, html: String) -> SaveOutcome {
        let (record, disposition) = match self.save_artifact(spec.clone(), html.clone()).await {
            Ok(record) => (record, SaveDisposition::Remote),
            Err(err) => {
                let disposition = match &err {
                    SaveError::Offline => SaveDisposition::OfflineFallback,
                    SaveError::PermissionDenied => SaveDisposition::PermissionFallback,
                    SaveError::Remote(_) => SaveDisposition::RemoteErrorFallback,
                };
                if disposition.is_warning() {
                    tracing::warn!(error = %err, "Remote save failed; keeping page locally");
                } else {
                    tracing::debug!(error = %err, "Remote save skipped; keeping page locally");
                }
                (HistoryRecord::local(spec, html), disposition)
            }
        };

        {
            let mut history = self.history.lock();
            history.insert(0, record.clone());
            if let Err(err) = self.snapshot.store(&history) {
                tracing::warn!(error = %err, "Failed to write local history snapshot");
            }
        }

        SaveOutcome {
            record,
            disposition,
        }
    }

    /// Load history from the remote store for the current identity, sorted
    /// newest-first. Degrades to an empty list (no identity, offline
    /// identity, permission denied, store unavailable) so the caller's
    /// local-snapshot fallback takes over.
    pub async fn load_history(&self) -> Vec<HistoryRecord> {
        let identity = match self.session.current().await {
            Some(identity) if !identity.is_offline() => identity,
            _ => return Vec::new(),
        };

        match self.store.list_pages(identity.uid()).await {
            Ok(pages) => {
                let mut records: Vec<HistoryRecord> =
                    pages.into_iter().map(PageDocument::into_record).collect();
                records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                records
            }
            Err(StoreError::PermissionDenied) | Err(StoreError::Unavailable(_)) => {
                tracing::warn!("Document store denied or unavailable; using local history");
                Vec::new()
            }
            Err(err) => {
                tracing::error!(error = %err, "Unexpected failure loading history");
                Vec::new()
            }
        }
    }

    /// History for display: remote when it has anything, otherwise the local
    /// snapshot. Replaces the in-memory list.
    pub async fn current_history(&self) -> Vec<HistoryRecord> {
        let mut records = self.load_history().await;
        if records.is_empty() {
            records = self.snapshot.load();
        }
        *self.history.lock() = records.clone();
        records
    }

    /// Public shared-page lookup. No identity involved and never served from
    /// the local snapshot; local storage is meaningless to a third-party
    /// viewer.
    pub async fn fetch_shared(&self, owner_uid: &str, page_id: &str) -> Result<String, StoreError> {
        let doc = self.store.get_page(owner_uid, page_id).await?;
        Ok(doc.html_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::mock::{MockBehavior, MockIdentityProvider};
    use crate::store::mock::{MockDocumentStore, MockStoreBehavior};
    use chrono::Duration;
    use tempfile::TempDir;

    struct Fixture {
        service: HistoryService,
        store: Arc<MockDocumentStore>,
        session: IdentitySession,
        _dir: TempDir,
    }

    async fn fixture(identity: MockBehavior, store_behavior: MockStoreBehavior) -> Fixture {
        let provider = Arc::new(MockIdentityProvider::new(identity));
        let session = IdentitySession::new(provider);
        let store = Arc::new(MockDocumentStore::new(store_behavior));
        let dir = TempDir::new().unwrap();
        let snapshot = HistorySnapshot::at(dir.path().join("history.json"));
        let service = HistoryService::new(
            session.clone(),
            store.clone(),
            snapshot,
            Some("https://pages.example".to_string()),
        );
        Fixture {
            service,
            store,
            session,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn test_save_without_identity_is_offline() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;

        let err = fx
            .service
            .save_artifact(FormSpec::initial(), "<html></html>".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::Offline));
        assert_eq!(fx.store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_save_under_offline_identity_never_touches_store() {
        let fx = fixture(
            MockBehavior::ConfigurationMissing,
            MockStoreBehavior::Succeed,
        )
        .await;
        let identity = fx.session.sign_in_as_guest().await.unwrap();
        assert!(identity.is_offline());

        let err = fx
            .service
            .save_artifact(FormSpec::initial(), "<html></html>".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::Offline));
        assert_eq!(fx.store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_save_success_builds_record_and_live_url() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        fx.session
            .sign_in_with_credentials("jane@example.com", "pw")
            .await
            .unwrap();

        let mut spec = FormSpec::initial();
        spec.page_name = "My Cool App!".to_string();
        let record = fx
            .service
            .save_artifact(spec, "<html>x</html>".to_string())
            .await
            .unwrap();

        assert!(record.id.starts_with("my-cool-app-"));
        assert_eq!(record.owner_uid.as_deref(), Some("mock-jane"));
        let live_url = record.live_url.unwrap();
        assert!(live_url.starts_with("https://pages.example/share/mock-jane/my-cool-app-"));
        assert!(live_url.ends_with(".html"));
    }

    #[tokio::test]
    async fn test_permission_denied_is_distinguishable() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::PermissionDenied).await;
        fx.session.sign_in_as_guest().await.unwrap();

        let err = fx
            .service
            .save_artifact(FormSpec::initial(), "<html></html>".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_fallback_save_prepends_and_caps_snapshot() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        // No sign-in: every save takes the offline fallback

        let mut last_id = String::new();
        for n in 0..25 {
            let outcome = fx
                .service
                .save_with_fallback(FormSpec::initial(), format!("<html>{}</html>", n))
                .await;
            assert_eq!(outcome.disposition, SaveDisposition::OfflineFallback);
            assert!(!outcome.disposition.is_warning());
            last_id = outcome.record.id.clone();
        }

        let snapshot = fx.service.snapshot.load();
        assert_eq!(snapshot.len(), 20);
        assert_eq!(snapshot[0].id, last_id);
        assert_eq!(snapshot[0].html, "<html>24</html>");
    }

    #[tokio::test]
    async fn test_fallback_save_preserves_preexisting_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        // A previous run left three records behind
        let prior: Vec<HistoryRecord> = (0..3)
            .map(|n| HistoryRecord::local(FormSpec::initial(), format!("<html>{}</html>", n)))
            .collect();
        HistorySnapshot::at(path.clone()).store(&prior).unwrap();

        // Fresh service, first action is a save (no history load beforehand)
        let provider = Arc::new(MockIdentityProvider::new(MockBehavior::Succeed));
        let session = IdentitySession::new(provider);
        let store = Arc::new(MockDocumentStore::new(MockStoreBehavior::Succeed));
        let service = HistoryService::new(
            session,
            store,
            HistorySnapshot::at(path.clone()),
            None,
        );

        let outcome = service
            .save_with_fallback(FormSpec::initial(), "<html>new</html>".to_string())
            .await;
        assert_eq!(outcome.disposition, SaveDisposition::OfflineFallback);

        let snapshot = HistorySnapshot::at(path).load();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot[0].html, "<html>new</html>");
        assert_eq!(snapshot[1].html, "<html>0</html>");
        assert_eq!(snapshot[3].html, "<html>2</html>");
    }

    #[tokio::test]
    async fn test_fallback_tone_for_remote_error_is_warning() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Fail).await;
        fx.session.sign_in_as_guest().await.unwrap();

        let outcome = fx
            .service
            .save_with_fallback(FormSpec::initial(), "<html></html>".to_string())
            .await;
        assert_eq!(outcome.disposition, SaveDisposition::RemoteErrorFallback);
        assert!(outcome.disposition.is_warning());
        assert!(outcome.record.owner_uid.is_none());
    }

    #[tokio::test]
    async fn test_load_history_without_identity_is_empty() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        assert!(fx.service.load_history().await.is_empty());
        assert_eq!(fx.store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_load_history_sorts_newest_first() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        fx.session.sign_in_as_guest().await.unwrap();

        let now = Utc::now();
        for (i, age_days) in [3i64, 1, 2].iter().enumerate() {
            fx.store.seed(
                "mock-guest",
                PageDocument {
                    page_id: format!("page-{}", i),
                    created_at: now - Duration::days(*age_days),
                    html_content: String::new(),
                    live_url: String::new(),
                    status: STATUS_PENDING.to_string(),
                    owner_uid: "mock-guest".to_string(),
                    data: FormSpec::initial(),
                },
            );
        }

        let records = fx.service.load_history().await;
        assert_eq!(records.len(), 3);
        assert!(records[0].timestamp > records[1].timestamp);
        assert!(records[1].timestamp > records[2].timestamp);
    }

    #[tokio::test]
    async fn test_load_history_degrades_to_empty_on_permission_denied() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::PermissionDenied).await;
        fx.session.sign_in_as_guest().await.unwrap();
        assert!(fx.service.load_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_current_history_falls_back_to_snapshot() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        // Offline saves populate only the snapshot
        fx.service
            .save_with_fallback(FormSpec::initial(), "<html>local</html>".to_string())
            .await;

        let records = fx.service.current_history().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].html, "<html>local</html>");
    }

    #[tokio::test]
    async fn test_fetch_shared_not_found() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        let err = fx
            .service
            .fetch_shared("someone", "missing-page")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_shared_requires_no_identity() {
        let fx = fixture(MockBehavior::Succeed, MockStoreBehavior::Succeed).await;
        fx.store.seed(
            "owner-1",
            PageDocument {
                page_id: "shared-page".to_string(),
                created_at: Utc::now(),
                html_content: "<html>shared</html>".to_string(),
                live_url: String::new(),
                status: STATUS_PENDING.to_string(),
                owner_uid: "owner-1".to_string(),
                data: FormSpec::initial(),
            },
        );

        let html = fx.service.fetch_shared("owner-1", "shared-page").await.unwrap();
        assert_eq!(html, "<html>shared</html>");
    }
}
