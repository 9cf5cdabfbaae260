//! Local history snapshot
//!
//! A single JSON file holding the most recent history records, read at
//! startup as crash/offline recovery and rewritten after every save attempt
//! regardless of remote outcome. Best-effort cache only; the remote store is
//! authoritative when reachable.

use std::fs;
use std::path::PathBuf;

use crate::data::HistoryRecord;
use crate::util::history_snapshot_path;

/// Maximum number of records retained locally
pub const SNAPSHOT_CAPACITY: usize = 20;

/// On-disk snapshot of recent history records
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    path: PathBuf,
}

impl HistorySnapshot {
    /// Snapshot at the default data-dir location
    pub fn open_default() -> Self {
        Self::at(history_snapshot_path())
    }

    /// Snapshot at an explicit path (used by tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the snapshot, returning an empty list if missing or corrupt
    pub fn load(&self) -> Vec<HistoryRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Persist the most recent `SNAPSHOT_CAPACITY` entries of `records`,
    /// overwriting the previous snapshot
    pub fn store(&self, records: &[HistoryRecord]) -> anyhow::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let capped = &records[..records.len().min(SNAPSHOT_CAPACITY)];
        let contents = serde_json::to_string_pretty(capped)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FormSpec;
    use tempfile::tempdir;

    fn record(n: usize) -> HistoryRecord {
        HistoryRecord::local(FormSpec::initial(), format!("<html>{}</html>", n))
    }

    #[test]
    fn test_load_missing_returns_empty() {
        let dir = tempdir().unwrap();
        let snapshot = HistorySnapshot::at(dir.path().join("history.json"));
        assert!(snapshot.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_returns_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        let snapshot = HistorySnapshot::at(path);
        assert!(snapshot.load().is_empty());
    }

    #[test]
    fn test_store_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let snapshot = HistorySnapshot::at(dir.path().join("nested").join("history.json"));
        let records: Vec<_> = (0..3).map(record).collect();

        snapshot.store(&records).unwrap();
        let loaded = snapshot.load();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_store_caps_at_capacity() {
        let dir = tempdir().unwrap();
        let snapshot = HistorySnapshot::at(dir.path().join("history.json"));
        let records: Vec<_> = (0..25).map(record).collect();

        snapshot.store(&records).unwrap();
        let loaded = snapshot.load();
        assert_eq!(loaded.len(), SNAPSHOT_CAPACITY);
        // Most recent entries win; order is preserved from the input slice
        assert_eq!(loaded[0], records[0]);
        assert_eq!(loaded[19], records[19]);
    }
}
