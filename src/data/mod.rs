//! Data models and local persistence

pub mod models;
pub mod snapshot;

pub use models::{
    ColorTheme, FormSpec, HeroLayout, HistoryRecord, Identity, OFFLINE_UID_PREFIX,
};
pub use snapshot::{HistorySnapshot, SNAPSHOT_CAPACITY};
