//! Utility modules

pub mod paths;
pub mod slug;

pub use paths::{
    config_path, data_dir, history_snapshot_path, init_data_dir, log_file_path, logs_dir,
};
pub use slug::{generate_page_id, slugify, DEFAULT_SLUG};
