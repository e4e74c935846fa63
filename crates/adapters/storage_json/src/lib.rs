//! # greenhouse-adapter-storage-json
//!
//! JSON file storage adapter: implements the `HistoryStore` port.
//!
//! ## Responsibilities
//! - Overwrite the current-state file with the latest snapshot
//! - Append every snapshot to the history file
//! - Recover from a missing or corrupt history file
//!
//! ## Dependency rule
//! Same as other adapters: depends on `greenhouse-app` and `greenhouse-domain`.

pub mod config;
pub mod error;
pub mod store;

pub use config::StorageConfig;
pub use error::StorageError;
pub use store::JsonHistoryStore;
