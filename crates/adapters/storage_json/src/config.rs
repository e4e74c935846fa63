//! Storage configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::StorageError;
use crate::store::JsonHistoryStore;

/// Location of the persisted artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding both files, created when missing.
    pub data_dir: PathBuf,
    /// File name of the current-state snapshot.
    pub current_state_file: String,
    /// File name of the history array.
    pub history_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            current_state_file: "estado.json".to_string(),
            history_file: "registros.json".to_string(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn current_state_path(&self) -> PathBuf {
        self.data_dir.join(&self.current_state_file)
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    /// Create the data directory and build the store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created.
    pub async fn build(self) -> Result<JsonHistoryStore, StorageError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        Ok(JsonHistoryStore::new(
            self.current_state_path(),
            self.history_path(),
        ))
    }
}
