//! History store writing two human-readable JSON files.
//!
//! - the current-state file holds the latest entry as a single object
//! - the history file holds every entry as one array
//!
//! Each file is written to a sibling temporary file first and renamed into
//! place, so a crash never leaves a truncated file behind.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use greenhouse_app::ports::HistoryStore;
use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::history::HistoryEntry;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StorageError;

pub struct JsonHistoryStore {
    current_path: PathBuf,
    history_path: PathBuf,
    // serializes the read-modify-write of the history file
    write_lock: Mutex<()>,
}

impl JsonHistoryStore {
    #[must_use]
    pub fn new(current_path: PathBuf, history_path: PathBuf) -> Self {
        Self {
            current_path,
            history_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Every persisted entry. A missing, unreadable or malformed history
    /// file reads as empty.
    pub async fn history(&self) -> Vec<Value> {
        let raw = match tokio::fs::read_to_string(&self.history_path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.history_path.display(), %err, "history unreadable, starting over");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::warn!(path = %self.history_path.display(), "history is not an array, starting over");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(path = %self.history_path.display(), %err, "history corrupt, starting over");
                Vec::new()
            }
        }
    }

    async fn record_entry(&self, entry: &HistoryEntry) -> Result<(), StorageError> {
        let value = serde_json::to_value(entry)?;
        let _guard = self.write_lock.lock().await;

        write_atomically(&self.current_path, &serde_json::to_vec_pretty(&value)?).await?;

        let mut history = self.history().await;
        history.push(value);
        write_atomically(&self.history_path, &serde_json::to_vec_pretty(&history)?).await?;

        tracing::debug!(entries = history.len(), "history entry persisted");
        Ok(())
    }
}

async fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

impl HistoryStore for JsonHistoryStore {
    fn record(
        &self,
        entry: HistoryEntry,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
        async move {
            self.record_entry(&entry)
                .await
                .map_err(StorageError::into_domain)
        }
    }
}
