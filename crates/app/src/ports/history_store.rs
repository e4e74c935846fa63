//! History store port: durable record of every control cycle.

use std::future::Future;

use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::history::HistoryEntry;

/// Persists one [`HistoryEntry`] per control cycle.
pub trait HistoryStore: Send + Sync {
    /// Replace the current-state snapshot with `entry` and append it to the
    /// history.
    fn record(
        &self,
        entry: HistoryEntry,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send;
}

impl<T: HistoryStore> HistoryStore for std::sync::Arc<T> {
    fn record(
        &self,
        entry: HistoryEntry,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send {
        (**self).record(entry)
    }
}
