//! Time and timestamp helpers.

use chrono::{DateTime, Local, Utc};

/// UTC timestamp attached to history entries.
pub type Timestamp = DateTime<Utc>;

/// Layout used in the persisted artifacts (`2024-05-01 13:45:00`).
pub const ARTIFACT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp in the gateway's local time zone using
/// [`ARTIFACT_FORMAT`].
#[must_use]
pub fn format_local(ts: Timestamp) -> String {
    ts.with_timezone(&Local).format(ARTIFACT_FORMAT).to_string()
}
