//! Wall-clock timestamps for load snapshots.
//!
//! Timer deadlines never use these; they run on the monotonic tokio clock.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a load's level last changed.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
