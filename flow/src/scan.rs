//! Camera scan debounce
//!
//! A camera keeps reporting the same code while it stays in frame. Scans
//! closer together than the debounce window after the last accepted one are
//! dropped; dropped scans do not extend the window.

use chrono::{DateTime, TimeDelta, Utc};

/// Whether a scan at `now` clears the debounce window
#[must_use]
pub fn clears_debounce(
    last_accepted: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    debounce: TimeDelta,
) -> bool {
    last_accepted.is_none_or(|last| now - last >= debounce)
}
