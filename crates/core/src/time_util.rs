//! Small numeric and calendar helpers shared by the monitoring and
//! telemetry modules.

use crate::types::Timestamp;

/// Whole days elapsed between `since` and `now`.
///
/// Truncates toward zero, so 6 days 23 hours counts as 6. A `since` in the
/// future yields zero or a negative count.
pub fn days_since(since: Timestamp, now: Timestamp) -> i64 {
    now.signed_duration_since(since).num_days()
}

/// Round to one decimal place, the precision used for every displayed reading.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
