//! Named look-back windows for historical queries.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A look-back window. Each maps to a fixed sample interval and point count
/// so the series covers exactly the named span ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 3] = [TimePeriod::Day, TimePeriod::Week, TimePeriod::Month];

    /// Minutes between consecutive samples.
    pub fn interval_minutes(self) -> i64 {
        match self {
            TimePeriod::Day => 30,
            TimePeriod::Week => 360,
            TimePeriod::Month => 1440,
        }
    }

    pub fn point_count(self) -> usize {
        match self {
            TimePeriod::Day => 48,
            TimePeriod::Week => 28,
            TimePeriod::Month => 30,
        }
    }

    pub fn interval(self) -> Duration {
        Duration::minutes(self.interval_minutes())
    }

    /// Total coverage: `point_count` samples of `interval` each.
    pub fn span(self) -> Duration {
        Duration::minutes(self.interval_minutes() * self.point_count() as i64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::Day => "24h",
            TimePeriod::Week => "7d",
            TimePeriod::Month => "30d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::Day => "Last 24 hours",
            TimePeriod::Week => "Last 7 days",
            TimePeriod::Month => "Last 30 days",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "24h" => Ok(TimePeriod::Day),
            "7d" => Ok(TimePeriod::Week),
            "30d" => Ok(TimePeriod::Month),
            other => Err(CoreError::Validation(format!(
                "unknown time period '{other}', expected one of 24h, 7d, 30d"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
