//! Sensor calibration freshness.
//!
//! pH and EC probes drift; the dashboard nags once a calibration is more
//! than a week old and escalates after two.

use serde::Serialize;

use crate::time_util::days_since;
use crate::types::Timestamp;

const RECENT_DAYS: i64 = 7;
const DUE_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    Recent,
    DueSoon,
    Overdue,
}

impl CalibrationStatus {
    pub fn from_days(days: i64) -> Self {
        if days <= RECENT_DAYS {
            Self::Recent
        } else if days <= DUE_DAYS {
            Self::DueSoon
        } else {
            Self::Overdue
        }
    }

    /// Whether the pH and EC probes should be re-checked.
    pub fn needs_attention(self) -> bool {
        self != Self::Recent
    }
}

pub fn calibration_status(last_calibrated: Timestamp, now: Timestamp) -> CalibrationStatus {
    CalibrationStatus::from_days(days_since(last_calibrated, now))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn boundaries() {
        assert_eq!(CalibrationStatus::from_days(0), CalibrationStatus::Recent);
        assert_eq!(CalibrationStatus::from_days(7), CalibrationStatus::Recent);
        assert_eq!(CalibrationStatus::from_days(8), CalibrationStatus::DueSoon);
        assert_eq!(CalibrationStatus::from_days(14), CalibrationStatus::DueSoon);
        assert_eq!(CalibrationStatus::from_days(15), CalibrationStatus::Overdue);
    }

    #[test]
    fn five_days_ago_is_recent() {
        let now = Utc::now();
        let status = calibration_status(now - Duration::days(5), now);
        assert_eq!(status, CalibrationStatus::Recent);
        assert!(!status.needs_attention());
    }

    #[test]
    fn overdue_needs_attention() {
        assert!(CalibrationStatus::Overdue.needs_attention());
    }
}
