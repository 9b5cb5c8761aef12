//! Sensor snapshot types and the dashboard status rules applied to them.

use serde::{Deserialize, Serialize};

use crate::time_util::days_since;
use crate::types::Timestamp;

/// Reservoir level as reported by the float switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaterLevel {
    Ok,
    Low,
}

/// One reading of every monitored value, supplied by the sampling loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub ph: f64,
    /// Electrical conductivity in mS/cm.
    pub ec: f64,
    pub water_level: WaterLevel,
    /// Reservoir temperature in degrees Celsius.
    pub water_temp: f64,
    pub light_hours_today: f64,
    pub last_water_change: Timestamp,
}

/// Traffic-light status shown next to each reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Optimal,
    Warning,
    Danger,
}

/// Optimal pH band for leafy greens.
pub const PH_OPTIMAL: (f64, f64) = (5.8, 6.8);
pub const PH_ACCEPTABLE: (f64, f64) = (5.5, 7.2);

pub const EC_OPTIMAL: (f64, f64) = (1.2, 2.0);
pub const EC_ACCEPTABLE: (f64, f64) = (0.8, 2.5);

pub const WATER_TEMP_OPTIMAL: (f64, f64) = (20.0, 25.0);

/// Days after a water change before the reservoir is considered stale.
pub const WATER_CHANGE_FRESH_DAYS: i64 = 7;
pub const WATER_CHANGE_STALE_DAYS: i64 = 14;

fn within(value: f64, (lo, hi): (f64, f64)) -> bool {
    (lo..=hi).contains(&value)
}

fn banded(value: f64, optimal: (f64, f64), acceptable: (f64, f64)) -> MetricStatus {
    if within(value, optimal) {
        MetricStatus::Optimal
    } else if within(value, acceptable) {
        MetricStatus::Warning
    } else {
        MetricStatus::Danger
    }
}

pub fn ph_status(ph: f64) -> MetricStatus {
    banded(ph, PH_OPTIMAL, PH_ACCEPTABLE)
}

pub fn ec_status(ec: f64) -> MetricStatus {
    banded(ec, EC_OPTIMAL, EC_ACCEPTABLE)
}

/// Water temperature never escalates past `Warning`.
pub fn water_temp_status(temp: f64) -> MetricStatus {
    if within(temp, WATER_TEMP_OPTIMAL) {
        MetricStatus::Optimal
    } else {
        MetricStatus::Warning
    }
}

pub fn water_level_status(level: WaterLevel) -> MetricStatus {
    match level {
        WaterLevel::Ok => MetricStatus::Optimal,
        WaterLevel::Low => MetricStatus::Danger,
    }
}

pub fn water_change_status(days: i64) -> MetricStatus {
    if days <= WATER_CHANGE_FRESH_DAYS {
        MetricStatus::Optimal
    } else if days <= WATER_CHANGE_STALE_DAYS {
        MetricStatus::Warning
    } else {
        MetricStatus::Danger
    }
}

/// Per-reading statuses for a whole snapshot, as rendered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotStatus {
    pub ph: MetricStatus,
    pub ec: MetricStatus,
    pub water_temp: MetricStatus,
    pub water_level: MetricStatus,
    pub water_change: MetricStatus,
    pub days_since_water_change: i64,
}

impl SensorSnapshot {
    /// Classify every reading of this snapshot as of `now`.
    pub fn status(&self, now: Timestamp) -> SnapshotStatus {
        let days = days_since(self.last_water_change, now);
        SnapshotStatus {
            ph: ph_status(self.ph),
            ec: ec_status(self.ec),
            water_temp: water_temp_status(self.water_temp),
            water_level: water_level_status(self.water_level),
            water_change: water_change_status(days),
            days_since_water_change: days,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
