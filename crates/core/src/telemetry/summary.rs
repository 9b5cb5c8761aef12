//! Aggregate statistics over a generated series.

use serde::Serialize;

use crate::telemetry::generator::HistoricalDataPoint;
use crate::time_util::round_one_decimal;

/// Mean, minimum and maximum of one metric. The mean is rounded to one
/// decimal like the readings themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        (count > 0).then(|| Self {
            mean: round_one_decimal(sum / count as f64),
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub points: usize,
    pub ph: MetricStats,
    pub ec: MetricStats,
    pub water_temp: MetricStats,
}

impl SeriesSummary {
    /// Summarise a series; `None` when it is empty.
    pub fn from_points(points: &[HistoricalDataPoint]) -> Option<Self> {
        Some(Self {
            points: points.len(),
            ph: MetricStats::from_values(points.iter().map(|p| p.ph))?,
            ec: MetricStats::from_values(points.iter().map(|p| p.ec))?,
            water_temp: MetricStats::from_values(points.iter().map(|p| p.water_temp))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn point(ph: f64, ec: f64, water_temp: f64) -> HistoricalDataPoint {
        HistoricalDataPoint {
            timestamp: Utc::now(),
            ph,
            ec,
            water_temp,
        }
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(SeriesSummary::from_points(&[]).is_none());
    }

    #[test]
    fn computes_mean_min_max() {
        let points = [
            point(6.0, 1.2, 20.0),
            point(6.3, 1.8, 24.0),
            point(5.8, 1.5, 22.5),
        ];

        let summary = SeriesSummary::from_points(&points).unwrap();
        assert_eq!(summary.points, 3);
        assert_eq!(summary.ph.mean, 6.0);
        assert_eq!(summary.ph.min, 5.8);
        assert_eq!(summary.ph.max, 6.3);
        assert_eq!(summary.ec.mean, 1.5);
        assert_eq!(summary.water_temp.mean, 22.2);
        assert_eq!(summary.water_temp.max, 24.0);
    }
}
