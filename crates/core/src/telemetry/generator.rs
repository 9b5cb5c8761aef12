//! Synthetic telemetry series.
//!
//! Each reading is a deterministic daily (or nutrient-cycle) base plus a
//! bounded jitter, clamped to physically plausible ranges and rounded to one
//! decimal. The random source is injected so tests can seed it.

use std::f64::consts::PI;

use chrono::{FixedOffset, Offset, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::telemetry::period::TimePeriod;
use crate::time_util::round_one_decimal;
use crate::types::Timestamp;

/// Plausible physical ranges the series never leaves.
pub const PH_RANGE: (f64, f64) = (5.0, 7.5);
pub const EC_RANGE: (f64, f64) = (0.8, 2.8);
pub const WATER_TEMP_RANGE: (f64, f64) = (18.0, 28.0);

const PH_BASE: f64 = 6.0;
const PH_SWING: f64 = 0.3;
const PH_JITTER: f64 = 0.2;

/// EC right after a nutrient top-up, and its daily depletion.
const EC_FRESH: f64 = 1.8;
const EC_DEPLETION_PER_DAY: f64 = 0.2;
const EC_JITTER: f64 = 0.15;
/// Nutrients are topped up every four days.
const NUTRIENT_CYCLE_DAYS: f64 = 4.0;

const WATER_TEMP_BASE: f64 = 22.0;
const WATER_TEMP_SWING: f64 = 3.0;
const WATER_TEMP_JITTER: f64 = 1.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// One generated sample. Series are ordered by ascending timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataPoint {
    pub timestamp: Timestamp,
    pub ph: f64,
    pub ec: f64,
    pub water_temp: f64,
}

/// Generate a series for `period` ending at `now`, with the time-of-day
/// cycle taken in UTC.
pub fn generate<R: Rng>(
    period: TimePeriod,
    now: Timestamp,
    rng: &mut R,
) -> Vec<HistoricalDataPoint> {
    generate_series(period, now, Utc.fix(), rng)
}

fn generate_series<R: Rng>(
    period: TimePeriod,
    now: Timestamp,
    offset: FixedOffset,
    rng: &mut R,
) -> Vec<HistoricalDataPoint> {
    let count = period.point_count();
    let interval = period.interval();

    (0..count)
        .rev()
        .map(|i| {
            let timestamp = now - interval * i as i32;
            sample_at(timestamp, now, offset, &mut *rng)
        })
        .collect()
}

fn sample_at<R: Rng>(
    timestamp: Timestamp,
    now: Timestamp,
    offset: FixedOffset,
    rng: &mut R,
) -> HistoricalDataPoint {
    let hour = f64::from(timestamp.with_timezone(&offset).hour());
    let daily = (hour * PI / 12.0).sin();

    let ph = PH_BASE + PH_SWING * daily + jitter(rng, PH_JITTER);

    let days_back =
        now.signed_duration_since(timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let cycle_day = days_back % NUTRIENT_CYCLE_DAYS;
    let ec = EC_FRESH - EC_DEPLETION_PER_DAY * cycle_day + jitter(rng, EC_JITTER);

    let water_temp = WATER_TEMP_BASE + WATER_TEMP_SWING * daily + jitter(rng, WATER_TEMP_JITTER);

    HistoricalDataPoint {
        timestamp,
        ph: settle(ph, PH_RANGE),
        ec: settle(ec, EC_RANGE),
        water_temp: settle(water_temp, WATER_TEMP_RANGE),
    }
}

/// Uniform noise in `[-amplitude, amplitude)`.
fn jitter<R: Rng>(rng: &mut R, amplitude: f64) -> f64 {
    rng.random_range(-amplitude..amplitude)
}

/// Clamp into range, then round to display precision. The range ends are
/// themselves one-decimal values, so rounding cannot leave the range.
fn settle(value: f64, (lo, hi): (f64, f64)) -> f64 {
    round_one_decimal(value.clamp(lo, hi))
}

/// Series generator with an owned random source and display time zone.
///
/// Holds no state between calls other than the random source; every
/// [`generate`](Self::generate) call yields a fresh, independent series.
#[derive(Debug, Clone)]
pub struct TelemetrySeriesGenerator<R = StdRng> {
    rng: R,
    offset: FixedOffset,
}

impl TelemetrySeriesGenerator<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible generator: the same seed, period and `now` always
    /// produce the same series.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for TelemetrySeriesGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TelemetrySeriesGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            offset: Utc.fix(),
        }
    }

    /// Evaluate the daily cycle in this local offset instead of UTC.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn generate(&mut self, period: TimePeriod, now: Timestamp) -> Vec<HistoricalDataPoint> {
        generate_series(period, now, self.offset, &mut self.rng)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
