//! Simulated sensor source.
//!
//! No probes are wired up yet, so [`SensorSimulator`] random-walks a
//! plausible reservoir: readings drift a little every sample, the light
//! counter climbs, and the float switch occasionally reports a low level.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hydrogrow_core::sensor::{SensorSnapshot, WaterLevel};
use hydrogrow_core::types::Timestamp;

/// Anything that can produce a snapshot on demand.
pub trait SensorSource: Send {
    fn sample(&mut self, now: Timestamp) -> SensorSnapshot;
}

const PH_STEP: f64 = 0.1;
const PH_LIMITS: (f64, f64) = (4.5, 8.0);
const EC_STEP: f64 = 0.05;
const EC_LIMITS: (f64, f64) = (0.5, 3.5);
const WATER_TEMP_STEP: f64 = 0.1;
const WATER_TEMP_LIMITS: (f64, f64) = (18.0, 28.0);
const LIGHT_HOURS_STEP: f64 = 0.1;
const LIGHT_HOURS_LIMITS: (f64, f64) = (0.0, 24.0);
/// Chance per sample that the float switch reads low.
const LOW_WATER_PROBABILITY: f64 = 0.05;

/// Random-walk reservoir simulation.
#[derive(Debug, Clone)]
pub struct SensorSimulator<R = StdRng> {
    rng: R,
    state: SensorSnapshot,
}

impl SensorSimulator<StdRng> {
    pub fn new(start: Timestamp) -> Self {
        Self::with_rng(StdRng::from_os_rng(), start)
    }

    pub fn seeded(seed: u64, start: Timestamp) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), start)
    }
}

impl<R: Rng> SensorSimulator<R> {
    /// Start from a freshly balanced reservoir changed three days before `start`.
    pub fn with_rng(rng: R, start: Timestamp) -> Self {
        Self {
            rng,
            state: SensorSnapshot {
                ph: 6.2,
                ec: 1.8,
                water_level: WaterLevel::Ok,
                water_temp: 22.5,
                light_hours_today: 8.5,
                last_water_change: start - Duration::days(3),
            },
        }
    }

    pub fn current(&self) -> &SensorSnapshot {
        &self.state
    }

    /// Record a full reservoir change.
    pub fn record_water_change(&mut self, at: Timestamp) {
        self.state.last_water_change = at;
        self.state.water_level = WaterLevel::Ok;
    }

    fn drift(&mut self, value: f64, step: f64, (lo, hi): (f64, f64)) -> f64 {
        (value + self.rng.random_range(-step..step)).clamp(lo, hi)
    }

    fn step(&mut self) {
        self.state.ph = self.drift(self.state.ph, PH_STEP, PH_LIMITS);
        self.state.ec = self.drift(self.state.ec, EC_STEP, EC_LIMITS);
        self.state.water_temp =
            self.drift(self.state.water_temp, WATER_TEMP_STEP, WATER_TEMP_LIMITS);
        self.state.light_hours_today = (self.state.light_hours_today + LIGHT_HOURS_STEP)
            .clamp(LIGHT_HOURS_LIMITS.0, LIGHT_HOURS_LIMITS.1);
        self.state.water_level = if self.rng.random_bool(LOW_WATER_PROBABILITY) {
            WaterLevel::Low
        } else {
            WaterLevel::Ok
        };
    }
}

impl<R: Rng + Send> SensorSource for SensorSimulator<R> {
    fn sample(&mut self, _now: Timestamp) -> SensorSnapshot {
        self.step();
        self.state.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn starts_from_balanced_reservoir() {
        let sim = SensorSimulator::seeded(1, start());
        let s = sim.current();
        assert_eq!(s.ph, 6.2);
        assert_eq!(s.water_level, WaterLevel::Ok);
        assert_eq!(s.last_water_change, start() - Duration::days(3));
    }

    #[test]
    fn readings_stay_within_walk_limits() {
        let mut sim = SensorSimulator::seeded(7, start());
        for _ in 0..2_000 {
            let s = sim.sample(start());
            assert!((4.5..=8.0).contains(&s.ph));
            assert!((0.5..=3.5).contains(&s.ec));
            assert!((18.0..=28.0).contains(&s.water_temp));
            assert!((0.0..=24.0).contains(&s.light_hours_today));
        }
    }

    #[test]
    fn steps_are_small() {
        let mut sim = SensorSimulator::seeded(11, start());
        let mut prev = sim.current().clone();
        for _ in 0..100 {
            let next = sim.sample(start());
            assert!((next.ph - prev.ph).abs() <= PH_STEP + 1e-9);
            assert!((next.ec - prev.ec).abs() <= EC_STEP + 1e-9);
            prev = next;
        }
    }

    #[test]
    fn light_counter_climbs_and_saturates() {
        let mut sim = SensorSimulator::seeded(3, start());
        let first = sim.sample(start()).light_hours_today;
        assert!((first - 8.6).abs() < 1e-9);
        for _ in 0..500 {
            sim.sample(start());
        }
        assert_eq!(sim.current().light_hours_today, 24.0);
    }

    #[test]
    fn same_seed_same_walk() {
        let mut a = SensorSimulator::seeded(5, start());
        let mut b = SensorSimulator::seeded(5, start());
        for _ in 0..20 {
            assert_eq!(a.sample(start()), b.sample(start()));
        }
    }

    #[test]
    fn water_change_resets_level_and_date() {
        let mut sim = SensorSimulator::seeded(5, start());
        sim.record_water_change(start());
        assert_eq!(sim.current().last_water_change, start());
        assert_eq!(sim.current().water_level, WaterLevel::Ok);
    }
}
