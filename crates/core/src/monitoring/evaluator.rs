//! Threshold evaluation engine for reservoir readings.
//!
//! Pure logic, no I/O. The caller is responsible for sampling the sensors,
//! supplying the clock and delivering the returned events.

use crate::monitoring::alert::{AlertEvent, AlertKind, Deviation};
use crate::monitoring::config::AlertThresholdConfig;
use crate::monitoring::cooldown::CooldownState;
use crate::sensor::{SensorSnapshot, WaterLevel};
use crate::time_util::days_since;
use crate::types::Timestamp;

/// Stateful evaluator for one monitoring session.
///
/// Owns the cooldown map exclusively. When evaluations can overlap, share
/// the evaluator behind a mutex (e.g. `Arc<Mutex<AlertEvaluator>>`) so two
/// callers cannot both observe a quiet kind and double-fire.
#[derive(Debug, Default)]
pub struct AlertEvaluator {
    cooldown: CooldownState,
}

impl AlertEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cooldown(cooldown: CooldownState) -> Self {
        Self { cooldown }
    }

    pub fn cooldown(&self) -> &CooldownState {
        &self.cooldown
    }

    /// Evaluate a snapshot against `config` and return the alerts that fire now.
    ///
    /// All five conditions are checked on every call. Each true condition is
    /// gated by its own cooldown; NaN readings count as out of range.
    pub fn evaluate(
        &mut self,
        snapshot: &SensorSnapshot,
        config: &AlertThresholdConfig,
        now: Timestamp,
    ) -> Vec<AlertEvent> {
        let mut alerts = Vec::new();

        for kind in AlertKind::ALL {
            let Some(message) = violation_message(kind, snapshot, config, now) else {
                continue;
            };

            if !self.cooldown.should_fire(kind, now) {
                tracing::debug!(kind = %kind, "Alert suppressed by cooldown");
                continue;
            }

            alerts.push(AlertEvent::critical(kind, message));
        }

        alerts
    }
}

/// Describe the violation for `kind`, or `None` when the reading is in bounds.
fn violation_message(
    kind: AlertKind,
    snapshot: &SensorSnapshot,
    config: &AlertThresholdConfig,
    now: Timestamp,
) -> Option<String> {
    match kind {
        AlertKind::Ph => config.ph.excludes(snapshot.ph).then(|| {
            format!(
                "Current pH is {:.1}, outside {:.1}-{:.1}. Adjust the solution urgently.",
                snapshot.ph, config.ph.min, config.ph.max
            )
        }),
        AlertKind::Ec => config.ec.excludes(snapshot.ec).then(|| {
            let qualifier = match Deviation::of(snapshot.ec, config.ec.min, config.ec.max) {
                Deviation::Low => "too low",
                Deviation::High => "too high",
                Deviation::Invalid => "not a valid reading",
            };
            format!(
                "Current EC is {:.1} mS/cm, {qualifier}. Check the nutrient concentration.",
                snapshot.ec
            )
        }),
        AlertKind::WaterLevel => (snapshot.water_level == WaterLevel::Low).then(|| {
            "The nutrient solution level is low. Refill the reservoir.".to_string()
        }),
        AlertKind::WaterChange => {
            let days = days_since(snapshot.last_water_change, now);
            (days >= config.water_change_interval_days).then(|| {
                format!("{days} days since the last water change. Replace the nutrient solution.")
            })
        }
        AlertKind::LightHours => {
            let target = config.light_hours.target;
            let hours = snapshot.light_hours_today;
            let within = (hours - target).abs() <= config.light_hours.tolerance;
            (!within).then(|| {
                let qualifier = if hours.is_nan() {
                    "not a valid reading"
                } else if hours > target {
                    "too high, lights stayed on too long"
                } else {
                    "too low, lights stayed off too long"
                };
                format!(
                    "Light exposure is {hours:.1}h against a {target:.1}h target, {qualifier}. Check the timer."
                )
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
