//! A monitoring session: one evaluator plus the operator's active thresholds.

use crate::error::CoreError;
use crate::monitoring::alert::AlertEvent;
use crate::monitoring::config::AlertThresholdConfig;
use crate::monitoring::evaluator::AlertEvaluator;
use crate::sensor::SensorSnapshot;
use crate::types::Timestamp;

/// Owns the evaluator and the active configuration for one session.
///
/// Independent sessions never share cooldown state.
#[derive(Debug, Default)]
pub struct MonitoringSession {
    evaluator: AlertEvaluator,
    config: AlertThresholdConfig,
}

impl MonitoringSession {
    /// Start a session with an already validated config.
    pub fn new(config: AlertThresholdConfig) -> Result<Self, CoreError> {
        Ok(Self {
            evaluator: AlertEvaluator::new(),
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &AlertThresholdConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    /// Replace the whole configuration. Takes effect on the next evaluation.
    ///
    /// Cooldown state is left untouched; an invalid config is rejected and
    /// the previous one stays active.
    pub fn replace_config(&mut self, config: AlertThresholdConfig) -> Result<(), CoreError> {
        let config = config.validated()?;
        if config != self.config {
            tracing::debug!(?config, "Alert thresholds replaced");
        }
        self.config = config;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = AlertThresholdConfig::default();
    }

    pub fn evaluate(&mut self, snapshot: &SensorSnapshot, now: Timestamp) -> Vec<AlertEvent> {
        self.evaluator.evaluate(snapshot, &self.config, now)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use crate::monitoring::alert::AlertKind;
    use crate::monitoring::config::Bounds;
    use crate::sensor::WaterLevel;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn acidic() -> SensorSnapshot {
        SensorSnapshot {
            ph: 4.8,
            ec: 1.8,
            water_level: WaterLevel::Ok,
            water_temp: 22.0,
            light_hours_today: 16.0,
            last_water_change: now() - Duration::days(1),
        }
    }

    #[test]
    fn identical_config_replace_keeps_cooldown() {
        let mut session = MonitoringSession::default();
        assert_eq!(session.evaluate(&acidic(), now()).len(), 1);

        session
            .replace_config(AlertThresholdConfig::default())
            .unwrap();

        let alerts = session.evaluate(&acidic(), now() + Duration::seconds(10));
        assert!(alerts.is_empty());
        assert_eq!(session.evaluator().cooldown().last_fired(AlertKind::Ph), Some(now()));
    }

    #[test]
    fn replaced_config_applies_on_next_evaluation() {
        let mut session = MonitoringSession::default();
        session
            .replace_config(AlertThresholdConfig {
                ph: Bounds::new(4.5, 7.0),
                ..Default::default()
            })
            .unwrap();

        assert!(session.evaluate(&acidic(), now()).is_empty());
    }

    #[test]
    fn invalid_replace_keeps_previous_config() {
        let mut session = MonitoringSession::default();
        let result = session.replace_config(AlertThresholdConfig {
            water_change_interval_days: 0,
            ..Default::default()
        });

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(session.config(), &AlertThresholdConfig::default());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = MonitoringSession::new(AlertThresholdConfig {
            ph: Bounds::new(8.0, 5.0),
            ..Default::default()
        });
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut session = MonitoringSession::default();
        session
            .replace_config(AlertThresholdConfig {
                water_change_interval_days: 14,
                ..Default::default()
            })
            .unwrap();
        session.reset_to_defaults();
        assert_eq!(session.config().water_change_interval_days, 7);
    }

    #[test]
    fn sessions_do_not_share_cooldowns() {
        let mut first = MonitoringSession::default();
        let mut second = MonitoringSession::default();
        assert_eq!(first.evaluate(&acidic(), now()).len(), 1);
        assert_eq!(second.evaluate(&acidic(), now()).len(), 1);
    }
}
