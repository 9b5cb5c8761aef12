//! Sampling loop: sample the sensors, evaluate, deliver.
//!
//! The session sits behind an `Arc<Mutex<_>>` so an operator-facing task
//! can replace the thresholds while the loop runs; the lock is held only
//! for the evaluation itself, which also serialises access to the cooldown
//! map.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use hydrogrow_core::error::CoreError;
use hydrogrow_core::monitoring::sink::{deliver, NotificationSink};
use hydrogrow_core::monitoring::{AlertEvent, AlertThresholdConfig, MonitoringSession};
use hydrogrow_core::telemetry::{SeriesSummary, TelemetrySeriesGenerator, TimePeriod};
use hydrogrow_core::types::Timestamp;

use crate::simulator::SensorSource;

/// Run one sample-evaluate-deliver cycle at `now` and return what fired.
pub async fn tick<S, N>(
    session: &Mutex<MonitoringSession>,
    source: &mut S,
    sink: &N,
    now: Timestamp,
) -> Vec<AlertEvent>
where
    S: SensorSource + ?Sized,
    N: NotificationSink + ?Sized,
{
    let snapshot = source.sample(now);
    let status = snapshot.status(now);

    tracing::debug!(
        ph = snapshot.ph,
        ec = snapshot.ec,
        water_temp = snapshot.water_temp,
        light_hours = snapshot.light_hours_today,
        ?status,
        "Sensor sample",
    );

    let events = {
        let mut session = session.lock().await;
        session.evaluate(&snapshot, now)
    };

    if !events.is_empty() {
        tracing::info!(count = events.len(), "Delivering alerts");
        deliver(&events, sink);
    }

    events
}

/// Run the sampling loop until `cancel` is triggered.
pub async fn run<S, N>(
    session: Arc<Mutex<MonitoringSession>>,
    mut source: S,
    sink: N,
    interval: Duration,
    cancel: CancellationToken,
) where
    S: SensorSource,
    N: NotificationSink,
{
    tracing::info!(interval_secs = interval.as_secs_f64(), "Sampling loop started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Sampling loop stopping");
                break;
            }
            _ = ticker.tick() => {
                tick(&session, &mut source, &sink, Utc::now()).await;
            }
        }
    }
}

/// Generate the configured history period and log its summary.
pub fn report_history(
    generator: &mut TelemetrySeriesGenerator,
    period: TimePeriod,
    now: Timestamp,
) -> Option<SeriesSummary> {
    let points = generator.generate(period, now);
    let summary = SeriesSummary::from_points(&points);

    match &summary {
        Some(s) => tracing::info!(
            period = %period,
            label = period.label(),
            points = s.points,
            ph_mean = s.ph.mean,
            ec_mean = s.ec.mean,
            water_temp_mean = s.water_temp.mean,
            "History summary",
        ),
        None => tracing::warn!(period = %period, "History series is empty"),
    }

    summary
}

/// Replace the thresholds of a running session.
pub async fn replace_thresholds(
    session: &Mutex<MonitoringSession>,
    config: AlertThresholdConfig,
) -> Result<(), CoreError> {
    session.lock().await.replace_config(config)
}
