//! Integration tests for the sampling loop and threshold file loading.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use hydrogrow_core::monitoring::config::Bounds;
use hydrogrow_core::monitoring::{AlertKind, AlertThresholdConfig, MonitoringSession, Severity};
use hydrogrow_core::sensor::{SensorSnapshot, WaterLevel};
use hydrogrow_core::telemetry::{TelemetrySeriesGenerator, TimePeriod};
use hydrogrow_core::types::Timestamp;
use hydrogrow_monitor::config::{load_thresholds_file, ConfigError};
use hydrogrow_monitor::notifier::NotificationHub;
use hydrogrow_monitor::runner;
use hydrogrow_monitor::simulator::SensorSource;

/// Always reports the same reservoir state.
struct FixedSource(SensorSnapshot);

impl SensorSource for FixedSource {
    fn sample(&mut self, _now: Timestamp) -> SensorSnapshot {
        self.0.clone()
    }
}

fn acidic() -> SensorSnapshot {
    SensorSnapshot {
        ph: 4.8,
        ec: 1.8,
        water_level: WaterLevel::Ok,
        water_temp: 22.0,
        light_hours_today: 16.0,
        last_water_change: Utc::now() - chrono::Duration::days(1),
    }
}

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Test: single cycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tick_delivers_fired_alerts_to_sink() {
    let session = Mutex::new(MonitoringSession::default());
    let hub = NotificationHub::default();
    let mut rx = hub.subscribe();
    let mut source = FixedSource(acidic());

    let events = runner::tick(&session, &mut source, &hub, t0()).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AlertKind::Ph);

    let notification = rx.recv().await.expect("notification delivered");
    assert_eq!(notification.title, "pH alert");
    assert_eq!(notification.severity, Severity::Critical);
    assert!(notification.description.contains("4.8"));

    // Within the cooldown nothing reaches the sink.
    let events = runner::tick(&session, &mut source, &hub, t0() + chrono::Duration::seconds(5)).await;
    assert!(events.is_empty());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn replaced_thresholds_apply_to_next_tick() {
    let session = Mutex::new(MonitoringSession::default());
    let hub = NotificationHub::default();
    let mut source = FixedSource(acidic());

    runner::replace_thresholds(
        &session,
        AlertThresholdConfig {
            ph: Bounds::new(4.5, 7.0),
            ..Default::default()
        },
    )
    .await
    .expect("valid thresholds");

    let events = runner::tick(&session, &mut source, &hub, t0()).await;
    assert!(events.is_empty());
}

// ---------------------------------------------------------------------------
// Test: loop lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_loop_notifies_once_and_stops_on_cancel() {
    let session = Arc::new(Mutex::new(MonitoringSession::default()));
    let hub = Arc::new(NotificationHub::default());
    let mut rx = hub.subscribe();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(runner::run(
        Arc::clone(&session),
        FixedSource(acidic()),
        Arc::clone(&hub),
        Duration::from_millis(10),
        cancel.clone(),
    ));

    let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("alert within timeout")
        .expect("channel open");
    assert_eq!(first.title, "pH alert");

    // Several more ticks elapse; the 30s cooldown keeps them quiet.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err());

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop stops after cancel")
        .expect("loop task did not panic");
}

// ---------------------------------------------------------------------------
// Test: history report
// ---------------------------------------------------------------------------

#[test]
fn history_report_summarises_requested_period() {
    let mut generator = TelemetrySeriesGenerator::seeded(4);
    let summary = runner::report_history(&mut generator, TimePeriod::Week, t0())
        .expect("non-empty series");
    assert_eq!(summary.points, 28);
    assert!(summary.ph.min >= 5.0 && summary.ph.max <= 7.5);
    assert!(summary.water_temp.min >= 18.0 && summary.water_temp.max <= 28.0);
}

// ---------------------------------------------------------------------------
// Test: threshold file
// ---------------------------------------------------------------------------

#[test]
fn loads_threshold_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "ph": {{"min": 5.5, "max": 6.5}},
            "ec": {{"min": 1.0, "max": 2.2}},
            "lightHours": {{"target": 14, "tolerance": 1}},
            "waterChangeIntervalDays": 10
        }}"#
    )
    .unwrap();

    let config = load_thresholds_file(file.path()).unwrap();
    assert_eq!(config.ph, Bounds::new(5.5, 6.5));
    assert_eq!(config.water_change_interval_days, 10);
}

#[test]
fn rejects_threshold_file_with_inverted_range() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "ph": {{"min": 7.0, "max": 5.0}},
            "ec": {{"min": 1.0, "max": 2.2}},
            "lightHours": {{"target": 14, "tolerance": 1}},
            "waterChangeIntervalDays": 10
        }}"#
    )
    .unwrap();

    assert_matches!(load_thresholds_file(file.path()), Err(ConfigError::Core(_)));
}

#[test]
fn rejects_malformed_threshold_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    assert_matches!(load_thresholds_file(file.path()), Err(ConfigError::Json { .. }));
}
