//! `hydrogrow-monitor` -- reservoir monitoring daemon.
//!
//! Samples the (simulated) reservoir sensors on a fixed cadence, evaluates
//! them against the alert thresholds and raises notifications. Logs a
//! summary of the recent history at startup.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default | Description                              |
//! |------------------------|----------|---------|------------------------------------------|
//! | `SAMPLE_INTERVAL_SECS` | no       | `5`     | Seconds between sensor samples           |
//! | `ALERT_CONFIG_PATH`    | no       | --      | JSON file with alert thresholds          |
//! | `SENSOR_SEED`          | no       | --      | Fixed seed for the sensor simulator      |
//! | `HISTORY_PERIOD`       | no       | `24h`   | Startup history report: `24h`/`7d`/`30d` |

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hydrogrow_core::monitoring::MonitoringSession;
use hydrogrow_core::telemetry::TelemetrySeriesGenerator;
use hydrogrow_monitor::config::MonitorConfig;
use hydrogrow_monitor::notifier::{FanoutSink, NotificationHub, TracingSink};
use hydrogrow_monitor::runner;
use hydrogrow_monitor::simulator::SensorSimulator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hydrogrow_monitor=info,hydrogrow_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MonitorConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid monitor configuration");
        std::process::exit(1);
    });

    let thresholds = config.load_thresholds().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load alert thresholds");
        std::process::exit(1);
    });

    let session = MonitoringSession::new(thresholds).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Alert thresholds rejected");
        std::process::exit(1);
    });

    tracing::info!(
        interval_secs = config.sample_interval.as_secs(),
        thresholds = ?session.config(),
        seeded = config.sensor_seed.is_some(),
        "Starting hydrogrow-monitor",
    );

    let now = Utc::now();
    let mut history = TelemetrySeriesGenerator::new();
    runner::report_history(&mut history, config.history_period, now);

    let source = match config.sensor_seed {
        Some(seed) => SensorSimulator::seeded(seed, now),
        None => SensorSimulator::new(now),
    };

    let hub = Arc::new(NotificationHub::default());
    let sink = FanoutSink::new().with(TracingSink).with(Arc::clone(&hub));

    let session = Arc::new(Mutex::new(session));
    let cancel = CancellationToken::new();

    let loop_handle = tokio::spawn(runner::run(
        Arc::clone(&session),
        source,
        sink,
        config.sample_interval,
        cancel.clone(),
    ));

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown requested");
    cancel.cancel();

    if let Err(e) = loop_handle.await {
        tracing::error!(error = %e, "Sampling loop terminated abnormally");
    }
}
