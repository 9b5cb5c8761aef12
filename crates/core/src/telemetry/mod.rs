//! Synthetic historical telemetry for charts and period statistics.
//!
//! Stands in for a real time-series store: each call produces a fresh,
//! finite series ending at the supplied `now`.

pub mod generator;
pub mod period;
pub mod summary;

pub use generator::{generate, HistoricalDataPoint, TelemetrySeriesGenerator};
pub use period::TimePeriod;
pub use summary::SeriesSummary;
