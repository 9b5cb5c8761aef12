//! Alert evaluation for the hydroponic reservoir.
//!
//! Contains the threshold configuration, the per-kind cooldown tracker and
//! the evaluator that ties them together. All logic in this module is pure:
//! the caller supplies snapshots and the clock, and delivers the resulting
//! events through a [`sink::NotificationSink`].

pub mod alert;
pub mod config;
pub mod cooldown;
pub mod evaluator;
pub mod session;
pub mod sink;

pub use alert::{AlertEvent, AlertKind, Severity};
pub use config::AlertThresholdConfig;
pub use evaluator::AlertEvaluator;
pub use session::MonitoringSession;
