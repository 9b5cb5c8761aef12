//! Domain core for the HydroGrow hydroponics monitor.
//!
//! Pure logic only: alert evaluation with per-kind cooldown, synthetic
//! telemetry generation, and the dashboard status rules. Sensor I/O,
//! notification rendering and scheduling live with the caller.

pub mod calibration;
pub mod error;
pub mod monitoring;
pub mod sensor;
pub mod telemetry;
pub mod time_util;
pub mod types;
