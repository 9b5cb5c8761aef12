//! Alert types produced by the evaluator and handed to notification sinks.

use std::fmt;

use serde::Serialize;

/// The five independent conditions the evaluator watches.
///
/// Each kind carries its own cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    Ph,
    Ec,
    WaterLevel,
    WaterChange,
    LightHours,
}

impl AlertKind {
    /// Evaluation order; events within one call are emitted in this order.
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Ph,
        AlertKind::Ec,
        AlertKind::WaterLevel,
        AlertKind::WaterChange,
        AlertKind::LightHours,
    ];

    /// Stable identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Ph => "ph",
            AlertKind::Ec => "ec",
            AlertKind::WaterLevel => "waterLevel",
            AlertKind::WaterChange => "waterChange",
            AlertKind::LightHours => "lightHours",
        }
    }

    /// Notification title shown to the operator.
    pub fn title(self) -> &'static str {
        match self {
            AlertKind::Ph => "pH alert",
            AlertKind::Ec => "Nutrient alert",
            AlertKind::WaterLevel => "Low water level",
            AlertKind::WaterChange => "Water change reminder",
            AlertKind::LightHours => "Lighting alert",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Critical => f.write_str("critical"),
        }
    }
}

/// Which side of the acceptable band a reading fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    Low,
    High,
    /// The reading was NaN; treated as out of range.
    Invalid,
}

impl Deviation {
    /// Classify `value` against the inclusive band `[min, max]`.
    ///
    /// Only meaningful for values already known to be out of range.
    pub fn of(value: f64, min: f64, max: f64) -> Self {
        if value.is_nan() {
            Deviation::Invalid
        } else if value < min {
            Deviation::Low
        } else if value > max {
            Deviation::High
        } else {
            // Unreachable for out-of-range values; an inverted config lands here.
            Deviation::Invalid
        }
    }
}

/// A single alert that passed its cooldown gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
}

impl AlertEvent {
    pub fn critical(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
