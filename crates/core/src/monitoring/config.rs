//! Operator-editable alert thresholds.
//!
//! The configuration is only ever replaced as a whole. Validation happens
//! here, at the boundary; the evaluator assumes a valid config.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;

/// Inclusive acceptable range for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_bounds"))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies outside `[min, max]`. NaN is always outside.
    pub fn excludes(&self, value: f64) -> bool {
        !(self.min..=self.max).contains(&value)
    }
}

fn validate_bounds(bounds: &Bounds) -> Result<(), ValidationError> {
    if !bounds.min.is_finite() || !bounds.max.is_finite() {
        return Err(ValidationError::new("bounds_not_finite"));
    }
    if bounds.min > bounds.max {
        return Err(ValidationError::new("min_exceeds_max"));
    }
    Ok(())
}

/// Daily photoperiod target with a symmetric tolerance, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_light_target"))]
pub struct LightTarget {
    #[validate(range(min = 0.0, max = 24.0))]
    pub target: f64,
    #[validate(range(min = 0.0))]
    pub tolerance: f64,
}

fn validate_light_target(light: &LightTarget) -> Result<(), ValidationError> {
    if !light.target.is_finite() || !light.tolerance.is_finite() {
        return Err(ValidationError::new("light_target_not_finite"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlertThresholdConfig {
    #[validate(nested)]
    pub ph: Bounds,
    /// mS/cm.
    #[validate(nested)]
    pub ec: Bounds,
    #[validate(nested)]
    pub light_hours: LightTarget,
    #[validate(range(min = 1))]
    pub water_change_interval_days: i64,
}

impl Default for AlertThresholdConfig {
    fn default() -> Self {
        Self {
            ph: Bounds::new(5.0, 7.0),
            ec: Bounds::new(0.8, 2.8),
            light_hours: LightTarget {
                target: 16.0,
                tolerance: 2.0,
            },
            water_change_interval_days: 7,
        }
    }
}

impl AlertThresholdConfig {
    /// Check the config invariants and hand it back if they hold.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
