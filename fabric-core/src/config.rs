//! Configuration constants and settings for the estimation engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::model::MaterialId;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 1e-9;

/// Default cutting-waste allowance (12%).
pub const DEFAULT_LOSS_FACTOR: f64 = 0.12;

/// Default bolt width in cm.
pub const DEFAULT_FABRIC_WIDTH_CM: f64 = 150.0;

/// Catalog prices are stored in thousands of the base currency.
pub const DEFAULT_PRICE_UNIT_SCALE: f64 = 1000.0;

/// Purchasable length granularity in metres.
pub const DEFAULT_LENGTH_STEP_M: f64 = 0.1;

/// Display granularity of carbon, water and waste totals.
pub const DEFAULT_TOTAL_STEP: f64 = 1.0;

/// Stock below this many metres is reported as running low.
pub const DEFAULT_LOW_STOCK_THRESHOLD_M: f64 = 30.0;

/// Centimetres per metre.
pub const CM_PER_M: f64 = 100.0;

/// Engine configuration.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cutting-waste allowance applied to flat area (0.12 = 12%).
    pub loss_factor: f64,
    /// Bolt width used to convert area into length.
    pub fabric_width_cm: f64,
    /// Multiplier from catalog price units to base currency.
    pub price_unit_scale: f64,
    /// Required length is rounded up to a multiple of this step.
    pub length_step_m: f64,
    /// Displayed impact totals are rounded up to a multiple of this step.
    pub total_step: f64,
    /// Inventory threshold for the low-stock status.
    pub low_stock_threshold_m: f64,
    /// Per-material loss factor overrides.
    pub loss_overrides: BTreeMap<MaterialId, f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            loss_factor: DEFAULT_LOSS_FACTOR,
            fabric_width_cm: DEFAULT_FABRIC_WIDTH_CM,
            price_unit_scale: DEFAULT_PRICE_UNIT_SCALE,
            length_step_m: DEFAULT_LENGTH_STEP_M,
            total_step: DEFAULT_TOTAL_STEP,
            low_stock_threshold_m: DEFAULT_LOW_STOCK_THRESHOLD_M,
            loss_overrides: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with a custom loss factor and bolt width.
    pub fn new(loss_factor: f64, fabric_width_cm: f64) -> Self {
        Self {
            loss_factor,
            fabric_width_cm,
            ..Default::default()
        }
    }

    /// Override the loss factor for one material.
    pub fn with_loss_override(mut self, material_id: MaterialId, loss_factor: f64) -> Self {
        self.loss_overrides.insert(material_id, loss_factor);
        self
    }

    /// Loss factor that applies to the given material.
    pub fn loss_factor_for(&self, material_id: MaterialId) -> f64 {
        self.loss_overrides
            .get(&material_id)
            .copied()
            .unwrap_or(self.loss_factor)
    }

    /// Number of length steps per metre (10 for a 0.1 m step).
    pub fn steps_per_metre(&self) -> f64 {
        (1.0 / self.length_step_m).round()
    }

    /// Check that the configuration can drive the engine.
    pub fn check(&self) -> Result<()> {
        if !positive(self.fabric_width_cm) {
            return Err(invalid("fabric_width_cm", self.fabric_width_cm, "must be positive"));
        }
        if !non_negative(self.loss_factor) {
            return Err(invalid("loss_factor", self.loss_factor, "must not be negative"));
        }
        if let Some(&loss) = self.loss_overrides.values().find(|l| !non_negative(**l)) {
            return Err(invalid("loss_overrides", loss, "must not be negative"));
        }
        if !non_negative(self.price_unit_scale) {
            return Err(invalid("price_unit_scale", self.price_unit_scale, "must not be negative"));
        }
        if !positive(self.length_step_m) || self.length_step_m > 1.0 {
            return Err(invalid("length_step_m", self.length_step_m, "must be in (0, 1]"));
        }
        let steps = 1.0 / self.length_step_m;
        if (steps - steps.round()).abs() > 1e-6 {
            return Err(invalid("length_step_m", self.length_step_m, "must divide one metre evenly"));
        }
        if !positive(self.total_step) || !is_whole_or_fraction(self.total_step) {
            return Err(invalid(
                "total_step",
                self.total_step,
                "must be a whole number or divide one unit evenly",
            ));
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_whole(value: f64) -> bool {
    (value - value.round()).abs() <= 1e-6
}

fn is_whole_or_fraction(step: f64) -> bool {
    if step >= 1.0 {
        is_whole(step)
    } else {
        is_whole(1.0 / step)
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> EngineError {
    EngineError::InvalidConfig {
        field,
        value,
        reason,
    }
}

/// Rounding helpers shared by the engine stages.
pub mod rounding {
    use super::EPS;

    /// Round `value` up to a whole number of steps, with `steps_per_unit` steps per unit.
    ///
    /// Floating-point noise within `EPS` of a step boundary does not push the
    /// result up a full step.
    #[inline]
    pub fn ceil_to_step(value: f64, steps_per_unit: f64) -> f64 {
        if value <= 0.0 {
            return 0.0;
        }
        let scaled = value * steps_per_unit;
        (scaled - EPS).ceil() / steps_per_unit
    }

    /// Round `value` up to a multiple of `increment`.
    ///
    /// `increment` is either a whole number (5 rounds 12 to 15) or an even
    /// fraction of one (0.5 rounds 2.1 to 2.5).
    pub fn ceil_to_increment(value: f64, increment: f64) -> f64 {
        if increment >= 1.0 {
            ceil_to_step(value / increment, 1.0) * increment
        } else {
            ceil_to_step(value, (1.0 / increment).round())
        }
    }

    /// Round up to a whole display unit.
    #[inline]
    pub fn ceil_whole(value: f64) -> f64 {
        ceil_to_step(value, 1.0)
    }

    /// Percentage of `part` in `total`, 0 when there is no total.
    #[inline]
    pub fn share_percent(part: f64, total: f64) -> f64 {
        if total > 0.0 {
            part / total * 100.0
        } else {
            0.0
        }
    }
}
