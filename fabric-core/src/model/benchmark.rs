//! Benchmark criteria and per-criterion comparison results.

use serde::{Deserialize, Serialize};

use super::CriterionId;

/// Which way a criterion improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Directionality {
    /// Larger actual values beat the target (recycled content).
    #[default]
    HigherIsBetter,
    /// Smaller actual values beat the target (carbon footprint).
    LowerIsBetter,
}

/// Target value for one sustainability criterion of a material type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkCriterion {
    pub id: CriterionId,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub target_value: f64,
    #[serde(default)]
    pub directionality: Directionality,
}

impl BenchmarkCriterion {
    /// Create a higher-is-better criterion.
    pub fn new(id: CriterionId, name: impl Into<String>, unit: impl Into<String>, target_value: f64) -> Self {
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
            target_value,
            directionality: Directionality::HigherIsBetter,
        }
    }

    /// Mark the criterion as lower-is-better.
    pub fn lower_is_better(mut self) -> Self {
        self.directionality = Directionality::LowerIsBetter;
        self
    }
}

/// Outcome of comparing an actual value with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Improved,
    Neutral,
    Regressed,
}

impl Classification {
    /// Classify a signed improvement percentage.
    pub fn from_improvement(improvement: f64) -> Self {
        if improvement > 0.0 {
            Classification::Improved
        } else if improvement < 0.0 {
            Classification::Regressed
        } else {
            Classification::Neutral
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Improved => write!(f, "improved"),
            Classification::Neutral => write!(f, "neutral"),
            Classification::Regressed => write!(f, "regressed"),
        }
    }
}

/// One row of a material's benchmark table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialBenchmarkResult {
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    pub unit: String,
    pub target_value: f64,
    pub directionality: Directionality,
    /// Recorded actual value, if the supplier reported one.
    pub actual_value: Option<f64>,
    /// Signed improvement; `None` means no data (missing actual or zero target).
    pub improvement_percentage: Option<f64>,
    /// `None` exactly when `improvement_percentage` is `None`.
    pub classification: Option<Classification>,
}

impl MaterialBenchmarkResult {
    /// Check if the row carries a comparison.
    pub fn has_data(&self) -> bool {
        self.improvement_percentage.is_some()
    }
}
