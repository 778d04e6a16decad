//! Material records supplied by the catalog.

use serde::{Deserialize, Serialize};

use super::{CriterionId, MaterialId, MaterialTypeId};

/// One environmental attribute with its declared unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// Measured value.
    pub value: f64,
    /// Unit as declared by the supplier ("Kg", "L", "%").
    pub unit: String,
}

impl Impact {
    /// Create a new impact value.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    fn carbon() -> Self {
        Self::new(0.0, "Kg")
    }

    fn water() -> Self {
        Self::new(0.0, "L")
    }

    fn waste() -> Self {
        Self::new(0.0, "%")
    }
}

/// Actual value a material recorded for one benchmark criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionValue {
    /// Criterion this value belongs to.
    pub criterion_id: CriterionId,
    /// Measured value, absent when the supplier did not report it.
    #[serde(default)]
    pub value: Option<f64>,
}

/// A purchasable raw material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog id.
    pub id: MaterialId,
    /// Display name.
    pub name: String,
    /// Material type, used to look up benchmark criteria.
    #[serde(default)]
    pub type_id: MaterialTypeId,
    /// Price per metre in catalog units (thousands of the base currency).
    #[serde(default)]
    pub price_per_unit_length: f64,
    /// Metres the supplier has in stock.
    #[serde(default)]
    pub quantity_available_m: f64,
    /// Recycled content, 0-100.
    #[serde(default)]
    pub recycled_percentage: f64,
    /// Sustainability rating, 0-100.
    #[serde(default)]
    pub sustainability_score: f64,
    /// Display classification of the rating (a color code).
    #[serde(default)]
    pub sustainability_color: Option<String>,
    #[serde(default = "Impact::carbon")]
    pub carbon_footprint: Impact,
    #[serde(default = "Impact::water")]
    pub water_usage: Impact,
    #[serde(default = "Impact::waste")]
    pub waste_diverted: Impact,
    #[serde(default)]
    pub production_country: Option<String>,
    #[serde(default)]
    pub production_region: Option<String>,
    #[serde(default)]
    pub transport_distance_km: f64,
    #[serde(default)]
    pub transport_method: Option<String>,
    /// Comma-separated certificate names.
    #[serde(default)]
    pub certification_details: String,
    /// Recorded actual values for benchmark criteria.
    #[serde(default)]
    pub criteria_values: Vec<CriterionValue>,
}

impl Material {
    /// Create a material with the given id, name and price; everything else zeroed.
    pub fn new(id: MaterialId, name: impl Into<String>, price_per_unit_length: f64) -> Self {
        Self {
            id,
            name: name.into(),
            type_id: 0,
            price_per_unit_length,
            quantity_available_m: 0.0,
            recycled_percentage: 0.0,
            sustainability_score: 0.0,
            sustainability_color: None,
            carbon_footprint: Impact::carbon(),
            water_usage: Impact::water(),
            waste_diverted: Impact::waste(),
            production_country: None,
            production_region: None,
            transport_distance_km: 0.0,
            transport_method: None,
            certification_details: String::new(),
            criteria_values: Vec::new(),
        }
    }

    /// Set recycled percentage and sustainability score.
    pub fn with_scores(mut self, recycled_percentage: f64, sustainability_score: f64) -> Self {
        self.recycled_percentage = recycled_percentage;
        self.sustainability_score = sustainability_score;
        self
    }

    /// Set carbon, water and waste values, keeping their units.
    pub fn with_impacts(mut self, carbon: f64, water: f64, waste: f64) -> Self {
        self.carbon_footprint.value = carbon;
        self.water_usage.value = water;
        self.waste_diverted.value = waste;
        self
    }

    /// Set the material type.
    pub fn with_type(mut self, type_id: MaterialTypeId) -> Self {
        self.type_id = type_id;
        self
    }

    /// Record an actual value for a benchmark criterion.
    pub fn with_criterion_value(mut self, criterion_id: CriterionId, value: f64) -> Self {
        self.criteria_values.push(CriterionValue {
            criterion_id,
            value: Some(value),
        });
        self
    }

    /// Actual value recorded for a criterion.
    pub fn criterion_value(&self, criterion_id: CriterionId) -> Option<f64> {
        self.criteria_values
            .iter()
            .find(|c| c.criterion_id == criterion_id)
            .and_then(|c| c.value)
    }

    /// Certificate names, split from the comma-separated details.
    pub fn certifications(&self) -> impl Iterator<Item = &str> {
        self.certification_details
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Check if the catalog carries a usable price.
    pub fn has_price(&self) -> bool {
        self.price_per_unit_length > 0.0
    }
}

/// Recorded usage of a material in a finished product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub material_id: MaterialId,
    /// Share of the product made from this material, 0-100.
    pub usage_percentage: f64,
    /// Metres of the material used.
    #[serde(default)]
    pub meter_used: f64,
}

impl MaterialUsage {
    /// Create a new usage record.
    pub fn new(material_id: MaterialId, usage_percentage: f64, meter_used: f64) -> Self {
        Self {
            material_id,
            usage_percentage,
            meter_used,
        }
    }
}
