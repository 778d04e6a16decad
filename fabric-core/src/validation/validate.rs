//! Boundary validation of designs, catalogs, usage records and stock lists.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::catalog::{InMemoryCatalog, MaterialCatalog};
use crate::error::{EngineError, Result};
use crate::inventory::StockEntry;
use crate::model::{Design, Material, MaterialUsage};

/// Tolerance for usage percentages summing to 100.
const USAGE_TOTAL_TOLERANCE: f64 = 0.5;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_percentage(value: f64) -> bool {
    is_non_negative(value) && value <= 100.0
}

/// Validate the pieces of a design on their own.
pub fn validate_design(design: &Design) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if design.pieces.is_empty() {
        result.add_warning("Design has no pattern pieces");
    }

    let mut seen = HashSet::new();
    for piece in &design.pieces {
        let label = piece.display_name();

        if !seen.insert(piece.id) {
            result.add_error(format!("Piece {}: Duplicate piece id {}", label, piece.id));
        }

        if !is_non_negative(piece.width_cm) || !is_non_negative(piece.height_cm) {
            result.add_error(format!(
                "Piece {}: Invalid dimensions ({}x{})",
                label, piece.width_cm, piece.height_cm
            ));
        } else if piece.area_cm2() == 0.0 {
            result.add_warning(format!("Piece {}: Zero area, contributes no fabric", label));
        }

        if !piece.has_material() {
            result.add_warning(format!("Piece {}: No material assigned", label));
        }
    }

    result
}

/// Validate the numeric ranges of one material.
pub fn validate_material(material: &Material) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let label = format!("Material {} ({})", material.id, material.name);

    for (field, value) in [
        ("price", material.price_per_unit_length),
        ("quantity available", material.quantity_available_m),
        ("carbon footprint", material.carbon_footprint.value),
        ("water usage", material.water_usage.value),
        ("transport distance", material.transport_distance_km),
    ] {
        if !is_non_negative(value) {
            result.add_error(format!("{}: Negative {} ({})", label, field, value));
        }
    }

    for (field, value) in [
        ("recycled percentage", material.recycled_percentage),
        ("sustainability score", material.sustainability_score),
        ("waste diverted", material.waste_diverted.value),
    ] {
        if !is_percentage(value) {
            result.add_error(format!("{}: {} out of range 0-100 ({})", label, field, value));
        }
    }

    if material.price_per_unit_length == 0.0 {
        result.add_warning(format!("{}: No price listed, costs will be 0", label));
    }

    result
}

/// Validate every material and benchmark criterion in a catalog.
pub fn validate_catalog(catalog: &InMemoryCatalog) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if catalog.is_empty() {
        result.add_warning("Catalog has no materials");
    }

    let mut type_ids = BTreeSet::new();
    for material in catalog.materials() {
        result.merge(validate_material(material));
        type_ids.insert(material.type_id);
    }

    for type_id in type_ids {
        for criterion in catalog.criteria_for_type(type_id) {
            if criterion.target_value == 0.0 {
                result.add_warning(format!(
                    "Type {}, Criterion {}: Zero target, comparisons will show no data",
                    type_id, criterion.name
                ));
            }
        }
    }

    result
}

/// Validate a design's material references and unit consistency against a catalog.
pub fn validate_design_materials<C>(design: &Design, catalog: &C) -> ValidationResult
where
    C: MaterialCatalog + ?Sized,
{
    let mut result = ValidationResult::ok();
    let mut used: BTreeMap<u32, &Material> = BTreeMap::new();

    for piece in &design.pieces {
        if let Some(id) = piece.material_id {
            match catalog.material(id) {
                Some(material) => {
                    used.insert(id, material);
                }
                None => result.add_warning(format!(
                    "Piece {}: Material {} not found in catalog",
                    piece.display_name(),
                    id
                )),
            }
        }
    }

    let materials: Vec<&Material> = used.into_values().collect();
    for warning in unit_mismatches(&materials) {
        result.add_warning(warning);
    }

    result
}

/// Warnings for impact attributes declared in more than one unit.
pub fn unit_mismatches(materials: &[&Material]) -> Vec<String> {
    let mut warnings = Vec::new();
    let attributes: [(&str, fn(&Material) -> &str); 3] = [
        ("Carbon footprint", |m| m.carbon_footprint.unit.as_str()),
        ("Water usage", |m| m.water_usage.unit.as_str()),
        ("Waste diverted", |m| m.waste_diverted.unit.as_str()),
    ];

    for (name, unit_of) in attributes {
        let units: BTreeSet<&str> = materials.iter().map(|m| unit_of(m)).collect();
        if units.len() > 1 {
            let units: Vec<&str> = units.into_iter().collect();
            warnings.push(format!(
                "{} declared in mixed units ({}), totals are summed without conversion",
                name,
                units.join(", ")
            ));
        }
    }

    warnings
}

/// Validate recorded material usage of a finished product.
pub fn validate_usages(usages: &[MaterialUsage]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for usage in usages {
        if !is_percentage(usage.usage_percentage) {
            result.add_error(format!(
                "Material {}: Usage percentage out of range 0-100 ({})",
                usage.material_id, usage.usage_percentage
            ));
        }
        if !is_non_negative(usage.meter_used) {
            result.add_error(format!(
                "Material {}: Negative metres used ({})",
                usage.material_id, usage.meter_used
            ));
        }
    }

    let total: f64 = usages.iter().map(|u| u.usage_percentage).sum();
    if !usages.is_empty() && (total - 100.0).abs() > USAGE_TOTAL_TOLERANCE {
        result.add_warning(format!("Usage percentages sum to {}, not 100", total));
    }

    result
}

/// Validate a designer's stock list.
///
/// Quantities must be finite and non-negative; listing a material twice is
/// reported as a warning since both entries are summed.
pub fn validate_stock(stock: &[StockEntry]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let mut seen = HashSet::new();
    for entry in stock {
        if !is_non_negative(entry.quantity_m) {
            result.add_error(format!(
                "Material {}: Invalid stock quantity ({})",
                entry.material_id, entry.quantity_m
            ));
        }
        if !seen.insert(entry.material_id) {
            result.add_warning(format!(
                "Material {}: Listed more than once in stock",
                entry.material_id
            ));
        }
    }

    result
}

/// Validate a design together with its catalog.
pub fn validate_inputs(design: &Design, catalog: &InMemoryCatalog) -> ValidationResult {
    let mut result = validate_design(design);
    result.merge(validate_catalog(catalog));
    result.merge(validate_design_materials(design, catalog));
    result
}

/// Quick validation check for command-line --validate flag.
pub fn quick_validate(design: &Design, catalog: &InMemoryCatalog) -> Result<()> {
    let result = validate_inputs(design, catalog);

    if !result.passed {
        return Err(EngineError::ValidationFailed {
            message: result.errors.join("; "),
        });
    }

    Ok(())
}
