//! Usage-weighted sustainability scores and environmental impact totals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::catalog::MaterialCatalog;
use crate::config::rounding::{ceil_to_increment, ceil_whole, share_percent};
use crate::config::EngineConfig;
use crate::model::{Impact, Material, MaterialGroup, MaterialId, MaterialUsage};

/// Summed environmental impact in the units the materials declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactTotal {
    /// Full-precision total.
    pub value: f64,
    /// Distinct units of the contributing materials, sorted.
    pub units: Vec<String>,
    /// More than one unit was summed as-is; the caller should flag this.
    pub mixed_units: bool,
}

impl ImpactTotal {
    /// Total rounded up to a multiple of `step` (1.0 for whole units).
    pub fn display_value(&self, step: f64) -> f64 {
        ceil_to_increment(self.value, step)
    }

    /// Units joined for display ("Kg", or "Kg/g" when mixed).
    pub fn unit_label(&self) -> String {
        self.units.join("/")
    }
}

/// Aggregate sustainability of a design or product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityScore {
    /// Weighted recycled content, 0-100, full precision.
    pub recycled_percentage: f64,
    /// Weighted sustainability rating, 0-100, full precision.
    pub sustainability_score: f64,
    /// Sum of the averaging weights.
    pub total_weight: f64,
    pub carbon: ImpactTotal,
    pub water: ImpactTotal,
    pub waste: ImpactTotal,
}

/// Display-grade rendering of a [`SustainabilityScore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDisplay {
    pub recycled_percentage: u32,
    pub sustainability_score: u32,
    /// Totals rounded up to the configured `total_step`.
    pub carbon: f64,
    pub water: f64,
    pub waste: f64,
}

impl SustainabilityScore {
    /// Averages rounded to the nearest integer, totals rounded up to `config.total_step`.
    pub fn display(&self, config: &EngineConfig) -> ScoreDisplay {
        let step = config.total_step;
        ScoreDisplay {
            recycled_percentage: self.recycled_percentage.round() as u32,
            sustainability_score: self.sustainability_score.round() as u32,
            carbon: self.carbon.display_value(step),
            water: self.water.display_value(step),
            waste: self.waste.display_value(step),
        }
    }

    /// Check if any impact total mixes units.
    pub fn has_mixed_units(&self) -> bool {
        self.carbon.mixed_units || self.water.mixed_units || self.waste.mixed_units
    }
}

/// One material with the weights it carries into the score.
struct Weighted<'a> {
    material: &'a Material,
    /// Weight for recycled/sustainability averages.
    average: f64,
    /// Multiplier for carbon and water.
    footprint: f64,
    /// Multiplier for waste diverted.
    diversion: f64,
}

/// Score a design from its material groups, weighting by required length.
pub fn score_groups<C>(groups: &[MaterialGroup], catalog: &C) -> SustainabilityScore
where
    C: MaterialCatalog + ?Sized,
{
    let entries = groups.iter().filter_map(|group| {
        let material = lookup(catalog, group.material_id)?;
        let weight = group.required_length_m;
        Some(Weighted {
            material,
            average: weight,
            footprint: weight,
            diversion: weight,
        })
    });
    fold(entries)
}

/// Score a finished product from its recorded material usage.
///
/// Usage percentages weight the averages. Carbon and water scale with the
/// metres used times the usage share; waste diverted scales with the share.
pub fn score_usage<C>(usages: &[MaterialUsage], catalog: &C) -> SustainabilityScore
where
    C: MaterialCatalog + ?Sized,
{
    let entries = usages.iter().filter_map(|usage| {
        let material = lookup(catalog, usage.material_id)?;
        let share = usage.usage_percentage / 100.0;
        Some(Weighted {
            material,
            average: usage.usage_percentage,
            footprint: share * usage.meter_used,
            diversion: share,
        })
    });
    fold(entries)
}

fn lookup<C>(catalog: &C, material_id: MaterialId) -> Option<&Material>
where
    C: MaterialCatalog + ?Sized,
{
    let material = catalog.material(material_id);
    if material.is_none() {
        debug!("Material {} not in catalog, left out of score", material_id);
    }
    material
}

#[derive(Default)]
struct ImpactAccumulator {
    value: f64,
    units: BTreeSet<String>,
}

impl ImpactAccumulator {
    fn add(&mut self, impact: &Impact, weight: f64) {
        if weight == 0.0 {
            return;
        }
        self.value += impact.value * weight;
        self.units.insert(impact.unit.clone());
    }

    fn finish(self) -> ImpactTotal {
        ImpactTotal {
            value: self.value,
            mixed_units: self.units.len() > 1,
            units: self.units.into_iter().collect(),
        }
    }
}

fn fold<'a>(entries: impl Iterator<Item = Weighted<'a>>) -> SustainabilityScore {
    let mut total_weight = 0.0;
    let mut recycled = 0.0;
    let mut rating = 0.0;
    let mut carbon = ImpactAccumulator::default();
    let mut water = ImpactAccumulator::default();
    let mut waste = ImpactAccumulator::default();

    for entry in entries {
        let m = entry.material;
        total_weight += entry.average;
        recycled += entry.average * m.recycled_percentage;
        rating += entry.average * m.sustainability_score;
        carbon.add(&m.carbon_footprint, entry.footprint);
        water.add(&m.water_usage, entry.footprint);
        waste.add(&m.waste_diverted, entry.diversion);
    }

    let average = |sum: f64| if total_weight > 0.0 { sum / total_weight } else { 0.0 };

    SustainabilityScore {
        recycled_percentage: average(recycled),
        sustainability_score: average(rating),
        total_weight,
        carbon: carbon.finish(),
        water: water.finish(),
        waste: waste.finish(),
    }
}

/// A material's share of a design's total required length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageShare {
    pub material_id: MaterialId,
    pub material_name: String,
    pub length_m: f64,
    /// Full-precision share, 0-100.
    pub percentage: f64,
}

impl UsageShare {
    /// Share rounded up to a whole percent.
    pub fn display_percentage(&self) -> u32 {
        ceil_whole(self.percentage) as u32
    }

    /// Usage record for scoring the finished product.
    pub fn to_usage(&self) -> MaterialUsage {
        MaterialUsage::new(self.material_id, self.percentage, self.length_m)
    }
}

/// Share of each group in the design's total length; all zero when there is no length.
pub fn usage_shares(groups: &[MaterialGroup]) -> Vec<UsageShare> {
    let total: f64 = groups.iter().map(|g| g.required_length_m).sum();
    groups
        .iter()
        .map(|group| UsageShare {
            material_id: group.material_id,
            material_name: group.material_name.clone(),
            length_m: group.required_length_m,
            percentage: share_percent(group.required_length_m, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn group(material_id: MaterialId, length: f64) -> MaterialGroup {
        MaterialGroup {
            material_id,
            material_name: format!("M{}", material_id),
            total_area_cm2: 0.0,
            required_length_m: length,
            members: vec![],
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_material(
                Material::new(1, "A", 100.0)
                    .with_scores(40.0, 80.0)
                    .with_impacts(2.0, 100.0, 30.0),
            )
            .with_material(
                Material::new(2, "B", 100.0)
                    .with_scores(90.0, 60.0)
                    .with_impacts(1.0, 50.0, 50.0),
            )
    }

    // ==================== score_groups tests ====================

    #[test]
    fn test_score_groups_weighted_average() {
        let score = score_groups(&[group(1, 5.0), group(2, 3.0)], &catalog());
        // (80 * 5 + 60 * 3) / 8
        assert_eq!(score.sustainability_score, 72.5);
        assert_eq!(score.display(&EngineConfig::default()).sustainability_score, 73);
        // (40 * 5 + 90 * 3) / 8 = 58.75
        assert_eq!(score.recycled_percentage, 58.75);
        assert_eq!(score.display(&EngineConfig::default()).recycled_percentage, 59);
        assert_eq!(score.total_weight, 8.0);
    }

    #[test]
    fn test_score_groups_impact_totals() {
        let score = score_groups(&[group(1, 5.0), group(2, 3.0)], &catalog());
        assert_eq!(score.carbon.value, 13.0);
        assert_eq!(score.water.value, 650.0);
        assert_eq!(score.waste.value, 300.0);
        assert_eq!(score.carbon.units, vec!["Kg".to_string()]);
        assert!(!score.has_mixed_units());
    }

    #[test]
    fn test_score_groups_empty_is_zero() {
        let score = score_groups(&[], &catalog());
        assert_eq!(score, SustainabilityScore::default());
        let display = score.display(&EngineConfig::default());
        assert_eq!(display.recycled_percentage, 0);
        assert_eq!(display.carbon, 0.0);
    }

    #[test]
    fn test_score_groups_zero_weights() {
        let score = score_groups(&[group(1, 0.0), group(2, 0.0)], &catalog());
        assert_eq!(score.recycled_percentage, 0.0);
        assert_eq!(score.sustainability_score, 0.0);
        assert_eq!(score.carbon.value, 0.0);
        assert!(score.carbon.units.is_empty());
    }

    #[test]
    fn test_score_groups_skips_unknown_material() {
        let score = score_groups(&[group(1, 2.0), group(77, 9.0)], &catalog());
        assert_eq!(score.sustainability_score, 80.0);
        assert_eq!(score.total_weight, 2.0);
    }

    #[test]
    fn test_score_flags_mixed_units() {
        let mut other = Material::new(3, "C", 10.0).with_impacts(500.0, 0.0, 0.0);
        other.carbon_footprint.unit = "g".to_string();
        let catalog = catalog().with_material(other);
        let score = score_groups(&[group(1, 1.0), group(3, 1.0)], &catalog);
        assert!(score.carbon.mixed_units);
        assert_eq!(score.carbon.unit_label(), "Kg/g");
        // summed as given, no conversion
        assert_eq!(score.carbon.value, 502.0);
    }

    #[test]
    fn test_score_is_idempotent() {
        let groups = vec![group(1, 1.3), group(2, 0.7)];
        let first = score_groups(&groups, &catalog());
        let second = score_groups(&groups, &catalog());
        assert_eq!(first, second);
        assert_eq!(first.carbon.value.to_bits(), second.carbon.value.to_bits());
    }

    // ==================== score_usage tests ====================

    #[test]
    fn test_score_usage_product() {
        let usages = vec![MaterialUsage::new(1, 60.0, 2.0), MaterialUsage::new(2, 40.0, 1.0)];
        let score = score_usage(&usages, &catalog());
        assert_eq!(score.recycled_percentage, 60.0);
        assert!(approx(score.sustainability_score, 72.0));
        // 2 * 0.6 * 2 + 1 * 0.4 * 1
        assert!(approx(score.carbon.value, 2.8));
        assert!(approx(score.water.value, 140.0));
        // 30 * 0.6 + 50 * 0.4
        assert!(approx(score.waste.value, 38.0));

        let display = score.display(&EngineConfig::default());
        assert_eq!(display.carbon, 3.0);
        assert_eq!(display.water, 140.0);
        assert_eq!(display.waste, 38.0);
    }

    #[test]
    fn test_display_with_custom_total_step() {
        let usages = vec![MaterialUsage::new(1, 60.0, 2.0), MaterialUsage::new(2, 40.0, 1.0)];
        let score = score_usage(&usages, &catalog());

        let halves = EngineConfig {
            total_step: 0.5,
            ..Default::default()
        };
        let display = score.display(&halves);
        // 2.8 kg, 140 L, 38 %
        assert_eq!(display.carbon, 3.0);
        assert_eq!(display.water, 140.0);
        assert_eq!(display.waste, 38.0);

        let tens = EngineConfig {
            total_step: 10.0,
            ..Default::default()
        };
        let display = score.display(&tens);
        assert_eq!(display.carbon, 10.0);
        assert_eq!(display.water, 140.0);
        assert_eq!(display.waste, 40.0);
        // averages are unaffected
        assert_eq!(display.recycled_percentage, 60);
    }

    #[test]
    fn test_display_fractional_total_step() {
        let score = score_groups(&[group(1, 0.3), group(2, 0.2)], &catalog());
        // carbon 2 * 0.3 + 1 * 0.2 = 0.8
        assert!(approx(score.carbon.value, 0.8));
        let tenths = EngineConfig {
            total_step: 0.1,
            ..Default::default()
        };
        assert_eq!(score.display(&tenths).carbon, 0.8);
        assert_eq!(score.display(&EngineConfig::default()).carbon, 1.0);
    }

    #[test]
    fn test_score_usage_zero_percentages() {
        let usages = vec![MaterialUsage::new(1, 0.0, 5.0)];
        let score = score_usage(&usages, &catalog());
        assert_eq!(score.sustainability_score, 0.0);
        assert_eq!(score.carbon.value, 0.0);
    }

    // ==================== usage_shares tests ====================

    #[test]
    fn test_usage_shares() {
        let shares = usage_shares(&[group(1, 0.9), group(2, 0.3)]);
        assert_eq!(shares.len(), 2);
        assert!(approx(shares[0].percentage, 75.0));
        assert_eq!(shares[0].display_percentage(), 75);
        assert!(approx(shares[1].percentage, 25.0));
        assert_eq!(shares[1].display_percentage(), 25);
    }

    #[test]
    fn test_usage_shares_round_up() {
        let shares = usage_shares(&[group(1, 1.0), group(2, 2.0)]);
        assert_eq!(shares[0].display_percentage(), 34);
        assert_eq!(shares[1].display_percentage(), 67);
    }

    #[test]
    fn test_usage_shares_score_as_product() {
        let groups = [group(1, 0.9), group(2, 0.3)];
        let usages: Vec<MaterialUsage> =
            usage_shares(&groups).iter().map(UsageShare::to_usage).collect();
        assert_eq!(usages[0].material_id, 1);
        assert!(approx(usages[0].usage_percentage, 75.0));
        assert_eq!(usages[1].meter_used, 0.3);

        // same averages as scoring the groups directly
        let product = score_usage(&usages, &catalog());
        let design = score_groups(&groups, &catalog());
        assert!(approx(product.recycled_percentage, design.recycled_percentage));
        assert!(approx(product.sustainability_score, design.sustainability_score));
    }

    #[test]
    fn test_usage_shares_zero_total() {
        let shares = usage_shares(&[group(1, 0.0)]);
        assert_eq!(shares[0].percentage, 0.0);
    }
}
