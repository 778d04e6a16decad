//! Comparison of a material's recorded criterion values against benchmark targets.

use crate::catalog::MaterialCatalog;
use crate::model::{
    BenchmarkCriterion, Classification, Directionality, Material, MaterialBenchmarkResult,
};

/// Signed improvement of `actual` over `target`, in percent.
///
/// Positive always means better: for lower-is-better criteria the sign is
/// inverted. Returns `None` when the target is zero.
pub fn improvement_percentage(actual: f64, target: f64, directionality: Directionality) -> Option<f64> {
    if target == 0.0 {
        return None;
    }
    let delta = match directionality {
        Directionality::HigherIsBetter => actual - target,
        Directionality::LowerIsBetter => target - actual,
    };
    Some(delta / target * 100.0)
}

/// Compare one criterion.
pub fn compare_criterion(material: &Material, criterion: &BenchmarkCriterion) -> MaterialBenchmarkResult {
    let actual_value = material.criterion_value(criterion.id);
    let improvement = actual_value
        .and_then(|actual| improvement_percentage(actual, criterion.target_value, criterion.directionality));

    MaterialBenchmarkResult {
        criterion_id: criterion.id,
        criterion_name: criterion.name.clone(),
        unit: criterion.unit.clone(),
        target_value: criterion.target_value,
        directionality: criterion.directionality,
        actual_value,
        improvement_percentage: improvement,
        classification: improvement.map(Classification::from_improvement),
    }
}

/// Compare a material against every criterion, in criterion order.
pub fn compare_benchmarks(material: &Material, criteria: &[BenchmarkCriterion]) -> Vec<MaterialBenchmarkResult> {
    criteria
        .iter()
        .map(|criterion| compare_criterion(material, criterion))
        .collect()
}

/// Compare a material against the criteria the catalog defines for its type.
pub fn compare_catalog_benchmarks<C>(material: &Material, catalog: &C) -> Vec<MaterialBenchmarkResult>
where
    C: MaterialCatalog + ?Sized,
{
    compare_benchmarks(material, catalog.criteria_for_type(material.type_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn recycled() -> BenchmarkCriterion {
        BenchmarkCriterion::new(1, "Recycled content", "%", 50.0)
    }

    fn carbon() -> BenchmarkCriterion {
        BenchmarkCriterion::new(2, "Carbon footprint", "Kg", 5.0).lower_is_better()
    }

    // ==================== improvement_percentage tests ====================

    #[test]
    fn test_improvement_higher_is_better() {
        assert_eq!(improvement_percentage(60.0, 50.0, Directionality::HigherIsBetter), Some(20.0));
        assert_eq!(improvement_percentage(40.0, 50.0, Directionality::HigherIsBetter), Some(-20.0));
        assert_eq!(improvement_percentage(50.0, 50.0, Directionality::HigherIsBetter), Some(0.0));
    }

    #[test]
    fn test_improvement_lower_is_better() {
        assert_eq!(improvement_percentage(4.0, 5.0, Directionality::LowerIsBetter), Some(20.0));
        assert_eq!(improvement_percentage(6.0, 5.0, Directionality::LowerIsBetter), Some(-20.0));
    }

    #[test]
    fn test_improvement_zero_target() {
        assert_eq!(improvement_percentage(10.0, 0.0, Directionality::HigherIsBetter), None);
        assert_eq!(improvement_percentage(0.0, 0.0, Directionality::LowerIsBetter), None);
    }

    // ==================== compare_benchmarks tests ====================

    #[test]
    fn test_compare_improved_and_regressed() {
        let material = Material::new(1, "Recycled polyester", 80.0)
            .with_criterion_value(1, 60.0)
            .with_criterion_value(2, 6.0);
        let results = compare_benchmarks(&material, &[recycled(), carbon()]);
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].improvement_percentage, Some(20.0));
        assert_eq!(results[0].classification, Some(Classification::Improved));
        assert_eq!(results[0].actual_value, Some(60.0));

        assert_eq!(results[1].improvement_percentage, Some(-20.0));
        assert_eq!(results[1].classification, Some(Classification::Regressed));
    }

    #[test]
    fn test_compare_regressed_higher_is_better() {
        let material = Material::new(1, "Cotton", 80.0).with_criterion_value(1, 40.0);
        let results = compare_benchmarks(&material, &[recycled()]);
        assert_eq!(results[0].improvement_percentage, Some(-20.0));
        assert_eq!(results[0].classification, Some(Classification::Regressed));
    }

    #[test]
    fn test_compare_neutral() {
        let material = Material::new(1, "Cotton", 80.0).with_criterion_value(2, 5.0);
        let results = compare_benchmarks(&material, &[carbon()]);
        assert_eq!(results[0].classification, Some(Classification::Neutral));
    }

    #[test]
    fn test_compare_no_data() {
        let material = Material::new(1, "Cotton", 80.0).with_criterion_value(3, 12.0);
        let zero_target = BenchmarkCriterion::new(3, "Water saved", "L", 0.0);
        let results = compare_benchmarks(&material, &[recycled(), zero_target]);
        // no recorded value
        assert_eq!(results[0].actual_value, None);
        assert!(!results[0].has_data());
        assert_eq!(results[0].classification, None);
        // zero target
        assert_eq!(results[1].actual_value, Some(12.0));
        assert!(!results[1].has_data());
        assert_eq!(results[1].classification, None);
    }

    #[test]
    fn test_compare_catalog_benchmarks_uses_type() {
        let material = Material::new(1, "Hemp", 50.0)
            .with_type(4)
            .with_criterion_value(1, 75.0);
        let catalog = InMemoryCatalog::new()
            .with_criterion(4, recycled())
            .with_criterion(5, carbon());
        let results = compare_catalog_benchmarks(&material, &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].improvement_percentage, Some(50.0));
    }

    #[test]
    fn test_compare_no_criteria() {
        let material = Material::new(1, "Hemp", 50.0);
        assert!(compare_benchmarks(&material, &[]).is_empty());
    }
}
