//! Grouping of pattern pieces by material and loss-adjusted length estimation.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::catalog::MaterialCatalog;
use crate::config::{rounding::ceil_to_step, EngineConfig, CM_PER_M};
use crate::error::Result;
use crate::model::{
    IncompletePiece, IncompleteReason, Material, MaterialGroup, MaterialId, PatternPiece, PieceRef,
};

/// Result of grouping a design's pieces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// One group per material, ordered by material id.
    pub groups: Vec<MaterialGroup>,
    /// Pieces left out of every group, ordered by piece id.
    pub incomplete: Vec<IncompletePiece>,
}

impl Aggregation {
    /// Check if every piece made it into a group.
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }

    /// Find the group for a material.
    pub fn group(&self, material_id: MaterialId) -> Option<&MaterialGroup> {
        self.groups.iter().find(|g| g.material_id == material_id)
    }

    /// Total metres to purchase for one garment.
    pub fn total_length_m(&self) -> f64 {
        self.groups.iter().map(|g| g.required_length_m).sum()
    }
}

/// Loss-adjusted purchasable length for a summed area.
///
/// `area * (1 + loss) / bolt width` gives centimetres of fabric, converted to
/// metres and rounded up to a whole number of length steps.
pub fn required_length_m(
    total_area_cm2: f64,
    loss_factor: f64,
    fabric_width_cm: f64,
    steps_per_metre: f64,
) -> f64 {
    let raw_m = total_area_cm2 * (1.0 + loss_factor) / fabric_width_cm / CM_PER_M;
    ceil_to_step(raw_m, steps_per_metre)
}

/// Group pieces by assigned material and compute required lengths.
///
/// Algorithm:
/// 1. Pieces without a material, or with a material the catalog does not
///    know, are reported as incomplete
/// 2. Remaining pieces are bucketed by material id
/// 3. Each bucket is put in piece-id order and its areas summed in that order
/// 4. Length is derived once from the summed area; buckets with no area are dropped
///
/// Because members are summed in a canonical order, any permutation of
/// `pieces` yields bit-identical groups.
pub fn aggregate<C>(pieces: &[PatternPiece], catalog: &C, config: &EngineConfig) -> Result<Aggregation>
where
    C: MaterialCatalog + ?Sized,
{
    config.check()?;
    let steps = config.steps_per_metre();

    let mut buckets: BTreeMap<MaterialId, (&Material, Vec<&PatternPiece>)> = BTreeMap::new();
    let mut incomplete = Vec::new();

    for piece in pieces {
        let reason = match piece.material_id {
            None => IncompleteReason::NoMaterial,
            Some(id) => match catalog.material(id) {
                Some(material) => {
                    buckets.entry(id).or_insert_with(|| (material, Vec::new())).1.push(piece);
                    continue;
                }
                None => IncompleteReason::UnknownMaterial(id),
            },
        };
        incomplete.push(IncompletePiece {
            piece: PieceRef::from(piece),
            reason,
        });
    }
    incomplete.sort_by(|a, b| {
        a.piece
            .id
            .cmp(&b.piece.id)
            .then_with(|| a.piece.name.cmp(&b.piece.name))
    });

    let mut groups = Vec::with_capacity(buckets.len());
    for (material_id, (material, mut members)) in buckets {
        members.sort_by(|a, b| canonical_order(a, b));

        let total_area_cm2: f64 = members.iter().map(|p| p.area_cm2()).sum();
        if total_area_cm2 <= 0.0 {
            debug!("Dropping material {}: no area assigned", material_id);
            continue;
        }

        let loss = config.loss_factor_for(material_id);
        let length = required_length_m(total_area_cm2, loss, config.fabric_width_cm, steps);
        debug!(
            "Material {} ({}): {} piece(s), {:.1} cm2, {} m",
            material_id,
            material.name,
            members.len(),
            total_area_cm2,
            length
        );

        groups.push(MaterialGroup {
            material_id,
            material_name: material.name.clone(),
            total_area_cm2,
            required_length_m: length,
            members: members.into_iter().map(PieceRef::from).collect(),
        });
    }

    Ok(Aggregation { groups, incomplete })
}

/// Piece id first; ties (duplicate ids) fall back to area, then name.
fn canonical_order(a: &PatternPiece, b: &PatternPiece) -> Ordering {
    a.id.cmp(&b.id)
        .then_with(|| a.area_cm2().total_cmp(&b.area_cm2()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::error::EngineError;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_material(Material::new(1, "Organic cotton", 120.0))
            .with_material(Material::new(2, "Recycled polyester", 80.0))
    }

    fn piece(id: u32, width: f64, height: f64, copies: u32, material: Option<u32>) -> PatternPiece {
        PatternPiece {
            id,
            name: format!("P{}", id),
            width_cm: width,
            height_cm: height,
            copies_per_garment: copies,
            material_id: material,
            ..Default::default()
        }
    }

    // ==================== required_length_m tests ====================

    #[test]
    fn test_required_length_reference_case() {
        // 100 x 50 x 2 = 10000 cm2; 11200 / 150 / 100 = 0.7467 -> 0.8
        let length = required_length_m(10000.0, 0.12, 150.0, 10.0);
        assert_eq!(length, 0.8);
    }

    #[test]
    fn test_required_length_exact_step_boundary() {
        // 9375 cm2 needs exactly 0.7 m; float noise must not round it to 0.8
        assert_eq!(required_length_m(9375.0, 0.12, 150.0, 10.0), 0.7);
    }

    #[test]
    fn test_required_length_zero_area() {
        assert_eq!(required_length_m(0.0, 0.12, 150.0, 10.0), 0.0);
    }

    // ==================== aggregate tests ====================

    #[test]
    fn test_aggregate_single_piece() {
        let pieces = vec![piece(1, 100.0, 50.0, 2, Some(1))];
        let result = aggregate(&pieces, &catalog(), &EngineConfig::default()).expect("aggregates");
        assert_eq!(result.groups.len(), 1);
        let group = &result.groups[0];
        assert_eq!(group.total_area_cm2, 10000.0);
        assert_eq!(group.required_length_m, 0.8);
        assert_eq!(group.material_name, "Organic cotton");
        assert!(result.is_complete());
    }

    #[test]
    fn test_aggregate_rounds_summed_area_once() {
        let pieces = vec![
            piece(1, 100.0, 50.0, 1, Some(1)), // 5000 cm2 alone -> 0.4 m
            piece(2, 100.0, 70.0, 1, Some(1)), // 7000 cm2 alone -> 0.6 m
        ];
        let result = aggregate(&pieces, &catalog(), &EngineConfig::default()).expect("aggregates");
        let group = result.group(1).expect("group exists");
        assert_eq!(group.total_area_cm2, 12000.0);
        assert_eq!(group.required_length_m, 0.9);

        let piecewise = required_length_m(5000.0, 0.12, 150.0, 10.0)
            + required_length_m(7000.0, 0.12, 150.0, 10.0);
        assert!(piecewise > group.required_length_m);
    }

    #[test]
    fn test_aggregate_groups_by_material() {
        let pieces = vec![
            piece(1, 60.0, 80.0, 1, Some(1)),
            piece(2, 30.0, 40.0, 2, Some(2)),
            piece(3, 60.0, 80.0, 1, Some(1)),
        ];
        let result = aggregate(&pieces, &catalog(), &EngineConfig::default()).expect("aggregates");
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].material_id, 1);
        assert_eq!(result.groups[0].total_area_cm2, 9600.0);
        assert_eq!(result.groups[0].member_names().collect::<Vec<_>>(), vec!["P1", "P3"]);
        assert_eq!(result.groups[1].material_id, 2);
        assert_eq!(result.groups[1].total_area_cm2, 2400.0);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let pieces = vec![
            piece(1, 33.3, 41.7, 3, Some(1)),
            piece(2, 12.1, 9.9, 1, Some(1)),
            piece(3, 70.05, 18.2, 2, Some(1)),
            piece(4, 0.1, 0.2, 7, Some(2)),
            piece(5, 55.5, 60.6, 1, Some(2)),
        ];
        let config = EngineConfig::default();
        let expected = aggregate(&pieces, &catalog(), &config).expect("aggregates");

        let mut reversed = pieces.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed, &catalog(), &config).expect("aggregates"), expected);

        let rotated: Vec<PatternPiece> =
            pieces[2..].iter().chain(pieces[..2].iter()).cloned().collect();
        let result = aggregate(&rotated, &catalog(), &config).expect("aggregates");
        for (a, b) in result.groups.iter().zip(&expected.groups) {
            assert_eq!(a.total_area_cm2.to_bits(), b.total_area_cm2.to_bits());
            assert_eq!(a.required_length_m.to_bits(), b.required_length_m.to_bits());
        }
    }

    #[test]
    fn test_aggregate_reports_incomplete_pieces() {
        let pieces = vec![
            piece(3, 10.0, 10.0, 1, None),
            piece(1, 10.0, 10.0, 1, Some(1)),
            piece(2, 10.0, 10.0, 1, Some(99)),
        ];
        let result = aggregate(&pieces, &catalog(), &EngineConfig::default()).expect("aggregates");
        assert_eq!(result.groups.len(), 1);
        assert!(!result.is_complete());
        assert_eq!(result.incomplete.len(), 2);
        assert_eq!(result.incomplete[0].piece.id, 2);
        assert_eq!(result.incomplete[0].reason, IncompleteReason::UnknownMaterial(99));
        assert_eq!(result.incomplete[1].piece.id, 3);
        assert_eq!(result.incomplete[1].reason, IncompleteReason::NoMaterial);
    }

    #[test]
    fn test_aggregate_drops_zero_area_groups() {
        let pieces = vec![piece(1, 100.0, 50.0, 0, Some(1)), piece(2, 0.0, 50.0, 3, Some(2))];
        let result = aggregate(&pieces, &catalog(), &EngineConfig::default()).expect("aggregates");
        assert!(result.groups.is_empty());
        assert!(result.is_complete());
    }

    #[test]
    fn test_aggregate_empty_input() {
        let result = aggregate(&[], &catalog(), &EngineConfig::default()).expect("aggregates");
        assert!(result.groups.is_empty());
        assert_eq!(result.total_length_m(), 0.0);
    }

    #[test]
    fn test_aggregate_uses_loss_override() {
        let pieces = vec![piece(1, 100.0, 50.0, 2, Some(1)), piece(2, 100.0, 50.0, 2, Some(2))];
        let config = EngineConfig::default().with_loss_override(2, 0.5);
        let result = aggregate(&pieces, &catalog(), &config).expect("aggregates");
        assert_eq!(result.group(1).map(|g| g.required_length_m), Some(0.8));
        // 10000 * 1.5 / 150 / 100 = 1.0
        assert_eq!(result.group(2).map(|g| g.required_length_m), Some(1.0));
    }

    #[test]
    fn test_aggregate_custom_bolt_width() {
        let pieces = vec![piece(1, 100.0, 50.0, 2, Some(1))];
        let config = EngineConfig::new(0.0, 100.0);
        let result = aggregate(&pieces, &catalog(), &config).expect("aggregates");
        assert_eq!(result.groups[0].required_length_m, 1.0);
    }

    #[test]
    fn test_aggregate_rejects_invalid_config() {
        let pieces = vec![piece(1, 100.0, 50.0, 2, Some(1))];
        let config = EngineConfig::new(0.12, -1.0);
        let err = aggregate(&pieces, &catalog(), &config).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let pieces = vec![piece(1, 45.5, 61.2, 2, Some(1)), piece(2, 10.0, 12.0, 4, Some(2))];
        let config = EngineConfig::default();
        let first = aggregate(&pieces, &catalog(), &config).expect("aggregates");
        let second = aggregate(&pieces, &catalog(), &config).expect("aggregates");
        assert_eq!(first, second);
    }
}
