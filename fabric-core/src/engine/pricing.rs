//! Cost of the required fabric, per garment and per batch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::MaterialCatalog;
use crate::config::EngineConfig;
use crate::model::{MaterialGroup, MaterialId};

/// Cost of one material group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCost {
    pub material_id: MaterialId,
    pub required_length_m: f64,
    /// Price per metre in base currency (unit scale already applied).
    pub unit_price: f64,
    pub cost: f64,
    /// Material missing from the catalog or listed without a price.
    pub price_missing: bool,
}

/// Costs of a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub per_group: Vec<GroupCost>,
    /// Fabric cost of one finished garment.
    pub total_per_garment: f64,
    /// Metres of fabric one garment needs, all materials.
    pub total_length_m: f64,
    /// Number of finished garments in the batch.
    pub garment_quantity: u32,
    /// `total_per_garment * garment_quantity`.
    pub total_batch: f64,
}

impl PriceSummary {
    /// Materials whose cost could not be determined.
    pub fn missing_prices(&self) -> impl Iterator<Item = MaterialId> + '_ {
        self.per_group
            .iter()
            .filter(|c| c.price_missing)
            .map(|c| c.material_id)
    }

    /// Cost of one material group.
    pub fn cost_of(&self, material_id: MaterialId) -> Option<&GroupCost> {
        self.per_group.iter().find(|c| c.material_id == material_id)
    }
}

/// Price every group and total the garment and the batch.
///
/// `garment_quantity` counts finished garments; per-garment copies of a piece
/// are already part of each group's length and must not be applied again.
pub fn price<C>(
    groups: &[MaterialGroup],
    catalog: &C,
    garment_quantity: u32,
    config: &EngineConfig,
) -> PriceSummary
where
    C: MaterialCatalog + ?Sized,
{
    let per_group: Vec<GroupCost> = groups
        .iter()
        .map(|group| {
            let unit_price = catalog
                .material(group.material_id)
                .filter(|m| m.has_price())
                .map(|m| m.price_per_unit_length * config.price_unit_scale);

            let cost = unit_price.map_or(0.0, |p| group.required_length_m * p);
            debug!(
                "Material {}: {} m x {:?} = {}",
                group.material_id, group.required_length_m, unit_price, cost
            );

            GroupCost {
                material_id: group.material_id,
                required_length_m: group.required_length_m,
                unit_price: unit_price.unwrap_or(0.0),
                cost,
                price_missing: unit_price.is_none(),
            }
        })
        .collect();

    let total_per_garment: f64 = per_group.iter().map(|c| c.cost).sum();
    let total_length_m: f64 = per_group.iter().map(|c| c.required_length_m).sum();

    PriceSummary {
        per_group,
        total_per_garment,
        total_length_m,
        garment_quantity,
        total_batch: total_per_garment * f64::from(garment_quantity),
    }
}
