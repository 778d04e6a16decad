//! fabric-core - Material requirement and sustainability scoring for garment designs.
//!
//! Given the pattern pieces of a design and a catalog of materials, this
//! library works out how much of each material has to be bought, what it
//! costs per garment and per batch, how sustainable the resulting mix is, and
//! how each material compares against the benchmark targets of its type.
//!
//! Every stage is a pure function of its inputs; callers recompute whenever
//! the design or the catalog changes.
//!
//! # Example
//!
//! ```no_run
//! use fabric_core::{estimate_design, load_catalog, load_design, EngineConfig};
//! use std::path::Path;
//!
//! let design = load_design(Path::new("shirt.json")).unwrap();
//! let catalog = load_catalog(Path::new("catalog.json")).unwrap();
//! let estimate = estimate_design(&design, &catalog, &EngineConfig::default(), 10).unwrap();
//! println!("{}", estimate.text_report());
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod inventory;
pub mod model;
pub mod report;
pub mod validation;

// Re-exports for convenience
pub use catalog::{CatalogDocument, InMemoryCatalog, MaterialCatalog, TypeBenchmarks};
pub use config::EngineConfig;
pub use engine::{
    aggregate, compare_benchmarks, compare_catalog_benchmarks, price, score_groups, score_usage,
    usage_shares, Aggregation, GroupCost, ImpactTotal, PriceSummary, ScoreDisplay,
    SustainabilityScore, UsageShare,
};
pub use error::{EngineError, ErrorCode, Result};
pub use input::{load_catalog, load_config, load_design, load_stock, load_usages};
pub use inventory::{summarize_inventory, InventorySummary, StockEntry, StockStatus};
pub use model::{
    BenchmarkCriterion, Classification, Design, Directionality, Impact, IncompletePiece,
    IncompleteReason, Material, MaterialBenchmarkResult, MaterialGroup, MaterialId, MaterialUsage,
    PatternPiece, PieceRef, PieceRole,
};
pub use report::TextReport;
pub use validation::{quick_validate, validate_inputs, validate_stock, ValidationResult};

use serde::{Deserialize, Serialize};

/// Benchmark table of one material used by a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialBenchmarks {
    pub material_id: MaterialId,
    pub material_name: String,
    pub results: Vec<MaterialBenchmarkResult>,
}

/// Everything the engine derives for one design snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignEstimate {
    pub design_name: String,
    pub aggregation: Aggregation,
    pub pricing: PriceSummary,
    pub score: SustainabilityScore,
    pub display: ScoreDisplay,
    pub usage_shares: Vec<UsageShare>,
    pub benchmarks: Vec<MaterialBenchmarks>,
}

impl DesignEstimate {
    /// Plain-text rendering of the estimate.
    pub fn text_report(&self) -> TextReport<'_> {
        TextReport::new(self)
    }
}

/// Run the full estimation pipeline on a design.
///
/// This performs, in order:
/// 1. Aggregate pieces into material groups
/// 2. Price the groups for one garment and for `garment_quantity` garments
/// 3. Score the design, weighting materials by required length
/// 4. Compare every grouped material against its type's benchmarks
///
/// Incomplete pieces and missing prices are logged and carried in the
/// result; they never fail the estimate.
pub fn estimate_design<C>(
    design: &Design,
    catalog: &C,
    config: &EngineConfig,
    garment_quantity: u32,
) -> Result<DesignEstimate>
where
    C: MaterialCatalog + ?Sized,
{
    let aggregation = aggregate(&design.pieces, catalog, config)?;
    for piece in &aggregation.incomplete {
        tracing::warn!("Piece {} ({}) left out: {}", piece.piece.id, piece.piece.name, piece.reason);
    }

    let pricing = price(&aggregation.groups, catalog, garment_quantity, config);
    for material_id in pricing.missing_prices() {
        tracing::warn!("Material {} has no price, costed at 0", material_id);
    }

    let score = score_groups(&aggregation.groups, catalog);
    if score.has_mixed_units() {
        tracing::warn!("Impact totals mix units; values are summed without conversion");
    }

    let benchmarks = aggregation
        .groups
        .iter()
        .filter_map(|group| catalog.material(group.material_id))
        .map(|material| MaterialBenchmarks {
            material_id: material.id,
            material_name: material.name.clone(),
            results: compare_catalog_benchmarks(material, catalog),
        })
        .collect();

    Ok(DesignEstimate {
        design_name: design.name.clone(),
        usage_shares: usage_shares(&aggregation.groups),
        display: score.display(config),
        aggregation,
        pricing,
        score,
        benchmarks,
    })
}
