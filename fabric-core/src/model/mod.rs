//! Data model for designs, materials and derived results.

mod benchmark;
mod group;
mod material;
mod piece;

pub use benchmark::{BenchmarkCriterion, Classification, Directionality, MaterialBenchmarkResult};
pub use group::{IncompletePiece, IncompleteReason, MaterialGroup, PieceRef};
pub use material::{CriterionValue, Impact, Material, MaterialUsage};
pub use piece::{PatternPiece, PieceRole};

use serde::{Deserialize, Serialize};

/// Catalog id of a material.
pub type MaterialId = u32;
/// Id of a pattern piece within a design.
pub type PieceId = u32;
/// Id of a material type.
pub type MaterialTypeId = u32;
/// Id of a benchmark criterion.
pub type CriterionId = u32;

/// A garment design: its name and the pattern pieces composing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pieces: Vec<PatternPiece>,
}

impl Design {
    /// Create a design.
    pub fn new(name: impl Into<String>, pieces: Vec<PatternPiece>) -> Self {
        Self {
            name: name.into(),
            pieces,
        }
    }

    /// Find a piece by id.
    pub fn find_piece(&self, id: PieceId) -> Option<&PatternPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Remove a piece by id, returning it if present.
    pub fn remove_piece(&mut self, id: PieceId) -> Option<PatternPiece> {
        let idx = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(idx))
    }
}
