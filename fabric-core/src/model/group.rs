//! Derived aggregation records: material groups and incomplete pieces.

use serde::{Deserialize, Serialize};

use super::{MaterialId, PatternPiece, PieceId};

/// Lightweight reference to a pattern piece, kept for traceability.
///
/// Unnamed pieces carry their fallback display name ("piece #3").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRef {
    pub id: PieceId,
    pub name: String,
}

impl From<&PatternPiece> for PieceRef {
    fn from(piece: &PatternPiece) -> Self {
        Self {
            id: piece.id,
            name: piece.display_name(),
        }
    }
}

/// All pieces of one design cut from the same material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialGroup {
    pub material_id: MaterialId,
    pub material_name: String,
    /// Sum of member piece areas (copies included), in cm².
    pub total_area_cm2: f64,
    /// Loss-adjusted length to purchase, rounded up to the length step.
    pub required_length_m: f64,
    /// Member pieces ordered by piece id.
    pub members: Vec<PieceRef>,
}

impl MaterialGroup {
    /// Member names in member order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }
}

/// Why a piece was left out of every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncompleteReason {
    /// No material assigned yet.
    NoMaterial,
    /// Assigned material is not in the catalog.
    UnknownMaterial(MaterialId),
}

impl std::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncompleteReason::NoMaterial => write!(f, "no material assigned"),
            IncompleteReason::UnknownMaterial(id) => write!(f, "material {} not in catalog", id),
        }
    }
}

/// A piece excluded from aggregation, surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompletePiece {
    pub piece: PieceRef,
    pub reason: IncompleteReason,
}
