//! Pattern piece definition representing a single cut shape of a garment.

use serde::{Deserialize, Serialize};

use super::{MaterialId, PieceId};

/// Role a piece plays in the garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieceRole {
    /// Outer shell fabric.
    #[default]
    Main,
    /// Inner lining.
    Lining,
    /// Trims, pockets, straps.
    Accessory,
}

impl std::fmt::Display for PieceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceRole::Main => write!(f, "main"),
            PieceRole::Lining => write!(f, "lining"),
            PieceRole::Accessory => write!(f, "accessory"),
        }
    }
}

/// A single cut shape in a garment design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternPiece {
    /// Unique, stable piece id.
    pub id: PieceId,
    /// Role of the piece in the garment.
    #[serde(default)]
    pub role: PieceRole,
    /// Free-text name, may be empty.
    #[serde(default)]
    pub name: String,
    /// Piece width in cm.
    pub width_cm: f64,
    /// Piece height in cm.
    pub height_cm: f64,
    /// Identical copies one garment needs (two sleeves, four pockets).
    #[serde(default = "default_copies")]
    pub copies_per_garment: u32,
    /// Assigned material, if one has been chosen yet.
    #[serde(default)]
    pub material_id: Option<MaterialId>,
}

fn default_copies() -> u32 {
    1
}

impl PatternPiece {
    /// Create a new piece with one copy per garment and no material.
    pub fn new(id: PieceId, name: impl Into<String>, width_cm: f64, height_cm: f64) -> Self {
        Self {
            id,
            name: name.into(),
            width_cm,
            height_cm,
            copies_per_garment: 1,
            ..Default::default()
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: PieceRole) -> Self {
        self.role = role;
        self
    }

    /// Set the number of copies per garment.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies_per_garment = copies;
        self
    }

    /// Assign a material.
    pub fn with_material(mut self, material_id: MaterialId) -> Self {
        self.material_id = Some(material_id);
        self
    }

    /// Set dimensions.
    pub fn set_dimensions(&mut self, width_cm: f64, height_cm: f64) {
        self.width_cm = width_cm;
        self.height_cm = height_cm;
    }

    /// Assign or clear the material.
    pub fn set_material(&mut self, material_id: Option<MaterialId>) {
        self.material_id = material_id;
    }

    /// Area of one copy in cm².
    pub fn unit_area_cm2(&self) -> f64 {
        self.width_cm * self.height_cm
    }

    /// Area of all copies one garment needs, in cm².
    pub fn area_cm2(&self) -> f64 {
        self.unit_area_cm2() * f64::from(self.copies_per_garment)
    }

    /// Check if a material has been chosen.
    pub fn has_material(&self) -> bool {
        self.material_id.is_some()
    }

    /// Name for reports; falls back to the id when the name is blank.
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("piece #{}", self.id)
        } else {
            self.name.clone()
        }
    }
}
