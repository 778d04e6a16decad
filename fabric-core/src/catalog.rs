//! Read-only material catalog lookups.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, Result};
use crate::model::{BenchmarkCriterion, Material, MaterialId, MaterialTypeId};

/// Source of approved material records and benchmark criteria.
///
/// The engine only ever reads through this trait.
pub trait MaterialCatalog {
    /// Look up a material by id.
    fn material(&self, id: MaterialId) -> Option<&Material>;

    /// Benchmark criteria for a material type, empty when none are defined.
    fn criteria_for_type(&self, type_id: MaterialTypeId) -> &[BenchmarkCriterion];
}

impl MaterialCatalog for HashMap<MaterialId, Material> {
    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.get(&id)
    }

    fn criteria_for_type(&self, _type_id: MaterialTypeId) -> &[BenchmarkCriterion] {
        &[]
    }
}

impl MaterialCatalog for BTreeMap<MaterialId, Material> {
    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.get(&id)
    }

    fn criteria_for_type(&self, _type_id: MaterialTypeId) -> &[BenchmarkCriterion] {
        &[]
    }
}

/// Benchmark criteria defined for one material type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBenchmarks {
    pub type_id: MaterialTypeId,
    pub criteria: Vec<BenchmarkCriterion>,
}

/// Catalog document as exchanged with the marketplace backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub benchmarks: Vec<TypeBenchmarks>,
}

/// In-memory catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    materials: BTreeMap<MaterialId, Material>,
    criteria: BTreeMap<MaterialTypeId, Vec<BenchmarkCriterion>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a document, rejecting duplicate material ids.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let mut catalog = Self::new();
        for material in document.materials {
            catalog.insert(material)?;
        }
        for entry in document.benchmarks {
            catalog
                .criteria
                .entry(entry.type_id)
                .or_default()
                .extend(entry.criteria);
        }
        Ok(catalog)
    }

    /// Add a material.
    pub fn insert(&mut self, material: Material) -> Result<()> {
        if self.materials.contains_key(&material.id) {
            return Err(EngineError::DuplicateMaterial {
                material_id: material.id,
            });
        }
        self.materials.insert(material.id, material);
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert) that replaces duplicates.
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.insert(material.id, material);
        self
    }

    /// Attach a benchmark criterion to a material type.
    pub fn with_criterion(mut self, type_id: MaterialTypeId, criterion: BenchmarkCriterion) -> Self {
        self.criteria.entry(type_id).or_default().push(criterion);
        self
    }

    /// All materials ordered by id.
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check if the catalog has no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialCatalog for InMemoryCatalog {
    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    fn criteria_for_type(&self, type_id: MaterialTypeId) -> &[BenchmarkCriterion] {
        self.criteria
            .get(&type_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
