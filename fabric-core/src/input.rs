//! Loading of designs, catalogs, configs and stock lists from JSON files.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::{CatalogDocument, InMemoryCatalog};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::inventory::StockEntry;
use crate::model::{Design, MaterialUsage};

/// Stock list document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockDocument {
    #[serde(default)]
    pub stock: Vec<StockEntry>,
}

/// Finished-product usage document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageDocument {
    #[serde(default)]
    pub materials: Vec<MaterialUsage>,
}

/// Read a whole JSON file into `T`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(EngineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(EngineError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(serde_json::from_str(&content)?)
}

/// Parse a design from JSON text.
pub fn parse_design(content: &str) -> Result<Design> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(content: &str) -> Result<InMemoryCatalog> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    InMemoryCatalog::from_document(document)
}

/// Load a design file.
pub fn load_design(path: &Path) -> Result<Design> {
    read_json(path)
}

/// Load a catalog file.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    InMemoryCatalog::from_document(read_json(path)?)
}

/// Load an engine configuration file; missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let config: EngineConfig = read_json(path)?;
    config.check()?;
    Ok(config)
}

/// Load a stock list file.
pub fn load_stock(path: &Path) -> Result<Vec<StockEntry>> {
    let document: StockDocument = read_json(path)?;
    Ok(document.stock)
}

/// Load a finished-product usage file.
pub fn load_usages(path: &Path) -> Result<Vec<MaterialUsage>> {
    let document: UsageDocument = read_json(path)?;
    Ok(document.materials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MaterialCatalog;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_design() {
        let design = parse_design(
            r#"{
                "name": "Tote",
                "pieces": [
                    { "id": 1, "name": "Body", "width_cm": 40, "height_cm": 45, "copies_per_garment": 2, "material_id": 3 },
                    { "id": 2, "role": "Accessory", "name": "Strap", "width_cm": 5, "height_cm": 60 }
                ]
            }"#,
        )
        .expect("valid design");
        assert_eq!(design.name, "Tote");
        assert_eq!(design.pieces.len(), 2);
        assert_eq!(design.pieces[0].material_id, Some(3));
        assert_eq!(design.pieces[1].copies_per_garment, 1);
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(
            r#"{
                "materials": [
                    {
                        "id": 3,
                        "name": "Organic canvas",
                        "type_id": 1,
                        "price_per_unit_length": 95,
                        "recycled_percentage": 20,
                        "sustainability_score": 75,
                        "carbon_footprint": { "value": 2.1, "unit": "Kg" },
                        "criteria_values": [{ "criterion_id": 1, "value": 30 }]
                    }
                ],
                "benchmarks": [
                    {
                        "type_id": 1,
                        "criteria": [
                            { "id": 1, "name": "Recycled content", "unit": "%", "target_value": 25 },
                            { "id": 2, "name": "Carbon", "unit": "Kg", "target_value": 3, "directionality": "LowerIsBetter" }
                        ]
                    }
                ]
            }"#,
        )
        .expect("valid catalog");
        let material = catalog.material(3).expect("material present");
        assert_eq!(material.carbon_footprint.value, 2.1);
        assert_eq!(material.water_usage.unit, "L");
        assert_eq!(catalog.criteria_for_type(1).len(), 2);
    }

    #[test]
    fn test_parse_design_invalid_json() {
        let err = parse_design("{ not json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_design(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EngineError::FileNotFound { .. }));
    }
}
