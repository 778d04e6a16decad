//! Stock overview of the materials a designer holds.

use serde::{Deserialize, Serialize};

use crate::catalog::MaterialCatalog;
use crate::config::EngineConfig;
use crate::model::MaterialId;

/// Metres of one material in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub material_id: MaterialId,
    pub quantity_m: f64,
}

impl StockEntry {
    /// Create a new stock entry.
    pub fn new(material_id: MaterialId, quantity_m: f64) -> Self {
        Self {
            material_id,
            quantity_m,
        }
    }
}

/// Stock level of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Classify a quantity against the low-stock threshold.
    pub fn classify(quantity_m: f64, low_stock_threshold_m: f64) -> Self {
        if quantity_m <= 0.0 {
            StockStatus::OutOfStock
        } else if quantity_m < low_stock_threshold_m {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "out of stock"),
            StockStatus::LowStock => write!(f, "low stock"),
            StockStatus::InStock => write!(f, "in stock"),
        }
    }
}

/// One row of the stock overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLine {
    pub material_id: MaterialId,
    pub material_name: Option<String>,
    pub quantity_m: f64,
    /// Price per metre in base currency, 0 when unknown.
    pub unit_price: f64,
    pub value: f64,
    pub status: StockStatus,
}

/// Totals over a designer's stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub lines: Vec<StockLine>,
    pub material_count: usize,
    pub total_value: f64,
    pub total_meters: f64,
    pub low_stock_count: usize,
}

/// Summarize stock value and levels.
pub fn summarize_inventory<C>(stock: &[StockEntry], catalog: &C, config: &EngineConfig) -> InventorySummary
where
    C: MaterialCatalog + ?Sized,
{
    let lines: Vec<StockLine> = stock
        .iter()
        .map(|entry| {
            let material = catalog.material(entry.material_id);
            let unit_price = material
                .map(|m| m.price_per_unit_length * config.price_unit_scale)
                .unwrap_or(0.0);
            StockLine {
                material_id: entry.material_id,
                material_name: material.map(|m| m.name.clone()),
                quantity_m: entry.quantity_m,
                unit_price,
                value: unit_price * entry.quantity_m,
                status: StockStatus::classify(entry.quantity_m, config.low_stock_threshold_m),
            }
        })
        .collect();

    InventorySummary {
        material_count: lines.len(),
        total_value: lines.iter().map(|l| l.value).sum(),
        total_meters: lines.iter().map(|l| l.quantity_m).sum(),
        low_stock_count: lines
            .iter()
            .filter(|l| l.status == StockStatus::LowStock)
            .count(),
        lines,
    }
}
