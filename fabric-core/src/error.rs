//! Error types for material requirement estimation.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::MaterialId;

/// Error codes for estimation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input file not found (-1)
    FileNotFound = -1,
    /// Empty input file (-2)
    EmptyFile = -2,
    /// Input could not be decoded (-3)
    ParseError = -3,
    /// Engine configuration unusable (E100)
    InvalidConfig = 100,
    /// Catalog lists the same material twice (E200)
    DuplicateMaterial = 200,
    /// Input failed boundary validation (E300)
    ValidationFailed = 300,
}

/// Main error type for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Material {material_id} appears more than once in the catalog")]
    DuplicateMaterial { material_id: MaterialId },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::FileNotFound { .. } => ErrorCode::FileNotFound,
            EngineError::EmptyFile { .. } => ErrorCode::EmptyFile,
            EngineError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            EngineError::DuplicateMaterial { .. } => ErrorCode::DuplicateMaterial,
            EngineError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EngineError::Json(_) => ErrorCode::ParseError,
            EngineError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
