//! Error types for commission calculation
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Structure validation errors, surfaced at structure-assignment time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("Negative base rate: {rate}")]
    NegativeBaseRate { rate: String },

    #[error("Negative tier threshold: {threshold}")]
    NegativeThreshold { threshold: String },

    #[error("Negative tier rate: {rate}")]
    NegativeRate { rate: String },

    #[error("Negative cap: {cap}")]
    NegativeCap { cap: String },
}

/// Calculation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommissionError {
    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    #[error("Negative fee amount: {amount}")]
    NegativeFeeAmount { amount: String },
}
