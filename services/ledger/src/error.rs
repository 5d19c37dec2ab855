//! Ledger error taxonomy

use thiserror::Error;
use types::errors::{CommissionError, StructureError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound { employee_id: String },

    #[error("Placement not found: {placement_id}")]
    PlacementNotFound { placement_id: String },

    #[error("Email already in use: {email}")]
    DuplicateEmail { email: String },

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    #[error("Commission error: {0}")]
    Commission(#[from] CommissionError),
}
