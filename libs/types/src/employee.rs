//! Employee records

use crate::commission::CommissionStructure;
use crate::ids::EmployeeId;
use crate::state::CommissionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employee under a tiered commission scheme
///
/// The commission structure is set at creation and replaced wholesale on
/// update. The cumulative totals are flattened into the record so the wire
/// shape exposes `cumulative_fees` / `cumulative_commission` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "id")]
    pub employee_id: EmployeeId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(flatten)]
    pub state: CommissionState,
    pub commission_structure: CommissionStructure,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Create a new employee with zeroed totals
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        commission_structure: CommissionStructure,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_id: EmployeeId::new(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            state: CommissionState::zero(),
            commission_structure,
            created_at,
        }
    }
}
