//! Placement records

use crate::breakdown::Segment;
use crate::ids::{EmployeeId, PlacementId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recruiting placement and its commission snapshot
///
/// `fee_percentage` is stored as a fraction of the starting salary. The
/// commission fields are a denormalized snapshot of the calculation made
/// when the placement was recorded; they are never recomputed if the
/// employee's structure later changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "id")]
    pub placement_id: PlacementId,
    pub candidate_name: String,
    pub client_name: String,
    pub starting_salary: Decimal,
    pub fee_percentage: Decimal,
    pub placement_date: DateTime<Utc>,
    pub placement_year: i32,
    pub commission_amount: Decimal,
    /// Marginal rate in effect after this placement, as a fraction
    pub commission_rate_used: Decimal,
    pub commission_breakdown: Vec<Segment>,
    pub employee_id: EmployeeId,
}

impl Placement {
    /// Fee revenue generated by this placement
    pub fn fee_amount(&self) -> Decimal {
        self.starting_salary * self.fee_percentage
    }
}
