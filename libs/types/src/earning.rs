//! Earning records
//!
//! One earning row is written per recorded placement. When a placement is
//! deleted its earnings are detached, not removed, so paid-commission
//! reports stand.

use crate::ids::{EarningId, EmployeeId, PlacementId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commission paid out for a single placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earning {
    #[serde(rename = "id")]
    pub earning_id: EarningId,
    pub amount: Decimal,
    pub placement_id: Option<PlacementId>,
    pub employee_id: EmployeeId,
    pub calculated_at: DateTime<Utc>,
}
