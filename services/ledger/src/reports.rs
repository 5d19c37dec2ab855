//! Aggregation and report queries
//!
//! Read-only views over the record maps: the dashboard summary and the
//! per-employee earnings history with its running cumulative series.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use types::earning::Earning;
use types::employee::Employee;
use types::ids::{EmployeeId, PlacementId};
use types::placement::Placement;

use crate::error::LedgerError;
use crate::store::Ledger;

/// A placement joined with its employee's name
#[derive(Debug, Clone, Serialize)]
pub struct PlacementWithEmployee {
    #[serde(flatten)]
    pub placement: Placement,
    pub employee_name: Option<String>,
}

/// Tracker-wide dashboard totals
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_placements: usize,
    pub total_employees: usize,
    pub total_fees: Decimal,
    pub total_commissions: Decimal,
    /// Five most recent placements by placement date
    pub recent_placements: Vec<PlacementWithEmployee>,
}

/// One point in an employee's running earnings series
#[derive(Debug, Clone, Serialize)]
pub struct CumulativeEarning {
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub cumulative: Decimal,
    pub placement_id: Option<PlacementId>,
}

/// Full earnings history for one employee
#[derive(Debug, Clone, Serialize)]
pub struct EarningsHistory {
    pub employee: Employee,
    pub earnings: Vec<Earning>,
    pub cumulative_earnings: Vec<CumulativeEarning>,
    pub total_earned: Decimal,
    /// Marginal rate currently in effect, as a fraction
    pub current_rate: Decimal,
    pub placements: Vec<Placement>,
}

impl Ledger {
    /// Placements joined with employee names, in creation order
    pub fn list_placements_with_employees(&self) -> Vec<PlacementWithEmployee> {
        self.list_placements()
            .into_iter()
            .map(|placement| self.join_employee(placement))
            .collect()
    }

    /// Dashboard totals and the five most recent placements
    pub fn dashboard_summary(&self) -> DashboardSummary {
        let placements = self.list_placements();

        let total_fees: Decimal = placements.iter().map(|p| p.fee_amount()).sum();
        let total_commissions: Decimal = self
            .earnings_map()
            .iter()
            .map(|entry| entry.amount)
            .sum();

        let mut recent = placements;
        recent.sort_by(|a, b| b.placement_date.cmp(&a.placement_date));
        recent.truncate(5);

        DashboardSummary {
            total_placements: self.placements_map().len(),
            total_employees: self.employees().len(),
            total_fees,
            total_commissions,
            recent_placements: recent
                .into_iter()
                .map(|placement| self.join_employee(placement))
                .collect(),
        }
    }

    /// Earnings history for one employee, with a running cumulative series
    pub fn earnings_history(&self, id: EmployeeId) -> Result<EarningsHistory, LedgerError> {
        let employee = self.employee(id)?;
        let current_rate = commission_engine::current_rate(
            &employee.commission_structure,
            employee.state.cumulative_fees,
        );

        let mut earnings: Vec<Earning> = self
            .earnings_map()
            .iter()
            .filter(|entry| entry.employee_id == id)
            .map(|entry| entry.clone())
            .collect();
        earnings.sort_by(|a, b| {
            a.calculated_at
                .cmp(&b.calculated_at)
                .then(a.earning_id.cmp(&b.earning_id))
        });

        let mut running_total = Decimal::ZERO;
        let cumulative_earnings = earnings
            .iter()
            .map(|earning| {
                running_total += earning.amount;
                CumulativeEarning {
                    date: earning.calculated_at,
                    amount: earning.amount,
                    cumulative: running_total,
                    placement_id: earning.placement_id,
                }
            })
            .collect();

        let mut placements: Vec<Placement> = self
            .placements_map()
            .iter()
            .filter(|entry| entry.employee_id == id)
            .map(|entry| entry.clone())
            .collect();
        placements.sort_by_key(|placement| placement.placement_id);

        Ok(EarningsHistory {
            employee,
            earnings,
            cumulative_earnings,
            total_earned: running_total,
            current_rate,
            placements,
        })
    }

    fn join_employee(&self, placement: Placement) -> PlacementWithEmployee {
        let employee_name = self
            .employees()
            .get(&placement.employee_id)
            .map(|entry| entry.name.clone());
        PlacementWithEmployee {
            placement,
            employee_name,
        }
    }
}
