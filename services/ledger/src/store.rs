//! Record store and the placement transaction
//!
//! Each record family lives in its own concurrent map keyed by id. The
//! employee entry guard is the per-employee mutual-exclusion scope: the
//! whole read → compute → apply sequence for a placement runs under it.

use chrono::{DateTime, Datelike, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use types::breakdown::CommissionResult;
use types::commission::CommissionStructure;
use types::earning::Earning;
use types::employee::Employee;
use types::ids::{EarningId, EmployeeId, PlacementId};
use types::placement::Placement;

use crate::error::LedgerError;

/// Input for employee creation
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub commission_structure: CommissionStructure,
}

/// Partial employee update; `commission_structure` replaces wholesale
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub commission_structure: Option<CommissionStructure>,
}

/// Input for recording a placement
///
/// `fee_percentage` is a fraction of the starting salary; callers convert
/// display percentages before reaching the ledger.
#[derive(Debug, Clone)]
pub struct NewPlacement {
    pub candidate_name: String,
    pub client_name: String,
    pub starting_salary: Decimal,
    pub fee_percentage: Decimal,
    pub placement_date: DateTime<Utc>,
    pub employee_id: EmployeeId,
}

/// Everything produced by one recorded placement
#[derive(Debug, Clone)]
pub struct PlacementRecorded {
    pub placement: Placement,
    pub earning: Earning,
    pub result: CommissionResult,
    /// Employee snapshot after the totals were applied
    pub employee: Employee,
}

/// In-memory store for all tracker records
#[derive(Debug, Default)]
pub struct Ledger {
    employees: DashMap<EmployeeId, Employee>,
    placements: DashMap<PlacementId, Placement>,
    earnings: DashMap<EarningId, Earning>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Employees ───────────────────────────────────────────────────

    /// Create an employee; the structure is validated at assignment time
    pub fn create_employee(&self, new: NewEmployee) -> Result<Employee, LedgerError> {
        new.commission_structure.validate()?;
        if self.email_taken(&new.email, None) {
            return Err(LedgerError::DuplicateEmail { email: new.email });
        }

        let employee = Employee::new(
            new.name,
            new.email,
            new.phone,
            new.commission_structure,
            Utc::now(),
        );
        self.employees
            .insert(employee.employee_id, employee.clone());
        Ok(employee)
    }

    pub fn employee(&self, id: EmployeeId) -> Result<Employee, LedgerError> {
        self.employees
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(LedgerError::EmployeeNotFound {
                employee_id: id.to_string(),
            })
    }

    /// All employees, in creation order (time-sortable ids)
    pub fn list_employees(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> =
            self.employees.iter().map(|entry| entry.clone()).collect();
        employees.sort_by_key(|employee| employee.employee_id);
        employees
    }

    /// Merge profile fields; a supplied structure replaces the old one
    /// wholesale (never merged) and is validated first
    pub fn update_employee(
        &self,
        id: EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee, LedgerError> {
        if let Some(structure) = &update.commission_structure {
            structure.validate()?;
        }
        if let Some(email) = &update.email {
            if self.email_taken(email, Some(id)) {
                return Err(LedgerError::DuplicateEmail {
                    email: email.clone(),
                });
            }
        }

        let mut entry = self
            .employees
            .get_mut(&id)
            .ok_or(LedgerError::EmployeeNotFound {
                employee_id: id.to_string(),
            })?;
        if let Some(name) = update.name {
            entry.name = name;
        }
        if let Some(email) = update.email {
            entry.email = email;
        }
        if let Some(phone) = update.phone {
            entry.phone = phone;
        }
        if let Some(structure) = update.commission_structure {
            entry.commission_structure = structure;
        }
        Ok(entry.clone())
    }

    /// Delete an employee and cascade to their placements and earnings
    pub fn delete_employee(&self, id: EmployeeId) -> Result<(), LedgerError> {
        self.employees
            .remove(&id)
            .ok_or(LedgerError::EmployeeNotFound {
                employee_id: id.to_string(),
            })?;
        self.placements.retain(|_, placement| placement.employee_id != id);
        self.earnings.retain(|_, earning| earning.employee_id != id);
        Ok(())
    }

    fn email_taken(&self, email: &str, exclude: Option<EmployeeId>) -> bool {
        self.employees.iter().any(|entry| {
            entry.email.eq_ignore_ascii_case(email) && Some(entry.employee_id) != exclude
        })
    }

    // ── Placements ──────────────────────────────────────────────────

    /// Record a placement: the read-modify-write transaction
    ///
    /// Holds the employee's entry guard across the engine call and the
    /// state application, so two concurrent submissions for the same
    /// employee cannot both observe the same "before" totals. Nothing is
    /// persisted unless the calculation fully succeeds.
    pub fn record_placement(
        &self,
        new: NewPlacement,
    ) -> Result<PlacementRecorded, LedgerError> {
        let fee_amount = new.starting_salary * new.fee_percentage;

        let (placement, earning, result, employee) = {
            let mut entry = self.employees.get_mut(&new.employee_id).ok_or(
                LedgerError::EmployeeNotFound {
                    employee_id: new.employee_id.to_string(),
                },
            )?;

            let result = commission_engine::compute_commission(
                &entry.commission_structure,
                &entry.state,
                fee_amount,
            )?;

            let placement = Placement {
                placement_id: PlacementId::new(),
                candidate_name: new.candidate_name,
                client_name: new.client_name,
                starting_salary: new.starting_salary,
                fee_percentage: new.fee_percentage,
                placement_date: new.placement_date,
                placement_year: new.placement_date.year(),
                commission_amount: result.total_commission,
                commission_rate_used: result.new_rate,
                commission_breakdown: result.breakdown.clone(),
                employee_id: new.employee_id,
            };
            let earning = Earning {
                earning_id: EarningId::new(),
                amount: result.total_commission,
                placement_id: Some(placement.placement_id),
                employee_id: new.employee_id,
                calculated_at: Utc::now(),
            };

            entry.state.apply(&result);
            (placement, earning, result, entry.clone())
        };

        self.placements
            .insert(placement.placement_id, placement.clone());
        self.earnings.insert(earning.earning_id, earning.clone());

        tracing::info!(
            employee = %employee.employee_id,
            placement = %placement.placement_id,
            commission = %placement.commission_amount,
            "placement recorded"
        );

        Ok(PlacementRecorded {
            placement,
            earning,
            result,
            employee,
        })
    }

    pub fn placement(&self, id: PlacementId) -> Result<Placement, LedgerError> {
        self.placements
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(LedgerError::PlacementNotFound {
                placement_id: id.to_string(),
            })
    }

    /// All placements, in creation order
    pub fn list_placements(&self) -> Vec<Placement> {
        let mut placements: Vec<Placement> =
            self.placements.iter().map(|entry| entry.clone()).collect();
        placements.sort_by_key(|placement| placement.placement_id);
        placements
    }

    /// Delete a placement, detaching its earnings
    ///
    /// Cumulative totals stand: commission snapshots are never recomputed
    /// retroactively.
    pub fn delete_placement(&self, id: PlacementId) -> Result<(), LedgerError> {
        self.placements
            .remove(&id)
            .ok_or(LedgerError::PlacementNotFound {
                placement_id: id.to_string(),
            })?;
        for mut earning in self.earnings.iter_mut() {
            if earning.placement_id == Some(id) {
                earning.placement_id = None;
            }
        }
        Ok(())
    }

    // ── Commission queries ──────────────────────────────────────────

    /// Preview a calculation without mutating anything
    pub fn preview_commission(
        &self,
        id: EmployeeId,
        fee_amount: Decimal,
    ) -> Result<(Employee, CommissionResult), LedgerError> {
        let employee = self.employee(id)?;
        let result = commission_engine::compute_commission(
            &employee.commission_structure,
            &employee.state,
            fee_amount,
        )?;
        Ok((employee, result))
    }

    /// Marginal rate currently in effect for an employee
    pub fn current_rate(&self, id: EmployeeId) -> Result<Decimal, LedgerError> {
        let employee = self.employee(id)?;
        Ok(commission_engine::current_rate(
            &employee.commission_structure,
            employee.state.cumulative_fees,
        ))
    }

    /// Zero every employee's cumulative totals
    ///
    /// Returns the number of employees actually reset. In-memory zeroing
    /// has no partial-failure mode, so the count is exact.
    pub fn reset_ytd(&self) -> usize {
        let mut reset_count = 0;
        for mut entry in self.employees.iter_mut() {
            entry.state.reset();
            reset_count += 1;
        }
        tracing::info!(reset_count, "reset YTD totals");
        reset_count
    }

    // ── Raw access for reports ──────────────────────────────────────

    pub(crate) fn employees(&self) -> &DashMap<EmployeeId, Employee> {
        &self.employees
    }

    pub(crate) fn placements_map(&self) -> &DashMap<PlacementId, Placement> {
        &self.placements
    }

    pub(crate) fn earnings_map(&self) -> &DashMap<EarningId, Earning> {
        &self.earnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::commission::CommissionTier;
    use types::state::CommissionState;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn tiered_structure() -> CommissionStructure {
        CommissionStructure {
            base_rate: dec("0.10"),
            tiers: vec![CommissionTier {
                threshold: Decimal::from(100_000),
                rate: dec("0.15"),
            }],
            cap: None,
        }
    }

    fn new_employee(email: &str) -> NewEmployee {
        NewEmployee {
            name: "Jordan Hale".to_string(),
            email: email.to_string(),
            phone: String::new(),
            commission_structure: tiered_structure(),
        }
    }

    fn new_placement(employee_id: EmployeeId, salary: u64, fee_fraction: &str) -> NewPlacement {
        NewPlacement {
            candidate_name: "Riley Chen".to_string(),
            client_name: "Meridian Capital".to_string(),
            starting_salary: Decimal::from(salary),
            fee_percentage: dec(fee_fraction),
            placement_date: Utc::now(),
            employee_id,
        }
    }

    #[test]
    fn test_create_and_get_employee() {
        let ledger = Ledger::new();
        let created = ledger.create_employee(new_employee("jordan@example.com")).unwrap();
        let fetched = ledger.employee(created.employee_id).unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.state, CommissionState::zero());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let ledger = Ledger::new();
        ledger.create_employee(new_employee("jordan@example.com")).unwrap();
        let err = ledger
            .create_employee(new_employee("Jordan@Example.com"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateEmail { .. }));
    }

    #[test]
    fn test_invalid_structure_rejected_at_assignment() {
        let ledger = Ledger::new();
        let mut new = new_employee("jordan@example.com");
        new.commission_structure.base_rate = dec("-0.10");
        let err = ledger.create_employee(new).unwrap_err();
        assert!(matches!(err, LedgerError::Structure(_)));
    }

    #[test]
    fn test_update_replaces_structure_wholesale() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();

        let replacement = CommissionStructure::flat(dec("0.12"));
        let updated = ledger
            .update_employee(
                employee.employee_id,
                EmployeeUpdate {
                    commission_structure: Some(replacement.clone()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.commission_structure, replacement);
        assert_eq!(updated.name, employee.name);
    }

    #[test]
    fn test_record_placement_applies_totals() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();

        // 80,000 * 0.25 = 20,000 fee, all below the first threshold
        let recorded = ledger
            .record_placement(new_placement(employee.employee_id, 80_000, "0.25"))
            .unwrap();

        assert_eq!(recorded.placement.fee_amount(), Decimal::from(20_000));
        assert_eq!(recorded.result.total_commission, Decimal::from(2_000));
        assert_eq!(recorded.earning.amount, Decimal::from(2_000));
        assert_eq!(
            recorded.employee.state.cumulative_fees,
            Decimal::from(20_000)
        );
        assert_eq!(
            recorded.employee.state.cumulative_commission,
            Decimal::from(2_000)
        );

        let stored = ledger.employee(employee.employee_id).unwrap();
        assert_eq!(stored.state, recorded.employee.state);
        assert_eq!(ledger.list_placements().len(), 1);
    }

    #[test]
    fn test_record_placement_snapshot_survives_structure_change() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();
        let recorded = ledger
            .record_placement(new_placement(employee.employee_id, 80_000, "0.25"))
            .unwrap();

        ledger
            .update_employee(
                employee.employee_id,
                EmployeeUpdate {
                    commission_structure: Some(CommissionStructure::flat(dec("0.50"))),
                    ..Default::default()
                },
            )
            .unwrap();

        // The stored breakdown is a snapshot of the calculation as made
        let placement = ledger.placement(recorded.placement.placement_id).unwrap();
        assert_eq!(placement.commission_amount, Decimal::from(2_000));
        assert_eq!(placement.commission_breakdown, recorded.result.breakdown);
    }

    #[test]
    fn test_record_placement_missing_employee() {
        let ledger = Ledger::new();
        let err = ledger
            .record_placement(new_placement(EmployeeId::new(), 80_000, "0.25"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::EmployeeNotFound { .. }));
    }

    #[test]
    fn test_delete_employee_cascades() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();
        ledger
            .record_placement(new_placement(employee.employee_id, 80_000, "0.25"))
            .unwrap();

        ledger.delete_employee(employee.employee_id).unwrap();

        assert!(ledger.list_placements().is_empty());
        assert!(ledger.earnings_map().is_empty());
    }

    #[test]
    fn test_delete_placement_detaches_earnings() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();
        let recorded = ledger
            .record_placement(new_placement(employee.employee_id, 80_000, "0.25"))
            .unwrap();

        ledger
            .delete_placement(recorded.placement.placement_id)
            .unwrap();

        let earning = ledger
            .earnings_map()
            .get(&recorded.earning.earning_id)
            .unwrap()
            .clone();
        assert_eq!(earning.placement_id, None);
        assert_eq!(earning.amount, Decimal::from(2_000));

        // Totals stand
        let stored = ledger.employee(employee.employee_id).unwrap();
        assert_eq!(stored.state.cumulative_fees, Decimal::from(20_000));
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();

        let (_, result) = ledger
            .preview_commission(employee.employee_id, Decimal::from(20_000))
            .unwrap();
        assert_eq!(result.total_commission, Decimal::from(2_000));

        let stored = ledger.employee(employee.employee_id).unwrap();
        assert_eq!(stored.state, CommissionState::zero());
        assert!(ledger.list_placements().is_empty());
    }

    #[test]
    fn test_reset_ytd_returns_true_count() {
        let ledger = Ledger::new();
        let a = ledger.create_employee(new_employee("a@example.com")).unwrap();
        let b = ledger.create_employee(new_employee("b@example.com")).unwrap();
        ledger
            .record_placement(new_placement(a.employee_id, 80_000, "0.25"))
            .unwrap();

        assert_eq!(ledger.reset_ytd(), 2);

        for id in [a.employee_id, b.employee_id] {
            let employee = ledger.employee(id).unwrap();
            assert_eq!(employee.state, CommissionState::zero());
        }
    }

    #[test]
    fn test_reset_then_recompute_like_new_employee() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();

        // Push past the tier threshold, then reset
        ledger
            .record_placement(new_placement(employee.employee_id, 600_000, "0.25"))
            .unwrap();
        ledger.reset_ytd();

        // Same fee as a brand-new employee's first placement: base rate again
        let recorded = ledger
            .record_placement(new_placement(employee.employee_id, 80_000, "0.25"))
            .unwrap();
        assert_eq!(recorded.result.breakdown.len(), 1);
        assert_eq!(recorded.result.breakdown[0].rate, dec("0.10"));
        assert_eq!(recorded.result.total_commission, Decimal::from(2_000));
    }

    #[test]
    fn test_current_rate_query() {
        let ledger = Ledger::new();
        let employee = ledger.create_employee(new_employee("jordan@example.com")).unwrap();
        assert_eq!(ledger.current_rate(employee.employee_id).unwrap(), dec("0.10"));

        // 500,000 * 0.25 = 125,000 cumulative fees, past the 100,000 tier
        ledger
            .record_placement(new_placement(employee.employee_id, 500_000, "0.25"))
            .unwrap();
        assert_eq!(ledger.current_rate(employee.employee_id).unwrap(), dec("0.15"));
    }
}
