//! Per-employee cumulative commission state
//!
//! Invariant: both totals are monotonically non-decreasing between resets;
//! a reset sets both to exactly zero.

use crate::breakdown::CommissionResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running totals for one employee
///
/// This is an explicit state value read by the caller, passed to the
/// engine, and written back only after a fully successful calculation.
/// The engine itself never touches a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommissionState {
    /// Running total of all fee amounts ever processed
    pub cumulative_fees: Decimal,
    /// Running total of commission ever paid
    pub cumulative_commission: Decimal,
}

impl CommissionState {
    /// Fresh state with both totals at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Reset both totals to exactly zero
    pub fn reset(&mut self) {
        self.cumulative_fees = Decimal::ZERO;
        self.cumulative_commission = Decimal::ZERO;
    }

    /// Adopt the post-calculation totals of a commission result
    ///
    /// # Panics
    /// Panics if the result was computed against different "before" totals;
    /// callers must hold the state fixed across read, compute and apply.
    pub fn apply(&mut self, result: &CommissionResult) {
        assert_eq!(
            result.cumulative_fees_before, self.cumulative_fees,
            "result computed against stale cumulative fees"
        );
        assert_eq!(
            result.cumulative_commission_before, self.cumulative_commission,
            "result computed against stale cumulative commission"
        );
        self.cumulative_fees = result.cumulative_fees_after;
        self.cumulative_commission = result.cumulative_commission_after;
    }
}
