//! Ledger Service
//!
//! In-memory persistence store for employees, placements and earnings.
//! Owns the read-modify-write transaction boundary around the commission
//! engine: recording a placement reads an employee's cumulative totals,
//! computes the commission, and applies the result while holding that
//! employee's entry guard, so concurrent submissions for one employee
//! serialize instead of losing updates.

pub mod error;
pub mod reports;
pub mod store;

pub use error::LedgerError;
pub use store::{Ledger, NewEmployee, NewPlacement, EmployeeUpdate, PlacementRecorded};
