//! Commission Engine Service
//!
//! Pure tiered-commission calculation: given an employee's commission
//! structure, their cumulative totals and a new fee amount, determine how
//! the fee splits across rate tiers, the commission owed per segment, and
//! the updated cumulative state.
//!
//! **Key Invariants:**
//! - Tier thresholds are inclusive: reaching one exactly switches the
//!   marginal rate for the next unit of fee
//! - Every breakdown is contiguous and ordered; segment commissions sum to
//!   the total
//! - Deterministic decimal arithmetic (same inputs → same outputs)
//! - No I/O and no shared state; callers own persistence

pub mod engine;
pub mod schedule;

pub use engine::{compute_commission, current_rate};
