//! Commission calculation results
//!
//! A calculation produces one `CommissionResult` per fee event: the total
//! commission, the ordered per-segment breakdown, the before/after totals
//! and the resulting marginal rate. Results are persisted as denormalized
//! snapshots and never recomputed when the structure later changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous slice of a fee event taxed at one constant effective rate
///
/// Invariants: `to_cumulative_fees - from_cumulative_fees == fee_amount`
/// and `commission == fee_amount * rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from_cumulative_fees: Decimal,
    pub to_cumulative_fees: Decimal,
    pub fee_amount: Decimal,
    /// Effective (cap-clamped) rate applied to this slice, as a fraction
    pub rate: Decimal,
    pub commission: Decimal,
    /// Tier threshold this segment ended on, when it ended by reaching one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reached_threshold: Option<Decimal>,
}

/// Outcome of applying one fee event to an employee's cumulative state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionResult {
    pub total_commission: Decimal,
    /// Segments in the order fee-space was consumed
    pub breakdown: Vec<Segment>,
    pub cumulative_fees_before: Decimal,
    pub cumulative_fees_after: Decimal,
    pub cumulative_commission_before: Decimal,
    pub cumulative_commission_after: Decimal,
    /// Marginal rate in effect at `cumulative_fees_after`, post-cap
    pub new_rate: Decimal,
}

impl CommissionResult {
    /// Total fee amount consumed by this result
    pub fn fee_amount(&self) -> Decimal {
        self.cumulative_fees_after - self.cumulative_fees_before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_serde_round_trip() {
        let segment = Segment {
            from_cumulative_fees: Decimal::from(90_000),
            to_cumulative_fees: Decimal::from(100_000),
            fee_amount: Decimal::from(10_000),
            rate: Decimal::from_str_exact("0.10").unwrap(),
            commission: Decimal::from(1_000),
            reached_threshold: Some(Decimal::from(100_000)),
        };
        let json = serde_json::to_string(&segment).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(segment, back);
    }

    #[test]
    fn test_reached_threshold_omitted_when_absent() {
        let segment = Segment {
            from_cumulative_fees: Decimal::ZERO,
            to_cumulative_fees: Decimal::from(50_000),
            fee_amount: Decimal::from(50_000),
            rate: Decimal::from_str_exact("0.10").unwrap(),
            commission: Decimal::from(5_000),
            reached_threshold: None,
        };
        let json = serde_json::to_string(&segment).unwrap();
        assert!(!json.contains("reached_threshold"));
    }

    #[test]
    fn test_result_fee_amount() {
        let result = CommissionResult {
            total_commission: Decimal::from(2_500),
            breakdown: Vec::new(),
            cumulative_fees_before: Decimal::from(90_000),
            cumulative_fees_after: Decimal::from(110_000),
            cumulative_commission_before: Decimal::ZERO,
            cumulative_commission_after: Decimal::from(2_500),
            new_rate: Decimal::from_str_exact("0.15").unwrap(),
        };
        assert_eq!(result.fee_amount(), Decimal::from(20_000));
    }
}
