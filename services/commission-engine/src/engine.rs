//! Tiered commission calculation
//!
//! The calculation walks a fee event through the employee's rate schedule,
//! emitting one segment per constant-rate slice. It is a pure function of
//! (structure, state before, fee amount); the caller applies the returned
//! result to its store only after the call fully succeeds.

use rust_decimal::Decimal;
use types::breakdown::{CommissionResult, Segment};
use types::commission::CommissionStructure;
use types::errors::CommissionError;
use types::state::CommissionState;

use crate::schedule::RateSchedule;

/// Marginal rate in effect at a cumulative-fee position, post-cap
///
/// Read-only preview query: returns the base rate below every tier
/// threshold, otherwise the rate of the tier with the largest threshold
/// `<= cumulative_fees` (thresholds are inclusive), clamped to the cap.
/// A structure with no tiers degenerates to a flat clamped base rate.
pub fn current_rate(structure: &CommissionStructure, cumulative_fees: Decimal) -> Decimal {
    RateSchedule::new(structure).rate_at(cumulative_fees)
}

/// Split a fee event across rate tiers and compute the commission owed
///
/// Returns the per-segment breakdown in the order fee-space was consumed,
/// the summed commission, the updated cumulative totals and the marginal
/// rate at the final position. Rejects negative fee amounts before doing
/// any work; a zero fee yields an empty breakdown with before == after.
pub fn compute_commission(
    structure: &CommissionStructure,
    state: &CommissionState,
    fee_amount: Decimal,
) -> Result<CommissionResult, CommissionError> {
    if fee_amount < Decimal::ZERO {
        return Err(CommissionError::NegativeFeeAmount {
            amount: fee_amount.to_string(),
        });
    }

    let schedule = RateSchedule::new(structure);
    let mut position = state.cumulative_fees;
    let mut remaining = fee_amount;
    let mut rate = schedule.rate_at(position);
    let mut breakdown = Vec::new();
    let mut total_commission = Decimal::ZERO;

    while remaining > Decimal::ZERO {
        match schedule.next_boundary(position) {
            // The slice up to the boundary fits in what remains: consume
            // exactly that much, then switch to the tier's rate (re-clamped)
            // for the next slice.
            Some((threshold, tier_rate)) if threshold - position <= remaining => {
                let fee = threshold - position;
                let commission = fee * rate;
                breakdown.push(Segment {
                    from_cumulative_fees: position,
                    to_cumulative_fees: threshold,
                    fee_amount: fee,
                    rate,
                    commission,
                    reached_threshold: Some(threshold),
                });
                total_commission += commission;
                position = threshold;
                remaining -= fee;
                rate = schedule.clamp(tier_rate);
            }
            // Boundary out of reach, or no boundaries left: the rest of the
            // fee stays in the current tier.
            _ => {
                let commission = remaining * rate;
                breakdown.push(Segment {
                    from_cumulative_fees: position,
                    to_cumulative_fees: position + remaining,
                    fee_amount: remaining,
                    rate,
                    commission,
                    reached_threshold: None,
                });
                total_commission += commission;
                position += remaining;
                remaining = Decimal::ZERO;
            }
        }
    }

    // Recomputed from the final position rather than carried out of the
    // loop, so inclusive-boundary and cap semantics hold even for a fee
    // that lands exactly on a threshold (or never entered the loop).
    let new_rate = schedule.rate_at(position);

    Ok(CommissionResult {
        total_commission,
        breakdown,
        cumulative_fees_before: state.cumulative_fees,
        cumulative_fees_after: position,
        cumulative_commission_before: state.cumulative_commission,
        cumulative_commission_after: state.cumulative_commission + total_commission,
        new_rate,
    })
}
