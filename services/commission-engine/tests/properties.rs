//! Property-based tests for the commission calculation
//!
//! Laws checked over arbitrary structures, starting positions and fee
//! amounts:
//! - segment commissions sum to the total, segment fees sum to the input
//! - breakdowns are contiguous and ordered
//! - zero fees change nothing
//! - no effective rate ever exceeds the cap
//! - the reported marginal rate matches a fresh rate query at the final
//!   position

use commission_engine::{compute_commission, current_rate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use types::commission::{CommissionStructure, CommissionTier};
use types::state::CommissionState;

/// Money amounts with cent precision, 0 to max (given in cents)
fn money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rates as fractions with basis-point precision, 0 to 0.50
fn rate() -> impl Strategy<Value = Decimal> {
    (0..=5_000i64).prop_map(|bps| Decimal::new(bps, 4))
}

prop_compose! {
    fn structure()(
        base_rate in rate(),
        tiers in proptest::collection::vec((money(50_000_000), rate()), 0..5),
        cap in proptest::option::of(rate()),
    ) -> CommissionStructure {
        CommissionStructure {
            base_rate,
            tiers: tiers
                .into_iter()
                .map(|(threshold, rate)| CommissionTier { threshold, rate })
                .collect(),
            cap,
        }
    }
}

fn state_at(cumulative_fees: Decimal) -> CommissionState {
    CommissionState {
        cumulative_fees,
        cumulative_commission: Decimal::ZERO,
    }
}

proptest! {
    #[test]
    fn prop_segment_sums_match_totals(
        s in structure(),
        before in money(60_000_000),
        fee in money(20_000_000),
    ) {
        let result = compute_commission(&s, &state_at(before), fee).unwrap();

        let commission_sum: Decimal = result.breakdown.iter().map(|seg| seg.commission).sum();
        let fee_sum: Decimal = result.breakdown.iter().map(|seg| seg.fee_amount).sum();

        prop_assert_eq!(commission_sum, result.total_commission);
        prop_assert_eq!(fee_sum, fee);
        prop_assert_eq!(
            result.cumulative_commission_after - result.cumulative_commission_before,
            result.total_commission
        );
    }

    #[test]
    fn prop_breakdown_is_contiguous(
        s in structure(),
        before in money(60_000_000),
        fee in money(20_000_000),
    ) {
        let result = compute_commission(&s, &state_at(before), fee).unwrap();

        if let Some(first) = result.breakdown.first() {
            prop_assert_eq!(first.from_cumulative_fees, result.cumulative_fees_before);
        }
        if let Some(last) = result.breakdown.last() {
            prop_assert_eq!(last.to_cumulative_fees, result.cumulative_fees_after);
        }
        for pair in result.breakdown.windows(2) {
            prop_assert_eq!(pair[0].to_cumulative_fees, pair[1].from_cumulative_fees);
        }
        for segment in &result.breakdown {
            prop_assert_eq!(
                segment.to_cumulative_fees - segment.from_cumulative_fees,
                segment.fee_amount
            );
            prop_assert_eq!(segment.fee_amount * segment.rate, segment.commission);
            prop_assert!(segment.fee_amount > Decimal::ZERO, "no zero-length segments");
        }
    }

    #[test]
    fn prop_zero_fee_changes_nothing(s in structure(), before in money(60_000_000)) {
        let result = compute_commission(&s, &state_at(before), Decimal::ZERO).unwrap();

        prop_assert!(result.breakdown.is_empty());
        prop_assert_eq!(result.total_commission, Decimal::ZERO);
        prop_assert_eq!(result.cumulative_fees_after, before);
        prop_assert_eq!(result.new_rate, current_rate(&s, before));
    }

    #[test]
    fn prop_cap_bounds_every_rate(
        s in structure(),
        before in money(60_000_000),
        fee in money(20_000_000),
    ) {
        let result = compute_commission(&s, &state_at(before), fee).unwrap();

        if let Some(cap) = s.cap {
            for segment in &result.breakdown {
                prop_assert!(segment.rate <= cap);
            }
            prop_assert!(result.new_rate <= cap);
        }
    }

    #[test]
    fn prop_new_rate_matches_fresh_query(
        s in structure(),
        before in money(60_000_000),
        fee in money(20_000_000),
    ) {
        let result = compute_commission(&s, &state_at(before), fee).unwrap();
        prop_assert_eq!(result.new_rate, current_rate(&s, result.cumulative_fees_after));
    }

    #[test]
    fn prop_cumulative_fees_monotonic(
        s in structure(),
        before in money(60_000_000),
        fee in money(20_000_000),
    ) {
        let result = compute_commission(&s, &state_at(before), fee).unwrap();
        prop_assert!(result.cumulative_fees_after >= result.cumulative_fees_before);
        prop_assert!(
            result.cumulative_commission_after >= result.cumulative_commission_before
        );
    }
}
