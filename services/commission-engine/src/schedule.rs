//! Normalized tier schedules
//!
//! A `CommissionStructure` accepts tiers in any order and tolerates
//! duplicate thresholds. `RateSchedule` is the normalized form every
//! calculation runs against: tiers stable-sorted ascending by threshold,
//! duplicates collapsed to the last-defined rate.

use rust_decimal::Decimal;
use types::commission::CommissionStructure;

/// Normalized, cap-aware view of one commission structure
#[derive(Debug, Clone)]
pub struct RateSchedule {
    base_rate: Decimal,
    /// (threshold, rate) ascending by threshold, thresholds unique
    tiers: Vec<(Decimal, Decimal)>,
    cap: Option<Decimal>,
}

impl RateSchedule {
    pub fn new(structure: &CommissionStructure) -> Self {
        let mut tiers: Vec<(Decimal, Decimal)> = structure
            .tiers
            .iter()
            .map(|tier| (tier.threshold, tier.rate))
            .collect();
        // Stable sort keeps definition order among equal thresholds, so the
        // last-defined rate survives the collapse below.
        tiers.sort_by(|a, b| a.0.cmp(&b.0));
        tiers.dedup_by(|current, kept| {
            if current.0 == kept.0 {
                kept.1 = current.1;
                true
            } else {
                false
            }
        });
        Self {
            base_rate: structure.base_rate,
            tiers,
            cap: structure.cap,
        }
    }

    /// Clamp a rate to the cap, when one is set
    pub fn clamp(&self, rate: Decimal) -> Decimal {
        match self.cap {
            Some(cap) => rate.min(cap),
            None => rate,
        }
    }

    /// Marginal rate at a cumulative-fee position, post-cap
    ///
    /// Thresholds are inclusive: the tier with the largest threshold
    /// `<= position` wins; below every threshold the base rate applies.
    pub fn rate_at(&self, position: Decimal) -> Decimal {
        let mut rate = self.base_rate;
        for (threshold, tier_rate) in &self.tiers {
            if position >= *threshold {
                rate = *tier_rate;
            }
        }
        self.clamp(rate)
    }

    /// Smallest tier threshold strictly greater than `position`
    ///
    /// The strict comparison guarantees forward progress when a calculation
    /// sits exactly on a boundary.
    pub fn next_boundary(&self, position: Decimal) -> Option<(Decimal, Decimal)> {
        self.tiers
            .iter()
            .find(|(threshold, _)| *threshold > position)
            .copied()
    }
}
