//! Commission structure types
//!
//! A commission structure is assigned per employee and replaced wholesale on
//! update, never merged. Rates are fractions (0.10 = 10%), never percentages.

use crate::errors::StructureError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single commission tier
///
/// `threshold` is a cumulative-fee level; once an employee's cumulative fees
/// reach it (inclusive), `rate` becomes the marginal rate for the next unit
/// of fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionTier {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Tiered commission structure for one employee
///
/// Tiers may arrive in any order; consumers interpret them sorted ascending
/// by threshold, with the last-defined rate winning on a duplicate
/// threshold. An absent `base_rate` means 0, an absent tier list means a
/// flat `base_rate`, and `cap` (when present) clamps every effective rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionStructure {
    #[serde(default)]
    pub base_rate: Decimal,
    #[serde(default)]
    pub tiers: Vec<CommissionTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<Decimal>,
}

impl CommissionStructure {
    /// Flat structure with no tiers and no cap
    pub fn flat(base_rate: Decimal) -> Self {
        Self {
            base_rate,
            tiers: Vec::new(),
            cap: None,
        }
    }

    /// Validate the structure at assignment time
    ///
    /// Rejects negative rates, thresholds and caps. Unsorted or duplicate
    /// thresholds are allowed here; they are normalized when rates are
    /// resolved, not silently rewritten on the stored structure.
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.base_rate < Decimal::ZERO {
            return Err(StructureError::NegativeBaseRate {
                rate: self.base_rate.to_string(),
            });
        }
        for tier in &self.tiers {
            if tier.threshold < Decimal::ZERO {
                return Err(StructureError::NegativeThreshold {
                    threshold: tier.threshold.to_string(),
                });
            }
            if tier.rate < Decimal::ZERO {
                return Err(StructureError::NegativeRate {
                    rate: tier.rate.to_string(),
                });
            }
        }
        if let Some(cap) = self.cap {
            if cap < Decimal::ZERO {
                return Err(StructureError::NegativeCap {
                    cap: cap.to_string(),
                });
            }
        }
        Ok(())
    }
}
