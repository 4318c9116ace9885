//! # Rounding and Totals
//!
//! Prices are always charged in half-sol steps, rounding up. The two
//! calculators finish a line differently:
//!
//! - glass: round the unit price, then multiply by quantity
//! - frame: round the unit price, multiply, then round the total again
//!
//! Both are kept as named strategies so each calculator states which one it uses.

use serde::{Deserialize, Serialize};

/// Distance from a whole cent below which a price counts as that cent.
const CENT_TOLERANCE: f64 = 1e-6;

/// Drop float noise left by summing costs, e.g. `7.000000000000001` → `7.0`.
fn snap_to_cents(price: f64) -> f64 {
    let cents = (price * 100.0).round() / 100.0;
    if (price - cents).abs() < CENT_TOLERANCE {
        cents
    } else {
        price
    }
}

/// Round up to the next .50 or .00; exact .00 and .50 are kept.
///
/// Prices are snapped to the nearest cent first when they are only float
/// noise away from it.
///
/// ```rust
/// use pricing_core::rounding::round_up_to_half_or_whole;
///
/// assert_eq!(round_up_to_half_or_whole(42.0), 42.0);
/// assert_eq!(round_up_to_half_or_whole(42.1), 42.5);
/// assert_eq!(round_up_to_half_or_whole(42.5), 42.5);
/// assert_eq!(round_up_to_half_or_whole(42.51), 43.0);
/// ```
pub fn round_up_to_half_or_whole(price: f64) -> f64 {
    let price = snap_to_cents(price);
    let int_part = price.floor();
    let frac = price - int_part;
    if frac == 0.0 {
        price
    } else if frac <= 0.5 {
        int_part + 0.5
    } else {
        int_part + 1.0
    }
}

/// How a line total is derived from a raw unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingStrategy {
    /// total = round(unit) × quantity (glass calculator)
    RoundUnitOnly,
    /// total = round(round(unit) × quantity) (frame calculator)
    RoundUnitAndTotal,
}

impl RoundingStrategy {
    pub fn unit_price(&self, raw_unit_price: f64) -> f64 {
        round_up_to_half_or_whole(raw_unit_price)
    }

    pub fn total_price(&self, raw_unit_price: f64, quantity: u32) -> f64 {
        let total = self.unit_price(raw_unit_price) * f64::from(quantity);
        match self {
            RoundingStrategy::RoundUnitOnly => total,
            RoundingStrategy::RoundUnitAndTotal => round_up_to_half_or_whole(total),
        }
    }

    /// Rounded unit price and total for a line.
    pub fn finalize(&self, raw_unit_price: f64, quantity: u32) -> LineTotals {
        LineTotals {
            unit_price: self.unit_price(raw_unit_price),
            total_price: self.total_price(raw_unit_price, quantity),
        }
    }
}

/// Rounded figures for one line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    pub unit_price: f64,
    pub total_price: f64,
}
