//! # Quantities and Rounding
//!
//! Small helpers shared by every stage of the calculation: the purchase unit
//! attached to each bill-of-materials line, two-decimal rounding, and the
//! decimal ceiling division used for posts, rolls and boxes.
//!
//! All arithmetic is on [`Decimal`] so that exact multiples never pick up
//! floating-point residue (`100 / 0.1` is exactly `1000`, not `1000.0000001`).
//! Every helper here is total: no division by zero, no overflow panics.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::units::{ceil_div, round_2};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(ceil_div(dec!(100), dec!(8)), 13);
//! assert_eq!(ceil_div(dec!(96), dec!(8)), 12);
//! assert_eq!(ceil_div(dec!(100), dec!(0)), 0);
//! assert_eq!(round_2(dec!(12.345)), dec!(12.34));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit in which a line item's quantity is purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    /// Individual pieces (posts, insulators, strainers)
    Count,
    /// Whole rolls of wire or netting
    Rolls,
    /// Whole boxes (staples)
    Boxes,
}

impl QuantityUnit {
    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            QuantityUnit::Count => "ea",
            QuantityUnit::Rolls => "rolls",
            QuantityUnit::Boxes => "boxes",
        }
    }
}

/// Round to two decimal places (round-half-even).
pub fn round_2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Ceiling of `numerator / denominator` as a whole count.
///
/// Returns 0 when either side is non-positive and saturates at `u64::MAX`.
pub fn ceil_div(numerator: Decimal, denominator: Decimal) -> u64 {
    if denominator <= Decimal::ZERO || numerator <= Decimal::ZERO {
        return 0;
    }
    match numerator.checked_div(denominator) {
        Some(quotient) => quotient.ceil().to_u64().unwrap_or(u64::MAX),
        None => u64::MAX,
    }
}

/// `a * b`, saturating at [`Decimal::MAX`].
pub fn mul_saturating(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::MAX)
}

/// `a + b`, saturating at [`Decimal::MAX`].
pub fn add_saturating(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Length of `count` parallel runs of `length_m`, rounded to 2 places.
pub fn run_length(count: u64, length_m: Decimal) -> Decimal {
    round_2(mul_saturating(Decimal::from(count), length_m))
}
