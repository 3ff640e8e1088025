//! Effective unit prices.
//!
//! An override keyed by the material's name wins; otherwise the catalog's
//! current price, otherwise its default price. Overrides are assumed to be
//! validated (non-negative) already.

use rust_decimal::Decimal;

use crate::materials::Material;
use crate::request::PriceOverrides;

/// Unit price for `material` under `overrides`. A missing material costs 0.
pub fn resolve_unit_price(material: Option<&Material>, overrides: &PriceOverrides) -> Decimal {
    match material {
        Some(material) => overrides
            .get(&material.name)
            .copied()
            .unwrap_or_else(|| material.effective_price()),
        None => Decimal::ZERO,
    }
}
