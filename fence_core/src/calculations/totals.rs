//! # Totals and Display Lines
//!
//! Folds priced line items into material, labor and grand totals, and
//! groups lines by material name for reports.
//!
//! [`combine_for_display`] is presentation only. It collapses roles that
//! coincidentally name the same material (case and surrounding whitespace
//! ignored) and never feeds back into the totals.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_items::MaterialCosts;
use crate::units::{add_saturating, mul_saturating, round_2, QuantityUnit};

/// Money and labor totals for a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_material_cost: Decimal,
    pub labor_hours: Decimal,
    pub labor_cost: Decimal,
    pub total_cost: Decimal,
}

/// Fold `costs` and the labor inputs into [`Totals`].
///
/// A non-positive build rate yields zero labor rather than an error.
pub fn summarize(costs: &MaterialCosts, fence_length: Decimal, labor_rate: Decimal, build_rate: Decimal) -> Totals {
    let total_material_cost = costs.total();
    let labor_hours = labor_hours(fence_length, build_rate);
    let labor_cost = round_2(mul_saturating(labor_hours, labor_rate));
    Totals {
        total_material_cost,
        labor_hours,
        labor_cost,
        total_cost: round_2(add_saturating(total_material_cost, labor_cost)),
    }
}

/// `fence_length / build_rate`, 2 dp.
pub fn labor_hours(fence_length: Decimal, build_rate: Decimal) -> Decimal {
    if build_rate <= Decimal::ZERO || fence_length <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_2(fence_length.checked_div(build_rate).unwrap_or(Decimal::MAX))
}

/// A report row merging every role that names the same material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedLine {
    /// Name as first seen
    pub material: String,
    /// Unit price as first seen
    pub unit_price: Decimal,
    pub quantity: u64,
    pub unit: QuantityUnit,
    pub cost: Decimal,
}

/// Group line items by trimmed, case-insensitive material name.
///
/// Rows keep the role order of their first occurrence. Quantities and costs
/// are summed; the unit price is not re-derived.
pub fn combine_for_display(costs: &MaterialCosts) -> Vec<CombinedLine> {
    let mut rows: Vec<CombinedLine> = Vec::with_capacity(costs.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for (_, item) in costs.iter() {
        let key = item.material.trim().to_lowercase();
        match index.get(&key) {
            Some(&at) => {
                let row = &mut rows[at];
                row.quantity = row.quantity.saturating_add(item.quantity);
                row.cost = round_2(add_saturating(row.cost, item.cost));
            }
            None => {
                index.insert(key, rows.len());
                rows.push(CombinedLine {
                    material: item.material.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    unit: item.unit,
                    cost: item.cost,
                });
            }
        }
    }

    rows
}
