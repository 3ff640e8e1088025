//! # Fence Calculations
//!
//! The engine runs four stages, each feeding the next:
//!
//! - [`planner`] - posts, wires, rolls, staples, insulators, reinforcement
//! - [`pricing`] - effective unit price per material
//! - [`line_items`] - one priced entry per material role
//! - [`totals`] - material, labor and grand totals, plus the display combiner
//!
//! [`calculate`] ties them together. It is a pure function of its inputs and
//! never fails: requests are validated beforehand by
//! [`crate::validation::validate_calculation_input`], and catalog gaps only
//! drop line items.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::calculations::{calculate, LineItemKind};
//! use fence_core::config::EngineConfig;
//! use fence_core::materials::seed;
//! use fence_core::request::CalculationRequest;
//! use rust_decimal_macros::dec;
//!
//! let catalog = seed::materials();
//! let fences = seed::fence_types(&catalog).unwrap();
//! let request = CalculationRequest::new(dec!(100));
//!
//! let result = calculate(&fences[0], &request, &catalog, &EngineConfig::default());
//! assert_eq!(result.posts_required, 14);
//! assert_eq!(result.wire_rolls_required, 1);
//! assert!(result.material_costs.contains(LineItemKind::Posts));
//! ```

pub mod line_items;
pub mod planner;
pub mod pricing;
pub mod totals;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::fence::{FenceKind, FenceSpecification};
use crate::materials::MaterialCatalog;
use crate::request::{CalculationRequest, NettingType, TopWireType};
use crate::units::round_2;

pub use line_items::{build_line_items, merge_shared_wire, LineItem, LineItemKind, MaterialCosts};
pub use planner::{
    plan_quantities, InsulatorCounts, OutriggerDetails, QuantityPlan, StapleCounts, StrainerRecommendation,
};
pub use pricing::resolve_unit_price;
pub use totals::{combine_for_display, summarize, CombinedLine, Totals};

/// Everything a report or saved quote needs from one calculation.
///
/// Money and lengths are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub fence_type: FenceKind,
    pub fence_type_name: String,
    pub fence_length: Decimal,

    pub posts_required: u64,
    pub post_spacing_used: Decimal,
    pub wire_count_used: u32,
    pub top_wire_type: TopWireType,
    /// All wires, standard and special
    pub wire_length_meters: Decimal,
    pub wire_rolls_required: u64,

    pub labor_hours: Decimal,
    pub labor_rate_per_hour: Decimal,
    pub build_rate_per_hour: Decimal,
    pub labor_cost: Decimal,

    pub material_costs: MaterialCosts,
    pub total_material_cost: Decimal,
    pub total_cost: Decimal,

    pub insulator_counts: InsulatorCounts,
    pub strainer_recommendation: StrainerRecommendation,
    pub staple_counts: StapleCounts,

    pub netting_type: NettingType,
    pub netting_height_cm: Option<Decimal>,
    pub netting_rolls_required: u64,

    /// Whether the outrigger was actually planned (requires deer netting)
    pub electric_outrigger: bool,
    pub electric_outrigger_details: Option<OutriggerDetails>,
}

impl CalculationResult {
    /// Report rows merged by material name.
    pub fn display_lines(&self) -> Vec<CombinedLine> {
        combine_for_display(&self.material_costs)
    }
}

/// Calculate materials, labor and cost for `request` on `fence`.
pub fn calculate<C: MaterialCatalog>(
    fence: &FenceSpecification,
    request: &CalculationRequest,
    catalog: &C,
    config: &EngineConfig,
) -> CalculationResult {
    let labor_rate = request.labor_rate.unwrap_or(config.labor_rate_default);
    let build_rate = request.build_rate.unwrap_or(config.build_rate_default);

    let plan = plan_quantities(fence, request, catalog, config);
    debug!(
        fence_type = %fence.kind,
        length = %plan.fence_length,
        posts = plan.posts,
        wires = plan.wires.total_wires,
        special_wires = plan.wires.special_wires,
        wire_rolls = plan.wires.total_rolls(),
        netting_rolls = plan.netting.rolls,
        "planned quantities"
    );

    let material_costs = build_line_items(fence, &plan, &request.price_overrides, catalog, config);
    let totals = summarize(&material_costs, request.fence_length, labor_rate, build_rate);
    debug!(
        lines = material_costs.len(),
        materials = %totals.total_material_cost,
        labor = %totals.labor_cost,
        total = %totals.total_cost,
        "priced calculation"
    );

    CalculationResult {
        fence_type: fence.kind,
        fence_type_name: fence.display_name.clone(),
        fence_length: round_2(plan.fence_length),
        posts_required: plan.posts,
        post_spacing_used: round_2(plan.post_spacing),
        wire_count_used: plan.wires.total_wires,
        top_wire_type: plan.wires.top_wire,
        wire_length_meters: plan.wires.total_length,
        wire_rolls_required: plan.wires.total_rolls(),
        labor_hours: totals.labor_hours,
        labor_rate_per_hour: round_2(labor_rate),
        build_rate_per_hour: round_2(build_rate),
        labor_cost: totals.labor_cost,
        total_material_cost: totals.total_material_cost,
        total_cost: totals.total_cost,
        material_costs,
        insulator_counts: plan.insulators,
        strainer_recommendation: plan.strainers,
        staple_counts: plan.staples,
        netting_type: plan.netting.netting_type,
        netting_height_cm: plan.netting.height_cm,
        netting_rolls_required: plan.netting.rolls,
        electric_outrigger: plan.outrigger.is_some(),
        electric_outrigger_details: plan.outrigger.as_ref().map(|o| o.details()),
    }
}
