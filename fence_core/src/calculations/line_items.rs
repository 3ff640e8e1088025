//! # Line Items
//!
//! Turns a [`QuantityPlan`] into priced bill-of-materials entries, one per
//! material role.
//!
//! A role is emitted only when its quantity is non-zero and its material
//! resolves; a missing catalog material drops the line, it never fails the
//! calculation.
//!
//! When the hot or barbed top wire is cut from the same roll stock as the
//! standard wire, both runs are ordered as a single `wire_standard` line
//! (see [`merge_shared_wire`]).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::planner::{QuantityPlan, WirePlan};
use super::pricing::resolve_unit_price;
use crate::config::EngineConfig;
use crate::fence::FenceSpecification;
use crate::materials::{Material, MaterialCatalog};
use crate::request::{PriceOverrides, TopWireType};
use crate::units::{add_saturating, mul_saturating, round_2, QuantityUnit};

/// Material role of a bill-of-materials line, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Posts,
    WireStandard,
    WireTopHot,
    WireTopBarb,
    Netting,
    Staples,
    InsulatorsBullnose,
    InsulatorsClaw,
    Strainers,
    StayPosts,
    Triplex,
    OutriggerWire,
    OutriggerInsulators,
    OutriggerConnectors,
}

impl LineItemKind {
    /// Role key as it appears in serialized results
    pub fn key(&self) -> &'static str {
        match self {
            LineItemKind::Posts => "posts",
            LineItemKind::WireStandard => "wire_standard",
            LineItemKind::WireTopHot => "wire_top_hot",
            LineItemKind::WireTopBarb => "wire_top_barb",
            LineItemKind::Netting => "netting",
            LineItemKind::Staples => "staples",
            LineItemKind::InsulatorsBullnose => "insulators_bullnose",
            LineItemKind::InsulatorsClaw => "insulators_claw",
            LineItemKind::Strainers => "strainers",
            LineItemKind::StayPosts => "stay_posts",
            LineItemKind::Triplex => "triplex",
            LineItemKind::OutriggerWire => "outrigger_wire",
            LineItemKind::OutriggerInsulators => "outrigger_insulators",
            LineItemKind::OutriggerConnectors => "outrigger_connectors",
        }
    }

    pub fn unit(&self) -> QuantityUnit {
        match self {
            LineItemKind::WireStandard
            | LineItemKind::WireTopHot
            | LineItemKind::WireTopBarb
            | LineItemKind::Netting
            | LineItemKind::OutriggerWire => QuantityUnit::Rolls,
            LineItemKind::Staples => QuantityUnit::Boxes,
            LineItemKind::Posts
            | LineItemKind::InsulatorsBullnose
            | LineItemKind::InsulatorsClaw
            | LineItemKind::Strainers
            | LineItemKind::StayPosts
            | LineItemKind::Triplex
            | LineItemKind::OutriggerInsulators
            | LineItemKind::OutriggerConnectors => QuantityUnit::Count,
        }
    }

    /// Role of a top wire cut from its own material.
    pub fn top_wire(top_wire: TopWireType) -> Option<LineItemKind> {
        match top_wire {
            TopWireType::Standard => None,
            TopWireType::Hot => Some(LineItemKind::WireTopHot),
            TopWireType::Barb => Some(LineItemKind::WireTopBarb),
        }
    }
}

/// One priced bill-of-materials entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog material name
    pub material: String,
    /// Effective unit price, 2 dp
    pub unit_price: Decimal,
    pub quantity: u64,
    pub unit: QuantityUnit,
    /// `unit_price * quantity`, 2 dp
    pub cost: Decimal,
}

impl LineItem {
    /// Price `quantity` of `material` for `kind`.
    ///
    /// Cost is computed from the unrounded unit price and rounded once.
    pub fn priced(kind: LineItemKind, material: &Material, quantity: u64, overrides: &PriceOverrides) -> Self {
        let price = resolve_unit_price(Some(material), overrides);
        LineItem {
            material: material.name.clone(),
            unit_price: round_2(price),
            quantity,
            unit: kind.unit(),
            cost: round_2(mul_saturating(price, Decimal::from(quantity))),
        }
    }
}

/// Priced line items keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCosts(BTreeMap<LineItemKind, LineItem>);

impl MaterialCosts {
    pub fn new() -> Self {
        MaterialCosts::default()
    }

    /// Insert or replace the line for `kind`.
    pub fn insert(&mut self, kind: LineItemKind, item: LineItem) {
        self.0.insert(kind, item);
    }

    pub fn get(&self, kind: LineItemKind) -> Option<&LineItem> {
        self.0.get(&kind)
    }

    pub fn contains(&self, kind: LineItemKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// Entries in role order.
    pub fn iter(&self) -> impl Iterator<Item = (LineItemKind, &LineItem)> {
        self.0.iter().map(|(kind, item)| (*kind, item))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of line costs, 2 dp.
    pub fn total(&self) -> Decimal {
        round_2(self.0.values().fold(Decimal::ZERO, |acc, item| add_saturating(acc, item.cost)))
    }

    fn push(&mut self, kind: LineItemKind, material: Option<&Material>, quantity: u64, overrides: &PriceOverrides) {
        if quantity == 0 {
            return;
        }
        match material {
            Some(material) => self.insert(kind, LineItem::priced(kind, material, quantity, overrides)),
            None => trace!(role = kind.key(), quantity, "no catalog material, line omitted"),
        }
    }
}

/// Wire lines to order: `(role, material, rolls)`.
///
/// A top wire sharing the standard wire's material is folded into the
/// `wire_standard` line; otherwise it gets its own role.
pub fn merge_shared_wire<'a>(wires: &WirePlan<'a>) -> Vec<(LineItemKind, Option<&'a Material>, u64)> {
    if wires.special_shares_standard_material() {
        return vec![(LineItemKind::WireStandard, wires.standard_material, wires.total_rolls())];
    }

    let mut lines = vec![(LineItemKind::WireStandard, wires.standard_material, wires.standard_rolls)];
    if let Some(kind) = LineItemKind::top_wire(wires.top_wire) {
        lines.push((kind, wires.special_material, wires.special_rolls));
    }
    lines
}

/// Price every role in `plan`.
pub fn build_line_items<C: MaterialCatalog>(
    fence: &FenceSpecification,
    plan: &QuantityPlan<'_>,
    overrides: &PriceOverrides,
    catalog: &C,
    config: &EngineConfig,
) -> MaterialCosts {
    let names = &config.material_names;
    let mut costs = MaterialCosts::new();

    costs.push(LineItemKind::Posts, fence.post_material.as_ref(), plan.posts, overrides);

    for (kind, material, rolls) in merge_shared_wire(&plan.wires) {
        costs.push(kind, material, rolls, overrides);
    }

    costs.push(LineItemKind::Netting, plan.netting.material, plan.netting.rolls, overrides);

    if plan.staples.enabled {
        costs.push(
            LineItemKind::Staples,
            catalog.find_ignore_case(&names.staples),
            plan.staples.boxes_required,
            overrides,
        );
    }

    costs.push(
        LineItemKind::InsulatorsBullnose,
        catalog.find_ignore_case(&names.bullnose_insulator),
        plan.insulators.bullnose,
        overrides,
    );
    costs.push(
        LineItemKind::InsulatorsClaw,
        catalog.find_ignore_case(&names.claw_insulator),
        plan.insulators.claw,
        overrides,
    );

    if fence.requires_strainers {
        costs.push(
            LineItemKind::Strainers,
            catalog.find_ignore_case(&names.strainer),
            plan.strainers.recommended_strainers_total,
            overrides,
        );
    }
    costs.push(
        LineItemKind::StayPosts,
        catalog.find(&names.stay_post),
        plan.strainers.recommended_stay_posts,
        overrides,
    );
    costs.push(
        LineItemKind::Triplex,
        catalog.find(&names.triplex),
        plan.strainers.recommended_triplex,
        overrides,
    );

    if let Some(outrigger) = &plan.outrigger {
        costs.push(LineItemKind::OutriggerWire, outrigger.wire_material, outrigger.wire_rolls, overrides);
        costs.push(
            LineItemKind::OutriggerInsulators,
            catalog.find_ignore_case(&names.outrigger_insulator),
            outrigger.insulators,
            overrides,
        );
        costs.push(
            LineItemKind::OutriggerConnectors,
            catalog.find_ignore_case(&names.outrigger_connector),
            outrigger.connectors,
            overrides,
        );
    }

    costs
}
