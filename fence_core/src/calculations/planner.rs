//! # Quantity Planner
//!
//! Derives every physical quantity (posts, wires, rolls, netting, staples,
//! insulators, structural reinforcement, outrigger parts) before any price
//! is looked at.
//!
//! ## Rules
//!
//! - Posts: `ceil(length / spacing) + 1`, so a zero-length fence has 1 post
//! - Top wire: `hot` takes the requested hot-wire count (default 1), `barb`
//!   takes one wire, `standard` none; the rest are standard wires
//! - Hot wire is always the standard wire material; barb wire uses the fence
//!   type's barb material when it has one
//! - Rolls: `ceil(run length / roll length)`, falling back to the configured
//!   roll length when a material has none
//! - Staples: hot wires sit on insulators and are never stapled; the two end
//!   posts take the end-post rate, all others the line-post rate
//! - Strainers and stay posts: one per 100 m (50 m with deer netting), at
//!   least 2 on any non-empty fence; triplex one per 500 m
//!
//! All arithmetic is total: zero lengths, zero roll lengths and very long
//! fences produce sane counts rather than errors.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::fence::FenceSpecification;
use crate::materials::{Material, MaterialCatalog};
use crate::request::{CalculationRequest, NettingType, TopWireType};
use crate::units::{ceil_div, round_2, run_length};

const STRAINER_INTERVAL_M: Decimal = dec!(100);
const STRAINER_INTERVAL_DEER_M: Decimal = dec!(50);
const MIN_STRAINERS: u64 = 2;
const TRIPLEX_INTERVAL_M: Decimal = dec!(500);
const END_POSTS: u64 = 2;
const POSTS_PER_OUTRIGGER_CONNECTOR: u64 = 50;
const MIN_OUTRIGGER_CONNECTORS: u64 = 2;

/// Everything the planner derived, borrowing materials from the fence
/// specification and the catalog.
#[derive(Debug, Clone)]
pub struct QuantityPlan<'a> {
    pub fence_length: Decimal,
    pub post_spacing: Decimal,
    pub posts: u64,
    pub wires: WirePlan<'a>,
    pub netting: NettingPlan<'a>,
    pub staples: StapleCounts,
    pub insulators: InsulatorCounts,
    pub strainers: StrainerRecommendation,
    pub outrigger: Option<OutriggerPlan<'a>>,
}

/// Wire composition and roll counts.
#[derive(Debug, Clone)]
pub struct WirePlan<'a> {
    pub top_wire: TopWireType,
    pub total_wires: u32,
    pub standard_wires: u32,
    /// Hot or barbed wires
    pub special_wires: u32,
    pub total_length: Decimal,
    pub standard_length: Decimal,
    pub special_length: Decimal,
    pub standard_material: Option<&'a Material>,
    pub special_material: Option<&'a Material>,
    pub standard_rolls: u64,
    pub special_rolls: u64,
}

impl WirePlan<'_> {
    /// True when the special wire is ordered from the same roll stock as
    /// the standard wire.
    pub fn special_shares_standard_material(&self) -> bool {
        match (self.special_material, self.standard_material) {
            (Some(special), Some(standard)) => special.same_identity(standard),
            _ => false,
        }
    }

    pub fn total_rolls(&self) -> u64 {
        self.standard_rolls.saturating_add(self.special_rolls)
    }
}

/// Netting selection and roll count.
#[derive(Debug, Clone)]
pub struct NettingPlan<'a> {
    pub netting_type: NettingType,
    pub height_cm: Option<Decimal>,
    /// Fence type's netting material, only when netting was requested
    pub material: Option<&'a Material>,
    pub rolls: u64,
}

/// Electric outrigger quantities.
#[derive(Debug, Clone)]
pub struct OutriggerPlan<'a> {
    pub wire_material: Option<&'a Material>,
    pub wire_length: Decimal,
    pub wire_rolls: u64,
    pub insulators: u64,
    pub connectors: u64,
}

impl OutriggerPlan<'_> {
    pub fn details(&self) -> OutriggerDetails {
        OutriggerDetails {
            wire_material: self.wire_material.map(|m| m.name.clone()),
            wire_length_meters: self.wire_length,
            wire_rolls: self.wire_rolls,
            insulators: self.insulators,
            connectors: self.connectors,
        }
    }
}

/// Outrigger quantities as reported in results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutriggerDetails {
    pub wire_material: Option<String>,
    pub wire_length_meters: Decimal,
    pub wire_rolls: u64,
    pub insulators: u64,
    pub connectors: u64,
}

/// Staple usage breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StapleCounts {
    pub enabled: bool,
    /// Wires fixed with staples (hot wires excluded)
    pub stapled_wires: u32,
    pub line_posts: u64,
    pub end_posts: u64,
    pub line_post_staples: u64,
    pub end_post_staples: u64,
    pub netting_staples: u64,
    pub total_staples: u64,
    pub staples_per_box: u64,
    pub boxes_required: u64,
}

/// Insulators for hot wires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsulatorCounts {
    pub hot_wires: u32,
    /// End-post insulators
    pub bullnose: u64,
    /// Line-post insulators
    pub claw: u64,
}

/// Interval-based reinforcement recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainerRecommendation {
    pub terrain: String,
    pub interval_meters_used: Decimal,
    pub recommended_strainers_total: u64,
    /// Strainers beyond the two ends
    pub recommended_strainers_intermediate: u64,
    pub recommended_stay_posts: u64,
    pub recommended_triplex: u64,
}

/// Derive all quantities for `request` on `fence`.
pub fn plan_quantities<'a, C: MaterialCatalog>(
    fence: &'a FenceSpecification,
    request: &CalculationRequest,
    catalog: &'a C,
    config: &EngineConfig,
) -> QuantityPlan<'a> {
    let fence_length = request.fence_length;
    let post_spacing = effective_spacing(fence, request);
    let posts = post_count(fence_length, post_spacing);

    let wires = plan_wires(fence, request, config);
    let netting = plan_netting(fence, request, config);
    let staples = plan_staples(posts, &wires, &netting, request, config);
    let insulators = plan_insulators(posts, &wires);
    let strainers = recommend_strainers(fence_length, request.netting_type);

    let outrigger = if request.outrigger_applies() {
        let wire_material = catalog
            .find_ignore_case(&config.material_names.outrigger_wire)
            .or(fence.wire_material.as_ref());
        Some(plan_outrigger(fence_length, posts, wire_material, config))
    } else {
        None
    };

    QuantityPlan {
        fence_length,
        post_spacing,
        posts,
        wires,
        netting,
        staples,
        insulators,
        strainers,
        outrigger,
    }
}

/// Override spacing when given and positive, otherwise the fence type's.
pub fn effective_spacing(fence: &FenceSpecification, request: &CalculationRequest) -> Decimal {
    request
        .post_spacing_override
        .filter(|spacing| *spacing > Decimal::ZERO)
        .unwrap_or(fence.post_spacing)
}

/// `ceil(length / spacing) + 1`
pub fn post_count(fence_length: Decimal, spacing: Decimal) -> u64 {
    ceil_div(fence_length, spacing).saturating_add(1)
}

/// Number of hot/barbed wires out of `total_wires`.
pub fn special_wire_count(top_wire: TopWireType, total_wires: u32, hot_wire_count: Option<u32>) -> u32 {
    match top_wire {
        TopWireType::Standard => 0,
        TopWireType::Hot => match hot_wire_count {
            Some(requested) => requested.min(total_wires),
            None => total_wires.min(1),
        },
        TopWireType::Barb => total_wires.min(1),
    }
}

fn roll_length(material: Option<&Material>, fallback: Decimal) -> Decimal {
    material.and_then(Material::usable_roll_length).unwrap_or(fallback)
}

fn plan_wires<'a>(fence: &'a FenceSpecification, request: &CalculationRequest, config: &EngineConfig) -> WirePlan<'a> {
    let fence_length = request.fence_length;
    let top_wire = request.top_wire_type;
    let total_wires = request.wire_count_override.unwrap_or(fence.wire_count);
    let special_wires = special_wire_count(top_wire, total_wires, request.hot_wire_count);
    let standard_wires = total_wires.saturating_sub(special_wires);

    let standard_length = run_length(u64::from(standard_wires), fence_length);
    let special_length = run_length(u64::from(special_wires), fence_length);
    let total_length = run_length(u64::from(total_wires), fence_length);

    let standard_material = fence.wire_material.as_ref();
    let special_material = match top_wire {
        TopWireType::Standard => None,
        TopWireType::Hot => standard_material,
        TopWireType::Barb => fence.barb_wire_material.as_ref().or(standard_material),
    };

    // Rolls are only ordered against a resolved material.
    let rolls_for = |length: Decimal, material: Option<&Material>| match material {
        Some(_) => ceil_div(length, roll_length(material, config.wire_roll_length_default)),
        None => 0,
    };
    let standard_rolls = rolls_for(standard_length, standard_material);
    let special_rolls = rolls_for(special_length, special_material);

    WirePlan {
        top_wire,
        total_wires,
        standard_wires,
        special_wires,
        total_length,
        standard_length,
        special_length,
        standard_material,
        special_material,
        standard_rolls,
        special_rolls,
    }
}

fn plan_netting<'a>(fence: &'a FenceSpecification, request: &CalculationRequest, config: &EngineConfig) -> NettingPlan<'a> {
    let netting_type = request.netting_type;
    if !netting_type.is_present() {
        return NettingPlan {
            netting_type,
            height_cm: None,
            material: None,
            rolls: 0,
        };
    }

    let material = fence.netting_material.as_ref();
    let rolls = ceil_div(
        request.fence_length,
        roll_length(material, config.netting_roll_length_default),
    );
    NettingPlan {
        netting_type,
        height_cm: netting_type.height_cm(),
        material,
        rolls,
    }
}

fn plan_staples(
    posts: u64,
    wires: &WirePlan<'_>,
    netting: &NettingPlan<'_>,
    request: &CalculationRequest,
    config: &EngineConfig,
) -> StapleCounts {
    if !config.staples_enabled {
        return StapleCounts::default();
    }

    let stapled_wires = match wires.top_wire {
        TopWireType::Hot => wires.standard_wires,
        TopWireType::Standard | TopWireType::Barb => wires.total_wires,
    };
    let end_posts = posts.min(END_POSTS);
    let line_posts = posts - end_posts;
    let per_wire = u64::from(stapled_wires);

    let line_post_staples = line_posts
        .saturating_mul(per_wire)
        .saturating_mul(config.staples_per_line_post);
    let end_post_staples = end_posts
        .saturating_mul(per_wire)
        .saturating_mul(config.staples_per_end_post);
    let netting_staples = if netting.material.is_some() {
        posts.saturating_mul(config.staples_per_netting_post)
    } else {
        0
    };
    let total_staples = line_post_staples
        .saturating_add(end_post_staples)
        .saturating_add(netting_staples);

    let staples_per_box = request.staples_per_box.unwrap_or(config.staples_per_box_default);
    let boxes_required = if staples_per_box > 0 {
        ceil_div(Decimal::from(total_staples), Decimal::from(staples_per_box))
    } else {
        0
    };

    StapleCounts {
        enabled: true,
        stapled_wires,
        line_posts,
        end_posts,
        line_post_staples,
        end_post_staples,
        netting_staples,
        total_staples,
        staples_per_box,
        boxes_required,
    }
}

fn plan_insulators(posts: u64, wires: &WirePlan<'_>) -> InsulatorCounts {
    if wires.top_wire != TopWireType::Hot {
        return InsulatorCounts::default();
    }

    let hot_wires = wires.special_wires;
    let per_wire = u64::from(hot_wires);
    InsulatorCounts {
        hot_wires,
        bullnose: posts.min(END_POSTS).saturating_mul(per_wire),
        claw: posts.saturating_sub(END_POSTS).saturating_mul(per_wire),
    }
}

/// Strainer, stay post and triplex recommendation for a fence run.
pub fn recommend_strainers(fence_length: Decimal, netting_type: NettingType) -> StrainerRecommendation {
    let (terrain, interval) = match netting_type {
        NettingType::Deer => ("deer_netting", STRAINER_INTERVAL_DEER_M),
        NettingType::None | NettingType::Sheep => ("standard", STRAINER_INTERVAL_M),
    };

    let strainers = floored_interval_count(fence_length, interval);
    StrainerRecommendation {
        terrain: terrain.to_string(),
        interval_meters_used: interval,
        recommended_strainers_total: strainers,
        recommended_strainers_intermediate: strainers.saturating_sub(MIN_STRAINERS),
        recommended_stay_posts: floored_interval_count(fence_length, interval),
        recommended_triplex: ceil_div(fence_length, TRIPLEX_INTERVAL_M),
    }
}

fn floored_interval_count(fence_length: Decimal, interval: Decimal) -> u64 {
    if fence_length <= Decimal::ZERO {
        return 0;
    }
    ceil_div(fence_length, interval).max(MIN_STRAINERS)
}

fn plan_outrigger<'a>(
    fence_length: Decimal,
    posts: u64,
    wire_material: Option<&'a Material>,
    config: &EngineConfig,
) -> OutriggerPlan<'a> {
    let wire_length = round_2(fence_length.max(Decimal::ZERO));
    let wire_rolls = ceil_div(wire_length, roll_length(wire_material, config.wire_roll_length_default));
    OutriggerPlan {
        wire_material,
        wire_length,
        wire_rolls,
        insulators: posts,
        connectors: (posts / POSTS_PER_OUTRIGGER_CONNECTOR + 1).max(MIN_OUTRIGGER_CONNECTORS),
    }
}
