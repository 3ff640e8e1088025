//! End-to-end calculations against the seed catalog and hand-built fences.

use fence_core::calculations::{calculate, LineItemKind};
use fence_core::config::{EngineConfig, InputLimits};
use fence_core::fence::{FenceKind, FenceSpecification};
use fence_core::materials::{seed, Catalog, Material};
use fence_core::request::{CalculationRequest, NettingType, TopWireType};
use fence_core::validation::validate_calculation_input;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn seeded() -> (Catalog, Vec<FenceSpecification>) {
    let catalog = seed::materials();
    let fences = seed::fence_types(&catalog).unwrap();
    (catalog, fences)
}

fn deer_fence() -> FenceSpecification {
    FenceSpecification::new(FenceKind::Deer, dec!(6), 0)
        .with_post_material(Material::new(seed::POST, "each", dec!(12.50)))
        .with_wire_material(Material::new(seed::HT_WIRE, "roll", dec!(139)).with_roll_length(dec!(500)))
        .with_netting_material(Material::new("Deer Netting 200cm", "roll", dec!(310)).with_roll_length(dec!(100)))
}

fn wire_lines(result: &fence_core::CalculationResult) -> usize {
    [LineItemKind::WireStandard, LineItemKind::WireTopHot, LineItemKind::WireTopBarb]
        .into_iter()
        .filter(|kind| result.material_costs.contains(*kind))
        .count()
}

#[test]
fn standard_two_wire_hundred_meters() {
    let (catalog, fences) = seeded();
    let result = calculate(&fences[0], &CalculationRequest::new(dec!(100)), &catalog, &EngineConfig::default());

    assert_eq!(result.posts_required, 14);
    assert_eq!(result.wire_length_meters, dec!(200.00));
    assert_eq!(result.wire_rolls_required, 1);
    assert_eq!(result.material_costs.get(LineItemKind::WireStandard).unwrap().quantity, 1);
}

#[test]
fn deer_fence_sixty_meters() {
    let catalog = seed::materials();
    let request = CalculationRequest::new(dec!(60)).with_netting(NettingType::Deer);
    let result = calculate(&deer_fence(), &request, &catalog, &EngineConfig::default());

    assert_eq!(result.posts_required, 11);
    assert_eq!(result.netting_height_cm, Some(dec!(200)));
    assert!(result.material_costs.contains(LineItemKind::Netting));
    assert_eq!(result.strainer_recommendation.terrain, "deer_netting");

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["material_costs"].get("battens").is_none());
    assert!(!result.electric_outrigger);
}

#[test]
fn deer_fence_with_outrigger() {
    let catalog = seed::materials();
    let request = CalculationRequest::new(dec!(60)).with_netting(NettingType::Deer).with_outrigger(true);
    let result = calculate(&deer_fence(), &request, &catalog, &EngineConfig::default());

    assert!(result.electric_outrigger);
    assert!(result.material_costs.contains(LineItemKind::OutriggerWire));
    let details = result.electric_outrigger_details.unwrap();
    assert!(details.wire_rolls > 0);
    assert_eq!(details.wire_material.as_deref(), Some(seed::OUTRIGGER_WIRE));
}

#[test]
fn hot_top_wire_is_a_single_wire_line() {
    let (catalog, fences) = seeded();
    let request = CalculationRequest::new(dec!(730))
        .with_top_wire(TopWireType::Hot)
        .with_hot_wire_count(2);
    let result = calculate(&fences[2], &request, &catalog, &EngineConfig::default());

    assert_eq!(wire_lines(&result), 1);
    // 7 standard wires: 5110 m -> 11 rolls; 2 hot wires: 1460 m -> 3 rolls
    let wire = result.material_costs.get(LineItemKind::WireStandard).unwrap();
    assert_eq!(wire.quantity, 14);
    assert_eq!(result.wire_rolls_required, 14);
    assert_eq!(result.insulator_counts.hot_wires, 2);
}

#[test]
fn distinct_barb_material_gives_two_wire_lines() {
    let catalog = seed::materials();
    let fence = FenceSpecification::new(FenceKind::NineWireBarb, dec!(5), 9)
        .with_post_material(catalog.get(seed::POST).unwrap().clone())
        .with_wire_material(catalog.get(seed::HT_WIRE).unwrap().clone())
        .with_barb_wire_material(catalog.get(seed::BARB_WIRE).unwrap().clone());
    let request = CalculationRequest::new(dec!(300)).with_top_wire(TopWireType::Barb);
    let result = calculate(&fence, &request, &catalog, &EngineConfig::default());

    assert_eq!(wire_lines(&result), 2);
    let barb = result.material_costs.get(LineItemKind::WireTopBarb).unwrap();
    assert_eq!(barb.material, seed::BARB_WIRE);
    assert_eq!(barb.quantity, 2);
    // 8 x 300 m of HT wire
    assert_eq!(result.material_costs.get(LineItemKind::WireStandard).unwrap().quantity, 5);
    assert_eq!(result.wire_rolls_required, 7);
}

#[test]
fn zero_length_fence() {
    let (catalog, fences) = seeded();
    let result = calculate(&fences[0], &CalculationRequest::new(Decimal::ZERO), &catalog, &EngineConfig::default());

    assert_eq!(result.posts_required, 1);
    assert_eq!(result.wire_length_meters, Decimal::ZERO);
    assert_eq!(result.wire_rolls_required, 0);
    assert_eq!(result.labor_hours, Decimal::ZERO);
    assert_eq!(result.strainer_recommendation.recommended_strainers_total, 0);
}

#[test]
fn price_override_wins_over_catalog() {
    let (catalog, fences) = seeded();
    let request = CalculationRequest::new(dec!(100))
        .with_top_wire(TopWireType::Hot)
        .with_price_override(seed::HT_WIRE, dec!(99.95));
    let result = calculate(&fences[0], &request, &catalog, &EngineConfig::default());

    let wire = result.material_costs.get(LineItemKind::WireStandard).unwrap();
    assert_eq!(wire.unit_price, dec!(99.95));
    assert_eq!(wire.cost, dec!(199.90));
}

#[test]
fn validated_input_flows_into_engine() {
    let (catalog, fences) = seeded();
    let request = validate_calculation_input(
        &json!({
            "fence_length": "120",
            "top_wire_type": "hot",
            "wire_count": "3",
            "hot_wire_count": 3,
            "labor_rate": "48.50"
        }),
        &InputLimits::default(),
    )
    .unwrap();
    let result = calculate(&fences[0], &request, &catalog, &EngineConfig::default());

    assert_eq!(result.wire_count_used, 3);
    assert_eq!(result.staple_counts.stapled_wires, 0);
    assert_eq!(result.staple_counts.total_staples, 0);
    assert!(!result.material_costs.contains(LineItemKind::Staples));
    assert_eq!(result.labor_rate_per_hour, dec!(48.50));
    assert_eq!(result.labor_cost, dec!(291.00));
}

#[test]
fn display_lines_merge_coincidental_names() {
    let mut catalog = seed::materials();
    // Stay posts are bought as the same stock as line posts.
    catalog.insert(Material::new("5 inch stay posts", "each", dec!(12.50)));
    let fence = FenceSpecification::new(FenceKind::TwoWireElectric, dec!(8), 2)
        .with_post_material(Material::new("5 INCH STAY POSTS ", "each", dec!(12.50)));
    let result = calculate(&fence, &CalculationRequest::new(dec!(100)), &catalog, &EngineConfig::default());

    assert!(result.material_costs.contains(LineItemKind::Posts));
    assert!(result.material_costs.contains(LineItemKind::StayPosts));
    let rows = result.display_lines();
    let posts = rows.iter().find(|row| row.material == "5 INCH STAY POSTS ").unwrap();
    assert_eq!(posts.quantity, 16);
    assert_eq!(posts.cost, dec!(200.00));
    assert_eq!(rows.len(), result.material_costs.len() - 1);
}

#[test]
fn surfaced_inputs_are_rounded_to_cents() {
    let (catalog, fences) = seeded();
    let request = validate_calculation_input(
        &json!({
            "fence_length": "100.005",
            "post_spacing": "7.125",
            "labor_rate": "48.555",
            "build_rate": "20.001"
        }),
        &InputLimits::default(),
    )
    .unwrap();
    let result = calculate(&fences[0], &request, &catalog, &EngineConfig::default());

    assert_eq!(result.fence_length, dec!(100.00));
    assert_eq!(result.post_spacing_used, dec!(7.12));
    assert_eq!(result.labor_rate_per_hour, dec!(48.56));
    assert_eq!(result.build_rate_per_hour, dec!(20.00));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["post_spacing_used"], json!(7.12));
}

#[test]
fn seeded_deer_fence_with_outrigger() {
    let (catalog, fences) = seeded();
    let deer = fences.iter().find(|fence| fence.kind == FenceKind::Deer).unwrap();
    let request = CalculationRequest::new(dec!(60)).with_netting(NettingType::Deer).with_outrigger(true);
    let result = calculate(deer, &request, &catalog, &EngineConfig::default());

    assert_eq!(result.posts_required, 11);
    assert_eq!(result.wire_rolls_required, 0);
    assert_eq!(result.netting_rolls_required, 1);
    assert_eq!(result.material_costs.get(LineItemKind::Netting).unwrap().material, seed::DEER_NETTING);

    let outrigger = result.material_costs.get(LineItemKind::OutriggerWire).unwrap();
    assert_eq!(outrigger.material, seed::OUTRIGGER_WIRE);
    assert_eq!(outrigger.quantity, 1);
}

#[test]
fn seeded_barb_top_wire_is_its_own_line() {
    let (catalog, fences) = seeded();
    let request = CalculationRequest::new(dec!(300)).with_top_wire(TopWireType::Barb);
    let result = calculate(&fences[2], &request, &catalog, &EngineConfig::default());

    assert_eq!(wire_lines(&result), 2);
    assert_eq!(result.material_costs.get(LineItemKind::WireTopBarb).unwrap().material, seed::BARB_WIRE);
    assert_eq!(result.material_costs.get(LineItemKind::WireTopBarb).unwrap().quantity, 2);
    assert_eq!(result.material_costs.get(LineItemKind::WireStandard).unwrap().quantity, 5);
}
