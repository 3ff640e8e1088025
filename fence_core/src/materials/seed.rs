//! Starter catalog and fence types.
//!
//! Prices are NZD excluding GST. Used by the CLI when no catalog file is
//! given and by the tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{Catalog, Material};
use crate::errors::CalcResult;
use crate::fence::{FenceKind, FenceSpecification, FenceTypeRecord};

pub const POST: &str = "5inch posts";
pub const HT_WIRE: &str = "Wire - 2.5mm HT";
pub const BARB_WIRE: &str = "Wire - Barb";
pub const DEER_NETTING: &str = "Deer Netting 200cm";
pub const OUTRIGGER_WIRE: &str = "Electric Outrigger Wire";

/// Starter material catalog.
pub fn materials() -> Catalog {
    Catalog::from_materials([
        Material::new(POST, "each", dec!(12.50)).with_description("Standard treated wooden fence post"),
        Material::new(HT_WIRE, "roll", dec!(139.00))
            .with_roll_length(dec!(500))
            .with_description("High tensile wire roll"),
        Material::new(BARB_WIRE, "roll", dec!(200.00))
            .with_roll_length(dec!(240))
            .with_description("Barb wire roll"),
        Material::new("Claw Insulator", "each", dec!(0.69)).with_description("Claw insulator for hot wire"),
        Material::new("Bullnose Insulator", "each", dec!(2.46))
            .with_description("Bullnose insulator for hot wire"),
        Material::new("2.5/7 inch Strainer", "each", dec!(37.70)).with_description("2.5/7 inch strainer"),
        Material::new("U Staples (Box of 2000)", "box", dec!(183.99)).with_description("Fence staples"),
        Material::new(DEER_NETTING, "roll", dec!(310.00))
            .with_roll_length(dec!(100))
            .with_description("Deer netting, 200 cm high"),
        Material::new(OUTRIGGER_WIRE, "roll", dec!(120.00))
            .with_roll_length(dec!(400))
            .with_description("Offset electric wire for deer fences"),
    ])
}

fn wired(kind: FenceKind, description: &str, post_spacing: Decimal, wire_count: u32) -> FenceTypeRecord {
    FenceTypeRecord {
        kind,
        display_name: None,
        description: description.to_string(),
        post_spacing,
        wire_count,
        requires_insulators: true,
        requires_strainers: true,
        requires_energiser: true,
        post_material: Some(POST.to_string()),
        wire_material: Some(HT_WIRE.to_string()),
        barb_wire_material: Some(BARB_WIRE.to_string()),
        netting_material: None,
        is_active: true,
    }
}

/// Starter fence types, referencing [`materials`] by name.
pub fn fence_type_records() -> Vec<FenceTypeRecord> {
    vec![
        wired(FenceKind::TwoWireElectric, "Basic 2-wire electric fence", dec!(8.0), 2),
        wired(FenceKind::ThreeWireElectric, "3-wire electric fence", dec!(8.0), 3),
        wired(FenceKind::NineWireHot, "9-wire with one or more hot wires", dec!(5.0), 9),
        FenceTypeRecord {
            requires_insulators: false,
            requires_energiser: false,
            ..wired(FenceKind::NineWireBarb, "9-wire with a barbed top wire", dec!(5.0), 9)
        },
        FenceTypeRecord {
            wire_material: Some(OUTRIGGER_WIRE.to_string()),
            barb_wire_material: None,
            netting_material: Some(DEER_NETTING.to_string()),
            ..wired(FenceKind::Deer, "Deer netting with optional electric outrigger", dec!(6.0), 0)
        },
    ]
}

/// Starter fence types resolved against a catalog.
pub fn fence_types(catalog: &Catalog) -> CalcResult<Vec<FenceSpecification>> {
    fence_type_records().iter().map(|record| record.resolve(catalog)).collect()
}
