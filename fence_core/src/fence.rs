//! # Fence Specifications
//!
//! The fixed attributes of a fence type: post spacing, wire count, which
//! structural features it needs, and the materials filling each role.
//!
//! Stored catalogs reference materials by name ([`FenceTypeRecord`]); the
//! engine works on resolved [`FenceSpecification`]s that carry the
//! materials themselves.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::fence::{FenceKind, FenceSpecification};
//! use fence_core::materials::Material;
//! use rust_decimal_macros::dec;
//!
//! let fence = FenceSpecification::new(FenceKind::TwoWireElectric, dec!(8), 2)
//!     .with_post_material(Material::new("5inch posts", "each", dec!(12.50)))
//!     .with_wire_material(
//!         Material::new("Wire - 2.5mm HT", "roll", dec!(139)).with_roll_length(dec!(500)),
//!     );
//!
//! assert_eq!(fence.kind.code(), "2_wire_electric");
//! assert!(fence.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{Material, MaterialCatalog};

/// The fence types the planner knows how to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FenceKind {
    #[serde(rename = "2_wire_electric")]
    TwoWireElectric,
    #[serde(rename = "3_wire_electric")]
    ThreeWireElectric,
    #[serde(rename = "9_wire_hot")]
    NineWireHot,
    #[serde(rename = "9_wire_barb")]
    NineWireBarb,
    #[serde(rename = "netting_hot")]
    NettingHot,
    #[serde(rename = "deer")]
    Deer,
}

impl FenceKind {
    pub const ALL: [FenceKind; 6] = [
        FenceKind::TwoWireElectric,
        FenceKind::ThreeWireElectric,
        FenceKind::NineWireHot,
        FenceKind::NineWireBarb,
        FenceKind::NettingHot,
        FenceKind::Deer,
    ];

    /// Stable identifier used in files and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            FenceKind::TwoWireElectric => "2_wire_electric",
            FenceKind::ThreeWireElectric => "3_wire_electric",
            FenceKind::NineWireHot => "9_wire_hot",
            FenceKind::NineWireBarb => "9_wire_barb",
            FenceKind::NettingHot => "netting_hot",
            FenceKind::Deer => "deer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FenceKind::TwoWireElectric => "2 Wire Electric",
            FenceKind::ThreeWireElectric => "3 Wire Electric",
            FenceKind::NineWireHot => "9 Wire Hot",
            FenceKind::NineWireBarb => "9 Wire Barb",
            FenceKind::NettingHot => "Netting + Hot",
            FenceKind::Deer => "Deer Fence",
        }
    }
}

impl fmt::Display for FenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FenceKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FenceKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let codes: Vec<&str> = FenceKind::ALL.iter().map(|k| k.code()).collect();
                CalcError::invalid_choice("fence_type", s, &codes)
            })
    }
}

/// A fence type with its materials resolved.
///
/// Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceSpecification {
    pub kind: FenceKind,
    pub display_name: String,
    #[serde(default)]
    pub description: String,

    /// Base distance between posts (m)
    pub post_spacing: Decimal,

    /// Base number of line wires
    pub wire_count: u32,

    #[serde(default)]
    pub requires_insulators: bool,
    #[serde(default = "default_true")]
    pub requires_strainers: bool,
    #[serde(default)]
    pub requires_energiser: bool,

    #[serde(default)]
    pub post_material: Option<Material>,
    #[serde(default)]
    pub wire_material: Option<Material>,
    /// Dedicated barbed top wire; standard wire is used when absent
    #[serde(default)]
    pub barb_wire_material: Option<Material>,
    #[serde(default)]
    pub netting_material: Option<Material>,

    /// Retired fence types stay on file but are not offered
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl FenceSpecification {
    /// A fence type with no materials attached, requiring strainers only.
    pub fn new(kind: FenceKind, post_spacing: Decimal, wire_count: u32) -> Self {
        FenceSpecification {
            kind,
            display_name: kind.display_name().to_string(),
            description: String::new(),
            post_spacing,
            wire_count,
            requires_insulators: false,
            requires_strainers: true,
            requires_energiser: false,
            post_material: None,
            wire_material: None,
            barb_wire_material: None,
            netting_material: None,
            is_active: true,
        }
    }

    pub fn with_post_material(mut self, material: Material) -> Self {
        self.post_material = Some(material);
        self
    }

    pub fn with_wire_material(mut self, material: Material) -> Self {
        self.wire_material = Some(material);
        self
    }

    pub fn with_barb_wire_material(mut self, material: Material) -> Self {
        self.barb_wire_material = Some(material);
        self
    }

    pub fn with_netting_material(mut self, material: Material) -> Self {
        self.netting_material = Some(material);
        self
    }

    /// Mark the fence type as retired.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Set the insulator / strainer / energiser requirement flags.
    pub fn with_requirements(mut self, insulators: bool, strainers: bool, energiser: bool) -> Self {
        self.requires_insulators = insulators;
        self.requires_strainers = strainers;
        self.requires_energiser = energiser;
        self
    }

    /// Check the fence invariants.
    pub fn validate(&self) -> CalcResult<()> {
        if self.post_spacing <= Decimal::ZERO {
            return Err(CalcError::invalid_input(
                "post_spacing",
                self.post_spacing.to_string(),
                "Post spacing must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Stored form of a fence type, referencing materials by catalog name.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kind": "9_wire_barb",
///   "post_spacing": 5.0,
///   "wire_count": 9,
///   "requires_strainers": true,
///   "post_material": "5inch posts",
///   "wire_material": "Wire - 2.5mm HT",
///   "barb_wire_material": "Wire - Barb"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceTypeRecord {
    pub kind: FenceKind,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub post_spacing: Decimal,
    pub wire_count: u32,
    #[serde(default)]
    pub requires_insulators: bool,
    #[serde(default = "default_true")]
    pub requires_strainers: bool,
    #[serde(default)]
    pub requires_energiser: bool,
    #[serde(default)]
    pub post_material: Option<String>,
    #[serde(default)]
    pub wire_material: Option<String>,
    #[serde(default)]
    pub barb_wire_material: Option<String>,
    #[serde(default)]
    pub netting_material: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl FenceTypeRecord {
    /// Resolve material names against the catalog.
    ///
    /// A named material that is missing or inactive is an error here; a role
    /// left unnamed simply stays empty.
    pub fn resolve(&self, catalog: &impl MaterialCatalog) -> CalcResult<FenceSpecification> {
        let lookup = |name: &Option<String>| -> CalcResult<Option<Material>> {
            match name {
                Some(name) => catalog
                    .find(name)
                    .cloned()
                    .map(Some)
                    .ok_or_else(|| CalcError::material_not_found(name.clone())),
                None => Ok(None),
            }
        };

        let spec = FenceSpecification {
            kind: self.kind,
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| self.kind.display_name().to_string()),
            description: self.description.clone(),
            post_spacing: self.post_spacing,
            wire_count: self.wire_count,
            requires_insulators: self.requires_insulators,
            requires_strainers: self.requires_strainers,
            requires_energiser: self.requires_energiser,
            post_material: lookup(&self.post_material)?,
            wire_material: lookup(&self.wire_material)?,
            barb_wire_material: lookup(&self.barb_wire_material)?,
            netting_material: lookup(&self.netting_material)?,
            is_active: self.is_active,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// The active fence type of `kind`, if one is configured.
pub fn find_active(fences: &[FenceSpecification], kind: FenceKind) -> Option<&FenceSpecification> {
    fences.iter().find(|fence| fence.is_active && fence.kind == kind)
}
