//! # Calculation Requests
//!
//! What the user asked for: a fence length plus options. A request reaching
//! the engine is assumed to have passed [`crate::validation`]; the engine
//! does not re-check ranges.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::request::{CalculationRequest, NettingType, TopWireType};
//! use rust_decimal_macros::dec;
//!
//! let request = CalculationRequest::new(dec!(250))
//!     .with_top_wire(TopWireType::Hot)
//!     .with_hot_wire_count(2)
//!     .with_price_override("Wire - 2.5mm HT", dec!(145));
//!
//! assert_eq!(request.netting_type, NettingType::None);
//! assert_eq!(request.price_overrides.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Unit price overrides keyed by material name.
pub type PriceOverrides = BTreeMap<String, Decimal>;

/// Treatment of the top wire(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopWireType {
    /// Plain wire, stapled like the rest
    #[default]
    Standard,
    /// Energized wire(s) on insulators, same material as standard wire
    Hot,
    /// A single barbed top wire
    Barb,
}

impl TopWireType {
    pub const ALL: [TopWireType; 3] = [TopWireType::Standard, TopWireType::Hot, TopWireType::Barb];

    pub fn key(&self) -> &'static str {
        match self {
            TopWireType::Standard => "standard",
            TopWireType::Hot => "hot",
            TopWireType::Barb => "barb",
        }
    }
}

impl fmt::Display for TopWireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TopWireType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TopWireType::ALL
            .into_iter()
            .find(|wire| wire.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let keys: Vec<&str> = TopWireType::ALL.iter().map(|w| w.key()).collect();
                CalcError::invalid_choice("top_wire_type", s, &keys)
            })
    }
}

/// Netting fixed along the fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NettingType {
    #[default]
    None,
    Sheep,
    Deer,
}

impl NettingType {
    pub const ALL: [NettingType; 3] = [NettingType::None, NettingType::Sheep, NettingType::Deer];

    pub fn key(&self) -> &'static str {
        match self {
            NettingType::None => "none",
            NettingType::Sheep => "sheep",
            NettingType::Deer => "deer",
        }
    }

    /// Display height of the netting. Informational only.
    pub fn height_cm(&self) -> Option<Decimal> {
        match self {
            NettingType::None => None,
            NettingType::Sheep => Some(dec!(120)),
            NettingType::Deer => Some(dec!(200)),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, NettingType::None)
    }
}

impl fmt::Display for NettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NettingType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NettingType::ALL
            .into_iter()
            .find(|netting| netting.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let keys: Vec<&str> = NettingType::ALL.iter().map(|n| n.key()).collect();
                CalcError::invalid_choice("netting_type", s, &keys)
            })
    }
}

/// Input to the calculation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Total fence run (m)
    pub fence_length: Decimal,

    /// $/hour; engine default when absent
    #[serde(default)]
    pub labor_rate: Option<Decimal>,

    /// Meters built per hour; engine default when absent
    #[serde(default)]
    pub build_rate: Option<Decimal>,

    #[serde(default)]
    pub top_wire_type: TopWireType,

    /// Number of hot wires when the top wire is hot (defaults to 1)
    #[serde(default)]
    pub hot_wire_count: Option<u32>,

    #[serde(default)]
    pub post_spacing_override: Option<Decimal>,

    #[serde(default)]
    pub wire_count_override: Option<u32>,

    #[serde(default)]
    pub netting_type: NettingType,

    /// Offset electric wire; only honoured with deer netting
    #[serde(default)]
    pub electric_outrigger: bool,

    #[serde(default)]
    pub staples_per_box: Option<u64>,

    #[serde(default)]
    pub price_overrides: PriceOverrides,
}

impl CalculationRequest {
    /// A request with every option at its default.
    pub fn new(fence_length: Decimal) -> Self {
        CalculationRequest {
            fence_length,
            labor_rate: None,
            build_rate: None,
            top_wire_type: TopWireType::Standard,
            hot_wire_count: None,
            post_spacing_override: None,
            wire_count_override: None,
            netting_type: NettingType::None,
            electric_outrigger: false,
            staples_per_box: None,
            price_overrides: PriceOverrides::new(),
        }
    }

    pub fn with_labor_rate(mut self, rate: Decimal) -> Self {
        self.labor_rate = Some(rate);
        self
    }

    pub fn with_build_rate(mut self, rate: Decimal) -> Self {
        self.build_rate = Some(rate);
        self
    }

    pub fn with_top_wire(mut self, top_wire_type: TopWireType) -> Self {
        self.top_wire_type = top_wire_type;
        self
    }

    pub fn with_hot_wire_count(mut self, count: u32) -> Self {
        self.hot_wire_count = Some(count);
        self
    }

    pub fn with_post_spacing(mut self, spacing: Decimal) -> Self {
        self.post_spacing_override = Some(spacing);
        self
    }

    pub fn with_wire_count(mut self, count: u32) -> Self {
        self.wire_count_override = Some(count);
        self
    }

    pub fn with_netting(mut self, netting_type: NettingType) -> Self {
        self.netting_type = netting_type;
        self
    }

    pub fn with_outrigger(mut self, enabled: bool) -> Self {
        self.electric_outrigger = enabled;
        self
    }

    pub fn with_staples_per_box(mut self, per_box: u64) -> Self {
        self.staples_per_box = Some(per_box);
        self
    }

    pub fn with_price_override(mut self, material_name: impl Into<String>, price: Decimal) -> Self {
        self.price_overrides.insert(material_name.into(), price);
        self
    }

    /// Whether the outrigger should be planned and priced.
    pub fn outrigger_applies(&self) -> bool {
        self.electric_outrigger && self.netting_type == NettingType::Deer
    }
}
