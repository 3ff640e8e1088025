//! # Engine Configuration
//!
//! Process-wide defaults for the calculation engine, gathered into a single
//! value object that the caller passes to [`crate::calculations::calculate`].
//! Nothing in the engine reads ambient state; a configuration is built once
//! and is never mutated mid-calculation.
//!
//! Configurations can be written as TOML. Any key left out takes its default:
//!
//! ```rust
//! use fence_core::config::EngineConfig;
//! use rust_decimal_macros::dec;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     labor_rate_default = 60
//!     staples_per_box_default = 1000
//!
//!     [material_names]
//!     triplex = "Triplex Strainer Kit"
//! "#).unwrap();
//!
//! assert_eq!(config.labor_rate_default, dec!(60));
//! assert_eq!(config.build_rate_default, dec!(20));
//! assert_eq!(config.material_names.triplex, "Triplex Strainer Kit");
//! assert_eq!(config.material_names.claw_insulator, "Claw Insulator");
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Defaults and rates consumed by the calculation engine (NZD, excl. GST).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Labour rate used when the request does not supply one ($/hour)
    pub labor_rate_default: Decimal,

    /// Build rate used when the request does not supply one (meters/hour)
    pub build_rate_default: Decimal,

    /// Wire roll length for materials without their own roll length (m)
    pub wire_roll_length_default: Decimal,

    /// Netting roll length for netting without its own roll length (m)
    pub netting_roll_length_default: Decimal,

    /// Whether staples are estimated at all
    pub staples_enabled: bool,

    /// Staples per box when the request does not override it
    pub staples_per_box_default: u64,

    /// Staples per stapled wire on each line (intermediate) post
    pub staples_per_line_post: u64,

    /// Staples per stapled wire on each end post
    pub staples_per_end_post: u64,

    /// Extra staples per post when netting is fixed to the fence
    pub staples_per_netting_post: u64,

    /// Catalog names of the materials the engine looks up itself
    pub material_names: MaterialNames,

    /// Bounds enforced by request validation
    pub limits: InputLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            labor_rate_default: dec!(55),
            build_rate_default: dec!(20),
            wire_roll_length_default: dec!(500),
            netting_roll_length_default: dec!(50),
            staples_enabled: true,
            staples_per_box_default: 2000,
            staples_per_line_post: 1,
            staples_per_end_post: 2,
            staples_per_netting_post: 4,
            material_names: MaterialNames::default(),
            limits: InputLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::ConfigError {
            reason: e.to_string(),
        })
    }
}

/// Catalog names for materials that are not attached to a fence type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialNames {
    pub bullnose_insulator: String,
    pub claw_insulator: String,
    pub strainer: String,
    pub stay_post: String,
    pub triplex: String,
    pub staples: String,
    pub outrigger_wire: String,
    pub outrigger_insulator: String,
    pub outrigger_connector: String,
}

impl Default for MaterialNames {
    fn default() -> Self {
        MaterialNames {
            bullnose_insulator: "Bullnose Insulator".to_string(),
            claw_insulator: "Claw Insulator".to_string(),
            strainer: "2.5/7 inch Strainer".to_string(),
            stay_post: "5 inch stay posts".to_string(),
            triplex: "Triplex".to_string(),
            staples: "U Staples (Box of 2000)".to_string(),
            outrigger_wire: "Electric Outrigger Wire".to_string(),
            outrigger_insulator: "Outrigger Insulator".to_string(),
            outrigger_connector: "Outrigger Connector".to_string(),
        }
    }
}

/// Upper bounds applied by [`crate::validation`] before the engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub max_fence_length: Decimal,
    pub max_labor_rate: Decimal,
    pub max_build_rate: Decimal,
    pub max_post_spacing: Decimal,
    /// Tighter spacing bound when deer netting is requested
    pub max_post_spacing_deer: Decimal,
    pub max_wire_count: u32,
    pub max_hot_wire_count: u32,
    pub max_staples_per_box: u64,
}

impl Default for InputLimits {
    fn default() -> Self {
        InputLimits {
            max_fence_length: dec!(50000),
            max_labor_rate: dec!(1000),
            max_build_rate: dec!(1000),
            max_post_spacing: dec!(50),
            max_post_spacing_deer: dec!(10),
            max_wire_count: 20,
            max_hot_wire_count: 20,
            max_staples_per_box: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.labor_rate_default, dec!(55));
        assert_eq!(config.wire_roll_length_default, dec!(500));
        assert!(config.staples_enabled);
        assert_eq!(config.staples_per_box_default, 2000);
        assert_eq!(config.limits.max_fence_length, dec!(50000));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = EngineConfig::from_toml_str(
            "staples_enabled = false\nwire_roll_length_default = 400.5\n\n[limits]\nmax_wire_count = 12\n",
        )
        .unwrap();
        assert!(!config.staples_enabled);
        assert_eq!(config.wire_roll_length_default, dec!(400.5));
        assert_eq!(config.limits.max_wire_count, 12);
        assert_eq!(config.limits.max_hot_wire_count, 20);
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineConfig::from_toml_str("labor_rate_default = \"lots\"").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig::default();
        let text = config.to_toml_string().unwrap();
        let roundtrip = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, roundtrip);
    }
}
