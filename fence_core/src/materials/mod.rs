//! # Materials
//!
//! Material definitions and the catalog the engine reads them from.
//!
//! A [`Material`] is identified by its unique name. Price overrides, the
//! wire-combination rule and the report combiner all compare materials by
//! that name.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::materials::Material;
//! use rust_decimal_macros::dec;
//!
//! let wire = Material::new("Wire - 2.5mm HT", "roll", dec!(139.00))
//!     .with_roll_length(dec!(500));
//!
//! // current price is materialized from the default price at creation
//! assert_eq!(wire.current_price, Some(dec!(139.00)));
//! assert_eq!(wire.effective_price(), dec!(139.00));
//! ```

pub mod catalog;
pub mod seed;

pub use catalog::{Catalog, MaterialCatalog};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A purchasable fencing material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique name; doubles as the material's identity
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Unit of sale ("each", "roll", "box")
    pub unit: String,

    /// Catalog list price
    pub default_price: Decimal,

    /// Latest known price; falls back to `default_price` when absent
    #[serde(default)]
    pub current_price: Option<Decimal>,

    /// Roll length in meters (wire and netting only)
    #[serde(default)]
    pub roll_length: Option<Decimal>,

    #[serde(default)]
    pub price_source: String,

    #[serde(default)]
    pub price_source_url: String,

    #[serde(default)]
    pub last_price_update: Option<DateTime<Utc>>,

    #[serde(default)]
    pub auto_update_enabled: bool,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Material {
    /// Create an active material whose current price starts at the default price.
    pub fn new(name: impl Into<String>, unit: impl Into<String>, default_price: Decimal) -> Self {
        Material {
            name: name.into(),
            description: String::new(),
            unit: unit.into(),
            default_price,
            current_price: Some(default_price),
            roll_length: None,
            price_source: String::new(),
            price_source_url: String::new(),
            last_price_update: None,
            auto_update_enabled: false,
            is_active: true,
        }
    }

    pub fn with_roll_length(mut self, roll_length_m: Decimal) -> Self {
        self.roll_length = Some(roll_length_m);
        self
    }

    pub fn with_current_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Fill in `current_price` from `default_price` if it is missing.
    ///
    /// Records loaded from files go through this once, at load time.
    pub fn materialize_current_price(&mut self) {
        if self.current_price.is_none() {
            self.current_price = Some(self.default_price);
        }
    }

    /// Check that prices and roll length are not negative.
    pub fn validate(&self) -> CalcResult<()> {
        let checks = [
            ("default_price", Some(self.default_price), "Default price cannot be negative"),
            ("current_price", self.current_price, "Current price cannot be negative"),
            ("roll_length", self.roll_length, "Roll length cannot be negative"),
        ];
        for (field, value, reason) in checks {
            if let Some(value) = value.filter(|v| *v < Decimal::ZERO) {
                return Err(CalcError::invalid_input(field, value.to_string(), reason));
            }
        }
        Ok(())
    }

    /// Catalog price ignoring any request overrides.
    pub fn effective_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.default_price)
    }

    /// Roll length if set and positive.
    pub fn usable_roll_length(&self) -> Option<Decimal> {
        self.roll_length.filter(|len| *len > Decimal::ZERO)
    }

    /// Whether two references denote the same catalog material.
    pub fn same_identity(&self, other: &Material) -> bool {
        self.name == other.name
    }

    /// Apply a validated settings update and stamp the update time.
    ///
    /// Fields left as `None` in the update are untouched.
    pub fn apply_update(&mut self, update: &MaterialUpdate, now: DateTime<Utc>) {
        if let Some(price) = update.current_price {
            self.current_price = Some(price);
        }
        if update.clear_roll_length {
            self.roll_length = None;
        } else if let Some(roll_length) = update.roll_length {
            self.roll_length = Some(roll_length);
        }
        if let Some(source) = &update.price_source {
            self.price_source = source.clone();
        }
        if let Some(enabled) = update.auto_update_enabled {
            self.auto_update_enabled = enabled;
        }
        self.last_price_update = Some(now);
    }
}

/// A price/metadata update from the settings screen.
///
/// Build through [`crate::validation::validate_material_update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialUpdate {
    pub current_price: Option<Decimal>,
    pub roll_length: Option<Decimal>,
    /// Remove the roll length; takes precedence over `roll_length`
    #[serde(default)]
    pub clear_roll_length: bool,
    pub price_source: Option<String>,
    pub auto_update_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_material_creation() {
        let post = Material::new("Test Post", "each", dec!(10.00)).with_description("Test material");
        assert_eq!(post.name, "Test Post");
        assert_eq!(post.current_price, Some(dec!(10.00)));
        assert!(post.is_active);
        assert!(!post.auto_update_enabled);
    }

    #[test]
    fn test_materialize_only_fills_missing_price() {
        let json = r#"{ "name": "HT Wire", "unit": "roll", "default_price": 139.0 }"#;
        let mut wire: Material = serde_json::from_str(json).unwrap();
        assert_eq!(wire.current_price, None);
        assert_eq!(wire.effective_price(), dec!(139));

        wire.materialize_current_price();
        assert_eq!(wire.current_price, Some(dec!(139)));

        wire.default_price = dec!(150);
        wire.materialize_current_price();
        assert_eq!(wire.current_price, Some(dec!(139)));
    }

    #[test]
    fn test_usable_roll_length() {
        let none = Material::new("Posts", "each", dec!(12.5));
        assert_eq!(none.usable_roll_length(), None);

        let zero = Material::new("Wire", "roll", dec!(100)).with_roll_length(Decimal::ZERO);
        assert_eq!(zero.usable_roll_length(), None);

        let wire = Material::new("Wire", "roll", dec!(100)).with_roll_length(dec!(500));
        assert_eq!(wire.usable_roll_length(), Some(dec!(500)));
    }

    #[test]
    fn test_apply_update() {
        let mut wire = Material::new("Wire", "roll", dec!(139)).with_roll_length(dec!(500));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let update = MaterialUpdate {
            current_price: Some(dec!(145.50)),
            price_source: Some("Farmlands".to_string()),
            ..MaterialUpdate::default()
        };

        wire.apply_update(&update, now);

        assert_eq!(wire.current_price, Some(dec!(145.50)));
        assert_eq!(wire.default_price, dec!(139));
        assert_eq!(wire.roll_length, Some(dec!(500)));
        assert_eq!(wire.price_source, "Farmlands");
        assert_eq!(wire.last_price_update, Some(now));
    }

    #[test]
    fn test_validate_allows_zero_and_rejects_negative() {
        assert!(Material::new("Free sample", "each", Decimal::ZERO).with_roll_length(Decimal::ZERO).validate().is_ok());

        let err = Material::new("Wire", "roll", dec!(139)).with_roll_length(dec!(-1)).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_apply_update_clears_roll_length() {
        let mut wire = Material::new("Wire", "roll", dec!(139)).with_roll_length(dec!(500));
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let update = MaterialUpdate {
            roll_length: Some(dec!(250)),
            clear_roll_length: true,
            ..MaterialUpdate::default()
        };

        wire.apply_update(&update, now);
        assert_eq!(wire.roll_length, None);
    }
}
