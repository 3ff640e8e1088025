//! # Input Validation
//!
//! Turns loosely-typed JSON (form posts, CLI arguments, API bodies) into
//! typed requests, rejecting anything the engine should never see.
//!
//! Numbers may arrive as JSON numbers or numeric strings. Optional fields
//! that are `null`, missing or an empty string are treated as absent.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::config::InputLimits;
//! use fence_core::request::{NettingType, TopWireType};
//! use fence_core::validation::validate_calculation_input;
//! use serde_json::json;
//!
//! let request = validate_calculation_input(
//!     &json!({ "fence_length": "250", "top_wire_type": "hot", "hot_wire_count": 2, "netting": "yes" }),
//!     &InputLimits::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(request.top_wire_type, TopWireType::Hot);
//! assert_eq!(request.hot_wire_count, Some(2));
//! assert_eq!(request.netting_type, NettingType::Sheep);
//!
//! let err = validate_calculation_input(&json!({}), &InputLimits::default()).unwrap_err();
//! assert_eq!(err.error_code(), "MISSING_FIELD");
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use crate::config::InputLimits;
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialUpdate;
use crate::request::{CalculationRequest, NettingType, PriceOverrides, TopWireType};

const MIN_POSITIVE: Decimal = dec!(0.01);
const MAX_MATERIAL_PRICE: Decimal = dec!(999999);
const MAX_ROLL_LENGTH: Decimal = dec!(10000);
const MAX_PRICE_SOURCE_CHARS: usize = 200;
const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];

/// Validate a raw calculation request.
///
/// # Returns
///
/// * `Err(CalcError::MissingField)` - `fence_length` absent
/// * `Err(CalcError::InvalidInput)` - a value is out of range
/// * `Err(CalcError::InvalidChoice)` - unknown netting or top wire type
/// * `Err(CalcError::TypeMismatch)` - a value has the wrong JSON type
pub fn validate_calculation_input(data: &Value, limits: &InputLimits) -> CalcResult<CalculationRequest> {
    let data = as_object("request", data)?;

    let netting_type = netting_type(data.get("netting_type").or_else(|| data.get("netting")))?;
    let deer = netting_type == NettingType::Deer;

    let fence_length = match present(data, "fence_length") {
        Some(value) => decimal_in_range("fence_length", value, MIN_POSITIVE, limits.max_fence_length)?,
        None => return Err(CalcError::missing_field("fence_length")),
    };
    let mut request = CalculationRequest::new(fence_length).with_netting(netting_type);

    request.electric_outrigger = deer && truthy(data.get("electric_outrigger"));

    if let Some(value) = present(data, "labor_rate") {
        request.labor_rate = Some(decimal_in_range("labor_rate", value, MIN_POSITIVE, limits.max_labor_rate)?);
    }
    if let Some(value) = present(data, "build_rate") {
        request.build_rate = Some(decimal_in_range("build_rate", value, MIN_POSITIVE, limits.max_build_rate)?);
    }

    if let Some(value) = present(data, "top_wire_type") {
        request.top_wire_type = TopWireType::from_str(as_str("top_wire_type", value)?)?;
    }

    if let Some(value) = present(data, "post_spacing") {
        let max = if deer { limits.max_post_spacing_deer } else { limits.max_post_spacing };
        request.post_spacing_override = Some(decimal_in_range("post_spacing", value, MIN_POSITIVE, max)?);
    }

    if let Some(value) = present(data, "wire_count") {
        let min = if deer { 0 } else { 1 };
        request.wire_count_override = Some(integer_in_range("wire_count", value, min, limits.max_wire_count.into())? as u32);
    }

    if request.top_wire_type == TopWireType::Hot {
        if let Some(value) = present(data, "hot_wire_count") {
            let hot = integer_in_range("hot_wire_count", value, 1, limits.max_hot_wire_count.into())? as u32;
            if let Some(total) = request.wire_count_override.filter(|total| *total > 0) {
                if hot > total {
                    return Err(CalcError::invalid_input(
                        "hot_wire_count",
                        hot.to_string(),
                        format!("Hot wire count ({}) cannot exceed total wire count ({})", hot, total),
                    ));
                }
            }
            request.hot_wire_count = Some(hot);
        }
    }

    if let Some(value) = present(data, "staples_per_box") {
        let max = i64::try_from(limits.max_staples_per_box).unwrap_or(i64::MAX);
        request.staples_per_box = Some(integer_in_range("staples_per_box", value, 1, max)? as u64);
    }

    request.price_overrides = price_overrides(data.get("price_overrides"))?;

    Ok(request)
}

/// Validate a material settings update.
///
/// An empty-string `roll_length` clears the roll length.
pub fn validate_material_update(data: &Value) -> CalcResult<MaterialUpdate> {
    let data = as_object("material update", data)?;
    let mut update = MaterialUpdate::default();

    match data.get("current_price") {
        None | Some(Value::Null) => {}
        Some(value) if is_blank(value) => return Err(CalcError::missing_field("current_price")),
        Some(value) => {
            update.current_price = Some(decimal_in_range("current_price", value, Decimal::ZERO, MAX_MATERIAL_PRICE)?)
        }
    }

    match data.get("roll_length") {
        None | Some(Value::Null) => {}
        Some(value) if is_blank(value) => update.clear_roll_length = true,
        Some(value) => update.roll_length = Some(decimal_in_range("roll_length", value, MIN_POSITIVE, MAX_ROLL_LENGTH)?),
    }

    if let Some(value) = present(data, "price_source") {
        let source = as_str("price_source", value)?;
        if source.chars().count() > MAX_PRICE_SOURCE_CHARS {
            return Err(CalcError::invalid_input(
                "price_source",
                source,
                format!("Price source cannot exceed {} characters", MAX_PRICE_SOURCE_CHARS),
            ));
        }
        update.price_source = Some(source.to_string());
    }

    match data.get("auto_update_enabled") {
        None | Some(Value::Null) => {}
        Some(Value::Bool(enabled)) => update.auto_update_enabled = Some(*enabled),
        Some(other) => return Err(CalcError::type_mismatch("auto_update_enabled", "boolean", json_kind(other))),
    }

    Ok(update)
}

fn as_object<'a>(field: &str, value: &'a Value) -> CalcResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CalcError::type_mismatch(field, "object", json_kind(value)))
}

fn as_str<'a>(field: &str, value: &'a Value) -> CalcResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| CalcError::type_mismatch(field, "string", json_kind(value)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// The field's value unless it is missing, null or blank.
fn present<'a>(data: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    data.get(field).filter(|value| !is_blank(value))
}

fn parse_decimal(field: &str, value: &Value) -> CalcResult<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(CalcError::type_mismatch(field, "number", json_kind(other))),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| CalcError::type_mismatch(field, "number", format!("\"{}\"", text)))
}

fn parse_integer(field: &str, value: &Value) -> CalcResult<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        other => return Err(CalcError::type_mismatch(field, "integer", json_kind(other))),
    };
    parsed.ok_or_else(|| CalcError::type_mismatch(field, "integer", value.to_string()))
}

fn decimal_in_range(field: &str, value: &Value, min: Decimal, max: Decimal) -> CalcResult<Decimal> {
    let parsed = parse_decimal(field, value)?;
    if parsed < min {
        let reason = if min.is_zero() {
            format!("{} cannot be negative", display_name(field))
        } else {
            format!("{} must be greater than 0", display_name(field))
        };
        return Err(CalcError::invalid_input(field, parsed.to_string(), reason));
    }
    if parsed > max {
        return Err(CalcError::invalid_input(
            field,
            parsed.to_string(),
            format!("{} cannot exceed {}", display_name(field), max.normalize()),
        ));
    }
    Ok(parsed)
}

fn integer_in_range(field: &str, value: &Value, min: i64, max: i64) -> CalcResult<i64> {
    let parsed = parse_integer(field, value)?;
    if parsed < min {
        let reason = if min == 0 {
            format!("{} cannot be negative", display_name(field))
        } else {
            format!("{} must be greater than 0", display_name(field))
        };
        return Err(CalcError::invalid_input(field, parsed.to_string(), reason));
    }
    if parsed > max {
        return Err(CalcError::invalid_input(
            field,
            parsed.to_string(),
            format!("{} cannot exceed {}", display_name(field), max),
        ));
    }
    Ok(parsed)
}

/// "post_spacing" -> "Post spacing"
fn display_name(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

fn netting_type(value: Option<&Value>) -> CalcResult<NettingType> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(NettingType::None),
        Some(Value::String(s)) => s.trim().to_ascii_lowercase(),
        Some(other) => other.to_string().to_ascii_lowercase(),
    };
    match raw.as_str() {
        "yes" | "true" => Ok(NettingType::Sheep),
        "no" | "false" | "" => Ok(NettingType::None),
        other => NettingType::from_str(other),
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => TRUTHY.contains(&s.trim().to_ascii_lowercase().as_str()),
        Some(other) => TRUTHY.contains(&other.to_string().as_str()),
    }
}

fn price_overrides(value: Option<&Value>) -> CalcResult<PriceOverrides> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(PriceOverrides::new()),
        Some(value) => as_object("price_overrides", value)?,
    };

    entries
        .iter()
        .map(|(name, raw)| {
            let field = format!("price_overrides.{}", name);
            let price = parse_decimal(&field, raw)?;
            if price < Decimal::ZERO {
                return Err(CalcError::invalid_input(field, price.to_string(), "Price override cannot be negative"));
            }
            Ok((name.clone(), price))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(data: Value) -> CalcResult<CalculationRequest> {
        validate_calculation_input(&data, &InputLimits::default())
    }

    #[test]
    fn test_minimal_request() {
        let request = validate(json!({ "fence_length": 100 })).unwrap();
        assert_eq!(request, CalculationRequest::new(dec!(100)));
    }

    #[test]
    fn test_full_request() {
        let request = validate(json!({
            "fence_length": "437.5",
            "labor_rate": 60,
            "build_rate": "25",
            "top_wire_type": "hot",
            "hot_wire_count": "2",
            "post_spacing": 7.5,
            "wire_count": 9,
            "netting_type": "deer",
            "electric_outrigger": "on",
            "staples_per_box": 1000,
            "price_overrides": { "5inch posts": "11.20", "Wire - 2.5mm HT": 0 }
        }))
        .unwrap();

        assert_eq!(request.fence_length, dec!(437.5));
        assert_eq!(request.labor_rate, Some(dec!(60)));
        assert_eq!(request.build_rate, Some(dec!(25)));
        assert_eq!(request.hot_wire_count, Some(2));
        assert_eq!(request.post_spacing_override, Some(dec!(7.5)));
        assert_eq!(request.wire_count_override, Some(9));
        assert!(request.electric_outrigger);
        assert_eq!(request.staples_per_box, Some(1000));
        assert_eq!(request.price_overrides["5inch posts"], dec!(11.20));
        assert_eq!(request.price_overrides["Wire - 2.5mm HT"], Decimal::ZERO);
    }

    #[test]
    fn test_missing_fence_length() {
        let err = validate(json!({ "fence_length": "" })).unwrap_err();
        assert_eq!(err, CalcError::missing_field("fence_length"));
    }

    #[test]
    fn test_fence_length_bounds() {
        assert_eq!(validate(json!({ "fence_length": 0 })).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(validate(json!({ "fence_length": 50000.01 })).unwrap_err().error_code(), "INVALID_INPUT");
        assert!(validate(json!({ "fence_length": 0.01 })).is_ok());
        assert!(validate(json!({ "fence_length": 50000 })).is_ok());
    }

    #[test]
    fn test_out_of_range_message() {
        match validate(json!({ "fence_length": 100, "labor_rate": 1001 })).unwrap_err() {
            CalcError::InvalidInput { field, reason, .. } => {
                assert_eq!(field, "labor_rate");
                assert_eq!(reason, "Labor rate cannot exceed 1000");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch() {
        let err = validate(json!({ "fence_length": "long" })).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
        let err = validate(json!({ "fence_length": 100, "wire_count": 2.5 })).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
        let err = validate(json!([1, 2])).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_legacy_netting_values() {
        let sheep = validate(json!({ "fence_length": 100, "netting": "yes" })).unwrap();
        assert_eq!(sheep.netting_type, NettingType::Sheep);
        let sheep = validate(json!({ "fence_length": 100, "netting": true })).unwrap();
        assert_eq!(sheep.netting_type, NettingType::Sheep);
        let none = validate(json!({ "fence_length": 100, "netting": "no" })).unwrap();
        assert_eq!(none.netting_type, NettingType::None);
        let err = validate(json!({ "fence_length": 100, "netting_type": "rabbit" })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CHOICE");
    }

    #[test]
    fn test_outrigger_forced_off_without_deer() {
        let request = validate(json!({ "fence_length": 100, "netting_type": "sheep", "electric_outrigger": true }))
            .unwrap();
        assert!(!request.electric_outrigger);
        let request = validate(json!({ "fence_length": 100, "netting_type": "deer", "electric_outrigger": "0" }))
            .unwrap();
        assert!(!request.electric_outrigger);
    }

    #[test]
    fn test_spacing_limit_depends_on_netting() {
        assert!(validate(json!({ "fence_length": 100, "post_spacing": 12 })).is_ok());
        let err = validate(json!({ "fence_length": 100, "post_spacing": 12, "netting_type": "deer" })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_wires_only_for_deer() {
        assert!(validate(json!({ "fence_length": 100, "wire_count": 0 })).is_err());
        let deer = validate(json!({ "fence_length": 100, "wire_count": 0, "netting_type": "deer" })).unwrap();
        assert_eq!(deer.wire_count_override, Some(0));
    }

    #[test]
    fn test_hot_wire_count() {
        let ignored = validate(json!({ "fence_length": 100, "hot_wire_count": 50 })).unwrap();
        assert_eq!(ignored.hot_wire_count, None);

        let err = validate(json!({
            "fence_length": 100, "top_wire_type": "hot", "wire_count": 2, "hot_wire_count": 3
        }))
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = validate(json!({ "fence_length": 100, "top_wire_type": "hot", "hot_wire_count": 0 })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_top_wire() {
        let err = validate(json!({ "fence_length": 100, "top_wire_type": "electric" })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CHOICE");
    }

    #[test]
    fn test_price_overrides() {
        let err = validate(json!({ "fence_length": 100, "price_overrides": ["a"] })).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
        let err = validate(json!({ "fence_length": 100, "price_overrides": { "Post": -1 } })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_custom_limits() {
        let limits = InputLimits {
            max_fence_length: dec!(1000),
            ..InputLimits::default()
        };
        let err = validate_calculation_input(&json!({ "fence_length": 1500 }), &limits).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_material_update() {
        let update = validate_material_update(&json!({
            "current_price": "145.50",
            "roll_length": 400,
            "price_source": "Farmlands",
            "auto_update_enabled": true
        }))
        .unwrap();
        assert_eq!(update.current_price, Some(dec!(145.50)));
        assert_eq!(update.roll_length, Some(dec!(400)));
        assert_eq!(update.price_source.as_deref(), Some("Farmlands"));
        assert_eq!(update.auto_update_enabled, Some(true));
        assert!(!update.clear_roll_length);
    }

    #[test]
    fn test_material_update_edges() {
        let cleared = validate_material_update(&json!({ "roll_length": "" })).unwrap();
        assert!(cleared.clear_roll_length);

        let free = validate_material_update(&json!({ "current_price": 0 })).unwrap();
        assert_eq!(free.current_price, Some(Decimal::ZERO));

        let err = validate_material_update(&json!({ "current_price": 1000000 })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = validate_material_update(&json!({ "price_source": "x".repeat(201) })).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = validate_material_update(&json!({ "auto_update_enabled": "yes" })).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("post_spacing"), "Post spacing");
        assert_eq!(display_name("labor_rate"), "Labor rate");
    }
}
