//! # fence_core - Fence Material and Cost Estimation Engine
//!
//! `fence_core` turns a fence type, a length and a handful of options into a
//! priced bill of materials: posts, wire rolls, netting, staples, insulators,
//! strainers and labor. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`calculate`] is a pure function of its inputs
//! - **Total**: the engine never fails; missing catalog materials only drop lines
//! - **Exact**: money and lengths are [`rust_decimal::Decimal`], rounded to 2 places
//! - **Rich Errors**: validation and I/O return structured [`CalcError`]s
//!
//! ## Quick Start
//!
//! ```rust
//! use fence_core::{calculate, EngineConfig};
//! use fence_core::materials::seed;
//! use fence_core::request::{CalculationRequest, TopWireType};
//! use rust_decimal_macros::dec;
//!
//! let catalog = seed::materials();
//! let fences = seed::fence_types(&catalog).unwrap();
//!
//! let request = CalculationRequest::new(dec!(250)).with_top_wire(TopWireType::Hot);
//! let result = calculate(&fences[0], &request, &catalog, &EngineConfig::default());
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"posts_required\": 33"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Quantity planner, pricing, line items and totals
//! - [`fence`] - Fence types and their materials
//! - [`materials`] - Material definitions, catalog trait and seed data
//! - [`request`] - Calculation requests and option enums
//! - [`validation`] - Raw JSON input to typed requests
//! - [`config`] - Engine defaults, catalog names and input limits
//! - [`units`] - Rounding and ceiling helpers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Catalog/config loading and atomic result saves

pub mod calculations;
pub mod config;
pub mod errors;
pub mod fence;
pub mod file_io;
pub mod materials;
pub mod request;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CalculationResult, LineItem, LineItemKind};
pub use config::EngineConfig;
pub use errors::{CalcError, CalcResult};
pub use fence::{FenceKind, FenceSpecification};
pub use materials::{Catalog, Material, MaterialCatalog};
pub use request::CalculationRequest;
