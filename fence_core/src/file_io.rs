//! # File I/O Module
//!
//! Reads catalogs, fence types and engine configuration from disk, and saves
//! calculation results.
//!
//! - **Catalogs**: JSON array of materials
//! - **Fence types**: JSON array of [`FenceTypeRecord`]s naming catalog materials
//! - **Config**: TOML, every key optional
//! - **Results**: pretty JSON, written atomically (`.tmp`, fsync, rename)
//!
//! ## Example
//!
//! ```rust,no_run
//! use fence_core::calculations::calculate;
//! use fence_core::file_io::{load_catalog, load_config, load_fence_types, save_result};
//! use fence_core::request::CalculationRequest;
//! use rust_decimal_macros::dec;
//! use std::path::Path;
//!
//! let catalog = load_catalog(Path::new("materials.json"))?;
//! let fences = load_fence_types(Path::new("fence_types.json"), &catalog)?;
//! let config = load_config(Path::new("fence.toml"))?;
//!
//! let result = calculate(&fences[0], &CalculationRequest::new(dec!(250)), &catalog, &config);
//! save_result(&result, Path::new("quote.json"))?;
//! # Ok::<(), fence_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::calculations::CalculationResult;
use crate::config::EngineConfig;
use crate::errors::{CalcError, CalcResult};
use crate::fence::{FenceSpecification, FenceTypeRecord};
use crate::materials::{Catalog, Material, MaterialCatalog};

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn parse_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load a material catalog.
///
/// Materials without a current price get their default price.
///
/// # Returns
///
/// * `Err(CalcError::InvalidInput)` - a material has a negative price or roll length
pub fn load_catalog(path: &Path) -> CalcResult<Catalog> {
    let mut materials: Vec<Material> = parse_json(path)?;
    for material in &mut materials {
        material.validate()?;
        material.materialize_current_price();
    }
    debug!(path = %path.display(), count = materials.len(), "loaded catalog");
    Ok(Catalog::from_materials(materials))
}

/// Load fence types and resolve their materials against `catalog`.
///
/// # Returns
///
/// * `Err(CalcError::MaterialNotFound)` - a record names a material the catalog lacks
/// * `Err(CalcError::InvalidInput)` - a record has non-positive post spacing
pub fn load_fence_types(path: &Path, catalog: &impl MaterialCatalog) -> CalcResult<Vec<FenceSpecification>> {
    let records: Vec<FenceTypeRecord> = parse_json(path)?;
    let fences = records
        .iter()
        .map(|record| record.resolve(catalog))
        .collect::<CalcResult<Vec<_>>>()?;
    debug!(path = %path.display(), count = fences.len(), "loaded fence types");
    Ok(fences)
}

/// Load engine configuration from TOML.
pub fn load_config(path: &Path) -> CalcResult<EngineConfig> {
    let contents = read_to_string(path)?;
    EngineConfig::from_toml_str(&contents)
}

/// Save a calculation result with atomic write semantics.
///
/// The result is written to `<path>.tmp`, synced, then renamed over `path`,
/// so an interrupted save never leaves a truncated file behind.
pub fn save_result(result: &CalculationResult, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(result).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), "saved result");
    Ok(())
}

/// Load a previously saved calculation result.
pub fn load_result(path: &Path) -> CalcResult<CalculationResult> {
    parse_json(path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
