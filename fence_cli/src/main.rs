//! # Fence Planner CLI
//!
//! Material and cost estimates from the terminal.
//!
//! ```text
//! fence calc 2_wire_electric 250 --top-wire hot --hot-wires 1
//! fence calc deer 60 --netting deer --outrigger --json
//! fence materials --catalog materials.json
//! fence fence-types
//! ```
//!
//! Without `--catalog` / `--fence-types` the built-in starter data is used.

mod logging;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use fence_core::calculations::{calculate, CalculationResult};
use fence_core::config::EngineConfig;
use fence_core::fence::{find_active, FenceKind, FenceSpecification};
use fence_core::file_io::{load_catalog, load_config, load_fence_types, save_result};
use fence_core::materials::{seed, Catalog};
use fence_core::validation::validate_calculation_input;
use serde_json::{Map, Value};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "fence", version, about = "Fence material and cost estimator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate materials, labor and cost for a fence
    Calc(CalcArgs),

    /// List the material catalog
    Materials {
        #[command(flatten)]
        sources: Sources,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the configured fence types
    FenceTypes {
        #[command(flatten)]
        sources: Sources,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Sources {
    /// Material catalog (JSON array); built-in starter catalog if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Fence types (JSON array naming catalog materials)
    #[arg(long)]
    fence_types: Option<PathBuf>,
}

#[derive(Args)]
struct CalcArgs {
    /// Fence type code, e.g. 2_wire_electric
    fence_type: String,

    /// Fence length (m)
    length: String,

    /// Labour rate ($/hour)
    #[arg(long)]
    labor_rate: Option<String>,

    /// Build rate (m/hour)
    #[arg(long)]
    build_rate: Option<String>,

    /// Top wire: standard, hot or barb
    #[arg(long)]
    top_wire: Option<String>,

    /// Number of hot wires (with --top-wire hot)
    #[arg(long)]
    hot_wires: Option<String>,

    /// Post spacing override (m)
    #[arg(long)]
    spacing: Option<String>,

    /// Wire count override
    #[arg(long)]
    wires: Option<String>,

    /// Netting: none, sheep or deer
    #[arg(long)]
    netting: Option<String>,

    /// Add an electric outrigger (deer netting only)
    #[arg(long)]
    outrigger: bool,

    /// Staples per box
    #[arg(long)]
    staples_per_box: Option<String>,

    /// Unit price override, NAME=VALUE (repeatable)
    #[arg(long = "price", value_name = "NAME=VALUE")]
    prices: Vec<String>,

    #[command(flatten)]
    sources: Sources,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Calc(args) => cmd_calc(&args),
        Commands::Materials { sources, json } => cmd_materials(&sources, json),
        Commands::FenceTypes { sources, json } => cmd_fence_types(&sources, json),
    }
}

fn catalog_from(sources: &Sources) -> anyhow::Result<Catalog> {
    match &sources.catalog {
        Some(path) => load_catalog(path).with_context(|| format!("loading catalog {}", path.display())),
        None => Ok(seed::materials()),
    }
}

fn fence_types_from(sources: &Sources, catalog: &Catalog) -> anyhow::Result<Vec<FenceSpecification>> {
    match &sources.fence_types {
        Some(path) => {
            load_fence_types(path, catalog).with_context(|| format!("loading fence types {}", path.display()))
        }
        None => Ok(seed::fence_types(catalog)?),
    }
}

fn config_from(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Collect the options into the loosely-typed shape the validator expects.
fn raw_request(args: &CalcArgs) -> anyhow::Result<Value> {
    let mut data = Map::new();
    data.insert("fence_length".into(), Value::String(args.length.clone()));

    let optional = [
        ("labor_rate", &args.labor_rate),
        ("build_rate", &args.build_rate),
        ("top_wire_type", &args.top_wire),
        ("hot_wire_count", &args.hot_wires),
        ("post_spacing", &args.spacing),
        ("wire_count", &args.wires),
        ("netting_type", &args.netting),
        ("staples_per_box", &args.staples_per_box),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            data.insert(field.into(), Value::String(value.clone()));
        }
    }
    data.insert("electric_outrigger".into(), Value::Bool(args.outrigger));

    let mut overrides = Map::new();
    for pair in &args.prices {
        let Some((name, price)) = pair.split_once('=') else {
            bail!("--price expects NAME=VALUE, got {:?}", pair);
        };
        overrides.insert(name.trim().to_string(), Value::String(price.trim().to_string()));
    }
    data.insert("price_overrides".into(), Value::Object(overrides));

    Ok(Value::Object(data))
}

fn cmd_calc(args: &CalcArgs) -> anyhow::Result<()> {
    let catalog = catalog_from(&args.sources)?;
    let fences = fence_types_from(&args.sources, &catalog)?;
    let config = config_from(args.config.as_deref())?;

    let kind: FenceKind = args.fence_type.parse()?;
    let fence = find_active(&fences, kind).ok_or_else(|| anyhow!("fence type {} is not configured", kind))?;

    let request = validate_calculation_input(&raw_request(args)?, &config.limits)?;
    debug!(?request, "validated request");

    let result = calculate(fence, &request, &catalog, &config);

    if let Some(path) = &args.output {
        save_result(&result, path)?;
        info!(path = %path.display(), "saved result");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn print_summary(result: &CalculationResult) {
    println!("{} - {:.2} m", result.fence_type_name, result.fence_length);
    println!();
    println!("  Posts:      {} @ {:.2} m spacing", result.posts_required, result.post_spacing_used);
    println!(
        "  Wires:      {} ({} top), {:.2} m, {} rolls",
        result.wire_count_used, result.top_wire_type, result.wire_length_meters, result.wire_rolls_required
    );
    if let Some(height) = result.netting_height_cm {
        println!(
            "  Netting:    {} ({} cm), {} rolls",
            result.netting_type, height, result.netting_rolls_required
        );
    }
    if let Some(outrigger) = &result.electric_outrigger_details {
        println!(
            "  Outrigger:  {:.2} m, {} rolls, {} insulators, {} connectors",
            outrigger.wire_length_meters, outrigger.wire_rolls, outrigger.insulators, outrigger.connectors
        );
    }
    let strainers = &result.strainer_recommendation;
    println!(
        "  Strainers:  {} (every {} m), {} stay posts, {} triplex",
        strainers.recommended_strainers_total,
        strainers.interval_meters_used,
        strainers.recommended_stay_posts,
        strainers.recommended_triplex
    );
    println!();

    println!("  {:<32} {:>8} {:<6} {:>10} {:>11}", "Material", "Qty", "", "Unit", "Cost");
    for line in result.display_lines() {
        println!(
            "  {:<32} {:>8} {:<6} {:>10.2} {:>11.2}",
            line.material,
            line.quantity,
            line.unit.label(),
            line.unit_price,
            line.cost
        );
    }
    println!();
    println!("  {:<58} {:>11.2}", "Materials", result.total_material_cost);
    println!(
        "  {:<58} {:>11.2}",
        format!(
            "Labour ({:.2} h @ {:.2}/h, {} m/h)",
            result.labor_hours, result.labor_rate_per_hour, result.build_rate_per_hour
        ),
        result.labor_cost
    );
    println!("  {:<58} {:>11.2}", "Total", result.total_cost);
}

fn cmd_materials(sources: &Sources, json: bool) -> anyhow::Result<()> {
    let catalog = catalog_from(sources)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("  {:<32} {:<6} {:>10} {:>10}", "Material", "Unit", "Price", "Roll (m)");
    for material in catalog.iter().filter(|m| m.is_active) {
        let roll = material
            .usable_roll_length()
            .map(|len| len.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<32} {:<6} {:>10.2} {:>10}",
            material.name,
            material.unit,
            material.effective_price(),
            roll
        );
    }
    Ok(())
}

fn cmd_fence_types(sources: &Sources, json: bool) -> anyhow::Result<()> {
    let catalog = catalog_from(sources)?;
    let fences: Vec<FenceSpecification> =
        fence_types_from(sources, &catalog)?.into_iter().filter(|fence| fence.is_active).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&fences)?);
        return Ok(());
    }

    let name_of = |material: &Option<fence_core::Material>| {
        material.as_ref().map(|m| m.name.clone()).unwrap_or_else(|| "-".to_string())
    };
    println!("  {:<16} {:<18} {:>8} {:>6}  {}", "Code", "Name", "Spacing", "Wires", "Post / Wire");
    for fence in &fences {
        println!(
            "  {:<16} {:<18} {:>8} {:>6}  {} / {}",
            fence.kind.code(),
            fence.display_name,
            fence.post_spacing,
            fence.wire_count,
            name_of(&fence.post_material),
            name_of(&fence.wire_material)
        );
    }
    Ok(())
}
