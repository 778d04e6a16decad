//! fabric-estimate - CLI tool to estimate fabric requirements, cost and
//! sustainability of garment designs.

use anyhow::{Context, Result};
use clap::Parser;
use fabric_core::validation::{validate_catalog, validate_usages};
use fabric_core::{
    estimate_design, load_catalog, load_config, load_design, load_stock, load_usages,
    score_usage, summarize_inventory, validate_inputs, validate_stock, DesignEstimate,
    EngineConfig, InventorySummary, ScoreDisplay, SustainabilityScore, ValidationResult,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Estimate fabric length, cost and sustainability for a garment design.
#[derive(Parser, Debug)]
#[command(name = "fabric-estimate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Design file (JSON) with pattern pieces
    #[arg(short, long)]
    design: Option<PathBuf>,

    /// Material catalog file (JSON)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of garments in the batch
    #[arg(short, long, default_value = "1")]
    quantity: u32,

    /// Cutting loss factor (0.12 = 12%)
    #[arg(long)]
    loss_factor: Option<f64>,

    /// Usable fabric roll width in cm
    #[arg(long)]
    fabric_width: Option<f64>,

    /// Multiplier from catalog price to base currency
    #[arg(long)]
    price_scale: Option<f64>,

    /// Rounding step for displayed carbon, water and waste totals
    #[arg(long)]
    total_step: Option<f64>,

    /// Finished-product material usage file (JSON) to score
    #[arg(long)]
    usage: Option<PathBuf>,

    /// Stock list file (JSON) to summarize
    #[arg(long)]
    stock: Option<PathBuf>,

    /// Output the results as JSON
    #[arg(long)]
    json: bool,

    /// Validate only, don't estimate
    #[arg(long)]
    validate: bool,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Score of a finished product from its declared material usage.
#[derive(Debug, Serialize)]
struct ProductScore {
    score: SustainabilityScore,
    display: ScoreDisplay,
}

/// Everything one invocation produces.
#[derive(Debug, Default, Serialize)]
struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<DesignEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<ProductScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory: Option<InventorySummary>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let Some(report) = run(&args)? else {
        return Ok(());
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}

/// Build the engine configuration from the optional file and flag overrides.
fn build_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(loss) = args.loss_factor {
        config.loss_factor = loss;
    }
    if let Some(width) = args.fabric_width {
        config.fabric_width_cm = width;
    }
    if let Some(scale) = args.price_scale {
        config.price_unit_scale = scale;
    }
    if let Some(step) = args.total_step {
        config.total_step = step;
    }

    config.check()?;
    Ok(config)
}

/// Load, validate and evaluate the inputs named by `args`.
///
/// Returns the rendered report, or `None` in validate-only mode.
fn run(args: &Args) -> Result<Option<String>> {
    if args.design.is_none() && args.usage.is_none() && args.stock.is_none() {
        anyhow::bail!("Nothing to do: pass --design, --usage or --stock");
    }

    let config = build_config(args)?;

    info!("Loading catalog: {}", args.catalog.display());
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    info!("Loaded {} material(s)", catalog.len());

    let design = match &args.design {
        Some(path) => {
            info!("Processing: {}", path.display());
            let design = load_design(path)
                .with_context(|| format!("Failed to load design {}", path.display()))?;
            info!("Parsed {} pattern piece(s)", design.pieces.len());
            Some(design)
        }
        None => None,
    };

    let usages = match &args.usage {
        Some(path) => Some(
            load_usages(path)
                .with_context(|| format!("Failed to load usage {}", path.display()))?,
        ),
        None => None,
    };

    let stock = match &args.stock {
        Some(path) => Some(
            load_stock(path)
                .with_context(|| format!("Failed to load stock {}", path.display()))?,
        ),
        None => None,
    };

    // Validate
    let mut validation = match &design {
        Some(design) => validate_inputs(design, &catalog),
        None => validate_catalog(&catalog),
    };
    if let Some(usages) = &usages {
        validation.merge(validate_usages(usages));
    }
    if let Some(stock) = &stock {
        validation.merge(validate_stock(stock));
    }
    report_validation(&validation);

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(None);
    }

    let mut output = Output::default();

    if let Some(design) = &design {
        output.estimate = Some(estimate_design(design, &catalog, &config, args.quantity)?);
    }

    if let Some(usages) = &usages {
        let score = score_usage(usages, &catalog);
        output.product = Some(ProductScore {
            display: score.display(&config),
            score,
        });
    }

    if let Some(stock) = &stock {
        output.inventory = Some(summarize_inventory(stock, &catalog, &config));
    }

    let report = if args.json {
        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        json
    } else {
        render_text(&output)?
    };

    Ok(Some(report))
}

fn report_validation(validation: &ValidationResult) {
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }
}

/// Plain-text rendering of every section present in `output`.
fn render_text(output: &Output) -> Result<String> {
    let mut text = String::new();

    if let Some(estimate) = &output.estimate {
        write!(text, "{}", estimate.text_report())?;
    }

    if let Some(product) = &output.product {
        let d = &product.display;
        writeln!(text, "[PRODUCT]")?;
        writeln!(text, "recycled={}%", d.recycled_percentage)?;
        writeln!(text, "score={}%", d.sustainability_score)?;
        writeln!(text, "carbon={} {}", d.carbon, product.score.carbon.unit_label())?;
        writeln!(text, "water={} {}", d.water, product.score.water.unit_label())?;
        writeln!(text, "waste_diverted={} {}", d.waste, product.score.waste.unit_label())?;
        writeln!(text)?;
    }

    if let Some(inventory) = &output.inventory {
        writeln!(text, "[INVENTORY]")?;
        for line in &inventory.lines {
            let name = line.material_name.as_deref().unwrap_or("unknown material");
            writeln!(
                text,
                "{} {}: {:.1} m value={:.0} {}",
                line.material_id, name, line.quantity_m, line.value, line.status
            )?;
        }
        writeln!(text, "materials={}", inventory.material_count)?;
        writeln!(text, "total_meters={:.1}", inventory.total_meters)?;
        writeln!(text, "total_value={:.0}", inventory.total_value)?;
        writeln!(text, "low_stock={}", inventory.low_stock_count)?;
        writeln!(text)?;
    }

    Ok(text)
}
