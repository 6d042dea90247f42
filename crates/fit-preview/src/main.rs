//! Fitting room preview
//!
//! Builds a dressed mannequin without a renderer and writes it to disk, or
//! reports where a garment would dip inside the body.
//!
//! # Usage
//!
//! ```bash
//! # Default body wearing a tee, jeans and sneakers, as OBJ and STL
//! fit-preview export --wear t2 --wear b1 --wear s1 --out preview
//!
//! # Custom body from JSON
//! fit-preview export --measurements body.json --format stl
//!
//! # Coverage report for every slot
//! fit-preview coverage --measurements body.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fit_kernel::{mesh_to_obj, mesh_to_stl};
use fit_types::{GarmentCatalog, Measurements, Slot};
use fitting_engine::config::catalog_from_json;
use fitting_engine::coverage::coverage_report;
use fitting_engine::{FitConfig, ViewportState};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Fitting room preview
#[derive(Parser, Debug)]
#[command(name = "fit-preview")]
#[command(author, version, about = "Headless virtual fitting room preview", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Measurements JSON file; defaults to the storefront body
    #[arg(short, long, global = true)]
    measurements: Option<PathBuf>,

    /// Engine config JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the dressed figure and write mesh files
    Export {
        /// Catalog item ids to wear
        #[arg(short, long)]
        wear: Vec<String>,

        /// Catalog JSON file; defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output path without extension
        #[arg(short, long, default_value = "fitting-room")]
        out: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Both)]
        format: Format,
    },

    /// Check that every slot's garment stays outside the body
    Coverage,

    /// List the built-in catalog
    Catalog,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Obj,
    Stl,
    Both,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("fit-preview v{}", env!("CARGO_PKG_VERSION"));

    let measurements = load_measurements(cli.measurements.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Export {
            wear,
            catalog,
            out,
            format,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            export(measurements, config, &catalog, &wear, &out, format)?;
        }
        Commands::Coverage => {
            let mut gaps = 0;
            for slot in Slot::ALL {
                let report = coverage_report(slot, &measurements, &config)?;
                println!(
                    "{:<7} checked {:>4} samples, {} gaps",
                    slot.as_str(),
                    report.checked,
                    report.gaps.len()
                );
                if let Some(gap) = report.worst_gap() {
                    let at = gap.t.map(|t| format!(" at t = {t:.3}")).unwrap_or_default();
                    println!(
                        "        worst: {} inside {}{at} by {:.4} m ({:?})",
                        gap.garment,
                        gap.body,
                        gap.depth(),
                        gap.extent
                    );
                }
                gaps += report.gaps.len();
            }
            if gaps > 0 {
                warn!(gaps, "garments intersect the body");
            }
        }
        Commands::Catalog => {
            let catalog = GarmentCatalog::builtin();
            for slot in Slot::ALL {
                println!("{}:", slot.category());
                for item in catalog.items(slot) {
                    println!(
                        "  {:<4} {:<16} {} {:>7.2}  {}",
                        item.id, item.name, item.color_hex, item.price, item.fabric_name
                    );
                }
            }
        }
    }

    Ok(())
}

fn export(
    measurements: Measurements,
    config: FitConfig,
    catalog: &GarmentCatalog,
    wear: &[String],
    out: &Path,
    format: Format,
) -> anyhow::Result<()> {
    let mut state = ViewportState::new(measurements, config)?;
    for id in wear {
        let garment = state.equip_from_catalog(catalog, id)?;
        info!(id = %id, slot = %garment.slot, "wearing");
    }

    let mesh = state.world_mesh();
    mesh.validate()?;
    let bounds = mesh.bounds();
    let [width, height, depth] = bounds.size();
    let center = bounds.center();
    info!(
        width,
        height,
        depth,
        center_y = center.y,
        "figure extent"
    );
    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        focus = state.focus_height(),
        "built dressed figure"
    );

    if matches!(format, Format::Obj | Format::Both) {
        let path = out.with_extension("obj");
        fs::write(&path, mesh_to_obj(&mesh))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote OBJ");
    }
    if matches!(format, Format::Stl | Format::Both) {
        let path = out.with_extension("stl");
        fs::write(&path, mesh_to_stl(&mesh))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote STL");
    }

    println!("{}", serde_json::to_string_pretty(&state.scene())?);
    Ok(())
}

fn load_measurements(path: Option<&Path>) -> anyhow::Result<Measurements> {
    let Some(path) = path else {
        return Ok(Measurements::DEFAULT);
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let m: Measurements = serde_json::from_str(&text)
        .with_context(|| format!("parsing measurements in {}", path.display()))?;
    m.validate()?;
    Ok(m)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FitConfig> {
    match path {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(FitConfig::from_json(&text)?)
        }
        None => Ok(FitConfig::default()),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<GarmentCatalog> {
    match path {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(catalog_from_json(&text)?)
        }
        None => Ok(GarmentCatalog::builtin()),
    }
}
