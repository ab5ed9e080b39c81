// File: crates/demo/src/main.rs
// Summary: Demo loads an indicator CSV, builds the linked dashboard and renders a scripted session to PNGs.

mod load;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dash_core::{Dashboard, DashboardConfig};
use dash_render_skia::{theme, RenderOptions};

/// Linked-view dashboard demo: brushing and filtering replayed headlessly.
#[derive(Parser, Debug)]
#[command(name = "linkdash-demo", version, about)]
struct Args {
    /// Indicator CSV: Entity, Code, Year, then one column per metric.
    #[arg(env = "LINKDASH_CSV")]
    csv: PathBuf,

    /// Dashboard layout (TOML). Defaults to the health dashboard.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for rendered frames.
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// Region codes drawn by map views; defaults to every code in the CSV.
    #[arg(long, value_delimiter = ',')]
    regions: Vec<String>,

    /// Color theme: dark or light.
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Omit axis titles and tick labels.
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let dataset = load::load_dataset(&args.csv)?;
    println!("Loaded {} rows, metrics: {:?}", dataset.rows.len(), dataset.metrics);

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<DashboardConfig>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DashboardConfig::default(),
    };
    let geometry = load::geometry_for(&dataset, &args.regions);
    let mut dash = Dashboard::from_config(dataset, &config, geometry).context("building dashboard")?;

    let opts = RenderOptions { theme: theme::find(&args.theme), draw_labels: !args.no_labels, ..RenderOptions::default() };
    let steps = session::script(&dash);
    let written = session::replay(&mut dash, steps, &opts, &args.out)?;
    println!("Wrote {} frames under {}", written.len(), args.out.display());
    Ok(())
}
