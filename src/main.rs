use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use riskpie::ChartError;
use riskpie::chart::write_geojson;
use riskpie::config::{CliOverrides, FileConfig, RunConfig};
use riskpie::pipeline::{RunSummary, chart_collection, load};

/// Generate a nested risk pie chart (GeoJSON) around a site from a CSV table
///
/// The table needs an `Area` and a `Risk` column. One row with Area `Site` carries
/// the site position in `Lon`/`Lat`; every other Area is `<direction>_R1` (inner
/// ring) or `<direction>_R2` (outer ring). Directions share the circle equally,
/// clockwise from north, in the order they first appear.
///
/// Examples:
///   # Read input.csv, write nested_pie_chart.geojson with 100m/200m rings
///   riskpie
///
///   # Wider rings, finer arcs
///   riskpie -i plant.csv -o plant.geojson --inner-radius 500 --outer-radius 1500 --points 90
///
///   # Use a config file
///   riskpie --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "riskpie")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches riskpie.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input CSV table (defaults to input.csv)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output GeoJSON file (defaults to nested_pie_chart.geojson)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Inner ring radius in meters (defaults to 100)
    #[arg(long)]
    inner_radius: Option<f64>,

    /// Outer ring radius in meters (defaults to 200)
    #[arg(long)]
    outer_radius: Option<f64>,

    /// Segments per arc (defaults to 30)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    points: Option<u16>,

    /// Area value of the row holding the site coordinates (defaults to Site)
    #[arg(long)]
    site_label: Option<String>,

    /// Do not check that every direction has both an R1 and an R2 row before building
    #[arg(long)]
    lenient: bool,

    /// Pretty-print the GeoJSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit code of the innermost `ChartError` in the chain, 1 when there is none
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<ChartError>()
        .map_or(1, ChartError::exit_code)
}

fn run(args: Args) -> Result<()> {
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let cli = CliOverrides {
        input: args.input,
        output: args.output,
        inner_radius: args.inner_radius,
        outer_radius: args.outer_radius,
        arc_points: args.points.map(usize::from),
        site_label: args.site_label,
        lenient: args.lenient,
        pretty: args.pretty,
        verbose: args.verbose,
    };
    let config = RunConfig::resolve(cli, file_config.as_ref());
    let verbose = config.verbose;

    println!("riskpie - Nested Risk Pie Chart Generator");
    println!("=========================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", config.input.display());
        println!("  Output: {}", config.output.display());
        println!("  Inner radius: {}m", config.params.inner_radius);
        println!("  Outer radius: {}m", config.params.outer_radius);
        println!("  Arc segments: {}", config.params.arc_points);
        println!("  Site label: {}", config.site_label);
        println!(
            "  Tier check: {}",
            if config.lenient { "at assembly" } else { "at load" }
        );
        println!();
    }

    let spinner = create_spinner("Loading risk table...");
    let start = Instant::now();
    let table =
        load(&config).with_context(|| format!("Failed to load {}", config.input.display()))?;
    spinner.finish_with_message(format!(
        "Loaded {} directions around ({:.5}, {:.5}) [{:.1}s]",
        table.risks.directions().len(),
        table.center.lon,
        table.center.lat,
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        println!("  Directions: {}", table.risks.directions().join(", "));
    }

    let spinner = create_spinner("Building sector polygons...");
    let start = Instant::now();
    let collection =
        chart_collection(&table, &config.params).context("Failed to build pie chart")?;
    spinner.finish_with_message(format!(
        "Built {} sector polygons [{:.1}s]",
        collection.features.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Writing GeoJSON file...");
    let start = Instant::now();
    let summary = RunSummary {
        directions: table.risks.directions().len(),
        features: collection.features.len(),
        bytes: write_geojson(&config.output, &collection, config.pretty)
            .context("Failed to write GeoJSON file")?,
    };
    spinner.finish_with_message(format!(
        "Wrote {:.1} KB [{:.1}s]",
        summary.bytes as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!(
        "Nested pie chart saved as: {} ({} directions, {} features)",
        config.output.display(),
        summary.directions,
        summary.features
    );

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
