//! Solar-multiplier sweep tool
//!
//! Runs an ascending then descending sweep of the energy-balance model and
//! writes one record per step.
//!
//! Usage:
//!   ebm-sweep [OPTIONS]
//!
//! Options:
//!   -c, --config <PATH>     TOML run configuration
//!   --min <VALUE>           Lowest solar multiplier
//!   --max <VALUE>           Highest solar multiplier
//!   -f, --format <FORMAT>   csv or json [default: csv]
//!   -o, --output <PATH>     Write results here instead of stdout
//!   --write-config <PATH>   Write the effective configuration and exit
//!   -v, --verbose           Report every step on stderr

mod output;

use clap::Parser;
use ebm_core::config::RunConfig;
use ebm_core::hysteresis::{HysteresisLoop, DEFAULT_JUMP_THRESHOLD};
use ebm_core::insolation::InsolationDistribution;
use ebm_core::{FloatValue, Model};
use output::Format;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Sweep the solar multiplier up and back down to expose hysteresis.
#[derive(Parser, Debug)]
#[command(name = "ebm-sweep")]
#[command(about = "Run a latitudinal energy-balance model over a solar-multiplier round trip")]
struct Args {
    /// TOML run configuration. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lowest solar multiplier
    #[arg(long, allow_negative_numbers = true)]
    min: Option<FloatValue>,

    /// Highest solar multiplier
    #[arg(long, allow_negative_numbers = true)]
    max: Option<FloatValue>,

    /// Temperature (°C) every band starts from
    #[arg(long, allow_negative_numbers = true)]
    initial_temperature: Option<FloatValue>,

    /// Number of latitude bands in one hemisphere
    #[arg(short, long)]
    bands: Option<usize>,

    /// Latitudinal heat transport coefficient
    #[arg(short, long)]
    transport: Option<FloatValue>,

    /// Insolation distribution: seasonal or uniform
    #[arg(short, long)]
    distribution: Option<InsolationDistribution>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Report every step on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            RunConfig::from_toml_str(&text)?
        }
        None => RunConfig::default(),
    };
    apply_overrides(&mut config, args);

    if let Some(path) = &args.write_config {
        fs::write(path, config.to_toml_string()?)?;
        if args.verbose {
            eprintln!("Wrote configuration to {}", path.display());
        }
        return Ok(());
    }

    let model = Model::new(config.model.clone());
    let sweep = model.sweep(&config.sweep)?;
    let geometry = sweep.solver().geometry().clone();
    let ice_albedo = config.model.heat.ice_albedo;

    if args.verbose {
        eprintln!(
            "Sweeping {} to {} over {} bands ({} insolation)",
            config.sweep.min_multiplier,
            config.sweep.max_multiplier,
            config.sweep.num_bands,
            config.model.distribution
        );
    }

    let mut results = Vec::new();
    let mut failure = None;
    for step in sweep {
        match step {
            Ok(result) => {
                if args.verbose {
                    eprintln!(
                        "  multiplier {:>8.4}  mean {:>9.3} °C",
                        result.solar_multiplier, result.solution.average_temperature
                    );
                }
                results.push(result);
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            output::write_results(&mut writer, args.format, &results, &geometry, ice_albedo)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            output::write_results(&mut writer, args.format, &results, &geometry, ice_albedo)?;
        }
    }

    let hysteresis = HysteresisLoop::from_results(results);
    for point in hysteresis.tipping_points(DEFAULT_JUMP_THRESHOLD) {
        eprintln!(
            "{} between multipliers {} and {}: mean temperature {:+.2} °C",
            if point.rising { "Thaw" } else { "Freeze" },
            point.from_multiplier,
            point.to_multiplier,
            point.temperature_change
        );
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn apply_overrides(config: &mut RunConfig, args: &Args) {
    if let Some(min) = args.min {
        config.sweep.min_multiplier = min;
    }
    if let Some(max) = args.max {
        config.sweep.max_multiplier = max;
    }
    if let Some(initial) = args.initial_temperature {
        config.sweep.initial_temperature = initial;
    }
    if let Some(bands) = args.bands {
        config.sweep.num_bands = bands;
    }
    if let Some(transport) = args.transport {
        config.model.heat.transport_coefficient = transport;
    }
    if let Some(distribution) = args.distribution {
        config.model.distribution = distribution;
    }
}
