//! Orbit Report CLI Application
//!
//! Command-line front end for the orbit-report library. It adds:
//! - Argument parsing and TOML configuration
//! - Logging setup
//! - Optional simulation run producing the input table
//! - Completion message and JSON run summary

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use orbit_report::{Alignment, ReportConfig, ReportGenerator, ReportSummary, SimulationConfig};
use std::path::{Path, PathBuf};

mod config;

/// Orbit Report - Render distance and orbit charts from a simulation table
#[derive(Parser, Debug)]
#[command(name = "orbit-report-cli")]
#[command(about = "Render distance and orbit charts from a body-position table", long_about = None)]
#[command(version)]
struct Args {
    /// Simulation table to read (default: simulation_output.csv)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Folder for distance charts (default: planet_distance_graphs)
    #[arg(long, value_name = "DIR")]
    distance_dir: Option<PathBuf>,

    /// Folder for orbit charts (default: planet_orbits)
    #[arg(long, value_name = "DIR")]
    orbit_dir: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Label of the body distances are measured against (default: Sun)
    #[arg(long, value_name = "NAME")]
    reference: Option<String>,

    /// How planet rows are paired with reference rows
    #[arg(long, value_enum, value_name = "MODE")]
    align: Option<AlignArg>,

    /// Output resolution in dots per inch (default: 300)
    #[arg(long, value_name = "DPI")]
    dpi: Option<u32>,

    /// TrueType font used for chart text
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Render charts without titles, labels or legends
    #[arg(long)]
    no_text: bool,

    /// Render planets in parallel
    #[arg(short = 'j', long)]
    parallel: bool,

    /// Run the N-body simulation first, writing the input table
    #[arg(long)]
    simulate: bool,

    /// Simulated duration in days (with --simulate)
    #[arg(long, value_name = "DAYS")]
    days: Option<u32>,

    /// Integration steps per simulated day (with --simulate)
    #[arg(long, value_name = "COUNT")]
    steps_per_day: Option<u32>,

    /// Write a JSON summary of the generated files
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlignArg {
    /// Join rows on the Day column
    Day,
    /// Pair rows by position
    Row,
}

impl From<AlignArg> for Alignment {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Day => Alignment::Day,
            AlignArg::Row => Alignment::Row,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Orbit Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using orbit-report library v{}", orbit_report::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let report_config = apply_args(app_config.report_config(), &args);

    if args.simulate {
        let simulation = simulation_config(app_config.simulation.clone(), &args);
        orbit_report::simulate_to_file(&simulation, &report_config.input)
            .with_context(|| format!("Simulation failed writing {:?}", report_config.input))?;
    }

    let summary = ReportGenerator::new(report_config)
        .context("Failed to set up chart rendering")?
        .run()
        .context("Failed to generate charts")?;

    if let Some(path) = &args.summary {
        write_summary(&summary, path)?;
    }

    if !args.quiet {
        println!("All graphs saved successfully.");
    }
    Ok(())
}

/// Overlay command-line flags on the configured report settings
fn apply_args(mut config: ReportConfig, args: &Args) -> ReportConfig {
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(dir) = &args.distance_dir {
        config.distance_dir = dir.clone();
    }
    if let Some(dir) = &args.orbit_dir {
        config.orbit_dir = dir.clone();
    }
    if let Some(name) = &args.reference {
        config.reference_body = name.clone();
    }
    if let Some(align) = args.align {
        config.alignment = align.into();
    }
    if let Some(dpi) = args.dpi {
        config.style.dpi = dpi;
    }
    if let Some(font) = &args.font {
        config.style.font_path = Some(font.clone());
    }
    if args.no_text {
        config.style.draw_text = false;
    }
    if args.parallel {
        config.parallel = true;
    }
    config
}

fn simulation_config(mut config: SimulationConfig, args: &Args) -> SimulationConfig {
    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(steps) = args.steps_per_day {
        config.steps_per_day = steps;
    }
    config
}

fn write_summary(summary: &ReportSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write summary: {:?}", path))?;
    log::info!("Run summary written to {:?}", path);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "orbit-report-cli",
            "--input",
            "other.csv",
            "--reference",
            "Sol",
            "--align",
            "row",
            "--dpi",
            "96",
            "--no-text",
            "-j",
        ]);
        let config = apply_args(ReportConfig::new().with_orbit_dir("orbits"), &args);
        assert_eq!(config.input, PathBuf::from("other.csv"));
        assert_eq!(config.orbit_dir, PathBuf::from("orbits"));
        assert_eq!(config.reference_body, "Sol");
        assert_eq!(config.alignment, Alignment::Row);
        assert_eq!(config.style.dpi, 96);
        assert!(!config.style.draw_text);
        assert!(config.parallel);
    }

    #[test]
    fn test_no_flags_keep_defaults() {
        let args = Args::parse_from(["orbit-report-cli"]);
        let config = apply_args(ReportConfig::new(), &args);
        assert_eq!(config.input, PathBuf::from("simulation_output.csv"));
        assert_eq!(config.distance_dir, PathBuf::from("planet_distance_graphs"));
        assert!(config.style.draw_text);
        assert!(!config.parallel);
    }

    #[test]
    fn test_simulation_flags() {
        let args = Args::parse_from([
            "orbit-report-cli",
            "--simulate",
            "--days",
            "10",
            "--steps-per-day",
            "8",
        ]);
        let config = simulation_config(SimulationConfig::default(), &args);
        assert!(args.simulate);
        assert_eq!(config.days, 10);
        assert_eq!(config.steps_per_day, 8);
    }
}
