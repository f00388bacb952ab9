//! Configuration loading and parsing
//!
//! Every section and field is optional; missing values fall back to the
//! library defaults, and command-line flags override the file.

use anyhow::{Context, Result};
use orbit_report::{Alignment, ChartStyle, ReportConfig, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportSection {
    pub input: Option<PathBuf>,
    pub distance_dir: Option<PathBuf>,
    pub orbit_dir: Option<PathBuf>,
    pub reference_body: Option<String>,
    pub alignment: Option<Alignment>,
    #[serde(default)]
    pub parallel: bool,
}

impl AppConfig {
    /// Library report configuration described by this file
    pub fn report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::new()
            .with_parallel(self.report.parallel)
            .with_style(self.style.clone());
        if let Some(input) = &self.report.input {
            config = config.with_input(input);
        }
        if let Some(dir) = &self.report.distance_dir {
            config = config.with_distance_dir(dir);
        }
        if let Some(dir) = &self.report.orbit_dir {
            config = config.with_orbit_dir(dir);
        }
        if let Some(name) = &self.report.reference_body {
            config = config.with_reference_body(name);
        }
        if let Some(alignment) = self.report.alignment {
            config = config.with_alignment(alignment);
        }
        config
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .style
        .validate()
        .with_context(|| format!("Invalid [style] section in {:?}", path))?;
    config
        .simulation
        .validate()
        .with_context(|| format!("Invalid [simulation] section in {:?}", path))?;

    Ok(config)
}
