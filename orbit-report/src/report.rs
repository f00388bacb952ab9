//! Report generation
//!
//! Ties the pipeline together: partition the table, compute distances, build
//! and render every chart, write the PNG files. Output folders are created by
//! [`prepare_output_dirs`], which callers run before generating.

use crate::charts::{self, distance_file_name, orbit_file_name, COMBINED_FILE_NAME};
use crate::config::ReportConfig;
use crate::series;
use crate::table::{Partition, SampleTable};
use crate::types::{BodySeries, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub input: PathBuf,
    pub reference_body: String,
    /// Non-reference bodies, in first-appearance order
    pub planets: Vec<String>,
    pub distance_charts: Vec<PathBuf>,
    pub orbit_charts: Vec<PathBuf>,
    pub combined_chart: PathBuf,
}

impl ReportSummary {
    /// Every file written, distance charts first
    pub fn files(&self) -> Vec<&Path> {
        self.distance_charts
            .iter()
            .chain(self.orbit_charts.iter())
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.combined_chart.as_path()))
            .collect()
    }
}

/// Files written for one planet
struct PlanetOutput {
    distance_chart: PathBuf,
    orbit_chart: PathBuf,
}

/// Create both chart folders if they are missing
pub fn prepare_output_dirs(config: &ReportConfig) -> Result<()> {
    for dir in [&config.distance_dir, &config.orbit_dir] {
        fs::create_dir_all(dir)?;
        log::debug!("Output folder ready: {:?}", dir);
    }
    Ok(())
}

/// Renders the charts described by a [`ReportConfig`]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator, registering the chart font
    ///
    /// When no font is available the generator keeps going with text turned
    /// off.
    pub fn new(config: ReportConfig) -> Result<Self> {
        let style = charts::fonts::resolve_style(&config.style)?;
        style.validate()?;
        Ok(Self {
            config: ReportConfig { style, ..config },
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load the configured table, prepare folders and render every chart
    pub fn run(&self) -> Result<ReportSummary> {
        let table = SampleTable::load(&self.config.input)?;
        prepare_output_dirs(&self.config)?;
        self.generate(&table)
    }

    /// Render every chart for `table` into the configured folders
    ///
    /// The folders must already exist.
    pub fn generate(&self, table: &SampleTable) -> Result<ReportSummary> {
        let partition = table.partition(&self.config.reference_body)?;
        log::info!(
            "Rendering charts for {} bodies against '{}'",
            partition.planets.len(),
            self.config.reference_body
        );

        let outputs = self.render_planets(&partition)?;
        let combined_chart = self.render_combined(&partition)?;

        let (distance_charts, orbit_charts) = outputs
            .into_iter()
            .map(|o| (o.distance_chart, o.orbit_chart))
            .unzip();

        Ok(ReportSummary {
            generated_at: Utc::now(),
            input: self.config.input.clone(),
            reference_body: self.config.reference_body.clone(),
            planets: partition.planets.iter().map(|p| p.name.clone()).collect(),
            distance_charts,
            orbit_charts,
            combined_chart,
        })
    }

    fn render_planets(&self, partition: &Partition) -> Result<Vec<PlanetOutput>> {
        let indexed: Vec<(usize, &BodySeries)> = partition.planets.iter().enumerate().collect();
        if self.config.parallel {
            indexed
                .par_iter()
                .map(|(i, planet)| self.render_planet(*i, planet, &partition.reference))
                .collect()
        } else {
            indexed
                .iter()
                .map(|(i, planet)| self.render_planet(*i, planet, &partition.reference))
                .collect()
        }
    }

    /// Distance chart and orbit chart of one planet
    fn render_planet(
        &self,
        index: usize,
        planet: &BodySeries,
        reference: &BodySeries,
    ) -> Result<PlanetOutput> {
        let style = &self.config.style;
        let distances = series::distance_series(planet, reference, self.config.alignment)?;
        let sun_xy = series::aligned_reference_xy(planet, reference, self.config.alignment)?;

        let distance_path = self.config.distance_dir.join(distance_file_name(&planet.name));
        let png = charts::render_distance_chart(
            &planet.name,
            &distances.days,
            &distances.distances,
            style,
        )?;
        write_chart(&distance_path, &png)?;

        let orbit_path = self.config.orbit_dir.join(orbit_file_name(&planet.name));
        let png = charts::render_orbit_chart(&planet.name, &planet.xy(), &sun_xy, index, style)?;
        write_chart(&orbit_path, &png)?;

        Ok(PlanetOutput {
            distance_chart: distance_path,
            orbit_chart: orbit_path,
        })
    }

    fn render_combined(&self, partition: &Partition) -> Result<PathBuf> {
        let planets: Vec<(&str, Vec<(f64, f64)>)> = partition
            .planets
            .iter()
            .map(|p| (p.name.as_str(), p.xy()))
            .collect();
        let png = charts::render_combined_orbit_chart(
            &planets,
            &partition.reference.xy(),
            &self.config.style,
        )?;

        let path = self.config.orbit_dir.join(COMBINED_FILE_NAME);
        write_chart(&path, &png)?;
        Ok(path)
    }
}

fn write_chart(path: &Path, png: &[u8]) -> Result<()> {
    fs::write(path, png)?;
    log::info!("Saved {:?} ({} bytes)", path, png.len());
    Ok(())
}

/// Paths a run over `planets` will write, in the order they are produced
pub fn planned_outputs(config: &ReportConfig, planets: &[&str]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = planets
        .iter()
        .map(|p| config.distance_dir.join(distance_file_name(p)))
        .collect();
    paths.extend(planets.iter().map(|p| config.orbit_dir.join(orbit_file_name(p))));
    paths.push(config.orbit_dir.join(COMBINED_FILE_NAME));
    paths
}
