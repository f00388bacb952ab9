//! Report configuration types
//!
//! This module defines everything the report generator needs to know: where the
//! table lives, where charts go, how bodies are aligned and how charts look.
//! Nothing here is global; the generator receives a `ReportConfig` value and
//! passes its `ChartStyle` to every render call.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the simulation table
pub const DEFAULT_INPUT: &str = "simulation_output.csv";
/// Default folder for distance charts
pub const DEFAULT_DISTANCE_DIR: &str = "planet_distance_graphs";
/// Default folder for orbit charts
pub const DEFAULT_ORBIT_DIR: &str = "planet_orbits";
/// Default reference body label
pub const DEFAULT_REFERENCE_BODY: &str = "Sun";

/// How planet samples are paired with reference samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Join on the Day value; every day must appear exactly once on both sides
    #[default]
    Day,
    /// Pair samples by row position; both series must have the same length
    Row,
}

/// Configuration for a report run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Simulation table to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Folder receiving `<planet>_distance_to_sun.png`
    #[serde(default = "default_distance_dir")]
    pub distance_dir: PathBuf,

    /// Folder receiving `<planet>_orbit_xy.png` and `all_orbits_xy.png`
    #[serde(default = "default_orbit_dir")]
    pub orbit_dir: PathBuf,

    /// Label of the body distances are measured against
    #[serde(default = "default_reference_body")]
    pub reference_body: String,

    #[serde(default)]
    pub alignment: Alignment,

    /// Render per-planet charts on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub style: ChartStyle,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_distance_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DISTANCE_DIR)
}

fn default_orbit_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ORBIT_DIR)
}

fn default_reference_body() -> String {
    DEFAULT_REFERENCE_BODY.to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            distance_dir: default_distance_dir(),
            orbit_dir: default_orbit_dir(),
            reference_body: default_reference_body(),
            alignment: Alignment::default(),
            parallel: false,
            style: ChartStyle::default(),
        }
    }
}

impl ReportConfig {
    /// Create a report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the input table
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Builder method: set the distance chart folder
    pub fn with_distance_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.distance_dir = dir.into();
        self
    }

    /// Builder method: set the orbit chart folder
    pub fn with_orbit_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.orbit_dir = dir.into();
        self
    }

    /// Builder method: put both chart folders under one root
    pub fn with_output_root(self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.with_distance_dir(root.join(DEFAULT_DISTANCE_DIR))
            .with_orbit_dir(root.join(DEFAULT_ORBIT_DIR))
    }

    /// Builder method: set the reference body label
    pub fn with_reference_body(mut self, name: impl Into<String>) -> Self {
        self.reference_body = name.into();
        self
    }

    /// Builder method: set the alignment mode
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder method: enable parallel rendering
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Builder method: replace the chart style
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }
}

/// Plotting configuration shared by every chart of a run
///
/// Font sizes are in points and scale with `dpi`, so a chart rendered at a
/// lower resolution keeps the same proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Output resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Base text size (points)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Chart title size (points)
    #[serde(default = "default_title_size")]
    pub title_size: f64,

    /// Axis description size (points)
    #[serde(default = "default_label_size")]
    pub label_size: f64,

    /// Tick label size (points)
    #[serde(default = "default_tick_size")]
    pub tick_size: f64,

    /// Draw titles, axis labels, tick labels and legends
    #[serde(default = "default_true")]
    pub draw_text: bool,

    /// TrueType font used for text; system locations are searched when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

fn default_dpi() -> u32 {
    300
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_font_size() -> f64 {
    14.0
}

fn default_title_size() -> f64 {
    16.0
}

fn default_label_size() -> f64 {
    14.0
}

fn default_tick_size() -> f64 {
    12.0
}

fn default_true() -> bool {
    true
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            title_size: default_title_size(),
            label_size: default_label_size(),
            tick_size: default_tick_size(),
            draw_text: true,
            font_path: None,
        }
    }
}

impl ChartStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Builder method: enable or disable text
    pub fn with_text(mut self, enabled: bool) -> Self {
        self.draw_text = enabled;
        self
    }

    /// Builder method: use a specific font file
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Convert a size in points to pixels at this resolution
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Pixel dimensions of a figure given in inches
    pub fn figure_pixels(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (width_in * dpi).round().max(1.0) as u32,
            (height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Check that the style can produce an image
    pub fn validate(&self) -> crate::Result<()> {
        if self.dpi == 0 {
            return Err(crate::ReportError::InvalidConfig(
                "dpi must be greater than zero".into(),
            ));
        }
        let sizes = [self.font_size, self.title_size, self.label_size, self.tick_size];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(crate::ReportError::InvalidConfig(
                "font sizes must be positive".into(),
            ));
        }
        Ok(())
    }
}
