//! Orbit Report Library
//!
//! Turns a simulation table of body positions into PNG charts: one
//! distance-to-sun curve and one XY orbit per planet, plus a combined orbit
//! chart. A small N-body simulator producing such tables is included.
//!
//! # Architecture
//!
//! - [`table`] loads the CSV table and splits it per body
//! - [`series`] aligns each planet with the reference body and computes distances
//! - [`charts`] describes charts as plain data and renders them to PNG bytes
//! - [`report`] prepares output folders and writes every chart
//! - [`simulation`] integrates point masses and writes the table
//!
//! Rendering is pure: charts come back as bytes and only [`report`] writes
//! files.
//!
//! # Example Usage
//!
//! ```no_run
//! use orbit_report::{prepare_output_dirs, ReportConfig, ReportGenerator, SampleTable};
//! use std::path::Path;
//!
//! let config = ReportConfig::new().with_input("simulation_output.csv");
//! let table = SampleTable::load(Path::new("simulation_output.csv")).unwrap();
//!
//! prepare_output_dirs(&config).unwrap();
//! let summary = ReportGenerator::new(config).unwrap().generate(&table).unwrap();
//!
//! for file in summary.files() {
//!     println!("wrote {}", file.display());
//! }
//! ```

// Public modules
pub mod charts;
pub mod config;
pub mod report;
pub mod series;
pub mod simulation;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use config::{Alignment, ChartStyle, ReportConfig};
pub use report::{planned_outputs, prepare_output_dirs, ReportGenerator, ReportSummary};
pub use series::distance_series;
pub use simulation::{simulate_to_file, CelestialBody, Simulation, SimulationConfig};
pub use table::{Partition, SampleTable};
pub use types::{BodySeries, DistanceSeries, ReportError, Result, Sample, Vector3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty table has no bodies
        let table = SampleTable::default();
        assert!(table.is_empty());
        assert!(table.body_names().is_empty());
        assert!(!VERSION.is_empty());
    }
}
