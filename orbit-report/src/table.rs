//! Simulation table loading
//!
//! Reads the delimited table written by the simulator and splits it into one
//! series per body. Rows keep their file order; nothing is sorted.

use crate::types::{BodySeries, ReportError, Result, Sample};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// All samples of a simulation run, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

/// Reference series plus every other body, in first-appearance order
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub reference: BodySeries,
    pub planets: Vec<BodySeries>,
}

impl SampleTable {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Load a simulation table from a CSV file
    ///
    /// Columns are matched by header name. A file without data rows is
    /// rejected.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading simulation table: {:?}", path);

        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        if table.is_empty() {
            return Err(ReportError::EmptyTable(path.to_path_buf()));
        }

        log::info!(
            "Loaded {} samples for {} bodies from {:?}",
            table.len(),
            table.body_names().len(),
            path
        );
        Ok(table)
    }

    /// Read a simulation table from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let samples = csv_reader
            .deserialize::<Sample>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct body labels in order of first appearance
    pub fn body_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for sample in &self.samples {
            if !names.contains(&sample.body.as_str()) {
                names.push(&sample.body);
            }
        }
        names
    }

    /// Rows of one body, in file order (empty if the body is absent)
    pub fn series(&self, body: &str) -> BodySeries {
        let samples = self
            .samples
            .iter()
            .filter(|s| s.body == body)
            .cloned()
            .collect();
        BodySeries::new(body, samples)
    }

    /// Split the table into the reference body and the remaining bodies
    pub fn partition(&self, reference_body: &str) -> Result<Partition> {
        let reference = self.series(reference_body);
        if reference.is_empty() {
            return Err(ReportError::MissingReference(reference_body.to_string()));
        }

        let planets: Vec<BodySeries> = self
            .body_names()
            .into_iter()
            .filter(|name| *name != reference_body)
            .map(|name| self.series(name))
            .collect();

        log::debug!(
            "Partitioned table: reference '{}' ({} samples), {} planets",
            reference_body,
            reference.len(),
            planets.len()
        );

        Ok(Partition { reference, planets })
    }
}
