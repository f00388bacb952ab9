//! Core types for the orbit report library
//!
//! This module defines the rows read from a simulation table, the per-body
//! series built from them, and the error type shared by every stage of the
//! report pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::path::PathBuf;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// A point or displacement in 3D space (meters, m/s or m/s² depending on use)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction; the zero vector is returned unchanged
    pub fn normalize(&self) -> Vector3 {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }
        *self * (1.0 / mag)
    }

    pub fn distance_to(&self, other: &Vector3) -> f64 {
        (*self - *other).magnitude()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, scalar: f64) -> Vector3 {
        Vector3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One row of the simulation table
///
/// Columns are matched by header name, so tables carrying extra columns
/// (velocities, accelerations) load without changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Body label, e.g. "Sun" or "Earth"
    #[serde(rename = "Body")]
    pub body: String,
    /// Time index of the sample
    #[serde(rename = "Day")]
    pub day: f64,
    #[serde(rename = "PosX")]
    pub pos_x: f64,
    #[serde(rename = "PosY")]
    pub pos_y: f64,
    #[serde(rename = "PosZ")]
    pub pos_z: f64,
}

impl Sample {
    pub fn new(body: impl Into<String>, day: f64, position: Vector3) -> Self {
        Self {
            body: body.into(),
            day,
            pos_x: position.x,
            pos_y: position.y,
            pos_z: position.z,
        }
    }

    pub fn position(&self) -> Vector3 {
        Vector3::new(self.pos_x, self.pos_y, self.pos_z)
    }

    /// Projection onto the XY plane
    pub fn xy(&self) -> (f64, f64) {
        (self.pos_x, self.pos_y)
    }
}

/// All samples of a single body, in table order
#[derive(Debug, Clone, PartialEq)]
pub struct BodySeries {
    pub name: String,
    pub samples: Vec<Sample>,
}

impl BodySeries {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn days(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.day).collect()
    }

    /// XY trajectory of the body
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(Sample::xy).collect()
    }
}

/// Distance from one body to the reference body, one value per aligned day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceSeries {
    pub body: String,
    pub days: Vec<f64>,
    pub distances: Vec<f64>,
}

impl DistanceSeries {
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Errors that can occur while loading, aligning or rendering
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse simulation table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Simulation table contains no samples: {0:?}")]
    EmptyTable(PathBuf),

    #[error("Reference body '{0}' has no samples")]
    MissingReference(String),

    #[error("Body '{body}' has more than one sample for day {day}")]
    DuplicateDay { body: String, day: f64 },

    #[error("Day {day} of body '{body}' has no matching sample in '{other}'")]
    MissingDay { body: String, other: String, day: f64 },

    #[error("Body '{body}' has {actual} samples but reference '{reference}' has {expected}")]
    LengthMismatch {
        body: String,
        reference: String,
        expected: usize,
        actual: usize,
    },

    #[error("Body '{body}' has a non-finite day value")]
    InvalidDay { body: String },

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
