//! N-body simulator producing the table the report reads
//!
//! Point masses under Newtonian gravity, integrated with semi-implicit Euler
//! (velocity first, then position). Every step writes one row per body.

use crate::types::{ReportError, Result, Vector3};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67430e-11;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A point mass taking part in the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Mass in kilograms
    pub mass: f64,
    /// Position in meters
    pub position: Vector3,
    /// Velocity in m/s
    pub velocity: Vector3,
    /// Acceleration in m/s², recomputed every step
    #[serde(default)]
    pub acceleration: Vector3,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, mass: f64, position: Vector3, velocity: Vector3) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            acceleration: Vector3::ZERO,
        }
    }

    /// Acceleration this body feels from `other`; zero when they coincide
    pub fn acceleration_from(&self, other: &CelestialBody) -> Vector3 {
        let r = other.position - self.position;
        let distance = r.magnitude();
        if distance == 0.0 {
            return Vector3::ZERO;
        }
        r.normalize() * (G * other.mass / (distance * distance))
    }
}

/// The Sun and the eight planets, starting on the +X axis with circular-orbit speeds
pub fn solar_system() -> Vec<CelestialBody> {
    let planet = |name: &str, mass: f64, x: f64, vy: f64| {
        CelestialBody::new(name, mass, Vector3::new(x, 0.0, 0.0), Vector3::new(0.0, vy, 0.0))
    };
    vec![
        planet("Sun", 1.989e30, 0.0, 0.0),
        planet("Mercury", 3.285e23, 5.79e10, 47_870.0),
        planet("Venus", 4.867e24, 1.082e11, 35_020.0),
        planet("Earth", 5.972e24, 1.496e11, 29_780.0),
        planet("Mars", 6.417e23, 2.279e11, 24_070.0),
        planet("Jupiter", 1.898e27, 7.785e11, 13_070.0),
        planet("Saturn", 5.683e26, 1.433e12, 9_680.0),
        planet("Uranus", 8.681e25, 2.877e12, 6_800.0),
        planet("Neptune", 1.024e26, 4.503e12, 5_430.0),
    ]
}

/// Duration and resolution of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day: u32,
    /// Bodies to simulate; the solar system when empty
    #[serde(default)]
    pub bodies: Vec<CelestialBody>,
}

fn default_days() -> u32 {
    365
}

fn default_steps_per_day() -> u32 {
    4
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            steps_per_day: default_steps_per_day(),
            bodies: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Time step in seconds
    pub fn dt(&self) -> f64 {
        SECONDS_PER_DAY / self.steps_per_day as f64
    }

    pub fn total_steps(&self) -> u64 {
        self.days as u64 * self.steps_per_day as u64
    }

    /// Check that a run would produce at least one step
    pub fn validate(&self) -> Result<()> {
        if self.steps_per_day == 0 {
            return Err(ReportError::InvalidConfig(
                "steps_per_day must be greater than zero".into(),
            ));
        }
        if self.days == 0 {
            return Err(ReportError::InvalidConfig(
                "days must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    fn initial_bodies(&self) -> Vec<CelestialBody> {
        if self.bodies.is_empty() {
            solar_system()
        } else {
            self.bodies.clone()
        }
    }
}

/// One output row: state of one body after a step
#[derive(Debug, Clone, PartialEq, Serialize)]
struct StateRecord<'a> {
    #[serde(rename = "Day")]
    day: f64,
    #[serde(rename = "Body")]
    body: &'a str,
    #[serde(rename = "PosX")]
    pos_x: f64,
    #[serde(rename = "PosY")]
    pos_y: f64,
    #[serde(rename = "PosZ")]
    pos_z: f64,
    #[serde(rename = "VelX")]
    vel_x: f64,
    #[serde(rename = "VelY")]
    vel_y: f64,
    #[serde(rename = "VelZ")]
    vel_z: f64,
    #[serde(rename = "AccX")]
    acc_x: f64,
    #[serde(rename = "AccY")]
    acc_y: f64,
    #[serde(rename = "AccZ")]
    acc_z: f64,
}

impl<'a> StateRecord<'a> {
    fn new(day: f64, body: &'a CelestialBody) -> Self {
        Self {
            day,
            body: &body.name,
            pos_x: body.position.x,
            pos_y: body.position.y,
            pos_z: body.position.z,
            vel_x: body.velocity.x,
            vel_y: body.velocity.y,
            vel_z: body.velocity.z,
            acc_x: body.acceleration.x,
            acc_y: body.acceleration.y,
            acc_z: body.acceleration.z,
        }
    }
}

/// A running system of bodies
#[derive(Debug, Clone)]
pub struct Simulation {
    pub bodies: Vec<CelestialBody>,
    /// Step length in seconds
    pub dt: f64,
    steps_taken: u64,
}

impl Simulation {
    pub fn new(bodies: Vec<CelestialBody>, dt: f64) -> Self {
        Self {
            bodies,
            dt,
            steps_taken: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.initial_bodies(), config.dt())
    }

    /// Simulated time in days after the steps taken so far
    pub fn current_day(&self) -> f64 {
        self.steps_taken as f64 * self.dt / SECONDS_PER_DAY
    }

    /// Advance every body by one time step
    pub fn step(&mut self) {
        let accelerations: Vec<Vector3> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                self.bodies
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(Vector3::ZERO, |acc, (_, other)| acc + body.acceleration_from(other))
            })
            .collect();

        for (body, acceleration) in self.bodies.iter_mut().zip(accelerations) {
            body.acceleration = acceleration;
            body.velocity = body.velocity + acceleration * self.dt;
            body.position = body.position + body.velocity * self.dt;
        }
        self.steps_taken += 1;
    }

    /// Run `steps` steps, writing the state of every body after each one
    pub fn run<W: Write>(&mut self, steps: u64, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for _ in 0..steps {
            self.step();
            let day = self.current_day();
            for body in &self.bodies {
                csv_writer.serialize(StateRecord::new(day, body))?;
            }
            log::trace!("Simulated day {:.2}", day);
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Simulate according to `config` and write the table to `path`
pub fn simulate_to_file(config: &SimulationConfig, path: &Path) -> Result<()> {
    config.validate()?;
    let mut simulation = Simulation::from_config(config);
    log::info!(
        "Simulating {} bodies for {} days ({} steps of {} s) into {:?}",
        simulation.bodies.len(),
        config.days,
        config.total_steps(),
        simulation.dt,
        path
    );
    for body in &simulation.bodies {
        log::debug!(
            "{}: position {} m, velocity {} m/s",
            body.name,
            body.position,
            body.velocity
        );
    }
    let file = File::create(path)?;
    simulation.run(config.total_steps(), std::io::BufWriter::new(file))?;
    Ok(())
}
