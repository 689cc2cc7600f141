//! Numerical and physical parameters for the simulation
//!
//! `SimulationParameters` holds the runtime settings read by every step:
//! - central gravity and pairwise interaction strengths (`gravity`, `interaction`),
//! - softening floor `eps`,
//! - boundary mode and domain half extents,
//! - error tolerances for the adaptive integrator
//!
//! The strengths can be driven from slider-style integer levels, which are
//! clamped to `LEVEL_RANGE` and scaled before use.

use serde::Deserialize;

use super::boundary::Domain;

/// Softening floor applied to |r|^3
pub const SOFTENING: f64 = 1e-6;

/// Accepted range for slider levels
pub const LEVEL_MIN: i32 = -450;
pub const LEVEL_MAX: i32 = 450;

pub const DEFAULT_GRAVITY_LEVEL: i32 = 100;
pub const DEFAULT_INTERACTION_LEVEL: i32 = 10;

// level -> strength scale factors
const GRAVITY_SCALE: f64 = 0.1 / 100.0;
const INTERACTION_SCALE: f64 = 0.01 / 100.0;

/// What happens to a body leaving the domain
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    #[serde(rename = "reflect")] // negate the velocity component of the crossed axis
    Reflect,

    #[default]
    #[serde(rename = "wrap")] // toroidal wrap-around
    Wrap,
}

/// Absolute and relative error tolerances for the adaptive stepper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub atol: f64,
    pub rtol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { atol: 1e-5, rtol: 1e-5 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub gravity: f64, // central attractor strength M
    pub interaction: f64, // pairwise coefficient C
    pub eps: f64, // softening floor on |r|^3
    pub boundary: BoundaryMode,
    pub domain: Domain, // half extents in simulation units
    pub tolerances: Tolerances,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravity: gravity_from_level(DEFAULT_GRAVITY_LEVEL),
            interaction: interaction_from_level(DEFAULT_INTERACTION_LEVEL),
            eps: SOFTENING,
            boundary: BoundaryMode::default(),
            domain: Domain::default(),
            tolerances: Tolerances::default(),
        }
    }
}

impl SimulationParameters {
    /// Set `gravity` from a slider level, clamped to the accepted range
    pub fn set_gravity_level(&mut self, level: i32) {
        self.gravity = gravity_from_level(level);
    }

    /// Set `interaction` from a slider level, clamped to the accepted range
    pub fn set_interaction_level(&mut self, level: i32) {
        self.interaction = interaction_from_level(level);
    }
}

pub fn gravity_from_level(level: i32) -> f64 {
    level.clamp(LEVEL_MIN, LEVEL_MAX) as f64 * GRAVITY_SCALE
}

pub fn interaction_from_level(level: i32) -> f64 {
    level.clamp(LEVEL_MIN, LEVEL_MAX) as f64 * INTERACTION_SCALE
}
