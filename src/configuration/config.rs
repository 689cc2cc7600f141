//! Configuration types for loading planet scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – frame length, run length, report interval
//! - [`ParametersConfig`] – force strengths, tolerances, boundary mode, seed
//! - [`ViewConfig`]       – screen size and scale of the display collaborator
//! - [`BodyConfig`]       – initial state for each explicit body
//! - [`ActionConfig`]     – operators fired at given frames
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section is optional and falls back to the interactive
//! program's defaults.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   dt: 0.0833              # simulation time per frame
//!   frames: 1200
//!   report_every: 60        # frames between energy reports
//!
//! parameters:
//!   gravity: 100            # slider level, clamped to [-450, 450]
//!   interaction: 10         # slider level, clamped to [-450, 450]
//!   atol: 1.0e-5
//!   rtol: 1.0e-5
//!   boundary: "wrap"        # or "reflect"
//!   seed: 42
//!   trail: 50               # trail capacity per body
//!
//! view:
//!   width: 1600
//!   height: 900
//!   scale: 200.0            # pixels per simulation unit
//!
//! random_bodies: 5
//!
//! bodies:
//!   - x: [ 1.0, 0.0 ]
//!     v: [ 0.0, 0.316 ]
//!
//! actions:
//!   - frame: 300
//!     shock: 0.1
//!   - frame: 600
//!     freeze: 0.9
//!   - frame: 601
//!     recenter: true
//! ```

use serde::Deserialize;

use crate::simulation::params::{
    BoundaryMode, DEFAULT_GRAVITY_LEVEL, DEFAULT_INTERACTION_LEVEL, SOFTENING,
};
use crate::simulation::engine::DEFAULT_FRAME_DT;
use crate::simulation::registry::DEFAULT_TRAIL_CAPACITY;

/// Frame-loop configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub dt: f64,           // simulation time advanced per frame
    pub frames: u64,       // number of frames in a headless run
    pub report_every: u64, // energy report interval in frames, 0 disables
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_FRAME_DT,
            frames: 600,
            report_every: 60,
        }
    }
}

/// Physical and numerical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravity: i32,           // central gravity slider level
    pub interaction: i32,       // pairwise interaction slider level
    pub atol: f64,              // absolute error tolerance
    pub rtol: f64,              // relative error tolerance
    pub eps: f64,               // softening floor on |r|^3
    pub boundary: BoundaryMode, // reflect or wrap at the domain edge
    pub seed: u64,              // seed of the shared random source
    pub trail: usize,           // trail capacity per body
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY_LEVEL,
            interaction: DEFAULT_INTERACTION_LEVEL,
            atol: 1e-5,
            rtol: 1e-5,
            eps: SOFTENING,
            boundary: BoundaryMode::Wrap,
            seed: 0,
            trail: DEFAULT_TRAIL_CAPACITY,
        }
    }
}

/// Display geometry, used to derive the simulation domain
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f64,  // screen width in pixels
    pub height: f64, // screen height in pixels
    pub scale: f64,  // pixels per simulation unit
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
            scale: 200.0,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position in simulation units
    pub v: [f64; 2], // initial velocity in simulation units per time unit
}

/// An operator fired before the step of `frame`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ActionConfig {
    pub frame: u64,
    pub freeze: Option<f64>,  // velocity scale factor
    pub shock: Option<f64>,   // sigma
    pub recenter: bool,
    pub spawn: usize,         // random bodies to add
    pub reset: bool,          // clear the registry first
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub view: ViewConfig,
    pub bodies: Vec<BodyConfig>,
    pub random_bodies: usize,
    pub actions: Vec<ActionConfig>,
}
