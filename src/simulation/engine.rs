//! Frame-loop settings
//!
//! How much simulation time one frame advances, how many frames a headless
//! run lasts and how often the energy diagnostic is reported

/// Simulation time per frame: five units per second at 60 fps
pub const DEFAULT_FRAME_DT: f64 = 5.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub dt: f64, // simulation time per frame
    pub frames: u64, // frames to run
    pub report_every: u64, // frames between energy reports, 0 = never
}

