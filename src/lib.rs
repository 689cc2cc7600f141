pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyHandle, FlatState, NVec2};
pub use simulation::params::{BoundaryMode, SimulationParameters, Tolerances};
pub use simulation::forces::{derivative, AccelSet, Acceleration, CentralGravity, PairInteraction};
pub use simulation::integrator::{Driver, IntegrationFailure, OdeSystem, PlanetField};
pub use simulation::boundary::{Domain, wrap_coordinate};
pub use simulation::registry::PlanetSystem;
pub use simulation::trail::Trail;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    ActionConfig, BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig, ViewConfig,
};

pub use visualization::view::ViewTransform;
pub use visualization::headless::{run_headless, RunSummary};

pub use benchmark::benchmark::{bench_derivative, bench_step};
