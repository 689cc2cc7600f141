//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - frame-loop settings (`Engine`)
//! - the display transform the domain is derived from (`ViewTransform`)
//! - the populated `PlanetSystem` at t = 0
//! - the scheduled operator actions, sorted by frame

use crate::configuration::config::{ActionConfig, BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::{
    gravity_from_level, interaction_from_level, SimulationParameters, Tolerances,
};
use crate::simulation::registry::PlanetSystem;
use crate::simulation::states::NVec2;
use crate::visualization::view::ViewTransform;

/// Runtime bundle for one run
#[derive(Debug)]
pub struct Scenario {
    pub engine: Engine,
    pub view: ViewTransform,
    pub system: PlanetSystem,
    pub actions: Vec<ActionConfig>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // View first: the domain follows the screen geometry
        let view = ViewTransform::new(cfg.view.width, cfg.view.height, cfg.view.scale);

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let params = SimulationParameters {
            gravity: gravity_from_level(p_cfg.gravity),
            interaction: interaction_from_level(p_cfg.interaction),
            eps: p_cfg.eps,
            boundary: p_cfg.boundary,
            domain: view.domain(),
            tolerances: Tolerances {
                atol: p_cfg.atol,
                rtol: p_cfg.rtol,
            },
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            dt: cfg.engine.dt,
            frames: cfg.engine.frames,
            report_every: cfg.engine.report_every,
        };

        // Bodies: explicit ones first, then the random spawns
        let mut system = PlanetSystem::new(params, p_cfg.seed).with_trail_capacity(p_cfg.trail);
        for bc in &cfg.bodies {
            let BodyConfig { x, v } = bc;
            system.add_body(NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]));
        }
        for _ in 0..cfg.random_bodies {
            system.spawn_random();
        }

        let mut actions = cfg.actions;
        actions.sort_by_key(|a| a.frame);

        Self {
            engine,
            view,
            system,
            actions,
        }
    }
}
