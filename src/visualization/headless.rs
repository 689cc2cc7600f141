//! Frame loop without a window
//!
//! Stands in for the interactive front-end: every frame fires the actions
//! scheduled for it, advances the system by one frame interval and, every
//! `report_every` frames, logs the kinetic energy. The first integration
//! failure halts the run.

use tracing::info;

use crate::configuration::config::ActionConfig;
use crate::simulation::integrator::IntegrationFailure;
use crate::simulation::registry::PlanetSystem;
use crate::simulation::scenario::Scenario;

/// What a completed run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub bodies: usize,
    pub t: f64,
    pub energy: f64,
}

pub fn run_headless(scenario: &mut Scenario) -> Result<RunSummary, IntegrationFailure> {
    let Scenario { engine, system, actions, .. } = scenario;
    info!(bodies = system.len(), frames = engine.frames, dt = engine.dt, "run_headless: starting");

    let mut next_action = 0;
    for frame in 0..engine.frames {
        while let Some(action) = actions.get(next_action).filter(|a| a.frame <= frame) {
            fire(system, action);
            next_action += 1;
        }

        system.step(engine.dt)?;

        if engine.report_every > 0 && (frame + 1) % engine.report_every == 0 {
            info!(frame = frame + 1, t = system.t, energy = system.energy(), "energy");
        }
    }

    let summary = RunSummary {
        frames: engine.frames,
        bodies: system.len(),
        t: system.t,
        energy: system.energy(),
    };
    info!(?summary, "run_headless: done");
    Ok(summary)
}

fn fire(system: &mut PlanetSystem, action: &ActionConfig) {
    if action.reset {
        system.remove_all();
    }
    for _ in 0..action.spawn {
        system.spawn_random();
    }
    if let Some(factor) = action.freeze {
        system.freeze(factor);
    }
    if let Some(sigma) = action.shock {
        system.shock(sigma);
    }
    if action.recenter {
        system.recenter();
    }
}
