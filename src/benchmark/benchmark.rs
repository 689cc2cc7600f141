use std::time::Instant;

use crate::simulation::forces::AccelSet;
use crate::simulation::params::SimulationParameters;
use crate::simulation::registry::PlanetSystem;
use crate::simulation::states::{Body, FlatState, NVec2};

// deterministic positions, no rand needed
fn ring_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            Body::new(
                NVec2::new((i_f * 0.37).sin() * 2.0, (i_f * 0.13).cos() * 2.0),
                NVec2::new((i_f * 0.07).sin() * 0.05, (i_f * 0.11).cos() * 0.05),
            )
        })
        .collect()
}

/// Time a single derivative evaluation for growing body counts
pub fn bench_derivative() {
    let ns = [50, 100, 200, 400, 800, 1600];
    // built once so the timing covers the force loop only
    let forces = AccelSet::from_params(&SimulationParameters::default());

    for n in ns {
        let state = FlatState::from_bodies(&ring_bodies(n));
        let mut out = vec![0.0; state.len()];

        // Warm up
        forces.evaluate(state.as_slice(), &mut out);

        let t0 = Instant::now();
        forces.evaluate(state.as_slice(), &mut out);
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, derivative = {:8.6} s", dt);
    }
}

/// Time whole frames (adaptive sub-steps + boundary) for growing body counts
pub fn bench_step() {
    let ns = [10, 25, 50, 100, 200];
    let frames = 10;
    let dt = 5.0 / 60.0;

    for n in ns {
        let mut system = PlanetSystem::new(SimulationParameters::default(), 42);
        for b in ring_bodies(n) {
            system.add_body(b.x, b.v);
        }

        let t0 = Instant::now();
        let mut failed = None;
        for _ in 0..frames {
            if let Err(e) = system.step(dt) {
                failed = Some(e);
                break;
            }
        }
        let elapsed = t0.elapsed().as_secs_f64();
        let stats = &system.driver().stats;

        match failed {
            None => println!(
                "N = {n:4}, {frames} frames = {:8.6} s, accepted = {}, rejected = {}",
                elapsed, stats.accepted_steps, stats.rejected_steps
            ),
            Some(e) => println!("N = {n:4}, stopped: {e}"),
        }
    }
}
