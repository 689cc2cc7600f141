//! Body registry and per-frame stepping
//!
//! `PlanetSystem` owns the ordered bodies, their trails, the flattened state
//! buffer mirroring them and the integration driver bound to that buffer's
//! dimension. Every membership change rebuilds buffer and driver together,
//! so a step never sees a binding for the wrong body count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use super::boundary;
use super::integrator::{Driver, IntegrationFailure, PlanetField};
use super::operators;
use super::params::SimulationParameters;
use super::states::{Body, BodyHandle, FlatState, NVec2};
use super::trail::Trail;

pub const DEFAULT_TRAIL_CAPACITY: usize = 50;

// Range of `spawn_random`
const SPAWN_POSITION: f64 = 2.0;
const SPAWN_VELOCITY: f64 = 0.05;

/// The simulation core.
///
/// Not meant for concurrent use: all calls on one instance must come from
/// the simulation thread, and mutation never interleaves with a step.
#[derive(Debug)]
pub struct PlanetSystem {
    pub params: SimulationParameters, // read at the start of every step
    bodies: Vec<Body>,
    trails: Vec<Trail>,
    trail_capacity: usize,
    state: FlatState,
    driver: Driver,
    epoch: u64, // bumped by `remove_all`, invalidates handles
    rng: StdRng, // shared source for shock and random spawns
    pub t: f64, // total simulated time
}

impl PlanetSystem {
    pub fn new(params: SimulationParameters, seed: u64) -> Self {
        let driver = Driver::new(0, params.tolerances);
        Self {
            params,
            bodies: Vec::new(),
            trails: Vec::new(),
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            state: FlatState::default(),
            driver,
            epoch: 0,
            rng: StdRng::seed_from_u64(seed),
            t: 0.0,
        }
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self.trails = vec![Trail::new(capacity); self.bodies.len()];
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Read-only view in registry order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.bodies.get(handle.index)
    }

    pub fn trail(&self, handle: BodyHandle) -> Option<&Trail> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.trails.get(handle.index)
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn add_body(&mut self, x: NVec2, v: NVec2) -> BodyHandle {
        let index = self.bodies.len();
        self.bodies.push(Body::new(x, v));
        self.trails.push(Trail::new(self.trail_capacity));
        self.rebind();
        info!(index, x = ?x, v = ?v, "body added");
        BodyHandle { index, epoch: self.epoch }
    }

    /// Spawn a body at a random position in [-2, 2]^2 with a small random velocity
    pub fn spawn_random(&mut self) -> BodyHandle {
        let x = NVec2::new(
            self.rng.gen_range(-SPAWN_POSITION..=SPAWN_POSITION),
            self.rng.gen_range(-SPAWN_POSITION..=SPAWN_POSITION),
        );
        let v = NVec2::new(
            self.rng.gen_range(-SPAWN_VELOCITY..=SPAWN_VELOCITY),
            self.rng.gen_range(-SPAWN_VELOCITY..=SPAWN_VELOCITY),
        );
        self.add_body(x, v)
    }

    /// Drop every body. Handles issued so far stop resolving.
    pub fn remove_all(&mut self) {
        self.bodies.clear();
        self.trails.clear();
        self.epoch += 1;
        self.t = 0.0;
        self.rebind();
        info!(epoch = self.epoch, "registry reset");
    }

    // Rebuild the flattened buffer and driver for the current body count
    fn rebind(&mut self) {
        self.state = FlatState::with_bodies(self.bodies.len());
        self.driver = Driver::new(self.state.len(), self.params.tolerances);
        debug!(bodies = self.bodies.len(), "driver rebound");
    }

    /// Advance all bodies by `dt`, then apply the boundary policy.
    ///
    /// On failure the bodies keep their pre-step state and the caller is
    /// expected to stop the simulation.
    pub fn step(&mut self, dt: f64) -> Result<(), IntegrationFailure> {
        if self.bodies.is_empty() {
            return Ok(());
        }
        // tolerances changed since the last binding
        if self.driver.tolerances() != self.params.tolerances {
            self.rebind();
        }

        self.state.load(&self.bodies);
        let field = PlanetField::new(&self.params, self.bodies.len());
        if let Err(e) = self.driver.step(&field, self.state.as_mut_slice(), dt) {
            error!(t = self.t + e.time(), error = %e, "simulation error");
            return Err(e);
        }
        self.state.store(&mut self.bodies);
        self.t += dt;

        // domain snapshot, fixed for the whole frame
        let mode = self.params.boundary;
        let domain = self.params.domain;
        for (b, trail) in self.bodies.iter_mut().zip(self.trails.iter_mut()) {
            boundary::apply(mode, &domain, b);
            trail.push(b.x);
        }
        Ok(())
    }

    pub fn energy(&self) -> f64 {
        operators::energy(&self.bodies)
    }

    pub fn freeze(&mut self, factor: f64) {
        operators::freeze(&mut self.bodies, factor);
        info!(factor, energy = self.energy(), "freeze");
    }

    pub fn shock(&mut self, sigma: f64) {
        operators::shock(&mut self.bodies, sigma, &mut self.rng);
        info!(sigma, energy = self.energy(), "shock");
    }

    pub fn recenter(&mut self) {
        operators::recenter(&mut self.bodies);
        info!(energy = self.energy(), "recenter");
    }
}
