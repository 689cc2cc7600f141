//! Derivative evaluation for the flattened planet state
//!
//! Defines the acceleration terms (central gravity towards the origin and
//! pairwise interaction between bodies) and the pure `derivative` function
//! the integrator calls. Everything here reads the flattened `(x, vx, y, vy)`
//! layout directly.

use super::params::SimulationParameters;
use super::states::{position_at, STRIDE, VX, VY, X, Y};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into the velocity-derivative slots of `dydt`
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// The planet force field: central gravity plus pairwise interaction
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self::new()
            .with(CentralGravity { m: params.gravity, eps: params.eps })
            .with(PairInteraction { c: params.interaction, eps: params.eps })
    }

    /// Fill `dydt` for state `y`
    /// - position slots receive the velocities
    /// - velocity slots receive the sum of all term contributions
    pub fn evaluate(&self, y: &[f64], dydt: &mut [f64]) {
        assert_eq!(y.len(), dydt.len(), "state and derivative length differ");
        assert_eq!(y.len() % STRIDE, 0, "state length is not a multiple of {STRIDE}");

        for (src, dst) in y.chunks_exact(STRIDE).zip(dydt.chunks_exact_mut(STRIDE)) {
            dst[X] = src[VX];
            dst[VX] = 0.0;
            dst[Y] = src[VY];
            dst[VY] = 0.0;
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(y, dydt);
        }
    }
}

/// Trait for acceleration sources operating on a flattened state
/// Implementations add their contribution into the `VX`/`VY` slots of `dydt`
pub trait Acceleration {
    fn acceleration(&self, y: &[f64], dydt: &mut [f64]);
}

/// Attraction of every body towards the origin: a_i = -m * x_i / |x_i|^3
pub struct CentralGravity {
    pub m: f64,
    pub eps: f64,
}

impl Acceleration for CentralGravity {
    fn acceleration(&self, y: &[f64], dydt: &mut [f64]) {
        if self.m == 0.0 {
            return;
        }
        let n = y.len() / STRIDE;
        for i in 0..n {
            let p = position_at(y, i);
            let r3 = p.norm_squared().powf(1.5);
            // body sitting on the attractor: skip instead of dividing by ~0
            if r3 < self.eps {
                continue;
            }
            let a = -self.m / r3 * p;
            dydt[STRIDE * i + VX] += a.x;
            dydt[STRIDE * i + VY] += a.y;
        }
    }
}

/// Pairwise inverse-square interaction between bodies
///
/// For each unordered pair, with `d = x_j - x_i`, body `i` receives
/// `c * d / |d|^3` and body `j` the opposite. Positive `c` pulls bodies
/// together, negative `c` pushes them apart.
pub struct PairInteraction {
    pub c: f64,
    pub eps: f64,
}

impl Acceleration for PairInteraction {
    fn acceleration(&self, y: &[f64], dydt: &mut [f64]) {
        if self.c == 0.0 {
            return;
        }
        let n = y.len() / STRIDE;

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = position_at(y, i);
            for j in (i + 1)..n {
                // displacement from i to j
                let d = position_at(y, j) - xi;
                let r3 = d.norm_squared().powf(1.5);
                if r3 < self.eps {
                    continue;
                }
                let f = self.c / r3 * d;

                dydt[STRIDE * i + VX] += f.x;
                dydt[STRIDE * i + VY] += f.y;
                dydt[STRIDE * j + VX] -= f.x;
                dydt[STRIDE * j + VY] -= f.y;
            }
        }
    }
}

/// Rate of change of the flattened state `y` under `params`.
///
/// Pure: the result depends only on `y` and `params`, and `dydt` is a
/// separate buffer of the same length.
pub fn derivative(y: &[f64], params: &SimulationParameters, dydt: &mut [f64]) {
    AccelSet::from_params(params).evaluate(y, dydt);
}
