//! Core state types for the planet simulation.
//!
//! - `Body`: one point mass (position `x`, velocity `v`) using `NVec2`
//! - `BodyHandle`: index + epoch reference handed out by the registry
//! - `FlatState`: all bodies packed as `(x, vx, y, vy)` quadruples, the
//!   layout the integrator works on

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Scalars per body in the flattened state
pub const STRIDE: usize = 4;

// Offsets inside one body's quadruple
pub const X: usize = 0;
pub const VX: usize = 1;
pub const Y: usize = 2;
pub const VY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

impl Body {
    pub fn new(x: NVec2, v: NVec2) -> Self {
        Self { x, v }
    }
}

/// Stable reference to a body in a [`PlanetSystem`](super::registry::PlanetSystem).
///
/// The epoch is bumped by every reset, so handles from before a reset never
/// resolve to a body created after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    pub(crate) index: usize,
    pub(crate) epoch: u64,
}

impl BodyHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Flattened phase state of every body, index-aligned with the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatState {
    data: Vec<f64>,
}

impl FlatState {
    /// Zeroed buffer sized for `n` bodies
    pub fn with_bodies(n: usize) -> Self {
        Self {
            data: vec![0.0; STRIDE * n],
        }
    }

    pub fn from_bodies(bodies: &[Body]) -> Self {
        let mut state = Self::with_bodies(bodies.len());
        state.load(bodies);
        state
    }

    pub fn body_count(&self) -> usize {
        self.data.len() / STRIDE
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copy body states into the buffer.
    /// Panics if the buffer was not rebuilt for the current body count.
    pub fn load(&mut self, bodies: &[Body]) {
        assert_eq!(
            self.body_count(),
            bodies.len(),
            "flattened state holds {} bodies, registry has {}",
            self.body_count(),
            bodies.len()
        );
        for (chunk, b) in self.data.chunks_exact_mut(STRIDE).zip(bodies) {
            chunk[X] = b.x.x;
            chunk[VX] = b.v.x;
            chunk[Y] = b.x.y;
            chunk[VY] = b.v.y;
        }
    }

    /// Copy the buffer back into the bodies
    pub fn store(&self, bodies: &mut [Body]) {
        assert_eq!(self.body_count(), bodies.len());
        for (chunk, b) in self.data.chunks_exact(STRIDE).zip(bodies.iter_mut()) {
            b.x = NVec2::new(chunk[X], chunk[Y]);
            b.v = NVec2::new(chunk[VX], chunk[VY]);
        }
    }
}

/// Position of body `i` inside a flattened slice
#[inline]
pub fn position_at(y: &[f64], i: usize) -> NVec2 {
    NVec2::new(y[STRIDE * i + X], y[STRIDE * i + Y])
}
