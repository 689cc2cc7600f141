//! Whole-system operators, run on demand between steps

use rand::Rng;
use rand_distr::StandardNormal;

use super::states::{Body, NVec2};

/// Kinetic energy with unit masses: sum of 0.5 * |v|^2
pub fn energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.v.norm_squared()).sum()
}

/// Scale every velocity by `factor`
pub fn freeze(bodies: &mut [Body], factor: f64) {
    for b in bodies.iter_mut() {
        b.v *= factor;
    }
}

/// Add independent N(0, (sqrt(E) * sigma)^2) noise to every velocity component
pub fn shock<R: Rng + ?Sized>(bodies: &mut [Body], sigma: f64, rng: &mut R) {
    let scale = energy(bodies).sqrt() * sigma;
    for b in bodies.iter_mut() {
        let nx: f64 = rng.sample(StandardNormal);
        let ny: f64 = rng.sample(StandardNormal);
        b.v += scale * NVec2::new(nx, ny);
    }
}

/// Mean position and mean velocity, `None` for an empty set
pub fn center_of_mass(bodies: &[Body]) -> Option<(NVec2, NVec2)> {
    if bodies.is_empty() {
        return None;
    }
    let n = bodies.len() as f64;
    let (x, v) = bodies
        .iter()
        .fold((NVec2::zeros(), NVec2::zeros()), |(x, v), b| (x + b.x, v + b.v));
    Some((x / n, v / n))
}

/// Move into the centre-of-mass frame. No-op on an empty set.
pub fn recenter(bodies: &mut [Body]) {
    let Some((x0, v0)) = center_of_mass(bodies) else {
        return;
    };
    for b in bodies.iter_mut() {
        b.x -= x0;
        b.v -= v0;
    }
}
