//! Post-step spatial constraints
//!
//! Applied once per body after every successful integration step, in
//! simulation units. The domain is a rectangle centred on the origin,
//! described by its half extents.

use super::params::BoundaryMode;
use super::states::Body;

/// Rectangle `[-half_width, half_width] x [-half_height, half_height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub half_width: f64,
    pub half_height: f64,
}

impl Default for Domain {
    // 1600x900 px at 200 px per unit
    fn default() -> Self {
        Self {
            half_width: 4.0,
            half_height: 2.25,
        }
    }
}

impl Domain {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width: half_width.abs(),
            half_height: half_height.abs(),
        }
    }
}

/// Apply `mode` to one body
pub fn apply(mode: BoundaryMode, domain: &Domain, body: &mut Body) {
    match mode {
        BoundaryMode::Reflect => reflect(domain, body),
        BoundaryMode::Wrap => wrap(domain, body),
    }
}

/// Negate the velocity component of every axis on which the body is outside
/// the domain. The position is left as integrated, so a body may sit past the
/// edge for a frame before it comes back.
pub fn reflect(domain: &Domain, body: &mut Body) {
    let hw = domain.half_width.abs();
    let hh = domain.half_height.abs();

    if body.x.x < -hw || body.x.x > hw {
        body.v.x = -body.v.x;
    }
    if body.x.y < -hh || body.x.y > hh {
        body.v.y = -body.v.y;
    }
}

/// Toroidal wrap of both coordinates into `[-half, half)`
pub fn wrap(domain: &Domain, body: &mut Body) {
    body.x.x = wrap_coordinate(body.x.x, domain.half_width);
    body.x.y = wrap_coordinate(body.x.y, domain.half_height);
}

/// Map `x` into `[-half, half)` modulo `2 * half`.
///
/// `half` is used by magnitude. A zero or non-finite extent leaves `x`
/// untouched.
pub fn wrap_coordinate(x: f64, half: f64) -> f64 {
    let half = half.abs();
    if half == 0.0 || !half.is_finite() {
        return x;
    }
    let span = 2.0 * half;
    let mut w = (x + half) % span - half;

    // `%` keeps the sign of the dividend, and rounding can land on an edge
    while w < -half {
        w += span;
    }
    while w >= half {
        w -= span;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_values_inside() {
        assert_eq!(wrap_coordinate(0.5, 1.0), 0.5);
        assert_eq!(wrap_coordinate(1.5, 1.0), -0.5);
        assert_eq!(wrap_coordinate(-1.5, 1.0), 0.5);
        assert_eq!(wrap_coordinate(1.0, 1.0), -1.0);
        assert_eq!(wrap_coordinate(-1.0, 1.0), -1.0);
    }

    #[test]
    fn negative_extent_is_taken_by_magnitude() {
        assert_eq!(wrap_coordinate(1.5, -1.0), wrap_coordinate(1.5, 1.0));
    }

    #[test]
    fn degenerate_extent_is_ignored() {
        assert_eq!(wrap_coordinate(3.0, 0.0), 3.0);
        assert_eq!(wrap_coordinate(3.0, f64::INFINITY), 3.0);
    }
}
