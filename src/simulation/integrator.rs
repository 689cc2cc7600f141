//! Adaptive time integration of the flattened planet state
//!
//! `Driver` advances any [`OdeSystem`] over a fixed outer interval using an
//! embedded Runge-Kutta-Fehlberg 4(5) pair. The 4th order solution is
//! propagated; the difference to the 5th order one is the error estimate,
//! scaled per component by `atol + rtol * |y|`. Sub-steps are chosen by an
//! I-controller and are invisible to callers except through
//! [`IntegrationFailure`].
//!
//! A driver is bound to one state dimension. Stepping a buffer of any other
//! length is a contract violation and panics.

use thiserror::Error;
use tracing::{debug, error};

use super::forces::AccelSet;
use super::params::{SimulationParameters, Tolerances};
use super::states::STRIDE;

const STAGES: usize = 6;

// Fehlberg tableau
const C: [f64; STAGES] = [0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0];

const A: [[f64; STAGES - 1]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 4.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 32.0, 9.0 / 32.0, 0.0, 0.0, 0.0],
    [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0, 0.0, 0.0],
    [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0, 0.0],
    [-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
];

// 4th order weights (propagated)
const B4: [f64; STAGES] = [25.0 / 216.0, 0.0, 1408.0 / 2565.0, 2197.0 / 4104.0, -1.0 / 5.0, 0.0];

// B5 - B4
const B_ERR: [f64; STAGES] = [
    1.0 / 360.0,
    0.0,
    -128.0 / 4275.0,
    -2197.0 / 75240.0,
    1.0 / 50.0,
    2.0 / 55.0,
];

/// System of ordinary differential equations dy/dt = f(t, y) with a runtime dimension
pub trait OdeSystem {
    fn dimension(&self) -> usize;

    /// Write dy/dt for `y` into `dydt` (same length, never aliased)
    fn rhs(&self, t: f64, y: &[f64], dydt: &mut [f64]);
}

/// The planet force field for a fixed number of bodies
pub struct PlanetField {
    forces: AccelSet,
    dimension: usize,
}

impl PlanetField {
    pub fn new(params: &SimulationParameters, bodies: usize) -> Self {
        Self {
            forces: AccelSet::from_params(params),
            dimension: STRIDE * bodies,
        }
    }
}

impl OdeSystem for PlanetField {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        self.forces.evaluate(y, dydt);
    }
}

/// Reasons the driver gave up on an interval. `t` is the time reached,
/// measured from the start of the interval.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationFailure {
    #[error("step size {h:e} fell below the minimum at t = {t:.3}")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("gave up after {steps} sub-steps at t = {t:.3}")]
    StepBudgetExhausted { t: f64, steps: u64 },

    #[error("state became non-finite at t = {t:.3}")]
    NonFiniteState { t: f64 },

    #[error("invalid frame interval {dt}")]
    InvalidInterval { dt: f64 },
}

impl IntegrationFailure {
    /// Simulation time reached before the failure
    pub fn time(&self) -> f64 {
        match *self {
            IntegrationFailure::StepSizeUnderflow { t, .. } => t,
            IntegrationFailure::StepBudgetExhausted { t, .. } => t,
            IntegrationFailure::NonFiniteState { t } => t,
            IntegrationFailure::InvalidInterval { .. } => 0.0,
        }
    }
}

/// Step-size controller
///
/// h_new = safety * h * error^(-1/5)
#[derive(Debug, Clone)]
pub struct StepController {
    pub safety: f64,
    pub max_factor: f64, // growth cap per step
    pub min_factor: f64, // shrink cap per step
}

impl Default for StepController {
    fn default() -> Self {
        Self {
            safety: 0.9,
            max_factor: 5.0,
            min_factor: 0.2,
        }
    }
}

impl StepController {
    pub fn factor(&self, error: f64) -> f64 {
        if error == 0.0 {
            return self.max_factor;
        }
        if !error.is_finite() {
            return self.min_factor;
        }
        (self.safety * error.powf(-0.2)).clamp(self.min_factor, self.max_factor)
    }
}

/// Counters for diagnostics, reset on every rebinding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub fn_evals: u64,
    pub accepted_steps: u64,
    pub rejected_steps: u64,
}

/// Adaptive RKF45 driver bound to one state dimension
#[derive(Debug, Clone)]
pub struct Driver {
    dimension: usize,
    tol: Tolerances,
    controller: StepController,
    pub h_min: f64,
    pub max_steps: u64, // per call to `step`
    h_hint: Option<f64>, // last good step size, carried between calls
    k: [Vec<f64>; STAGES],
    y_tmp: Vec<f64>,
    y_new: Vec<f64>,
    pub stats: Stats,
}

impl Driver {
    pub fn new(dimension: usize, tol: Tolerances) -> Self {
        debug!(dimension, atol = tol.atol, rtol = tol.rtol, "binding integration driver");
        Self {
            dimension,
            tol,
            controller: StepController::default(),
            h_min: 1e-12,
            max_steps: 1_000_000,
            h_hint: None,
            k: std::array::from_fn(|_| vec![0.0; dimension]),
            y_tmp: vec![0.0; dimension],
            y_new: vec![0.0; dimension],
            stats: Stats::default(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tol
    }

    /// Advance `y` in place by exactly `dt` of simulation time
    pub fn step<S: OdeSystem>(
        &mut self,
        sys: &S,
        y: &mut [f64],
        dt: f64,
    ) -> Result<(), IntegrationFailure> {
        assert_eq!(
            y.len(),
            self.dimension,
            "stale driver binding: bound to dimension {}, state has {}",
            self.dimension,
            y.len()
        );
        assert_eq!(sys.dimension(), self.dimension, "ODE system does not match driver dimension");

        if !dt.is_finite() || dt < 0.0 {
            return Err(IntegrationFailure::InvalidInterval { dt });
        }
        if dt == 0.0 || self.dimension == 0 {
            return Ok(());
        }
        if !y.iter().all(|v| v.is_finite()) {
            return Err(IntegrationFailure::NonFiniteState { t: 0.0 });
        }

        let mut t = 0.0;
        let mut h = self.h_hint.map_or(dt, |h| h.min(dt));
        let mut steps = 0u64;

        while t < dt {
            let remaining = dt - t;
            let last = h >= remaining;
            let h_try = if last { remaining } else { h };

            let error = self.attempt(sys, t, y, h_try);
            let factor = self.controller.factor(error);

            // NaN error compares false and counts as a rejection
            if error <= 1.0 {
                if !self.y_new.iter().all(|v| v.is_finite()) {
                    error!(t, "integration produced a non-finite state");
                    return Err(IntegrationFailure::NonFiniteState { t });
                }
                y.copy_from_slice(&self.y_new);
                self.stats.accepted_steps += 1;
                if last {
                    t = dt;
                    // the clipped final fragment says little about the next frame
                    h = h.max(h_try * factor);
                } else {
                    t += h_try;
                    h = h_try * factor;
                }
            } else {
                self.stats.rejected_steps += 1;
                h = h_try * factor;
                if h < self.h_min {
                    error!(t, h, "step size underflow");
                    return Err(IntegrationFailure::StepSizeUnderflow { t, h });
                }
            }

            steps += 1;
            if steps >= self.max_steps && t < dt {
                error!(t, steps, "sub-step budget exhausted");
                return Err(IntegrationFailure::StepBudgetExhausted { t, steps });
            }
        }

        self.h_hint = Some(h);
        Ok(())
    }

    /// One RKF45 attempt of size `h` from `(t, y)`.
    /// Leaves the candidate in `y_new` and returns the normalized error (accept when <= 1).
    #[allow(clippy::needless_range_loop)]
    fn attempt<S: OdeSystem>(&mut self, sys: &S, t: f64, y: &[f64], h: f64) -> f64 {
        let n = self.dimension;

        sys.rhs(t, y, &mut self.k[0]);
        for s in 1..STAGES {
            for i in 0..n {
                let mut sum = 0.0;
                for j in 0..s {
                    sum += A[s][j] * self.k[j][i];
                }
                self.y_tmp[i] = y[i] + h * sum;
            }
            sys.rhs(t + C[s] * h, &self.y_tmp, &mut self.k[s]);
        }
        self.stats.fn_evals += STAGES as u64;

        let mut max_err: f64 = 0.0;
        for i in 0..n {
            let mut sum = 0.0;
            let mut err = 0.0;
            for s in 0..STAGES {
                sum += B4[s] * self.k[s][i];
                err += B_ERR[s] * self.k[s][i];
            }
            self.y_new[i] = y[i] + h * sum;

            let scale = self.tol.atol + self.tol.rtol * self.y_new[i].abs();
            let scaled = (h * err).abs() / scale;
            if scaled.is_nan() {
                return f64::NAN;
            }
            max_err = max_err.max(scaled);
        }
        max_err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// y'' = -y, state [y, y']
    struct Oscillator;

    impl OdeSystem for Oscillator {
        fn dimension(&self) -> usize {
            2
        }

        fn rhs(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
            dydt[0] = y[1];
            dydt[1] = -y[0];
        }
    }

    #[test]
    fn oscillator_returns_after_one_period() {
        let mut driver = Driver::new(2, Tolerances { atol: 1e-9, rtol: 1e-9 });
        let mut y = [1.0, 0.0];
        let frames = 100;
        let dt = 2.0 * std::f64::consts::PI / frames as f64;
        for _ in 0..frames {
            driver.step(&Oscillator, &mut y, dt).unwrap();
        }
        assert!((y[0] - 1.0).abs() < 1e-6, "y = {}", y[0]);
        assert!(y[1].abs() < 1e-6, "y' = {}", y[1]);
        assert!(driver.stats.accepted_steps >= frames);
    }

    #[test]
    fn zero_interval_leaves_state_alone() {
        let mut driver = Driver::new(2, Tolerances::default());
        let mut y = [0.3, -0.2];
        driver.step(&Oscillator, &mut y, 0.0).unwrap();
        assert_eq!(y, [0.3, -0.2]);
        assert_eq!(driver.stats.fn_evals, 0);
    }

    #[test]
    fn negative_interval_is_rejected() {
        let mut driver = Driver::new(2, Tolerances::default());
        let mut y = [1.0, 0.0];
        let err = driver.step(&Oscillator, &mut y, -0.1).unwrap_err();
        assert!(matches!(err, IntegrationFailure::InvalidInterval { .. }));
    }

    #[test]
    #[should_panic(expected = "stale driver binding")]
    fn wrong_dimension_panics() {
        let mut driver = Driver::new(4, Tolerances::default());
        let mut y = [1.0, 0.0];
        let _ = driver.step(&Oscillator, &mut y, 0.1);
    }

    #[test]
    fn long_interval_runs_out_of_sub_steps() {
        let mut driver = Driver::new(2, Tolerances { atol: 1e-9, rtol: 1e-9 });
        driver.max_steps = 3;
        let mut y = [1.0, 0.0];

        let err = driver.step(&Oscillator, &mut y, 10.0).unwrap_err();

        assert!(
            matches!(err, IntegrationFailure::StepBudgetExhausted { steps: 3, .. }),
            "unexpected failure {:?}",
            err
        );
        assert!(err.time() < 10.0);
        assert!(y.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn controller_never_grows_on_bad_error() {
        let c = StepController::default();
        assert_eq!(c.factor(f64::NAN), c.min_factor);
        assert_eq!(c.factor(f64::INFINITY), c.min_factor);
        assert_eq!(c.factor(0.0), c.max_factor);
        assert!(c.factor(2.0) < 1.0);
    }
}
