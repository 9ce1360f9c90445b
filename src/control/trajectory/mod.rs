//! Jerk minimizing trajectory generation
//!
//! Solves for the quintic polynomial that joins two boundary states
//! (position, velocity, acceleration) over a fixed duration. The first three
//! coefficients follow from the start state; the last three come from a 3x3
//! linear system built from the end state, solved in normalized time.

use crate::common::{Coefficients, KinematicState, STATE_DIM};
use crate::error::TrajectoryError;
use log::trace;
use nalgebra::{Matrix3, Vector3};

/// Compute the coefficients of the jerk minimizing trajectory from `start` to
/// `end` in `duration` seconds.
///
/// States are `[s, s_dot, s_double_dot]`. The result holds `[a0, .., a5]` of
/// `s(t) = a0 + a1*t + a2*t^2 + a3*t^3 + a4*t^4 + a5*t^5`.
pub fn solve_jmt(
    start: [f64; STATE_DIM],
    end: [f64; STATE_DIM],
    duration: f64,
) -> Result<Coefficients, TrajectoryError> {
    QuinticTrajectory::solve(start.into(), end.into(), duration).map(|traj| traj.coefficients)
}

/// Same as [`solve_jmt`] for callers holding unchecked slices.
pub fn solve_jmt_from_slices(
    start: &[f64],
    end: &[f64],
    duration: f64,
) -> Result<Coefficients, TrajectoryError> {
    let start = KinematicState::from_slice("start", start)?;
    let end = KinematicState::from_slice("end", end)?;
    QuinticTrajectory::solve(start, end, duration).map(|traj| traj.coefficients)
}

/// A solved quintic trajectory over `[0, duration]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuinticTrajectory {
    pub coefficients: Coefficients,
    pub duration: f64,
}

impl QuinticTrajectory {
    /// Solve the boundary value problem between `start` and `end`
    pub fn solve(
        start: KinematicState,
        end: KinematicState,
        duration: f64,
    ) -> Result<Self, TrajectoryError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TrajectoryError::InvalidDuration(duration));
        }
        if !start.is_finite() {
            return Err(TrajectoryError::NonFiniteState { which: "start" });
        }
        if !end.is_finite() {
            return Err(TrajectoryError::NonFiniteState { which: "end" });
        }

        let KinematicState {
            position: si,
            velocity: vi,
            acceleration: ai,
        } = start;

        // Solve in normalized time tau = t / T, where the boundary matrix no
        // longer depends on T. b_k = a_k * T^k.
        let t = duration;
        let a = Matrix3::new(1.0, 1.0, 1.0, 3.0, 4.0, 5.0, 6.0, 12.0, 20.0);
        let b = Vector3::new(
            end.position - (si + vi * t + 0.5 * ai * t * t),
            (end.velocity - (vi + ai * t)) * t,
            (end.acceleration - ai) * t * t,
        );

        let normalized = a
            .lu()
            .solve(&b)
            .ok_or(TrajectoryError::NumericOverflow { duration })?;

        // Divide one power at a time so T^5 itself never overflows
        let a3 = normalized[0] / t / t / t;
        let a4 = normalized[1] / t / t / t / t;
        let a5 = normalized[2] / t / t / t / t / t;
        let x = [a3, a4, a5];
        if !b.iter().chain(x.iter()).all(|v| v.is_finite()) {
            return Err(TrajectoryError::NumericOverflow { duration });
        }

        let coefficients = [si, vi, ai / 2.0, x[0], x[1], x[2]];
        trace!(
            "JMT {:?} -> {:?} over {}s: {:?}",
            start.as_array(),
            end.as_array(),
            duration,
            coefficients
        );

        Ok(QuinticTrajectory {
            coefficients,
            duration,
        })
    }

    pub fn position(&self, t: f64) -> f64 {
        horner(&self.coefficients, t)
    }

    pub fn velocity(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        horner(&[c[1], 2.0 * c[2], 3.0 * c[3], 4.0 * c[4], 5.0 * c[5]], t)
    }

    pub fn acceleration(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        horner(&[2.0 * c[2], 6.0 * c[3], 12.0 * c[4], 20.0 * c[5]], t)
    }

    pub fn jerk(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        horner(&[6.0 * c[3], 24.0 * c[4], 60.0 * c[5]], t)
    }

    /// Kinematic state at time `t`. Times outside `[0, duration]` extrapolate.
    pub fn state_at(&self, t: f64) -> KinematicState {
        KinematicState::new(self.position(t), self.velocity(t), self.acceleration(t))
    }

    /// Sample `steps + 1` evenly spaced states from `0` to `duration`
    pub fn sample(&self, steps: usize) -> Vec<(f64, KinematicState)> {
        if steps == 0 {
            return vec![(0.0, self.state_at(0.0))];
        }

        (0..=steps)
            .map(|i| {
                let t = self.duration * i as f64 / steps as f64;
                (t, self.state_at(t))
            })
            .collect()
    }

    /// Integral of the squared jerk over `[0, duration]`, the cost this
    /// trajectory minimizes.
    pub fn squared_jerk_integral(&self) -> f64 {
        // jerk(t) = c0 + c1*t + c2*t^2
        let c0 = 6.0 * self.coefficients[3];
        let c1 = 24.0 * self.coefficients[4];
        let c2 = 60.0 * self.coefficients[5];
        let t = self.duration;

        let terms = [
            c0 * c0,
            c0 * c1,
            (c1 * c1 + 2.0 * c0 * c2) / 3.0,
            c1 * c2 / 2.0,
            c2 * c2 / 5.0,
        ];
        // Each term multiplies t^(i + 1)
        horner(&terms, t) * t
    }
}

/// Evaluate `c[0] + c[1]*t + c[2]*t^2 + ...`
fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}
