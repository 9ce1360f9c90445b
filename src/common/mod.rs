//! Common types shared by the solver and the verifier

use crate::error::TrajectoryError;

/// Number of values in a boundary state
pub const STATE_DIM: usize = 3;

/// Number of coefficients of a quintic polynomial
pub const COEFFICIENT_COUNT: usize = 6;

/// Polynomial coefficients `[a0, a1, a2, a3, a4, a5]` of
/// `s(t) = a0 + a1*t + a2*t^2 + a3*t^3 + a4*t^4 + a5*t^5`
pub type Coefficients = [f64; COEFFICIENT_COUNT];

/// Position, velocity and acceleration along one axis at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl KinematicState {
    /// Create a new boundary state
    pub fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        KinematicState {
            position,
            velocity,
            acceleration,
        }
    }

    /// The state as `[s, s_dot, s_double_dot]`
    pub fn as_array(&self) -> [f64; STATE_DIM] {
        [self.position, self.velocity, self.acceleration]
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }

    /// Build a state from a slice, naming it `which` in the error if the length is wrong
    pub fn from_slice(which: &'static str, values: &[f64]) -> Result<Self, TrajectoryError> {
        match values {
            [s, v, a] => Ok(KinematicState::new(*s, *v, *a)),
            _ => Err(TrajectoryError::DimensionMismatch {
                which,
                expected: STATE_DIM,
                actual: values.len(),
            }),
        }
    }
}

impl From<[f64; STATE_DIM]> for KinematicState {
    fn from(values: [f64; STATE_DIM]) -> Self {
        KinematicState::new(values[0], values[1], values[2])
    }
}

impl TryFrom<&[f64]> for KinematicState {
    type Error = TrajectoryError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        KinematicState::from_slice("state", values)
    }
}

/// One verification scenario and the coefficients it must produce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestCase {
    pub start: KinematicState,
    pub end: KinematicState,
    pub duration: f64,
    pub expected: Coefficients,
}

impl TestCase {
    pub const fn new(
        start: [f64; STATE_DIM],
        end: [f64; STATE_DIM],
        duration: f64,
        expected: Coefficients,
    ) -> Self {
        TestCase {
            start: KinematicState {
                position: start[0],
                velocity: start[1],
                acceleration: start[2],
            },
            end: KinematicState {
                position: end[0],
                velocity: end[1],
                acceleration: end[2],
            },
            duration,
            expected,
        }
    }
}
