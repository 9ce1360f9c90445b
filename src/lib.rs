//! Jerk minimizing trajectory solver
//!
//! Computes the quintic polynomial joining two boundary states over a fixed
//! duration, plus a harness that checks the solver against reference answers.

pub mod common;
pub mod control;
pub mod error;
pub mod verification;

pub use crate::common::{Coefficients, KinematicState, TestCase};
pub use crate::control::trajectory::{solve_jmt, solve_jmt_from_slices, QuinticTrajectory};
pub use crate::error::{ConfigError, TrajectoryError};
pub use crate::verification::{coefficients_close, run_verification, Verifier, VerifierConfig};
