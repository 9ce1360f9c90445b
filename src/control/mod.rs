//! Control module: trajectory generation along a single axis
pub mod trajectory;

pub use self::trajectory::{solve_jmt, solve_jmt_from_slices, QuinticTrajectory};
