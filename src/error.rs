//! Error types for trajectory solving and verifier configuration

use thiserror::Error;

/// Failure to compute a jerk minimizing trajectory
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("duration must be a positive finite number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("{which} state must have {expected} components, got {actual}")]
    DimensionMismatch {
        which: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{which} state contains a non-finite value")]
    NonFiniteState { which: &'static str },

    #[error("trajectory coefficients are not representable for duration {duration}")]
    NumericOverflow { duration: f64 },
}

/// Rejected verifier parameter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tolerance must be a non-negative finite number, got {0}")]
    InvalidTolerance(f64),

    #[error("unknown verifier parameter `{0}`")]
    UnknownParameter(String),
}
