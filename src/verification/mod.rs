//! Verification harness for the jerk minimizing trajectory solver
//!
//! Runs the solver over a fixed set of scenarios and compares each result to
//! a reference coefficient vector within an absolute tolerance.

use crate::common::{Coefficients, TestCase};
use crate::control::trajectory::QuinticTrajectory;
use crate::error::{ConfigError, TrajectoryError};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Absolute tolerance used when comparing coefficients
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Scenarios and their reference coefficients
pub const FIXED_TEST_CASES: [TestCase; 3] = [
    TestCase::new(
        [0.0, 10.0, 0.0],
        [10.0, 10.0, 0.0],
        1.0,
        [0.0, 10.0, 0.0, 0.0, 0.0, 0.0],
    ),
    TestCase::new(
        [0.0, 10.0, 0.0],
        [20.0, 15.0, 20.0],
        2.0,
        [0.0, 10.0, 0.0, 0.0, -0.625, 0.3125],
    ),
    TestCase::new(
        [5.0, 10.0, 2.0],
        [-30.0, -20.0, -4.0],
        5.0,
        [5.0, 10.0, 1.0, -3.0, 0.64, -0.0432],
    ),
];

/// Check that two coefficient sequences have the same length and that every
/// pair of terms differs by at most `eps`.
pub fn coefficients_close(actual: &[f64], expected: &[f64], eps: f64) -> bool {
    if actual.len() != expected.len() {
        warn!(
            "solution has {} terms, expected {}",
            actual.len(),
            expected.len()
        );
        return false;
    }

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        debug!("a{}: {} answer: {}", i, a, e);
        let diff = a - e;
        // NaN never compares as within tolerance
        if !(diff.abs() <= eps) {
            warn!(
                "term a{} differs from target by {} (tolerance {})",
                i,
                diff.abs(),
                eps
            );
            return false;
        }
    }
    true
}

/// Verifier parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifierConfig {
    pub tolerance: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl VerifierConfig {
    /// Override parameters present in `params`; others keep their value.
    /// Nothing changes when any parameter is rejected.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), ConfigError> {
        if let Some(unknown) = params.keys().find(|key| key.as_str() != "tolerance") {
            return Err(ConfigError::UnknownParameter(unknown.clone()));
        }
        if let Some(&tolerance) = params.get("tolerance") {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
            self.tolerance = tolerance;
        }
        Ok(())
    }
}

/// Result of a single scenario
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Passed(Coefficients),
    Mismatch {
        actual: Coefficients,
        expected: Coefficients,
    },
    SolverFailed(TrajectoryError),
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed(_))
    }
}

/// Outcomes of a verification run, in case order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerificationReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl VerificationReport {
    /// True when every case passed
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }
}

/// Runs solver scenarios against their reference answers
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier with the default tolerance
    pub fn new() -> Self {
        Verifier::default()
    }

    pub fn with_config(config: VerifierConfig) -> Self {
        Verifier { config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Configure the verifier
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), ConfigError> {
        self.config.configure(params)
    }

    /// Solve and compare a single scenario
    pub fn check(&self, case: &TestCase) -> CaseOutcome {
        match QuinticTrajectory::solve(case.start, case.end, case.duration) {
            Ok(traj) => {
                let actual = traj.coefficients;
                if coefficients_close(&actual, &case.expected, self.config.tolerance) {
                    CaseOutcome::Passed(actual)
                } else {
                    CaseOutcome::Mismatch {
                        actual,
                        expected: case.expected,
                    }
                }
            }
            Err(e) => CaseOutcome::SolverFailed(e),
        }
    }

    /// Run every case, printing one line per case and a final verdict.
    /// A failing case does not stop the remaining ones.
    pub fn run(&self, cases: &[TestCase]) -> VerificationReport {
        info!(
            "Verifying {} cases with tolerance {}",
            cases.len(),
            self.config.tolerance
        );

        let mut report = VerificationReport::default();
        for (i, case) in cases.iter().enumerate() {
            let outcome = self.check(case);
            match &outcome {
                CaseOutcome::Passed(_) => println!("case {}: ok", i + 1),
                CaseOutcome::Mismatch { actual, expected } => {
                    println!("case {}: FAILED", i + 1);
                    for (term, (a, e)) in actual.iter().zip(expected).enumerate() {
                        let diff = (a - e).abs();
                        if !(diff <= self.config.tolerance) {
                            println!("  a{}: got {} answer {} (off by {})", term, a, e, diff);
                        }
                    }
                }
                CaseOutcome::SolverFailed(e) => println!("case {}: FAILED ({})", i + 1, e),
            }
            report.outcomes.push(outcome);
        }

        if report.passed() {
            println!("Nice work!");
        } else {
            println!("Try again!");
        }
        report
    }
}

/// Run the fixed scenarios with the default tolerance and report overall success
pub fn run_verification() -> bool {
    Verifier::new().run(&FIXED_TEST_CASES).passed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_is_reflexive() {
        let v = [0.0, 10.0, 0.0, 0.0, -0.625, 0.3125];
        assert!(coefficients_close(&v, &v, 0.0));
        assert!(coefficients_close(&v, &v, DEFAULT_TOLERANCE));
        assert!(coefficients_close(&[], &[], 0.0));
    }

    #[test]
    fn comparison_fails_on_length_mismatch() {
        assert!(!coefficients_close(&[1.0, 2.0], &[1.0, 2.0, 3.0], 10.0));
        assert!(!coefficients_close(&[1.0; 6], &[1.0; 5], f64::MAX));
    }

    #[test]
    fn comparison_respects_tolerance() {
        let expected = [1.0, 2.0, 3.0];
        assert!(coefficients_close(&[1.005, 1.995, 3.0], &expected, 0.01));
        assert!(!coefficients_close(&[1.0, 2.02, 3.0], &expected, 0.01));
        assert!(!coefficients_close(&[1.0, 2.0, f64::NAN], &expected, 0.01));
    }

    #[test]
    fn fixed_suite_passes() {
        assert!(run_verification());

        let report = Verifier::new().run(&FIXED_TEST_CASES);
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn altered_answer_fails_the_suite() {
        let mut cases = FIXED_TEST_CASES;
        cases[1].expected[4] = -0.6;

        let report = Verifier::new().run(&cases);
        assert!(!report.passed());
        assert!(report.outcomes[0].passed());
        assert!(matches!(report.outcomes[1], CaseOutcome::Mismatch { .. }));
        assert!(report.outcomes[2].passed());
    }

    #[test]
    fn solver_error_fails_only_its_case() {
        let mut cases = FIXED_TEST_CASES;
        cases[0].duration = 0.0;

        let report = Verifier::new().run(&cases);
        assert_eq!(
            report.outcomes[0],
            CaseOutcome::SolverFailed(TrajectoryError::InvalidDuration(0.0))
        );
        assert!(report.outcomes[1].passed());
        assert!(report.outcomes[2].passed());
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn configure_overrides_tolerance() {
        let mut verifier = Verifier::with_config(VerifierConfig::default());
        assert_eq!(verifier.config().tolerance, DEFAULT_TOLERANCE);

        let mut params = HashMap::new();
        params.insert("tolerance".to_string(), 0.1);
        verifier.configure(&params).unwrap();
        assert_eq!(verifier.config().tolerance, 0.1);

        // Loose enough to accept the altered answer
        let mut cases = FIXED_TEST_CASES;
        cases[1].expected[4] = -0.6;
        assert!(verifier.run(&cases).passed());

        verifier.configure(&HashMap::new()).unwrap();
        assert_eq!(verifier.config().tolerance, 0.1);
    }

    #[test]
    fn configure_rejects_bad_parameters() {
        let mut config = VerifierConfig::default();

        let mut params = HashMap::new();
        params.insert("tolerance".to_string(), -1.0);
        assert_eq!(
            config.configure(&params),
            Err(ConfigError::InvalidTolerance(-1.0))
        );

        let mut params = HashMap::new();
        params.insert("max_iterations".to_string(), 5.0);
        assert_eq!(
            config.configure(&params),
            Err(ConfigError::UnknownParameter("max_iterations".to_string()))
        );
        assert_eq!(config, VerifierConfig::default());
    }

    #[test]
    fn rejected_configuration_changes_nothing() {
        // Repeat with fresh maps so both key orders are exercised
        for _ in 0..64 {
            let mut config = VerifierConfig::default();
            let mut params = HashMap::new();
            params.insert("tolerance".to_string(), 0.5);
            params.insert("bogus".to_string(), 1.0);

            assert_eq!(
                config.configure(&params),
                Err(ConfigError::UnknownParameter("bogus".to_string()))
            );
            assert_eq!(config, VerifierConfig::default());
        }
    }
}
