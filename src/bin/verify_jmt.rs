use anyhow::{bail, Result};
use jmt_core::verification::{Verifier, FIXED_TEST_CASES};
use jmt_core::TestCase;
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Running jerk minimizing trajectory verification");
    run(&FIXED_TEST_CASES)
}

/// Run `cases`; an `Err` makes the process exit nonzero
fn run(cases: &[TestCase]) -> Result<()> {
    let report = Verifier::new().run(cases);

    if !report.passed() {
        bail!(
            "{} of {} cases failed",
            report.failures(),
            report.outcomes.len()
        );
    }
    Ok(())
}
