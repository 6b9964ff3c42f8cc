//! Test execution module

pub mod classify;
pub mod execution;
pub mod params;
pub mod sequence;
pub mod substitute;

// Re-export public types
pub use classify::{DiagnosticFn, StepOutcome};
pub use execution::{execute_step, StepOutput};
pub use params::RunParams;
pub use substitute::Substitutions;

use crate::result::TestResult;
use std::path::Path;

/// Run a single test file, naming the result after its path
pub fn run_test(test_file: &Path, params: &RunParams) -> TestResult {
    let name = test_file.to_string_lossy();
    execution::run_test(test_file, &name, params)
}
