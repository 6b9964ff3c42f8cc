//! Per-test results and the suite summary

use std::fmt;
use std::time::Duration;

/// Final classification of a test file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    /// Failed as declared by an XFAIL directive
    XFail,
}

impl TestStatus {
    /// The label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Skip => "SKIP",
            TestStatus::XFail => "XFAIL",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width and alignment flags apply.
        f.pad(self.as_str())
    }
}

/// Outcome of running one test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Path relative to the test root
    pub name: String,
    pub status: TestStatus,
    pub duration: Duration,
    /// Echoed commands, their stdout and any warnings
    pub output: String,
    /// Stderr of failed steps, or a diagnostic message
    pub error: String,
}

impl TestResult {
    pub fn new(
        name: impl Into<String>,
        status: TestStatus,
        duration: Duration,
        output: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        TestResult {
            name: name.into(),
            status,
            duration,
            output: output.into(),
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == TestStatus::Fail
    }
}

/// Results of a whole suite run, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub results: Vec<TestResult>,
}

impl Summary {
    pub fn new(results: Vec<TestResult>) -> Self {
        Summary { results }
    }

    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of results with the given status
    pub fn count(&self, status: TestStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn passed(&self) -> usize {
        self.count(TestStatus::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(TestStatus::Fail)
    }

    pub fn skipped(&self) -> usize {
        self.count(TestStatus::Skip)
    }

    pub fn expected_failures(&self) -> usize {
        self.count(TestStatus::XFail)
    }

    /// Names of failed tests, in run order
    pub fn failed_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Percentage of tests that passed, 0 for an empty suite
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.failed() == 0 {
            0
        } else {
            1
        }
    }
}
