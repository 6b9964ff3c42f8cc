//! Outcome classification for executed RUN steps

use regex::Regex;
use std::sync::OnceLock;

/// Predicate deciding whether stderr text reports a compilation failure
pub type DiagnosticFn = fn(&str) -> bool;

/// Shell AND-chain marking a combined compile-then-run step
pub const AND_CHAIN_TOKEN: &str = "&&";

/// Prefix of a step that invokes the shell `test` builtin
pub const ASSERTION_PREFIX: &str = "test ";

/// Error text recorded when an expected failure succeeds
pub const UNEXPECTED_PASS_MESSAGE: &str = "XFAIL test unexpectedly passed";

/// What a single executed step means for its test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep going with the next step
    Continue,
    /// The test failed at this step
    Fail,
    /// An expected failure exited successfully
    UnexpectedPass,
}

/// Status and stderr of one finished step, as seen by the classifier
#[derive(Debug, Clone, Copy)]
pub struct StepReport<'a> {
    /// The fully substituted shell command
    pub command: &'a str,
    /// Whether the shell exited with status zero
    pub success: bool,
    /// Captured standard error
    pub stderr: &'a str,
}

/// Whether `stderr` carries a compiler diagnostic.
///
/// Matches `error:`, `fatal error:` or `cannot open` anywhere, ignoring case.
pub fn is_compile_diagnostic(stderr: &str) -> bool {
    static DIAGNOSTIC: OnceLock<Regex> = OnceLock::new();
    DIAGNOSTIC
        .get_or_init(|| {
            Regex::new(r"(?i)(fatal error:|error:|cannot open)").expect("valid diagnostic regex")
        })
        .is_match(stderr)
}

/// Whether `command` is an assertion step using the `test` builtin
pub fn is_assertion(command: &str) -> bool {
    command.trim().starts_with(ASSERTION_PREFIX)
}

/// Classify one step
///
/// `expect_failure` is the unconditional XFAIL expectation of the test.
pub fn classify_step(
    step: &StepReport<'_>,
    expect_failure: bool,
    is_diagnostic: DiagnosticFn,
) -> StepOutcome {
    if is_assertion(step.command) {
        if !step.success && !expect_failure {
            return StepOutcome::Fail;
        }
        return StepOutcome::Continue;
    }

    match (step.success, expect_failure) {
        (false, false) => {
            if !step.command.contains(AND_CHAIN_TOKEN) || is_diagnostic(step.stderr) {
                StepOutcome::Fail
            } else {
                // Nonzero exit of the compiled program itself.
                StepOutcome::Continue
            }
        }
        (true, true) => StepOutcome::UnexpectedPass,
        _ => StepOutcome::Continue,
    }
}
