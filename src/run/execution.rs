//! Shell execution of RUN steps and the per-test loop

use crate::directives::{self, Directives};
use crate::error::{Error, Result};
use crate::result::{TestResult, TestStatus};
use crate::run::classify::{self, StepOutcome, StepReport};
use crate::run::params::RunParams;
use crate::run::sequence;
use crate::run::substitute::{self, Substitutions};
use log::{debug, trace, warn};
use std::fs;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus};
use std::time::Instant;

/// Captured result of one shell invocation
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// The command string handed to the shell
    pub command: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    fn report(&self) -> StepReport<'_> {
        StepReport {
            command: &self.command,
            success: self.success(),
            stderr: &self.stderr,
        }
    }
}

/// Run `command` through the configured shell and wait for it
pub fn execute_step(command: &str, params: &RunParams) -> Result<StepOutput> {
    let (shell, flag) = &params.shell;
    debug!("$ {}", command);

    let output = StdCommand::new(shell)
        .arg(flag)
        .arg(command)
        .current_dir(&params.work_dir)
        .output()
        .map_err(|e| Error::spawn_error(command, e))?;

    trace!("exit status {:?}", output.status.code());

    Ok(StepOutput {
        command: command.to_string(),
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Accumulated output and error text of a test
#[derive(Debug, Default)]
struct Transcript {
    output: Vec<String>,
    errors: Vec<String>,
}

impl Transcript {
    fn record(&mut self, step: &StepOutput) {
        self.output.push(format!("$ {}", step.command));
        if !step.stdout.is_empty() {
            self.output.push(step.stdout.clone());
        }
        if !step.stderr.is_empty() {
            if step.success() {
                self.output.push(format!("Warnings: {}", step.stderr));
            } else {
                self.errors.push(step.stderr.clone());
            }
        }
    }

    fn output(&self) -> String {
        self.output.join("\n")
    }

    fn errors(&self) -> String {
        self.errors.join("\n")
    }
}

/// Run one test file and classify it
///
/// Never fails: any error while reading, parsing or spawning becomes a FAIL
/// result carrying the error message.
pub fn run_test(test_file: &Path, name: &str, params: &RunParams) -> TestResult {
    let start = Instant::now();

    let result = run_test_impl(test_file, name, params, start).unwrap_or_else(|e| {
        warn!("{}: {}", name, e);
        TestResult::new(
            name,
            TestStatus::Fail,
            start.elapsed(),
            "",
            format!("Test execution failed: {}", e),
        )
    });

    if params.always_remove_temp {
        remove_temp(test_file);
    }

    result
}

fn run_test_impl(
    test_file: &Path,
    name: &str,
    params: &RunParams,
    start: Instant,
) -> Result<TestResult> {
    let directives = directives::parse_file(test_file)?;

    if directives.is_unsupported() {
        return Ok(TestResult::new(
            name,
            TestStatus::Skip,
            start.elapsed(),
            "Test unsupported",
            "",
        ));
    }

    let directives = directives.with_default_run(&params.default_run);
    let steps = sequence::fuse(&directives.run);
    trace!("{}: {} step(s): {:?}", name, steps.len(), steps);

    let subs = Substitutions::new(test_file, &params.compiler);
    let expect_failure = directives.expects_failure();
    let mut transcript = Transcript::default();

    for step in &steps {
        let command = subs.apply(step);
        let output = execute_step(&command, params)?;
        transcript.record(&output);

        match classify::classify_step(&output.report(), expect_failure, params.is_diagnostic) {
            StepOutcome::Continue => {}
            StepOutcome::Fail => {
                return Ok(TestResult::new(
                    name,
                    TestStatus::Fail,
                    start.elapsed(),
                    transcript.output(),
                    transcript.errors(),
                ));
            }
            StepOutcome::UnexpectedPass => {
                return Ok(TestResult::new(
                    name,
                    TestStatus::Fail,
                    start.elapsed(),
                    transcript.output(),
                    classify::UNEXPECTED_PASS_MESSAGE,
                ));
            }
        }
    }

    let temp = substitute::temp_path(test_file);
    if temp.exists() {
        fs::remove_file(&temp)?;
    }

    Ok(TestResult::new(
        name,
        final_status(&directives),
        start.elapsed(),
        transcript.output(),
        "",
    ))
}

/// Status of a test none of whose steps failed
pub fn final_status(directives: &Directives) -> TestStatus {
    if directives.is_xfail() {
        TestStatus::XFail
    } else {
        TestStatus::Pass
    }
}

fn remove_temp(test_file: &Path) {
    let temp = substitute::temp_path(test_file);
    if temp.exists() {
        if let Err(e) = fs::remove_file(&temp) {
            warn!("could not remove {}: {}", temp.display(), e);
        }
    }
}
