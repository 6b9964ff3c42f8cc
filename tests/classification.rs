//! Outcome classification of single test files
#![cfg(unix)]

mod common;

use ccomp_lit::run::classify::UNEXPECTED_PASS_MESSAGE;
use ccomp_lit::{run_test, RunParams, TestStatus};
use common::{read, Fixture};
use std::fs;

fn params(fixture: &Fixture) -> RunParams {
    RunParams::new(&fixture.compiler)
}

#[test]
fn test_missing_run_uses_compile_and_run() {
    let fixture = Fixture::new();
    let implicit = fixture.test("implicit.c", "int main(void) { return 0; }\n");
    let explicit = fixture.test(
        "explicit.c",
        "// RUN: %ccomp %s -o %t && %t\nint main(void) { return 0; }\n",
    );

    let implicit = run_test(&implicit, &params(&fixture));
    let explicit = run_test(&explicit, &params(&fixture));

    assert_eq!(implicit.status, TestStatus::Pass);
    assert_eq!(explicit.status, TestStatus::Pass);

    let compiler = fixture.compiler.display().to_string();
    assert!(implicit.output.starts_with(&format!("$ {} ", compiler)));
    assert!(implicit.output.contains("implicit.tmp && "));
    assert!(implicit.output.contains("compiled "));
}

#[test]
fn test_program_exit_code_is_not_a_failure() {
    let fixture = Fixture::new();
    let test = fixture.test("exit3.c", "// EXIT_CODE=3\nint main(void) { return 3; }\n");

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Pass, "{:?}", result);
}

#[test]
fn test_compile_error_in_compile_and_run_fails() {
    let fixture = Fixture::new();
    let test = fixture.test("syntax.c", "int main(void) { SYNTAX_ERROR }\n");

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Fail);
    assert!(result.error.contains("error: syntax"));
}

#[test]
fn test_diagnostic_match_ignores_case() {
    let fixture = Fixture::new();
    let test = fixture.test(
        "open.c",
        "// RUN: echo 'ccomp: CANNOT OPEN missing.h' >&2 && false\n",
    );

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Fail);
}

#[test]
fn test_custom_diagnostic_predicate() {
    fn mentions_panic(stderr: &str) -> bool {
        stderr.contains("PANIC")
    }

    let fixture = Fixture::new();
    let test = fixture.test("custom.c", "// RUN: echo 'error: benign' >&2 && false\n");

    let result = run_test(&test, &params(&fixture).diagnostic(mentions_panic));
    assert_eq!(result.status, TestStatus::Pass);
}

#[test]
fn test_plain_command_failure_fails() {
    let fixture = Fixture::new();
    let test = fixture.test("plain.c", "// RUN: false\n");

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(result.output, "$ false");
}

#[test]
fn test_assertion_step() {
    let fixture = Fixture::new();
    let pass = fixture.test("exists.c", "// RUN: %ccomp %s -o %t\n// RUN: test -x %t\n");
    let fail = fixture.test("missing.c", "// RUN: test -f %T/nothing-here\n");

    assert_eq!(run_test(&pass, &params(&fixture)).status, TestStatus::Pass);
    assert_eq!(run_test(&fail, &params(&fixture)).status, TestStatus::Fail);
}

#[test]
fn test_exit_status_check_is_fused() {
    let fixture = Fixture::new();
    let test = fixture.test(
        "neg.c",
        "// RUN: %ccomp %s -o %t\n// RUN: test $? -ne 0\nint main(void) { SYNTAX_ERROR }\n",
    );

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Pass, "{:?}", result);

    let commands: Vec<&str> = result
        .output
        .lines()
        .filter(|line| line.starts_with("$ "))
        .collect();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].starts_with("$ ( "));
    assert!(commands[0].ends_with(" ); test $? -ne 0"));
}

#[test]
fn test_failed_step_short_circuits() {
    let fixture = Fixture::new();
    let marker = fixture.scratch("reached");
    let test = fixture.test(
        "stop.c",
        &format!("// RUN: false\n// RUN: touch {}\n", marker.display()),
    );

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Fail);
    assert!(!marker.exists());
}

#[test]
fn test_steps_run_in_order() {
    let fixture = Fixture::new();
    let log = fixture.scratch("order.log");
    let log = log.display();
    let test = fixture.test(
        "order.c",
        &format!(
            "// RUN: echo one >> {log}\n// RUN: echo two >> {log}\n// RUN: echo three >> {log}\n"
        ),
    );

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Pass);
    assert_eq!(read(&fixture.scratch("order.log")), "one\ntwo\nthree\n");
}

#[test]
fn test_xfail_wildcard() {
    let fixture = Fixture::new();
    let failing = fixture.test("xfail.c", "// XFAIL: *\n// RUN: false\n");
    let passing = fixture.test("xpass.c", "// XFAIL: *\n// RUN: true\n");

    let result = run_test(&failing, &params(&fixture));
    assert_eq!(result.status, TestStatus::XFail);

    let result = run_test(&passing, &params(&fixture));
    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(result.error, UNEXPECTED_PASS_MESSAGE);
}

#[test]
fn test_platform_xfail_is_not_honored() {
    let fixture = Fixture::new();
    let failing = fixture.test("linux_fail.c", "// XFAIL: linux\n// RUN: false\n");
    let passing = fixture.test("linux_pass.c", "// XFAIL: linux\n// RUN: true\n");

    assert_eq!(run_test(&failing, &params(&fixture)).status, TestStatus::Fail);
    // Declared XFAIL markers still label a clean run.
    assert_eq!(run_test(&passing, &params(&fixture)).status, TestStatus::XFail);
}

#[test]
fn test_unsupported_never_spawns() {
    let fixture = Fixture::new();
    let marker = fixture.scratch("spawned");
    let test = fixture.test(
        "skip.c",
        &format!("// UNSUPPORTED: all\n// RUN: touch {}\n", marker.display()),
    );

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Skip);
    assert_eq!(result.output, "Test unsupported");
    assert!(!marker.exists());
}

#[test]
fn test_stderr_on_success_is_a_warning() {
    let fixture = Fixture::new();
    let test = fixture.test("warn.c", "// RUN: echo 'warning: unused' >&2\n");

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Pass);
    assert!(result.output.contains("Warnings: warning: unused"));
    assert!(result.error.is_empty());
}

#[test]
fn test_commands_run_in_configured_work_dir() {
    let fixture = Fixture::new();
    let work = fixture.scratch("work");
    fs::create_dir(&work).unwrap();
    let test = fixture.test("pwd.c", "// RUN: pwd > %s.pwd\n");

    let result = run_test(&test, &params(&fixture).work_dir(&work));
    assert_eq!(result.status, TestStatus::Pass);

    let pwd = read(&fixture.tests.join("pwd.c.pwd"));
    assert_eq!(
        fs::canonicalize(pwd.trim()).unwrap(),
        fs::canonicalize(&work).unwrap()
    );
}

#[test]
fn test_unreadable_file_becomes_failure() {
    let fixture = Fixture::new();
    let test = fixture.tests.join("binary.c");
    fs::write(&test, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let result = run_test(&test, &params(&fixture));
    assert_eq!(result.status, TestStatus::Fail);
    assert!(result.error.starts_with("Test execution failed: "));
    assert!(result.output.is_empty());
}

#[test]
fn test_spawn_failure_becomes_failure() {
    let fixture = Fixture::new();
    let test = fixture.test("spawn.c", "// RUN: true\n");

    let params = params(&fixture).shell("/no/such/shell", "-c");
    let result = run_test(&test, &params);
    assert_eq!(result.status, TestStatus::Fail);
    assert!(result.error.starts_with("Test execution failed: Failed to spawn 'true'"));
}

#[test]
fn test_spaced_wildcard_is_a_platform_marker() {
    let fixture = Fixture::new();
    let passing = fixture.test("spaced.c", "// XFAIL: linux, *\n// RUN: true\n");
    let failing = fixture.test("spaced_fail.c", "// XFAIL: linux, *\n// RUN: false\n");

    let result = run_test(&passing, &params(&fixture));
    assert_eq!(result.status, TestStatus::XFail, "{:?}", result);
    assert!(result.error.is_empty());

    assert_eq!(run_test(&failing, &params(&fixture)).status, TestStatus::Fail);
}
