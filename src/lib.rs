//! # ccomp-lit
//!
//! A test runner for C compiler test suites following LLVM `lit` conventions.
//!
//! Each test file embeds its own instructions as comment directives:
//!
//! ```text
//! // RUN: %ccomp %s -o %t
//! // RUN: test $? -eq 0
//! // XFAIL: *
//! // UNSUPPORTED: windows
//! ```
//!
//! RUN templates get their placeholders expanded (`%s`, `%t`, `%T`, `%ccomp`),
//! are fused when a step inspects the previous exit status (`$?`), and run
//! one after another through the shell. Each test ends up as PASS, FAIL, SKIP
//! or XFAIL.

pub mod directives;
pub mod error;
pub mod report;
pub mod result;
pub mod run;
pub mod suite;

pub use directives::Directives;
pub use error::{Error, Result};
pub use report::Reporter;
pub use result::{Summary, TestResult, TestStatus};
pub use run::{run_test, RunParams};
pub use suite::{Builder, Suite};
