//! Console report: one line per test, then a summary block

use crate::result::{Summary, TestResult, TestStatus};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Output sink that may color test statuses
pub trait StatusSink: Write {
    /// Switch to the color used for `status`
    fn set_status_color(&mut self, status: TestStatus) -> io::Result<()>;
    /// Return to the default color
    fn reset_color(&mut self) -> io::Result<()>;
}

#[cfg(feature = "colors")]
mod color {
    use super::StatusSink;
    use crate::result::TestStatus;
    use std::io;
    use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

    impl<W: WriteColor> StatusSink for W {
        fn set_status_color(&mut self, status: TestStatus) -> io::Result<()> {
            let color = match status {
                TestStatus::Pass => Color::Green,
                TestStatus::Fail => Color::Red,
                TestStatus::Skip | TestStatus::XFail => Color::Yellow,
            };
            self.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))
        }

        fn reset_color(&mut self) -> io::Result<()> {
            self.reset()
        }
    }

    /// Stdout, colored when asked for and attached to a terminal
    pub type Console = StandardStream;

    pub fn console(color: bool) -> Console {
        let choice = if color && atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StandardStream::stdout(choice)
    }
}

#[cfg(not(feature = "colors"))]
mod color {
    use super::StatusSink;
    use crate::result::TestStatus;
    use std::io::{self, Write};

    impl<W: Write> StatusSink for W {
        fn set_status_color(&mut self, _status: TestStatus) -> io::Result<()> {
            Ok(())
        }

        fn reset_color(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Plain stdout
    pub type Console = io::Stdout;

    pub fn console(_color: bool) -> Console {
        io::stdout()
    }
}

pub use color::Console;

/// Writes the progress lines and the final summary of a suite run
pub struct Reporter<W: StatusSink> {
    out: W,
    verbose: bool,
}

impl Reporter<Console> {
    /// Report to stdout
    pub fn stdout(color: bool) -> Self {
        Reporter::new(color::console(color))
    }
}

impl<W: StatusSink> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter {
            out,
            verbose: false,
        }
    }

    /// Also print each test's captured output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Announce the number of tests about to run
    pub fn start(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "Running {} tests...", count)?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    /// Print the line for one finished test
    pub fn result(&mut self, result: &TestResult) -> io::Result<()> {
        self.out.set_status_color(result.status)?;
        write!(self.out, "{:<6}", result.status)?;
        self.out.reset_color()?;
        writeln!(
            self.out,
            " {} ({:.3}s)",
            result.name,
            result.duration.as_secs_f64()
        )?;

        if result.is_failure() && !result.error.is_empty() {
            writeln!(self.out, "  Error: {}", result.error)?;
        }
        if self.verbose && !result.output.is_empty() {
            for line in result.output.lines() {
                writeln!(self.out, "    {}", line)?;
            }
        }
        Ok(())
    }

    /// Print the summary block
    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.out, "Test Results Summary:")?;
        writeln!(self.out, "  Total:    {}", summary.total())?;
        writeln!(self.out, "  Passed:   {}", summary.passed())?;
        writeln!(self.out, "  Failed:   {}", summary.failed())?;
        writeln!(self.out, "  Skipped:  {}", summary.skipped())?;
        writeln!(self.out, "  Expected: {}", summary.expected_failures())?;

        let failed = summary.failed_names();
        if !failed.is_empty() {
            writeln!(self.out)?;
            writeln!(self.out, "Failed tests:")?;
            for name in failed {
                writeln!(self.out, "  - {}", name)?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "Success rate: {:.1}%", summary.success_rate())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
