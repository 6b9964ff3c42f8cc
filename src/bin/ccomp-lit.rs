//! Command-line front end for ccomp-lit

use anyhow::Context;
use ccomp_lit::{suite, Reporter};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ccomp-lit")]
#[command(about = "Run a lit-style C compiler test suite")]
#[command(version)]
struct Cli {
    /// Path to compiler executable
    #[arg(short, long, default_value = suite::DEFAULT_COMPILER)]
    compiler: PathBuf,
    /// Test directory
    #[arg(short, long, default_value = "./tests")]
    test_dir: PathBuf,
    /// Filter tests by name pattern
    #[arg(short, long)]
    filter: Option<String>,
    /// Print each test's captured output
    #[arg(short, long)]
    verbose: bool,
    /// Disable colored status labels
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            println!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let suite = suite::run(&cli.test_dir)
        .compiler(&cli.compiler)
        .filter_opt(cli.filter)
        .build()?;

    let test_files = suite.discover().context("discovering tests")?;

    let mut reporter = Reporter::stdout(!cli.no_color).verbose(cli.verbose);
    reporter.start(test_files.len())?;

    let mut write_error = None;
    let summary = suite.run_files(&test_files, |result| {
        if let Err(e) = reporter.result(result) {
            write_error.get_or_insert(e);
        }
    })?;
    if let Some(e) = write_error {
        return Err(e).context("writing report");
    }

    reporter.summary(&summary)?;
    Ok(summary.exit_code())
}
