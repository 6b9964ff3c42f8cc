//! Suite driver: discovery, filtering and sequential execution

use crate::error::{Error, Result};
use crate::result::{Summary, TestResult};
use crate::run::{execution, RunParams};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default location of the compiler under test
pub const DEFAULT_COMPILER: &str = "./build/ccomp";

/// Extensions of files treated as tests by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "test"];

/// A validated test suite, ready to run
#[derive(Debug, Clone)]
pub struct Suite {
    test_dir: PathBuf,
    params: RunParams,
    extensions: Vec<String>,
    filter: Option<String>,
}

impl Suite {
    /// Root directory of the test files
    pub fn test_dir(&self) -> &Path {
        &self.test_dir
    }

    /// Execution parameters shared by every test
    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Find all test files under the root, sorted by path
    ///
    /// The filter, if any, keeps paths whose string form contains it.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut test_files = Vec::new();

        for entry in WalkDir::new(&self.test_dir).min_depth(1).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.is_test_file(entry.path()) {
                continue;
            }
            if let Some(filter) = &self.filter {
                if !entry.path().to_string_lossy().contains(filter.as_str()) {
                    continue;
                }
            }
            test_files.push(entry.into_path());
        }

        // Sort test files for consistent execution order
        test_files.sort();
        debug!(
            "discovered {} test(s) under {}",
            test_files.len(),
            self.test_dir.display()
        );

        Ok(test_files)
    }

    /// Name of a test: its path relative to the root
    pub fn test_name(&self, test_file: &Path) -> String {
        test_file
            .strip_prefix(&self.test_dir)
            .unwrap_or(test_file)
            .to_string_lossy()
            .into_owned()
    }

    /// Run one discovered test file
    pub fn run_test(&self, test_file: &Path) -> TestResult {
        execution::run_test(test_file, &self.test_name(test_file), &self.params)
    }

    /// Run every discovered test in order
    ///
    /// `on_result` sees each result as soon as its test completes. A failing
    /// test never stops the run.
    pub fn run_with<F>(&self, on_result: F) -> Result<Summary>
    where
        F: FnMut(&TestResult),
    {
        let test_files = self.discover()?;
        self.run_files(&test_files, on_result)
    }

    /// Run the given test files in order
    pub fn run_files<F>(&self, test_files: &[PathBuf], mut on_result: F) -> Result<Summary>
    where
        F: FnMut(&TestResult),
    {
        let mut summary = Summary::default();
        for test_file in test_files {
            let result = self.run_test(test_file);
            on_result(&result);
            summary.push(result);
        }
        Ok(summary)
    }

    /// Run every discovered test without observing progress
    pub fn run(&self) -> Result<Summary> {
        self.run_with(|_| {})
    }

    fn is_test_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

/// Builder for configuring and running a test suite
///
/// # Examples
///
/// ```no_run
/// use ccomp_lit::suite;
///
/// let summary = suite::run("tests")
///     .compiler("./build/ccomp")
///     .filter("Pointers")
///     .execute()
///     .unwrap();
/// std::process::exit(summary.exit_code());
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    test_dir: PathBuf,
    compiler: PathBuf,
    params: Option<RunParams>,
    extensions: Vec<String>,
    filter: Option<String>,
}

impl Builder {
    /// Create a new builder for the given test directory
    fn new(test_dir: impl Into<PathBuf>) -> Self {
        Self {
            test_dir: test_dir.into(),
            compiler: PathBuf::from(DEFAULT_COMPILER),
            params: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            filter: None,
        }
    }

    /// Set the compiler under test
    pub fn compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.compiler = path.into();
        self
    }

    /// Use fully custom execution parameters; their compiler takes precedence
    pub fn params(mut self, params: RunParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Only run tests whose path contains `pattern`
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Only run tests whose path contains `pattern`, if given
    pub fn filter_opt(mut self, pattern: Option<String>) -> Self {
        self.filter = pattern;
        self
    }

    /// Set the extensions of files treated as tests
    pub fn extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Validate the configuration and produce a runnable suite
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the compiler or the test directory does
    /// not exist.
    pub fn build(self) -> Result<Suite> {
        let params = self
            .params
            .unwrap_or_else(|| RunParams::new(&self.compiler));

        if !params.compiler.exists() {
            return Err(Error::config_error(format!(
                "Compiler not found at {}",
                params.compiler.display()
            )));
        }

        if !self.test_dir.exists() {
            return Err(Error::config_error(format!(
                "Test directory not found at {}",
                self.test_dir.display()
            )));
        }

        Ok(Suite {
            test_dir: self.test_dir,
            params,
            extensions: self.extensions,
            filter: self.filter,
        })
    }

    /// Validate, then run every discovered test
    pub fn execute(self) -> Result<Summary> {
        self.build()?.run()
    }
}

/// Create a new suite builder for the given test directory
pub fn run(test_dir: impl Into<PathBuf>) -> Builder {
    Builder::new(test_dir)
}
