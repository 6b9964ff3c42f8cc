//! Configuration parameters for test execution

use crate::run::classify::{self, DiagnosticFn};
use std::fmt;
use std::path::{Path, PathBuf};

/// RUN template used when a test declares none
pub const DEFAULT_RUN: &str = "%ccomp %s -o %t && %t";

/// Configuration parameters for running tests
#[derive(Clone)]
pub struct RunParams {
    /// Compiler under test, expanded for `%ccomp`
    pub compiler: PathBuf,
    /// Working directory of every spawned shell
    pub work_dir: PathBuf,
    /// Shell program and the flag that precedes the command string
    pub shell: (String, String),
    /// Template used for tests without RUN lines
    pub default_run: String,
    /// Decides whether stderr of a failed compile-and-run step is a compile error
    pub is_diagnostic: DiagnosticFn,
    /// Remove the `%t` file after failed tests too
    pub always_remove_temp: bool,
}

impl RunParams {
    /// Create a new RunParams for the given compiler with default settings
    ///
    /// The compiler path is made absolute and the working directory is the
    /// process's current directory at the time of the call.
    pub fn new(compiler: impl AsRef<Path>) -> Self {
        let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let compiler = compiler.as_ref();
        let compiler =
            std::path::absolute(compiler).unwrap_or_else(|_| work_dir.join(compiler));

        #[cfg(windows)]
        let shell = ("cmd".to_string(), "/C".to_string());
        #[cfg(not(windows))]
        let shell = ("sh".to_string(), "-c".to_string());

        RunParams {
            compiler,
            work_dir,
            shell,
            default_run: DEFAULT_RUN.to_string(),
            is_diagnostic: classify::is_compile_diagnostic,
            always_remove_temp: false,
        }
    }

    /// Set the working directory for spawned shells
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Set the shell program and its command flag
    pub fn shell(mut self, program: &str, flag: &str) -> Self {
        self.shell = (program.to_string(), flag.to_string());
        self
    }

    /// Set the template used for tests without RUN lines
    pub fn default_run(mut self, template: &str) -> Self {
        self.default_run = template.to_string();
        self
    }

    /// Replace the compile-error predicate
    pub fn diagnostic(mut self, predicate: DiagnosticFn) -> Self {
        self.is_diagnostic = predicate;
        self
    }

    /// Remove the `%t` file on every exit path, not only on success
    pub fn always_remove_temp(mut self, remove: bool) -> Self {
        self.always_remove_temp = remove;
        self
    }
}

impl fmt::Debug for RunParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunParams")
            .field("compiler", &self.compiler)
            .field("work_dir", &self.work_dir)
            .field("shell", &self.shell)
            .field("default_run", &self.default_run)
            .field("always_remove_temp", &self.always_remove_temp)
            .finish_non_exhaustive()
    }
}
