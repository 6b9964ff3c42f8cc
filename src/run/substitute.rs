//! Placeholder expansion for RUN command templates

use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Concrete values for every recognized placeholder of one test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions {
    /// `%s`: the test file path as given
    pub source: PathBuf,
    /// `%t`: the test file path with its extension replaced by `.tmp`
    pub temp: PathBuf,
    /// `%T`: the `Output` directory next to the test file
    pub output_dir: PathBuf,
    /// `%ccomp`: the compiler under test
    pub compiler: PathBuf,
}

impl Substitutions {
    /// Compute the placeholder values for `test_file`
    pub fn new(test_file: &Path, compiler: &Path) -> Self {
        let output_dir = test_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("Output");

        Substitutions {
            source: test_file.to_path_buf(),
            temp: temp_path(test_file),
            output_dir,
            compiler: compiler.to_path_buf(),
        }
    }

    /// Expand all placeholders in `template`
    ///
    /// Every placeholder is matched as a whole token in a single left-to-right
    /// pass, so an expansion is never rescanned and `%t` never eats into `%T`.
    /// Unknown `%x` sequences are left untouched.
    pub fn apply(&self, template: &str) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| {
                let value = match &caps[1] {
                    "ccomp" => &self.compiler,
                    "s" => &self.source,
                    "t" => &self.temp,
                    "T" => &self.output_dir,
                    _ => return caps[0].to_string(),
                };
                value.to_string_lossy().into_owned()
            })
            .into_owned()
    }
}

/// The `%t` path for a test file
pub fn temp_path(test_file: &Path) -> PathBuf {
    test_file.with_extension("tmp")
}

/// Expand `template` for `test_file` compiled with `compiler`
pub fn substitute(template: &str, test_file: &Path, compiler: &Path) -> String {
    Substitutions::new(test_file, compiler).apply(template)
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    // `ccomp` is listed first so the leftmost-first alternation prefers it.
    PLACEHOLDER.get_or_init(|| Regex::new(r"%(ccomp|s|t|T)").expect("valid placeholder regex"))
}
