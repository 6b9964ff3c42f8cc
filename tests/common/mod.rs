//! Shared fixtures: a fake compiler and test-tree helpers

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A stand-in for the compiler under test.
///
/// `ccomp SRC -o OUT` reports `error: syntax` and exits 1 when SRC contains
/// `SYNTAX_ERROR`; otherwise it writes OUT as a script exiting with the
/// number after `EXIT_CODE=` in SRC (default 0).
const FAKE_COMPILER: &str = r#"#!/bin/sh
src="$1"
out="$3"
if [ -n "$CCOMP_LOG" ]; then
  echo "$src" >> "$CCOMP_LOG"
fi
if grep -q SYNTAX_ERROR "$src"; then
  echo "$src:1:1: error: syntax" >&2
  exit 1
fi
echo "compiled $src"
if [ -n "$out" ]; then
  code=$(sed -n 's/.*EXIT_CODE=\([0-9]*\).*/\1/p' "$src" | head -n 1)
  printf '#!/bin/sh\nexit %s\n' "${code:-0}" > "$out"
  chmod +x "$out"
fi
exit 0
"#;

pub struct Fixture {
    pub dir: TempDir,
    pub compiler: PathBuf,
    pub tests: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let compiler = dir.path().join("ccomp");
        fs::write(&compiler, FAKE_COMPILER).unwrap();
        fs::set_permissions(&compiler, fs::Permissions::from_mode(0o755)).unwrap();

        let tests = dir.path().join("tests");
        fs::create_dir(&tests).unwrap();

        Fixture {
            dir,
            compiler,
            tests,
        }
    }

    /// Write a test file under the test root and return its path
    pub fn test(&self, name: &str, content: &str) -> PathBuf {
        let path = self.tests.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// A path inside the fixture that no test creates on its own
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}
