//! Parser for lit-style directives embedded in test sources
//!
//! Directives are recognized on any line whose trimmed content starts with one
//! of the markers below; everything else in the file (the program under test)
//! is ignored:
//!
//! ```text
//! // RUN: %ccomp %s -o %t && %t
//! // XFAIL: *
//! // UNSUPPORTED: windows
//! ```

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Marker introducing a command template
pub const RUN_MARKER: &str = "// RUN:";
/// Marker introducing expected-failure markers
pub const XFAIL_MARKER: &str = "// XFAIL:";
/// Marker introducing unsupported markers
pub const UNSUPPORTED_MARKER: &str = "// UNSUPPORTED:";

/// The XFAIL marker that means "expected to fail everywhere"
pub const XFAIL_WILDCARD: &str = "*";

/// Directives parsed from a single test file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Command templates in file order
    pub run: Vec<String>,
    /// Expected-failure markers from the last XFAIL line
    pub xfail: Vec<String>,
    /// Unsupported markers from the last UNSUPPORTED line
    pub unsupported: Vec<String>,
}

impl Directives {
    /// Whether the test must be skipped without running anything
    pub fn is_unsupported(&self) -> bool {
        !self.unsupported.is_empty()
    }

    /// Whether the test declared any XFAIL markers at all
    pub fn is_xfail(&self) -> bool {
        !self.xfail.is_empty()
    }

    /// Whether failures are expected unconditionally.
    ///
    /// Only the wildcard marker counts; platform markers are parsed but never
    /// matched against the host.
    pub fn expects_failure(&self) -> bool {
        self.xfail.iter().any(|marker| marker == XFAIL_WILDCARD)
    }

    /// Fill in `template` as the only RUN command when none was declared
    pub fn with_default_run(mut self, template: &str) -> Self {
        if self.run.is_empty() {
            self.run.push(template.to_string());
        }
        self
    }
}

/// Parse the directives out of a test file's text
///
/// Lines are scanned independently. RUN lines accumulate in order; XFAIL and
/// UNSUPPORTED lines replace any earlier declaration of the same kind.
pub fn parse(content: &str) -> Directives {
    let mut directives = Directives::default();

    for line in content.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(RUN_MARKER) {
            directives.run.push(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(XFAIL_MARKER) {
            directives.xfail = split_markers(rest);
        } else if let Some(rest) = line.strip_prefix(UNSUPPORTED_MARKER) {
            directives.unsupported = split_markers(rest);
        }
    }

    directives
}

/// Read and parse a test file
pub fn parse_file(path: &Path) -> Result<Directives> {
    let content = fs::read_to_string(path)?;
    let directives = parse(&content);
    log::trace!("{}: {:?}", path.display(), directives);
    Ok(directives)
}

// Markers are kept untrimmed: in `linux, *` the second one is " *", which is
// not the wildcard. An empty remainder still yields one (empty) marker.
fn split_markers(rest: &str) -> Vec<String> {
    rest.trim().split(',').map(str::to_string).collect()
}
