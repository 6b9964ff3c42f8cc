#![no_main]

use ccomp_lit::run::Substitutions;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let template = String::from_utf8_lossy(data);

    let subs = Substitutions::new(Path::new("tests/case.c"), Path::new("/opt/ccomp"));
    let expanded = subs.apply(&template);

    // Without placeholders the template passes through unchanged.
    if !template.contains('%') {
        assert_eq!(expanded, template);
    }

    // Deterministic.
    assert_eq!(subs.apply(&template), expanded);
});
