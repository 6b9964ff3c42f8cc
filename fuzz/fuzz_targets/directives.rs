#![no_main]

use arbitrary::Arbitrary;
use ccomp_lit::directives;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzLine {
    Run(String),
    XFail(String),
    Unsupported(String),
    Source(String),
}

fuzz_target!(|lines: Vec<FuzzLine>| {
    let mut content = String::new();
    let mut runs = 0;

    for line in &lines {
        match line {
            FuzzLine::Run(cmd) if !cmd.contains(['\n', '\r']) => {
                content.push_str(&format!("// RUN: {}\n", cmd));
                runs += 1;
            }
            FuzzLine::XFail(markers) => content.push_str(&format!("// XFAIL: {}\n", markers)),
            FuzzLine::Unsupported(markers) => {
                content.push_str(&format!("// UNSUPPORTED: {}\n", markers))
            }
            FuzzLine::Source(text) | FuzzLine::Run(text) => {
                content.push_str(text);
                content.push('\n');
            }
        }
    }

    let parsed = directives::parse(&content);

    // Source lines may themselves look like RUN lines, never fewer.
    assert!(parsed.run.len() >= runs, "lost RUN lines");

    // Parsing is deterministic.
    assert_eq!(parsed, directives::parse(&content));
});
