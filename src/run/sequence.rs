//! Fusing RUN commands into shell invocations

/// Shell token for the previous command's exit status
pub const EXIT_STATUS_TOKEN: &str = "$?";

/// Merge RUN commands into the ordered list of shell invocations to execute
///
/// A command that mentions `$?` is run in the same shell as its immediate
/// predecessor, as `( prev ); next`, so it observes the predecessor's exit
/// status. Fusion is pairwise: a fused pair is never extended by a third
/// command.
pub fn fuse<S: AsRef<str>>(commands: &[S]) -> Vec<String> {
    let mut fused = Vec::with_capacity(commands.len());
    let mut i = 0;

    while i < commands.len() {
        let current = commands[i].as_ref();
        match commands.get(i + 1).map(AsRef::as_ref) {
            Some(next) if next.contains(EXIT_STATUS_TOKEN) => {
                fused.push(format!("( {} ); {}", current, next));
                i += 2;
            }
            _ => {
                fused.push(current.to_string());
                i += 1;
            }
        }
    }

    fused
}
