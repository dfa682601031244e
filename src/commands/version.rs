//! Command: print version information.

/// Print the brewsync version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("brewsync {}", super::version());
}
