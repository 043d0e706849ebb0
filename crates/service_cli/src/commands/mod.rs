//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Calculating commands
//! expose a `render` function returning the text they print, and a `run`
//! wrapper that loads the scenario and writes to stdout.

pub mod allocate;
pub mod check;
pub mod defaults;
pub mod metrics;
pub mod numbers;
pub mod recommend;
pub mod valuation;

/// Prints rendered command output with exactly one trailing newline.
pub(crate) fn emit(output: &str) {
    println!("{}", output.trim_end());
}
