//! Running external tools: command lines, process launching, log capture.

mod command;
#[cfg(test)]
pub mod fake;
mod launcher;
mod log_target;
mod runner;

pub use command::CommandLine;
pub use launcher::{ProcessLauncher, SystemLauncher};
pub use log_target::LogTarget;
pub use runner::CommandRunner;
