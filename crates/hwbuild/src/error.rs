//! Errors that end a build invocation.
//!
//! Every variant is terminal: the orchestrator stops at the first one and the
//! entry point maps it to exit status 1. Nothing is retried or rolled back.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::dut::DutCatalog;

#[derive(Error, Debug)]
pub enum BuildError {
    /// Requested DUT has no directory under `verif/`.
    #[error("Invalid DUT '{name}'. Legal DUTs: {catalog}")]
    InvalidDut { name: String, catalog: DutCatalog },

    #[error("Testbench file not found: {}", .path.display())]
    TestbenchNotFound { path: PathBuf },

    /// External tool exited non-zero or was killed by a signal.
    #[error("Command failed: {command} ({})", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Tool '{0}' not found in PATH")]
    ToolNotFound(String),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl BuildError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        BuildError::Io {
            context: context.into(),
            source,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dut_display() {
        let catalog: DutCatalog = ["fifo", "alu"].into_iter().map(String::from).collect();
        let err = BuildError::InvalidDut {
            name: "cpu".to_string(),
            catalog,
        };
        assert_eq!(err.to_string(), "Invalid DUT 'cpu'. Legal DUTs: alu, fifo");
    }

    #[test]
    fn test_invalid_dut_display_empty_catalog() {
        let err = BuildError::InvalidDut {
            name: "cpu".to_string(),
            catalog: DutCatalog::default(),
        };
        assert_eq!(err.to_string(), "Invalid DUT 'cpu'. Legal DUTs: (none found)");
    }

    #[test]
    fn test_command_failed_display() {
        let err = BuildError::CommandFailed {
            command: "vlog rtl/alu/alu.sv".to_string(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: vlog rtl/alu/alu.sv (exit status 2)"
        );

        let err = BuildError::CommandFailed {
            command: "vsim".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "Command failed: vsim (terminated by signal)");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = BuildError::io("Removing target/alu", io::Error::other("busy"));
        assert_eq!(err.to_string(), "Removing target/alu");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("busy"));
    }
}
