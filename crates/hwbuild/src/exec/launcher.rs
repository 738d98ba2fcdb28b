use std::env;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::Command;

use super::CommandLine;
use crate::error::{BuildError, Result};

/// Starts a process and streams its combined stdout/stderr.
///
/// `on_line` receives each line as it arrives, newline included. Returns the
/// exit code, or `None` when the process was killed by a signal.
pub trait ProcessLauncher {
    fn launch(&self, command: &CommandLine, on_line: &mut dyn FnMut(&str)) -> Result<Option<i32>>;
}

impl<L: ProcessLauncher + ?Sized> ProcessLauncher for &L {
    fn launch(&self, command: &CommandLine, on_line: &mut dyn FnMut(&str)) -> Result<Option<i32>> {
        (**self).launch(command, on_line)
    }
}

/// Real processes via `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &CommandLine, on_line: &mut dyn FnMut(&str)) -> Result<Option<i32>> {
        let program = resolve(command)?;

        // One pipe behind both stdout and stderr keeps the tool's own interleaving.
        let (reader, writer) =
            io::pipe().map_err(|e| BuildError::io("Creating output pipe", e))?;
        let stderr = writer
            .try_clone()
            .map_err(|e| BuildError::io("Creating output pipe", e))?;

        // The Command holds the write ends; it must be dropped before reading
        // or the reader never sees EOF.
        let mut child = {
            let mut cmd = Command::new(&program);
            cmd.args(command.get_args()).stdout(writer).stderr(stderr);
            if let Some(dir) = command.cwd() {
                cmd.current_dir(dir);
            }
            cmd.spawn()
                .map_err(|e| BuildError::io(format!("Spawning {}", command.program()), e))?
        };

        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let streamed = loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break Ok(()),
                Ok(_) => on_line(&String::from_utf8_lossy(&buf)),
                Err(e) => break Err(e),
            }
        };

        let status = child
            .wait()
            .map_err(|e| BuildError::io(format!("Waiting for {}", command.program()), e))?;
        streamed.map_err(|e| BuildError::io(format!("Reading output of {}", command.program()), e))?;
        Ok(status.code())
    }
}

/// Look the program up on `PATH`. A path such as `./scripts/hw.sh` is taken
/// relative to the command's own working directory, not ours.
fn resolve(command: &CommandLine) -> Result<PathBuf> {
    let cwd = match command.cwd() {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().map_err(|e| BuildError::io("Reading current directory", e))?,
    };
    which::which_in(command.program(), env::var_os("PATH"), cwd)
        .map_err(|_| BuildError::ToolNotFound(command.program().to_string()))
}
