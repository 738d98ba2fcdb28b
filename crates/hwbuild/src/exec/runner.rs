use std::cell::RefCell;
use std::io::{self, Write};

use super::{CommandLine, LogTarget, ProcessLauncher};
use crate::error::{BuildError, Result};

/// Runs one tool at a time, teeing its output to a console sink and a log file.
pub struct CommandRunner<L, W = io::Stdout> {
    launcher: L,
    console: RefCell<Console<W>>,
}

impl<L: ProcessLauncher> CommandRunner<L> {
    pub fn new(launcher: L) -> Self {
        Self::with_output(launcher, io::stdout())
    }
}

impl<L: ProcessLauncher, W: Write> CommandRunner<L, W> {
    pub fn with_output(launcher: L, out: W) -> Self {
        Self {
            launcher,
            console: RefCell::new(Console { out, closed: false }),
        }
    }

    /// Run `command` to completion.
    ///
    /// Output lines are echoed as they arrive and kept only for this call.
    /// When `log` is set they are written there once the process exits, even
    /// if it failed. A non-zero exit becomes `CommandFailed`.
    pub fn run(&self, command: &CommandLine, log: Option<&LogTarget>, verbose: bool) -> Result<()> {
        let mut console = self.console.borrow_mut();
        if verbose {
            console.echo(&format!("[CMD] {command}\n"));
        }

        let mut captured: Vec<String> = Vec::new();
        let code = self.launcher.launch(command, &mut |line| {
            console.echo(line);
            captured.push(line.to_string());
        })?;

        if let Some(target) = log {
            target.write(&captured.concat())?;
        }

        match code {
            Some(0) => Ok(()),
            code => Err(BuildError::CommandFailed {
                command: command.to_string(),
                code,
            }),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.console.into_inner().out
    }
}

/// Console passthrough. Once a write fails (reader went away, e.g. `| head`)
/// echoing stops for good; capture into the log is unaffected.
struct Console<W> {
    out: W,
    closed: bool,
}

impl<W: Write> Console<W> {
    fn echo(&mut self, text: &str) {
        if self.closed {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            log::debug!("Console output closed, no longer echoing: {e}");
            self.closed = true;
        }
    }
}
