//! Recording launcher for tests. Never starts a process.

use std::cell::RefCell;

use super::{CommandLine, ProcessLauncher};
use crate::error::Result;

type Predicate = Box<dyn Fn(&CommandLine) -> bool>;

/// Records every command and answers with one line of output.
///
/// Commands matching a `fail_when` predicate exit with its code; a negative
/// code means "killed by a signal".
#[derive(Default)]
pub struct FakeLauncher {
    calls: RefCell<Vec<CommandLine>>,
    failures: Vec<(Predicate, i32)>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fail_when(mut self, pred: impl Fn(&CommandLine) -> bool + 'static, code: i32) -> Self {
        self.failures.push((Box::new(pred), code));
        self
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.program().to_string())
            .collect()
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&self, command: &CommandLine, on_line: &mut dyn FnMut(&str)) -> Result<Option<i32>> {
        self.calls.borrow_mut().push(command.clone());

        let code = self
            .failures
            .iter()
            .find(|(pred, _)| pred(command))
            .map_or(0, |(_, code)| *code);

        if code == 0 {
            on_line(&format!("{command}: ok\n"));
            Ok(Some(0))
        } else if code < 0 {
            on_line(&format!("{command}: killed\n"));
            Ok(None)
        } else {
            on_line(&format!("{command}: exit {code}\n"));
            Ok(Some(code))
        }
    }
}
