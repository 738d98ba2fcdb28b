use log::{debug, info, warn};
use std::fs;

use super::{sim, BuildRequest, Stage};
use crate::config::{ToolConfig, CONFIG_FILE};
use crate::dut::{self, DutResolver};
use crate::error::{BuildError, Result};
use crate::exec::{CommandLine, CommandRunner, LogTarget, ProcessLauncher};
use crate::util::repo::{DutPaths, RepoLayout};

/// Drives one request through the stage machine.
///
/// Stops at the first error. Directories and logs written before the failure
/// are left in place.
pub struct BuildOrchestrator<L> {
    layout: RepoLayout,
    config: ToolConfig,
    runner: CommandRunner<L>,
}

impl<L: ProcessLauncher> BuildOrchestrator<L> {
    pub fn new(layout: RepoLayout, config: ToolConfig, launcher: L) -> Self {
        Self {
            layout,
            config,
            runner: CommandRunner::new(launcher),
        }
    }

    /// Returns the stages visited, `Validated` first and `Done` last.
    pub fn execute(&self, request: &BuildRequest) -> Result<Vec<Stage>> {
        // Nothing on disk changes and nothing is launched before this check.
        let catalog = DutResolver::new(&self.layout).list_duts();
        dut::validate(&request.dut, &catalog)?;

        if let Some(cfg) = request.cfg.as_deref() {
            debug!("Ignoring -cfg {cfg}");
        }
        debug!(
            "Plan for {}: {}",
            request.dut,
            Stage::plan(request)
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        let paths = self.layout.dut(&request.dut);
        let mut stage = Stage::Validated;
        let mut visited = vec![stage];
        while let Some(next) = stage.next(request) {
            match next {
                Stage::Cleaned => self.clean(&paths)?,
                Stage::HwBuilt => self.build_hardware(request, &paths)?,
                Stage::SimRun => self.simulate(request, &paths)?,
                Stage::Done if stage != Stage::Cleaned => self.report(&paths)?,
                Stage::Validated | Stage::Done => {}
            }
            visited.push(next);
            stage = next;
        }
        Ok(visited)
    }

    fn clean(&self, paths: &DutPaths) -> Result<()> {
        if !paths.target_dir.exists() {
            debug!("Nothing to clean at {}", paths.target_dir.display());
            return Ok(());
        }
        info!("Removing {}", paths.target_dir.display());
        fs::remove_dir_all(&paths.target_dir).map_err(|e| {
            BuildError::io(format!("Removing {}", paths.target_dir.display()), e)
        })
    }

    fn build_hardware(&self, request: &BuildRequest, paths: &DutPaths) -> Result<()> {
        let argv = self.config.hw.command_for(&request.dut);
        let cmd = CommandLine::from_argv(&argv)
            .ok_or_else(|| BuildError::Config {
                path: self.layout.root().join(CONFIG_FILE),
                message: "[hw] command must not be empty".to_string(),
            })?
            .current_dir(self.layout.root());

        info!("Building hardware for {}", request.dut);
        self.run(&cmd, &LogTarget::overwrite(paths.log("hw_build.log")), request)
    }

    fn simulate(&self, request: &BuildRequest, paths: &DutPaths) -> Result<()> {
        let cfg = &self.config;
        let top = request.top_name();

        // Fresh work library every run.
        if paths.work_dir.exists() {
            fs::remove_dir_all(&paths.work_dir).map_err(|e| {
                BuildError::io(format!("Removing {}", paths.work_dir.display()), e)
            })?;
        }
        fs::create_dir_all(&paths.target_dir).map_err(|e| {
            BuildError::io(format!("Creating {}", paths.target_dir.display()), e)
        })?;
        self.run(
            &sim::vlib(cfg, paths),
            &LogTarget::overwrite(paths.log("vlib.log")),
            request,
        )?;

        let sources = sim::rtl_sources(&paths.rtl_dir, &cfg.sim.extension)?;
        if sources.is_empty() {
            warn!("No RTL files found under rtl/{}/", request.dut);
        } else {
            let rtl_log = LogTarget::append(paths.log("rtl_compile.log"));
            rtl_log.reset()?;
            for src in &sources {
                self.run(&sim::vlog(cfg, paths, src), &rtl_log, request)?;
            }
        }

        let tb = sim::testbench_path(cfg, paths, &top);
        if !tb.exists() {
            return Err(BuildError::TestbenchNotFound { path: tb });
        }
        self.run(
            &sim::vlog(cfg, paths, &tb),
            &LogTarget::overwrite(paths.log("compile.log")),
            request,
        )?;

        info!(
            "Simulating work.{top} ({})",
            if request.gui { "gui" } else { "batch" }
        );
        self.run(
            &sim::vsim(cfg, paths, &top, request.gui),
            &LogTarget::overwrite(paths.log("sim.log")),
            request,
        )
    }

    fn report(&self, paths: &DutPaths) -> Result<()> {
        fs::create_dir_all(&paths.log_dir).map_err(|e| {
            BuildError::io(format!("Creating {}", paths.log_dir.display()), e)
        })?;
        info!("Logs saved under: {}", paths.log_dir.display());
        Ok(())
    }

    fn run(&self, cmd: &CommandLine, log: &LogTarget, request: &BuildRequest) -> Result<()> {
        self.runner.run(cmd, Some(log), request.verbose)
    }
}
