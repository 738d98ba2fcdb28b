//! Simulator command lines and source discovery.
//!
//! vlog and vsim run inside `target/<dut>/` so that the default `work`
//! library they resolve is the one vlib created there.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::error::{BuildError, Result};
use crate::exec::CommandLine;
use crate::util::repo::DutPaths;

pub fn vlib(cfg: &ToolConfig, paths: &DutPaths) -> CommandLine {
    CommandLine::new(&cfg.tools.vlib).path_arg(&paths.work_dir)
}

pub fn vlog(cfg: &ToolConfig, paths: &DutPaths, source: &Path) -> CommandLine {
    CommandLine::new(&cfg.tools.vlog)
        .path_arg(source)
        .current_dir(&paths.target_dir)
}

/// Batch runs get `-c` and a run-to-completion `-do` script; GUI runs get
/// neither.
pub fn vsim(cfg: &ToolConfig, paths: &DutPaths, top: &str, gui: bool) -> CommandLine {
    let mut cmd = CommandLine::new(&cfg.tools.vsim);
    if !gui {
        cmd = cmd.arg("-c");
    }
    cmd = cmd
        .args(cfg.sim.vsim_args.iter().cloned())
        .arg(format!("work.{top}"));
    if !gui {
        cmd = cmd.args(["-do".to_string(), cfg.sim.batch_do.clone()]);
    }
    cmd.current_dir(&paths.target_dir)
}

/// `<verif>/<dut>/<top>.<ext>`
pub fn testbench_path(cfg: &ToolConfig, paths: &DutPaths, top: &str) -> PathBuf {
    paths.verif_dir.join(format!("{top}.{}", cfg.sim.extension))
}

/// Files directly under `dir` with the HDL extension, sorted by name.
/// A missing directory has no sources.
pub fn rtl_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries =
        fs::read_dir(dir).map_err(|e| BuildError::io(format!("Reading {}", dir.display()), e))?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| BuildError::io(format!("Reading {}", dir.display()), e))?
            .path();
        if path.is_file() && path.extension().is_some_and(|e| e == extension) {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}
