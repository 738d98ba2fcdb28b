use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::ToolConfig;
use crate::exec::SystemLauncher;
use crate::flow::BuildOrchestrator;
use crate::util::repo::RepoLayout;

pub fn run(cli: crate::cli::Cli) -> Result<()> {
    run_in(crate::util::repo::repo_root()?, cli)
}

/// Everything after root discovery.
pub fn run_in(root: PathBuf, cli: crate::cli::Cli) -> Result<()> {
    let layout = RepoLayout::new(root);
    log::debug!("Repo: {}", layout.root().display());

    let config = ToolConfig::load(layout.root()).context("Loading tool configuration")?;
    let request = cli.into_request();

    let orchestrator = BuildOrchestrator::new(layout, config, SystemLauncher);
    orchestrator.execute(&request)?;
    Ok(())
}
