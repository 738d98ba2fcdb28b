use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment override for the repository root.
pub const ROOT_ENV: &str = "HWBUILD_ROOT";

/// Resolve the repository root once per invocation.
///
/// `HWBUILD_ROOT` wins, then `git rev-parse --show-toplevel`, then the
/// current directory.
pub fn repo_root() -> Result<PathBuf> {
    resolve_root(env::var_os(ROOT_ENV))
}

fn resolve_root(env_override: Option<OsString>) -> Result<PathBuf> {
    if let Some(root) = env_override.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    if let Some(root) = git_toplevel() {
        return Ok(root);
    }
    env::current_dir().context("Reading current directory")
}

fn git_toplevel() -> Option<PathBuf> {
    let out = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let top = String::from_utf8_lossy(&out.stdout);
    let top = top.trim();
    (!top.is_empty()).then(|| PathBuf::from(top))
}

/// Directory conventions below the repository root.
#[derive(Debug, Clone)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn verif_root(&self) -> PathBuf {
        self.root.join("verif")
    }

    pub fn rtl_root(&self) -> PathBuf {
        self.root.join("rtl")
    }

    pub fn target_root(&self) -> PathBuf {
        self.root.join("target")
    }

    pub fn dut(&self, dut: &str) -> DutPaths {
        let target_dir = self.target_root().join(dut);
        DutPaths {
            verif_dir: self.verif_root().join(dut),
            rtl_dir: self.rtl_root().join(dut),
            work_dir: target_dir.join("work"),
            log_dir: target_dir.join("log"),
            target_dir,
        }
    }
}

/// Every path one DUT's flow touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutPaths {
    pub verif_dir: PathBuf,
    pub rtl_dir: PathBuf,
    pub target_dir: PathBuf,
    pub work_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl DutPaths {
    pub fn log(&self, name: &str) -> PathBuf {
        self.log_dir.join(name)
    }
}
