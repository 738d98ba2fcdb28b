//! Tool configuration.
//!
//! Built-in defaults drive a Questa/ModelSim flow. A `hwbuild.toml` at the
//! repository root overrides any subset of them:
//!
//! ```toml
//! [tools]
//! vsim = "/opt/questa/bin/vsim"
//!
//! [hw]
//! command = ["make", "-C", "fpga", "DUT={dut}"]
//!
//! [sim]
//! extension = "sv"
//! vsim_args = ["-voptargs=+acc"]
//! batch_do = "run -all; quit -f"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{BuildError, Result};

pub const CONFIG_FILE: &str = "hwbuild.toml";

/// Placeholder substituted with the DUT name in `[hw] command`.
const DUT_PLACEHOLDER: &str = "{dut}";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub tools: Tools,
    pub hw: HwConfig,
    pub sim: SimConfig,
}

/// Simulator executables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub vlib: String,
    pub vlog: String,
    pub vsim: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            vlib: "vlib".to_string(),
            vlog: "vlog".to_string(),
            vsim: "vsim".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HwConfig {
    /// argv of the hardware build; `{dut}` is replaced in every element.
    pub command: Vec<String>,
}

impl Default for HwConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "echo".to_string(),
                format!("[HW] Building hardware for {DUT_PLACEHOLDER}"),
            ],
        }
    }
}

impl HwConfig {
    pub fn command_for(&self, dut: &str) -> Vec<String> {
        self.command
            .iter()
            .map(|a| a.replace(DUT_PLACEHOLDER, dut))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// HDL source extension, without the dot.
    pub extension: String,
    /// Always passed to vsim, before the top-level unit.
    pub vsim_args: Vec<String>,
    /// `-do` script for batch runs.
    pub batch_do: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            extension: "sv".to_string(),
            vsim_args: vec!["-voptargs=+acc".to_string()],
            batch_do: "run -all; quit -f".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load `<root>/hwbuild.toml`, or the defaults when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| BuildError::io(format!("Reading {}", path.display()), e))?;
        let cfg = Self::parse(&text).map_err(|message| BuildError::Config {
            path: path.clone(),
            message,
        })?;
        log::debug!("Loaded {}", path.display());
        Ok(cfg)
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        let cfg: Self = toml::from_str(text).map_err(|e| e.message().to_string())?;
        if cfg.hw.command.is_empty() {
            return Err("[hw] command must not be empty".to_string());
        }
        if cfg.sim.extension.is_empty() || cfg.sim.extension.starts_with('.') {
            return Err("[sim] extension must be a bare extension such as \"sv\"".to_string());
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = ToolConfig::load(tmp.path()).unwrap();
        assert_eq!(cfg, ToolConfig::default());
        assert_eq!(cfg.tools.vsim, "vsim");
        assert_eq!(cfg.sim.extension, "sv");
    }

    #[test]
    fn test_partial_override() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[tools]\nvsim = \"/opt/questa/bin/vsim\"\n\n[hw]\ncommand = [\"make\", \"DUT={dut}\"]\n",
        )
        .unwrap();

        let cfg = ToolConfig::load(tmp.path()).unwrap();
        assert_eq!(cfg.tools.vsim, "/opt/questa/bin/vsim");
        assert_eq!(cfg.tools.vlog, "vlog");
        assert_eq!(cfg.hw.command_for("alu"), vec!["make", "DUT=alu"]);
        assert_eq!(cfg.sim, SimConfig::default());
    }

    #[test]
    fn test_default_hw_command_names_dut() {
        let cmd = HwConfig::default().command_for("fifo");
        assert_eq!(cmd, vec!["echo", "[HW] Building hardware for fifo"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[sim]\nextnesion = \"v\"\n").unwrap();
        assert!(matches!(
            ToolConfig::load(tmp.path()),
            Err(BuildError::Config { .. })
        ));
    }

    #[test]
    fn test_empty_hw_command_rejected() {
        assert!(ToolConfig::parse("[hw]\ncommand = []\n").is_err());
    }

    #[test]
    fn test_dotted_extension_rejected() {
        assert!(ToolConfig::parse("[sim]\nextension = \".sv\"\n").is_err());
    }
}
