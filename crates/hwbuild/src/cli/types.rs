use clap::Parser;

use crate::flow::BuildRequest;

#[derive(Parser, Debug)]
#[command(name = "hwbuild")]
#[command(about = "Systematic build manager for FPGA / simulation flows")]
pub struct Cli {
    #[arg(
        long = "dut",
        value_name = "NAME",
        help = "Design under test (DUT) name under verif/*"
    )]
    pub dut: String,

    #[arg(
        long = "top",
        value_name = "NAME",
        help = "Top-level module name (default: <dut>_tb)"
    )]
    pub top: Option<String>,

    #[arg(
        long = "cfg",
        value_name = "NAME",
        help = "Optional configuration file name (reserved)"
    )]
    pub cfg: Option<String>,

    #[arg(long = "hw", help = "Run hardware build")]
    pub hw: bool,

    #[arg(long = "sim", help = "Run simulation")]
    pub sim: bool,

    #[arg(long = "gui", help = "Open simulation GUI (vsim)")]
    pub gui: bool,

    #[arg(
        long = "clean",
        help = "Clean target directory for DUT and exit; other phases are skipped"
    )]
    pub clean: bool,

    #[arg(long = "verbose", help = "Echo each tool command line before running it")]
    pub verbose: bool,
}

impl Cli {
    pub fn into_request(self) -> BuildRequest {
        BuildRequest {
            dut: self.dut,
            top: self.top,
            cfg: self.cfg,
            clean: self.clean,
            hw: self.hw,
            sim: self.sim,
            gui: self.gui,
            verbose: self.verbose,
        }
    }
}
