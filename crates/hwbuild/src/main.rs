//! # hwbuild
//!
//! Build manager for FPGA / simulation flows.
//!
//! ## Usage
//!
//! ```bash
//! hwbuild -dut alu -sim            # vlib + vlog (RTL, testbench) + batch vsim
//! hwbuild -dut alu -sim -gui       # same, but open the vsim GUI
//! hwbuild -dut alu -hw             # hardware build
//! hwbuild -dut alu -clean          # remove target/alu and stop
//! ```
//!
//! ## Layout
//!
//! - `verif/<dut>/`: testbenches; each subdirectory is a legal DUT
//! - `rtl/<dut>/*.sv`: RTL sources
//! - `target/<dut>/work/`: simulator work library, recreated per sim run
//! - `target/<dut>/log/*.log`: captured tool output per phase

use std::io::{self, Write};
use std::process::ExitCode;

mod app;
mod cli;
mod config;
mod dut;
mod error;
mod exec;
mod flow;
mod util;

fn main() -> ExitCode {
    let cli = crate::cli::parse();
    crate::util::logging::init(cli.verbose);

    let status = exit_status(crate::app::run(cli), &mut io::stderr().lock());
    ExitCode::from(status)
}

/// 0 on success; otherwise `[ERROR] <message>` goes to `err` and the status is 1.
fn exit_status(result: anyhow::Result<()>, err: &mut impl Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            // If stderr is gone the status still reports the failure.
            let _ = writeln!(err, "[ERROR] {e:#}");
            1
        }
    }
}
