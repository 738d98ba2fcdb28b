mod types;

use clap::{CommandFactory, Parser};
use std::ffi::OsString;

pub use types::Cli;

/// Parse the process arguments, accepting the single-dash long flags
/// (`-dut alu -sim`) used by the flow scripts as well as `--dut alu --sim`.
pub fn parse() -> Cli {
    Cli::parse_from(normalize_args(std::env::args_os()))
}

/// Rewrite `-name` / `-name=value` into `--name` / `--name=value` for every
/// long option `Cli` declares. Anything else passes through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cmd = Cli::command();
    let longs: Vec<&str> = cmd.get_arguments().filter_map(|a| a.get_long()).collect();

    let mut out = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 {
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            longs.contains(&name).then(|| OsString::from(format!("-{s}")))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn test_single_dash_long_flags() {
        let cli = parse_from(&["hwbuild", "-dut", "alu", "-sim", "-gui", "-verbose"]).unwrap();
        assert_eq!(cli.dut, "alu");
        assert!(cli.sim);
        assert!(cli.gui);
        assert!(cli.verbose);
        assert!(!cli.hw);
        assert!(!cli.clean);
        assert!(cli.top.is_none());
    }

    #[test]
    fn test_double_dash_and_equals_forms() {
        let cli = parse_from(&["hwbuild", "--dut", "fifo", "-top=fifo_smoke", "--hw"]).unwrap();
        assert_eq!(cli.dut, "fifo");
        assert_eq!(cli.top.as_deref(), Some("fifo_smoke"));
        assert!(cli.hw);
    }

    #[test]
    fn test_cfg_is_accepted() {
        let cli = parse_from(&["hwbuild", "-dut", "alu", "-cfg", "fast"]).unwrap();
        assert_eq!(cli.cfg.as_deref(), Some("fast"));
        let req = cli.into_request();
        assert_eq!(req.cfg.as_deref(), Some("fast"));
    }

    #[test]
    fn test_dut_is_required() {
        assert!(parse_from(&["hwbuild", "-sim"]).is_err());
    }

    #[test]
    fn test_unknown_single_dash_left_alone() {
        let args = normalize_args(["hwbuild", "-x", "-dut", "alu", "plain"]);
        assert_eq!(args, vec!["hwbuild", "-x", "--dut", "alu", "plain"]);
    }

    #[test]
    fn test_into_request_carries_flags() {
        let req = parse_from(&["hwbuild", "-dut", "alu", "-clean", "-hw", "-sim"])
            .unwrap()
            .into_request();
        assert_eq!(req.dut, "alu");
        assert!(req.clean && req.hw && req.sim);
        assert!(!req.gui);
    }
}
