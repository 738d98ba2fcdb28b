use env_logger::Env;
use std::io::Write;

/// Install the global logger: `[LEVEL] message` on stderr.
///
/// `info` by default, `debug` with `-verbose`; `RUST_LOG` wins over both.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();
}
