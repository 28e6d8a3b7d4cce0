//! `jmqp-client`: send or read one broker message and exit.

use clap::Parser;
use jmqp_cli::{normalize_args, telemetry, Cli};

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    if let Err(err) = telemetry::init(cli.verbose) {
        eprintln!("warning: {err:#}");
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = jmqp_cli::run(&cli, &mut stdout) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
