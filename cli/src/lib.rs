//! Command-line client for the jmqp message broker.
//!
//! `run` wires the pieces together: flags → `RequestParameters` →
//! validation → encoding → one HTTP exchange → rendered response. Nothing is
//! sent unless validation passes.

pub mod args;
pub mod error;
pub mod telemetry;
pub mod transport;

use std::io::Write;

use jmqp_core::{describe_request, encode, render_response, validate_with};

pub use args::{normalize_args, Cli};
pub use error::ClientError;
pub use transport::{execute, TransportConfig};

/// Run one invocation, writing user-facing output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), ClientError> {
    let params = cli.parameters();
    validate_with(&params, cli.policy())?;

    let request = encode(&params);
    if cli.dry_run {
        writeln!(out, "{}", describe_request(&request))?;
        return Ok(());
    }

    let response = execute(&request, &cli.transport_config())?;
    if !response.is_success() {
        tracing::warn!(status = response.status, "broker returned an error status");
    }
    writeln!(out, "{}", render_response(&response))?;
    Ok(())
}
