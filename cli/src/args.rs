//! Command-line surface.
//!
//! Long flags are declared with clap. The historical single-dash spellings
//! (`-name bob -send`) are rewritten to `--name bob --send` by
//! [`normalize_args`] before clap sees them.

use std::time::Duration;

use clap::Parser;
use jmqp_core::{ExclusivityPolicy, RequestParameters};

use crate::transport::TransportConfig;

/// Long flags that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "name",
    "ip",
    "app-path",
    "message",
    "send",
    "read",
    "personal",
    "topic",
    "port",
    "timeout",
    "http-timeout",
    "lenient",
    "dry-run",
    "verbose",
    "help",
    "version",
];

/// Flags whose value may follow as the next argument.
const VALUE_FLAGS: &[&str] = &[
    "name",
    "ip",
    "app-path",
    "message",
    "port",
    "timeout",
    "http-timeout",
];

#[derive(Parser, Debug)]
#[command(
    name = "jmqp-client",
    version,
    about = "Send or read a message on a jmqp broker"
)]
pub struct Cli {
    /// Name of the recipient or topic
    #[arg(long, env = "JMQP_NAME", allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Host of the broker
    #[arg(long, env = "JMQP_IP", allow_hyphen_values = true)]
    pub ip: Option<String>,

    /// Application path on the broker, e.g. bajetii/jmqp
    #[arg(long, env = "JMQP_APP_PATH", allow_hyphen_values = true)]
    pub app_path: Option<String>,

    /// Message to send (only with --send)
    #[arg(long, allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Publish a message
    #[arg(long)]
    pub send: bool,

    /// Read a message
    #[arg(long)]
    pub read: bool,

    /// Address a single recipient
    #[arg(long)]
    pub personal: bool,

    /// Address a topic
    #[arg(long)]
    pub topic: bool,

    /// Port of the broker
    #[arg(long, env = "JMQP_PORT", default_value_t = 0)]
    pub port: u16,

    /// Seconds the broker keeps a topic message (only with --topic)
    #[arg(long, default_value_t = 0)]
    pub timeout: u64,

    /// Client-side deadline for the whole HTTP exchange
    #[arg(long, env = "JMQP_HTTP_TIMEOUT", value_name = "SECS")]
    pub http_timeout: Option<u64>,

    /// Skip the send/read and personal/topic exclusivity checks
    #[arg(long)]
    pub lenient: bool,

    /// Print the request instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Log at debug level to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Absent values become empty/zero so the validator reports them.
    pub fn parameters(&self) -> RequestParameters {
        RequestParameters {
            name: self.name.clone().unwrap_or_default(),
            ip: self.ip.clone().unwrap_or_default(),
            app_path: self.app_path.clone().unwrap_or_default(),
            port: self.port,
            send: self.send,
            read: self.read,
            personal: self.personal,
            topic: self.topic,
            message: self.message.clone().unwrap_or_default(),
            timeout: self.timeout,
        }
    }

    pub fn policy(&self) -> ExclusivityPolicy {
        if self.lenient {
            ExclusivityPolicy::Lenient
        } else {
            ExclusivityPolicy::Strict
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.http_timeout.map(Duration::from_secs),
        }
    }
}

/// Rewrite `-flag` / `-flag=value` to their `--` form for known long flags.
///
/// The argument following a value-taking flag is left untouched, as is
/// everything after a bare `--`.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Vec::new();
    let mut expecting_value = false;
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough || expecting_value {
            expecting_value = false;
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let (stem, has_value) = match arg.strip_prefix("--") {
            Some(rest) => (rest, rest.contains('=')),
            None => match arg.strip_prefix('-') {
                Some(rest) => (rest, rest.contains('=')),
                None => {
                    out.push(arg);
                    continue;
                }
            },
        };
        let flag = stem.split('=').next().unwrap_or(stem);
        if !LONG_FLAGS.contains(&flag) {
            out.push(arg);
            continue;
        }

        expecting_value = VALUE_FLAGS.contains(&flag) && !has_value;
        if arg.starts_with("--") {
            out.push(arg);
        } else {
            out.push(format!("-{arg}"));
        }
    }
    out
}
