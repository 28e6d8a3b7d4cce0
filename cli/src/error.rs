//! Errors surfaced by the command-line client.

use std::io;

use jmqp_core::ValidationError;
use thiserror::Error;

/// Every way a single invocation can fail. All of them are terminal.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// The URL or a header could not be turned into a request.
    #[error("could not build request: {0}")]
    RequestConstruction(String),

    /// Connection refused, DNS failure, timeout and the like.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("failed to read response body: {0}")]
    ResponseRead(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl ClientError {
    /// Process exit code: -1 for rejected parameters, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Validation(_) => -1,
            _ => 1,
        }
    }
}
