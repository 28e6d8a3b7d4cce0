//! Error types for parameter validation.
//!
//! Each variant corresponds to one rule of the validator and is returned as
//! soon as that rule fails; errors are never aggregated.

use thiserror::Error;

/// Why a `RequestParameters` value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of `name`, `ip` or `appPath` is empty. Holds the field name.
    #[error("mandatory parameter '{0}' was not provided")]
    MissingMandatoryParameter(&'static str),

    #[error("one and only one of 'send' or 'read' must be provided")]
    ActionNotExclusive,

    #[error("the 'message' parameter must be provided when 'send' is set")]
    MissingMessage,

    #[error("the 'message' parameter must only be provided when 'send' is set")]
    UnexpectedMessage,

    #[error("one and only one of 'personal' or 'topic' must be provided")]
    AddressModeNotExclusive,

    #[error("a non-zero value for 'port' must be provided")]
    MissingPort,

    #[error("the 'timeout' parameter is required when 'topic' is set")]
    MissingTimeout,

    #[error("the 'timeout' parameter must only be provided when 'topic' is set")]
    UnexpectedTimeout,
}
