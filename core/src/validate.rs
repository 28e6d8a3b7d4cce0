//! Parameter validation.
//!
//! # Design
//! Rules run in a fixed order and the first failure is returned, so the same
//! bad input always yields the same error. Validation is pure and runs before
//! any request is built; nothing reaches the network unless it passes.

use crate::error::ValidationError;
use crate::types::RequestParameters;

/// How strictly the send/read and personal/topic pairs are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExclusivityPolicy {
    /// Exactly one flag of each pair must be set.
    #[default]
    Strict,
    /// Pair checks never fire. Both-set resolves to send/topic and
    /// neither-set to read/personal when encoding.
    Lenient,
}

/// Validate `params` with [`ExclusivityPolicy::Strict`].
pub fn validate(params: &RequestParameters) -> Result<(), ValidationError> {
    validate_with(params, ExclusivityPolicy::Strict)
}

pub fn validate_with(
    params: &RequestParameters,
    policy: ExclusivityPolicy,
) -> Result<(), ValidationError> {
    check(params, policy).inspect_err(|err| {
        tracing::debug!(error = %err, ?policy, "parameters rejected");
    })
}

fn check(params: &RequestParameters, policy: ExclusivityPolicy) -> Result<(), ValidationError> {
    let mandatory = [
        ("name", &params.name),
        ("ip", &params.ip),
        ("appPath", &params.app_path),
    ];
    if let Some((field, _)) = mandatory.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingMandatoryParameter(*field));
    }

    if policy == ExclusivityPolicy::Strict && params.send == params.read {
        return Err(ValidationError::ActionNotExclusive);
    }

    match (params.send, params.message.is_empty()) {
        (true, true) => return Err(ValidationError::MissingMessage),
        (false, false) => return Err(ValidationError::UnexpectedMessage),
        _ => {}
    }

    if policy == ExclusivityPolicy::Strict && params.personal == params.topic {
        return Err(ValidationError::AddressModeNotExclusive);
    }

    if params.port == 0 {
        return Err(ValidationError::MissingPort);
    }

    match (params.topic, params.timeout == 0) {
        (true, true) => Err(ValidationError::MissingTimeout),
        (false, false) => Err(ValidationError::UnexpectedTimeout),
        _ => Ok(()),
    }
}
