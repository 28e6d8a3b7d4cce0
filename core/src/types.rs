//! The parameter record every invocation is built from.
//!
//! # Design
//! `RequestParameters` mirrors the command-line surface field for field, so
//! the validator can reason about illegal combinations (both actions set,
//! message without send, ...) that a richer enum model could not even
//! represent. The enums below are read-only views derived from the flags once
//! validation has passed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat, immutable set of inputs for a single send or read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestParameters {
    /// Recipient or topic identifier.
    pub name: String,
    pub ip: String,
    #[serde(rename = "appPath")]
    pub app_path: String,
    pub port: u16,
    pub send: bool,
    pub read: bool,
    pub personal: bool,
    pub topic: bool,
    pub message: String,
    /// Seconds the broker should hold a topic message. Not a client timeout.
    pub timeout: u64,
}

/// What the request does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Send,
    Read,
}

/// Who the request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Personal,
    Topic,
}

impl RequestParameters {
    /// `Send` whenever the send flag is set, `Read` otherwise.
    pub fn action(&self) -> Action {
        if self.send {
            Action::Send
        } else {
            Action::Read
        }
    }

    /// `Topic` whenever the topic flag is set, `Personal` otherwise.
    pub fn address_mode(&self) -> AddressMode {
        if self.topic {
            AddressMode::Topic
        } else {
            AddressMode::Personal
        }
    }
}

impl AddressMode {
    /// Value carried in the `Type` header.
    pub fn as_header(self) -> &'static str {
        match self {
            AddressMode::Personal => "Personal",
            AddressMode::Topic => "Topic",
        }
    }
}

impl fmt::Display for AddressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_header())
    }
}
