//! Client core for the jmqp message broker.
//!
//! # Overview
//! Validates a `RequestParameters` record and encodes it into an
//! `HttpRequest` without touching the network (host-does-IO pattern). The
//! caller executes the round-trip and hands the `HttpResponse` back for
//! rendering.
//!
//! # Design
//! - `validate` is pure and must pass before `encode` is called.
//! - `encode` is deterministic: same parameters, same request.
//! - Types use owned `String` / `Vec` fields so requests can be logged,
//!   compared in tests and moved across threads freely.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod validate;

pub use client::{app_url, describe_request, encode, render_response};
pub use error::ValidationError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Action, AddressMode, RequestParameters};
pub use validate::{validate, validate_with, ExclusivityPolicy};
