//! Executes an encoded `HttpRequest` over the network with `ureq`.
//!
//! Non-2xx statuses are data, not errors: the caller prints whatever the
//! broker answered. The response body is drained to end-of-stream.

use std::io::Read;
use std::time::Duration;

use jmqp_core::{HttpMethod, HttpRequest, HttpResponse};
use ureq::http::Uri;

use crate::error::ClientError;

/// Settings for the HTTP agent. Applies to the whole exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
    /// Overall deadline for the exchange; `None` keeps ureq's defaults.
    pub timeout: Option<Duration>,
}

/// Send `request` once and return the full response.
pub fn execute(request: &HttpRequest, config: &TransportConfig) -> Result<HttpResponse, ClientError> {
    check_url(&request.url)?;

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(config.timeout)
        .build()
        .new_agent();

    tracing::debug!(method = request.method.as_str(), url = %request.url, "dispatching request");

    let result = match request.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            // Reads carry the target name in the body.
            builder.force_send_body().send(request.body.as_bytes())
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.send(request.body.as_bytes())
        }
    };

    let mut response = result.map_err(classify)?;
    let status = response.status().as_u16();

    let mut bytes = Vec::new();
    response
        .body_mut()
        .as_reader()
        .read_to_end(&mut bytes)
        .map_err(ClientError::ResponseRead)?;

    tracing::info!(status, bytes = bytes.len(), "response received");

    Ok(HttpResponse {
        status,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn check_url(url: &str) -> Result<(), ClientError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| ClientError::RequestConstruction(format!("invalid URL '{url}': {e}")))?;
    if uri.host().is_none() {
        return Err(ClientError::RequestConstruction(format!(
            "invalid URL '{url}': missing host"
        )));
    }
    Ok(())
}

fn classify(err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::Http(e) => ClientError::RequestConstruction(e.to_string()),
        ureq::Error::BadUri(e) => ClientError::RequestConstruction(e),
        other => ClientError::Transport(other.to_string()),
    }
}
