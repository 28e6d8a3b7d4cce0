//! Stateless request encoder and response renderer for the broker protocol.
//!
//! # Design
//! `encode` turns a validated `RequestParameters` into an `HttpRequest`;
//! `render_response` turns the `HttpResponse` the caller got back into the
//! text shown to the user. Neither touches the network.
//!
//! Reads carry the recipient or topic name in the request body, not in the
//! URL. Brokers depend on that, so it stays.

use std::fmt::Write as _;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Action, AddressMode, RequestParameters};

/// Build the single request described by `params`.
///
/// Expects parameters that already passed [`crate::validate`].
pub fn encode(params: &RequestParameters) -> HttpRequest {
    let action = params.action();
    let mode = params.address_mode();

    let mut headers = vec![("Type".to_string(), mode.as_header().to_string())];
    let (method, body) = match action {
        Action::Send => {
            headers.push(("To".to_string(), params.name.clone()));
            if mode == AddressMode::Topic {
                headers.push(("Timeout".to_string(), params.timeout.to_string()));
            }
            (HttpMethod::Post, params.message.clone())
        }
        Action::Read => (HttpMethod::Get, params.name.clone()),
    };

    let request = HttpRequest {
        method,
        url: app_url(&params.ip, params.port, &params.app_path),
        headers,
        body,
    };
    tracing::debug!(
        method = request.method.as_str(),
        url = %request.url,
        mode = %mode,
        "encoded request"
    );
    request
}

/// `http://{ip}:{port}/{app_path}` with `app_path` cleaned lexically.
pub fn app_url(ip: &str, port: u16, app_path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in app_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        format!("http://{ip}:{port}")
    } else {
        format!("http://{ip}:{port}/{}", segments.join("/"))
    }
}

/// Text shown to the user for a completed exchange. The body is printed
/// verbatim, however long it is.
pub fn render_response(response: &HttpResponse) -> String {
    format!(
        "Response code: {}\nResponse body:\n{}",
        response.status, response.body
    )
}

/// Human-readable dump of a request, used for dry runs.
pub fn describe_request(request: &HttpRequest) -> String {
    let mut out = format!("{} {}\n", request.method.as_str(), request.url);
    for (name, value) in &request.headers {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{name}: {value}");
    }
    out.push('\n');
    out.push_str(&request.body);
    out
}
