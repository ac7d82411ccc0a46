//! The network edge: executes an `HttpRequest` and returns an `HttpResponse`.
//!
//! Non-2xx statuses are data, not transport errors; only failures that
//! prevent a response from being read end up in `TransportError`.

use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Anything that can perform one blocking HTTP round-trip.
///
/// A `None` timeout waits indefinitely.
pub trait Transport {
    fn send(&self, request: &HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        (**self).send(request, timeout)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::time::Duration;

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by `ureq`.
    ///
    /// A fresh agent is configured per call so the timeout always matches
    /// the caller's configuration. HTTP error statuses are returned as
    /// responses for the client to interpret.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UreqTransport;

    impl UreqTransport {
        pub fn new() -> Self {
            Self
        }
    }

    impl Transport for UreqTransport {
        fn send(&self, request: &HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();

            let result = match request.method {
                HttpMethod::Get => with_headers(agent.get(&request.url), request).call(),
                HttpMethod::Delete => with_headers(agent.delete(&request.url), request).call(),
                HttpMethod::Post => send_body(with_headers(agent.post(&request.url), request), request),
                HttpMethod::Put => send_body(with_headers(agent.put(&request.url), request), request),
                HttpMethod::Patch => send_body(with_headers(agent.patch(&request.url), request), request),
            };

            let mut response = result.map_err(|e| match e {
                ureq::Error::Timeout(_) => TransportError::Timeout,
                other => TransportError::Connection(other.to_string()),
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError::Body(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    fn send_body(
        builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
        request: &HttpRequest,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        match &request.body {
            Some(body) => builder.send(body.as_bytes()),
            None => builder.send_empty(),
        }
    }
}
