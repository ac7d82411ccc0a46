//! One-call operations: build, send, parse.

use tracing::{error, info_span};

use crate::client::PtspClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateLinkRequest, CreateLinkResult, LinkLookupResult, StatusResult};

/// PTSP client bound to a transport.
///
/// Holds only read-only configuration, so one instance can serve
/// independent callers. Each call is a single request with no retries.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: PtspClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl ApiClient<crate::transport::UreqTransport> {
    /// Client over the default blocking transport.
    pub fn with_default_transport(config: ClientConfig) -> Self {
        Self::new(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: PtspClient::new(config),
            transport,
        }
    }

    /// The underlying request builder / response parser.
    pub fn inner(&self) -> &PtspClient {
        &self.client
    }

    /// `POST /v1/payment-link` with Basic Auth.
    pub fn create_payment_link(&self, request: &CreateLinkRequest) -> Result<CreateLinkResult> {
        let _span = info_span!("create_payment_link").entered();
        let http_request = self.client.build_create_payment_link(request)?;
        let response = self.execute(&http_request)?;
        self.client.parse_create_payment_link(response)
    }

    /// `GET /v1/payment-link/{token}` with the `x-api-key` header.
    pub fn get_payment_link_by_token(&self, token: &str, api_key: &str) -> Result<LinkLookupResult> {
        let _span = info_span!("get_payment_link_by_token", token).entered();
        let http_request = self.client.build_get_payment_link(token, api_key);
        let response = self.execute(&http_request)?;
        self.client.parse_get_payment_link(response)
    }

    /// Same as [`ApiClient::get_payment_link_by_token`] against another host.
    pub fn get_payment_link_by_token_at(
        &self,
        base_url: &str,
        token: &str,
        api_key: &str,
    ) -> Result<LinkLookupResult> {
        let _span = info_span!("get_payment_link_by_token", token, base_url).entered();
        let http_request = self.client.build_get_payment_link_at(base_url, token, api_key);
        let response = self.execute(&http_request)?;
        self.client.parse_get_payment_link(response)
    }

    /// `GET /v1/status/{merchantReference}` with Basic Auth.
    pub fn get_status_by_merchant_reference(&self, merchant_reference: &str) -> Result<StatusResult> {
        let _span = info_span!("get_status_by_merchant_reference", merchant_reference).entered();
        let http_request = self.client.build_get_status(merchant_reference);
        let response = self.execute(&http_request)?;
        self.client.parse_get_status(response)
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.transport
            .send(request, self.client.config().timeout)
            .map_err(|e| {
                error!(method = %request.method, url = %request.url, error = %e, "transport failure");
                e.into()
            })
    }
}
