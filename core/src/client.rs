//! Stateless HTTP request builder and response parser for the PTSP API.
//!
//! # Design
//! `PtspClient` holds only resolved configuration and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `ApiClient` wires the two together over a `Transport`;
//! hosts with their own HTTP stack can call the halves directly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::decode::{decode_create_link_result, decode_link_lookup_result, decode_status_result};
use crate::error::{ApiError, Result};
use crate::error_format::format_error_message;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::payload::build_payload;
use crate::types::{CreateLinkRequest, CreateLinkResult, LinkLookupResult, StatusResult};

pub const CREATE_LINK_PATH: &str = "/v1/payment-link";
pub const LINK_PATH_PREFIX: &str = "/v1/payment-link/";
pub const STATUS_PATH_PREFIX: &str = "/v1/status/";

/// How a request authenticates against the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth<'a> {
    /// `authorization: Basic ...` from the configured credentials.
    Basic,
    /// `x-api-key` header, used by the link lookup endpoint.
    ApiKey(&'a str),
}

/// Synchronous, stateless client for the PTSP payment-link API.
#[derive(Debug, Clone)]
pub struct PtspClient {
    config: ClientConfig,
}

impl PtspClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an arbitrary gateway request from a verb name.
    ///
    /// For callers that do their own IO and need an endpoint without a
    /// typed `build_*` method; the typed operations never go through here.
    /// Fails with `ApiError::UnsupportedMethod` for verbs outside
    /// GET/POST/PUT/PATCH/DELETE, before anything is sent.
    pub fn build_request(
        &self,
        method: &str,
        base_url: &str,
        path: &str,
        body: Option<&Map<String, Value>>,
        auth: Auth<'_>,
    ) -> Result<HttpRequest> {
        let method: HttpMethod = method.parse()?;
        let body = body.map(serde_json::to_string).transpose()?;
        Ok(self.request(method, join_url(base_url, path), body, auth))
    }

    pub fn build_create_payment_link(&self, input: &CreateLinkRequest) -> Result<HttpRequest> {
        let body = serde_json::to_string(&build_payload(input)?)?;
        Ok(self.request(
            HttpMethod::Post,
            join_url(&self.config.base_url, CREATE_LINK_PATH),
            Some(body),
            Auth::Basic,
        ))
    }

    /// Link lookup against the configured base URL.
    pub fn build_get_payment_link(&self, token: &str, api_key: &str) -> HttpRequest {
        self.build_get_payment_link_at(&self.config.base_url, token, api_key)
    }

    /// Link lookup against a caller-specified base URL.
    pub fn build_get_payment_link_at(&self, base_url: &str, token: &str, api_key: &str) -> HttpRequest {
        let path = format!("{LINK_PATH_PREFIX}{}", urlencoding::encode(token));
        self.request(HttpMethod::Get, join_url(base_url, &path), None, Auth::ApiKey(api_key))
    }

    pub fn build_get_status(&self, merchant_reference: &str) -> HttpRequest {
        let path = format!("{STATUS_PATH_PREFIX}{}", urlencoding::encode(merchant_reference));
        self.request(
            HttpMethod::Get,
            join_url(&self.config.base_url, &path),
            None,
            Auth::Basic,
        )
    }

    pub fn parse_create_payment_link(&self, response: HttpResponse) -> Result<CreateLinkResult> {
        let data = json_object(&response)?;
        Ok(decode_create_link_result(&data)?)
    }

    pub fn parse_get_payment_link(&self, response: HttpResponse) -> Result<LinkLookupResult> {
        let data = json_object(&response)?;
        Ok(decode_link_lookup_result(&data))
    }

    pub fn parse_get_status(&self, response: HttpResponse) -> Result<StatusResult> {
        let data = json_object(&response)?;
        Ok(decode_status_result(&data))
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>, auth: Auth<'_>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        match auth {
            Auth::Basic => headers.push(("authorization".to_string(), self.basic_auth())),
            Auth::ApiKey(key) => headers.push(("x-api-key".to_string(), key.to_string())),
        }

        debug!(%method, %url, has_body = body.is_some(), "built gateway request");
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.config.username, self.config.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Route a response to its JSON object, or to the matching `ApiError`.
///
/// Non-2xx responses get a message composed from the error body; 2xx
/// responses must carry a JSON object.
fn json_object(response: &HttpResponse) -> Result<Map<String, Value>> {
    if !response.is_success() {
        let fallback = format!("HTTP request returned status code {}", response.status);
        let message = format_error_message(response.status, Some(&response.body), &fallback);
        warn!(status = response.status, %message, "gateway returned an error");
        return Err(ApiError::Http {
            status: response.status,
            message,
        });
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => {
            warn!(status = response.status, "gateway returned a non-object body");
            Err(ApiError::InvalidResponseFormat {
                status: response.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::Environment;
    use crate::error::DecodeError;

    fn client() -> PtspClient {
        PtspClient::new(
            ClientConfig::new(Environment::Sandbox, "merchant", "secret").with_base_url("http://localhost:3000"),
        )
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_create_payment_link_produces_correct_request() {
        let input = CreateLinkRequest {
            amount: Some(10.0),
            currency: Some("SAR".to_string()),
            ..CreateLinkRequest::default()
        };
        let req = client().build_create_payment_link(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/v1/payment-link");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), Some("application/json"));
        // base64("merchant:secret")
        assert_eq!(req.header("authorization"), Some("Basic bWVyY2hhbnQ6c2VjcmV0"));
        assert_eq!(req.header("x-api-key"), None);

        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"amount": 10.0, "currency": "SAR", "tokenization": "no", "sendEmail": false, "sendSms": false})
        );
    }

    #[test]
    fn build_get_payment_link_uses_api_key() {
        let req = client().build_get_payment_link("tok-1", "key-1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/v1/payment-link/tok-1");
        assert_eq!(req.header("x-api-key"), Some("key-1"));
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_payment_link_at_other_host() {
        let req = client().build_get_payment_link_at("https://links.example.test/", "tok-1", "key-1");
        assert_eq!(req.url, "https://links.example.test/v1/payment-link/tok-1");
    }

    #[test]
    fn build_get_status_encodes_reference() {
        let req = client().build_get_status("INV 1/2");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/v1/status/INV%201%2F2");
        assert!(req.header("authorization").unwrap().starts_with("Basic "));
    }

    #[test]
    fn build_request_rejects_unknown_verb() {
        let err = client()
            .build_request("TRACE", "http://localhost:3000", "/v1/status/x", None, Auth::Basic)
            .unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedMethod(ref m) if m == "TRACE"));
    }

    #[test]
    fn build_request_accepts_patch_with_body() {
        let body = json!({"note": "x"});
        let req = client()
            .build_request(
                "patch",
                "http://localhost:3000",
                "/v1/payment-link/tok",
                body.as_object(),
                Auth::ApiKey("k"),
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.body.as_deref(), Some(r#"{"note":"x"}"#));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn parse_create_payment_link_success() {
        let resp = response(
            201,
            r#"{"payment_link":"https://pay.test/l/1","paymentLinkToken":"tok-1","responseCode":"00000"}"#,
        );
        let result = client().parse_create_payment_link(resp).unwrap();
        assert_eq!(result.payment_link, "https://pay.test/l/1");
        assert_eq!(result.payment_link_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn parse_create_payment_link_missing_url() {
        let resp = response(200, r#"{"responseCode":"00000"}"#);
        let err = client().parse_create_payment_link(resp).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Decode(DecodeError::MissingField { field: "paymentLinkUrl" })
        ));
    }

    #[test]
    fn parse_error_status_formats_message() {
        let resp = response(
            422,
            r#"{"responseCode":"42200","message":"Validation failed","errors":{"amount":["The amount must be positive."]}}"#,
        );
        let err = client().parse_create_payment_link(resp).unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.to_string(),
            "[42200] Validation failed | The amount must be positive."
        );
    }

    #[test]
    fn parse_error_status_with_html_body_uses_fallback() {
        let resp = response(502, "<html>Bad Gateway</html>");
        let err = client().parse_get_status(resp).unwrap_err();
        assert_eq!(err.to_string(), "HTTP request returned status code 502");
    }

    #[test]
    fn parse_success_with_non_object_body_is_invalid() {
        for body in ["[]", "\"ok\"", "", "not json"] {
            let err = client().parse_get_payment_link(response(200, body)).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidResponseFormat { status: 200 }),
                "{body:?}"
            );
        }
    }

    #[test]
    fn parse_get_status_defaults() {
        let status = client().parse_get_status(response(200, "{}")).unwrap();
        assert_eq!(status.response_code, "UNKNOWN");
        assert!(!status.is_successful());
    }
}
