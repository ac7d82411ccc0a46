//! Domain DTOs for the PTSP payment-link API.
//!
//! # Design
//! Requests are plain structs with public fields; construct them with named
//! fields and `..Default::default()`. Result types are immutable value
//! objects produced by the decoders in `decode`. They are `Serialize` so a
//! caller can re-export the canonical camelCase shape, with absent optional
//! fields left out.

use serde::{Deserialize, Serialize};

/// Whether the gateway captures the funds immediately or only authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOperation {
    Pay,
    Authorize,
}

/// Input for creating a payment link.
///
/// Nothing here is validated client-side; malformed emails, currencies or
/// dates are rejected by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLinkRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_mobile: Option<String>,
    pub lang: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_operation: Option<PaymentOperation>,
    pub merchant_reference: Option<String>,
    /// Tri-state intent. `None`, `"0"` and `"no"` all mean "do not tokenize".
    pub tokenization: Option<String>,
    /// Passed through verbatim, e.g. `"2026-09-26 05:10:00"`.
    pub expiration_date: Option<String>,
    pub payment_methods: Option<Vec<String>>,
    pub send_email: bool,
    pub send_sms: bool,
}

/// Result of `POST /v1/payment-link`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResult {
    pub payment_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
}

/// Customer block embedded in lookup and status responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Customer {
    #[serde(rename = "customerName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "customerEmail", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "customerMobile", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// Result of `GET /v1/payment-link/{token}`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkLookupResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
}

/// Response code the gateway uses for a completed transaction.
pub const SUCCESS_CODE: &str = "00000";

/// Result of `GET /v1/status/{merchantReference}`.
///
/// The only result type with synthetic defaults: see
/// `decode::decode_status_result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    pub response_code: String,
    pub response_message: String,
    pub merchant_reference: String,
    pub amount: f64,
    pub currency: String,
    /// Gateway-side transaction identifier.
    #[serde(rename = "hyperpayId", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquirer_response_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_id: Option<String>,
}

impl StatusResult {
    pub fn is_successful(&self) -> bool {
        self.response_code == SUCCESS_CODE
    }
}
