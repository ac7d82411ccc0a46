//! Outbound payload for `POST /v1/payment-link`.
//!
//! The wire payload never carries a null-valued key: unset optional fields
//! are left out entirely, `tokenization` is always collapsed to `"yes"` or
//! `"no"`, and the notification flags are always present.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{CreateLinkRequest, PaymentOperation};

const TOKENIZATION_YES: &str = "yes";
const TOKENIZATION_NO: &str = "no";

/// Collapse the tri-state tokenization intent to the gateway's flag.
///
/// Absent, `"0"` and `"no"` map to `"no"`; every other string, including
/// `"false"` and the empty string, maps to `"yes"`.
pub fn normalize_tokenization(value: Option<&str>) -> &'static str {
    match value {
        None | Some("0") | Some("no") => TOKENIZATION_NO,
        Some(_) => TOKENIZATION_YES,
    }
}

#[derive(Serialize)]
struct WireCustomer<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile: Option<&'a str>,
}

impl WireCustomer<'_> {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.mobile.is_none()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload<'a> {
    #[serde(skip_serializing_if = "WireCustomer::is_empty")]
    customer: WireCustomer<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_operation: Option<PaymentOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_reference: Option<&'a str>,
    tokenization: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_methods: Option<&'a [String]>,
    send_email: bool,
    send_sms: bool,
}

/// Build the compact JSON object sent to the gateway.
pub fn build_payload(request: &CreateLinkRequest) -> Result<Map<String, Value>> {
    let wire = WirePayload {
        customer: WireCustomer {
            name: request.customer_name.as_deref(),
            email: request.customer_email.as_deref(),
            mobile: request.customer_mobile.as_deref(),
        },
        lang: request.lang.as_deref(),
        amount: request.amount,
        currency: request.currency.as_deref(),
        payment_operation: request.payment_operation,
        merchant_reference: request.merchant_reference.as_deref(),
        tokenization: normalize_tokenization(request.tokenization.as_deref()),
        expiration_date: request.expiration_date.as_deref(),
        payment_methods: request.payment_methods.as_deref(),
        send_email: request.send_email,
        send_sms: request.send_sms,
    };

    match serde_json::to_value(&wire)? {
        Value::Object(mut map) => {
            // Non-finite amounts serialize as null.
            map.retain(|_, v| !v.is_null());
            Ok(map)
        }
        _ => unreachable!("WirePayload serializes as a JSON object"),
    }
}
