//! Response decoders for the three gateway response shapes.
//!
//! The gateway is inconsistent about key naming between endpoints and API
//! versions (`payment_link`, `paymentLinkUrl`, `payment_link_url`, ...).
//! Each logical field is looked up through an ordered list of candidate keys
//! so downstream code sees one canonical shape per operation. Unknown keys
//! are ignored and JSON `null` is treated the same as a missing key.

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::types::{CreateLinkResult, Customer, LinkLookupResult, StatusResult};

const PAYMENT_LINK_KEYS: &[&str] = &["payment_link", "paymentLinkUrl", "payment_link_url"];
const PAYMENT_LINK_TOKEN_KEYS: &[&str] = &["paymentLinkToken", "payment_link_token"];
const MERCHANT_REFERENCE_KEYS: &[&str] = &["merchantReference", "merchant_reference"];

const UNKNOWN_CODE: &str = "UNKNOWN";
const UNKNOWN_MESSAGE: &str = "Unknown response";

/// First candidate key whose value is present and non-null.
pub fn first_present<'a>(data: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| data.get(*key))
        .find(|value| !value.is_null())
}

/// Scalar rendered as text. Numbers keep their JSON spelling; arrays,
/// objects and booleans are not text.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(data: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(data, keys).and_then(as_text)
}

fn amount(data: &Map<String, Value>) -> Option<f64> {
    match first_present(data, &["amount"])? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn customer(data: &Map<String, Value>) -> Customer {
    match data.get("customer") {
        Some(Value::Object(c)) => Customer {
            name: text(c, &["name"]),
            email: text(c, &["email"]),
            mobile: text(c, &["mobile"]),
        },
        _ => Customer::default(),
    }
}

/// Decode a create-link response. The link URL is the one required field.
pub fn decode_create_link_result(data: &Map<String, Value>) -> Result<CreateLinkResult, DecodeError> {
    let payment_link = match first_present(data, PAYMENT_LINK_KEYS) {
        Some(Value::String(link)) if !link.is_empty() => link.clone(),
        _ => return Err(DecodeError::MissingField { field: "paymentLinkUrl" }),
    };

    Ok(CreateLinkResult {
        payment_link,
        payment_link_token: text(data, PAYMENT_LINK_TOKEN_KEYS),
        response_code: text(data, &["responseCode"]),
        response_message: text(data, &["responseMessage"]),
    })
}

/// Decode a link lookup response. Never fails.
pub fn decode_link_lookup_result(data: &Map<String, Value>) -> LinkLookupResult {
    LinkLookupResult {
        payment_link: text(data, PAYMENT_LINK_KEYS),
        payment_link_token: text(data, PAYMENT_LINK_TOKEN_KEYS),
        merchant_reference: text(data, MERCHANT_REFERENCE_KEYS),
        amount: amount(data),
        currency: text(data, &["currency"]),
        status: text(data, &["status"]),
        customer: customer(data),
        response_code: text(data, &["responseCode"]),
        response_message: text(data, &["responseMessage"]),
    }
}

/// Decode a status response, filling the synthetic defaults for the
/// response code, message, merchant reference, amount and currency.
pub fn decode_status_result(data: &Map<String, Value>) -> StatusResult {
    StatusResult {
        response_code: text(data, &["responseCode"]).unwrap_or_else(|| UNKNOWN_CODE.to_string()),
        response_message: text(data, &["responseMessage"])
            .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
        merchant_reference: text(data, &["merchantReference"]).unwrap_or_default(),
        amount: amount(data).unwrap_or(0.0),
        currency: text(data, &["currency"]).unwrap_or_default(),
        provider_id: text(data, &["hyperpayId"]),
        payment_method: text(data, &["paymentMethod"]),
        customer: customer(data),
        payment_operation: text(data, &["paymentOperation"]),
        acquirer_response_code: text(data, &["acquirerResponseCode"]),
        transaction_date: text(data, &["transactionDate"]),
        rrn: text(data, &["rrn"]),
        authorization_code: text(data, &["authorizationCode"]),
        card_token: text(data, &["cardToken"]),
        agreement_id: text(data, &["agreementId"]),
    }
}
