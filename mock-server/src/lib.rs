//! In-memory stand-in for the PTSP payment-link gateway.
//!
//! Reproduces the parts of the real API a client has to cope with: mixed
//! snake_case / camelCase response keys per endpoint, Basic Auth on create
//! and status, an `x-api-key` header on lookup, and error bodies in both the
//! `responseCode`/`responseMessage` and `message`/`errors` styles.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_USERNAME: &str = "merchant";
pub const DEFAULT_PASSWORD: &str = "secret";
pub const DEFAULT_API_KEY: &str = "link-api-key";

const MOCK_TRANSACTION_DATE: &str = "2026-09-26 05:10:00";

/// Credentials the mock accepts.
#[derive(Clone, Debug)]
pub struct MockCredentials {
    pub username: String,
    pub password: String,
    pub api_key: String,
}

impl Default for MockCredentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

/// Body of `POST /v1/payment-link`. Everything is optional at the parse
/// level so validation failures come back as gateway-style 422s.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLink {
    pub customer: Option<Customer>,
    pub lang: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_operation: Option<String>,
    pub merchant_reference: Option<String>,
    pub tokenization: Option<String>,
    pub expiration_date: Option<String>,
    pub payment_methods: Option<Vec<String>>,
    pub send_email: bool,
    pub send_sms: bool,
}

/// A stored payment link.
#[derive(Clone, Debug)]
pub struct PaymentLink {
    pub token: String,
    pub url: String,
    pub merchant_reference: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub customer: Customer,
    pub payment_operation: Option<String>,
    pub tokenization: String,
}

#[derive(Clone)]
pub struct AppState {
    credentials: Arc<MockCredentials>,
    links: Arc<RwLock<HashMap<String, PaymentLink>>>,
}

pub fn app() -> Router {
    app_with(MockCredentials::default())
}

pub fn app_with(credentials: MockCredentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        links: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/v1/payment-link", post(create_link))
        .route("/v1/payment-link/{token}", get(get_link))
        .route("/v1/status/{merchant_reference}", get(get_status))
        .route("/mock/pay/{token}", post(pay_link))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Reply = (StatusCode, Json<Value>);

fn reply(status: StatusCode, body: Value) -> Reply {
    (status, Json(body))
}

fn unauthorized(message: &str) -> Reply {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({"responseCode": "40100", "responseMessage": message}),
    )
}

fn basic_auth_ok(headers: &HeaderMap, credentials: &MockCredentials) -> bool {
    let Some(encoded) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
    else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded) else {
        return false;
    };
    decoded == format!("{}:{}", credentials.username, credentials.password).as_bytes()
}

fn validate(input: &CreateLink) -> Map<String, Value> {
    let mut errors = Map::new();
    match input.amount {
        Some(amount) if amount > 0.0 => {}
        Some(_) => {
            errors.insert("amount".into(), json!(["The amount must be greater than zero."]));
        }
        None => {
            errors.insert("amount".into(), json!(["The amount field is required."]));
        }
    }
    if input.currency.as_deref().map_or(true, str::is_empty) {
        errors.insert("currency".into(), json!(["The currency field is required."]));
    }
    if let Some(t) = &input.tokenization {
        if t != "yes" && t != "no" {
            errors.insert("tokenization".into(), json!(["The tokenization must be yes or no."]));
        }
    }
    errors
}

async fn create_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateLink>,
) -> Reply {
    if !basic_auth_ok(&headers, &state.credentials) {
        return unauthorized("Unauthorized");
    }

    let errors = validate(&input);
    if !errors.is_empty() {
        tracing::info!(fields = errors.len(), "rejecting payment link request");
        return reply(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"responseCode": "42200", "message": "Validation failed", "errors": errors}),
        );
    }

    let token = Uuid::new_v4().simple().to_string();
    let link = PaymentLink {
        url: format!("https://pay.mock.test/l/{token}"),
        token: token.clone(),
        merchant_reference: input.merchant_reference,
        amount: input.amount.unwrap_or_default(),
        currency: input.currency.unwrap_or_default(),
        status: "PENDING".to_string(),
        customer: input.customer.unwrap_or_default(),
        payment_operation: input.payment_operation,
        tokenization: input.tokenization.unwrap_or_else(|| "no".to_string()),
    };
    let body = json!({
        "payment_link": link.url,
        "paymentLinkToken": link.token,
        "responseCode": "00000",
        "responseMessage": "Payment link created"
    });
    state.links.write().await.insert(token, link);
    reply(StatusCode::CREATED, body)
}

async fn get_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Reply {
    let key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if key != Some(state.credentials.api_key.as_str()) {
        return unauthorized("Invalid API key");
    }

    let links = state.links.read().await;
    let Some(link) = links.get(&token) else {
        return reply(
            StatusCode::NOT_FOUND,
            json!({"responseCode": "40400", "responseMessage": "Payment link not found"}),
        );
    };
    reply(
        StatusCode::OK,
        json!({
            "paymentLinkUrl": link.url,
            "payment_link_token": link.token,
            "merchant_reference": link.merchant_reference,
            "amount": link.amount,
            "currency": link.currency,
            "status": link.status,
            "customer": link.customer,
            "responseCode": "00000",
            "responseMessage": "Success"
        }),
    )
}

async fn get_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(merchant_reference): Path<String>,
) -> Reply {
    if !basic_auth_ok(&headers, &state.credentials) {
        return unauthorized("Unauthorized");
    }

    let links = state.links.read().await;
    let Some(link) = links
        .values()
        .find(|l| l.merchant_reference.as_deref() == Some(merchant_reference.as_str()))
    else {
        return reply(
            StatusCode::NOT_FOUND,
            json!({"responseCode": "40400", "responseMessage": "Transaction not found"}),
        );
    };

    if link.status != "PAID" {
        return reply(
            StatusCode::OK,
            json!({
                "responseCode": "00001",
                "responseMessage": "Transaction pending",
                "merchantReference": link.merchant_reference,
                "amount": link.amount,
                "currency": link.currency,
                "customer": link.customer
            }),
        );
    }

    let mut body = json!({
        "responseCode": "00000",
        "responseMessage": "Transaction approved",
        "hyperpayId": format!("hp-{}", &link.token[..12]),
        "paymentMethod": "VISA",
        "merchantReference": link.merchant_reference,
        "amount": link.amount,
        "currency": link.currency,
        "customer": link.customer,
        "paymentOperation": link.payment_operation,
        "acquirerResponseCode": "00",
        "transactionDate": MOCK_TRANSACTION_DATE,
        "rrn": "612345678901",
        "authorizationCode": "A1B2C3"
    });
    if link.tokenization == "yes" {
        body["cardToken"] = json!(format!("card-{}", &link.token[..8]));
    }
    reply(StatusCode::OK, body)
}

/// Test hook: mark a link as paid so status lookups report success.
async fn pay_link(State(state): State<AppState>, Path(token): Path<String>) -> StatusCode {
    match state.links.write().await.get_mut(&token) {
        Some(link) => {
            link.status = "PAID".to_string();
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
