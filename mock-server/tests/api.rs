use axum::http::{self, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};
use http_body_util::BodyExt;
use mock_server::{app, DEFAULT_API_KEY};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn basic() -> String {
    format!("Basic {}", STANDARD.encode("merchant:secret"))
}

fn create_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/v1/payment-link")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, basic())
        .body(body.to_string())
        .unwrap()
}

fn lookup_request(token: &str, api_key: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(format!("/v1/payment-link/{token}"));
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(String::new()).unwrap()
}

fn status_request(reference: &str) -> Request<String> {
    Request::builder()
        .uri(format!("/v1/status/{reference}"))
        .header(http::header::AUTHORIZATION, basic())
        .body(String::new())
        .unwrap()
}

// --- create ---

#[tokio::test]
async fn create_link_returns_snake_case_link() {
    let resp = app()
        .oneshot(create_request(r#"{"amount":10,"currency":"SAR","tokenization":"no"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert!(body["payment_link"].as_str().unwrap().starts_with("https://pay.mock.test/l/"));
    assert!(body["paymentLinkToken"].is_string());
    assert_eq!(body["responseCode"], "00000");
}

#[tokio::test]
async fn create_link_without_auth_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/payment-link")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"amount":10,"currency":"SAR"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["responseCode"], "40100");
}

#[tokio::test]
async fn create_link_validation_returns_422_with_field_errors() {
    let resp = app()
        .oneshot(create_request(r#"{"amount":0}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["responseCode"], "42200");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"]["amount"][0], "The amount must be greater than zero.");
    assert_eq!(body["errors"]["currency"][0], "The currency field is required.");
}

// --- lookup ---

#[tokio::test]
async fn lookup_requires_api_key() {
    let resp = app().oneshot(lookup_request("anything", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app().oneshot(lookup_request("anything", Some("wrong"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lookup_unknown_token_returns_404() {
    let resp = app()
        .oneshot(lookup_request("missing", Some(DEFAULT_API_KEY)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["responseMessage"], "Payment link not found");
}

// --- status ---

#[tokio::test]
async fn status_unknown_reference_returns_404() {
    let resp = app().oneshot(status_request("INV-404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["responseCode"], "40400");
}

// --- full lifecycle ---

#[tokio::test]
async fn link_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(create_request(
            r#"{"customer":{"name":"Jane","email":"jane@example.test"},"amount":25.5,"currency":"SAR","merchantReference":"INV-7","paymentOperation":"pay","tokenization":"yes"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let token = created["paymentLinkToken"].as_str().unwrap().to_string();

    // lookup uses camelCase url and snake_case token/reference
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(lookup_request(&token, Some(DEFAULT_API_KEY)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let link = body_json(resp).await;
    assert_eq!(link["paymentLinkUrl"], created["payment_link"]);
    assert_eq!(link["payment_link_token"], token.as_str());
    assert_eq!(link["merchant_reference"], "INV-7");
    assert_eq!(link["status"], "PENDING");
    assert_eq!(link["customer"]["name"], "Jane");

    // status before payment: pending
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(status_request("INV-7"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let status = body_json(resp).await;
    assert_eq!(status["responseCode"], "00001");

    // pay
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!("/mock/pay/{token}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // status after payment: approved, tokenized
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(status_request("INV-7"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let status = body_json(resp).await;
    assert_eq!(status["responseCode"], "00000");
    assert_eq!(status["merchantReference"], "INV-7");
    assert_eq!(status["amount"], 25.5);
    assert_eq!(status["paymentOperation"], "pay");
    assert!(status["cardToken"].is_string());
}
