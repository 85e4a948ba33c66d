//! Integration tests for the `orders/create` webhook endpoint.
//!
//! Drives the full router in-process and stands in for the Shopify Admin API
//! with a mock server, checking both the response sent to the webhook sender
//! and whether an order update went out.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pickup_api::{create_router, crypto::compute_signature_base64, AppState};
use pickup_core::StoreDirectory;
use pickup_shopify::{ClientConfig, OrderUpdateClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

const SECRET: &str = "whsec_test";
const ORDER_PATH: &str = "/admin/api/2024-01/orders/820982911946154508.json";

fn app(shopify: &MockServer) -> Router {
    let client = OrderUpdateClient::new(ClientConfig {
        base_url: shopify.uri(),
        access_token: "shpat_test".to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
    .expect("client");

    create_router(AppState::new(StoreDirectory::seeded(), client, SECRET), Duration::from_secs(30))
}

fn pickup_order(boutique: &str) -> Value {
    json!({
        "id": 820_982_911_946_154_508_u64,
        "email": "jon@example.com",
        "shipping_lines": [{ "title": "Retrait en magasin", "price": "0.00" }],
        "note_attributes": [
            { "name": "boutique_retrait", "value": boutique },
            { "name": "gift_wrap", "value": "yes" }
        ],
        "shipping_address": {
            "first_name": "Bob",
            "last_name": "Norman",
            "address1": "1 Rue A",
            "city": "Paris",
            "zip": "75000",
            "country": "France",
            "phone": "+33 1 23 45 67 89"
        }
    })
}

fn webhook(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhooks/orders-create")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Shopify-Hmac-Sha256", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn signed_webhook(body: &str) -> Request<Body> {
    let signature = compute_signature_base64(body.as_bytes(), SECRET).unwrap();
    webhook(body, Some(&signature))
}

async fn send(app: Router, request: Request<Body>) -> Result<(StatusCode, String)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

async fn mount_update(shopify: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(matchers::method("PUT"))
        .and(matchers::path(ORDER_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(r#"{"errors":"boom"}"#))
        .expect(expected_calls)
        .mount(shopify)
        .await;
}

#[tokio::test]
async fn signed_pickup_order_is_rewritten_to_boutique() -> Result<()> {
    let shopify = MockServer::start().await;

    Mock::given(matchers::method("PUT"))
        .and(matchers::path(ORDER_PATH))
        .and(matchers::header("X-Shopify-Access-Token", "shpat_test"))
        .and(matchers::body_json(json!({
            "order": {
                "id": 820_982_911_946_154_508_u64,
                "shipping_address": {
                    "first_name": "Bob",
                    "last_name": "Norman",
                    "company": "MINELLI Aix-en-Provence",
                    "address1": "7 rue des Bagniers",
                    "city": "Aix-en-Provence",
                    "zip": "13100",
                    "country": "France",
                    "country_code": "FR",
                    "phone": "+33 1 23 45 67 89"
                },
                "note_attributes": [
                    { "name": "boutique_retrait", "value": "Aix-en-Provence" },
                    { "name": "gift_wrap", "value": "yes" },
                    { "name": "adresse_client_originale", "value": "1 Rue A, 75000 Paris" }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "order": {} })))
        .expect(1)
        .mount(&shopify)
        .await;

    let body = pickup_order("Aix-en-Provence").to_string();
    let (status, text) = send(app(&shopify), signed_webhook(&body)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "OK");
    Ok(())
}

#[tokio::test]
async fn unsigned_request_is_processed() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 1).await;

    let body = pickup_order("Aix-en-Provence").to_string();
    let (status, text) = send(app(&shopify), webhook(&body, None)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "OK");
    Ok(())
}

#[tokio::test]
async fn invalid_signature_is_rejected_before_parsing() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let body = pickup_order("Aix-en-Provence").to_string();
    let forged = compute_signature_base64(body.as_bytes(), "not-the-secret").unwrap();
    let (status, text) = send(app(&shopify), webhook(&body, Some(&forged))).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(text, "Invalid webhook signature");

    // A bad signature wins even when the body is not JSON at all.
    let (status, _) = send(app(&shopify), webhook("garbage", Some(&forged))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn empty_secret_rejects_signed_but_accepts_unsigned() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 1).await;

    let client = OrderUpdateClient::new(ClientConfig {
        base_url: shopify.uri(),
        ..Default::default()
    })?;
    let app = create_router(
        AppState::new(StoreDirectory::seeded(), client, ""),
        Duration::from_secs(30),
    );

    let body = pickup_order("Aix-en-Provence").to_string();
    let signature = compute_signature_base64(body.as_bytes(), "").unwrap();

    let (status, text) = send(app.clone(), webhook(&body, Some(&signature))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(text, "Invalid webhook signature");

    let (status, text) = send(app, webhook(&body, None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "OK");
    Ok(())
}

#[tokio::test]
async fn signature_covers_raw_bytes_not_parsed_json() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    // Same JSON value, different bytes: the compact form's signature must not
    // validate the pretty-printed body.
    let order = pickup_order("Aix-en-Provence");
    let signature = compute_signature_base64(order.to_string().as_bytes(), SECRET).unwrap();
    let pretty = serde_json::to_string_pretty(&order)?;

    let (status, _) = send(app(&shopify), webhook(&pretty, Some(&signature))).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn delivery_order_is_acknowledged_without_update() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let mut order = pickup_order("Aix-en-Provence");
    order["shipping_lines"] = json!([{ "title": "Colissimo Domicile" }]);
    let (status, text) = send(app(&shopify), signed_webhook(&order.to_string())).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Not pickup order");
    Ok(())
}

#[tokio::test]
async fn order_without_shipping_lines_is_not_pickup() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let mut order = pickup_order("Aix-en-Provence");
    order["shipping_lines"] = json!([]);
    let (status, text) = send(app(&shopify), signed_webhook(&order.to_string())).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Not pickup order");
    Ok(())
}

#[tokio::test]
async fn pickup_without_boutique_note_is_acknowledged() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let mut order = pickup_order("Aix-en-Provence");
    order["note_attributes"] = json!([{ "name": "gift_wrap", "value": "yes" }]);
    let (status, text) = send(app(&shopify), signed_webhook(&order.to_string())).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "No boutique selected");
    Ok(())
}

#[tokio::test]
async fn unknown_boutique_is_acknowledged_without_update() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let body = pickup_order("Nowhere").to_string();
    let (status, text) = send(app(&shopify), signed_webhook(&body)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Unknown boutique");
    Ok(())
}

#[tokio::test]
async fn null_boutique_value_is_an_unknown_boutique() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let body = json!({
        "id": 1,
        "shipping_lines": [{ "title": "Retrait" }],
        "note_attributes": [{ "name": "boutique_retrait", "value": null }]
    })
    .to_string();
    let (status, text) = send(app(&shopify), signed_webhook(&body)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Unknown boutique");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_server_error() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let (status, text) = send(app(&shopify), signed_webhook("{not json")).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Error");
    Ok(())
}

#[tokio::test]
async fn pickup_order_without_id_is_a_server_error() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 0).await;

    let mut order = pickup_order("Aix-en-Provence");
    order.as_object_mut().unwrap().remove("id");
    let (status, text) = send(app(&shopify), signed_webhook(&order.to_string())).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Error");
    Ok(())
}

#[tokio::test]
async fn rejected_update_hides_upstream_body() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 422, 1).await;

    let body = pickup_order("Aix-en-Provence").to_string();
    let (status, text) = send(app(&shopify), signed_webhook(&body)).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Shopify update failed");
    assert!(!text.contains("boom"));
    Ok(())
}

#[tokio::test]
async fn unreachable_shopify_is_a_server_error() -> Result<()> {
    let closed = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let client = OrderUpdateClient::new(ClientConfig {
        base_url: format!("http://{closed}"),
        ..Default::default()
    })?;
    let app = create_router(
        AppState::new(StoreDirectory::seeded(), client, SECRET),
        Duration::from_secs(30),
    );

    let body = pickup_order("Aix-en-Provence").to_string();
    let (status, text) = send(app, signed_webhook(&body)).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Error");
    Ok(())
}

#[tokio::test]
async fn inbound_timeout_answers_server_error() -> Result<()> {
    let shopify = MockServer::start().await;
    Mock::given(matchers::method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&shopify)
        .await;

    let client = OrderUpdateClient::new(ClientConfig {
        base_url: shopify.uri(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    })?;
    let app = create_router(
        AppState::new(StoreDirectory::seeded(), client, SECRET),
        Duration::from_millis(200),
    );

    let body = pickup_order("Aix-en-Provence").to_string();
    let (status, _) = send(app, signed_webhook(&body)).await?;

    // Shopify retries on 5xx; 408 would fall outside the webhook response set.
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn replayed_delivery_sends_single_original_address_note() -> Result<()> {
    let shopify = MockServer::start().await;
    mount_update(&shopify, 200, 1).await;

    // Shopify redelivering an order that was already rewritten once.
    let mut order = pickup_order("Aix-en-Provence");
    order["note_attributes"] = json!([
        { "name": "boutique_retrait", "value": "Aix-en-Provence" },
        { "name": "adresse_client_originale", "value": "1 Rue A, 75000 Paris" }
    ]);
    let (status, _) = send(app(&shopify), signed_webhook(&order.to_string())).await?;
    assert_eq!(status, StatusCode::OK);

    let requests = shopify.received_requests().await.expect("recording enabled");
    let sent: Value = serde_json::from_slice(&requests[0].body)?;
    let notes = sent["order"]["note_attributes"].as_array().expect("notes array");
    let records = notes.iter().filter(|n| n["name"] == "adresse_client_originale").count();
    assert_eq!(records, 1);
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> Result<()> {
    let shopify = MockServer::start().await;

    let response = app(&shopify).oneshot(webhook("{}", None)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}
