//! End-to-end HTTP tests for the checkout session API.

use axum::http::StatusCode;
use axum_test::TestServer;
use checkout_api::{create_router, AppConfig, AppState};
use checkout_core::ProductCatalog;
use checkout_engine::{CheckoutLifecycle, EngineConfig, MemoryStore, SimulatedGateway};
use serde_json::{json, Value};
use std::sync::Arc;

fn test_server() -> TestServer {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: "http://localhost:8080".to_string(),
        environment: "test".to_string(),
    };
    let engine_config = EngineConfig::default();
    let catalog = Arc::new(ProductCatalog::demo());
    let gateway = Arc::new(SimulatedGateway::new(engine_config.failure_token.clone()));
    let lifecycle = Arc::new(CheckoutLifecycle::new(
        MemoryStore::shared(),
        catalog.clone(),
        gateway,
        engine_config,
    ));

    let state = AppState::with_parts(lifecycle, catalog, config);
    TestServer::new(create_router(state)).expect("failed to start test server")
}

async fn create_session(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/v1/checkout_sessions").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_health() {
    let server = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_discovery_profile() {
    let server = test_server();

    let response = server.get("/.well-known/commerce").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["endpoint"],
        "http://localhost:8080/api/v1/checkout_sessions"
    );
    assert_eq!(body["payment_handlers"][0]["id"], "demo_handler");
    assert!(body["capabilities"]
        .as_array()
        .unwrap()
        .contains(&json!("checkout_sessions.complete")));
}

#[tokio::test]
async fn test_product_catalog_endpoints() {
    let server = test_server();

    let response = server.get("/api/v1/products").await;
    response.assert_status_ok();
    let body: Value = response.json();
    // Out-of-stock products are not listed
    assert!(body["products"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"] != "succulent-trio"));

    let response = server.get("/api/v1/products/rose-bouquet").await;
    response.assert_status_ok();
    let product: Value = response.json();
    assert_eq!(product["price"], 2999);

    let response = server.get("/api/v1/products/no-such-product").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let server = test_server();

    let response = server
        .post("/api/v1/checkout_sessions")
        .json(&json!({ "items": [], "currency": "usd" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 400);

    let response = server
        .post("/api/v1/checkout_sessions")
        .json(&json!({ "items": [{ "product_id": "rose-bouquet" }] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_partial_item_errors() {
    let server = test_server();

    let session = create_session(
        &server,
        json!({
            "items": [
                { "product_id": "rose-bouquet", "quantity": 1 },
                { "product_id": "no-such-product", "quantity": 1 }
            ],
            "currency": "usd"
        }),
    )
    .await;

    assert_eq!(session["status"], "incomplete");
    assert_eq!(session["line_items"].as_array().unwrap().len(), 1);
    assert_eq!(session["messages"][0]["code"], "ITEM_ERROR");
    assert_eq!(
        session["messages"][0]["text"],
        "Product not found: no-such-product"
    );
}

#[tokio::test]
async fn test_full_checkout_flow() {
    let server = test_server();

    // Create: two rose bouquets, no payment selection yet
    let session = create_session(
        &server,
        json!({
            "items": [{ "product_id": "rose-bouquet", "quantity": 2 }],
            "currency": "usd",
            "buyer": { "email": "buyer@example.com" }
        }),
    )
    .await;

    let session_id = session["id"].as_str().unwrap().to_string();
    assert_eq!(session["status"], "incomplete");
    assert_eq!(session["totals"]["subtotal"], 5998);
    assert_eq!(session["totals"]["total"], 6523);

    // Update: select the default instrument
    let response = server
        .post(&format!("/api/v1/checkout_sessions/{session_id}"))
        .json(&json!({ "payment": { "selected_instrument_id": "card-demo" } }))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["status"], "ready_for_complete");

    // Complete with a good token
    let response = server
        .post(&format!(
            "/api/v1/checkout_sessions/{session_id}/complete"
        ))
        .json(&json!({ "handler_id": "demo_handler", "token": "tok_visa" }))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["status"], "completed");
    assert_eq!(session["payment"]["status"], "captured");

    // The order is readable on its own
    let order_id = session["order"]["order_id"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("ord_"));
    let response = server.get(&format!("/api/v1/orders/{order_id}")).await;
    response.assert_status_ok();
    let order: Value = response.json();
    assert_eq!(order["checkout_session_id"], session_id.as_str());
    assert_eq!(order["totals"]["total"], 6523);

    // Completed sessions are immutable
    let response = server
        .post(&format!("/api/v1/checkout_sessions/{session_id}"))
        .json(&json!({ "buyer": { "email": "other@example.com" } }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post(&format!("/api/v1/checkout_sessions/{session_id}/cancel"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Completing again reports "already completed", creates nothing new
    let response = server
        .post(&format!(
            "/api/v1/checkout_sessions/{session_id}/complete"
        ))
        .json(&json!({ "handler_id": "demo_handler", "token": "tok_visa" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let session: Value = response.json();
    assert_eq!(session["messages"][0]["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_complete_declined_by_failure_token() {
    let server = test_server();

    let session = create_session(
        &server,
        json!({
            "items": [{ "product_id": "orchid-pot", "quantity": 1 }],
            "currency": "usd",
            "payment": { "selected_instrument_id": "card-demo" }
        }),
    )
    .await;
    let session_id = session["id"].as_str().unwrap().to_string();
    assert_eq!(session["status"], "ready_for_complete");

    let response = server
        .post(&format!(
            "/api/v1/checkout_sessions/{session_id}/complete"
        ))
        .json(&json!({ "handler_id": "demo_handler", "token": "fail_token" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let session: Value = response.json();
    assert_eq!(session["status"], "ready_for_complete");
    assert_eq!(session["payment"]["status"], "failed");
    assert_eq!(session["messages"][0]["code"], "PAYMENT_FAILED");
    assert!(session.get("order").is_none() || session["order"].is_null());
}

#[tokio::test]
async fn test_cancel_flow() {
    let server = test_server();

    let session = create_session(
        &server,
        json!({
            "items": [{ "product_id": "tulip-bundle", "quantity": 1 }],
            "currency": "usd"
        }),
    )
    .await;
    let session_id = session["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/api/v1/checkout_sessions/{session_id}/cancel"))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["status"], "canceled");
    assert_eq!(session["messages"][0]["code"], "CANCELED");

    // Idempotent: no duplicate message on a second cancel
    let response = server
        .post(&format!("/api/v1/checkout_sessions/{session_id}/cancel"))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_unknown_session() {
    let server = test_server();

    let response = server.get("/api/v1/checkout_sessions/cs_missing").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], 404);
}
