//! # Routes
//!
//! Axum router configuration for the checkout session API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Discovery:
///   - GET  /.well-known/commerce - Discovery profile
///
/// - Catalog:
///   - GET  /api/v1/products - List in-stock products
///   - GET  /api/v1/products/{id} - Get product by ID
///
/// - Checkout sessions:
///   - POST /api/v1/checkout_sessions - Create session
///   - GET  /api/v1/checkout_sessions/{id} - Get session
///   - POST /api/v1/checkout_sessions/{id} - Update session
///   - POST /api/v1/checkout_sessions/{id}/complete - Complete session
///   - POST /api/v1/checkout_sessions/{id}/cancel - Cancel session
///
/// - Orders:
///   - GET  /api/v1/orders/{id} - Get order
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS for the demo; production deployments would pin
    // platform origins here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session_routes = Router::new()
        .route("/", post(handlers::create_session))
        .route(
            "/{session_id}",
            get(handlers::get_session).post(handlers::update_session),
        )
        .route("/{session_id}/complete", post(handlers::complete_session))
        .route("/{session_id}/cancel", post(handlers::cancel_session));

    let api_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product))
        .route("/orders/{order_id}", get(handlers::get_order))
        .nest("/checkout_sessions", session_routes);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Discovery profile
        .route("/.well-known/commerce", get(handlers::discovery_profile))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
