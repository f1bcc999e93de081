//! # Request Handlers
//!
//! Axum request handlers for the checkout session API.
//! All session semantics live in `checkout-engine`; handlers translate
//! between HTTP and the lifecycle engine.

use crate::discovery::DiscoveryProfile;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::CheckoutError;
use checkout_engine::{CompleteOutcome, CreateSessionInput, PaymentData, UpdateSessionInput};
use serde::Serialize;
use tracing::{error, instrument};

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-session",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Discovery profile endpoint
pub async fn discovery_profile(State(state): State<AppState>) -> impl IntoResponse {
    Json(DiscoveryProfile::new(&state.config.base_url))
}

/// Create a checkout session
#[instrument(skip(state, input), fields(items = input.items.len()))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSessionInput>,
) -> Result<impl IntoResponse, HandlerError> {
    let session = state.lifecycle.create(input).await.map_err(|e| {
        error!("Failed to create checkout session: {}", e);
        checkout_error_to_response(e)
    })?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Get a checkout session (lazy expiry applies)
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let session = state
        .lifecycle
        .get(&session_id)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Json(session))
}

/// Update a checkout session
#[instrument(skip(state, input))]
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(input): Json<UpdateSessionInput>,
) -> Result<impl IntoResponse, HandlerError> {
    let session = state
        .lifecycle
        .update(&session_id, input)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Json(session))
}

/// Complete a checkout session.
///
/// 200 with the completed session, or 400 with the session body carrying
/// diagnostic messages when the session is not ready or settlement was
/// declined.
#[instrument(skip(state, payment))]
pub async fn complete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payment): Json<PaymentData>,
) -> Result<impl IntoResponse, HandlerError> {
    let outcome = state
        .lifecycle
        .complete(&session_id, payment)
        .await
        .map_err(checkout_error_to_response)?;

    let response = match outcome {
        CompleteOutcome::Completed(session) => (StatusCode::OK, Json(session)),
        CompleteOutcome::Rejected(session) => (StatusCode::BAD_REQUEST, Json(session)),
    };

    Ok(response)
}

/// Cancel a checkout session
#[instrument(skip(state))]
pub async fn cancel_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let session = state
        .lifecycle
        .cancel(&session_id)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Json(session))
}

/// Get an order created by a completed session
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let order = state
        .lifecycle
        .get_order(&order_id)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Json(order))
}

/// Get products list
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products: Vec<_> = state.catalog.in_stock_products().collect();
    Json(serde_json::json!({
        "products": products,
        "count": products.len()
    }))
}

/// Get single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let product = state.catalog.get(&product_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                format!("Product not found: {}", product_id),
                404,
            )),
        )
    })?;

    Ok(Json(product.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400).with_details("missing currency");
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
        assert_eq!(err.details.as_deref(), Some("missing currency"));
    }

    #[test]
    fn test_checkout_error_conversion() {
        let err = CheckoutError::Validation("items must not be empty".to_string());
        let (status, _json) = checkout_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err = CheckoutError::session_not_found("cs_x");
        let (status, _json) = checkout_error_to_response(err);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
