//! # Checkout-Session RS
//!
//! Reference merchant server for the commerce-session protocol.
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides
//! export PORT=8080
//! export SESSION_TTL_HOURS=6
//! export PAYMENT_FAILURE_TOKEN=fail_token
//!
//! # Run the server
//! checkout-session
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.products.len());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Checkout-session server starting on http://{}", addr);

    if !is_prod {
        info!("Discovery: GET http://{}/.well-known/commerce", addr);
        info!(
            "Sessions: POST http://{}/api/v1/checkout_sessions",
            addr
        );
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
