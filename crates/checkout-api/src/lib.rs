//! # checkout-api
//!
//! HTTP API layer for checkout-session-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for checkout sessions, orders, and products
//! - The discovery profile served to external platforms
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/.well-known/commerce` | Discovery profile |
//! | POST | `/api/v1/checkout_sessions` | Create session |
//! | GET | `/api/v1/checkout_sessions/:id` | Get session |
//! | POST | `/api/v1/checkout_sessions/:id` | Update session |
//! | POST | `/api/v1/checkout_sessions/:id/complete` | Complete session |
//! | POST | `/api/v1/checkout_sessions/:id/cancel` | Cancel session |
//! | GET | `/api/v1/orders/:id` | Get order |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/products/:id` | Get product |

pub mod discovery;
pub mod handlers;
pub mod routes;
pub mod state;

pub use discovery::{DiscoveryProfile, PaymentHandler, PROTOCOL_VERSION};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
