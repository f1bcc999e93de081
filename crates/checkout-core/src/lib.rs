//! # checkout-core
//!
//! Core types and session logic for checkout-session-rs.
//!
//! This crate provides:
//! - `Product` and `ProductCatalog` for catalog lookups
//! - `CheckoutSession`, `LineItem`, and friends for the session entity
//! - `resolver` for turning requested items into priced line items
//! - `totals` for the pure subtotal/tax/shipping math
//! - `status` for the readiness computation
//! - `SessionStore` trait for keyed persistence
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use checkout_core::{resolver, totals, status, Currency, LineItemRequest, ProductCatalog, TotalsConfig};
//!
//! let catalog = ProductCatalog::demo();
//! let requests = vec![LineItemRequest { product_id: "rose-bouquet".into(), quantity: 2 }];
//!
//! let resolution = resolver::resolve(&requests, Currency::USD, &catalog);
//! let totals = totals::calculate(&resolution.items, &TotalsConfig::default());
//! let readiness = status::derive(&resolution.items, None);
//!
//! assert!(resolution.errors.is_empty());
//! assert_eq!(totals.subtotal, 5998);
//! assert_eq!(readiness, checkout_core::SessionStatus::Incomplete);
//! ```

pub mod error;
pub mod order;
pub mod product;
pub mod resolver;
pub mod session;
pub mod status;
pub mod store;
pub mod totals;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use order::{Order, OrderReference};
pub use product::{Currency, Product, ProductCatalog};
pub use resolver::Resolution;
pub use session::{
    codes, Buyer, CheckoutSession, LineItem, LineItemRequest, Link, Message, MessageSeverity,
    Payment, PaymentInstrument, PaymentStatus, ProductSnapshot, SessionStatus, Totals,
};
pub use store::{SessionStore, SharedSessionStore};
pub use totals::TotalsConfig;
