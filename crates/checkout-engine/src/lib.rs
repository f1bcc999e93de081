//! # checkout-engine
//!
//! Checkout session lifecycle engine for checkout-session-rs.
//!
//! This crate provides:
//!
//! 1. **CheckoutLifecycle** - the session state machine
//!    - Create / Get / Update / Complete / Cancel
//!    - Lazy expiry on read, idempotent cancel, guarded completion
//!    - Per-session operation locking (last-write-wins across processes)
//!
//! 2. **SimulatedGateway** - token-inspecting settlement
//!    - The configured failure token declines; anything else captures
//!
//! 3. **MemoryStore** - volatile map-backed `SessionStore`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_engine::{CheckoutLifecycle, CreateSessionInput, EngineConfig, MemoryStore, SimulatedGateway};
//! use checkout_core::{Currency, LineItemRequest, ProductCatalog};
//! use std::sync::Arc;
//!
//! let config = EngineConfig::from_env()?;
//! let gateway = Arc::new(SimulatedGateway::new(config.failure_token.clone()));
//! let lifecycle = CheckoutLifecycle::new(
//!     MemoryStore::shared(),
//!     Arc::new(ProductCatalog::demo()),
//!     gateway,
//!     config,
//! );
//!
//! let session = lifecycle.create(CreateSessionInput {
//!     items: vec![LineItemRequest { product_id: "rose-bouquet".into(), quantity: 2 }],
//!     currency: Some(Currency::USD),
//!     ..Default::default()
//! }).await?;
//! ```

pub mod config;
pub mod lifecycle;
pub mod memory;
pub mod settlement;

// Re-exports
pub use config::EngineConfig;
pub use lifecycle::{
    CheckoutLifecycle, CompleteOutcome, CreateSessionInput, PaymentInput, UpdateSessionInput,
};
pub use memory::MemoryStore;
pub use settlement::{PaymentData, SettlementGateway, SettlementOutcome, SimulatedGateway};
