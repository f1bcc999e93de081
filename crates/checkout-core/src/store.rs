//! # Session Store Contract
//!
//! The lifecycle controller persists sessions and orders through this
//! trait only. Any keyed storage works behind it; the shipped backend is
//! an in-memory map (see `checkout-engine`). Writes are last-write-wins;
//! callers that need read-modify-write atomicity must serialize per key.

use crate::error::CheckoutResult;
use crate::order::Order;
use crate::session::CheckoutSession;
use async_trait::async_trait;
use std::sync::Arc;

/// Keyed persistence for sessions and orders.
///
/// `save_session` is an upsert by id; `save_order` is insert-by-id and
/// write-once in practice (orders are never mutated after creation).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session by id, if present
    async fn get_session(&self, id: &str) -> CheckoutResult<Option<CheckoutSession>>;

    /// Upsert a session by id
    async fn save_session(&self, session: &CheckoutSession) -> CheckoutResult<()>;

    /// Fetch an order by id, if present
    async fn get_order(&self, id: &str) -> CheckoutResult<Option<Order>>;

    /// Insert an order by id
    async fn save_order(&self, order: &Order) -> CheckoutResult<()>;
}

/// Type alias for a shared store handle (dynamic dispatch)
pub type SharedSessionStore = Arc<dyn SessionStore>;
