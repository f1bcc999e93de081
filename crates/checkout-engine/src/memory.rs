//! # In-Memory Store
//!
//! Volatile map-backed implementation of the `SessionStore` contract.
//! Stands in for any durable keyed store; contents are lost on restart.

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, CheckoutSession, Order, SessionStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Map-backed store for sessions and orders.
///
/// A single mutex per map is enough at demo load; no await happens while
/// a lock is held. Writes are last-write-wins by session id.
#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<String, CheckoutSession>>,
    orders: Mutex<HashMap<String, Order>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store behind a shared handle
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of sessions currently held
    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .map(|sessions| sessions.len())
            .unwrap_or(0)
    }

    /// Number of orders currently held
    pub fn order_count(&self) -> usize {
        self.orders.lock().map(|orders| orders.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get_session(&self, id: &str) -> CheckoutResult<Option<CheckoutSession>> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| CheckoutError::Internal("session map poisoned".to_string()))?;
        Ok(sessions.get(id).cloned())
    }

    async fn save_session(&self, session: &CheckoutSession) -> CheckoutResult<()> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| CheckoutError::Internal("session map poisoned".to_string()))?;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn get_order(&self, id: &str) -> CheckoutResult<Option<Order>> {
        let orders = self
            .orders
            .lock()
            .map_err(|_| CheckoutError::Internal("order map poisoned".to_string()))?;
        Ok(orders.get(id).cloned())
    }

    async fn save_order(&self, order: &Order) -> CheckoutResult<()> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| CheckoutError::Internal("order map poisoned".to_string()))?;
        orders.insert(order.id.clone(), order.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::Currency;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_session_upsert_and_get() {
        let store = MemoryStore::new();
        let mut session = CheckoutSession::new(Currency::USD, Utc::now() + Duration::hours(6));

        store.save_session(&session).await.unwrap();
        assert_eq!(store.session_count(), 1);

        session.messages.push(checkout_core::Message::info(
            checkout_core::codes::CANCELED,
            "Checkout session canceled",
        ));
        store.save_session(&session).await.unwrap();

        let loaded = store.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(store.session_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_keys() {
        let store = MemoryStore::new();
        assert!(store.get_session("cs_missing").await.unwrap().is_none());
        assert!(store.get_order("ord_missing").await.unwrap().is_none());
    }
}
