//! # Order Types
//!
//! An order is the immutable record created exactly once, at successful
//! session completion. It carries its own copy of line items, totals, and
//! buyer contact; the session keeps only a lightweight reference to it.

use crate::session::{Buyer, LineItem, Totals};
use crate::product::Currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An order created from a completed checkout session.
///
/// Never mutated by the checkout path after creation; it survives
/// independently of the session object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order id: human-legible prefix + opaque suffix (e.g., "ord_a1b2…")
    pub id: String,

    /// Id of the checkout session this order originated from
    pub checkout_session_id: String,

    /// Order currency
    pub currency: Currency,

    /// Snapshot of the session's line items at completion
    pub line_items: Vec<LineItem>,

    /// Snapshot of the session's totals at completion
    pub totals: Totals,

    /// Buyer contact, if the session carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last-modified timestamp (equal to `created_at` in practice)
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Generate a fresh order id
    pub fn generate_id() -> String {
        format!("ord_{}", Uuid::new_v4().simple())
    }

    /// Snapshot a session's purchase contents into a new order
    pub fn from_session_snapshot(
        checkout_session_id: impl Into<String>,
        currency: Currency,
        line_items: Vec<LineItem>,
        totals: Totals,
        buyer: Option<Buyer>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            checkout_session_id: checkout_session_id.into(),
            currency,
            line_items,
            totals,
            buyer,
            created_at: now,
            updated_at: now,
        }
    }

    /// Lightweight reference for attachment to the originating session
    pub fn reference(&self) -> OrderReference {
        OrderReference {
            order_id: self.id.clone(),
            created_at: self.created_at,
        }
    }
}

/// What a session holds once completed: the order id and when it was
/// created, not the order itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReference {
    pub order_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::session::LineItem;

    #[test]
    fn test_order_id_prefix() {
        let id = Order::generate_id();
        assert!(id.starts_with("ord_"));
        assert!(id.len() > "ord_".len());
    }

    #[test]
    fn test_order_snapshot() {
        let product = Product::new("rose-bouquet", "Rose Bouquet", 2999, Currency::USD);
        let items = vec![LineItem::from_product(&product, 2)];
        let totals = Totals {
            subtotal: 5998,
            tax: 525,
            shipping: 0,
            discount: 0,
            total: 6523,
        };

        let order = Order::from_session_snapshot("cs_abc", Currency::USD, items, totals, None);

        assert_eq!(order.checkout_session_id, "cs_abc");
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.totals.total, 6523);

        let reference = order.reference();
        assert_eq!(reference.order_id, order.id);
        assert_eq!(reference.created_at, order.created_at);
    }
}
