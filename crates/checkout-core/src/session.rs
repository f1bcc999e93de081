//! # Checkout Session Types
//!
//! The checkout session is the central entity of the service: a single
//! checkout-in-progress carrying line items, totals, payment selection,
//! buyer contact, diagnostics, and lifecycle status.

use crate::order::OrderReference;
use crate::product::{Currency, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a checkout session.
///
/// `Incomplete` and `ReadyForComplete` are derived from session contents
/// (see [`crate::status`]); the remaining states are entered explicitly by
/// lifecycle operations. `Completed` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Missing line items or payment selection
    Incomplete,
    /// All required fields present, completion may be attempted
    ReadyForComplete,
    /// Out-of-band action required before the session can proceed
    RequiresEscalation,
    /// Settlement is in flight
    CompleteInProgress,
    /// Settled; an order exists
    Completed,
    /// Canceled by caller or by expiry
    Canceled,
}

impl SessionStatus {
    /// Terminal sessions are immutable (cancel-is-idempotent aside)
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Canceled)
    }

    /// Status name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Incomplete => "incomplete",
            SessionStatus::ReadyForComplete => "ready_for_complete",
            SessionStatus::RequiresEscalation => "requires_escalation",
            SessionStatus::CompleteInProgress => "complete_in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a session message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSeverity {
    Info,
    Error,
}

/// Well-known message codes
pub mod codes {
    /// A requested line item could not be resolved
    pub const ITEM_ERROR: &str = "ITEM_ERROR";
    /// Simulated settlement declined the payment
    pub const PAYMENT_FAILED: &str = "PAYMENT_FAILED";
    /// Session passed its TTL and was auto-canceled on read
    pub const EXPIRED: &str = "EXPIRED";
    /// Session was canceled by the caller
    pub const CANCELED: &str = "CANCELED";
    /// Operation attempted in a status that does not permit it
    pub const INVALID_STATE: &str = "INVALID_STATE";
}

/// A diagnostic attached to a session.
///
/// The message list is wholesale replaced by each operation that produces
/// diagnostics; messages are advisory and never abort an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub severity: MessageSeverity,
    pub code: String,
    pub text: String,
}

impl Message {
    pub fn error(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity: MessageSeverity::Error,
            code: code.into(),
            text: text.into(),
        }
    }

    pub fn info(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity: MessageSeverity::Info,
            code: code.into(),
            text: text.into(),
        }
    }
}

/// A requested (product, quantity) pair, supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// Product ID
    pub product_id: String,
    /// Quantity (positive)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Denormalized product snapshot carried by a resolved line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Catalog product ID
    pub product_id: String,
    /// Product name at resolution time
    pub name: String,
    /// Description at resolution time
    pub description: String,
    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A priced, quantity-bound resolution of one requested product.
///
/// Immutable once created; a session's line-item set is replaced wholesale
/// on update, never patched item by item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Generated unique id (`li_` prefix)
    pub id: String,

    /// Snapshot of the resolved product
    pub item: ProductSnapshot,

    /// Quantity
    pub quantity: u32,

    /// Unit price in minor currency units, as priced at resolution time
    pub unit_price: i64,

    /// `unit_price * quantity`
    pub total_price: i64,
}

impl LineItem {
    /// Resolve a catalog product into a line item with a fresh id
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: format!("li_{}", Uuid::new_v4().simple()),
            item: ProductSnapshot {
                product_id: product.id.clone(),
                name: product.name.clone(),
                description: product.description.clone(),
                image_url: product.image_url.clone(),
            },
            quantity,
            unit_price: product.price,
            total_price: product.price * quantity as i64,
        }
    }
}

/// Monetary totals for a session, in minor currency units.
///
/// Recomputed whenever line items change; never stored apart from the
/// owning session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub shipping: i64,
    pub discount: i64,
    pub total: i64,
}

/// Payment status within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Captured,
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// A payment instrument the buyer may select
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInstrument {
    /// Instrument id (e.g., "card-demo")
    pub id: String,
    /// Payment handler advertised in the discovery descriptor
    pub handler_id: String,
    /// Instrument type (e.g., "card")
    #[serde(rename = "type")]
    pub instrument_type: String,
    /// Display name (e.g., "Demo Card")
    pub display_name: String,
}

/// Payment selection and status for a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    /// Selected instrument, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_instrument_id: Option<String>,

    /// Instruments available to this session
    #[serde(default)]
    pub instruments: Vec<PaymentInstrument>,

    /// Payment status
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Optional buyer contact info; presence only, no validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A legal link attached to a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Link relation (e.g., "terms_of_use", "privacy_policy")
    pub rel: String,
    /// Target URL
    pub url: String,
}

/// A single checkout-in-progress, keyed by id in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Unique session id (`cs_` prefix, generated on create)
    pub id: String,

    /// Lifecycle status
    pub status: SessionStatus,

    /// Session currency; all line items must match it
    pub currency: Currency,

    /// Ordered resolved line items
    pub line_items: Vec<LineItem>,

    /// Monetary totals, derived from line items
    pub totals: Totals,

    /// Payment selection and status
    pub payment: Payment,

    /// Optional buyer contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,

    /// Diagnostics, replaced by each operation that produces any
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Legal links required by the protocol
    #[serde(default)]
    pub links: Vec<Link>,

    /// Absolute expiry; sessions past this are auto-canceled on read
    pub expires_at: DateTime<Utc>,

    /// Resume URL for the escalation path; set only by the escalation hook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_url: Option<String>,

    /// Lightweight reference to the order, present once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderReference>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last-modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Create an empty session with a generated id
    pub fn new(currency: Currency, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("cs_{}", Uuid::new_v4().simple()),
            status: SessionStatus::Incomplete,
            currency,
            line_items: Vec::new(),
            totals: Totals::default(),
            payment: Payment::default(),
            buyer: None,
            messages: Vec::new(),
            links: Vec::new(),
            expires_at,
            continue_url: None,
            order: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the session has passed its TTL
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the session is in a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_line_item_from_product() {
        let product = Product::new("rose-bouquet", "Rose Bouquet", 2999, Currency::USD);
        let item = LineItem::from_product(&product, 3);

        assert_eq!(item.total_price, 8997);
        assert_eq!(item.unit_price, 2999);
        assert_eq!(item.item.product_id, "rose-bouquet");
        assert!(item.id.starts_with("li_"));
    }

    #[test]
    fn test_fresh_ids_per_resolution() {
        let product = Product::new("rose-bouquet", "Rose Bouquet", 2999, Currency::USD);
        let a = LineItem::from_product(&product, 1);
        let b = LineItem::from_product(&product, 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = CheckoutSession::new(Currency::USD, now + Duration::hours(6));

        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(7)));
        assert!(!session.is_terminal());
        assert_eq!(session.status, SessionStatus::Incomplete);
        assert!(session.id.starts_with("cs_"));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Canceled.is_terminal());
        assert!(!SessionStatus::CompleteInProgress.is_terminal());
        assert!(!SessionStatus::RequiresEscalation.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(SessionStatus::ReadyForComplete.as_str(), "ready_for_complete");
        let json = serde_json::to_string(&SessionStatus::RequiresEscalation).unwrap();
        assert_eq!(json, "\"requires_escalation\"");
    }
}
