//! # Checkout Session Lifecycle
//!
//! The lifecycle controller orchestrates create/get/update/complete/cancel
//! over the resolver, totals calculator, status engine, and session store.
//! It owns every state-machine guard: terminal sessions are immutable,
//! completion requires readiness, cancellation is idempotent, and expired
//! sessions are lazily canceled on read.
//!
//! Each operation is serialized per session id with an async mutex, so a
//! read-modify-write cannot interleave with another in-process operation
//! on the same session. Across processes the store is last-write-wins.

use crate::config::EngineConfig;
use crate::settlement::{PaymentData, SettlementGateway, SettlementOutcome};
use checkout_core::{
    codes, resolver, status, totals, Buyer, CheckoutError, CheckoutResult, CheckoutSession,
    LineItemRequest, Link, Message, Order, PaymentInstrument, PaymentStatus, ProductCatalog,
    SessionStatus, SharedSessionStore,
};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, instrument, warn};

/// Caller-supplied payment fields for create/update.
///
/// Merge is field-level: each field replaces its counterpart only when
/// supplied, preserving the other. `selected_instrument_id` distinguishes
/// absent (preserve) from explicit null (clear the selection).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentInput {
    #[serde(
        default,
        deserialize_with = "some_if_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_instrument_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<PaymentInstrument>>,
}

/// Wraps a present field (even a null one) in `Some`, so absent and null
/// stay distinguishable after deserialization.
fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Input to the Create operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionInput {
    /// Requested items (required, non-empty)
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
    /// Session currency (required)
    pub currency: Option<checkout_core::Currency>,
    /// Optional payment selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInput>,
    /// Optional buyer contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
}

/// Input to the Update operation; omitted fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSessionInput {
    /// Replacement item requests (wholesale replace when supplied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItemRequest>>,
    /// Payment changes (field-level merge)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInput>,
    /// Replacement buyer contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
}

/// Outcome of a Complete attempt that reached the session.
///
/// `Rejected` carries the session with diagnostic messages: completion in
/// the wrong status or a declined settlement is a 400-class response with
/// the session body, not a bare error.
#[derive(Debug, Clone)]
pub enum CompleteOutcome {
    /// Settled; the session is `completed` and an order exists
    Completed(CheckoutSession),
    /// Not completed; see the session's messages
    Rejected(CheckoutSession),
}

impl CompleteOutcome {
    pub fn session(&self) -> &CheckoutSession {
        match self {
            CompleteOutcome::Completed(session) | CompleteOutcome::Rejected(session) => session,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CompleteOutcome::Completed(_))
    }
}

/// Orchestrates the checkout session state machine.
pub struct CheckoutLifecycle {
    store: SharedSessionStore,
    catalog: Arc<ProductCatalog>,
    gateway: Arc<dyn SettlementGateway>,
    config: EngineConfig,
    /// Per-session operation locks; guards in-process read-modify-write
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CheckoutLifecycle {
    pub fn new(
        store: SharedSessionStore,
        catalog: Arc<ProductCatalog>,
        gateway: Arc<dyn SettlementGateway>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            gateway,
            config,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new checkout session.
    ///
    /// Item resolution errors do not fail the call: the session is created
    /// with the resolvable items and `ITEM_ERROR` messages for the rest.
    #[instrument(skip(self, input), fields(items = input.items.len()))]
    pub async fn create(&self, input: CreateSessionInput) -> CheckoutResult<CheckoutSession> {
        if input.items.is_empty() {
            return Err(CheckoutError::Validation(
                "items must not be empty".to_string(),
            ));
        }
        let currency = input
            .currency
            .ok_or_else(|| CheckoutError::Validation("currency is required".to_string()))?;

        let now = Utc::now();
        let mut session = CheckoutSession::new(currency, now + self.config.session_ttl());

        session.links = self.legal_links();
        session.buyer = input.buyer;

        let payment = input.payment.unwrap_or_default();
        session.payment.selected_instrument_id = payment.selected_instrument_id.flatten();
        session.payment.instruments = payment
            .instruments
            .unwrap_or_else(|| self.config.default_instruments());
        session.payment.status = PaymentStatus::Pending;

        let resolution = resolver::resolve(&input.items, currency, &self.catalog);
        session.line_items = resolution.items;
        session.messages = resolution
            .errors
            .into_iter()
            .map(|text| Message::error(codes::ITEM_ERROR, text))
            .collect();

        session.totals = totals::calculate(&session.line_items, &self.config.totals_config());
        session.status = status::derive(
            &session.line_items,
            session.payment.selected_instrument_id.as_deref(),
        );

        self.store.save_session(&session).await?;

        info!(
            session_id = %session.id,
            status = %session.status,
            items = session.line_items.len(),
            errors = session.messages.len(),
            "Created checkout session"
        );

        Ok(session)
    }

    /// Fetch a session by id. Lazy expiry runs on every read: a session
    /// past its TTL is canceled with an `EXPIRED` message and persisted
    /// before being returned.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> CheckoutResult<CheckoutSession> {
        let _guard = self.lock_session(id).await;
        self.load_session(id).await
    }

    /// Update a session: supplied fields replace their counterparts, item
    /// changes re-run resolution and totals, and every update extends the
    /// session's TTL.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSessionInput,
    ) -> CheckoutResult<CheckoutSession> {
        let _guard = self.lock_session(id).await;
        let mut session = self.load_session(id).await?;

        if session.is_terminal() {
            return Err(CheckoutError::InvalidState {
                status: session.status.to_string(),
                message: "cannot update a terminal checkout session".to_string(),
            });
        }

        if let Some(items) = input.items {
            let resolution = resolver::resolve(&items, session.currency, &self.catalog);
            session.line_items = resolution.items;
            session.messages = resolution
                .errors
                .into_iter()
                .map(|text| Message::error(codes::ITEM_ERROR, text))
                .collect();
            session.totals = totals::calculate(&session.line_items, &self.config.totals_config());
        }

        if let Some(payment) = input.payment {
            // Field-level merge: each side replaced only when supplied
            if let Some(selection) = payment.selected_instrument_id {
                session.payment.selected_instrument_id = selection;
            }
            if let Some(instruments) = payment.instruments {
                session.payment.instruments = instruments;
            }
        }

        if let Some(buyer) = input.buyer {
            session.buyer = Some(buyer);
        }

        session.status = status::derive(
            &session.line_items,
            session.payment.selected_instrument_id.as_deref(),
        );
        session.expires_at = Utc::now() + self.config.session_ttl();
        session.updated_at = Utc::now();

        self.store.save_session(&session).await?;

        info!(session_id = %session.id, status = %session.status, "Updated checkout session");

        Ok(session)
    }

    /// Complete a session: persist `complete_in_progress`, attempt
    /// settlement, and either create the order or revert to ready.
    #[instrument(skip(self, payment))]
    pub async fn complete(
        &self,
        id: &str,
        payment: PaymentData,
    ) -> CheckoutResult<CompleteOutcome> {
        let _guard = self.lock_session(id).await;
        let mut session = self.load_session(id).await?;

        if session.status != SessionStatus::ReadyForComplete {
            return self.reject_not_ready(session).await;
        }

        if payment.handler_id.as_deref().unwrap_or("").is_empty() {
            return Err(CheckoutError::Validation(
                "payment handler id is required".to_string(),
            ));
        }

        // Model the in-flight external call: the in-progress status is
        // persisted before settlement is attempted.
        session.status = SessionStatus::CompleteInProgress;
        session.updated_at = Utc::now();
        self.store.save_session(&session).await?;

        match self.gateway.settle(&session, &payment).await {
            SettlementOutcome::Declined { reason } => {
                // First-class transition, not an error return: revert to
                // ready and record the failure.
                session.status = SessionStatus::ReadyForComplete;
                session.payment.status = PaymentStatus::Failed;
                session.messages = vec![Message::error(codes::PAYMENT_FAILED, reason.clone())];
                session.updated_at = Utc::now();
                self.store.save_session(&session).await?;

                warn!(session_id = %session.id, %reason, "Settlement declined");

                Ok(CompleteOutcome::Rejected(session))
            }
            SettlementOutcome::Captured => {
                let order = Order::from_session_snapshot(
                    session.id.clone(),
                    session.currency,
                    session.line_items.clone(),
                    session.totals,
                    session.buyer.clone(),
                );
                self.store.save_order(&order).await?;

                session.status = SessionStatus::Completed;
                session.payment.status = PaymentStatus::Captured;
                session.order = Some(order.reference());
                session.messages.clear();
                session.updated_at = Utc::now();
                self.store.save_session(&session).await?;

                info!(
                    session_id = %session.id,
                    order_id = %order.id,
                    total = session.totals.total,
                    "Completed checkout session"
                );

                Ok(CompleteOutcome::Completed(session))
            }
        }
    }

    /// Cancel a session. Idempotent: canceling an already-canceled session
    /// returns it unchanged, with no duplicate message appended.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &str) -> CheckoutResult<CheckoutSession> {
        let _guard = self.lock_session(id).await;
        let mut session = self.load_session(id).await?;

        match session.status {
            SessionStatus::Completed => Err(CheckoutError::InvalidState {
                status: session.status.to_string(),
                message: "cannot cancel a completed checkout session".to_string(),
            }),
            SessionStatus::Canceled => Ok(session),
            _ => {
                session.status = SessionStatus::Canceled;
                session.messages.push(Message::info(
                    codes::CANCELED,
                    "Checkout session canceled",
                ));
                session.updated_at = Utc::now();
                self.store.save_session(&session).await?;

                info!(session_id = %session.id, "Canceled checkout session");

                Ok(session)
            }
        }
    }

    /// Escalation hook: park a session pending out-of-band action.
    ///
    /// The protocol declares this transition but defines no trigger; no
    /// route produces it here. A later update that supplies a payment
    /// instrument re-derives readiness, which is the declared exit path.
    #[instrument(skip(self))]
    pub async fn escalate(&self, id: &str, continue_url: &str) -> CheckoutResult<CheckoutSession> {
        let _guard = self.lock_session(id).await;
        let mut session = self.load_session(id).await?;

        if session.is_terminal() {
            return Err(CheckoutError::InvalidState {
                status: session.status.to_string(),
                message: "cannot escalate a terminal checkout session".to_string(),
            });
        }

        session.status = SessionStatus::RequiresEscalation;
        session.continue_url = Some(continue_url.to_string());
        session.updated_at = Utc::now();
        self.store.save_session(&session).await?;

        Ok(session)
    }

    /// Fetch an order by id
    pub async fn get_order(&self, id: &str) -> CheckoutResult<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| CheckoutError::order_not_found(id))
    }

    /// Load a session, applying lazy expiry. Callers must hold the
    /// session lock.
    async fn load_session(&self, id: &str) -> CheckoutResult<CheckoutSession> {
        let mut session = self
            .store
            .get_session(id)
            .await?
            .ok_or_else(|| CheckoutError::session_not_found(id))?;

        let now = Utc::now();
        if session.is_expired(now) && !session.is_terminal() {
            session.status = SessionStatus::Canceled;
            session.messages = vec![Message::error(codes::EXPIRED, "Checkout session expired")];
            session.updated_at = now;
            self.store.save_session(&session).await?;

            info!(session_id = %session.id, "Expired checkout session auto-canceled");
        }

        Ok(session)
    }

    /// Reject a Complete attempt made outside `ready_for_complete`.
    /// The diagnostic replaces the message list; terminal sessions stay
    /// untouched in the store.
    async fn reject_not_ready(
        &self,
        mut session: CheckoutSession,
    ) -> CheckoutResult<CompleteOutcome> {
        let text = match session.status {
            SessionStatus::Completed => "Checkout session already completed".to_string(),
            SessionStatus::Canceled => "Cannot complete a canceled checkout session".to_string(),
            _ => format!(
                "Checkout session is not ready for completion (status: {}); \
                 check that line items and a payment instrument are set",
                session.status
            ),
        };

        let terminal = session.is_terminal();
        session.messages = vec![Message::error(codes::INVALID_STATE, text)];

        if !terminal {
            session.updated_at = Utc::now();
            self.store.save_session(&session).await?;
        }

        Ok(CompleteOutcome::Rejected(session))
    }

    /// Acquire the per-session operation lock.
    ///
    /// Entries no other task holds are pruned on each acquisition, so the
    /// map tracks live guards rather than every id ever seen.
    async fn lock_session(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.session_locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Legal links attached to every created session
    fn legal_links(&self) -> Vec<Link> {
        vec![
            Link {
                rel: "terms_of_use".to_string(),
                url: format!("{}/legal/terms", self.config.base_url),
            },
            Link {
                rel: "privacy_policy".to_string(),
                url: format!("{}/legal/privacy", self.config.base_url),
            },
        ]
    }
}
