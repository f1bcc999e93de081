//! # Settlement Gateway
//!
//! Trait seam for the external payment call made during Complete.
//! The shipped implementation is simulated: it inspects the submitted
//! token and declines a designated failure token, approving anything
//! else. A real gateway integration would live behind the same trait.

use async_trait::async_trait;
use checkout_core::CheckoutSession;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Payment data submitted with a Complete request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentData {
    /// Payment handler id (required; validated by the lifecycle engine)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<String>,

    /// Opaque settlement token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Result of a settlement attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Payment captured
    Captured,
    /// Payment declined; the session reverts to ready
    Declined { reason: String },
}

/// Settlement seam for the Complete operation.
///
/// Settlement is synchronous from the session's point of view: the
/// lifecycle engine persists `complete_in_progress` before calling this,
/// then applies the outcome.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Attempt to settle the session's total with the submitted payment data
    async fn settle(&self, session: &CheckoutSession, payment: &PaymentData) -> SettlementOutcome;

    /// Gateway name (for logging)
    fn gateway_name(&self) -> &'static str;
}

/// Token-inspecting simulated gateway
pub struct SimulatedGateway {
    failure_token: String,
}

impl SimulatedGateway {
    pub fn new(failure_token: impl Into<String>) -> Self {
        Self {
            failure_token: failure_token.into(),
        }
    }
}

#[async_trait]
impl SettlementGateway for SimulatedGateway {
    async fn settle(&self, session: &CheckoutSession, payment: &PaymentData) -> SettlementOutcome {
        debug!(
            session_id = %session.id,
            total = session.totals.total,
            "Simulating settlement"
        );

        match payment.token.as_deref() {
            Some(token) if token == self.failure_token => SettlementOutcome::Declined {
                reason: "Payment was declined by the processor".to_string(),
            },
            _ => SettlementOutcome::Captured,
        }
    }

    fn gateway_name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::Currency;
    use chrono::{Duration, Utc};

    fn session() -> CheckoutSession {
        CheckoutSession::new(Currency::USD, Utc::now() + Duration::hours(6))
    }

    #[tokio::test]
    async fn test_failure_token_declines() {
        let gateway = SimulatedGateway::new("fail_token");
        let payment = PaymentData {
            handler_id: Some("demo_handler".to_string()),
            token: Some("fail_token".to_string()),
        };

        let outcome = gateway.settle(&session(), &payment).await;
        assert!(matches!(outcome, SettlementOutcome::Declined { .. }));
    }

    #[tokio::test]
    async fn test_other_tokens_capture() {
        let gateway = SimulatedGateway::new("fail_token");

        for token in [Some("tok_visa"), None] {
            let payment = PaymentData {
                handler_id: Some("demo_handler".to_string()),
                token: token.map(String::from),
            };
            let outcome = gateway.settle(&session(), &payment).await;
            assert_eq!(outcome, SettlementOutcome::Captured);
        }
    }
}
