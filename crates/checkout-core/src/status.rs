//! # Status Derivation
//!
//! The readiness computation: a session's `incomplete` vs
//! `ready_for_complete` status is a pure function of its line items and
//! payment selection. Escalation, in-progress, and terminal states are
//! entered explicitly by lifecycle operations, never derived here.

use crate::session::{LineItem, SessionStatus};

/// Derive the readiness status from session contents.
///
/// | line items | selected instrument | result |
/// |---|---|---|
/// | empty | any | `incomplete` |
/// | non-empty | none | `incomplete` |
/// | non-empty | present | `ready_for_complete` |
pub fn derive(line_items: &[LineItem], selected_instrument_id: Option<&str>) -> SessionStatus {
    if line_items.is_empty() {
        return SessionStatus::Incomplete;
    }
    match selected_instrument_id {
        Some(_) => SessionStatus::ReadyForComplete,
        None => SessionStatus::Incomplete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Currency, Product};

    fn one_item() -> Vec<LineItem> {
        let product = Product::new("rose-bouquet", "Rose Bouquet", 2999, Currency::USD);
        vec![LineItem::from_product(&product, 1)]
    }

    #[test]
    fn test_empty_items_incomplete() {
        assert_eq!(derive(&[], None), SessionStatus::Incomplete);
        assert_eq!(derive(&[], Some("card-demo")), SessionStatus::Incomplete);
    }

    #[test]
    fn test_items_without_instrument_incomplete() {
        assert_eq!(derive(&one_item(), None), SessionStatus::Incomplete);
    }

    #[test]
    fn test_items_with_instrument_ready() {
        assert_eq!(
            derive(&one_item(), Some("card-demo")),
            SessionStatus::ReadyForComplete
        );
    }
}
