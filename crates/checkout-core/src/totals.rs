//! # Totals Calculation
//!
//! Pure totals math over resolved line items. All amounts are integer
//! minor currency units; tax rounding is half-up.

use crate::session::{LineItem, Totals};
use serde::{Deserialize, Serialize};

/// Pricing knobs for totals calculation.
///
/// Tax is expressed in basis points so the math stays integral
/// (875 bps = 8.75%).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TotalsConfig {
    /// Tax rate in basis points of the subtotal
    pub tax_rate_bps: i64,
    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold: i64,
    /// Flat shipping fee below the threshold
    pub flat_shipping_fee: i64,
}

impl Default for TotalsConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 875,
            free_shipping_threshold: 5000,
            flat_shipping_fee: 599,
        }
    }
}

/// Compute totals for a set of line items. Pure and idempotent.
///
/// - subtotal: sum of line-item totals (zero for an empty set)
/// - tax: subtotal x rate, rounded half-up to the nearest minor unit
/// - shipping: zero at/above the free-shipping threshold, else the flat fee
/// - discount: always zero (extension point only)
pub fn calculate(items: &[LineItem], config: &TotalsConfig) -> Totals {
    let subtotal: i64 = items.iter().map(|item| item.total_price).sum();

    let tax = (subtotal * config.tax_rate_bps + 5_000) / 10_000;

    let shipping = if subtotal >= config.free_shipping_threshold {
        0
    } else {
        config.flat_shipping_fee
    };

    let discount = 0;

    Totals {
        subtotal,
        tax,
        shipping,
        discount,
        total: subtotal + tax + shipping - discount,
    }
}
