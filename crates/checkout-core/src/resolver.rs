//! # Line-Item Resolution
//!
//! Resolves requested (product id, quantity) pairs against the catalog
//! into priced line items. Resolution is per-request independent: bad
//! requests are skipped and reported, good ones go through. The caller
//! decides how to surface the accumulated errors.

use crate::product::{Currency, ProductCatalog};
use crate::session::{LineItem, LineItemRequest};

/// Outcome of resolving a batch of line-item requests.
///
/// `items` preserves the order of the input requests, minus skipped ones.
/// `errors` holds one human-readable string per skipped request.
#[derive(Debug, Default)]
pub struct Resolution {
    pub items: Vec<LineItem>,
    pub errors: Vec<String>,
}

/// Resolve requests against the catalog for a target currency.
///
/// Never fails outright: partial success is a first-class outcome.
pub fn resolve(
    requests: &[LineItemRequest],
    currency: Currency,
    catalog: &ProductCatalog,
) -> Resolution {
    let mut resolution = Resolution::default();

    for request in requests {
        if request.quantity == 0 {
            resolution.errors.push(format!(
                "Invalid quantity for {}: must be at least 1",
                request.product_id
            ));
            continue;
        }

        let product = match catalog.get(&request.product_id) {
            Some(p) => p,
            None => {
                resolution
                    .errors
                    .push(format!("Product not found: {}", request.product_id));
                continue;
            }
        };

        if !product.in_stock {
            resolution
                .errors
                .push(format!("Product out of stock: {}", product.name));
            continue;
        }

        if product.currency != currency {
            resolution.errors.push(format!(
                "Currency mismatch for {}: expected {}, got {}",
                product.name, currency, product.currency
            ));
            continue;
        }

        resolution
            .items
            .push(LineItem::from_product(product, request.quantity));
    }

    resolution
}
