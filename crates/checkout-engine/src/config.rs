//! # Engine Configuration
//!
//! Pricing, TTL, and settlement knobs for the lifecycle engine.
//! All values are loaded from environment variables with demo defaults.

use checkout_core::{CheckoutError, PaymentInstrument, TotalsConfig};
use chrono::Duration;
use std::env;

/// Lifecycle engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tax rate in basis points (875 = 8.75%)
    pub tax_rate_bps: i64,

    /// Subtotal at or above which shipping is free (minor units)
    pub free_shipping_threshold: i64,

    /// Flat shipping fee below the threshold (minor units)
    pub flat_shipping_fee: i64,

    /// Session time-to-live in hours
    pub session_ttl_hours: i64,

    /// Settlement token that simulates a declined payment
    pub failure_token: String,

    /// Base URL for legal links
    pub base_url: String,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized env vars (all optional):
    /// - `TAX_RATE_BPS`
    /// - `FREE_SHIPPING_THRESHOLD`
    /// - `FLAT_SHIPPING_FEE`
    /// - `SESSION_TTL_HOURS`
    /// - `PAYMENT_FAILURE_TOKEN`
    /// - `BASE_URL`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let tax_rate_bps = parse_var("TAX_RATE_BPS", 875)?;
        let free_shipping_threshold = parse_var("FREE_SHIPPING_THRESHOLD", 5000)?;
        let flat_shipping_fee = parse_var("FLAT_SHIPPING_FEE", 599)?;
        let session_ttl_hours = parse_var("SESSION_TTL_HOURS", 6)?;

        if tax_rate_bps < 0 || free_shipping_threshold < 0 || flat_shipping_fee < 0 {
            return Err(CheckoutError::Configuration(
                "pricing values must be non-negative".to_string(),
            ));
        }
        if session_ttl_hours <= 0 {
            return Err(CheckoutError::Configuration(
                "SESSION_TTL_HOURS must be positive".to_string(),
            ));
        }

        Ok(Self {
            tax_rate_bps,
            free_shipping_threshold,
            flat_shipping_fee,
            session_ttl_hours,
            failure_token: env::var("PAYMENT_FAILURE_TOKEN")
                .unwrap_or_else(|_| "fail_token".to_string()),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
        })
    }

    /// Pricing knobs for the totals calculator
    pub fn totals_config(&self) -> TotalsConfig {
        TotalsConfig {
            tax_rate_bps: self.tax_rate_bps,
            free_shipping_threshold: self.free_shipping_threshold,
            flat_shipping_fee: self.flat_shipping_fee,
        }
    }

    /// Session time-to-live
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours)
    }

    /// Instruments offered when the caller supplies none
    pub fn default_instruments(&self) -> Vec<PaymentInstrument> {
        vec![PaymentInstrument {
            id: "card-demo".to_string(),
            handler_id: "demo_handler".to_string(),
            instrument_type: "card".to_string(),
            display_name: "Demo Card".to_string(),
        }]
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 875,
            free_shipping_threshold: 5000,
            flat_shipping_fee: 599,
            session_ttl_hours: 6,
            failure_token: "fail_token".to_string(),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

fn parse_var(name: &str, default: i64) -> Result<i64, CheckoutError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| CheckoutError::Configuration(format!("{name} must be an integer"))),
        Err(_) => Ok(default),
    }
}
