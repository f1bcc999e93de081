//! # Discovery Profile
//!
//! The static descriptor an external platform fetches before opening a
//! checkout session: protocol version, service endpoint, capability
//! names, and the advertised payment handlers. The session engine trusts
//! the handler id submitted at completion without cross-checking this
//! list; a production deployment would validate it here.

use serde::{Deserialize, Serialize};

/// Protocol version advertised to platforms
pub const PROTOCOL_VERSION: &str = "2026-01-15";

/// A payment handler advertised to platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentHandler {
    /// Handler id referenced by `payment_data.handler_id`
    pub id: String,
    /// Display name
    pub name: String,
    /// Handler type (e.g., "card")
    #[serde(rename = "type")]
    pub handler_type: String,
    /// Card networks the handler accepts
    pub supported_networks: Vec<String>,
}

/// The discovery descriptor served at `/.well-known/commerce`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryProfile {
    /// Protocol version
    pub version: String,
    /// Base endpoint for checkout session operations
    pub endpoint: String,
    /// Capability names the service supports
    pub capabilities: Vec<String>,
    /// Advertised payment handlers
    pub payment_handlers: Vec<PaymentHandler>,
}

impl DiscoveryProfile {
    /// Build the profile for a given public base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            endpoint: format!("{base_url}/api/v1/checkout_sessions"),
            capabilities: vec![
                "checkout_sessions.create".to_string(),
                "checkout_sessions.get".to_string(),
                "checkout_sessions.update".to_string(),
                "checkout_sessions.complete".to_string(),
                "checkout_sessions.cancel".to_string(),
            ],
            payment_handlers: vec![PaymentHandler {
                id: "demo_handler".to_string(),
                name: "Demo Card Handler".to_string(),
                handler_type: "card".to_string(),
                supported_networks: vec![
                    "visa".to_string(),
                    "mastercard".to_string(),
                    "amex".to_string(),
                ],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_shape() {
        let profile = DiscoveryProfile::new("http://localhost:8080");

        assert_eq!(profile.version, PROTOCOL_VERSION);
        assert_eq!(
            profile.endpoint,
            "http://localhost:8080/api/v1/checkout_sessions"
        );
        assert_eq!(profile.capabilities.len(), 5);
        assert_eq!(profile.payment_handlers[0].id, "demo_handler");
    }

    #[test]
    fn test_profile_serializes_handler_type() {
        let profile = DiscoveryProfile::new("http://localhost:8080");
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["payment_handlers"][0]["type"], "card");
    }
}
