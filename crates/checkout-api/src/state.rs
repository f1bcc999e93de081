//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the lifecycle engine, configuration, and product catalog.

use checkout_core::ProductCatalog;
use checkout_engine::{CheckoutLifecycle, EngineConfig, MemoryStore, SimulatedGateway};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL advertised in the discovery profile
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session lifecycle engine
    pub lifecycle: Arc<CheckoutLifecycle>,
    /// Product catalog
    pub catalog: Arc<ProductCatalog>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the in-memory store and simulated gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let engine_config = EngineConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load engine config: {}", e))?;

        let catalog = Arc::new(load_product_catalog()?);
        let gateway = Arc::new(SimulatedGateway::new(engine_config.failure_token.clone()));

        let lifecycle = Arc::new(CheckoutLifecycle::new(
            MemoryStore::shared(),
            catalog.clone(),
            gateway,
            engine_config,
        ));

        Ok(Self {
            lifecycle,
            catalog,
            config,
        })
    }

    /// State with explicit parts (for tests)
    pub fn with_parts(
        lifecycle: Arc<CheckoutLifecycle>,
        catalog: Arc<ProductCatalog>,
        config: AppConfig,
    ) -> Self {
        Self {
            lifecycle,
            catalog,
            config,
        }
    }
}

/// Load product catalog from config file, falling back to the demo catalog
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using seeded demo catalog");
    Ok(ProductCatalog::demo())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("BASE_URL");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
